use anyhow::Context;
use async_trait::async_trait;

use super::EmailProvider;

pub struct MailgunEmailProvider {
    api_key: String,
    domain: String,
    from: String,
    client: reqwest::Client,
}

impl MailgunEmailProvider {
    pub fn new(api_key: String, domain: String, from: String) -> Self {
        Self {
            api_key,
            domain,
            from,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailProvider for MailgunEmailProvider {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let url = format!("https://api.mailgun.net/v3/{}/messages", self.domain);

        self.client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&[
                ("from", self.from.as_str()),
                ("to", to),
                ("subject", subject),
                ("text", body),
            ])
            .send()
            .await
            .context("failed to send Mailgun email")?
            .error_for_status()
            .context("Mailgun API returned error")?;

        Ok(())
    }
}
