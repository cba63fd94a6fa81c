pub mod mailgun;
pub mod twilio;

use async_trait::async_trait;

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

#[async_trait]
pub trait SmsProvider: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

/// Stand-in for deployments without vendor credentials. Logs the would-be
/// delivery and reports success so reminders still move to `sent`.
pub struct LogOnlySender;

#[async_trait]
impl EmailProvider for LogOnlySender {
    async fn send_email(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        tracing::info!(to, subject, "email provider not configured, logging only");
        Ok(())
    }
}

#[async_trait]
impl SmsProvider for LogOnlySender {
    async fn send_sms(&self, to: &str, _body: &str) -> anyhow::Result<()> {
        tracing::info!(to, "SMS provider not configured, logging only");
        Ok(())
    }
}
