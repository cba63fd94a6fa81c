use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::db::queries;
use crate::models::{Reminder, ReminderChannel};
use crate::state::AppState;

const EMAIL_SUBJECT: &str = "Photo session reminder";

#[derive(Debug, Serialize)]
pub struct DispatchFailure {
    pub reminder_id: i64,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct DispatchOutcome {
    pub sent_count: usize,
    pub total_pending: usize,
    pub errors: Vec<DispatchFailure>,
}

/// One dispatch sweep: deliver every reminder whose send time has arrived and
/// flip it to sent. Failed deliveries stay pending so a later sweep retries.
///
/// Due rows are snapshotted under the lock, delivered unlocked, then written
/// back one by one; the lock is never held across an await. A crash between
/// delivery and write-back re-sends on restart — there is no idempotency key.
pub async fn run_sweep(state: &AppState) -> rusqlite::Result<DispatchOutcome> {
    let now = Utc::now().naive_utc();

    let due = {
        let db = state.db.lock().unwrap();
        queries::due_reminders(&db, &now)?
    };

    let total_pending = due.len();
    let mut sent_count = 0;
    let mut errors = vec![];

    for reminder in &due {
        if let Err(e) = deliver(state, reminder).await {
            tracing::warn!(reminder_id = reminder.id, error = %e, "reminder delivery failed");
            errors.push(DispatchFailure {
                reminder_id: reminder.id,
                error: e.to_string(),
            });
            continue;
        }

        let marked = {
            let db = state.db.lock().unwrap();
            queries::mark_reminder_sent(&db, reminder.id, &now)
        };
        match marked {
            Ok(_) => sent_count += 1,
            Err(e) => errors.push(DispatchFailure {
                reminder_id: reminder.id,
                error: e.to_string(),
            }),
        }
    }

    Ok(DispatchOutcome {
        sent_count,
        total_pending,
        errors,
    })
}

async fn deliver(state: &AppState, reminder: &Reminder) -> anyhow::Result<()> {
    match reminder.channel {
        ReminderChannel::Email => {
            anyhow::ensure!(
                !reminder.client_email.is_empty(),
                "reminder has no client email"
            );
            state
                .email
                .send_email(&reminder.client_email, EMAIL_SUBJECT, &reminder.reminder_text)
                .await
        }
        ReminderChannel::Sms => {
            anyhow::ensure!(
                !reminder.client_phone.is_empty(),
                "reminder has no client phone"
            );
            state
                .sms
                .send_sms(&reminder.client_phone, &reminder.reminder_text)
                .await
        }
    }
}

/// Background driver: sweep on a fixed interval until shutdown.
pub async fn run_periodic(state: Arc<AppState>) {
    let mut ticker = tokio::time::interval(Duration::from_secs(
        state.config.dispatch_interval_secs.max(1),
    ));

    loop {
        ticker.tick().await;
        match run_sweep(&state).await {
            Ok(outcome) if outcome.sent_count > 0 || !outcome.errors.is_empty() => {
                tracing::info!(
                    sent = outcome.sent_count,
                    pending = outcome.total_pending,
                    failed = outcome.errors.len(),
                    "reminder sweep finished"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "reminder sweep failed"),
        }
    }
}
