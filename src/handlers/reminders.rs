use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::check_admin;
use crate::db::queries::{self, NewReminder};
use crate::errors::AppError;
use crate::models::{reminder, ReminderChannel};
use crate::services::dispatch::{self, DispatchOutcome};
use crate::state::AppState;

// GET /api/reminders
#[derive(Serialize)]
pub struct ReminderView {
    id: i64,
    booking_id: Option<i64>,
    reminder_type: String,
    reminder_text: String,
    send_at: String,
    sent: bool,
    sent_at: Option<String>,
    client_email: String,
    client_phone: String,
    created_at: String,
}

#[derive(Serialize)]
pub struct RemindersResponse {
    reminders: Vec<ReminderView>,
}

pub async fn list_reminders(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RemindersResponse>, AppError> {
    check_admin(&headers, &state.config.admin_password)?;

    let reminders = {
        let db = state.db.lock().unwrap();
        queries::list_reminders(&db)?
    };

    let reminders = reminders
        .into_iter()
        .map(|r| ReminderView {
            id: r.id,
            booking_id: r.booking_id,
            reminder_type: r.channel.as_str().to_string(),
            reminder_text: r.reminder_text,
            send_at: r.send_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            sent: r.sent,
            sent_at: r
                .sent_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
            client_email: r.client_email,
            client_phone: r.client_phone,
            created_at: r.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    Ok(Json(RemindersResponse { reminders }))
}

// POST /api/reminders
#[derive(Deserialize)]
pub struct CreateReminderRequest {
    pub booking_id: Option<i64>,
    pub reminder_type: Option<String>,
    pub reminder_text: Option<String>,
    pub send_at: Option<String>,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_phone: String,
}

pub async fn create_reminder(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    check_admin(&headers, &state.config.admin_password)?;

    let reminder_text = body.reminder_text.unwrap_or_default();
    if reminder_text.trim().is_empty() {
        return Err(AppError::Validation("reminder_text is required".to_string()));
    }

    let send_at = body
        .send_at
        .as_deref()
        .ok_or_else(|| AppError::Validation("send_at is required".to_string()))?;
    let send_at = reminder::parse_send_at(send_at)
        .ok_or_else(|| AppError::Validation("send_at is not a valid date-time".to_string()))?;

    let channel = ReminderChannel::parse(body.reminder_type.as_deref().unwrap_or("email"));

    let id = {
        let db = state.db.lock().unwrap();
        queries::create_reminder(
            &db,
            &NewReminder {
                booking_id: body.booking_id,
                channel,
                reminder_text,
                send_at,
                client_email: body.client_email,
                client_phone: body.client_phone,
            },
        )?
    };

    tracing::info!(reminder_id = id, channel = channel.as_str(), send_at = %send_at, "reminder scheduled");

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

// PUT /api/reminders
//
// The path the external delivery collaborator uses to report a reminder
// delivered out of band.
#[derive(Deserialize)]
pub struct MarkSentRequest {
    pub id: Option<i64>,
}

pub async fn mark_sent(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<MarkSentRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&headers, &state.config.admin_password)?;

    let id = body
        .id
        .ok_or_else(|| AppError::Validation("id is required".to_string()))?;

    let now = Utc::now().naive_utc();
    let updated = {
        let db = state.db.lock().unwrap();
        queries::mark_reminder_sent(&db, id, &now)?
    };

    if updated {
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound(format!("reminder {id}")))
    }
}

// POST /api/reminders/dispatch
pub async fn run_dispatch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DispatchOutcome>, AppError> {
    check_admin(&headers, &state.config.admin_password)?;

    let outcome = dispatch::run_sweep(&state).await?;
    Ok(Json(outcome))
}
