use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A scheduled client notification, optionally tied to a booking.
///
/// Created with `sent = false, sent_at = None`; the dispatch sweep (or the
/// explicit mark-sent operation) performs the only transition, to
/// `sent = true, sent_at = Some(now)`. Contact fields are copied onto the
/// reminder at creation time and may diverge from the referenced booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub booking_id: Option<i64>,
    pub channel: ReminderChannel,
    pub reminder_text: String,
    pub send_at: NaiveDateTime,
    pub sent: bool,
    pub sent_at: Option<NaiveDateTime>,
    pub client_email: String,
    pub client_phone: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
    Email,
    Sms,
}

impl ReminderChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderChannel::Email => "email",
            ReminderChannel::Sms => "sms",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "sms" => ReminderChannel::Sms,
            _ => ReminderChannel::Email,
        }
    }
}

/// Parse a send time as submitted by the admin form. HTML `datetime-local`
/// inputs produce `2025-07-01T14:00`, so the `T` separator with or without
/// seconds is accepted alongside the storage format.
pub fn parse_send_at(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
