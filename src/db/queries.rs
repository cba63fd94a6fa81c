use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, Reminder, ReminderChannel};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Bookings ──

pub struct NewBooking {
    pub booking_date: NaiveDate,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub service_type: String,
}

pub fn create_booking(conn: &Connection, booking: &NewBooking) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bookings (booking_date, client_name, client_phone, client_email, service_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            booking.booking_date.format(DATE_FMT).to_string(),
            booking.client_name,
            booking.client_phone,
            booking.client_email,
            booking.service_type,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All bookings, newest shoot date first.
pub fn list_bookings(conn: &Connection) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_date, client_name, client_phone, client_email, service_type, status, created_at
         FROM bookings ORDER BY booking_date DESC, id DESC",
    )?;

    let rows = stmt.query_map([], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let booking_date_str: String = row.get(1)?;
    let status_str: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    Ok(Booking {
        id: row.get(0)?,
        booking_date: NaiveDate::parse_from_str(&booking_date_str, DATE_FMT)
            .unwrap_or_else(|_| Utc::now().date_naive()),
        client_name: row.get(2)?,
        client_phone: row.get(3)?,
        client_email: row.get(4)?,
        service_type: row.get(5)?,
        status: BookingStatus::parse(&status_str),
        created_at: parse_datetime(&created_at_str),
    })
}

// ── Reminders ──

pub struct NewReminder {
    pub booking_id: Option<i64>,
    pub channel: ReminderChannel,
    pub reminder_text: String,
    pub send_at: NaiveDateTime,
    pub client_email: String,
    pub client_phone: String,
}

pub fn create_reminder(conn: &Connection, reminder: &NewReminder) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO reminders (booking_id, reminder_type, reminder_text, send_at, client_email, client_phone)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            reminder.booking_id,
            reminder.channel.as_str(),
            reminder.reminder_text,
            reminder.send_at.format(DATETIME_FMT).to_string(),
            reminder.client_email,
            reminder.client_phone,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All reminders in scheduled order, soonest first.
pub fn list_reminders(conn: &Connection) -> rusqlite::Result<Vec<Reminder>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, reminder_type, reminder_text, send_at, sent, sent_at, client_email, client_phone, created_at
         FROM reminders ORDER BY send_at ASC, id ASC",
    )?;

    let rows = stmt.query_map([], parse_reminder_row)?;

    let mut reminders = vec![];
    for row in rows {
        reminders.push(row?);
    }
    Ok(reminders)
}

/// Unsent reminders whose send time has arrived. The boundary is inclusive:
/// a reminder due exactly now is picked up by this sweep, not the next.
pub fn due_reminders(conn: &Connection, now: &NaiveDateTime) -> rusqlite::Result<Vec<Reminder>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, reminder_type, reminder_text, send_at, sent, sent_at, client_email, client_phone, created_at
         FROM reminders WHERE sent = 0 AND send_at <= ?1 ORDER BY send_at ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![now.format(DATETIME_FMT).to_string()],
        parse_reminder_row,
    )?;

    let mut reminders = vec![];
    for row in rows {
        reminders.push(row?);
    }
    Ok(reminders)
}

pub fn mark_reminder_sent(
    conn: &Connection,
    id: i64,
    sent_at: &NaiveDateTime,
) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "UPDATE reminders SET sent = 1, sent_at = ?1 WHERE id = ?2",
        params![sent_at.format(DATETIME_FMT).to_string(), id],
    )?;
    Ok(count > 0)
}

fn parse_reminder_row(row: &rusqlite::Row) -> rusqlite::Result<Reminder> {
    let channel_str: String = row.get(2)?;
    let send_at_str: String = row.get(4)?;
    let sent_at_str: Option<String> = row.get(6)?;
    let created_at_str: String = row.get(9)?;

    Ok(Reminder {
        id: row.get(0)?,
        booking_id: row.get(1)?,
        channel: ReminderChannel::parse(&channel_str),
        reminder_text: row.get(3)?,
        send_at: parse_datetime(&send_at_str),
        sent: row.get::<_, i64>(5)? != 0,
        sent_at: sent_at_str.as_deref().map(parse_datetime),
        client_email: row.get(7)?,
        client_phone: row.get(8)?,
        created_at: parse_datetime(&created_at_str),
    })
}

fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).unwrap_or_else(|_| Utc::now().naive_utc())
}
