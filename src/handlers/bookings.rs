use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::check_admin;
use crate::db::queries::{self, NewBooking};
use crate::errors::AppError;
use crate::state::AppState;

// POST /api/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub booking_date: Option<String>,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub service_type: String,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let booking_date = body
        .booking_date
        .as_deref()
        .ok_or_else(|| AppError::Validation("booking_date is required".to_string()))?;
    let booking_date = NaiveDate::parse_from_str(booking_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("booking_date must be YYYY-MM-DD".to_string()))?;

    let id = {
        let db = state.db.lock().unwrap();
        queries::create_booking(
            &db,
            &NewBooking {
                booking_date,
                client_name: body.client_name,
                client_phone: body.client_phone,
                client_email: body.client_email,
                service_type: body.service_type,
            },
        )?
    };

    tracing::info!(booking_id = id, date = %booking_date, "booking created");

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

// GET /api/bookings
#[derive(Serialize)]
pub struct BookingView {
    id: i64,
    booking_date: String,
    client_name: String,
    client_phone: String,
    client_email: String,
    service_type: String,
    status: String,
    created_at: String,
}

#[derive(Serialize)]
pub struct BookingsResponse {
    bookings: Vec<BookingView>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BookingsResponse>, AppError> {
    check_admin(&headers, &state.config.admin_password)?;

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::list_bookings(&db)?
    };

    let bookings = bookings
        .into_iter()
        .map(|b| BookingView {
            id: b.id,
            booking_date: b.booking_date.format("%Y-%m-%d").to_string(),
            client_name: b.client_name,
            client_phone: b.client_phone,
            client_email: b.client_email,
            service_type: b.service_type,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    Ok(Json(BookingsResponse { bookings }))
}
