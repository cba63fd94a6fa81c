pub mod bookings;
pub mod health;
pub mod reminders;

use axum::http::HeaderMap;

use crate::errors::AppError;

/// Admin gate: the exact static secret must arrive in `X-Admin-Password` on
/// every administrative request. Wrong and missing are indistinguishable.
pub(crate) fn check_admin(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let supplied = headers
        .get("x-admin-password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if supplied != expected {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
