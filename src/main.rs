use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use photodesk::config::AppConfig;
use photodesk::db;
use photodesk::handlers;
use photodesk::services::dispatch;
use photodesk::services::notify::mailgun::MailgunEmailProvider;
use photodesk::services::notify::twilio::TwilioSmsProvider;
use photodesk::services::notify::{EmailProvider, LogOnlySender, SmsProvider};
use photodesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let email: Box<dyn EmailProvider> = if config.mailgun_api_key.is_empty() {
        tracing::info!("MAILGUN_API_KEY not set, email reminders will only be logged");
        Box::new(LogOnlySender)
    } else {
        tracing::info!("using Mailgun email provider (domain: {})", config.mailgun_domain);
        Box::new(MailgunEmailProvider::new(
            config.mailgun_api_key.clone(),
            config.mailgun_domain.clone(),
            config.mail_from.clone(),
        ))
    };

    let sms: Box<dyn SmsProvider> = if config.twilio_account_sid.is_empty() {
        tracing::info!("TWILIO_ACCOUNT_SID not set, SMS reminders will only be logged");
        Box::new(LogOnlySender)
    } else {
        tracing::info!("using Twilio SMS provider");
        Box::new(TwilioSmsProvider::new(
            config.twilio_account_sid.clone(),
            config.twilio_auth_token.clone(),
            config.twilio_phone_number.clone(),
        ))
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        email,
        sms,
    });

    tokio::spawn(dispatch::run_periodic(Arc::clone(&state)));

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/reminders", get(handlers::reminders::list_reminders))
        .route("/api/reminders", post(handlers::reminders::create_reminder))
        .route("/api/reminders", put(handlers::reminders::mark_sent))
        .route(
            "/api/reminders/dispatch",
            post(handlers::reminders::run_dispatch),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
