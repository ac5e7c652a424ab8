//! Documentation of the digital business-card service.
//!
//!
//!
//! # General Infrastructure
//! - Frontend talks to this backend only, never to Redis or Meilisearch directly
//! - Redis holds the live profiles, one JSON value per slug
//! - Meilisearch answers name searches over the same contacts by proxy
//! - Uploaded avatars and shared `.vcf` files land in a media directory served back out under `/media`
//! - The static directory (`contacts.json`) is produced offline by the `process` crate
//!
//!
//!
//! # Routes
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /api/contacts/{slug}` | live profile lookup |
//! | `POST /api/contacts` | register a profile, multipart with optional avatar |
//! | `GET /api/contacts/{slug}/vcard` | `.vcf` download, `?share=true` stores a durable copy |
//! | `GET /api/directory` | full static contact list |
//! | `GET /api/directory/{slug}` | one static contact |
//! | `GET /api/directory/{slug}/qr` | scan-to-save QR of the contact |
//! | `GET /api/search` | name search by proxy |
//! | `GET /media/{object}` | stored avatars and shared vCards |
//!
//!
//!
//! # Notes
//!
//! ## Slug uniqueness
//! Slugs are the lookup key, so they must be unique. Rather than trusting
//! the form, the write path reserves the slug atomically (`HSETNX`) and a
//! second registration with the same slug is rejected outright. Lookups
//! therefore never have to pick between duplicate matches.
//!
//! ## Unknown slugs
//! A missing profile is a state, not a fault: `404 {"error":"not_found"}`
//! everywhere, one shape for the frontend to branch on.
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod database;
pub mod directory;
pub mod error;
pub mod routes;
pub mod search;
pub mod state;
pub mod storage;

use routes::{
    contact_handler, directory_contact_handler, directory_handler, media_handler, qr_handler,
    register_handler, search_handler, vcard_handler,
};
use state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/contacts", post(register_handler))
        .route("/api/contacts/{slug}", get(contact_handler))
        .route("/api/contacts/{slug}/vcard", get(vcard_handler))
        .route("/api/directory", get(directory_handler))
        .route("/api/directory/{slug}", get(directory_contact_handler))
        .route("/api/directory/{slug}/qr", get(qr_handler))
        .route("/api/search", get(search_handler))
        .route("/media/{object}", get(media_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
