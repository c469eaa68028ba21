//! # Backend Module
//!
//! Everything behind the HTTP listener, in three layers:
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, business rules)
//!     ↓
//! Storage Layer (in-memory store behind traits)
//! ```
//!
//! This module wires the layers together: it builds the storage, the services
//! that share it, and the router with CORS and optional static file serving.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use shared::Role;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::backend::domain::{
    AdminService, AuthService, DashboardService, MessagingService, NotificationService, TimetableService,
};
use crate::backend::storage::{MemoryStore, UserStorage};
use crate::config::ServerConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub messaging_service: MessagingService,
    pub notification_service: NotificationService,
    pub timetable_service: TimetableService,
    pub admin_service: AdminService,
    pub dashboard_service: DashboardService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up in-memory storage");
    let store = Arc::new(MemoryStore::new());
    initialize_with_store(store, config.seed_demo_users).await
}

/// Build the services over an existing store and seed demo data
pub async fn initialize_with_store(store: Arc<MemoryStore>, seed_demo_users: bool) -> Result<AppState> {
    info!("Setting up domain services");
    let notification_service = NotificationService::new(store.clone());
    let app_state = AppState {
        auth_service: AuthService::new(store.clone(), store.clone()),
        messaging_service: MessagingService::new(store.clone(), store.clone(), notification_service.clone()),
        notification_service: notification_service.clone(),
        timetable_service: TimetableService::new(store.clone()),
        admin_service: AdminService::new(store.clone(), notification_service),
        dashboard_service: DashboardService::new(),
    };

    if seed_demo_users {
        app_state
            .auth_service
            .seed_demo_users()
            .await
            .context("Failed to seed demo users")?;
    }

    let teachers: Vec<String> = store
        .list_users()
        .await?
        .into_iter()
        .filter(|u| u.is(Role::Teacher))
        .map(|u| u.username)
        .collect();
    app_state
        .timetable_service
        .seed_week(&teachers)
        .await
        .context("Failed to generate timetable")?;

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let mut router = io::rest::api_router();
    if let Some(dir) = &config.static_dir {
        info!("Serving frontend from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}
