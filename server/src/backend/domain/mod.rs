//! # Domain Module
//!
//! Business logic of the campus portal, independent of HTTP and storage.
//!
//! ## Module Organization
//!
//! - **auth_service**: accounts, demo seeding, login sessions, role checks
//! - **messaging_service**: student/teacher direct messages and unread tracking
//! - **notification_service**: per-user notification feed
//! - **timetable_service**: generated weekly timetable and classroom bookings
//! - **admin_service**: teacher roster and absence marking
//! - **dashboard_service**: student overview data and analytics charts
//!
//! Services return [`errors::DomainError`]; the REST layer decides how each
//! variant maps to HTTP.

pub mod admin_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod errors;
pub mod messaging_service;
pub mod models;
pub mod notification_service;
pub mod timetable_service;

pub use admin_service::AdminService;
pub use auth_service::{require_role, AuthService};
pub use dashboard_service::DashboardService;
pub use errors::{DomainError, DomainResult};
pub use messaging_service::MessagingService;
pub use notification_service::NotificationService;
pub use timetable_service::TimetableService;
