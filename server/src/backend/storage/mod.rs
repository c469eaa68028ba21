//! # Storage Module
//!
//! Data access for the portal. The domain layer only sees the traits in
//! [`traits`]; [`memory::MemoryStore`] implements all of them with process-local
//! state, matching the portal's in-memory data model.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{DuplicateUsername, MessageStorage, NotificationStorage, SessionStorage, TimetableStorage, UserStorage};
