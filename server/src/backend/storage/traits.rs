//! # Storage Traits
//!
//! Storage abstractions the domain services depend on. The only backend today
//! is the in-memory store, but services never name it directly.

use anyhow::Result;
use async_trait::async_trait;
use shared::TimetableEntry;

use crate::backend::domain::models::{Message, NewMessage, NewUser, StoredNotification, User};

/// Returned by [`UserStorage::store_user`] when the username is taken
#[derive(Debug, thiserror::Error)]
#[error("Username already exists: {0}")]
pub struct DuplicateUsername(pub String);

/// Account storage
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Store a new user and return it with its assigned ID. Fails with
    /// [`DuplicateUsername`] when the username is taken.
    async fn store_user(&self, user: NewUser) -> Result<User>;

    async fn get_user(&self, user_id: u32) -> Result<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// All users ordered by ID
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Returns false when the user does not exist
    async fn set_user_absent(&self, user_id: u32, is_absent: bool) -> Result<bool>;
}

/// Login sessions keyed by opaque token
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn create_session(&self, user_id: u32) -> Result<String>;

    async fn session_user(&self, token: &str) -> Result<Option<u32>>;

    /// Returns true if the session existed
    async fn remove_session(&self, token: &str) -> Result<bool>;
}

/// Direct messages
#[async_trait]
pub trait MessageStorage: Send + Sync {
    /// Store a message, assigning its ID and timestamp
    async fn store_message(&self, message: NewMessage) -> Result<Message>;

    /// Messages addressed to a user, in insertion order
    async fn list_messages_for_receiver(&self, receiver_id: u32) -> Result<Vec<Message>>;

    /// Messages exchanged between two users in either direction, in insertion order
    async fn list_conversation(&self, user_a: u32, user_b: u32) -> Result<Vec<Message>>;

    /// Returns false when no message has this ID
    async fn mark_message_read(&self, message_id: u32) -> Result<bool>;

    /// Mark every unread message from `sender_id` to `receiver_id` as read.
    /// Returns the number of messages changed.
    async fn mark_messages_read(&self, sender_id: u32, receiver_id: u32) -> Result<u32>;

    async fn count_unread(&self, sender_id: u32, receiver_id: u32) -> Result<u32>;
}

/// Per-user notifications
#[async_trait]
pub trait NotificationStorage: Send + Sync {
    async fn store_notification(&self, user_id: u32, message: String) -> Result<StoredNotification>;

    async fn list_unread_notifications(&self, user_id: u32) -> Result<Vec<StoredNotification>>;

    /// Returns the number of notifications changed
    async fn mark_notifications_read(&self, user_id: u32) -> Result<u32>;
}

/// Weekly timetable, including classroom bookings
#[async_trait]
pub trait TimetableStorage: Send + Sync {
    async fn store_entry(&self, entry: TimetableEntry) -> Result<()>;

    async fn list_entries(&self) -> Result<Vec<TimetableEntry>>;

    /// Entries occupying `classroom` on weekday `day`
    async fn list_entries_for(&self, classroom: &str, day: &str) -> Result<Vec<TimetableEntry>>;

    /// Store `entry` unless its classroom, day and period are already taken.
    /// The check and the insert are atomic. Returns false on a clash.
    async fn book_entry_if_free(&self, entry: TimetableEntry) -> Result<bool>;
}
