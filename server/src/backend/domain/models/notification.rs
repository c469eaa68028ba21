use chrono::{DateTime, Utc};
use shared::UserNotification;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredNotification {
    pub id: u32,
    pub user_id: u32,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl StoredNotification {
    pub fn to_dto(&self) -> UserNotification {
        UserNotification {
            id: self.id,
            message: self.message.clone(),
            read: self.read,
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
