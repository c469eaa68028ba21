use log::info;
use std::sync::Arc;

use crate::backend::domain::errors::DomainResult;
use crate::backend::storage::NotificationStorage;
use shared::UserNotification;

/// Per-user notification feed
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStorage>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationStorage>) -> Self {
        Self { notifications }
    }

    pub async fn notify(&self, user_id: u32, message: impl Into<String>) -> DomainResult<()> {
        let notification = self.notifications.store_notification(user_id, message.into()).await?;
        info!("Notification {} queued for user {}", notification.id, user_id);
        Ok(())
    }

    pub async fn unread_for(&self, user_id: u32) -> DomainResult<Vec<UserNotification>> {
        let unread = self.notifications.list_unread_notifications(user_id).await?;
        Ok(unread.iter().map(|n| n.to_dto()).collect())
    }

    pub async fn mark_all_read(&self, user_id: u32) -> DomainResult<u32> {
        Ok(self.notifications.mark_notifications_read(user_id).await?)
    }
}
