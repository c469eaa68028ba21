//! In-memory implementation of every storage trait.
//!
//! All state lives behind one `RwLock`, so each trait call is atomic with
//! respect to the others. Nothing survives a restart.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use shared::TimetableEntry;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::{DuplicateUsername, MessageStorage, NotificationStorage, SessionStorage, TimetableStorage, UserStorage};
use crate::backend::domain::models::{Message, NewMessage, NewUser, StoredNotification, User};

#[derive(Default)]
struct StoreData {
    users: Vec<User>,
    sessions: HashMap<String, u32>,
    messages: Vec<Message>,
    notifications: Vec<StoredNotification>,
    timetable: Vec<TimetableEntry>,
    next_user_id: u32,
    next_message_id: u32,
    next_notification_id: u32,
}

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(counter: &mut u32) -> u32 {
    *counter += 1;
    *counter
}

#[async_trait]
impl UserStorage for MemoryStore {
    async fn store_user(&self, user: NewUser) -> Result<User> {
        let mut data = self.data.write().await;
        if data.users.iter().any(|u| u.username == user.username) {
            return Err(DuplicateUsername(user.username).into());
        }

        let user = User {
            id: next_id(&mut data.next_user_id),
            username: user.username,
            password: user.password,
            role: user.role,
            is_absent: false,
        };
        data.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: u32) -> Result<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let data = self.data.read().await;
        Ok(data.users.clone())
    }

    async fn set_user_absent(&self, user_id: u32, is_absent: bool) -> Result<bool> {
        let mut data = self.data.write().await;
        match data.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.is_absent = is_absent;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl SessionStorage for MemoryStore {
    async fn create_session(&self, user_id: u32) -> Result<String> {
        let token = Uuid::new_v4().simple().to_string();
        self.data.write().await.sessions.insert(token.clone(), user_id);
        Ok(token)
    }

    async fn session_user(&self, token: &str) -> Result<Option<u32>> {
        Ok(self.data.read().await.sessions.get(token).copied())
    }

    async fn remove_session(&self, token: &str) -> Result<bool> {
        Ok(self.data.write().await.sessions.remove(token).is_some())
    }
}

#[async_trait]
impl MessageStorage for MemoryStore {
    async fn store_message(&self, message: NewMessage) -> Result<Message> {
        let mut data = self.data.write().await;
        let message = Message {
            id: next_id(&mut data.next_message_id),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            subject: message.subject,
            priority: message.priority,
            body: message.body,
            read: false,
            timestamp: Utc::now(),
        };
        data.messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages_for_receiver(&self, receiver_id: u32) -> Result<Vec<Message>> {
        let data = self.data.read().await;
        Ok(data
            .messages
            .iter()
            .filter(|m| m.receiver_id == receiver_id)
            .cloned()
            .collect())
    }

    async fn list_conversation(&self, user_a: u32, user_b: u32) -> Result<Vec<Message>> {
        let data = self.data.read().await;
        Ok(data
            .messages
            .iter()
            .filter(|m| m.is_between(user_a, user_b))
            .cloned()
            .collect())
    }

    async fn mark_message_read(&self, message_id: u32) -> Result<bool> {
        let mut data = self.data.write().await;
        match data.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_messages_read(&self, sender_id: u32, receiver_id: u32) -> Result<u32> {
        let mut data = self.data.write().await;
        let mut updated = 0;
        for message in data
            .messages
            .iter_mut()
            .filter(|m| m.sender_id == sender_id && m.receiver_id == receiver_id && !m.read)
        {
            message.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn count_unread(&self, sender_id: u32, receiver_id: u32) -> Result<u32> {
        let data = self.data.read().await;
        let count = data
            .messages
            .iter()
            .filter(|m| m.sender_id == sender_id && m.receiver_id == receiver_id && !m.read)
            .count();
        Ok(count as u32)
    }
}

#[async_trait]
impl NotificationStorage for MemoryStore {
    async fn store_notification(&self, user_id: u32, message: String) -> Result<StoredNotification> {
        let mut data = self.data.write().await;
        let notification = StoredNotification {
            id: next_id(&mut data.next_notification_id),
            user_id,
            message,
            read: false,
            created_at: Utc::now(),
        };
        data.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_unread_notifications(&self, user_id: u32) -> Result<Vec<StoredNotification>> {
        let data = self.data.read().await;
        Ok(data
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .cloned()
            .collect())
    }

    async fn mark_notifications_read(&self, user_id: u32) -> Result<u32> {
        let mut data = self.data.write().await;
        let mut updated = 0;
        for notification in data.notifications.iter_mut().filter(|n| n.user_id == user_id && !n.read) {
            notification.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl TimetableStorage for MemoryStore {
    async fn store_entry(&self, entry: TimetableEntry) -> Result<()> {
        self.data.write().await.timetable.push(entry);
        Ok(())
    }

    async fn list_entries(&self) -> Result<Vec<TimetableEntry>> {
        Ok(self.data.read().await.timetable.clone())
    }

    async fn list_entries_for(&self, classroom: &str, day: &str) -> Result<Vec<TimetableEntry>> {
        let data = self.data.read().await;
        Ok(data
            .timetable
            .iter()
            .filter(|e| e.classroom == classroom && e.day == day)
            .cloned()
            .collect())
    }

    async fn book_entry_if_free(&self, entry: TimetableEntry) -> Result<bool> {
        let mut data = self.data.write().await;
        let taken = data
            .timetable
            .iter()
            .any(|e| e.classroom == entry.classroom && e.day == entry.day && e.period == entry.period);
        if taken {
            return Ok(false);
        }
        data.timetable.push(entry);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    #[tokio::test]
    async fn test_store_user_assigns_sequential_ids() {
        let store = MemoryStore::new();

        let admin = store.store_user(NewUser::new("admin", "adminpass", Role::Admin)).await.unwrap();
        let teacher = store.store_user(NewUser::new("teacher1", "teachpass", Role::Teacher)).await.unwrap();

        assert_eq!(admin.id, 1);
        assert_eq!(teacher.id, 2);
        assert!(!teacher.is_absent);
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        store.store_user(NewUser::new("student1", "a", Role::Student)).await.unwrap();

        let error = store
            .store_user(NewUser::new("student1", "b", Role::Student))
            .await
            .unwrap_err();
        let duplicate = error.downcast_ref::<DuplicateUsername>().unwrap();
        assert_eq!(duplicate.0, "student1");
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    fn entry(classroom: &str, day: &str, period: &str) -> TimetableEntry {
        TimetableEntry {
            day: day.to_string(),
            period: period.to_string(),
            subject: "Chess club".to_string(),
            teacher: Some("teacher1".to_string()),
            classroom: classroom.to_string(),
        }
    }

    #[tokio::test]
    async fn test_book_entry_if_free_rejects_taken_slot() {
        let store = MemoryStore::new();

        assert!(store.book_entry_if_free(entry("Lab 201", "Wednesday", "14:00")).await.unwrap());
        assert!(!store.book_entry_if_free(entry("Lab 201", "Wednesday", "14:00")).await.unwrap());
        assert!(store.book_entry_if_free(entry("Lab 201", "Wednesday", "16:00")).await.unwrap());
        assert!(store.book_entry_if_free(entry("Room 3", "Wednesday", "14:00")).await.unwrap());

        assert_eq!(store.list_entries().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = MemoryStore::new();
        let token = store.create_session(7).await.unwrap();

        assert_eq!(store.session_user(&token).await.unwrap(), Some(7));
        assert!(store.remove_session(&token).await.unwrap());
        assert_eq!(store.session_user(&token).await.unwrap(), None);
        assert!(!store.remove_session(&token).await.unwrap());
    }

    #[tokio::test]
    async fn test_unread_tracking_per_direction() {
        let store = MemoryStore::new();
        for body in ["one", "two"] {
            store
                .store_message(NewMessage {
                    sender_id: 3,
                    receiver_id: 2,
                    subject: None,
                    priority: None,
                    body: body.to_string(),
                })
                .await
                .unwrap();
        }
        store
            .store_message(NewMessage {
                sender_id: 2,
                receiver_id: 3,
                subject: None,
                priority: None,
                body: "reply".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(store.count_unread(3, 2).await.unwrap(), 2);
        assert_eq!(store.list_conversation(2, 3).await.unwrap().len(), 3);
        assert_eq!(store.mark_messages_read(3, 2).await.unwrap(), 2);
        assert_eq!(store.count_unread(3, 2).await.unwrap(), 0);
        assert_eq!(store.count_unread(2, 3).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_notifications_mark_read() {
        let store = MemoryStore::new();
        store.store_notification(1, "hello".to_string()).await.unwrap();
        store.store_notification(2, "other".to_string()).await.unwrap();

        assert_eq!(store.list_unread_notifications(1).await.unwrap().len(), 1);
        assert_eq!(store.mark_notifications_read(1).await.unwrap(), 1);
        assert!(store.list_unread_notifications(1).await.unwrap().is_empty());
        assert_eq!(store.list_unread_notifications(2).await.unwrap().len(), 1);
    }
}
