//! # Messaging Service
//!
//! Direct messages between students and teachers. Students write to teachers
//! from the dashboard dialog; teachers read their inbox, follow a conversation
//! with one student and reply. Every delivered message queues a notification
//! for its receiver.

use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::{Message, NewMessage, User};
use crate::backend::domain::notification_service::NotificationService;
use crate::backend::storage::{MessageStorage, UserStorage};
use shared::{
    ConversationMessage, ConversationSide, InboxMessage, MarkReadResponse, Role, SendMessageRequest,
    SendMessageResponse, StudentContact, TeacherContact, TeacherSendMessageRequest,
};

#[derive(Clone)]
pub struct MessagingService {
    users: Arc<dyn UserStorage>,
    messages: Arc<dyn MessageStorage>,
    notification_service: NotificationService,
}

impl MessagingService {
    pub fn new(
        users: Arc<dyn UserStorage>,
        messages: Arc<dyn MessageStorage>,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            users,
            messages,
            notification_service,
        }
    }

    /// Teachers a student can write to
    pub async fn list_teachers(&self) -> DomainResult<Vec<TeacherContact>> {
        let users = self.users.list_users().await?;
        Ok(users
            .iter()
            .filter(|u| u.is(Role::Teacher))
            .map(|u| TeacherContact {
                id: u.id,
                name: u.username.clone(),
                email: u.email(),
            })
            .collect())
    }

    /// Students with the number of their messages the teacher has not read yet
    pub async fn list_students(&self, teacher: &User) -> DomainResult<Vec<StudentContact>> {
        let users = self.users.list_users().await?;
        let mut students = Vec::new();
        for student in users.iter().filter(|u| u.is(Role::Student)) {
            students.push(StudentContact {
                id: student.id,
                name: student.username.clone(),
                class: "General".to_string(),
                unread: self.messages.count_unread(student.id, teacher.id).await?,
                online: true,
            });
        }
        Ok(students)
    }

    pub async fn send_to_teacher(
        &self,
        sender: &User,
        request: SendMessageRequest,
    ) -> DomainResult<SendMessageResponse> {
        let body = Self::require_text(&request.message, "Message")?;
        let receiver = self.require_user(request.receiver_id, Role::Teacher, "Teacher").await?;

        let message = self
            .deliver(NewMessage {
                sender_id: sender.id,
                receiver_id: receiver.id,
                subject: Self::optional_text(request.subject),
                priority: Self::optional_text(request.priority),
                body,
            }, sender)
            .await?;

        Ok(SendMessageResponse {
            success: true,
            message: "Message sent successfully".to_string(),
            message_id: message.id,
        })
    }

    pub async fn send_to_student(
        &self,
        teacher: &User,
        request: TeacherSendMessageRequest,
    ) -> DomainResult<SendMessageResponse> {
        let body = Self::require_text(&request.content, "Message")?;
        let receiver = self.require_user(request.student_id, Role::Student, "Student").await?;

        let message = self
            .deliver(NewMessage {
                sender_id: teacher.id,
                receiver_id: receiver.id,
                subject: None,
                priority: None,
                body,
            }, teacher)
            .await?;

        Ok(SendMessageResponse {
            success: true,
            message: "Message sent successfully".to_string(),
            message_id: message.id,
        })
    }

    /// Messages addressed to the teacher, newest first
    pub async fn inbox(&self, teacher: &User) -> DomainResult<Vec<InboxMessage>> {
        let mut messages = self.messages.list_messages_for_receiver(teacher.id).await?;
        messages.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));

        let mut inbox = Vec::with_capacity(messages.len());
        for message in messages {
            let sender_name = match self.users.get_user(message.sender_id).await? {
                Some(sender) => sender.username,
                None => "Unknown".to_string(),
            };
            inbox.push(InboxMessage {
                id: message.id,
                sender_name,
                sender_id: message.sender_id,
                subject: message.subject,
                priority: message.priority,
                message: message.body,
                read: message.read,
                timestamp: message.timestamp.to_rfc3339(),
            });
        }
        Ok(inbox)
    }

    /// Both directions of the teacher/student thread, oldest first
    pub async fn conversation(&self, teacher: &User, student_id: u32) -> DomainResult<Vec<ConversationMessage>> {
        self.require_user(student_id, Role::Student, "Student").await?;

        let mut messages = self.messages.list_conversation(teacher.id, student_id).await?;
        messages.sort_by(|a, b| (a.timestamp, a.id).cmp(&(b.timestamp, b.id)));

        Ok(messages
            .into_iter()
            .map(|m| ConversationMessage {
                id: m.id,
                sender: if m.sender_id == teacher.id {
                    ConversationSide::Teacher
                } else {
                    ConversationSide::Student
                },
                content: m.body,
                timestamp: m.timestamp.to_rfc3339(),
                read: m.read,
            })
            .collect())
    }

    pub async fn mark_message_read(&self, message_id: u32) -> DomainResult<MarkReadResponse> {
        if !self.messages.mark_message_read(message_id).await? {
            return Err(DomainError::NotFound(format!("Message {}", message_id)));
        }
        Ok(MarkReadResponse {
            success: true,
            message: "Message marked as read".to_string(),
        })
    }

    pub async fn mark_conversation_read(&self, teacher: &User, student_id: u32) -> DomainResult<MarkReadResponse> {
        let updated = self.messages.mark_messages_read(student_id, teacher.id).await?;
        info!("Teacher {} read {} messages from student {}", teacher.id, updated, student_id);
        Ok(MarkReadResponse {
            success: true,
            message: format!("Marked {} messages as read", updated),
        })
    }

    async fn deliver(&self, message: NewMessage, sender: &User) -> DomainResult<Message> {
        let message = self.messages.store_message(message).await?;
        info!("Message {} sent from {} to {}", message.id, message.sender_id, message.receiver_id);

        self.notification_service
            .notify(message.receiver_id, format!("New message from {}", sender.username))
            .await?;
        Ok(message)
    }

    async fn require_user(&self, user_id: u32, role: Role, label: &str) -> DomainResult<User> {
        match self.users.get_user(user_id).await? {
            Some(user) if user.is(role) => Ok(user),
            _ => {
                warn!("Rejected message recipient {}: not a {}", user_id, role);
                Err(DomainError::Validation(format!("Invalid {}", label.to_lowercase())))
            }
        }
    }

    fn require_text(text: &str, label: &str) -> DomainResult<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(format!("{} cannot be empty", label)));
        }
        Ok(trimmed.to_string())
    }

    fn optional_text(text: Option<String>) -> Option<String> {
        text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::NewUser;
    use crate::backend::storage::{MemoryStore, NotificationStorage};

    struct Fixture {
        store: Arc<MemoryStore>,
        service: MessagingService,
        teacher: User,
        student: User,
        admin: User,
    }

    async fn setup() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let admin = store.store_user(NewUser::new("admin", "a", Role::Admin)).await.unwrap();
        let teacher = store.store_user(NewUser::new("teacher1", "t", Role::Teacher)).await.unwrap();
        let student = store.store_user(NewUser::new("student1", "s", Role::Student)).await.unwrap();
        let service = MessagingService::new(
            store.clone(),
            store.clone(),
            NotificationService::new(store.clone()),
        );
        Fixture {
            store,
            service,
            teacher,
            student,
            admin,
        }
    }

    fn to_teacher(receiver_id: u32, text: &str) -> SendMessageRequest {
        SendMessageRequest {
            receiver_id,
            message: text.to_string(),
            subject: Some("Absence".to_string()),
            priority: Some("normal".to_string()),
        }
    }

    #[tokio::test]
    async fn test_student_message_notifies_teacher() {
        let f = setup().await;

        let response = f
            .service
            .send_to_teacher(&f.student, to_teacher(f.teacher.id, "My child will be absent Friday."))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.message_id, 1);

        let notifications = f.store.list_unread_notifications(f.teacher.id).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "New message from student1");

        let inbox = f.service.inbox(&f.teacher).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].sender_name, "student1");
        assert_eq!(inbox[0].subject.as_deref(), Some("Absence"));
        assert!(!inbox[0].read);
    }

    #[tokio::test]
    async fn test_receiver_must_be_teacher() {
        let f = setup().await;

        let to_admin = f.service.send_to_teacher(&f.student, to_teacher(f.admin.id, "hi")).await;
        assert!(matches!(to_admin, Err(DomainError::Validation(_))));

        let to_nobody = f.service.send_to_teacher(&f.student, to_teacher(99, "hi")).await;
        assert!(matches!(to_nobody, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let f = setup().await;
        let result = f.service.send_to_teacher(&f.student, to_teacher(f.teacher.id, "   ")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(f.service.inbox(&f.teacher).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inbox_newest_first_and_conversation_oldest_first() {
        let f = setup().await;
        f.service.send_to_teacher(&f.student, to_teacher(f.teacher.id, "first")).await.unwrap();
        f.service
            .send_to_student(
                &f.teacher,
                TeacherSendMessageRequest {
                    student_id: f.student.id,
                    content: "reply".to_string(),
                },
            )
            .await
            .unwrap();
        f.service.send_to_teacher(&f.student, to_teacher(f.teacher.id, "second")).await.unwrap();

        let inbox: Vec<String> = f.service.inbox(&f.teacher).await.unwrap().into_iter().map(|m| m.message).collect();
        assert_eq!(inbox, vec!["second", "first"]);

        let conversation = f.service.conversation(&f.teacher, f.student.id).await.unwrap();
        let contents: Vec<&str> = conversation.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "reply", "second"]);
        assert_eq!(conversation[1].sender, ConversationSide::Teacher);
        assert_eq!(conversation[0].sender, ConversationSide::Student);

        let student_notifications = f.store.list_unread_notifications(f.student.id).await.unwrap();
        assert_eq!(student_notifications[0].message, "New message from teacher1");
    }

    #[tokio::test]
    async fn test_unread_counts_and_mark_read() {
        let f = setup().await;
        f.service.send_to_teacher(&f.student, to_teacher(f.teacher.id, "one")).await.unwrap();
        f.service.send_to_teacher(&f.student, to_teacher(f.teacher.id, "two")).await.unwrap();

        let students = f.service.list_students(&f.teacher).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].unread, 2);

        f.service.mark_message_read(1).await.unwrap();
        assert_eq!(f.service.list_students(&f.teacher).await.unwrap()[0].unread, 1);

        let response = f.service.mark_conversation_read(&f.teacher, f.student.id).await.unwrap();
        assert_eq!(response.message, "Marked 1 messages as read");
        assert_eq!(f.service.list_students(&f.teacher).await.unwrap()[0].unread, 0);

        let missing = f.service.mark_message_read(42).await;
        assert!(matches!(missing, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_teachers() {
        let f = setup().await;
        let teachers = f.service.list_teachers().await.unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].email, "teacher1@school.edu");
    }
}
