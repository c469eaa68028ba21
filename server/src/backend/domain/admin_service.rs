use log::info;
use std::sync::Arc;

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::notification_service::NotificationService;
use crate::backend::storage::UserStorage;
use shared::{MarkAbsentResponse, Role, TeacherStatus};

/// Staff administration: teacher roster and absence marking
#[derive(Clone)]
pub struct AdminService {
    users: Arc<dyn UserStorage>,
    notification_service: NotificationService,
}

impl AdminService {
    pub fn new(users: Arc<dyn UserStorage>, notification_service: NotificationService) -> Self {
        Self {
            users,
            notification_service,
        }
    }

    pub async fn list_teachers(&self) -> DomainResult<Vec<TeacherStatus>> {
        let users = self.users.list_users().await?;
        Ok(users
            .into_iter()
            .filter(|u| u.is(Role::Teacher))
            .map(|u| TeacherStatus {
                id: u.id,
                username: u.username,
                is_absent: u.is_absent,
            })
            .collect())
    }

    /// Flag a teacher as absent today and tell every student
    pub async fn mark_teacher_absent(&self, teacher_username: &str) -> DomainResult<MarkAbsentResponse> {
        let teacher = match self.users.find_user_by_username(teacher_username.trim()).await? {
            Some(user) if user.is(Role::Teacher) => user,
            _ => return Err(DomainError::NotFound("Teacher".to_string())),
        };

        self.users.set_user_absent(teacher.id, true).await?;

        let students: Vec<u32> = self
            .users
            .list_users()
            .await?
            .into_iter()
            .filter(|u| u.is(Role::Student))
            .map(|u| u.id)
            .collect();
        for student_id in &students {
            self.notification_service
                .notify(*student_id, format!("Your teacher {} is absent today.", teacher.username))
                .await?;
        }
        info!("{} marked absent, {} students notified", teacher.username, students.len());

        Ok(MarkAbsentResponse {
            success: true,
            message: format!("{} marked as absent. Students notified.", teacher.username),
            notified_students: students.len() as u32,
        })
    }
}
