use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::models::{NewUser, User};
use crate::backend::storage::{DuplicateUsername, SessionStorage, UserStorage};
use shared::{LoginRequest, LoginResponse, Role, SignupRequest, UserProfile};

/// Demo accounts created on startup
const DEMO_USERS: [(&str, &str, Role); 3] = [
    ("admin", "adminpass", Role::Admin),
    ("teacher1", "teachpass", Role::Teacher),
    ("student1", "studpass", Role::Student),
];

/// Reject callers whose role does not match
pub fn require_role(user: &User, role: Role) -> DomainResult<()> {
    if user.is(role) {
        Ok(())
    } else {
        warn!("User {} ({}) denied access to {} endpoint", user.username, user.role, role);
        Err(DomainError::Forbidden)
    }
}

/// Service for accounts and login sessions
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStorage>,
    sessions: Arc<dyn SessionStorage>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStorage>, sessions: Arc<dyn SessionStorage>) -> Self {
        Self { users, sessions }
    }

    /// Create the admin/teacher/student demo accounts if missing
    pub async fn seed_demo_users(&self) -> DomainResult<()> {
        for (username, password, role) in DEMO_USERS {
            if self.users.find_user_by_username(username).await?.is_none() {
                self.users.store_user(NewUser::new(username, password, role)).await?;
                info!("Seeded demo {} account '{}'", role, username);
            }
        }
        Ok(())
    }

    pub async fn login(&self, request: LoginRequest) -> DomainResult<LoginResponse> {
        let username = request.username.trim();
        info!("Login attempt for '{}'", username);

        let user = match self.users.find_user_by_username(username).await? {
            Some(user) if user.password == request.password => user,
            _ => {
                warn!("Rejected login for '{}'", username);
                return Err(DomainError::InvalidCredentials);
            }
        };

        let token = self.sessions.create_session(user.id).await?;
        info!("User {} logged in as {}", user.username, user.role);

        Ok(LoginResponse {
            token,
            user: user.to_profile(),
        })
    }

    pub async fn signup(&self, request: SignupRequest) -> DomainResult<UserProfile> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(DomainError::Validation("Username and password are required".to_string()));
        }
        if request.role == Role::Admin {
            return Err(DomainError::Validation("Admin accounts cannot be created by sign-up".to_string()));
        }
        if self.users.find_user_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict(format!("Username '{}' is already taken", username)));
        }

        // A concurrent signup can still claim the name between the lookup and the insert
        let user = self
            .users
            .store_user(NewUser::new(username, &request.password, request.role))
            .await
            .map_err(|e| match e.downcast_ref::<DuplicateUsername>() {
                Some(_) => DomainError::Conflict(format!("Username '{}' is already taken", username)),
                None => DomainError::Storage(e),
            })?;
        info!("Created {} account '{}' with ID {}", user.role, user.username, user.id);

        Ok(user.to_profile())
    }

    /// Drop a session; returns false when the token was unknown
    pub async fn logout(&self, token: &str) -> DomainResult<bool> {
        Ok(self.sessions.remove_session(token).await?)
    }

    /// User behind a session token, if the session is alive
    pub async fn resolve_session(&self, token: &str) -> DomainResult<Option<User>> {
        match self.sessions.session_user(token).await? {
            Some(user_id) => Ok(self.users.get_user(user_id).await?),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryStore;
    use async_trait::async_trait;

    /// Yields before every call so concurrent signups interleave
    struct YieldingUsers(MemoryStore);

    #[async_trait]
    impl UserStorage for YieldingUsers {
        async fn store_user(&self, user: NewUser) -> anyhow::Result<User> {
            tokio::task::yield_now().await;
            self.0.store_user(user).await
        }

        async fn get_user(&self, user_id: u32) -> anyhow::Result<Option<User>> {
            tokio::task::yield_now().await;
            self.0.get_user(user_id).await
        }

        async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
            tokio::task::yield_now().await;
            self.0.find_user_by_username(username).await
        }

        async fn list_users(&self) -> anyhow::Result<Vec<User>> {
            tokio::task::yield_now().await;
            self.0.list_users().await
        }

        async fn set_user_absent(&self, user_id: u32, is_absent: bool) -> anyhow::Result<bool> {
            tokio::task::yield_now().await;
            self.0.set_user_absent(user_id, is_absent).await
        }
    }

    async fn setup() -> AuthService {
        let store = Arc::new(MemoryStore::new());
        let service = AuthService::new(store.clone(), store);
        service.seed_demo_users().await.unwrap();
        service
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let service = setup().await;
        service.seed_demo_users().await.unwrap();

        assert_eq!(service.users.list_users().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_login_and_resolve_session() {
        let service = setup().await;

        let response = service.login(login_request("teacher1", "teachpass")).await.unwrap();
        assert_eq!(response.user.role, Role::Teacher);
        assert_eq!(response.user.email, "teacher1@school.edu");

        let user = service.resolve_session(&response.token).await.unwrap().unwrap();
        assert_eq!(user.username, "teacher1");

        assert!(service.logout(&response.token).await.unwrap());
        assert!(service.resolve_session(&response.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let service = setup().await;
        let result = service.login(login_request("student1", "nope")).await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_signup_rules() {
        let service = setup().await;

        let profile = service
            .signup(SignupRequest {
                username: "student2".to_string(),
                password: "pw".to_string(),
                role: Role::Student,
            })
            .await
            .unwrap();
        assert_eq!(profile.id, 4);

        let duplicate = service
            .signup(SignupRequest {
                username: "student2".to_string(),
                password: "pw".to_string(),
                role: Role::Student,
            })
            .await;
        assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

        let admin = service
            .signup(SignupRequest {
                username: "root".to_string(),
                password: "pw".to_string(),
                role: Role::Admin,
            })
            .await;
        assert!(matches!(admin, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_require_role() {
        let user = User {
            id: 1,
            username: "student1".to_string(),
            password: String::new(),
            role: Role::Student,
            is_absent: false,
        };
        assert!(require_role(&user, Role::Student).is_ok());
        assert!(matches!(require_role(&user, Role::Teacher), Err(DomainError::Forbidden)));
    }

    #[tokio::test]
    async fn test_concurrent_signups_for_same_name_conflict() {
        let service = AuthService::new(Arc::new(YieldingUsers(MemoryStore::new())), Arc::new(MemoryStore::new()));
        let request = || SignupRequest {
            username: "student2".to_string(),
            password: "pw".to_string(),
            role: Role::Student,
        };

        let (first, second) = tokio::join!(service.signup(request()), service.signup(request()));

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|r| matches!(r, Err(DomainError::Conflict(_))))
                .count(),
            1
        );
        assert_eq!(service.users.list_users().await.unwrap().len(), 1);
    }
}
