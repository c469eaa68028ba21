use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use gloo::storage::{LocalStorage, Storage};
use serde::Deserialize;
use shared::{
    AnalyticsChartsResponse, AuthStatusResponse, LoginRequest, LoginResponse, MessageDraft, SendMessageRequest,
    SendMessageResponse, TeacherContact,
};

use crate::state::{MessageSender, SendAck, SendError};

/// Local storage key holding the session token between page loads
pub const TOKEN_STORAGE_KEY: &str = "campus_portal_token";

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// API client for communicating with the portal server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Client for `base_url`, picking up a token saved by an earlier sign-in
    pub fn new(base_url: &str) -> Self {
        Self::with_base_url(base_url, LocalStorage::get::<String>(TOKEN_STORAGE_KEY).ok())
    }

    pub fn with_base_url(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Sign in and remember the session token
    pub async fn login(&self, username: &str, password: &str) -> Result<(ApiClient, LoginResponse), String> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = Request::post(&self.url("/auth/login"))
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }
        let login = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        if let Err(e) = LocalStorage::set(TOKEN_STORAGE_KEY, &login.token) {
            gloo::console::warn!(format!("Could not persist session: {}", e));
        }
        Ok((self.with_token(Some(login.token.clone())), login))
    }

    /// Drop the session on the server and locally
    pub async fn logout(&self) -> ApiClient {
        if self.token.is_some() {
            let request = self.authorized(Request::post(&self.url("/auth/logout")));
            if let Err(e) = request.send().await {
                gloo::console::warn!(format!("Logout request failed: {}", e));
            }
        }
        LocalStorage::delete(TOKEN_STORAGE_KEY);
        self.with_token(None)
    }

    pub async fn auth_status(&self) -> Result<AuthStatusResponse, String> {
        if self.token.is_none() {
            return Ok(AuthStatusResponse {
                authenticated: false,
                user: None,
            });
        }
        let response = self
            .authorized(Request::get(&self.url("/auth/status")))
            .send()
            .await
            .map_err(|e| format!("Failed to fetch session: {}", e))?;

        // 401 still carries a well-formed status body
        response
            .json::<AuthStatusResponse>()
            .await
            .map_err(|e| format!("Failed to parse session: {}", e))
    }

    pub async fn list_teachers(&self) -> Result<Vec<TeacherContact>, String> {
        let response = self
            .authorized(Request::get(&self.url("/student/teachers")))
            .send()
            .await
            .map_err(|e| format!("Failed to fetch teachers: {}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }
        response
            .json::<Vec<TeacherContact>>()
            .await
            .map_err(|e| format!("Failed to parse teachers: {}", e))
    }

    pub async fn analytics_charts(&self) -> Result<AnalyticsChartsResponse, String> {
        match Request::get(&self.url("/analytics/charts")).send().await {
            Ok(response) => match response.json::<AnalyticsChartsResponse>().await {
                Ok(data) => Ok(data),
                Err(e) => Err(format!("Failed to parse charts: {}", e)),
            },
            Err(e) => Err(format!("Failed to fetch charts: {}", e)),
        }
    }
}

/// Turn a draft into the wire request; the recipient must be a teacher id
pub fn send_request_for(draft: &MessageDraft) -> Result<SendMessageRequest, SendError> {
    let receiver_id = draft
        .recipient
        .trim()
        .parse::<u32>()
        .map_err(|_| SendError::InvalidRecipient(draft.recipient.clone()))?;

    Ok(SendMessageRequest {
        receiver_id,
        message: draft.body.clone(),
        subject: Some(draft.subject.clone()),
        priority: Some(draft.priority.clone()),
    })
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("Request failed with status {}", status),
    }
}

#[async_trait(?Send)]
impl MessageSender for ApiClient {
    async fn send(&self, draft: &MessageDraft) -> Result<SendAck, SendError> {
        let request = send_request_for(draft)?;

        let response = self
            .authorized(Request::post(&self.url("/student/send_message")))
            .json(&request)
            .map_err(|e| SendError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SendError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            return Err(SendError::Rejected {
                status,
                message: error_message(response).await,
            });
        }

        let body = response
            .json::<SendMessageResponse>()
            .await
            .map_err(|e| SendError::Network(format!("Failed to parse response: {}", e)))?;
        Ok(SendAck {
            message_id: Some(body.message_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(recipient: &str) -> MessageDraft {
        MessageDraft {
            recipient: recipient.to_string(),
            subject: "Absence".to_string(),
            body: "My child will be absent Friday.".to_string(),
            priority: "normal".to_string(),
        }
    }

    #[test]
    fn test_send_request_uses_teacher_id() {
        let request = send_request_for(&draft(" 2 ")).unwrap();
        assert_eq!(request.receiver_id, 2);
        assert_eq!(request.message, "My child will be absent Friday.");
        assert_eq!(request.subject.as_deref(), Some("Absence"));
        assert_eq!(request.priority.as_deref(), Some("normal"));
    }

    #[test]
    fn test_send_request_rejects_non_numeric_recipient() {
        let result = send_request_for(&draft("Ms. Rivera"));
        assert_eq!(result, Err(SendError::InvalidRecipient("Ms. Rivera".to_string())));
    }
}
