//! Concrete [`MessageSender`]s the dialog can be wired to.

use async_trait::async_trait;
use gloo::timers::future::TimeoutFuture;
use shared::MessageDraft;

use crate::services::api::ApiClient;
use crate::state::{MessageSender, SendAck, SendError};

/// Offline stand-in: waits a fixed delay and always succeeds
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedSender {
    delay_ms: u32,
}

impl SimulatedSender {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

#[async_trait(?Send)]
impl MessageSender for SimulatedSender {
    async fn send(&self, draft: &MessageDraft) -> Result<SendAck, SendError> {
        TimeoutFuture::new(self.delay_ms).await;
        gloo::console::log!(format!(
            "Message sent: to={} subject={} priority={} body={}",
            draft.recipient, draft.subject, draft.priority, draft.body
        ));
        Ok(SendAck::default())
    }
}

/// Sender chosen at runtime: the API for a signed-in student, else simulated
#[derive(Debug, Clone, PartialEq)]
pub enum PortalSender {
    Api(ApiClient),
    Simulated(SimulatedSender),
}

impl PortalSender {
    pub fn is_simulated(&self) -> bool {
        matches!(self, PortalSender::Simulated(_))
    }
}

#[async_trait(?Send)]
impl MessageSender for PortalSender {
    async fn send(&self, draft: &MessageDraft) -> Result<SendAck, SendError> {
        match self {
            PortalSender::Api(client) => client.send(draft).await,
            PortalSender::Simulated(simulated) => simulated.send(draft).await,
        }
    }
}
