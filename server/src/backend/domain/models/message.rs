use chrono::{DateTime, Utc};

/// A direct message between two users
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: u32,
    pub sender_id: u32,
    pub receiver_id: u32,
    pub subject: Option<String>,
    pub priority: Option<String>,
    pub body: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Whether the message belongs to the conversation between `a` and `b`
    pub fn is_between(&self, a: u32, b: u32) -> bool {
        (self.sender_id == a && self.receiver_id == b) || (self.sender_id == b && self.receiver_id == a)
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: u32,
    pub receiver_id: u32,
    pub subject: Option<String>,
    pub priority: Option<String>,
    pub body: String,
}
