use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Partner,
    Courier,
    #[serde(other)]
    Other,
}

/// One message in the currently open order conversation. Only the open
/// conversation is held locally; nothing persists across orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub time: String,
}
