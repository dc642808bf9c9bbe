use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{Context, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub author_id: String,
    pub channel_id: String,
    pub content: String,
    /// Falls back to the service's default tenancy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenancy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMessageRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMessageResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMessagesRequest {
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMessagesResponse {
    pub messages: Vec<MessageInfo>,
}

/// Read view of a message. Deleted messages keep their content and expose
/// the deletion timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: String,
    pub author_id: String,
    pub channel_id: String,
    pub content: String,
    pub tenancy: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

pub trait Messages: Send + Sync {
    fn send_message(
        &self,
        ctx: &Context,
        req: SendMessageRequest,
    ) -> DomainResult<SendMessageResponse>;

    fn delete_message(
        &self,
        ctx: &Context,
        req: DeleteMessageRequest,
    ) -> DomainResult<DeleteMessageResponse>;

    fn get_messages(
        &self,
        ctx: &Context,
        req: GetMessagesRequest,
    ) -> DomainResult<GetMessagesResponse>;
}
