use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{Context, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub tenancy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserInfoRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserInfoResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub tenancy: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

pub trait Users: Send + Sync {
    fn register_user(
        &self,
        ctx: &Context,
        req: RegisterUserRequest,
    ) -> DomainResult<RegisterUserResponse>;

    fn delete_user(&self, ctx: &Context, req: DeleteUserRequest) -> DomainResult<DeleteUserResponse>;

    fn get_user_info(
        &self,
        ctx: &Context,
        req: GetUserInfoRequest,
    ) -> DomainResult<GetUserInfoResponse>;
}
