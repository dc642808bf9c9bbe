//! User service: registration, soft deletion and lookup.

use std::str::FromStr;

use topics_api::v1::{
    DeleteUserRequest, DeleteUserResponse, GetUserInfoRequest, GetUserInfoResponse,
    RegisterUserRequest, RegisterUserResponse, Users,
};
use topics_core::{
    Auditable, Context, DomainResult, Entity, MultiTenant, Repository, with_tenancy,
};
use topics_events::{EventEnvelope, EventSink};

use crate::event::UserEvent;
use crate::user::{User, UserId, with_email, with_first_name, with_last_name};

/// Orchestrates the user aggregate over an injected repository and event sink.
#[derive(Debug)]
pub struct UserService<R, S> {
    users: R,
    events: S,
}

impl<R, S> UserService<R, S>
where
    R: Repository<User>,
    S: EventSink<EventEnvelope<UserEvent>>,
{
    pub fn new(users: R, events: S) -> Self {
        Self { users, events }
    }

    /// Fire-and-forget: a sink failure is logged, never returned.
    fn publish(&self, user: &User, event: UserEvent) {
        let envelope = EventEnvelope::new(
            user.tenancy().clone(),
            user.id().as_str(),
            User::KIND,
            event,
        );
        if let Err(e) = self.events.publish(envelope) {
            tracing::warn!(user_id = %user.id(), error = %e, "failed to publish user event");
        }
    }
}

impl From<&User> for GetUserInfoResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            tenancy: user.tenancy().to_string(),
            created_at: user.created_at(),
            deleted_at: user.deleted_at(),
        }
    }
}

impl<R, S> Users for UserService<R, S>
where
    R: Repository<User>,
    S: EventSink<EventEnvelope<UserEvent>>,
{
    fn register_user(
        &self,
        ctx: &Context,
        req: RegisterUserRequest,
    ) -> DomainResult<RegisterUserResponse> {
        ctx.ensure_active()?;
        tracing::debug!(email = %req.email, tenancy = %req.tenancy, "registering user");

        let user = User::builder()
            .with(with_email(req.email))
            .with(with_first_name(req.first_name))
            .with(with_last_name(req.last_name))
            .with(with_tenancy(req.tenancy))
            .build()?;

        self.users.save(&user)?;
        self.publish(&user, UserEvent::registered(&user));

        tracing::info!(user_id = %user.id(), tenancy = %user.tenancy(), "user registered");
        Ok(RegisterUserResponse {
            id: user.id().to_string(),
        })
    }

    fn delete_user(&self, ctx: &Context, req: DeleteUserRequest) -> DomainResult<DeleteUserResponse> {
        ctx.ensure_active()?;
        let id = UserId::from_str(&req.id)?;

        let mut user = self.users.find_by_id(&id)?;
        if !user.delete() {
            tracing::debug!(user_id = %id, "user already deleted");
            return Ok(DeleteUserResponse {});
        }
        self.users.save(&user)?;

        if let Some(event) = UserEvent::deleted(&user) {
            self.publish(&user, event);
        }

        tracing::info!(user_id = %id, "user deleted");
        Ok(DeleteUserResponse {})
    }

    fn get_user_info(
        &self,
        ctx: &Context,
        req: GetUserInfoRequest,
    ) -> DomainResult<GetUserInfoResponse> {
        ctx.ensure_active()?;
        let id = UserId::from_str(&req.id)?;

        let user = self.users.find_by_id(&id)?;
        Ok(GetUserInfoResponse::from(&user))
    }
}
