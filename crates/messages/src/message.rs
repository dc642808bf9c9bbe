use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{
    AuditTrail, ConfigBuilder, Configuration, Entity, FieldViolation, TenantConfig, Tenancy,
    UserId, Validate, Violations, required, take,
};

topics_core::string_id!(
    /// Message identifier.
    MessageId,
    "MessageId"
);

/// A message posted to a channel.
///
/// `author_id` refers to a user by identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    author_id: UserId,
    channel_id: String,
    content: String,
    tenancy: Tenancy,
    audit: AuditTrail,
}

topics_core::impl_metadata!(Message);

impl Entity for Message {
    type Id = MessageId;
    const KIND: &'static str = "message";

    fn id(&self) -> &MessageId {
        &self.id
    }
}

impl Validate for Message {
    fn validate(&self, violations: &mut Violations) {
        violations.require("channel_id", &self.channel_id);
        violations.require("content", &self.content);
    }
}

impl Message {
    pub fn builder() -> ConfigBuilder<MessageConfig> {
        ConfigBuilder::new()
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Default)]
pub struct MessageConfig {
    author_id: Option<UserId>,
    channel_id: String,
    content: String,
    tenancy: Option<Tenancy>,
}

impl Configuration for MessageConfig {
    type Output = Message;

    fn check(&self, violations: &mut Violations) {
        violations.require_set("author_id", &self.author_id);
        violations.require("channel_id", &self.channel_id);
        violations.require("content", &self.content);
        violations.require_set("tenancy", &self.tenancy);
    }

    fn construct(self, now: DateTime<Utc>) -> Result<Message, FieldViolation> {
        Ok(Message {
            id: MessageId::generate(),
            author_id: take("author_id", self.author_id)?,
            channel_id: self.channel_id,
            content: self.content,
            tenancy: take("tenancy", self.tenancy)?,
            audit: AuditTrail::new(now),
        })
    }
}

impl TenantConfig for MessageConfig {
    fn set_tenancy(&mut self, tenancy: Tenancy) {
        self.tenancy = Some(tenancy);
    }
}

pub fn with_author_id(author_id: UserId) -> impl FnOnce(&mut MessageConfig) -> Result<(), FieldViolation> {
    move |cfg| {
        cfg.author_id = Some(author_id);
        Ok(())
    }
}

pub fn with_channel_id(
    channel_id: impl Into<String>,
) -> impl FnOnce(&mut MessageConfig) -> Result<(), FieldViolation> {
    let channel_id = channel_id.into();
    move |cfg| {
        cfg.channel_id = required("channel_id", channel_id)?;
        Ok(())
    }
}

pub fn with_content(
    content: impl Into<String>,
) -> impl FnOnce(&mut MessageConfig) -> Result<(), FieldViolation> {
    let content = content.into();
    move |cfg| {
        cfg.content = required("content", content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use topics_core::with_tenancy;

    use super::*;

    #[test]
    fn empty_message_reports_each_field() {
        let err = Message::builder()
            .with(with_channel_id(""))
            .with(with_content(""))
            .build()
            .unwrap_err();

        assert_eq!(
            err.violations().unwrap().fields(),
            vec!["author_id", "channel_id", "content", "tenancy"]
        );
    }

    #[test]
    fn builds_a_message() {
        let author = UserId::generate();
        let msg = Message::builder()
            .with(with_author_id(author.clone()))
            .with(with_channel_id("general"))
            .with(with_content("hi"))
            .with(with_tenancy("tenancy/test"))
            .build()
            .unwrap();

        assert_eq!(msg.author_id(), &author);
        assert_eq!(msg.channel_id(), "general");
        assert_eq!(msg.content(), "hi");
    }

    #[test]
    fn stored_message_without_content_is_invalid() {
        let mut msg = Message::builder()
            .with(with_author_id(UserId::generate()))
            .with(with_channel_id("general"))
            .with(with_content("hi"))
            .with(with_tenancy("tenancy/test"))
            .build()
            .unwrap();
        assert!(msg.validated().is_ok());

        msg.content.clear();
        assert_eq!(msg.validated().unwrap_err().fields(), vec!["content"]);
    }
}
