//! Message service: posting, soft deletion and channel history.

use std::str::FromStr;

use topics_api::v1::{
    DeleteMessageRequest, DeleteMessageResponse, GetMessagesRequest, GetMessagesResponse,
    MessageInfo, Messages, SendMessageRequest, SendMessageResponse,
};
use topics_core::{
    Auditable, Context, DomainResult, Entity, MultiTenant, Repository, Tenancy, UserId, required,
    with_tenancy,
};

use crate::message::{Message, MessageId, with_author_id, with_channel_id, with_content};

#[derive(Debug)]
pub struct MessageService<R> {
    messages: R,
    default_tenancy: Tenancy,
}

impl<R: Repository<Message>> MessageService<R> {
    /// `default_tenancy` applies to messages sent without an explicit one.
    pub fn new(messages: R, default_tenancy: Tenancy) -> Self {
        Self {
            messages,
            default_tenancy,
        }
    }
}

impl From<&Message> for MessageInfo {
    fn from(msg: &Message) -> Self {
        Self {
            id: msg.id().to_string(),
            author_id: msg.author_id().to_string(),
            channel_id: msg.channel_id().to_string(),
            content: msg.content().to_string(),
            tenancy: msg.tenancy().to_string(),
            created_at: msg.created_at(),
            deleted_at: msg.deleted_at(),
        }
    }
}

impl<R: Repository<Message>> Messages for MessageService<R> {
    fn send_message(
        &self,
        ctx: &Context,
        req: SendMessageRequest,
    ) -> DomainResult<SendMessageResponse> {
        ctx.ensure_active()?;
        let author_id = UserId::from_str(&req.author_id)?;

        let tenancy = req
            .tenancy
            .unwrap_or_else(|| self.default_tenancy.to_string());
        let message = Message::builder()
            .with(with_author_id(author_id))
            .with(with_channel_id(req.channel_id))
            .with(with_content(req.content))
            .with(with_tenancy(tenancy))
            .build()?;

        self.messages.save(&message)?;

        tracing::info!(
            message_id = %message.id(),
            channel_id = message.channel_id(),
            author_id = %message.author_id(),
            "message sent"
        );
        Ok(SendMessageResponse {
            id: message.id().to_string(),
        })
    }

    fn delete_message(
        &self,
        ctx: &Context,
        req: DeleteMessageRequest,
    ) -> DomainResult<DeleteMessageResponse> {
        ctx.ensure_active()?;
        let id = MessageId::from_str(&req.id)?;

        let mut message = self.messages.find_by_id(&id)?;
        if message.delete() {
            self.messages.save(&message)?;
            tracing::info!(message_id = %id, "message deleted");
        }
        Ok(DeleteMessageResponse {})
    }

    /// Channel history in posting order. Deleted messages are kept and carry
    /// their deletion timestamp.
    fn get_messages(
        &self,
        ctx: &Context,
        req: GetMessagesRequest,
    ) -> DomainResult<GetMessagesResponse> {
        ctx.ensure_active()?;
        let channel_id = required("channel_id", req.channel_id)?;

        let messages = self
            .messages
            .list_where(&|m: &Message| m.channel_id() == channel_id)?;

        Ok(GetMessagesResponse {
            messages: messages.iter().map(MessageInfo::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use topics_core::DomainError;
    use topics_infra::InMemoryRepository;

    use super::*;

    type MessageRepo = Arc<InMemoryRepository<Message>>;

    fn setup() -> (MessageService<MessageRepo>, MessageRepo) {
        let repo: MessageRepo = Arc::new(InMemoryRepository::new());
        let svc = MessageService::new(repo.clone(), Tenancy::parse("tenancy/default").unwrap());
        (svc, repo)
    }

    fn hello(channel: &str) -> SendMessageRequest {
        SendMessageRequest {
            author_id: UserId::generate().to_string(),
            channel_id: channel.into(),
            content: "hello".into(),
            tenancy: None,
        }
    }

    #[test]
    fn deleted_messages_stay_visible_with_their_timestamp() {
        let (svc, _) = setup();
        let ctx = Context::background();
        let id = svc.send_message(&ctx, hello("general")).unwrap().id;

        svc.delete_message(&ctx, DeleteMessageRequest { id: id.clone() }).unwrap();
        let res = svc
            .get_messages(&ctx, GetMessagesRequest { channel_id: "general".into() })
            .unwrap();

        assert_eq!(res.messages.len(), 1);
        let msg = &res.messages[0];
        assert_eq!(msg.id, id);
        assert_eq!(msg.content, "hello");
        assert!(msg.deleted_at.unwrap() >= msg.created_at);
    }

    #[test]
    fn history_is_scoped_to_the_channel_in_posting_order() {
        let (svc, _) = setup();
        let ctx = Context::background();
        let first = svc.send_message(&ctx, hello("general")).unwrap().id;
        svc.send_message(&ctx, hello("random")).unwrap();
        let second = svc.send_message(&ctx, hello("general")).unwrap().id;

        let ids: Vec<_> = svc
            .get_messages(&ctx, GetMessagesRequest { channel_id: "general".into() })
            .unwrap()
            .messages
            .into_iter()
            .map(|m| m.id)
            .collect();

        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn tenancy_defaults_unless_given() {
        let (svc, repo) = setup();
        let ctx = Context::background();
        svc.send_message(&ctx, hello("general")).unwrap();
        svc.send_message(
            &ctx,
            SendMessageRequest {
                tenancy: Some("tenancy/acme".into()),
                ..hello("general")
            },
        )
        .unwrap();

        let tenancies: Vec<_> = repo
            .list()
            .unwrap()
            .iter()
            .map(|m| m.tenancy().to_string())
            .collect();
        assert_eq!(tenancies, vec!["tenancy/default", "tenancy/acme"]);
    }

    #[test]
    fn empty_content_is_rejected() {
        let (svc, repo) = setup();
        let req = SendMessageRequest {
            content: " ".into(),
            ..hello("general")
        };

        let err = svc.send_message(&Context::background(), req).unwrap_err();

        assert_eq!(err.violations().unwrap().fields(), vec!["content"]);
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn blank_author_is_an_invalid_id() {
        let (svc, repo) = setup();
        let req = SendMessageRequest {
            author_id: "  ".into(),
            ..hello("general")
        };

        let err = svc.send_message(&Context::background(), req).unwrap_err();

        assert!(matches!(err, DomainError::InvalidId(_)));
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn author_is_stored_as_a_user_id() {
        let (svc, repo) = setup();
        let author = UserId::generate();
        let req = SendMessageRequest {
            author_id: author.to_string(),
            ..hello("general")
        };

        let id = svc.send_message(&Context::background(), req).unwrap().id;

        let stored = repo.find_by_id(&MessageId::from_str(&id).unwrap()).unwrap();
        assert_eq!(stored.author_id(), &author);
    }

    #[test]
    fn unknown_channel_has_no_history() {
        let (svc, _) = setup();
        let res = svc
            .get_messages(&Context::background(), GetMessagesRequest { channel_id: "void".into() })
            .unwrap();
        assert!(res.messages.is_empty());
    }

    #[test]
    fn deleting_an_unknown_message_is_not_found() {
        let (svc, _) = setup();
        let err = svc
            .delete_message(
                &Context::background(),
                DeleteMessageRequest {
                    id: MessageId::generate().to_string(),
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
