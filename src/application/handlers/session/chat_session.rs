//! ChatSessionHandler - one chat turn inside a session.

use std::sync::Arc;

use crate::application::handlers::drafting::RefineSectionHandler;
use crate::domain::foundation::{SectionKey, SessionId};
use crate::domain::session::{ChatTurn, FormSession, SessionError};
use crate::ports::SessionStore;

use super::abandon::AbandonGuard;
use super::{SessionCommandError, SessionLocks};

#[derive(Debug, Clone)]
pub struct ChatSessionCommand {
    pub session_id: SessionId,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ChatSessionResult {
    /// Assistant reply for this turn.
    pub reply: String,
    /// Section the message was classified into, if any.
    pub section: Option<SectionKey>,
    /// True if the reply was committed as the section's text.
    pub committed: bool,
    /// False if a newer chat turn started first and this one was dropped.
    pub applied: bool,
    pub session: FormSession,
}

pub struct ChatSessionHandler {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
    refiner: Arc<RefineSectionHandler>,
}

impl ChatSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        locks: SessionLocks,
        refiner: Arc<RefineSectionHandler>,
    ) -> Self {
        Self {
            store,
            locks,
            refiner,
        }
    }

    pub async fn handle(
        &self,
        cmd: ChatSessionCommand,
    ) -> Result<ChatSessionResult, SessionCommandError> {
        let id = cmd.session_id;

        let (ticket, document, transcript) = {
            let _guard = self.locks.acquire(id).await;
            let mut session = self.store.load(id).await?;
            let ticket = session.begin_chat(&cmd.message)?;
            self.store.save(&session).await?;
            (
                ticket,
                session.document().clone(),
                session.transcript().messages().to_vec(),
            )
        };

        let pending = AbandonGuard::new(self.store.clone(), self.locks.clone(), id, ticket);
        let outcome = self.refiner.refine(&transcript, &document).await;

        let _guard = self.locks.acquire(id).await;
        let mut session = self.store.load(id).await?;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                session.fail_chat(ticket);
                self.store.save(&session).await?;
                pending.disarm();
                tracing::warn!(session_id = %id, error = %err, "Chat turn failed");
                return Err(err.into());
            }
        };

        let reply = outcome.reply().to_string();
        let turn = ChatTurn {
            classification: outcome.classification(),
            reply: reply.clone(),
        };

        let settled = session.settle_chat(ticket, turn);
        if settled.is_ok() {
            self.store.save(&session).await?;
        }
        pending.disarm();

        match settled {
            Ok(turn_outcome) => {
                tracing::info!(
                    session_id = %id,
                    section = ?turn_outcome.section,
                    committed = turn_outcome.committed,
                    "Chat turn applied"
                );
                Ok(ChatSessionResult {
                    reply,
                    section: turn_outcome.section,
                    committed: turn_outcome.committed,
                    applied: true,
                    session,
                })
            }
            Err(SessionError::StaleResponse(kind)) => {
                tracing::debug!(session_id = %id, ?kind, "Dropped stale chat reply");
                Ok(ChatSessionResult {
                    reply,
                    section: outcome.classification().section(),
                    committed: false,
                    applied: false,
                    session,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::handlers::drafting::CLARIFICATION_REPLY;
    use crate::domain::conversation::ChatRole;
    use crate::domain::document::SectionValue;
    use crate::domain::session::CHAT_FAILURE_REPLY;
    use std::time::Duration;

    fn handler(provider: MockAIProvider) -> (Arc<InMemorySessionStore>, Arc<ChatSessionHandler>) {
        let store = Arc::new(InMemorySessionStore::new());
        let refiner = Arc::new(RefineSectionHandler::new(Arc::new(provider)));
        let handler = ChatSessionHandler::new(store.clone(), SessionLocks::new(), refiner);
        (store, Arc::new(handler))
    }

    async fn new_session(store: &InMemorySessionStore) -> SessionId {
        let session = FormSession::new();
        store.save(&session).await.unwrap();
        session.id()
    }

    fn command(id: SessionId, message: &str) -> ChatSessionCommand {
        ChatSessionCommand {
            session_id: id,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn turn_appends_messages_and_navigates() {
        let (store, handler) = handler(
            MockAIProvider::new()
                .with_response("culture")
                .with_response("What does transparency mean to your team?"),
        );
        let id = new_session(&store).await;

        let result = handler
            .handle(command(id, "Our culture should emphasize transparency"))
            .await
            .unwrap();

        assert!(result.applied);
        assert!(!result.committed);
        assert_eq!(result.section, Some(SectionKey::Culture));
        assert_eq!(result.session.active_section(), SectionKey::Culture);

        let messages = result.session.transcript().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[2].content, "What does transparency mean to your team?");
    }

    #[tokio::test]
    async fn completion_phrase_commits_reply() {
        let reply = "Sounds great, I think that's complete!";
        let (store, handler) =
            handler(MockAIProvider::new().with_response("culture").with_response(reply));
        let id = new_session(&store).await;

        let result = handler.handle(command(id, "transparency")).await.unwrap();

        assert!(result.committed);
        let stored = store.load(id).await.unwrap();
        assert_eq!(stored.document().get(SectionKey::Culture), &SectionValue::text(reply));
        assert_eq!(stored.last_updated_by_ai(), Some(SectionKey::Culture));
    }

    #[tokio::test]
    async fn unrecognized_message_gets_clarification() {
        let (store, handler) = handler(MockAIProvider::new().with_response("no idea"));
        let id = new_session(&store).await;

        let result = handler.handle(command(id, "hello")).await.unwrap();

        assert_eq!(result.reply, CLARIFICATION_REPLY);
        assert_eq!(result.section, None);
        assert_eq!(result.session.active_section(), SectionKey::Vision);
        assert_eq!(
            result.session.transcript().last().unwrap().content,
            CLARIFICATION_REPLY
        );
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let (store, handler) = handler(MockAIProvider::new());
        let id = new_session(&store).await;

        let result = handler.handle(command(id, "  ")).await;
        assert!(matches!(
            result,
            Err(SessionCommandError::Session(SessionError::EmptyMessage))
        ));
    }

    #[tokio::test]
    async fn provider_failure_leaves_apology() {
        let (store, handler) =
            handler(MockAIProvider::new().with_error(MockError::AuthenticationFailed));
        let id = new_session(&store).await;

        let result = handler.handle(command(id, "values")).await;

        assert!(matches!(result, Err(SessionCommandError::Provider(_))));
        let stored = store.load(id).await.unwrap();
        assert_eq!(stored.transcript().last().unwrap().content, CHAT_FAILURE_REPLY);
        assert!(!stored.chat_in_flight());
    }

    #[tokio::test]
    async fn cancelled_turn_is_settled_with_apology() {
        let (store, handler) = handler(
            MockAIProvider::new()
                .with_delay(Duration::from_millis(500))
                .with_response("vision"),
        );
        let id = new_session(&store).await;

        let turn = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(command(id, "Our vision")).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.load(id).await.unwrap().chat_in_flight());

        turn.abort();
        assert!(turn.await.unwrap_err().is_cancelled());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let stored = store.load(id).await.unwrap();
        assert!(!stored.chat_in_flight());
        assert_eq!(stored.transcript().last().unwrap().content, CHAT_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn older_overlapping_turn_is_dropped() {
        let provider = MockAIProvider::new()
            .with_delay(Duration::from_millis(100))
            .with_response("values")
            .with_response("mission")
            .with_response("Excellent, values complete")
            .with_response("Who do you serve?");
        let (store, handler) = handler(provider);
        let id = new_session(&store).await;

        let first = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(command(id, "values")).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(command(id, "mission")).await })
        };

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();

        assert!(!first.applied);
        assert!(second.applied);
        let stored = store.load(id).await.unwrap();
        assert_eq!(stored.document().get(SectionKey::Values), &SectionValue::placeholder());
        assert_eq!(stored.active_section(), SectionKey::Mission);
    }
}
