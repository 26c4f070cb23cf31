//! Settles a started request whose handler future was dropped.
//!
//! A client disconnect or the router's timeout drops the handler between
//! `begin_*` and `settle_*`. Without this the in-flight flag would stay
//! set and block every later crawl for the session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{RequestKind, RequestTicket};
use crate::ports::SessionStore;

use super::SessionLocks;

pub(super) struct AbandonGuard {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
    id: SessionId,
    ticket: RequestTicket,
    armed: bool,
}

impl AbandonGuard {
    pub(super) fn new(
        store: Arc<dyn SessionStore>,
        locks: SessionLocks,
        id: SessionId,
        ticket: RequestTicket,
    ) -> Self {
        Self {
            store,
            locks,
            id,
            ticket,
            armed: true,
        }
    }

    /// Call once the ticket has been settled and saved.
    pub(super) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(session_id = %self.id, "No runtime to settle abandoned request");
            return;
        };

        let store = self.store.clone();
        let locks = self.locks.clone();
        let id = self.id;
        let ticket = self.ticket;
        runtime.spawn(async move {
            let _guard = locks.acquire(id).await;
            let Ok(mut session) = store.load(id).await else {
                return;
            };
            match ticket.kind() {
                RequestKind::Crawl => session.fail_crawl(ticket),
                RequestKind::Chat => session.fail_chat(ticket),
            }
            match store.save(&session).await {
                Ok(()) => {
                    tracing::info!(session_id = %id, kind = ?ticket.kind(), "Settled abandoned request")
                }
                Err(e) => {
                    tracing::warn!(session_id = %id, error = %e, "Failed to settle abandoned request")
                }
            }
        });
    }
}
