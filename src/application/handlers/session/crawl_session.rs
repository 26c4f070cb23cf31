//! CrawlSessionHandler - crawl a site into an existing session.
//!
//! While the crawl runs, a background ticker advances the session's
//! simulated progress. When it settles, the result is merged with the
//! partial-merge policy and the progress bar is cleared shortly after.
//! If the request is dropped before it settles, the crawl is failed in the
//! background so the session accepts new crawls.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::handlers::drafting::{
    DraftError, DraftFromWebsiteCommand, DraftFromWebsiteHandler,
};
use crate::domain::document::SectionMap;
use crate::domain::extraction::{is_crawlable_url, normalize_url};
use crate::domain::foundation::{SectionKey, SessionId};
use crate::domain::session::{FormSession, RequestTicket, PROGRESS_RESET_DELAY, PROGRESS_TICK};
use crate::ports::SessionStore;

use super::abandon::AbandonGuard;
use super::{SessionCommandError, SessionLocks};

#[derive(Debug, Clone)]
pub struct CrawlSessionCommand {
    pub session_id: SessionId,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct CrawlSessionResult {
    /// Sections that were empty or `"TBD"` and got synthesized content.
    pub replaced: Vec<SectionKey>,
    pub session: FormSession,
}

pub struct CrawlSessionHandler {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
    drafter: Arc<DraftFromWebsiteHandler>,
}

impl CrawlSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        locks: SessionLocks,
        drafter: Arc<DraftFromWebsiteHandler>,
    ) -> Self {
        Self {
            store,
            locks,
            drafter,
        }
    }

    pub async fn handle(
        &self,
        cmd: CrawlSessionCommand,
    ) -> Result<CrawlSessionResult, SessionCommandError> {
        let id = cmd.session_id;
        let url = normalize_url(&cmd.url);
        if !is_crawlable_url(&url) {
            return Err(SessionCommandError::InvalidUrl);
        }

        let ticket = {
            let _guard = self.locks.acquire(id).await;
            let mut session = self.store.load(id).await?;
            let ticket = session.begin_crawl()?;
            self.store.save(&session).await?;
            ticket
        };
        tracing::info!(session_id = %id, url = %url, "Crawl started");

        let pending = AbandonGuard::new(self.store.clone(), self.locks.clone(), id, ticket);
        let ticker = ProgressTicker::start(self.store.clone(), self.locks.clone(), id, ticket);
        let outcome = self.drafter.handle(DraftFromWebsiteCommand { url }).await;
        ticker.stop();

        let _guard = self.locks.acquire(id).await;
        let mut session = self.store.load(id).await?;

        let draft = match outcome {
            Ok(draft) => draft,
            Err(err) => {
                session.fail_crawl(ticket);
                self.store.save(&session).await?;
                pending.disarm();
                tracing::warn!(session_id = %id, error = %err, "Crawl failed");
                return Err(match err {
                    DraftError::InvalidUrl => SessionCommandError::InvalidUrl,
                    DraftError::Provider(e) => SessionCommandError::Provider(e),
                });
            }
        };

        let sections = SectionMap::from(draft.document);
        let replaced = session.settle_crawl(ticket, &sections)?;
        self.store.save(&session).await?;
        pending.disarm();
        schedule_progress_reset(self.store.clone(), self.locks.clone(), id, ticket);

        tracing::info!(session_id = %id, replaced = replaced.len(), "Crawl merged into session");
        Ok(CrawlSessionResult { replaced, session })
    }
}

/// Advances a session's simulated progress on a fixed interval.
struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    fn start(
        store: Arc<dyn SessionStore>,
        locks: SessionLocks,
        id: SessionId,
        ticket: RequestTicket,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(PROGRESS_TICK);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let _guard = locks.acquire(id).await;
                let Ok(mut session) = store.load(id).await else {
                    break;
                };
                session.tick_progress(ticket);
                if store.save(&session).await.is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Clears completed progress after a short delay, unless a newer crawl began.
fn schedule_progress_reset(
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
    id: SessionId,
    ticket: RequestTicket,
) {
    tokio::spawn(async move {
        tokio::time::sleep(PROGRESS_RESET_DELAY).await;
        let _guard = locks.acquire(id).await;
        if let Ok(mut session) = store.load(id).await {
            session.clear_progress(ticket);
            if let Err(e) = store.save(&session).await {
                tracing::warn!(session_id = %id, error = %e, "Failed to reset crawl progress");
            }
        }
    });
}
