//! FormSession - the in-memory state of one founder's drafting session.
//!
//! Holds the document, the chat transcript, and the UI flags, and applies
//! settled crawl and chat results to them. It never performs I/O; the
//! application layer runs the requests and hands results back here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::conversation::{
    signals_completion, ActiveSection, ChatMessage, Classification, Transcript,
};
use crate::domain::document::{SectionMap, SectionValue, VisionDocument};
use crate::domain::foundation::{SectionKey, SessionId};

use super::errors::SessionError;
use super::progress::CrawlProgress;
use super::ticket::{RequestKind, RequestSequencer, RequestTicket};

/// Assistant notice appended after a crawl result is merged.
pub const REFRESH_NOTICE: &str =
    "I've refreshed your Vision to Values draft. Only empty or TBD sections were replaced.";

/// Assistant message appended when a chat request fails.
pub const CHAT_FAILURE_REPLY: &str = "Sorry, something went wrong on my end. Could you try that again?";

/// Result of one settled chat turn, as produced by classifier + coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub classification: Classification,
    pub reply: String,
}

/// What applying a chat turn changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatOutcome {
    /// Section the turn was classified into, if any.
    pub section: Option<SectionKey>,
    /// True if the reply was committed as that section's new value.
    pub committed: bool,
}

/// State of one drafting session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSession {
    id: SessionId,
    document: VisionDocument,
    transcript: Transcript,
    active_section: ActiveSection,
    last_updated_by_ai: Option<SectionKey>,
    progress: CrawlProgress,
    crawl: RequestSequencer,
    chat: RequestSequencer,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FormSession {
    /// Creates a session with a placeholder document and the welcome message.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            document: VisionDocument::placeholder(),
            transcript: Transcript::seeded(),
            active_section: ActiveSection::default(),
            last_updated_by_ai: None,
            progress: CrawlProgress::default(),
            crawl: RequestSequencer::new(RequestKind::Crawl),
            chat: RequestSequencer::new(RequestKind::Chat),
            created_at: now,
            updated_at: now,
        }
    }

    // ────────────────────────────────────────────────────────────────
    // Accessors
    // ────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn document(&self) -> &VisionDocument {
        &self.document
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn active_section(&self) -> SectionKey {
        self.active_section.key()
    }

    pub fn last_updated_by_ai(&self) -> Option<SectionKey> {
        self.last_updated_by_ai
    }

    pub fn progress(&self) -> CrawlProgress {
        self.progress
    }

    pub fn crawl_in_flight(&self) -> bool {
        self.crawl.in_flight()
    }

    pub fn chat_in_flight(&self) -> bool {
        self.chat.in_flight()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ────────────────────────────────────────────────────────────────
    // Crawl lifecycle
    // ────────────────────────────────────────────────────────────────

    /// Starts a crawl. Only one crawl may be outstanding at a time.
    pub fn begin_crawl(&mut self) -> Result<RequestTicket, SessionError> {
        if self.crawl.in_flight() {
            return Err(SessionError::CrawlInFlight);
        }
        self.progress.reset();
        self.touch();
        Ok(self.crawl.issue())
    }

    /// Advances simulated progress while `ticket`'s crawl is outstanding.
    pub fn tick_progress(&mut self, ticket: RequestTicket) {
        if self.crawl.in_flight() && self.crawl.is_current(ticket) {
            self.progress.tick();
        }
    }

    /// Applies a crawl result with the partial-merge policy.
    ///
    /// Returns the sections that were replaced.
    pub fn settle_crawl(
        &mut self,
        ticket: RequestTicket,
        sections: &SectionMap,
    ) -> Result<Vec<SectionKey>, SessionError> {
        if !self.crawl.settle(ticket) {
            return Err(SessionError::StaleResponse(RequestKind::Crawl));
        }
        self.progress.complete();
        let replaced = self.document.merge_missing(sections);
        self.transcript.push(ChatMessage::assistant(REFRESH_NOTICE));
        self.touch();
        Ok(replaced)
    }

    /// Ends a crawl that failed without a result.
    pub fn fail_crawl(&mut self, ticket: RequestTicket) {
        if self.crawl.settle(ticket) {
            self.progress.reset();
            self.touch();
        }
    }

    /// Clears the completed progress bar, unless a newer crawl has started.
    pub fn clear_progress(&mut self, ticket: RequestTicket) {
        if self.crawl.is_current(ticket) && !self.crawl.in_flight() {
            self.progress.reset();
        }
    }

    // ────────────────────────────────────────────────────────────────
    // Chat lifecycle
    // ────────────────────────────────────────────────────────────────

    /// Appends the user's message and starts a chat request.
    pub fn begin_chat(&mut self, message: &str) -> Result<RequestTicket, SessionError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        self.transcript.push(ChatMessage::user(message));
        self.touch();
        Ok(self.chat.issue())
    }

    /// Applies a settled chat turn.
    ///
    /// The reply is appended, the active section follows the classifier,
    /// and a reply that signals completion is committed to that section.
    pub fn settle_chat(
        &mut self,
        ticket: RequestTicket,
        turn: ChatTurn,
    ) -> Result<ChatOutcome, SessionError> {
        if !self.chat.settle(ticket) {
            return Err(SessionError::StaleResponse(RequestKind::Chat));
        }

        self.transcript.push(ChatMessage::assistant(turn.reply.clone()));
        self.active_section = self.active_section.route(turn.classification);

        let section = turn.classification.section();
        let committed = match section {
            Some(key) if signals_completion(&turn.reply) => {
                self.document.set(key, SectionValue::text(turn.reply.trim()));
                self.last_updated_by_ai = Some(key);
                true
            }
            _ => false,
        };

        self.touch();
        Ok(ChatOutcome { section, committed })
    }

    /// Ends a chat request that failed, leaving an apology in the transcript.
    pub fn fail_chat(&mut self, ticket: RequestTicket) {
        if self.chat.settle(ticket) {
            self.transcript.push(ChatMessage::assistant(CHAT_FAILURE_REPLY));
            self.touch();
        }
    }

    // ────────────────────────────────────────────────────────────────
    // Manual edits
    // ────────────────────────────────────────────────────────────────

    /// Replaces a section with text typed by the founder.
    pub fn edit_section(&mut self, key: SectionKey, raw: &str) {
        self.document.set(key, SectionValue::from_edit(raw));
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{ChatRole, WELCOME_MESSAGE};

    fn sections(pairs: &[(SectionKey, &str)]) -> SectionMap {
        pairs
            .iter()
            .map(|(k, v)| (*k, SectionValue::text(*v)))
            .collect()
    }

    #[test]
    fn new_session_is_placeholder_with_welcome() {
        let session = FormSession::new();
        assert_eq!(session.document(), &VisionDocument::placeholder());
        assert_eq!(session.transcript().messages()[0].content, WELCOME_MESSAGE);
        assert_eq!(session.active_section(), SectionKey::Vision);
        assert_eq!(session.last_updated_by_ai(), None);
        assert_eq!(session.progress().value(), 0);
    }

    #[test]
    fn crawl_merges_only_unset_sections_and_appends_notice() {
        let mut session = FormSession::new();
        session.edit_section(SectionKey::Vision, "Ours");

        let ticket = session.begin_crawl().unwrap();
        let replaced = session
            .settle_crawl(
                ticket,
                &sections(&[(SectionKey::Vision, "Theirs"), (SectionKey::Mission, "Build")]),
            )
            .unwrap();

        assert_eq!(replaced, vec![SectionKey::Mission]);
        assert_eq!(session.document().get(SectionKey::Vision), &SectionValue::text("Ours"));
        assert_eq!(session.transcript().last().unwrap().content, REFRESH_NOTICE);
        assert_eq!(session.transcript().len(), 2);
        assert!(session.progress().is_complete());
        assert!(!session.crawl_in_flight());
    }

    #[test]
    fn second_crawl_is_rejected_while_first_is_outstanding() {
        let mut session = FormSession::new();
        session.begin_crawl().unwrap();
        assert_eq!(session.begin_crawl(), Err(SessionError::CrawlInFlight));
    }

    #[test]
    fn progress_ticks_only_for_current_crawl() {
        let mut session = FormSession::new();
        let ticket = session.begin_crawl().unwrap();
        session.tick_progress(ticket);
        session.tick_progress(ticket);
        assert_eq!(session.progress().value(), 10);

        session.settle_crawl(ticket, &SectionMap::new()).unwrap();
        session.tick_progress(ticket);
        assert_eq!(session.progress().value(), 100);

        session.clear_progress(ticket);
        assert_eq!(session.progress().value(), 0);
    }

    #[test]
    fn failed_crawl_resets_progress_and_allows_retry() {
        let mut session = FormSession::new();
        let ticket = session.begin_crawl().unwrap();
        session.tick_progress(ticket);
        session.fail_crawl(ticket);

        assert_eq!(session.progress().value(), 0);
        assert!(session.begin_crawl().is_ok());
    }

    #[test]
    fn chat_turn_routes_and_commits_on_completion_phrase() {
        let mut session = FormSession::new();
        let ticket = session.begin_chat("Our culture should emphasize transparency").unwrap();
        let reply = "Sounds great, I think that's complete!";

        let outcome = session
            .settle_chat(
                ticket,
                ChatTurn {
                    classification: Classification::Section(SectionKey::Culture),
                    reply: reply.to_string(),
                },
            )
            .unwrap();

        assert_eq!(outcome.section, Some(SectionKey::Culture));
        assert!(outcome.committed);
        assert_eq!(session.active_section(), SectionKey::Culture);
        assert_eq!(session.document().get(SectionKey::Culture), &SectionValue::text(reply));
        assert_eq!(session.last_updated_by_ai(), Some(SectionKey::Culture));
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn ordinary_reply_does_not_commit() {
        let mut session = FormSession::new();
        let ticket = session.begin_chat("mission thoughts").unwrap();
        let outcome = session
            .settle_chat(
                ticket,
                ChatTurn {
                    classification: Classification::Section(SectionKey::Mission),
                    reply: "Who is your customer?".to_string(),
                },
            )
            .unwrap();

        assert!(!outcome.committed);
        assert_eq!(session.document().get(SectionKey::Mission), &SectionValue::placeholder());
        assert_eq!(session.active_section(), SectionKey::Mission);
    }

    #[test]
    fn unrecognized_turn_keeps_section_and_never_commits() {
        let mut session = FormSession::new();
        let ticket = session.begin_chat("hello?").unwrap();
        let outcome = session
            .settle_chat(
                ticket,
                ChatTurn {
                    classification: Classification::Unrecognized,
                    reply: "Excellent question, which section?".to_string(),
                },
            )
            .unwrap();

        assert_eq!(outcome.section, None);
        assert!(!outcome.committed);
        assert_eq!(session.active_section(), SectionKey::Vision);
    }

    #[test]
    fn stale_chat_reply_is_dropped() {
        let mut session = FormSession::new();
        let first = session.begin_chat("first").unwrap();
        let second = session.begin_chat("second").unwrap();

        let stale = session.settle_chat(
            first,
            ChatTurn {
                classification: Classification::Section(SectionKey::Values),
                reply: "Excellent".to_string(),
            },
        );
        assert_eq!(stale, Err(SessionError::StaleResponse(RequestKind::Chat)));
        assert_eq!(session.document().get(SectionKey::Values), &SectionValue::placeholder());

        assert!(session
            .settle_chat(
                second,
                ChatTurn {
                    classification: Classification::Section(SectionKey::Mission),
                    reply: "Tell me more".to_string(),
                },
            )
            .is_ok());
        assert_eq!(session.active_section(), SectionKey::Mission);
    }

    #[test]
    fn empty_chat_message_is_rejected() {
        let mut session = FormSession::new();
        assert_eq!(session.begin_chat("   "), Err(SessionError::EmptyMessage));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn failed_chat_appends_apology() {
        let mut session = FormSession::new();
        let ticket = session.begin_chat("vision").unwrap();
        session.fail_chat(ticket);

        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, CHAT_FAILURE_REPLY);
        assert!(!session.chat_in_flight());
    }

    #[test]
    fn transcript_only_grows() {
        let mut session = FormSession::new();
        let mut previous = session.transcript().len();

        let ticket = session.begin_crawl().unwrap();
        session.settle_crawl(ticket, &SectionMap::new()).unwrap();
        assert!(session.transcript().len() > previous);
        previous = session.transcript().len();

        let ticket = session.begin_chat("values").unwrap();
        assert!(session.transcript().len() > previous);
        previous = session.transcript().len();

        session.fail_chat(ticket);
        assert!(session.transcript().len() > previous);
    }

    #[test]
    fn edit_section_parses_lists() {
        let mut session = FormSession::new();
        session.edit_section(SectionKey::Values, r#"["Craft", "Candor"]"#);
        assert_eq!(
            session.document().get(SectionKey::Values).render_inline(),
            "Craft; Candor"
        );
    }
}
