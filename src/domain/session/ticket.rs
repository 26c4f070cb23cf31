//! Request tickets for ordering overlapping requests.
//!
//! Every crawl or chat request takes a ticket when it starts. When it
//! settles, only the holder of the most recently issued ticket of that kind
//! may apply its result; older completions are stale and get dropped.

use serde::{Deserialize, Serialize};

/// Kind of request a ticket was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Crawl,
    Chat,
}

/// Proof that a request was started, with its position in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    kind: RequestKind,
    seq: u64,
}

impl RequestTicket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues tickets for one request kind and tracks whether one is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSequencer {
    kind: RequestKind,
    latest: u64,
    in_flight: bool,
}

impl RequestSequencer {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            latest: 0,
            in_flight: false,
        }
    }

    /// Issues the next ticket and marks a request in flight.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        self.in_flight = true;
        RequestTicket {
            kind: self.kind,
            seq: self.latest,
        }
    }

    /// Returns true if `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.kind == self.kind && ticket.seq == self.latest
    }

    /// Settles `ticket`. Returns false (and changes nothing) if it is stale.
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}
