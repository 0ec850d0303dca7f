use crate::core::credentials::Credentials;
use crate::core::models::DatasetRows;
use crate::core::types::DatasetKind;
use thiserror::Error;

/// Why a fetch produced no rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network unreachable, connection reset, timeout
    #[error("transport error: {0}")]
    Transport(String),
    /// Backend answered with a non-success status
    #[error("backend responded with status {status}")]
    Response { status: u16 },
    /// Body does not match the schema for the requested kind
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Outcome of one fetch invocation
pub type FetchResult = Result<DatasetRows, FetchError>;

/// Identifies one issued fetch. Sequence numbers grow monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub kind: DatasetKind,
    pub seq: u64,
}

/// Everything a worker needs to perform a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub credentials: Credentials,
}

/// Result of a fetch, tagged with the ticket it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: FetchResult,
}

/// What applying a completion did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Cache and height were replaced
    Applied { kind: DatasetKind, rows: usize },
    /// Latest fetch failed; state left unchanged
    Failed { kind: DatasetKind, error: FetchError },
    /// A newer fetch of the same kind was issued; completion ignored
    Stale { ticket: FetchTicket },
}

/// Issues tickets and decides which completions are current.
///
/// Per kind, only the most recently issued ticket may update the session.
#[derive(Debug, Clone, Default)]
pub struct FetchSequencer {
    next_seq: u64,
    pending: [Option<u64>; 2],
}

impl FetchSequencer {
    pub fn issue(&mut self, kind: DatasetKind) -> FetchTicket {
        self.next_seq += 1;
        self.pending[kind.index()] = Some(self.next_seq);
        FetchTicket {
            kind,
            seq: self.next_seq,
        }
    }

    /// Accept a completion if its ticket is the latest for its kind.
    /// An accepted ticket is no longer pending.
    pub fn accept(&mut self, ticket: FetchTicket) -> bool {
        let slot = &mut self.pending[ticket.kind.index()];
        if *slot == Some(ticket.seq) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self, kind: DatasetKind) -> bool {
        self.pending[kind.index()].is_some()
    }
}
