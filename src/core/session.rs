//! Owned state of one viewing session and its single update entry point.

use crate::core::credentials::{CredentialField, Credentials};
use crate::core::fetch::{FetchCompletion, FetchError, FetchOutcome, FetchRequest, FetchSequencer};
use crate::core::projector::{Projection, project};
use crate::core::row_cache::RowCache;
use crate::core::sizing::{INITIAL_HEIGHT_PX, compute_height};
use crate::core::types::DatasetKind;

/// What is shown: the active kind, cached rows and the table height
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    active_kind: DatasetKind,
    cache: RowCache,
    display_height_px: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_kind: DatasetKind::default(),
            cache: RowCache::default(),
            display_height_px: INITIAL_HEIGHT_PX,
        }
    }
}

impl ViewState {
    pub fn active_kind(&self) -> DatasetKind {
        self.active_kind
    }

    pub fn cache(&self) -> &RowCache {
        &self.cache
    }

    /// Height from the most recent successful fetch of either kind.
    /// Switching the active kind does not recompute it.
    pub fn display_height_px(&self) -> u32 {
        self.display_height_px
    }
}

/// Events the session reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    EditCredential(CredentialField, String),
    SetActive(DatasetKind),
    RequestFetch,
    FetchCompleted(FetchCompletion),
}

/// Side effect requested by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    None,
    /// Perform this fetch and feed the completion back
    Fetch(FetchRequest),
    /// A completion was processed
    Completed(FetchOutcome),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    credentials: Credentials,
    view: ViewState,
    sequencer: FetchSequencer,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(kind: DatasetKind) -> Self {
        let mut session = Self::new();
        session.set_active(kind);
        session
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn in_flight(&self, kind: DatasetKind) -> bool {
        self.sequencer.in_flight(kind)
    }

    /// Apply one event
    pub fn update(&mut self, event: SessionEvent) -> SessionEffect {
        match event {
            SessionEvent::EditCredential(field, value) => {
                self.credentials.set(field, value);
                SessionEffect::None
            }
            SessionEvent::SetActive(kind) => {
                self.set_active(kind);
                SessionEffect::None
            }
            SessionEvent::RequestFetch => SessionEffect::Fetch(self.request_fetch()),
            SessionEvent::FetchCompleted(completion) => {
                SessionEffect::Completed(self.complete_fetch(completion))
            }
        }
    }

    /// Change the displayed kind. No fetch, no cache or height change.
    pub fn set_active(&mut self, kind: DatasetKind) {
        self.view.active_kind = kind;
    }

    /// Issue a fetch for the active kind with a snapshot of the credentials
    pub fn request_fetch(&mut self) -> FetchRequest {
        let ticket = self.sequencer.issue(self.view.active_kind);
        FetchRequest {
            ticket,
            credentials: self.credentials.clone(),
        }
    }

    /// Fold a completion into the view.
    ///
    /// Only the latest ticket per kind is applied. Failures leave the cache
    /// and height as they were.
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> FetchOutcome {
        let FetchCompletion { ticket, result } = completion;
        if !self.sequencer.accept(ticket) {
            return FetchOutcome::Stale { ticket };
        }
        match result {
            Ok(rows) if rows.kind() == ticket.kind => {
                let count = rows.len();
                self.view.cache.update(rows);
                self.view.display_height_px = compute_height(count);
                FetchOutcome::Applied {
                    kind: ticket.kind,
                    rows: count,
                }
            }
            Ok(rows) => FetchOutcome::Failed {
                kind: ticket.kind,
                error: FetchError::Decode(format!(
                    "expected {} rows, received {}",
                    ticket.kind,
                    rows.kind()
                )),
            },
            Err(error) => FetchOutcome::Failed {
                kind: ticket.kind,
                error,
            },
        }
    }

    /// Rows and schema for the active kind
    pub fn project(&self) -> Projection {
        project(self.view.active_kind, &self.view.cache)
    }
}
