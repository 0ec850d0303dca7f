pub mod credentials;
pub mod fetch;
pub mod filter;
pub mod grid;
pub mod models;
pub mod projector;
pub mod row_cache;
pub mod schema;
pub mod session;
pub mod sizing;
pub mod types;

pub use credentials::{CredentialField, Credentials};
pub use fetch::{
    FetchCompletion, FetchError, FetchOutcome, FetchRequest, FetchResult, FetchSequencer,
    FetchTicket,
};
pub use models::{DatasetRows, EventRecord, IssueRecord};
pub use projector::Projection;
pub use row_cache::{CachedRows, RowCache};
pub use session::{Session, SessionEffect, SessionEvent, ViewState};
pub use types::*;
