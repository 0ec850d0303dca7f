#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod services;
pub mod tui;

// Re-export commonly used types
pub use core::{
    CredentialField, Credentials, DatasetKind, DatasetRows, FetchError, FetchOutcome, Session,
    SessionEffect, SessionEvent, ViewState,
};
pub use services::FetchClient;
pub use tui::{Action, App};
