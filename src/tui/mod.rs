pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod keybindings;
pub mod runner;
pub mod terminal;
pub mod theme;

pub use action::Action;
pub use app::{App, Focus};
pub use component::{Component, Focusable};
pub use components::{CredentialsForm, DatasetBar, FilterPrompt, RecordTable};
pub use keybindings::{KeyBinding, KeyBindings, KeyPattern};
pub use theme::Theme;
