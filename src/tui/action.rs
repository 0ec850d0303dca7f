use serde::{Deserialize, Serialize};

/// All possible actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    Home,
    End,
    GoToTop,
    GoToBottom,

    // Grid
    Sort,
    Filter,
    ClearFilters,
    CopyCell,
    WidenColumn,
    NarrowColumn,

    // Dataset
    FetchData,
    ShowIssues,
    ShowEvents,

    // Focus
    NextFocus,
    PrevFocus,

    // Application
    Quit,
    Confirm,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move cursor up",
            Action::MoveDown => "Move cursor down",
            Action::MoveLeft => "Move cursor left",
            Action::MoveRight => "Move cursor right",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::Home => "Go to first column",
            Action::End => "Go to last column",
            Action::GoToTop => "Go to first row",
            Action::GoToBottom => "Go to last row",
            Action::Sort => "Cycle sort on column",
            Action::Filter => "Filter column",
            Action::ClearFilters => "Clear all filters",
            Action::CopyCell => "Copy cell to clipboard",
            Action::WidenColumn => "Widen column",
            Action::NarrowColumn => "Narrow column",
            Action::FetchData => "Fetch data",
            Action::ShowIssues => "Show issues",
            Action::ShowEvents => "Show events",
            Action::NextFocus => "Focus next panel",
            Action::PrevFocus => "Focus previous panel",
            Action::Quit => "Quit application",
            Action::Confirm => "Confirm action",
            Action::Cancel => "Cancel action",
        }
    }

    /// Short label for the footer
    pub fn label(&self) -> &'static str {
        match self {
            Action::FetchData => "Fetch",
            Action::ShowIssues => "Issues",
            Action::ShowEvents => "Events",
            Action::Sort => "Sort",
            Action::Filter => "Filter",
            Action::ClearFilters => "Clear",
            Action::CopyCell => "Copy",
            Action::NextFocus => "Focus",
            Action::Quit => "Quit",
            other => other.description(),
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::PageUp,
            Action::PageDown,
            Action::Home,
            Action::End,
            Action::GoToTop,
            Action::GoToBottom,
            Action::Sort,
            Action::Filter,
            Action::ClearFilters,
            Action::CopyCell,
            Action::WidenColumn,
            Action::NarrowColumn,
            Action::FetchData,
            Action::ShowIssues,
            Action::ShowEvents,
            Action::NextFocus,
            Action::PrevFocus,
            Action::Quit,
            Action::Confirm,
            Action::Cancel,
        ]
    }
}
