use crate::core::session::ViewState;
use crate::core::types::DatasetKind;
use crate::tui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use strum::IntoEnumIterator;

/// Toggle buttons for the two datasets plus a one-line load status
///
/// Failures are not reported here; they only reach the log.
pub struct DatasetBar<'a> {
    view: &'a ViewState,
    in_flight: [bool; 2],
    keys: [String; 2],
    theme: &'a Theme,
}

impl<'a> DatasetBar<'a> {
    pub fn new(view: &'a ViewState, in_flight: [bool; 2], theme: &'a Theme) -> Self {
        Self {
            view,
            in_flight,
            keys: [String::new(), String::new()],
            theme,
        }
    }

    /// Key hints shown in front of each toggle
    pub fn keys(mut self, issues: impl Into<String>, events: impl Into<String>) -> Self {
        self.keys = [issues.into(), events.into()];
        self
    }
}

/// Per-kind load state and the current table height
pub fn status_text(view: &ViewState, in_flight: [bool; 2]) -> String {
    let parts: Vec<String> = DatasetKind::iter()
        .map(|kind| {
            let state = if in_flight[kind.index()] {
                "fetching...".to_string()
            } else {
                format!("{} rows", view.cache().get(kind).len())
            };
            format!("{}: {state}", kind.title())
        })
        .collect();
    format!("{}  height: {}px", parts.join("  "), view.display_height_px())
}

impl Widget for DatasetBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for kind in DatasetKind::iter() {
            let key = &self.keys[kind.index()];
            let label = if key.is_empty() {
                format!(" Show {} ", kind.title())
            } else {
                format!(" [{key}] Show {} ", kind.title())
            };
            let style = if kind == self.view.active_kind() {
                self.theme.selected_style()
            } else {
                self.theme.muted_style()
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            status_text(self.view, self.in_flight),
            self.theme.info_style(),
        ));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
