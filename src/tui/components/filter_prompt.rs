use crate::core::filter::{ColumnFilter, FilterParseError};
use crate::core::schema::ColumnDef;
use crate::tui::components::text_input::{InputOutcome, TextInput};
use crate::tui::Theme;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Popup asking for a filter on one column
#[derive(Debug, Clone)]
pub struct FilterPrompt {
    column: usize,
    def: &'static ColumnDef,
    input: TextInput,
    error: Option<String>,
}

impl FilterPrompt {
    /// Open for a column, prefilled with its current filter
    pub fn new(column: usize, def: &'static ColumnDef, current: Option<&ColumnFilter>) -> Self {
        Self {
            column,
            def,
            input: TextInput::with_value(current.map(ColumnFilter::as_input).unwrap_or_default()),
            error: None,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn input(&self) -> &str {
        self.input.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        let outcome = self.input.handle_key(key);
        if outcome == InputOutcome::Changed {
            self.error = None;
        }
        outcome
    }

    /// Parse the input; `Ok(None)` clears the column filter.
    /// On error the message is kept for display.
    pub fn submit(&mut self) -> Result<Option<ColumnFilter>, FilterParseError> {
        ColumnFilter::parse(self.def.filter, self.input.value()).inspect_err(|e| {
            self.error = Some(e.to_string());
        })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(60, 6, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Filter: {}", self.def.header))
            .border_style(theme.focused_border_style());
        let inner = block.inner(popup);

        let status = match &self.error {
            Some(message) => Line::from(Span::styled(message.clone(), theme.error_style())),
            None => Line::from(Span::styled(
                "Enter apply, empty clears, Esc cancel",
                theme.muted_style(),
            )),
        };
        let lines = vec![
            Line::from(Span::styled(self.def.filter.hint(), theme.muted_style())),
            Line::from(Span::styled(self.input.display(), theme.normal_style())),
            Line::default(),
            status,
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);

        let offset = u16::try_from(self.input.cursor()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset);
        if x < inner.right() && inner.height > 1 {
            frame.set_cursor_position(Position::new(x, inner.y + 1));
        }
    }
}

/// Rectangle of `percent_w` width and fixed height centered in `area`
fn centered_rect(percent_w: u16, height: u16, area: Rect) -> Rect {
    let width = u32::from(area.width) * u32::from(percent_w.min(100)) / 100;
    let width = u16::try_from(width).unwrap_or(u16::MAX);
    let height = height.min(area.height);
    let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
    let y = area.y.saturating_add(area.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}
