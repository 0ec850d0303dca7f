use crate::core::credentials::{CredentialField, Credentials};
use crate::tui::components::text_input::{InputOutcome, TextInput};
use crate::tui::{Action, Component, Focusable, Theme};
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Username, password and base URL inputs
///
/// The form only edits text; every change is reported back so the session
/// credentials stay the single source of truth for requests.
pub struct CredentialsForm {
    inputs: [TextInput; 3],
    active: CredentialField,
    focused: bool,
    supported_actions: Vec<Action>,
}

fn slot(field: CredentialField) -> usize {
    match field {
        CredentialField::Username => 0,
        CredentialField::Password => 1,
        CredentialField::BaseUrl => 2,
    }
}

impl CredentialsForm {
    pub fn new(credentials: &Credentials) -> Self {
        let mut password = TextInput::masked();
        password.set_value(credentials.password());
        Self {
            inputs: [
                TextInput::with_value(credentials.username()),
                password,
                TextInput::with_value(credentials.base_url()),
            ],
            active: CredentialField::Username,
            focused: false,
            supported_actions: vec![Action::MoveUp, Action::MoveDown],
        }
    }

    pub fn active_field(&self) -> CredentialField {
        self.active
    }

    pub fn value(&self, field: CredentialField) -> &str {
        self.inputs[slot(field)].value()
    }

    /// Route an editing key to the active input
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        self.inputs[slot(self.active)].handle_key(key)
    }

    fn step(&mut self, forward: bool) {
        let index = slot(self.active);
        let next = if forward {
            (index + 1) % CredentialField::ALL.len()
        } else {
            (index + CredentialField::ALL.len() - 1) % CredentialField::ALL.len()
        };
        self.active = CredentialField::ALL[next];
    }

    /// Rows needed to draw the form including borders
    pub fn height() -> u16 {
        CredentialField::ALL.len() as u16 + 2
    }
}

impl Component for CredentialsForm {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => {
                self.step(false);
                Ok(true)
            }
            Action::MoveDown => {
                self.step(true);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let label_width = CredentialField::ALL
            .iter()
            .map(|f| f.label().len())
            .max()
            .unwrap_or(0)
            + 2;

        let lines: Vec<Line> = CredentialField::ALL
            .iter()
            .map(|field| {
                let label = format!("{:<label_width$}", format!("{}:", field.label()));
                let label_style = if self.focused && *field == self.active {
                    theme.header_style()
                } else {
                    theme.muted_style()
                };
                Line::from(vec![
                    Span::styled(label, label_style),
                    Span::styled(self.inputs[slot(*field)].display(), theme.normal_style()),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Credentials")
            .border_style(theme.border_for(self.focused));
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if self.focused {
            let input = &self.inputs[slot(self.active)];
            let offset = u16::try_from(label_width + input.cursor()).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(offset);
            let y = inner.y.saturating_add(slot(self.active) as u16);
            if x < inner.right() && y < inner.bottom() {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "CredentialsForm"
    }
}

impl Focusable for CredentialsForm {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
