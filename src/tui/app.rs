use crate::core::fetch::{FetchCompletion, FetchOutcome, FetchRequest};
use crate::core::session::{Session, SessionEffect, SessionEvent};
use crate::core::sizing::rows_for_height;
use crate::core::types::DatasetKind;
use crate::tui::components::record_table::TABLE_CHROME_ROWS;
use crate::tui::components::{CredentialsForm, DatasetBar, FilterPrompt, InputOutcome, RecordTable};
use crate::tui::{Action, Component, Focusable, KeyBindings, Theme};
use color_eyre::{Result, eyre::eyre};
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Which panel receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Table,
}

/// Actions advertised in the footer
const FOOTER_ACTIONS: [Action; 9] = [
    Action::FetchData,
    Action::ShowIssues,
    Action::ShowEvents,
    Action::NextFocus,
    Action::Sort,
    Action::Filter,
    Action::ClearFilters,
    Action::CopyCell,
    Action::Quit,
];

/// Application state
///
/// Owns the session and the panels, routes keys, and hands fetch requests
/// to the runtime through `fetch_tx`. Completions come back through
/// [`App::complete_fetch`].
pub struct App {
    session: Session,
    form: CredentialsForm,
    table: RecordTable,
    filter_prompt: Option<FilterPrompt>,
    focus: Focus,
    keybindings: KeyBindings,
    theme: Theme,
    fetch_tx: UnboundedSender<FetchRequest>,
    should_quit: bool,
}

impl App {
    pub fn new(
        session: Session,
        keybindings: KeyBindings,
        theme: Theme,
        fetch_tx: UnboundedSender<FetchRequest>,
    ) -> Self {
        let form = CredentialsForm::new(session.credentials());
        let table = RecordTable::new(session.project());
        let mut app = Self {
            session,
            form,
            table,
            filter_prompt: None,
            focus: Focus::Form,
            keybindings,
            theme,
            fetch_tx,
            should_quit: false,
        };
        app.set_focus(Focus::Form);
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn filter_prompt(&self) -> Option<&FilterPrompt> {
        self.filter_prompt.as_ref()
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle a key event
    ///
    /// A focused text field gets first pick of the key; anything it does not
    /// edit is translated through the keybindings.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, ignore release/repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if let Some(prompt) = &mut self.filter_prompt {
            if prompt.handle_key(&key) != InputOutcome::Ignored {
                return Ok(());
            }
        } else if self.focus == Focus::Form {
            match self.form.handle_key(&key) {
                InputOutcome::Changed => {
                    let field = self.form.active_field();
                    let value = self.form.value(field).to_string();
                    return self.apply(SessionEvent::EditCredential(field, value));
                }
                InputOutcome::Moved => return Ok(()),
                InputOutcome::Ignored => {}
            }
        }

        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }
        Ok(())
    }

    /// Handle an action
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        // Global actions work regardless of focus
        match action {
            Action::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            Action::FetchData => return self.apply(SessionEvent::RequestFetch),
            Action::ShowIssues => return self.set_active(DatasetKind::Issues),
            Action::ShowEvents => return self.set_active(DatasetKind::Events),
            _ => {}
        }

        if self.filter_prompt.is_some() {
            match action {
                Action::Confirm => self.apply_filter(),
                Action::Cancel => self.filter_prompt = None,
                _ => {}
            }
            return Ok(());
        }

        match (action, self.focus) {
            (Action::NextFocus | Action::PrevFocus, Focus::Form) => self.set_focus(Focus::Table),
            (Action::NextFocus | Action::PrevFocus, Focus::Table) => self.set_focus(Focus::Form),
            (Action::Confirm, Focus::Form) => self.apply(SessionEvent::RequestFetch)?,
            (Action::Cancel, Focus::Form) => self.set_focus(Focus::Table),
            (Action::Filter, Focus::Table) => self.open_filter_prompt(),
            (action, Focus::Form) => {
                self.form.handle_action(action)?;
            }
            (action, Focus::Table) => {
                self.table.handle_action(action)?;
            }
        }
        Ok(())
    }

    /// Fold a finished fetch into the session and refresh the grid
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> Result<()> {
        self.apply(SessionEvent::FetchCompleted(completion))
    }

    /// Feed an event to the session and carry out its effect
    fn apply(&mut self, event: SessionEvent) -> Result<()> {
        match self.session.update(event) {
            SessionEffect::None => {}
            SessionEffect::Fetch(request) => {
                debug!(kind = %request.ticket.kind, seq = request.ticket.seq, "queueing fetch");
                self.fetch_tx
                    .send(request)
                    .map_err(|_| eyre!("fetch channel closed"))?;
            }
            SessionEffect::Completed(outcome) => self.on_outcome(outcome),
        }
        Ok(())
    }

    fn on_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Applied { kind, rows } => {
                debug!(%kind, rows, "rows replaced");
                self.table.reset_grid(kind);
                self.table.set_projection(self.session.project());
            }
            // The fetch client already logged the failure
            FetchOutcome::Failed { kind, error } => {
                debug!(%kind, %error, "keeping cached rows");
            }
            FetchOutcome::Stale { ticket } => {
                debug!(kind = %ticket.kind, seq = ticket.seq, "discarding stale completion");
            }
        }
    }

    fn set_active(&mut self, kind: DatasetKind) -> Result<()> {
        self.filter_prompt = None;
        self.apply(SessionEvent::SetActive(kind))?;
        self.table.set_projection(self.session.project());
        Ok(())
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.form.set_focused(focus == Focus::Form);
        self.table.set_focused(focus == Focus::Table);
    }

    fn open_filter_prompt(&mut self) {
        let (column, def) = self.table.current_column();
        let current = self.table.grid().filter(column);
        self.filter_prompt = Some(FilterPrompt::new(column, def, current));
    }

    fn apply_filter(&mut self) {
        if let Some(prompt) = &mut self.filter_prompt {
            match prompt.submit() {
                Ok(filter) => {
                    let column = prompt.column();
                    self.table.set_filter(column, filter);
                    self.filter_prompt = None;
                }
                Err(e) => debug!("rejected filter input: {e}"),
            }
        }
    }

    fn key_hint(&self, action: Action) -> String {
        self.keybindings
            .get_keys_for_action(action)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Render the app
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let form_height = CredentialsForm::height();

        // Title, form, dataset bar and footer are fixed; the table gets the
        // height derived from the last fetch, clipped to what is left.
        let available = area.height.saturating_sub(form_height + 3);
        let body = rows_for_height(self.session.view().display_height_px());
        let table_height = body.saturating_add(TABLE_CHROME_ROWS).min(available);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(form_height),
                Constraint::Length(1),
                Constraint::Length(table_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled(" Data Fetcher ", self.theme.header_style()),
            Span::styled(
                concat!("v", env!("CARGO_PKG_VERSION")),
                self.theme.muted_style(),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        self.form.render(frame, chunks[1], &self.theme);

        let in_flight = [
            self.session.in_flight(DatasetKind::Issues),
            self.session.in_flight(DatasetKind::Events),
        ];
        let bar = DatasetBar::new(self.session.view(), in_flight, &self.theme).keys(
            self.key_hint(Action::ShowIssues),
            self.key_hint(Action::ShowEvents),
        );
        frame.render_widget(bar, chunks[2]);

        self.table.render(frame, chunks[3], &self.theme);

        let hints: Vec<Span> = FOOTER_ACTIONS
            .iter()
            .flat_map(|action| {
                [
                    Span::styled(
                        format!(" {} ", self.key_hint(*action)),
                        self.theme.header_style(),
                    ),
                    Span::styled(format!("{} ", action.label()), self.theme.muted_style()),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(hints)), chunks[5]);

        // Filter prompt overlays everything
        if let Some(prompt) = &self.filter_prompt {
            prompt.render(frame, area, &self.theme);
        }
    }
}
