use crate::core::filter::ColumnFilter;
use crate::core::grid::GridState;
use crate::core::projector::Projection;
use crate::core::schema::{ColumnDef, columns_for};
use crate::core::types::DatasetKind;
use crate::tui::{Action, Component, Focusable, Theme};
use arboard::Clipboard;
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
};
use strum::IntoEnumIterator;
use tracing::{debug, error};

/// Rows above the body: top border and header. Plus the bottom border.
pub const TABLE_CHROME_ROWS: u16 = 3;

/// Bounds for a resized column, in cells
pub const MIN_COLUMN_WIDTH: u16 = 3;
pub const MAX_COLUMN_WIDTH: u16 = 120;

/// Cells added or removed per resize step
const RESIZE_STEP: i32 = 2;

/// Position in the table (row within the visible rows, column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// Viewport into the visible rows
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    pub top: usize,    // First visible row
    pub left: usize,   // First visible column
    pub height: usize, // Body rows
    pub width: usize,  // Inner width in cells
}

/// Grid over the projected rows of the active dataset
///
/// Sort and filter state lives per dataset kind, so toggling between
/// issues and events keeps each grid as the user left it. Column widths
/// start from the schema and are also kept per kind; a fetch does not
/// reset them.
pub struct RecordTable {
    projection: Projection,
    grids: [GridState; 2],
    widths: [Vec<u16>; 2],
    visible: Vec<usize>,
    cursor: Position,
    viewport: Viewport,
    focused: bool,
    supported_actions: Vec<Action>,
}

impl RecordTable {
    pub fn new(projection: Projection) -> Self {
        let mut table = Self {
            projection,
            grids: Default::default(),
            widths: default_widths(),
            visible: Vec::new(),
            cursor: Position::default(),
            viewport: Viewport {
                top: 0,
                left: 0,
                height: 20, // Updated on render
                width: 80,
            },
            focused: false,
            supported_actions: vec![
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
                Action::ClearFilters,
                Action::CopyCell,
                Action::WidenColumn,
                Action::NarrowColumn,
            ],
        };
        table.refresh();
        table
    }

    pub fn kind(&self) -> DatasetKind {
        self.projection.kind
    }

    /// Show a new projection, keeping the grid state of its kind
    pub fn set_projection(&mut self, projection: Projection) {
        if projection.kind != self.projection.kind {
            self.cursor = Position::default();
            self.viewport.top = 0;
            self.viewport.left = 0;
        }
        self.projection = projection;
        self.refresh();
    }

    /// Drop sort and filters for a kind whose rows were replaced
    pub fn reset_grid(&mut self, kind: DatasetKind) {
        self.grids[kind.index()].reset();
        if kind == self.kind() {
            self.cursor.row = 0;
            self.viewport.top = 0;
            self.refresh();
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grids[self.kind().index()]
    }

    fn grid_mut(&mut self) -> &mut GridState {
        let index = self.kind().index();
        &mut self.grids[index]
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Row indices into the projection, in display order
    pub fn visible_rows(&self) -> &[usize] {
        &self.visible
    }

    pub fn total_rows(&self) -> usize {
        self.projection.rows.len()
    }

    pub fn current_column(&self) -> (usize, &'static ColumnDef) {
        let columns = self.projection.columns;
        let col = self.cursor.col.min(columns.len().saturating_sub(1));
        (col, &columns[col])
    }

    pub fn set_filter(&mut self, column: usize, filter: Option<ColumnFilter>) {
        self.grid_mut().set_filter(column, filter);
        self.cursor.row = 0;
        self.viewport.top = 0;
        self.refresh();
    }

    /// Current display width of a column of the active kind
    pub fn column_width(&self, column: usize) -> u16 {
        self.widths[self.kind().index()]
            .get(column)
            .copied()
            .unwrap_or(MIN_COLUMN_WIDTH)
    }

    /// Text of the cell under the cursor, as displayed
    pub fn current_cell_text(&self) -> Option<String> {
        let &index = self.visible.get(self.cursor.row)?;
        self.projection.rows[index]
            .get(self.cursor.col)
            .map(ToString::to_string)
    }

    fn resize_column(&mut self, delta: i32) {
        let (col, _) = self.current_column();
        let index = self.kind().index();
        if let Some(width) = self.widths[index].get_mut(col) {
            let resized = (i32::from(*width) + delta)
                .clamp(i32::from(MIN_COLUMN_WIDTH), i32::from(MAX_COLUMN_WIDTH));
            *width = u16::try_from(resized).unwrap_or(MAX_COLUMN_WIDTH);
        }
        self.ensure_cursor_visible();
    }

    fn copy_current_cell(&self) {
        let Some(text) = self.current_cell_text() else {
            debug!("nothing to copy, table is empty");
            return;
        };
        if let Err(e) = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            error!("Failed to copy to clipboard: {e}");
        }
    }

    fn clear_filters(&mut self) {
        self.grid_mut().clear_filters();
        self.refresh();
    }

    fn cycle_sort(&mut self) {
        let (col, _) = self.current_column();
        self.grid_mut().cycle_sort(col);
        self.refresh();
    }

    /// Recompute visible rows and clamp the cursor
    fn refresh(&mut self) {
        self.visible = self.grid().visible_rows(&self.projection.rows);
        self.cursor.row = self.cursor.row.min(self.visible.len().saturating_sub(1));
        self.cursor.col = self
            .cursor
            .col
            .min(self.projection.columns.len().saturating_sub(1));
        self.ensure_cursor_visible();
    }

    /// Update viewport based on terminal area
    fn update_viewport(&mut self, area: Rect) {
        self.viewport.height = area.height.saturating_sub(TABLE_CHROME_ROWS) as usize;
        self.viewport.width = area.width.saturating_sub(2) as usize; // -2 for borders
        self.ensure_cursor_visible();
    }

    /// Ensure cursor is within viewport
    fn ensure_cursor_visible(&mut self) {
        let height = self.viewport.height.max(1);
        if self.cursor.row < self.viewport.top {
            self.viewport.top = self.cursor.row;
        } else if self.cursor.row >= self.viewport.top + height {
            self.viewport.top = self.cursor.row + 1 - height;
        }

        if self.cursor.col < self.viewport.left {
            self.viewport.left = self.cursor.col;
        }
        while self.cursor.col >= self.viewport.left + self.columns_fitting(self.viewport.left) {
            self.viewport.left += 1;
        }
    }

    /// How many columns starting at `left` fit in the viewport width (at least one)
    fn columns_fitting(&self, left: usize) -> usize {
        let mut used = 0usize;
        let mut count = 0usize;
        for col in left..self.projection.columns.len() {
            used += usize::from(self.column_width(col)) + 1;
            if count > 0 && used > self.viewport.width + 1 {
                break;
            }
            count += 1;
        }
        count.max(1)
    }

    fn move_rows(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        self.cursor.row = self.cursor.row.saturating_add_signed(delta).min(last);
        self.ensure_cursor_visible();
    }

    fn move_cols(&mut self, delta: isize) {
        let last = self.projection.columns.len().saturating_sub(1);
        self.cursor.col = self.cursor.col.saturating_add_signed(delta).min(last);
        self.ensure_cursor_visible();
    }

    fn title(&self) -> String {
        let mut title = format!(
            "{} [{}/{}",
            self.kind().title(),
            if self.visible.is_empty() { 0 } else { self.cursor.row + 1 },
            self.visible.len()
        );
        if self.visible.len() != self.total_rows() {
            title.push_str(&format!(" of {}", self.total_rows()));
        }
        title.push(']');
        if let Some(sort) = self.grid().sort() {
            let header = self.projection.columns[sort.column].header;
            title.push_str(&format!(" sort: {header} {sort}"));
        }
        title
    }
}

impl Component for RecordTable {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        let page = self.viewport.height.max(1) as isize;
        match action {
            Action::MoveUp => self.move_rows(-1),
            Action::MoveDown => self.move_rows(1),
            Action::MoveLeft => self.move_cols(-1),
            Action::MoveRight => self.move_cols(1),
            Action::PageUp => self.move_rows(-page),
            Action::PageDown => self.move_rows(page),
            Action::GoToTop => self.move_rows(isize::MIN),
            Action::GoToBottom => self.move_rows(isize::MAX),
            Action::Home => self.move_cols(isize::MIN),
            Action::End => self.move_cols(isize::MAX),
            Action::Sort => self.cycle_sort(),
            Action::ClearFilters => self.clear_filters(),
            Action::CopyCell => self.copy_current_cell(),
            Action::WidenColumn => self.resize_column(RESIZE_STEP),
            Action::NarrowColumn => self.resize_column(-RESIZE_STEP),
            // Other actions not handled
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.update_viewport(area);

        let grid = self.grid();
        let sort = grid.sort();
        let left = self.viewport.left;
        let shown = self.columns_fitting(left);
        let end = (left + shown).min(self.projection.columns.len());
        let columns = &self.projection.columns[left..end];

        let header_cells: Vec<Cell> = columns
            .iter()
            .enumerate()
            .map(|(offset, def)| {
                let col = left + offset;
                let mut text = def.header.to_string();
                if let Some(s) = sort.filter(|s| s.column == col) {
                    text.push_str(&format!(" {s}"));
                }
                if grid.filter(col).is_some() {
                    text.push('*');
                }
                Cell::from(text)
            })
            .collect();
        let header = Row::new(header_cells).style(theme.header_style());

        let rows: Vec<Row> = self
            .visible
            .iter()
            .enumerate()
            .skip(self.viewport.top)
            .take(self.viewport.height)
            .map(|(position, &index)| {
                let record = &self.projection.rows[index];
                let selected = position == self.cursor.row;
                let cells: Vec<Cell> = (left..left + columns.len())
                    .map(|col| {
                        let text = record.get(col).map(ToString::to_string).unwrap_or_default();
                        let cell = Cell::from(text);
                        if selected && self.focused && col == self.cursor.col {
                            cell.style(theme.selected_cell_style())
                        } else {
                            cell
                        }
                    })
                    .collect();

                let row_style = if selected {
                    theme.selected_style()
                } else if position % 2 == 1 {
                    theme.alt_row_style()
                } else {
                    theme.normal_style()
                };
                Row::new(cells).style(row_style)
            })
            .collect();

        let widths: Vec<Constraint> = (left..left + columns.len())
            .map(|col| Constraint::Length(self.column_width(col)))
            .collect();
        let table = Table::new(rows, widths).header(header).column_spacing(1).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.title())
                .border_style(theme.border_for(self.focused)),
        );

        frame.render_widget(table, area);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "RecordTable"
    }
}

fn default_widths() -> [Vec<u16>; 2] {
    let mut widths: [Vec<u16>; 2] = Default::default();
    for kind in DatasetKind::iter() {
        widths[kind.index()] = columns_for(kind).iter().map(|def| def.width).collect();
    }
    widths
}

impl Focusable for RecordTable {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{DatasetRows, IssueRecord};
    use crate::core::projector::project;
    use crate::core::row_cache::RowCache;
    use crate::core::schema::{CellValue, EVENT_COLUMNS, FilterKind, ISSUE_COLUMNS};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn issue(id: i64, name: &str, status: &str) -> IssueRecord {
        IssueRecord {
            id,
            issue_id: format!("AW-{id}"),
            name: name.to_string(),
            device_id: format!("switch-{id}"),
            last_occurrence_time: None,
            status: status.to_string(),
        }
    }

    fn cache() -> RowCache {
        let mut cache = RowCache::new();
        cache.update(DatasetRows::Issues(vec![
            issue(3, "Fan failure", "active"),
            issue(1, "Interface down", "resolved"),
            issue(2, "High CPU", "active"),
        ]));
        cache
    }

    fn table() -> RecordTable {
        RecordTable::new(project(DatasetKind::Issues, &cache()))
    }

    fn ids(table: &RecordTable) -> Vec<i64> {
        table
            .visible_rows()
            .iter()
            .map(|&i| match table.projection.rows[i][0] {
                CellValue::Integer(id) => id,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn test_cursor_movement() {
        let mut table = table();
        assert_eq!(table.cursor(), Position { row: 0, col: 0 });

        table.handle_action(Action::MoveDown).unwrap();
        table.handle_action(Action::MoveRight).unwrap();
        assert_eq!(table.cursor(), Position { row: 1, col: 1 });

        table.handle_action(Action::GoToBottom).unwrap();
        assert_eq!(table.cursor().row, 2);
        table.handle_action(Action::MoveDown).unwrap();
        assert_eq!(table.cursor().row, 2);

        table.handle_action(Action::End).unwrap();
        assert_eq!(table.cursor().col, 5);
        table.handle_action(Action::Home).unwrap();
        table.handle_action(Action::GoToTop).unwrap();
        assert_eq!(table.cursor(), Position::default());
    }

    #[test]
    fn test_sort_cycles_on_current_column() {
        let mut table = table();
        assert_eq!(ids(&table), vec![3, 1, 2]);

        table.handle_action(Action::Sort).unwrap();
        assert_eq!(ids(&table), vec![1, 2, 3]);
        table.handle_action(Action::Sort).unwrap();
        assert_eq!(ids(&table), vec![3, 2, 1]);
        table.handle_action(Action::Sort).unwrap();
        assert_eq!(ids(&table), vec![3, 1, 2]);
    }

    #[test]
    fn test_filter_and_clear() {
        let mut table = table();
        let (col, def) = (5, &table.projection.columns[5]);
        assert_eq!(def.filter, FilterKind::TextContains);

        let filter = ColumnFilter::parse(def.filter, "ACTIVE").unwrap();
        table.set_filter(col, filter);
        assert_eq!(ids(&table), vec![3, 2]);
        assert!(table.title().contains("[1/2 of 3]"));

        table.handle_action(Action::ClearFilters).unwrap();
        assert_eq!(ids(&table), vec![3, 1, 2]);
    }

    #[test]
    fn test_cursor_clamped_when_rows_shrink() {
        let mut table = table();
        table.handle_action(Action::GoToBottom).unwrap();

        let mut smaller = RowCache::new();
        smaller.update(DatasetRows::Issues(vec![issue(9, "Link flap", "active")]));
        table.set_projection(project(DatasetKind::Issues, &smaller));
        assert_eq!(table.cursor().row, 0);

        table.set_projection(project(DatasetKind::Issues, &RowCache::new()));
        assert!(table.visible_rows().is_empty());
        assert!(table.handle_action(Action::MoveDown).unwrap());
        assert!(table.title().starts_with("Issues [0/0]"));
    }

    #[test]
    fn test_grid_state_is_per_kind() {
        let mut table = table();
        table.handle_action(Action::Sort).unwrap();

        table.set_projection(project(DatasetKind::Events, &cache()));
        assert_eq!(table.grid().sort(), None);
        assert!(table.visible_rows().is_empty());

        table.set_projection(project(DatasetKind::Issues, &cache()));
        assert!(table.grid().sort().is_some());

        table.reset_grid(DatasetKind::Issues);
        assert_eq!(table.grid().sort(), None);
        assert_eq!(ids(&table), vec![3, 1, 2]);
    }

    #[test]
    fn test_current_cell_text_follows_cursor() {
        let mut table = table();
        assert_eq!(table.current_cell_text().as_deref(), Some("3"));

        table.handle_action(Action::MoveDown).unwrap();
        table.handle_action(Action::MoveRight).unwrap();
        table.handle_action(Action::MoveRight).unwrap();
        assert_eq!(table.current_cell_text().as_deref(), Some("Interface down"));

        table.set_projection(project(DatasetKind::Events, &cache()));
        assert_eq!(table.current_cell_text(), None);
        // Copying with nothing selected is a no-op
        assert!(table.handle_action(Action::CopyCell).unwrap());
    }

    #[test]
    fn test_resize_is_clamped_and_per_kind() {
        let mut table = table();
        table.handle_action(Action::MoveRight).unwrap();
        let initial = ISSUE_COLUMNS[1].width;
        assert_eq!(table.column_width(1), initial);

        table.handle_action(Action::WidenColumn).unwrap();
        assert_eq!(table.column_width(1), initial + 2);
        for _ in 0..200 {
            table.handle_action(Action::WidenColumn).unwrap();
        }
        assert_eq!(table.column_width(1), MAX_COLUMN_WIDTH);
        for _ in 0..200 {
            table.handle_action(Action::NarrowColumn).unwrap();
        }
        assert_eq!(table.column_width(1), MIN_COLUMN_WIDTH);
        assert_eq!(table.column_width(0), ISSUE_COLUMNS[0].width);

        table.set_projection(project(DatasetKind::Events, &cache()));
        assert_eq!(table.column_width(1), EVENT_COLUMNS[1].width);

        // Widths survive a refetch of the same kind
        table.set_projection(project(DatasetKind::Issues, &cache()));
        table.reset_grid(DatasetKind::Issues);
        assert_eq!(table.column_width(1), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_narrowed_columns_let_more_fit() {
        let mut table = table();
        table.viewport.width = 40;
        let before = table.columns_fitting(0);
        for col in 0..4 {
            table.cursor.col = col;
            for _ in 0..10 {
                table.handle_action(Action::NarrowColumn).unwrap();
            }
        }
        assert!(table.columns_fitting(0) > before);
    }

    #[test]
    fn test_render_limits_body_to_area() {
        let mut table = table();
        table.handle_action(Action::Sort).unwrap();
        // Room for a single body row
        let backend = TestBackend::new(80, TABLE_CHROME_ROWS + 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| table.render(frame, frame.area(), &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("ID ▲"));
        assert!(text.contains("Interface down"));
        assert!(!text.contains("High CPU"));
    }
}
