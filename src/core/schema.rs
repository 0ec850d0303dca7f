//! Static column schemas and typed cell values for the two record kinds.

use crate::core::models::{EventRecord, IssueRecord, timestamp};
use crate::core::types::DatasetKind;
use chrono::NaiveDateTime;
use std::fmt;

/// How a column may be filtered in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Inclusive numeric range over integer fields
    NumberRange,
    /// Case-insensitive substring over text fields
    TextContains,
    /// Inclusive day range over timestamp fields
    DateRange,
}

impl FilterKind {
    /// Short syntax hint shown in the filter prompt
    pub fn hint(&self) -> &'static str {
        match self {
            Self::NumberRange => "number or range, e.g. 5, 2..8, 2.., ..8",
            Self::TextContains => "text to search for",
            Self::DateRange => "date or range, e.g. 2024-01-31, 2024-01-01..2024-02-01",
        }
    }
}

/// Declaration of a single grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub header: &'static str,
    pub field: &'static str,
    /// Preferred width in terminal cells
    pub width: u16,
    pub filter: FilterKind,
}

const fn column(
    header: &'static str,
    field: &'static str,
    width: u16,
    filter: FilterKind,
) -> ColumnDef {
    ColumnDef {
        header,
        field,
        width,
        filter,
    }
}

pub static ISSUE_COLUMNS: [ColumnDef; 6] = [
    column("ID", "id", 7, FilterKind::NumberRange),
    column("Issue ID", "issueId", 15, FilterKind::TextContains),
    column("Name", "name", 20, FilterKind::TextContains),
    column("Device ID", "deviceId", 15, FilterKind::TextContains),
    column("Last Occurrence Time", "lastOccurrenceTime", 20, FilterKind::DateRange),
    column("Status", "status", 12, FilterKind::TextContains),
];

pub static EVENT_COLUMNS: [ColumnDef; 5] = [
    column("ID", "id", 7, FilterKind::NumberRange),
    column("Event Name", "eventName", 20, FilterKind::TextContains),
    column("Event Type", "eventType", 15, FilterKind::TextContains),
    column("Event Description", "eventDescription", 30, FilterKind::TextContains),
    column("Event Time", "eventTime", 20, FilterKind::DateRange),
];

/// Column schema for a dataset kind
pub fn columns_for(kind: DatasetKind) -> &'static [ColumnDef] {
    match kind {
        DatasetKind::Issues => &ISSUE_COLUMNS,
        DatasetKind::Events => &EVENT_COLUMNS,
    }
}

/// A typed cell. Cells within one column always share a variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellValue {
    Integer(i64),
    Text(String),
    Timestamp(Option<NaiveDateTime>),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(Some(ts)) => write!(f, "{}", ts.format(timestamp::WIRE_FORMAT)),
            Self::Timestamp(None) => f.write_str(timestamp::MISSING),
        }
    }
}

/// A record that can be laid out as a grid row
pub trait Record {
    /// Cells in schema order
    fn cells(&self) -> Vec<CellValue>;
}

impl Record for IssueRecord {
    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Integer(self.id),
            CellValue::Text(self.issue_id.clone()),
            CellValue::Text(self.name.clone()),
            CellValue::Text(self.device_id.clone()),
            CellValue::Timestamp(self.last_occurrence_time),
            CellValue::Text(self.status.clone()),
        ]
    }
}

impl Record for EventRecord {
    fn cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Integer(self.id),
            CellValue::Text(self.event_name.clone()),
            CellValue::Text(self.event_type.clone()),
            CellValue::Text(self.event_description.clone()),
            CellValue::Timestamp(self.event_time),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_filter(cell: &CellValue) -> FilterKind {
        match cell {
            CellValue::Integer(_) => FilterKind::NumberRange,
            CellValue::Text(_) => FilterKind::TextContains,
            CellValue::Timestamp(_) => FilterKind::DateRange,
        }
    }

    #[test]
    fn test_schema_shapes() {
        let issue_fields: Vec<_> = columns_for(DatasetKind::Issues)
            .iter()
            .map(|c| c.field)
            .collect();
        assert_eq!(
            issue_fields,
            vec!["id", "issueId", "name", "deviceId", "lastOccurrenceTime", "status"]
        );

        let event_fields: Vec<_> = columns_for(DatasetKind::Events)
            .iter()
            .map(|c| c.field)
            .collect();
        assert_eq!(
            event_fields,
            vec!["id", "eventName", "eventType", "eventDescription", "eventTime"]
        );
    }

    #[test]
    fn test_filter_discipline_matches_cell_types() {
        let issue = IssueRecord {
            id: 1,
            issue_id: "i".into(),
            name: "n".into(),
            device_id: "d".into(),
            last_occurrence_time: None,
            status: "s".into(),
        };
        for (cell, col) in issue.cells().iter().zip(ISSUE_COLUMNS.iter()) {
            assert_eq!(expected_filter(cell), col.filter, "column {}", col.header);
        }

        let event = EventRecord {
            id: 1,
            event_name: "n".into(),
            event_type: "t".into(),
            event_description: "d".into(),
            event_time: None,
        };
        for (cell, col) in event.cells().iter().zip(EVENT_COLUMNS.iter()) {
            assert_eq!(expected_filter(cell), col.filter, "column {}", col.header);
        }
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Integer(42).to_string(), "42");
        assert_eq!(CellValue::Timestamp(None).to_string(), "N/A");
    }
}
