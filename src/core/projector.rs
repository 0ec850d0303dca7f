use crate::core::row_cache::{CachedRows, RowCache};
use crate::core::schema::{CellValue, ColumnDef, Record, columns_for};
use crate::core::types::DatasetKind;

/// Rows and column schema handed to the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub kind: DatasetKind,
    pub columns: &'static [ColumnDef],
    pub rows: Vec<Vec<CellValue>>,
}

/// Select the cached rows and schema for the active kind
pub fn project(active: DatasetKind, cache: &RowCache) -> Projection {
    let rows = match cache.get(active) {
        CachedRows::Issues(rows) => rows.iter().map(Record::cells).collect(),
        CachedRows::Events(rows) => rows.iter().map(Record::cells).collect(),
    };
    Projection {
        kind: active,
        columns: columns_for(active),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{DatasetRows, EventRecord};

    #[test]
    fn test_project_empty_cache() {
        let cache = RowCache::new();
        let projection = project(DatasetKind::Events, &cache);
        assert_eq!(projection.kind, DatasetKind::Events);
        assert!(projection.rows.is_empty());
        assert_eq!(projection.columns.len(), 5);
    }

    #[test]
    fn test_project_active_slot_only() {
        let mut cache = RowCache::new();
        cache.update(DatasetRows::Events(vec![EventRecord {
            id: 7,
            event_name: "Login".into(),
            event_type: "AUDIT".into(),
            event_description: "admin logged in".into(),
            event_time: None,
        }]));

        let events = project(DatasetKind::Events, &cache);
        assert_eq!(events.rows.len(), 1);
        assert_eq!(events.rows[0][0], CellValue::Integer(7));
        assert_eq!(events.rows[0].len(), events.columns.len());

        let issues = project(DatasetKind::Issues, &cache);
        assert!(issues.rows.is_empty());
        assert_eq!(issues.columns.len(), 6);
    }
}
