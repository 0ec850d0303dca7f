use crate::core::filter::ColumnFilter;
use crate::core::schema::CellValue;
use std::collections::BTreeMap;
use std::fmt;

/// Single-column sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: usize,
    pub ascending: bool,
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.ascending { "▲" } else { "▼" })
    }
}

/// Sort and filter state for one grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    sort: Option<SortSpec>,
    filters: BTreeMap<usize, ColumnFilter>,
}

impl GridState {
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn filter(&self, column: usize) -> Option<&ColumnFilter> {
        self.filters.get(&column)
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Cycle a column through ascending, descending and unsorted.
    /// Selecting a different column starts at ascending.
    pub fn cycle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some(SortSpec { column: c, ascending: true }) if c == column => Some(SortSpec {
                column,
                ascending: false,
            }),
            Some(SortSpec { column: c, ascending: false }) if c == column => None,
            _ => Some(SortSpec { column, ascending: true }),
        };
    }

    /// Set or clear (`None`) the filter on a column
    pub fn set_filter(&mut self, column: usize, filter: Option<ColumnFilter>) {
        match filter {
            Some(f) => {
                self.filters.insert(column, f);
            }
            None => {
                self.filters.remove(&column);
            }
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Indices of rows that pass every filter, in display order.
    ///
    /// Sorting is stable so equal keys keep response order.
    pub fn visible_rows(&self, rows: &[Vec<CellValue>]) -> Vec<usize> {
        let mut visible: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                self.filters
                    .iter()
                    .all(|(col, f)| row.get(*col).is_some_and(|cell| f.matches(cell)))
            })
            .map(|(idx, _)| idx)
            .collect();

        if let Some(SortSpec { column, ascending }) = self.sort {
            visible.sort_by(|a, b| {
                let ord = rows[*a].get(column).cmp(&rows[*b].get(column));
                if ascending { ord } else { ord.reverse() }
            });
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::FilterKind;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Vec<CellValue>> {
        vec![
            vec![CellValue::Integer(3), CellValue::Text("beta".into())],
            vec![CellValue::Integer(1), CellValue::Text("Alpha".into())],
            vec![CellValue::Integer(2), CellValue::Text("gamma".into())],
            vec![CellValue::Integer(1), CellValue::Text("delta".into())],
        ]
    }

    #[test]
    fn test_unsorted_unfiltered_keeps_order() {
        let grid = GridState::default();
        assert_eq!(grid.visible_rows(&rows()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sort_cycle() {
        let mut grid = GridState::default();
        grid.cycle_sort(0);
        assert_eq!(grid.sort(), Some(SortSpec { column: 0, ascending: true }));
        // Stable: rows 1 and 3 share id 1 and keep response order
        assert_eq!(grid.visible_rows(&rows()), vec![1, 3, 2, 0]);

        grid.cycle_sort(0);
        assert_eq!(grid.visible_rows(&rows()), vec![0, 2, 1, 3]);

        grid.cycle_sort(0);
        assert_eq!(grid.sort(), None);

        grid.cycle_sort(0);
        grid.cycle_sort(1);
        assert_eq!(grid.sort(), Some(SortSpec { column: 1, ascending: true }));
    }

    #[test]
    fn test_filters_combine() {
        let mut grid = GridState::default();
        grid.set_filter(0, ColumnFilter::parse(FilterKind::NumberRange, "..2").unwrap());
        assert_eq!(grid.visible_rows(&rows()), vec![1, 2, 3]);

        grid.set_filter(1, ColumnFilter::parse(FilterKind::TextContains, "A").unwrap());
        assert_eq!(grid.visible_rows(&rows()), vec![1, 2, 3]);

        grid.set_filter(1, ColumnFilter::parse(FilterKind::TextContains, "lt").unwrap());
        assert_eq!(grid.visible_rows(&rows()), vec![3]);

        grid.set_filter(1, None);
        assert_eq!(grid.visible_rows(&rows()), vec![1, 2, 3]);

        grid.clear_filters();
        assert!(!grid.has_filters());
        assert_eq!(grid.visible_rows(&rows()).len(), 4);
    }

    #[test]
    fn test_filter_and_sort_together() {
        let mut grid = GridState::default();
        grid.set_filter(0, ColumnFilter::parse(FilterKind::NumberRange, "1..2").unwrap());
        grid.cycle_sort(1);
        // "Alpha" < "delta" < "gamma" by byte order
        assert_eq!(grid.visible_rows(&rows()), vec![1, 3, 2]);
    }
}
