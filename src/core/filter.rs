use crate::core::schema::{CellValue, FilterKind};
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Separator between the lower and upper bound of a range filter
const RANGE_SEP: &str = "..";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter applied to a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnFilter {
    NumberRange { min: Option<i64>, max: Option<i64> },
    /// Needle is stored lowercased
    TextContains { needle: String },
    DateRange { from: Option<NaiveDate>, to: Option<NaiveDate> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("'{0}' is not a whole number")]
    InvalidNumber(String),
    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("range start is after range end")]
    InvertedRange,
    #[error("range needs at least one bound")]
    EmptyRange,
}

impl ColumnFilter {
    /// Parse user input according to the column's filter discipline.
    ///
    /// Returns `Ok(None)` for blank input, meaning "no filter".
    pub fn parse(kind: FilterKind, input: &str) -> Result<Option<Self>, FilterParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let filter = match kind {
            FilterKind::TextContains => Self::TextContains {
                needle: input.to_lowercase(),
            },
            FilterKind::NumberRange => {
                let (min, max) = parse_range(input, |s| {
                    s.parse::<i64>()
                        .map_err(|_| FilterParseError::InvalidNumber(s.to_string()))
                })?;
                Self::NumberRange { min, max }
            }
            FilterKind::DateRange => {
                let (from, to) = parse_range(input, |s| {
                    NaiveDate::parse_from_str(s, DATE_FORMAT)
                        .map_err(|_| FilterParseError::InvalidDate(s.to_string()))
                })?;
                Self::DateRange { from, to }
            }
        };
        Ok(Some(filter))
    }

    /// Whether a cell passes this filter. Mismatched cell types never match.
    pub fn matches(&self, cell: &CellValue) -> bool {
        match (self, cell) {
            (Self::NumberRange { min, max }, CellValue::Integer(n)) => {
                min.is_none_or(|lo| *n >= lo) && max.is_none_or(|hi| *n <= hi)
            }
            (Self::TextContains { needle }, CellValue::Text(text)) => {
                text.to_lowercase().contains(needle.as_str())
            }
            (Self::DateRange { from, to }, CellValue::Timestamp(Some(ts))) => {
                let day = ts.date();
                from.is_none_or(|lo| day >= lo) && to.is_none_or(|hi| day <= hi)
            }
            _ => false,
        }
    }

    /// Input text that parses back to this filter, used to prefill the prompt
    pub fn as_input(&self) -> String {
        match self {
            Self::NumberRange { min, max } if min.is_some() && min == max => show_bound(min),
            Self::NumberRange { min, max } => show_range(min, max),
            Self::TextContains { needle } => needle.clone(),
            Self::DateRange { from, to } if from.is_some() && from == to => show_bound(from),
            Self::DateRange { from, to } => show_range(from, to),
        }
    }
}

impl fmt::Display for ColumnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberRange { min, max } if min.is_some() && min == max => {
                write!(f, "= {}", show_bound(min))
            }
            Self::NumberRange { min, max } => f.write_str(&show_range(min, max)),
            Self::TextContains { needle } => write!(f, "~ {needle}"),
            Self::DateRange { from, to } if from.is_some() && from == to => {
                write!(f, "on {}", show_bound(from))
            }
            Self::DateRange { from, to } => f.write_str(&show_range(from, to)),
        }
    }
}

/// An open bound renders as nothing
fn show_bound<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn show_range<T: fmt::Display>(lo: &Option<T>, hi: &Option<T>) -> String {
    format!("{}{RANGE_SEP}{}", show_bound(lo), show_bound(hi))
}

/// Parse `a`, `a..b`, `a..` or `..b`. A single value yields an exact match.
fn parse_range<T, F>(input: &str, parse: F) -> Result<(Option<T>, Option<T>), FilterParseError>
where
    T: PartialOrd + Clone,
    F: Fn(&str) -> Result<T, FilterParseError>,
{
    let Some((lo, hi)) = input.split_once(RANGE_SEP) else {
        let value = parse(input)?;
        return Ok((Some(value.clone()), Some(value)));
    };
    let bound = |s: &str| -> Result<Option<T>, FilterParseError> {
        let s = s.trim();
        if s.is_empty() { Ok(None) } else { parse(s).map(Some) }
    };
    let (lo, hi) = (bound(lo)?, bound(hi)?);
    match (&lo, &hi) {
        (None, None) => Err(FilterParseError::EmptyRange),
        (Some(a), Some(b)) if a > b => Err(FilterParseError::InvertedRange),
        _ => Ok((lo, hi)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> CellValue {
        CellValue::Timestamp(Some(
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap(),
        ))
    }

    #[test]
    fn test_blank_input_clears() {
        assert_eq!(ColumnFilter::parse(FilterKind::NumberRange, "   ").unwrap(), None);
    }

    #[test]
    fn test_number_range() {
        let exact = ColumnFilter::parse(FilterKind::NumberRange, "5").unwrap().unwrap();
        assert!(exact.matches(&CellValue::Integer(5)));
        assert!(!exact.matches(&CellValue::Integer(6)));

        let open = ColumnFilter::parse(FilterKind::NumberRange, "2..").unwrap().unwrap();
        assert!(open.matches(&CellValue::Integer(2)));
        assert!(open.matches(&CellValue::Integer(900)));
        assert!(!open.matches(&CellValue::Integer(1)));

        let closed = ColumnFilter::parse(FilterKind::NumberRange, "-3..3").unwrap().unwrap();
        assert!(closed.matches(&CellValue::Integer(-3)));
        assert!(closed.matches(&CellValue::Integer(3)));
        assert!(!closed.matches(&CellValue::Integer(4)));
    }

    #[test]
    fn test_number_range_errors() {
        assert_eq!(
            ColumnFilter::parse(FilterKind::NumberRange, "abc"),
            Err(FilterParseError::InvalidNumber("abc".into()))
        );
        assert_eq!(
            ColumnFilter::parse(FilterKind::NumberRange, "9..1"),
            Err(FilterParseError::InvertedRange)
        );
        assert_eq!(
            ColumnFilter::parse(FilterKind::NumberRange, ".."),
            Err(FilterParseError::EmptyRange)
        );
    }

    #[test]
    fn test_text_contains_is_case_insensitive() {
        let f = ColumnFilter::parse(FilterKind::TextContains, "Down").unwrap().unwrap();
        assert!(f.matches(&CellValue::Text("Interface DOWN on Gi1/0/1".into())));
        assert!(!f.matches(&CellValue::Text("up".into())));
        // Wrong cell type never matches
        assert!(!f.matches(&CellValue::Integer(1)));
    }

    #[test]
    fn test_date_range() {
        let day = ColumnFilter::parse(FilterKind::DateRange, "2024-03-01").unwrap().unwrap();
        assert!(day.matches(&ts("2024-03-01 00:00:00")));
        assert!(day.matches(&ts("2024-03-01 23:59:59")));
        assert!(!day.matches(&ts("2024-03-02 00:00:00")));
        assert!(!day.matches(&CellValue::Timestamp(None)));

        let until = ColumnFilter::parse(FilterKind::DateRange, "..2024-01-31").unwrap().unwrap();
        assert!(until.matches(&ts("2023-12-25 10:00:00")));
        assert!(!until.matches(&ts("2024-02-01 10:00:00")));

        assert_eq!(
            ColumnFilter::parse(FilterKind::DateRange, "31/01/2024"),
            Err(FilterParseError::InvalidDate("31/01/2024".into()))
        );
    }

    #[test]
    fn test_display() {
        let f = ColumnFilter::parse(FilterKind::NumberRange, "2..8").unwrap().unwrap();
        assert_eq!(f.to_string(), "2..8");
        let f = ColumnFilter::parse(FilterKind::NumberRange, "4").unwrap().unwrap();
        assert_eq!(f.to_string(), "= 4");
    }

    #[test]
    fn test_as_input_parses_back() {
        for (kind, input) in [
            (FilterKind::NumberRange, "4"),
            (FilterKind::NumberRange, "..8"),
            (FilterKind::TextContains, "gi1/0"),
            (FilterKind::DateRange, "2024-01-01..2024-02-01"),
            (FilterKind::DateRange, "2024-03-01"),
        ] {
            let f = ColumnFilter::parse(kind, input).unwrap().unwrap();
            assert_eq!(f.as_input(), input);
            assert_eq!(ColumnFilter::parse(kind, &f.as_input()).unwrap(), Some(f));
        }
    }
}
