use crate::core::types::DatasetKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single issue row as served by `/issues`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub id: i64,
    pub issue_id: String,
    pub name: String,
    pub device_id: String,
    #[serde(with = "timestamp")]
    pub last_occurrence_time: Option<NaiveDateTime>,
    pub status: String,
}

/// A single audit event row as served by `/events`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: i64,
    pub event_name: String,
    pub event_type: String,
    pub event_description: String,
    #[serde(with = "timestamp")]
    pub event_time: Option<NaiveDateTime>,
}

/// Rows decoded from one successful fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetRows {
    Issues(Vec<IssueRecord>),
    Events(Vec<EventRecord>),
}

impl DatasetRows {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Self::Issues(_) => DatasetKind::Issues,
            Self::Events(_) => DatasetKind::Events,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Issues(rows) => rows.len(),
            Self::Events(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a JSON array body into rows of the given kind.
    ///
    /// Every required field must be present with the expected type.
    pub fn from_json(kind: DatasetKind, body: &[u8]) -> serde_json::Result<Self> {
        Ok(match kind {
            DatasetKind::Issues => Self::Issues(serde_json::from_slice(body)?),
            DatasetKind::Events => Self::Events(serde_json::from_slice(body)?),
        })
    }
}

/// Timestamp wire format.
///
/// The backend renders times as `YYYY-MM-DD HH:MM:SS` and uses `N/A` when the
/// source had none. RFC 3339 strings and raw epoch milliseconds are accepted too.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    pub const MISSING: &str = "N/A";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
    }

    pub fn parse(text: &str) -> Result<Option<NaiveDateTime>, String> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case(MISSING) {
            return Ok(None);
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, WIRE_FORMAT) {
            return Ok(Some(ts));
        }
        DateTime::parse_from_rfc3339(text)
            .map(|ts| Some(ts.naive_utc()))
            .map_err(|_| format!("invalid timestamp '{text}'"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => parse(&text).map_err(D::Error::custom),
            Raw::Millis(0) => Ok(None),
            Raw::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .map(|ts| Some(ts.naive_utc()))
                .ok_or_else(|| D::Error::custom(format!("timestamp {ms} out of range"))),
        }
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(WIRE_FORMAT).to_string()),
            None => serializer.serialize_str(MISSING),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_decode_issues() {
        let body = br#"[
            {"id": 0, "issueId": "AWf1", "name": "Interface down", "deviceId": "dev-7",
             "lastOccurrenceTime": "2024-03-01 12:30:00", "status": "active"},
            {"id": 1, "issueId": "AWf2", "name": "High CPU", "deviceId": "dev-9",
             "lastOccurrenceTime": "N/A", "status": "resolved"}
        ]"#;

        let rows = DatasetRows::from_json(DatasetKind::Issues, body).unwrap();
        let DatasetRows::Issues(issues) = rows else {
            panic!("expected issue rows");
        };
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].issue_id, "AWf1");
        assert_eq!(issues[0].last_occurrence_time, Some(at(2024, 3, 1, 12, 30, 0)));
        assert_eq!(issues[1].last_occurrence_time, None);
    }

    #[test]
    fn test_decode_events_with_epoch_millis() {
        let body = br#"[{"id": 4, "eventName": "Login", "eventType": "AUDIT",
            "eventDescription": "admin logged in", "eventTime": 1700000000000}]"#;

        let rows = DatasetRows::from_json(DatasetKind::Events, body).unwrap();
        let DatasetRows::Events(events) = rows else {
            panic!("expected event rows");
        };
        assert_eq!(events[0].event_time, Some(at(2023, 11, 14, 22, 13, 20)));
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let body = br#"[{"id": 1, "issueId": "x", "name": "n", "deviceId": "d", "status": "s"}]"#;
        let err = DatasetRows::from_json(DatasetKind::Issues, body).unwrap_err();
        assert!(err.to_string().contains("lastOccurrenceTime"));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(DatasetRows::from_json(DatasetKind::Events, br#"{"response": []}"#).is_err());
        assert!(DatasetRows::from_json(DatasetKind::Issues, br#"[{"id": "one"}]"#).is_err());
        // An issue array does not satisfy the event schema
        let issue = br#"[{"id": 1, "issueId": "x", "name": "n", "deviceId": "d",
            "lastOccurrenceTime": "N/A", "status": "s"}]"#;
        assert!(DatasetRows::from_json(DatasetKind::Events, issue).is_err());
    }

    #[test]
    fn test_timestamp_parse_variants() {
        assert_eq!(timestamp::parse("").unwrap(), None);
        assert_eq!(timestamp::parse("n/a").unwrap(), None);
        assert_eq!(
            timestamp::parse("2024-01-02T03:04:05Z").unwrap(),
            Some(at(2024, 1, 2, 3, 4, 5))
        );
        assert!(timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_serialize_uses_wire_format() {
        let event = EventRecord {
            id: 1,
            event_name: "Login".into(),
            event_type: "AUDIT".into(),
            event_description: "ok".into(),
            event_time: Some(at(2024, 5, 6, 7, 8, 9)),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventTime"], "2024-05-06 07:08:09");
        assert_eq!(json["eventName"], "Login");
    }
}
