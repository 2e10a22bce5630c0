//! Lending (book taken by a reader) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Lending model as stored in `lendings.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lending {
    pub id: i32,
    pub book_id: i32,
    pub reader_id: i32,
    pub lending_date: DateTime<Utc>,
    pub lent_until: DateTime<Utc>,
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
}

impl Entity for Lending {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Lending {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// True when the book is still out past its due date
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && now > self.lent_until
    }

    pub fn describe(&self, now: DateTime<Utc>) -> String {
        format!(
            "Id: {}\nBook id: {}\nReader id: {}\nLending date: {}\nLent until: {}\nOverdue: {}\n",
            self.id,
            self.book_id,
            self.reader_id,
            self.lending_date.format(DATE_TIME_FORMAT),
            self.lent_until.format(DATE_TIME_FORMAT),
            if self.is_overdue(now) { "yes" } else { "no" }
        )
    }
}

/// Outcome of a successful book return
#[derive(Debug, Clone)]
pub struct ReturnReceipt {
    pub lending: Lending,
    pub late: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn lending(return_date: Option<DateTime<Utc>>) -> Lending {
        let start = Utc.with_ymd_and_hms(2026, 1, 10, 9, 30, 0).unwrap();
        Lending {
            id: 4,
            book_id: 1,
            reader_id: 2,
            lending_date: start,
            lent_until: start + Duration::days(10),
            return_date,
        }
    }

    #[test]
    fn test_overdue_only_when_open_and_past_due() {
        let late = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap();

        assert!(lending(None).is_overdue(late));
        assert!(!lending(None).is_overdue(early));
        assert!(!lending(Some(early)).is_overdue(late));
    }

    #[test]
    fn test_describe() {
        let now = Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap();
        assert_eq!(
            lending(None).describe(now),
            "Id: 4\nBook id: 1\nReader id: 2\nLending date: 2026-01-10 09:30\n\
             Lent until: 2026-01-20 09:30\nOverdue: no\n"
        );
    }

    #[test]
    fn test_missing_return_date_deserializes_as_open() {
        let json = r#"{"id":1,"book_id":1,"reader_id":1,
            "lending_date":"2026-01-10T09:30:00Z","lent_until":"2026-01-20T09:30:00Z"}"#;
        let lending: Lending = serde_json::from_str(json).unwrap();
        assert!(lending.is_open());
    }
}
