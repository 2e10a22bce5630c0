//! Lending lookups on top of the generic JSON repository

use crate::{
    error::AppResult,
    models::Lending,
};

use super::json_file::JsonRepository;

pub type LendingsRepository = JsonRepository<Lending>;

impl JsonRepository<Lending> {
    /// The lending of `book_id` that has not been returned yet
    pub async fn find_open_for_book(&self, book_id: i32) -> AppResult<Option<Lending>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .find(|l| l.is_open() && l.book_id == book_id))
    }

    /// Lendings not returned yet, oldest due date first
    pub async fn get_open(&self) -> AppResult<Vec<Lending>> {
        let mut open: Vec<Lending> = self
            .get_all()
            .await?
            .into_iter()
            .filter(Lending::is_open)
            .collect();
        open.sort_by_key(|l| (l.lent_until, l.id));
        Ok(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn lending(book_id: i32, days: i64, returned: bool) -> Lending {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Lending {
            id: 0,
            book_id,
            reader_id: 1,
            lending_date: start,
            lent_until: start + Duration::days(days),
            return_date: returned.then(|| start + Duration::days(1)),
        }
    }

    #[tokio::test]
    async fn test_find_open_for_book_skips_returned() {
        let dir = tempfile::tempdir().unwrap();
        let repository =
            LendingsRepository::new(dir.path().join("lendings.json"), dir.path().join("last.txt"));

        repository.add(lending(1, 10, true)).await.unwrap();
        let open = repository.add(lending(1, 10, false)).await.unwrap();
        repository.add(lending(2, 10, false)).await.unwrap();

        assert_eq!(repository.find_open_for_book(1).await.unwrap(), Some(open));
        assert_eq!(repository.find_open_for_book(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_open_sorted_by_due_date() {
        let dir = tempfile::tempdir().unwrap();
        let repository =
            LendingsRepository::new(dir.path().join("lendings.json"), dir.path().join("last.txt"));

        repository.add(lending(1, 30, false)).await.unwrap();
        repository.add(lending(2, 5, false)).await.unwrap();
        repository.add(lending(3, 1, true)).await.unwrap();

        let open = repository.get_open().await.unwrap();
        let book_ids: Vec<i32> = open.iter().map(|l| l.book_id).collect();
        assert_eq!(book_ids, vec![2, 1]);
    }
}
