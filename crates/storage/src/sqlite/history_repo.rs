use quiz_core::model::{HistoryEntry, HistoryEntryId, NewHistoryEntry};

use super::{
    SqliteRepository,
    mapping::{conn, map_history_row},
};
use crate::repository::{HistoryRepository, StorageError};

#[async_trait::async_trait]
impl HistoryRepository for SqliteRepository {
    async fn initialize(&self) -> Result<(), StorageError> {
        self.migrate().await.map_err(conn)
    }

    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntryId, StorageError> {
        // Autocommit: the row is durable once `execute` returns.
        let res = sqlx::query(
            r"
                INSERT INTO quiz_history (recorded_at, score)
                VALUES (?1, ?2)
            ",
        )
        .bind(entry.recorded_at())
        .bind(i64::from(entry.score()))
        .execute(self.pool())
        .await
        .map_err(conn)?;

        let id = HistoryEntryId::new(res.last_insert_rowid());
        tracing::debug!(%id, score = entry.score(), "history entry appended");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, recorded_at, score
                FROM quiz_history
                ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_history_row(&row)?);
        }

        Ok(out)
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM quiz_history")
            .execute(self.pool())
            .await
            .map_err(conn)?;
        tracing::debug!(removed = res.rows_affected(), "history cleared");
        Ok(())
    }
}
