use std::path::Path;

use log::debug;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection,
};

use crate::{
    models::sync_pair::{RemoteId, SyncPair},
    GsyncError,
};

/// One open connection to the sync pair table.
///
/// Open it for a single logical operation and [`close`](Registry::close) it
/// when done. Writes run in their own transaction.
pub struct Registry {
    conn: SqliteConnection,
}

impl Registry {
    /// Opens the store at `path`, creating the file and table if needed.
    pub async fn open(path: &Path) -> Result<Self, GsyncError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;
        sqlx::migrate!().run(&mut conn).await?;
        debug!("Opened registry at {}", path.display());
        Ok(Registry { conn })
    }

    pub async fn close(self) -> Result<(), GsyncError> {
        self.conn.close().await?;
        Ok(())
    }

    pub async fn insert(&mut self, folder: &str, remote_id: &RemoteId) -> Result<i64, GsyncError> {
        let mut tx = self.conn.begin().await?;
        let id = sqlx::query("INSERT INTO sync_list (folder, google_id) VALUES (?, ?)")
            .bind(folder)
            .bind(remote_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        tx.commit().await?;
        debug!("Inserted sync pair {} ({} -> {})", id, folder, remote_id);
        Ok(id)
    }

    /// Every complete pair, ordered by id. Legacy rows missing either
    /// column are left out.
    pub async fn list_all(&mut self) -> Result<Vec<SyncPair>, GsyncError> {
        let pairs = sqlx::query_as::<_, SyncPair>(
            "SELECT id, folder, google_id FROM sync_list \
             WHERE folder IS NOT NULL AND google_id IS NOT NULL ORDER BY id",
        )
        .fetch_all(&mut self.conn)
        .await?;
        Ok(pairs)
    }

    pub async fn delete_by_id(&mut self, id: i64) -> Result<u64, GsyncError> {
        let mut tx = self.conn.begin().await?;
        let removed = sqlx::query("DELETE FROM sync_list WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(removed)
    }

    pub async fn delete_by_path(&mut self, folder: &str) -> Result<u64, GsyncError> {
        let mut tx = self.conn.begin().await?;
        let removed = sqlx::query("DELETE FROM sync_list WHERE folder = ?")
            .bind(folder)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(removed)
    }

    pub async fn delete_by_remote_id(&mut self, remote_id: &RemoteId) -> Result<u64, GsyncError> {
        let mut tx = self.conn.begin().await?;
        let removed = sqlx::query("DELETE FROM sync_list WHERE google_id = ?")
            .bind(remote_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(removed)
    }
}
