use log::info;

use crate::{
    executor::TransferExecutor, gdrive::Gdrive, models::sync_pair::SyncPair, Direction,
    GsyncError,
};

/// Replays `gdrive sync` over every registered pair.
pub struct BulkRunner<'a, E> {
    gdrive: &'a Gdrive<E>,
    flags: Vec<String>,
}

impl<'a, E> BulkRunner<'a, E>
where
    E: TransferExecutor,
{
    /// `flags` are forwarded to each `gdrive sync` call ahead of the paths.
    pub fn new(gdrive: &'a Gdrive<E>, flags: Vec<String>) -> Self {
        BulkRunner { gdrive, flags }
    }

    /// Syncs the pairs in the order given and stops at the first failure.
    /// Returns the number of pairs synced.
    pub async fn run(&self, direction: Direction, pairs: &[SyncPair]) -> Result<usize, GsyncError> {
        for pair in pairs.iter() {
            info!("[{}] {} <-> {}", pair.id, pair.folder, pair.remote_id);
            self.gdrive
                .sync(direction, &self.flags, &pair.folder, &pair.remote_id)
                .await?;
        }
        Ok(pairs.len())
    }
}
