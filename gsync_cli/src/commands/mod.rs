use gsync_core::{
    config::GsyncConfig, executor::TransferExecutor, gdrive::Gdrive, registry::Registry,
    GsyncError,
};

pub mod add;
pub mod delete;
pub mod list;
pub mod sync;

/// What every method needs to do its work.
pub struct Context<E> {
    pub config: GsyncConfig,
    pub gdrive: Gdrive<E>,
}

impl<E> Context<E>
where
    E: TransferExecutor,
{
    pub fn new(config: GsyncConfig, executor: E) -> Self {
        let gdrive = Gdrive::new(config.gdrive_binary.clone(), executor);
        Context { config, gdrive }
    }

    /// A fresh registry connection, to be closed by the caller.
    pub async fn registry(&self) -> Result<Registry, GsyncError> {
        Registry::open(&self.config.database_path).await
    }
}

/// Methods answer `help` wherever it appears in their arguments.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|arg| arg.eq_ignore_ascii_case("help"))
}

#[cfg(test)]
pub(crate) mod testing {
    use gsync_core::executor::testing::RecordingExecutor;

    use super::*;

    /// A context whose store lives in `home`.
    pub fn context(home: &std::path::Path, executor: RecordingExecutor) -> Context<RecordingExecutor> {
        let config = GsyncConfig {
            database_path: home.join(".gsync.db"),
            gdrive_binary: "gdrive".to_string(),
            folder_suffix: "-gsync".to_string(),
        };
        Context::new(config, executor)
    }

    pub fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }
}
