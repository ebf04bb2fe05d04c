use std::path::Path;

use log::{info, warn};

use crate::{
    executor::{Invocation, TransferExecutor},
    models::{
        remote::{RemoteEntry, RemoteInfo},
        sync_pair::RemoteId,
    },
    Direction, GsyncError,
};

/// Typed front for the `gdrive` command line tool.
pub struct Gdrive<E> {
    binary: String,
    executor: E,
}

impl<E> Gdrive<E>
where
    E: TransferExecutor,
{
    pub fn new(binary: impl Into<String>, executor: E) -> Self {
        Gdrive {
            binary: binary.into(),
            executor,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(&self.binary)
    }

    /// Runs a command whose output we need, failing on a non-zero exit.
    async fn capture(&self, invocation: Invocation) -> Result<String, GsyncError> {
        let output = self.executor.output(&invocation).await?;
        if !output.success() {
            if !output.stderr.trim().is_empty() {
                warn!("{}", output.stderr.trim());
            }
            return Err(GsyncError::CommandFailed {
                command: invocation.to_string(),
                code: output.code,
            });
        }
        Ok(output.stdout)
    }

    /// Runs a command attached to the terminal, failing on a non-zero exit.
    pub async fn run(&self, invocation: Invocation) -> Result<(), GsyncError> {
        info!("cmnd: {}", invocation);
        match self.executor.status(&invocation).await? {
            Some(0) => Ok(()),
            code => Err(GsyncError::CommandFailed {
                command: invocation.to_string(),
                code,
            }),
        }
    }

    /// `gdrive info <id>`, parsed into its attributes.
    pub async fn info(&self, id: &RemoteId) -> Result<RemoteInfo, GsyncError> {
        let invocation = self.invocation().arg("info").arg(id.as_str());
        let output = self.executor.output(&invocation).await?;
        if !output.success() {
            let reason = match output.stderr.trim() {
                "" => output.stdout.trim().to_string(),
                stderr => stderr.to_string(),
            };
            return Err(GsyncError::RemoteNotFound {
                id: id.clone(),
                reason,
            });
        }
        Ok(RemoteInfo::parse(&output.stdout))
    }

    /// True if the id names a folder. Otherwise the attributes gdrive
    /// reported are logged.
    pub async fn is_directory(&self, id: &RemoteId) -> Result<bool, GsyncError> {
        let info = self.info(id).await?;
        if info.is_directory() {
            return Ok(true);
        }
        warn!("{} is not a directory:\n{}", id, info);
        Ok(false)
    }

    /// Immediate children of a folder, trashed ones excluded. A row that
    /// cannot be read fails the listing rather than being dropped.
    pub async fn list_children(&self, id: &RemoteId) -> Result<Vec<RemoteEntry>, GsyncError> {
        let invocation = self
            .invocation()
            .args(["list", "--no-header", "--bytes", "--max", "0", "--query"])
            .arg(format!("'{}' in parents and trashed = false", id));
        let command = invocation.to_string();
        let output = self.capture(invocation).await?;
        RemoteEntry::parse_listing(&output).map_err(|row| GsyncError::UnexpectedOutput {
            command,
            output: row.to_string(),
        })
    }

    /// Creates `name` under `parent` and returns the new folder's id.
    pub async fn mkdir(&self, parent: &RemoteId, name: &str) -> Result<RemoteId, GsyncError> {
        let invocation = self
            .invocation()
            .args(["mkdir", "--parent", parent.as_str(), name]);
        let command = invocation.to_string();
        let output = self.capture(invocation).await?;
        parse_created_directory(&output).ok_or_else(|| GsyncError::UnexpectedOutput {
            command,
            output: output.trim().to_string(),
        })
    }

    /// `gdrive sync upload|download` for one pair, extra flags first.
    pub async fn sync(
        &self,
        direction: Direction,
        flags: &[String],
        folder: &str,
        id: &RemoteId,
    ) -> Result<(), GsyncError> {
        let invocation = self
            .invocation()
            .args(["sync", direction.sync_verb()])
            .args(flags.iter().cloned());
        let invocation = match direction {
            Direction::Push => invocation.arg(folder).arg(id.as_str()),
            Direction::Pull => invocation.arg(id.as_str()).arg(folder),
        };
        self.run(invocation).await
    }

    /// Downloads a remote folder, recursively, into `destination/<name>`.
    pub async fn download_recursive(
        &self,
        id: &RemoteId,
        destination: &Path,
    ) -> Result<(), GsyncError> {
        let invocation = self
            .invocation()
            .args(["download", "--recursive", "--path"])
            .arg(destination.to_string_lossy())
            .arg(id.as_str());
        self.run(invocation).await
    }
}

/// gdrive reports `Directory <id> created`.
fn parse_created_directory(output: &str) -> Option<RemoteId> {
    output.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("Directory"), Some(id), Some("created")) => Some(RemoteId::from(id)),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::{failed, ok, RecordingExecutor};

    fn gdrive(executor: RecordingExecutor) -> Gdrive<RecordingExecutor> {
        Gdrive::new("gdrive", executor)
    }

    #[tokio::test]
    async fn folder_is_a_directory() {
        let drive = gdrive(RecordingExecutor::new(|_| {
            ok("Id: 0Babc\nName: docs\nMime: application/vnd.google-apps.folder\n")
        }));
        assert!(drive.is_directory(&"0Babc".into()).await.unwrap());
        assert_eq!(drive.executor().arg_lines(), vec!["info 0Babc"]);
    }

    #[tokio::test]
    async fn plain_file_is_not_a_directory() {
        let drive = gdrive(RecordingExecutor::new(|_| ok("Id: 0Bf\nMime: text/plain\n")));
        assert!(!drive.is_directory(&"0Bf".into()).await.unwrap());
    }

    #[tokio::test]
    async fn failing_info_means_not_found() {
        let drive = gdrive(RecordingExecutor::new(|_| {
            failed(1, "Failed to get file: googleapi: Error 404: File not found")
        }));
        let err = drive.info(&"0Bmissing".into()).await.unwrap_err();
        match err {
            GsyncError::RemoteNotFound { id, reason } => {
                assert_eq!(id, RemoteId::from("0Bmissing"));
                assert!(reason.contains("File not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn children_are_listed_by_parent_query() {
        let drive = gdrive(RecordingExecutor::new(|_| {
            ok("0Bkid  a.txt  bin  10  2018-01-01 00:00:00\n")
        }));
        let children = drive.list_children(&"0Bparent".into()).await.unwrap();
        assert_eq!(children.len(), 1);

        let calls = drive.executor().calls();
        assert_eq!(
            calls[0].args,
            vec![
                "list",
                "--no-header",
                "--bytes",
                "--max",
                "0",
                "--query",
                "'0Bparent' in parents and trashed = false"
            ]
        );
    }

    #[tokio::test]
    async fn unreadable_listing_row_fails() {
        let drive = gdrive(RecordingExecutor::new(|_| {
            ok("0Bkid  a.txt  bin  10  2018-01-01 00:00:00\ngarbled\n")
        }));
        match drive.list_children(&"0Bparent".into()).await.unwrap_err() {
            GsyncError::UnexpectedOutput { output, .. } => assert_eq!(output, "garbled"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn mkdir_returns_created_id() {
        let drive = gdrive(RecordingExecutor::new(|_| ok("Directory 0Bnew created\n")));
        let id = drive.mkdir(&"0Bparent".into(), "docs-gsync").await.unwrap();
        assert_eq!(id, RemoteId::from("0Bnew"));
        assert_eq!(
            drive.executor().arg_lines(),
            vec!["mkdir --parent 0Bparent docs-gsync"]
        );
    }

    #[tokio::test]
    async fn mkdir_with_unexpected_output_fails() {
        let drive = gdrive(RecordingExecutor::new(|_| ok("something else\n")));
        let err = drive.mkdir(&"0Bparent".into(), "x").await.unwrap_err();
        assert!(matches!(err, GsyncError::UnexpectedOutput { .. }));
    }

    #[tokio::test]
    async fn sync_orders_arguments_by_direction() {
        let drive = gdrive(RecordingExecutor::succeeding());
        let flags = vec!["--keep-local".to_string()];
        drive
            .sync(Direction::Push, &flags, "/home/me/docs", &"0Bdocs".into())
            .await
            .unwrap();
        drive
            .sync(Direction::Pull, &flags, "/home/me/docs", &"0Bdocs".into())
            .await
            .unwrap();
        assert_eq!(
            drive.executor().arg_lines(),
            vec![
                "sync upload --keep-local /home/me/docs 0Bdocs",
                "sync download --keep-local 0Bdocs /home/me/docs",
            ]
        );
    }

    #[tokio::test]
    async fn failed_sync_reports_exit_code() {
        let drive = gdrive(RecordingExecutor::new(|_| failed(2, "")));
        let err = drive
            .sync(Direction::Push, &[], "/tmp/x", &"0Bx".into())
            .await
            .unwrap_err();
        assert!(matches!(err, GsyncError::CommandFailed { code: Some(2), .. }));
    }

    #[test]
    fn created_directory_line_is_found() {
        assert_eq!(
            parse_created_directory("Creating directory\nDirectory 0Bz created\n"),
            Some(RemoteId::from("0Bz"))
        );
        assert_eq!(parse_created_directory("Directory created"), None);
    }
}
