use std::io::Write;

use clap::Args;
use gsync_core::{
    executor::TransferExecutor, models::sync_pair::RemoteId, registry::Registry, GsyncError,
};
use log::info;

use super::{wants_help, Context};
use crate::usage;

/// Remove registered pairs by database id, folder path or Google file id
#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// `id`, `path` or `gid`, followed by the value to match
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// How a deletion picks its rows.
#[derive(Debug, PartialEq, Eq)]
enum Selector {
    Id(i64),
    Path(String),
    Gid(RemoteId),
}

impl Selector {
    fn parse(args: &[String]) -> Result<Self, GsyncError> {
        let (method, value) = match args {
            [] => return Err(GsyncError::usage("Missing deletion method", usage::DELETE)),
            [method, rest @ ..] => (method.as_str(), rest.first()),
        };
        if !matches!(method, "id" | "path" | "gid") {
            return Err(GsyncError::usage(
                format!("Unrecognized deletion method: {}", method),
                usage::DELETE,
            ));
        }
        let value = value.ok_or_else(|| {
            GsyncError::usage(
                format!("Missing value for deletion method {}", method),
                usage::DELETE,
            )
        })?;
        Ok(match method {
            "id" => Selector::Id(value.parse().map_err(|_| {
                GsyncError::usage(
                    format!("Database id must be a number, got {}", value),
                    usage::DELETE,
                )
            })?),
            "path" => Selector::Path(value.clone()),
            _ => Selector::Gid(RemoteId::from(value.as_str())),
        })
    }

    async fn apply(&self, registry: &mut Registry) -> Result<u64, GsyncError> {
        match self {
            Selector::Id(id) => registry.delete_by_id(*id).await,
            Selector::Path(path) => registry.delete_by_path(path).await,
            Selector::Gid(remote_id) => registry.delete_by_remote_id(remote_id).await,
        }
    }
}

impl DeleteCommand {
    pub fn new(args: Vec<String>) -> Self {
        DeleteCommand { args }
    }

    pub async fn run<E>(&self, ctx: &Context<E>, out: &mut dyn Write) -> Result<(), GsyncError>
    where
        E: TransferExecutor,
    {
        if wants_help(&self.args) {
            writeln!(out, "{}", usage::DELETE)?;
            return Ok(());
        }

        let selector = Selector::parse(&self.args)?;
        let mut registry = ctx.registry().await?;
        let removed = selector.apply(&mut registry).await?;
        registry.close().await?;
        info!("Removed {} sync pair(s)", removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gsync_core::executor::testing::RecordingExecutor;

    use super::*;
    use crate::commands::testing::{args, context};

    #[test]
    fn selectors_parse() {
        assert_eq!(Selector::parse(&args(&["id", "4"])).unwrap(), Selector::Id(4));
        assert_eq!(
            Selector::parse(&args(&["path", "/data/a"])).unwrap(),
            Selector::Path("/data/a".to_string())
        );
        assert_eq!(
            Selector::parse(&args(&["gid", "0Babc"])).unwrap(),
            Selector::Gid("0Babc".into())
        );
    }

    #[test]
    fn bad_selectors_are_usage_errors() {
        for bad in [
            vec![],
            vec!["name", "x"],
            vec!["id"],
            vec!["id", "four"],
        ] {
            let err = Selector::parse(&args(&bad)).unwrap_err();
            assert!(
                matches!(err, GsyncError::Usage { usage: usage::DELETE, .. }),
                "{:?}",
                bad
            );
        }
    }

    #[tokio::test]
    async fn each_selector_removes_only_its_matches() {
        let home = tempfile::tempdir().unwrap();
        let ctx = context(home.path(), RecordingExecutor::succeeding());
        let mut registry = ctx.registry().await.unwrap();
        let a = registry.insert("/data/a", &"0Ba".into()).await.unwrap();
        registry.insert("/data/b", &"0Bb".into()).await.unwrap();
        registry.insert("/data/c", &"0Bc".into()).await.unwrap();
        registry.close().await.unwrap();

        let sink = &mut std::io::sink();
        DeleteCommand::new(args(&["id", a.to_string().as_str()]))
            .run(&ctx, sink)
            .await
            .unwrap();
        DeleteCommand::new(args(&["path", "/data/b"]))
            .run(&ctx, sink)
            .await
            .unwrap();
        DeleteCommand::new(args(&["gid", "0Bnothing"]))
            .run(&ctx, sink)
            .await
            .unwrap();

        let mut registry = ctx.registry().await.unwrap();
        let pairs = registry.list_all().await.unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].folder, "/data/c");

        DeleteCommand::new(args(&["gid", "0Bc"]))
            .run(&ctx, sink)
            .await
            .unwrap();
        assert!(registry.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn help_prints_delete_usage() {
        let home = tempfile::tempdir().unwrap();
        let ctx = context(home.path(), RecordingExecutor::succeeding());

        let mut out: Vec<u8> = Vec::new();
        DeleteCommand::new(args(&["help"]))
            .run(&ctx, &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("gsync delete gid [Google file ID]"));
    }
}
