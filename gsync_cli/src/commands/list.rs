use std::io::Write;

use clap::Args;
use gsync_core::{executor::TransferExecutor, models::sync_pair::SyncPair, GsyncError};

use super::{wants_help, Context};
use crate::usage;

const RULE: &str = "-------------------------------";

/// List registered sync pairs
#[derive(Args, Debug)]
pub struct ListCommand {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    args: Vec<String>,
}

impl ListCommand {
    pub fn new(args: Vec<String>) -> Self {
        ListCommand { args }
    }

    pub async fn run<E>(&self, ctx: &Context<E>, out: &mut dyn Write) -> Result<(), GsyncError>
    where
        E: TransferExecutor,
    {
        if wants_help(&self.args) {
            writeln!(out, "{}", usage::LIST)?;
            return Ok(());
        }

        let mut registry = ctx.registry().await?;
        let pairs = registry.list_all().await?;
        registry.close().await?;
        write_table(out, &pairs)?;
        Ok(())
    }
}

fn write_table(out: &mut dyn Write, pairs: &[SyncPair]) -> std::io::Result<()> {
    writeln!(out, "id : Folder : Google ID")?;
    writeln!(out, "{}", RULE)?;
    for pair in pairs.iter() {
        writeln!(out, "{} : {} : {}", pair.id, pair.folder, pair.remote_id)?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Total : {}", pairs.len())
}
