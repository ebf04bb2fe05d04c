use std::{io::Write, time::Instant};

use clap::Args;
use colored::Colorize;
use gsync_core::{executor::TransferExecutor, runner::BulkRunner, Direction, GsyncError};
use log::info;

use super::{wants_help, Context};
use crate::usage;

/// Run `gdrive sync` for every registered pair
#[derive(Args, Debug)]
pub struct SyncCommand {
    /// Options forwarded to `gdrive sync`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub(crate) flags: Vec<String>,
}

impl SyncCommand {
    pub fn new(flags: Vec<String>) -> Self {
        SyncCommand { flags }
    }

    pub async fn run<E>(
        &self,
        direction: Direction,
        ctx: &Context<E>,
        out: &mut dyn Write,
    ) -> Result<(), GsyncError>
    where
        E: TransferExecutor,
    {
        if wants_help(&self.flags) {
            let text = match direction {
                Direction::Push => usage::PUSH,
                Direction::Pull => usage::PULL,
            };
            writeln!(out, "{}", text)?;
            return Ok(());
        }

        let mut registry = ctx.registry().await?;
        let pairs = registry.list_all().await?;
        registry.close().await?;

        let instant = Instant::now();
        let synced = BulkRunner::new(&ctx.gdrive, self.flags.clone())
            .run(direction, &pairs)
            .await?;
        info!(
            "{} {} of {} pair(s) in {:.2}s",
            "SUCCESS!".green(),
            direction,
            synced,
            instant.elapsed().as_secs_f32()
        );
        Ok(())
    }
}
