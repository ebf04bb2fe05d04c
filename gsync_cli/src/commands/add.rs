use std::{io::Write, path::Path};

use clap::Args;
use colored::Colorize;
use gsync_core::{
    adopt::{adopt_folder, Adoption},
    executor::TransferExecutor,
    models::sync_pair::RemoteId,
    GsyncError,
};
use log::info;

use super::{wants_help, Context};
use crate::usage;

/// Register a local folder with a Google drive folder
#[derive(Args, Debug)]
pub struct AddCommand {
    /// Local folder followed by the Google drive folder id
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl AddCommand {
    pub fn new(args: Vec<String>) -> Self {
        AddCommand { args }
    }

    pub async fn run<E>(&self, ctx: &Context<E>, out: &mut dyn Write) -> Result<(), GsyncError>
    where
        E: TransferExecutor,
    {
        if wants_help(&self.args) {
            writeln!(out, "{}", usage::ADD)?;
            return Ok(());
        }

        let (folder, remote_id) = match self.args.as_slice() {
            [folder, remote_id] => (Path::new(folder), RemoteId::from(remote_id.as_str())),
            _ => {
                return Err(GsyncError::usage(
                    "add expects a folder and a Google file id",
                    usage::ADD,
                ))
            }
        };
        if !folder.exists() {
            return Err(GsyncError::usage(
                format!("Path {} does not exist", folder.display()),
                usage::ADD,
            ));
        }
        if !folder.is_dir() {
            return Err(GsyncError::usage(
                format!("Path {} is not a folder", folder.display()),
                usage::ADD,
            ));
        }
        let folder = std::path::absolute(folder)?;
        let folder_str = folder.to_str().ok_or_else(|| {
            GsyncError::usage(
                format!("Path {} is not valid UTF-8", folder.display()),
                usage::ADD,
            )
        })?;

        let mut registry = ctx.registry().await?;
        let adoption =
            match adopt_folder(&ctx.gdrive, &remote_id, &folder, &ctx.config.folder_suffix).await {
                Ok(adoption) => adoption,
                Err(err) => {
                    registry.close().await?;
                    return Err(err);
                }
            };
        if let Adoption::Migrated { original, created } = &adoption {
            info!(
                "Content of {} now lives in {}",
                original.to_string().yellow(),
                created.to_string().green()
            );
        }

        let id = registry.insert(folder_str, adoption.target()).await?;
        registry.close().await?;
        info!(
            "[{}] Added {} : {}",
            id,
            folder_str.green(),
            adoption.target().to_string().green()
        );
        Ok(())
    }
}
