//! Making a remote folder usable as a `gdrive sync` target.
//!
//! `gdrive sync upload` refuses destinations that are neither empty nor an
//! existing sync root. When the folder being registered already holds
//! content, that content is moved into the local folder and everything is
//! uploaded into a fresh sibling folder, which becomes the registered target.
//! A half-finished migration is left as is.

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use log::info;

use crate::{
    executor::TransferExecutor, gdrive::Gdrive, models::sync_pair::RemoteId, Direction,
    GsyncError,
};

/// Outcome of adopting a remote folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adoption {
    /// The folder was already empty and is used directly.
    Ready(RemoteId),
    /// The folder had content, which now lives in `created`.
    Migrated { original: RemoteId, created: RemoteId },
}

impl Adoption {
    /// The folder to register.
    pub fn target(&self) -> &RemoteId {
        match self {
            Adoption::Ready(id) => id,
            Adoption::Migrated { created, .. } => created,
        }
    }
}

/// Ensures `remote_id` is an empty folder, migrating its content into a new
/// `<name><suffix>` sibling otherwise.
pub async fn adopt_folder<E>(
    gdrive: &Gdrive<E>,
    remote_id: &RemoteId,
    local: &Path,
    suffix: &str,
) -> Result<Adoption, GsyncError>
where
    E: TransferExecutor,
{
    if !gdrive.is_directory(remote_id).await? {
        return Err(GsyncError::NotADirectory(remote_id.clone()));
    }

    let children = gdrive.list_children(remote_id).await?;
    if children.is_empty() {
        info!("{} is empty, using it as is", remote_id);
        return Ok(Adoption::Ready(remote_id.clone()));
    }
    info!(
        "{} holds {} entries, migrating to a new folder",
        remote_id,
        children.len()
    );

    let remote = gdrive.info(remote_id).await?;
    let name = remote.name().ok_or_else(|| GsyncError::MissingAttribute {
        id: remote_id.clone(),
        attribute: "Name",
    })?;
    if !is_single_component(name) {
        return Err(GsyncError::UnusableName {
            id: remote_id.clone(),
            name: name.to_string(),
        });
    }
    let parent = remote.parent().ok_or_else(|| GsyncError::MissingAttribute {
        id: remote_id.clone(),
        attribute: "Parents",
    })?;

    let created = gdrive
        .mkdir(&parent, &format!("{}{}", name, suffix))
        .await?;
    info!("Created {}{} ({})", name, suffix, created);

    let folder = local.to_string_lossy();
    gdrive
        .sync(Direction::Push, &[], &folder, &created)
        .await?;
    gdrive.download_recursive(remote_id, local).await?;
    flatten(local.join(name)).await?;
    gdrive
        .sync(Direction::Push, &[], &folder, &created)
        .await?;

    Ok(Adoption::Migrated {
        original: remote_id.clone(),
        created,
    })
}

/// The download lands in `local/<name>`, so the name must be exactly one
/// plain path component.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

/// Moves everything in `subfolder` up into its parent and removes it.
async fn flatten(subfolder: PathBuf) -> Result<(), GsyncError> {
    tokio::task::spawn_blocking(move || {
        let parent = subfolder.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no parent", subfolder.display()),
            )
        })?;
        merge_into(&subfolder, parent)
    })
    .await
    .map_err(io::Error::other)??;
    Ok(())
}

/// Moves the entries of `src` into `dst`, then removes `src`.
///
/// Directories present on both sides are merged, files from `src` replace
/// files in `dst`. A file meeting a directory is an error.
fn merge_into(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        let is_dir = entry.file_type()?.is_dir();
        match (is_dir, target.is_dir(), target.exists()) {
            (true, true, _) => merge_into(&entry.path(), &target)?,
            (false, true, _) | (true, false, true) => {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!(
                        "cannot move {} over {}",
                        entry.path().display(),
                        target.display()
                    ),
                ))
            }
            _ => std::fs::rename(entry.path(), &target)?,
        }
    }
    std::fs::remove_dir(src)
}
