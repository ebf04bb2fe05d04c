use serde::{Deserialize, Serialize};

pub mod adopt;
pub mod config;
pub mod error;
pub mod executor;
pub mod gdrive;
pub mod models;
pub mod registry;
pub mod runner;

pub use error::GsyncError;

/// MIME type gdrive reports for folders.
pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// Which way a bulk sync moves data.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Push,
    Pull,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
        }
    }

    /// The `gdrive sync` subcommand for this direction.
    pub fn sync_verb(&self) -> &'static str {
        match self {
            Self::Push => "upload",
            Self::Pull => "download",
        }
    }
}
