use crate::models::sync_pair::RemoteId;

#[derive(thiserror::Error, Debug)]
pub enum GsyncError {
    #[error("{message}")]
    Usage {
        message: String,
        usage: &'static str,
    },
    #[error("remote file {id} not found: {reason}")]
    RemoteNotFound { id: RemoteId, reason: String },
    #[error("remote file {0} is not a directory")]
    NotADirectory(RemoteId),
    #[error("gdrive reported no {attribute} for {id}")]
    MissingAttribute {
        id: RemoteId,
        attribute: &'static str,
    },
    #[error("remote folder {id} has a name unusable as a local folder: {name:?}")]
    UnusableName { id: RemoteId, name: String },
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {}", exit_description(.code))]
    CommandFailed { command: String, code: Option<i32> },
    #[error("unexpected output from `{command}`: {output}")]
    UnexpectedOutput { command: String, output: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid configuration file: {0}")]
    ConfigFile(#[from] toml::de::Error),
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("database migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl GsyncError {
    pub fn usage(message: impl Into<String>, usage: &'static str) -> Self {
        GsyncError::Usage {
            message: message.into(),
            usage,
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}
