use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Hash, Eq, PartialOrd, Ord, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RemoteId(pub String);

impl RemoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteId {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.0)
    }
}

impl From<&str> for RemoteId {
    fn from(value: &str) -> Self {
        RemoteId(value.to_string())
    }
}

/// A registered (local folder, remote folder) association.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SyncPair {
    pub id: i64,
    pub folder: String,
    #[sqlx(rename = "google_id")]
    pub remote_id: RemoteId,
}
