use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{models::sync_pair::RemoteId, FOLDER_MIME};

const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Attributes of a remote file as printed by `gdrive info`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct RemoteInfo(pub BTreeMap<String, String>);

impl RemoteInfo {
    /// Parses `key: value` lines. Lines without a colon are ignored, so
    /// garbage output yields an empty or partial map rather than an error.
    pub fn parse(output: &str) -> Self {
        let attributes = output
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        RemoteInfo(attributes)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("Name")
    }

    pub fn mime(&self) -> Option<&str> {
        self.get("Mime")
    }

    pub fn view_url(&self) -> Option<&str> {
        self.get("ViewUrl")
    }

    /// First parent id. gdrive joins multiple parents with commas.
    pub fn parent(&self) -> Option<RemoteId> {
        self.get("Parents")
            .and_then(|parents| parents.split(',').map(str::trim).find(|p| !p.is_empty()))
            .map(RemoteId::from)
    }

    pub fn is_directory(&self) -> bool {
        self.mime() == Some(FOLDER_MIME)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for RemoteInfo {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (key, value) in self.0.iter() {
            writeln!(fmt, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

/// One row of a `gdrive list` child listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub id: RemoteId,
    pub name: String,
    pub kind: String,
    pub size: Option<u64>,
    pub created: Option<NaiveDateTime>,
}

impl RemoteEntry {
    /// Parses one whitespace-delimited listing row.
    ///
    /// Rows read `id name type [size] date time`. Names may contain
    /// whitespace, so the id is taken from the left, the fixed columns
    /// from the right, and the name is what remains in between. Runs of
    /// whitespace inside a name collapse to one space.
    pub fn parse_row(line: &str) -> Option<Self> {
        let columns: Vec<&str> = line.split_whitespace().collect();
        let len = columns.len();
        if len < 5 {
            return None;
        }
        let (date, time) = (columns[len - 2], columns[len - 1]);
        let (kind_at, size) = match columns[len - 3].parse::<u64>() {
            Ok(size) if len >= 6 => (len - 4, Some(size)),
            _ => (len - 3, None),
        };
        let created = NaiveDateTime::parse_from_str(&format!("{} {}", date, time), CREATED_FORMAT).ok();
        Some(RemoteEntry {
            id: RemoteId::from(columns[0]),
            name: columns[1..kind_at].join(" "),
            kind: columns[kind_at].to_string(),
            size,
            created,
        })
    }

    /// Parses every non-blank row. The first row that cannot be read is
    /// returned as the error.
    pub fn parse_listing(output: &str) -> Result<Vec<Self>, &str> {
        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Self::parse_row(line).ok_or(line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOLDER_INFO: &str = "Id: 0B1abc\n\
        Name: Photos\n\
        Path: Photos\n\
        Mime: application/vnd.google-apps.folder\n\
        Created: 2018-03-01 10:11:12\n\
        Parents: 0Broot\n\
        ViewUrl: https://drive.google.com/drive/folders/0B1abc\n";

    #[test]
    fn info_parses_key_value_lines() {
        let info = RemoteInfo::parse(FOLDER_INFO);
        assert_eq!(info.name(), Some("Photos"));
        assert_eq!(info.parent(), Some(RemoteId::from("0Broot")));
        assert_eq!(
            info.view_url(),
            Some("https://drive.google.com/drive/folders/0B1abc")
        );
        assert_eq!(info.get("Created"), Some("2018-03-01 10:11:12"));
        assert!(info.is_directory());
    }

    #[test]
    fn info_ignores_malformed_lines() {
        let info = RemoteInfo::parse("Failed to get file: googleapi: Error 404\nnonsense\n");
        assert_eq!(info.get("Failed to get file"), Some("googleapi: Error 404"));
        assert!(!info.is_directory());

        assert!(RemoteInfo::parse("no colons here\n\n").is_empty());
    }

    #[test]
    fn info_picks_first_of_many_parents() {
        let info = RemoteInfo::parse("Parents: 0Bfirst, 0Bsecond\n");
        assert_eq!(info.parent(), Some(RemoteId::from("0Bfirst")));
    }

    #[test]
    fn file_mime_is_not_a_directory() {
        let info = RemoteInfo::parse("Id: 0Bfile\nMime: image/jpeg\n");
        assert!(!info.is_directory());
    }

    #[test]
    fn listing_handles_rows_with_and_without_size() {
        let output = "0Bdir    holiday   dir          2018-01-02 03:04:05\n\
                      0Bfile   notes.txt bin   1024   2018-02-03 04:05:06\n";
        let entries = RemoteEntry::parse_listing(output).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].id, RemoteId::from("0Bdir"));
        assert_eq!(entries[0].kind, "dir");
        assert_eq!(entries[0].size, None);
        assert_eq!(
            entries[0].created,
            NaiveDateTime::parse_from_str("2018-01-02 03:04:05", CREATED_FORMAT).ok()
        );

        assert_eq!(entries[1].name, "notes.txt");
        assert_eq!(entries[1].size, Some(1024));
    }

    #[test]
    fn listing_keeps_names_with_spaces() {
        let output = "0Bkid   My Holiday Photos   dir   2018-01-01 00:00:00\n\
                      0Bdoc   Q3 report  final.pdf   bin   2048   2018-02-03 04:05:06\n\
                      0Bnum   take 2   dir   2018-01-01 00:00:00\n";
        let entries = RemoteEntry::parse_listing(output).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].id, RemoteId::from("0Bkid"));
        assert_eq!(entries[0].name, "My Holiday Photos");
        assert_eq!(entries[0].kind, "dir");
        assert_eq!(entries[0].size, None);

        assert_eq!(entries[1].name, "Q3 report final.pdf");
        assert_eq!(entries[1].kind, "bin");
        assert_eq!(entries[1].size, Some(2048));

        assert_eq!(entries[2].name, "take 2");
        assert_eq!(entries[2].kind, "dir");
    }

    #[test]
    fn listing_rejects_unknown_layouts() {
        let output = "\n0Bfile a.txt bin 12 2018-02-03 04:05:06\n0Bx only three\n";
        assert_eq!(RemoteEntry::parse_listing(output), Err("0Bx only three"));
    }

    #[test]
    fn empty_listing_has_no_entries() {
        assert_eq!(RemoteEntry::parse_listing(""), Ok(Vec::new()));
    }
}
