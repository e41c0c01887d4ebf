use crate::error::DriveError;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// Prefix shared by Docs, Sheets, Slides and the other Drive-native types.
/// Those have no stable byte size, so they are exempt from size comparison.
const NATIVE_PREFIX: &str = "application/vnd.google-apps";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One file or folder record as returned by the Drive API.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default, deserialize_with = "size_field")]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_time: Option<String>,
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        if self.mime_type == FOLDER_MIME {
            EntryKind::Folder
        } else {
            EntryKind::File
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == EntryKind::Folder
    }

    pub fn is_native_format(&self) -> bool {
        !self.is_folder() && self.mime_type.starts_with(NATIVE_PREFIX)
    }
}

/// One page of a folder listing.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FileList {
    pub files: Vec<Entry>,
    pub next_page_token: Option<String>,
}

// Drive serializes `size` as a decimal string.
fn size_field<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => s.parse().map(Some).map_err(D::Error::custom),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("size is not a non-negative integer")),
        Some(other) => Err(D::Error::custom(format!("unexpected size value: {}", other))),
    }
}

/// The four remote operations everything else is built on.
///
/// `list_children_page` returns a single page; full pagination lives in
/// [`crate::walk::list_children`]. Every call may fail transiently (rate
/// limiting) or permanently (permission, not found).
#[async_trait]
pub trait DriveClient: Send + Sync {
    async fn list_children_page(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<FileList, DriveError>;

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<Entry, DriveError>;

    async fn copy_file(
        &self,
        file_id: &str,
        name: &str,
        parent_id: &str,
    ) -> Result<Entry, DriveError>;

    async fn get_metadata(&self, file_id: &str) -> Result<Entry, DriveError>;
}
