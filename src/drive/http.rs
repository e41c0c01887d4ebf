use super::{DriveClient, Entry, FileList, FOLDER_MIME};
use crate::error::DriveError;
use async_trait::async_trait;
use serde_json::json;

const BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, size, modifiedTime)";
const ENTRY_FIELDS: &str = "id, name, mimeType, size, modifiedTime";
const PAGE_SIZE: &str = "1000";

/// [`DriveClient`] backed by the Drive v3 REST API.
pub struct HttpDrive {
    client: reqwest::Client,
    token: String,
}

impl HttpDrive {
    pub fn new(token: String) -> Self {
        HttpDrive {
            client: reqwest::Client::new(),
            token,
        }
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = status.as_u16();
    // Drive reports quota exhaustion as 403 as well as 429.
    if code == 429 || code == 403 {
        Err(DriveError::RateLimited { status: code })
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(DriveError::Api {
            status: code,
            message,
        })
    }
}

#[async_trait]
impl DriveClient for HttpDrive {
    async fn list_children_page(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<FileList, DriveError> {
        let query = format!("'{}' in parents and trashed=false", folder_id);
        let mut params = vec![
            ("q", query.as_str()),
            ("fields", LIST_FIELDS),
            ("pageSize", PAGE_SIZE),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        let response = self
            .client
            .get(format!("{}/files", BASE_URL))
            .bearer_auth(&self.token)
            .query(&params)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<Entry, DriveError> {
        let body = json!({
            "name": name,
            "mimeType": FOLDER_MIME,
            "parents": [parent_id],
        });
        let response = self
            .client
            .post(format!("{}/files", BASE_URL))
            .bearer_auth(&self.token)
            .query(&[("fields", ENTRY_FIELDS)])
            .json(&body)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn copy_file(
        &self,
        file_id: &str,
        name: &str,
        parent_id: &str,
    ) -> Result<Entry, DriveError> {
        let body = json!({
            "name": name,
            "parents": [parent_id],
        });
        let response = self
            .client
            .post(format!("{}/files/{}/copy", BASE_URL, file_id))
            .bearer_auth(&self.token)
            .query(&[("fields", ENTRY_FIELDS)])
            .json(&body)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn get_metadata(&self, file_id: &str) -> Result<Entry, DriveError> {
        let response = self
            .client
            .get(format!("{}/files/{}", BASE_URL, file_id))
            .bearer_auth(&self.token)
            .query(&[("fields", ENTRY_FIELDS)])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}
