//! In-memory stand-in for the Drive API, with configurable page size and
//! failure injection. Test support only.

use super::{DriveClient, Entry, FileList, FOLDER_MIME};
use crate::error::DriveError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub(crate) struct FakeDrive {
    page_size: usize,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    entries: HashMap<String, Entry>,
    children: HashMap<String, Vec<String>>,
    next_id: u64,
    // op key -> remaining rate-limit failures before the call succeeds
    transient: HashMap<String, u32>,
    // file ids whose copy always fails permanently
    broken: HashSet<String>,
}

impl State {
    fn alloc_id(&mut self) -> String {
        self.next_id += 1;
        format!("id{}", self.next_id)
    }

    fn rate_limit_hit(&mut self, key: &str) -> bool {
        match self.transient.get_mut(key) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        }
    }
}

impl FakeDrive {
    pub fn new(page_size: usize) -> Self {
        let mut state = State::default();
        state.children.insert("root".to_owned(), Vec::new());
        FakeDrive {
            page_size,
            state: Mutex::new(state),
        }
    }

    pub fn add_folder(&self, parent_id: &str, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.alloc_id();
        let entry = Entry {
            id: id.clone(),
            name: name.to_owned(),
            mime_type: FOLDER_MIME.to_owned(),
            size: None,
            modified_time: None,
        };
        state.entries.insert(id.clone(), entry);
        state.children.entry(parent_id.to_owned()).or_default().push(id.clone());
        state.children.entry(id.clone()).or_default();
        id
    }

    pub fn add_file(&self, parent_id: &str, name: &str, mime_type: &str, size: Option<u64>) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.alloc_id();
        let entry = Entry {
            id: id.clone(),
            name: name.to_owned(),
            mime_type: mime_type.to_owned(),
            size,
            modified_time: None,
        };
        state.entries.insert(id.clone(), entry);
        state.children.entry(parent_id.to_owned()).or_default().push(id.clone());
        id
    }

    pub fn set_size(&self, id: &str, size: Option<u64>) {
        let mut state = self.state.lock().unwrap();
        state.entries.get_mut(id).unwrap().size = size;
    }

    /// Makes the call identified by `key` (e.g. `"list:<folder>"`,
    /// `"copy:<file>"`, `"create:<parent>"`) fail with 429 `times` times.
    pub fn fail_transiently(&self, key: &str, times: u32) {
        self.state.lock().unwrap().transient.insert(key.to_owned(), times);
    }

    pub fn break_copy(&self, file_id: &str) {
        self.state.lock().unwrap().broken.insert(file_id.to_owned());
    }
}

fn not_found(id: &str) -> DriveError {
    DriveError::Api {
        status: 404,
        message: format!("File not found: {}", id),
    }
}

fn rate_limited() -> DriveError {
    DriveError::RateLimited { status: 429 }
}

#[async_trait]
impl DriveClient for FakeDrive {
    async fn list_children_page(
        &self,
        folder_id: &str,
        page_token: Option<&str>,
    ) -> Result<FileList, DriveError> {
        let mut state = self.state.lock().unwrap();
        if state.rate_limit_hit(&format!("list:{}", folder_id)) {
            return Err(rate_limited());
        }
        let ids = state
            .children
            .get(folder_id)
            .ok_or_else(|| not_found(folder_id))?
            .clone();
        let offset: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let files: Vec<Entry> = ids
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|id| state.entries[id].clone())
            .collect();
        let next_page_token = if offset + self.page_size < ids.len() {
            Some((offset + self.page_size).to_string())
        } else {
            None
        };
        Ok(FileList {
            files,
            next_page_token,
        })
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<Entry, DriveError> {
        {
            let mut state = self.state.lock().unwrap();
            if state.rate_limit_hit(&format!("create:{}", parent_id)) {
                return Err(rate_limited());
            }
            if !state.children.contains_key(parent_id) {
                return Err(not_found(parent_id));
            }
        }
        let id = self.add_folder(parent_id, name);
        let state = self.state.lock().unwrap();
        Ok(state.entries[&id].clone())
    }

    async fn copy_file(
        &self,
        file_id: &str,
        name: &str,
        parent_id: &str,
    ) -> Result<Entry, DriveError> {
        let mut state = self.state.lock().unwrap();
        if state.rate_limit_hit(&format!("copy:{}", file_id)) {
            return Err(rate_limited());
        }
        if state.broken.contains(file_id) {
            return Err(DriveError::Api {
                status: 404,
                message: format!("File not copyable: {}", file_id),
            });
        }
        let source = state.entries.get(file_id).ok_or_else(|| not_found(file_id))?.clone();
        let id = state.alloc_id();
        let copied = Entry {
            id: id.clone(),
            name: name.to_owned(),
            ..source
        };
        state.entries.insert(id.clone(), copied.clone());
        state.children.entry(parent_id.to_owned()).or_default().push(id);
        Ok(copied)
    }

    async fn get_metadata(&self, file_id: &str) -> Result<Entry, DriveError> {
        let mut state = self.state.lock().unwrap();
        if state.rate_limit_hit(&format!("get:{}", file_id)) {
            return Err(rate_limited());
        }
        state.entries.get(file_id).cloned().ok_or_else(|| not_found(file_id))
    }
}
