//! Paginated listing and depth-first traversal of a remote folder tree.

use crate::drive::{DriveClient, Entry};
use crate::error::DriveError;
use crate::retry::{with_backoff, Backoff};
use futures::future::BoxFuture;

/// Lists every direct child of `folder_id`, following continuation tokens
/// until the listing is exhausted. Each page fetch is retry-wrapped. The
/// child set is only complete once the last page has been consumed; treating
/// a single page as the full listing silently drops entries in large folders.
pub async fn list_children(
    client: &dyn DriveClient,
    backoff: &Backoff,
    folder_id: &str,
) -> Result<Vec<Entry>, DriveError> {
    let mut entries = Vec::new();
    let mut page_token: Option<String> = None;
    loop {
        let token = page_token.as_deref();
        let page = with_backoff("list children", backoff, || {
            client.list_children_page(folder_id, token)
        })
        .await?;
        entries.extend(page.files);
        match page.next_page_token {
            Some(next) => page_token = Some(next),
            None => break,
        }
    }
    Ok(entries)
}

/// Depth-first walk over every descendant of `folder_id`, calling `visit`
/// exactly once per entry. Sibling order is whatever the listing returns.
/// The walk is intentionally sequential; recursion depth equals tree depth
/// and folders cannot be their own ancestor, so no cycle check is needed.
pub fn walk<'a>(
    client: &'a dyn DriveClient,
    backoff: &'a Backoff,
    folder_id: String,
    visit: &'a mut (dyn FnMut(&Entry) + Send),
) -> BoxFuture<'a, Result<(), DriveError>> {
    Box::pin(async move {
        let children = list_children(client, backoff, &folder_id).await?;
        for child in children {
            visit(&child);
            if child.is_folder() {
                walk(client, backoff, child.id.clone(), &mut *visit).await?;
            }
        }
        Ok(())
    })
}
