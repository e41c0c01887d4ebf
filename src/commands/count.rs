//! Counting reports over a folder tree: direct children, full recursive
//! counts, and the flat item total used to size copy progress.

use crate::drive::DriveClient;
use crate::error::DriveError;
use crate::retry::Backoff;
use crate::walk;
use futures::future::BoxFuture;

/// Files vs. folders in a (sub)tree, accumulated bottom-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeCounts {
    pub file_count: u64,
    pub folder_count: u64,
}

impl TreeCounts {
    /// Files plus folders. Always derived, never stored, so the two counts
    /// cannot drift apart.
    pub fn total(&self) -> u64 {
        self.file_count + self.folder_count
    }
}

/// Counts the immediate children of `folder_id`. No recursion.
pub async fn shallow_count(
    client: &dyn DriveClient,
    backoff: &Backoff,
    folder_id: &str,
) -> Result<TreeCounts, DriveError> {
    let children = walk::list_children(client, backoff, folder_id).await?;
    let mut counts = TreeCounts::default();
    for child in &children {
        if child.is_folder() {
            counts.folder_count += 1;
        } else {
            counts.file_count += 1;
        }
    }
    Ok(counts)
}

/// Counts every descendant of `folder_id`: the folder's own shallow counts
/// plus the recursive counts of each direct subfolder. The root itself is
/// not included in `folder_count`.
pub async fn recursive_count(
    client: &dyn DriveClient,
    backoff: &Backoff,
    folder_id: &str,
) -> Result<TreeCounts, DriveError> {
    count_subtree(client, backoff, folder_id.to_owned()).await
}

fn count_subtree<'a>(
    client: &'a dyn DriveClient,
    backoff: &'a Backoff,
    folder_id: String,
) -> BoxFuture<'a, Result<TreeCounts, DriveError>> {
    Box::pin(async move {
        let children = walk::list_children(client, backoff, &folder_id).await?;
        let mut counts = TreeCounts::default();
        for child in children {
            if child.is_folder() {
                counts.folder_count += 1;
                let sub = count_subtree(client, backoff, child.id).await?;
                counts.file_count += sub.file_count;
                counts.folder_count += sub.folder_count;
            } else {
                counts.file_count += 1;
            }
        }
        Ok(counts)
    })
}

/// Counts every descendant node (files and folders alike) in one pass.
/// The copier runs this to completion before copying anything, since the
/// progress display needs the full total up front.
pub async fn total_items(
    client: &dyn DriveClient,
    backoff: &Backoff,
    folder_id: &str,
) -> Result<u64, DriveError> {
    let mut total = 0u64;
    let mut bump = |_: &crate::drive::Entry| total += 1;
    walk::walk(client, backoff, folder_id.to_owned(), &mut bump).await?;
    Ok(total)
}

/// The `count` command: direct children of one folder.
pub async fn print_shallow_report(
    client: &dyn DriveClient,
    backoff: &Backoff,
    folder_id: &str,
) -> Result<(), DriveError> {
    let counts = shallow_count(client, backoff, folder_id).await?;
    println!("Files at the root of {}: {}", folder_id, counts.file_count);
    println!("Folders at the root of {}: {}", folder_id, counts.folder_count);
    Ok(())
}

/// The `report` command: recursive counts per top-level subfolder, then
/// totals for the whole tree.
pub async fn print_recursive_report(
    client: &dyn DriveClient,
    backoff: &Backoff,
    folder_id: &str,
) -> Result<(), DriveError> {
    let children = walk::list_children(client, backoff, folder_id).await?;
    let mut totals = TreeCounts::default();
    for child in &children {
        if child.is_folder() {
            let sub = recursive_count(client, backoff, &child.id).await?;
            println!(
                "  {}/: {} files, {} folders",
                child.name, sub.file_count, sub.folder_count
            );
            totals.file_count += sub.file_count;
            totals.folder_count += sub.folder_count + 1;
        } else {
            totals.file_count += 1;
        }
    }
    println!("Total files (recursive): {}", totals.file_count);
    println!("Total nested folders: {}", totals.folder_count);
    println!("Total items: {}", totals.total());
    Ok(())
}
