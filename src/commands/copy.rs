//! Recursive copy of a folder's full contents into a destination folder,
//! with an upfront item count, per-item progress, and a post-copy parity
//! check against the source.

use super::{compare, count};
use crate::drive::DriveClient;
use crate::error::DriveError;
use crate::retry::{with_backoff, Backoff};
use crate::walk;
use futures::future::BoxFuture;
use log::error;

/// Running totals for one copy run, threaded by reference through the
/// recursion rather than captured by closures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub total_items: u64,
    pub items_copied: u64,
    pub items_failed: u64,
}

#[derive(Debug, Clone)]
pub struct CopyOutcome {
    pub report: CopyReport,
    /// Whether source and destination reached structural parity.
    pub identical: bool,
}

/// Copies everything under `source_id` into `dest_id`.
///
/// A single unresolvable item is logged and skipped; its siblings still get
/// copied, and the final report says how many items actually made it. The
/// copy is not idempotent: re-running against a destination that already
/// holds partial contents duplicates everything.
pub async fn copy_tree(
    client: &dyn DriveClient,
    backoff: &Backoff,
    source_id: &str,
    dest_id: &str,
) -> Result<CopyOutcome, DriveError> {
    for id in [source_id, dest_id] {
        let meta = with_backoff("get metadata", backoff, || client.get_metadata(id)).await?;
        if !meta.is_folder() {
            return Err(DriveError::NotAFolder { id: id.to_owned() });
        }
    }

    println!("Counting total items to copy...");
    let total = count::total_items(client, backoff, source_id).await?;
    println!("Total items to copy: {}", total);

    let mut report = CopyReport {
        total_items: total,
        ..CopyReport::default()
    };

    println!("Starting to copy contents from {} to {}...", source_id, dest_id);
    copy_children(
        client,
        backoff,
        source_id.to_owned(),
        dest_id.to_owned(),
        &mut report,
    )
    .await?;
    println!(
        "{} of {} items copied from {} to {}.",
        report.items_copied, report.total_items, source_id, dest_id
    );

    println!("Checking that the destination matches the source...");
    let identical = compare::folders_identical(client, backoff, source_id, dest_id).await?;
    if identical {
        println!("The folders are identical after copying.");
    } else {
        println!("The folders are NOT identical after copying.");
    }

    Ok(CopyOutcome { report, identical })
}

fn copy_children<'a>(
    client: &'a dyn DriveClient,
    backoff: &'a Backoff,
    source_id: String,
    dest_id: String,
    report: &'a mut CopyReport,
) -> BoxFuture<'a, Result<(), DriveError>> {
    Box::pin(async move {
        // A listing failure here aborts the subtree; the caller decides
        // whether that sinks the whole run (only at the source root).
        let children = walk::list_children(client, backoff, &source_id).await?;
        for child in children {
            if child.is_folder() {
                let created = match with_backoff("create folder", backoff, || {
                    client.create_folder(&child.name, &dest_id)
                })
                .await
                {
                    Ok(entry) => entry,
                    Err(e) => {
                        report.items_failed += 1;
                        error!("failed to create folder {:?}: {}", child.name, e);
                        continue;
                    }
                };
                match copy_children(client, backoff, child.id.clone(), created.id, &mut *report)
                    .await
                {
                    // The folder counts as copied only once its subtree is done.
                    Ok(()) => progress(report),
                    Err(e) => {
                        report.items_failed += 1;
                        error!("failed to copy contents of {:?}: {}", child.name, e);
                    }
                }
            } else {
                match with_backoff("copy file", backoff, || {
                    client.copy_file(&child.id, &child.name, &dest_id)
                })
                .await
                {
                    Ok(_) => progress(report),
                    Err(e) => {
                        report.items_failed += 1;
                        error!("failed to copy {:?}: {}", child.name, e);
                    }
                }
            }
        }
        Ok(())
    })
}

fn progress(report: &mut CopyReport) {
    report.items_copied += 1;
    println!(
        "Progress: {}/{} items copied.",
        report.items_copied, report.total_items
    );
}
