//! Structural comparison of two folder trees.

use crate::drive::DriveClient;
use crate::error::DriveError;
use crate::retry::Backoff;
use crate::walk;
use futures::future::BoxFuture;
use log::warn;

/// Checks whether two folder trees are structurally identical: same names,
/// same kinds, same sizes for regular files, recursively. Native-format
/// documents (Docs, Sheets, ...) have no stable byte size and are exempt
/// from the size check. A mismatch is a normal `false`, not an error.
///
/// Children are paired positionally after sorting both sides by name, which
/// assumes sibling names are unique; Drive does not enforce that, so
/// duplicate-named siblings make the pairing ambiguous.
pub async fn folders_identical(
    client: &dyn DriveClient,
    backoff: &Backoff,
    folder_a: &str,
    folder_b: &str,
) -> Result<bool, DriveError> {
    compare_pair(client, backoff, folder_a.to_owned(), folder_b.to_owned()).await
}

fn compare_pair<'a>(
    client: &'a dyn DriveClient,
    backoff: &'a Backoff,
    folder_a: String,
    folder_b: String,
) -> BoxFuture<'a, Result<bool, DriveError>> {
    Box::pin(async move {
        let mut left = walk::list_children(client, backoff, &folder_a).await?;
        let mut right = walk::list_children(client, backoff, &folder_b).await?;
        left.sort_by(|x, y| x.name.cmp(&y.name));
        right.sort_by(|x, y| x.name.cmp(&y.name));

        if left.len() != right.len() {
            warn!(
                "child count mismatch: {} has {} entries, {} has {}",
                folder_a,
                left.len(),
                folder_b,
                right.len()
            );
            return Ok(false);
        }

        for (l, r) in left.iter().zip(right.iter()) {
            if l.name != r.name {
                warn!("name mismatch: {:?} vs {:?}", l.name, r.name);
                return Ok(false);
            }
            if l.kind() != r.kind() {
                warn!("kind mismatch for {:?}: {} vs {}", l.name, l.mime_type, r.mime_type);
                return Ok(false);
            }
            if l.is_folder() {
                if !compare_pair(client, backoff, l.id.clone(), r.id.clone()).await? {
                    return Ok(false);
                }
            } else if !l.is_native_format() && l.size != r.size {
                warn!(
                    "size mismatch for {:?}: {:?} vs {:?}",
                    l.name, l.size, r.size
                );
                return Ok(false);
            }
        }

        Ok(true)
    })
}
