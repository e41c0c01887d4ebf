use crate::error::DriveError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn token_path() -> Result<String, DriveError> {
    let home = std::env::var("HOME").map_err(|_| DriveError::Auth("HOME is not set".to_owned()))?;
    Ok(format!("{}/.dtree_token", home))
}

/// Returns a bearer token for the Drive API.
///
/// Reads the token from `~/.dtree_token` if present; otherwise prompts once
/// on stdin and saves the pasted token for later runs. Obtaining the token
/// itself (the OAuth dance) is the provider console's problem, not ours.
pub async fn get_token() -> Result<String, DriveError> {
    let path = token_path()?;
    if let Ok(data) = tokio::fs::read(&path).await {
        let token = String::from_utf8(data)
            .map_err(|e| DriveError::Auth(format!("{} is not valid UTF-8: {}", path, e)))?;
        let token = token.trim().to_owned();
        if token.is_empty() {
            return Err(DriveError::Auth(format!("{} is empty", path)));
        }
        Ok(token)
    } else {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(b"Paste a Drive API access token here: ")
            .await
            .map_err(|e| DriveError::Auth(e.to_string()))?;
        stdout.flush().await.map_err(|e| DriveError::Auth(e.to_string()))?;

        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .map_err(|e| DriveError::Auth(e.to_string()))?;
        let token = buf.trim().to_owned();
        if token.is_empty() {
            return Err(DriveError::Auth("no token provided".to_owned()));
        }
        tokio::fs::write(&path, &token)
            .await
            .map_err(|e| DriveError::Auth(format!("could not save {}: {}", path, e)))?;
        Ok(token)
    }
}
