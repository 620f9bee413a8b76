use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;

/// Compute the SHA-256 fingerprint of a byte slice
pub fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Compute the SHA-256 fingerprint of a file's byte content
pub async fn compute_file_hash(path: &Path) -> Result<String, std::io::Error> {
    let content = fs::read(path).await?;
    Ok(compute_hash(&content))
}
