//! Content hash of a project description.

use sha2::{Digest, Sha256};

use crate::schema::Project;

/// SHA-256 of the project's canonical JSON form, as lowercase hex. Two
/// projects hash alike exactly when they describe the same synthesis.
pub fn project_hash(project: &Project) -> String {
    let mut hasher = Sha256::new();
    let json = serde_json::to_string(project).unwrap_or_default();
    hasher.update(json.as_bytes());
    format!("{:x}", hasher.finalize())
}
