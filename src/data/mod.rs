//! Data structures

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

mod checksum;
mod config;

pub use checksum::*;
pub use config::*;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(String),
    #[error("failed to read manifest: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The result document of a signing request
///
/// ## Encoding
///
/// ```json
/// {
///   "request-id": "...",
///   "file-reference": "quay.io/org/maven-zip@hash",
///   "results": [
///     { "file": "maven-repository/...", "signature": "-----BEGIN PGP SIGNATURE-----...", "checksum": "sha256:..." }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub file_reference: String,
    #[serde(default)]
    pub results: Vec<SignRecord>,
}

/// A single signed file, as reported by the signing service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignRecord {
    /// The path of the file, as seen by the signing service. May carry a prefix before the
    /// repository root name, or no root name at all.
    pub file: String,
    /// The ASCII armored signature.
    pub signature: String,
    #[serde(default)]
    pub checksum: String,
}

impl Manifest {
    pub fn from_slice(data: &[u8]) -> Result<Self, ManifestError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Load a manifest from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.display().to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        Self::from_slice(&data)
    }
}
