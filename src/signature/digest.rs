use crate::data::{Checksum, ChecksumAlgorithm};
use digest::{Digest, Output};
use log::Level::Debug;
use sha2::{Sha256, Sha384, Sha512};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024;

/// Create a digest of a file's content.
pub fn digest_file<D: Digest>(path: &Path) -> io::Result<Output<D>> {
    let mut file = File::open(path)?;
    let mut digest = D::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let len = file.read(&mut buffer)?;
        if len == 0 {
            break;
        }
        digest.update(&buffer[..len]);
    }

    Ok(digest.finalize())
}

/// Check if the content of the artifact matches the expected checksum.
pub fn verify_checksum(path: &Path, checksum: &Checksum) -> io::Result<bool> {
    let actual = match checksum.algorithm {
        ChecksumAlgorithm::Sha256 => digest_file::<Sha256>(path)?.to_vec(),
        ChecksumAlgorithm::Sha384 => digest_file::<Sha384>(path)?.to_vec(),
        ChecksumAlgorithm::Sha512 => digest_file::<Sha512>(path)?.to_vec(),
    };

    if log::log_enabled!(Debug) {
        log::debug!(
            "Digested {} - {}, expected: {}",
            path.display(),
            base16::encode_lower(&actual),
            base16::encode_lower(&checksum.value)
        );
    }

    Ok(actual == checksum.value)
}
