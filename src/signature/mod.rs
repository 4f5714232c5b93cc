use crate::data::{Checksum, ChecksumPolicy, Manifest, ManifestError, SignRecord};
use crate::utils::writer::{FsWriter, SignatureWriter};
use std::path::{Path, PathBuf};

pub mod digest;
pub mod path;

/// Options for applying signatures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub checksum: ChecksumPolicy,
}

/// The result of applying signatures to a repository
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignOutcome {
    /// Artifacts for which no signature file could be written
    pub failed: Vec<PathBuf>,
    /// Signature files which have been written
    pub generated: Vec<PathBuf>,
}

impl SignOutcome {
    pub fn is_empty(&self) -> bool {
        self.failed.is_empty() && self.generated.is_empty()
    }
}

/// A sign record, matched to an existing artifact
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedSignature<'m> {
    pub record: &'m SignRecord,
    pub artifact: PathBuf,
    pub signature: PathBuf,
}

/// Load the manifest, treating a missing or broken one as "nothing to do".
pub fn load_manifest(source: &Path) -> Option<Manifest> {
    match Manifest::from_path(source) {
        Ok(manifest) => {
            log::info!(
                "Loaded manifest - request: {}, reference: {}, results: {}",
                manifest.request_id,
                manifest.file_reference,
                manifest.results.len()
            );
            Some(manifest)
        }
        Err(ManifestError::NotFound(path)) => {
            log::info!("No sign results found at {path}, nothing to do");
            None
        }
        Err(err) => {
            log::warn!("Ignoring sign results from {}: {err}", source.display());
            None
        }
    }
}

/// Match the records of a manifest against the artifacts of the repository.
///
/// Records which don't resolve to an existing file below `repository` are skipped.
pub fn plan<'m>(
    repository: &Path,
    root_name: &str,
    manifest: &'m Manifest,
) -> Vec<PlannedSignature<'m>> {
    let mut result = Vec::new();

    for record in &manifest.results {
        let relative = match path::relative_to_root(&record.file, root_name) {
            Some(relative) => relative,
            None => {
                log::debug!("Not an artifact of the repository: {}", record.file);
                continue;
            }
        };

        let artifact = repository.join(relative);
        if !artifact.is_file() {
            log::debug!(
                "Artifact not found, skipping: {} ({})",
                record.file,
                artifact.display()
            );
            continue;
        }

        let signature = path::signature_path(&artifact);
        result.push(PlannedSignature {
            record,
            artifact,
            signature,
        });
    }

    result
}

/// Apply the sign results at `manifest_source` to the repository, using the file system.
pub fn apply(
    repository: impl AsRef<Path>,
    root_name: &str,
    manifest_source: impl AsRef<Path>,
    options: ApplyOptions,
) -> SignOutcome {
    Applier::new(FsWriter)
        .with_options(options)
        .apply(repository, root_name, manifest_source)
}

/// Check the artifact against the record's checksum, according to `policy`.
///
/// Unparsable checksums and unreadable artifacts count as a mismatch.
pub fn checksum_ok(policy: ChecksumPolicy, planned: &PlannedSignature) -> bool {
    if policy == ChecksumPolicy::Ignore {
        return true;
    }

    let checksum: Checksum = match planned.record.checksum.parse() {
        Ok(checksum) => checksum,
        Err(err) => {
            log::warn!("Unable to verify {}: {err}", planned.artifact.display());
            return false;
        }
    };

    match digest::verify_checksum(&planned.artifact, &checksum) {
        Ok(true) => true,
        Ok(false) => {
            log::warn!(
                "Checksum mismatch - artifact: {}, expected: {checksum}",
                planned.artifact.display()
            );
            false
        }
        Err(err) => {
            log::warn!("Failed to digest {}: {err}", planned.artifact.display());
            false
        }
    }
}

/// Writes detached signature files for the matched records of a manifest.
pub struct Applier<W: SignatureWriter> {
    writer: W,
    options: ApplyOptions,
}

impl<W: SignatureWriter> Applier<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            options: Default::default(),
        }
    }

    pub fn with_options(mut self, options: ApplyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn apply(
        &self,
        repository: impl AsRef<Path>,
        root_name: &str,
        manifest_source: impl AsRef<Path>,
    ) -> SignOutcome {
        match load_manifest(manifest_source.as_ref()) {
            Some(manifest) => self.apply_manifest(repository, root_name, &manifest),
            None => SignOutcome::default(),
        }
    }

    /// Apply an already loaded manifest.
    ///
    /// Failures are tracked per record, processing always continues with the next record.
    pub fn apply_manifest(
        &self,
        repository: impl AsRef<Path>,
        root_name: &str,
        manifest: &Manifest,
    ) -> SignOutcome {
        let mut outcome = SignOutcome::default();

        for planned in plan(repository.as_ref(), root_name, manifest) {
            if !checksum_ok(self.options.checksum, &planned) {
                outcome.failed.push(planned.artifact);
                continue;
            }

            match self
                .writer
                .overwrite(&planned.signature, &planned.record.signature)
            {
                Ok(()) => {
                    log::info!("Generated signature: {}", planned.signature.display());
                    outcome.generated.push(planned.signature);
                }
                Err(err) => {
                    log::warn!(
                        "Failed to write signature {}: {err}",
                        planned.signature.display()
                    );
                    outcome.failed.push(planned.artifact);
                }
            }
        }

        outcome
    }
}
