use crate::data::ChecksumPolicy;
use crate::signature::{self, checksum_ok, load_manifest, plan, ApplyOptions};
use anyhow::bail;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Options {
    pub repository: PathBuf,
    pub manifest: PathBuf,
    pub root_name: String,
    pub checksum: ChecksumPolicy,
    pub dry_run: bool,
    pub strict: bool,
}

pub(crate) fn run(options: Options) -> anyhow::Result<()> {
    log::info!(
        "Applying signatures - repository: {}, root: {}, checksum: {:?}",
        options.repository.display(),
        options.root_name,
        options.checksum
    );

    if !options.repository.is_dir() {
        log::warn!(
            "Repository directory does not exist: {}",
            options.repository.display()
        );
    }

    if options.dry_run {
        for (file, signature) in dry_run(&options) {
            println!("{file} -> {}", signature.display());
        }
        return Ok(());
    }

    let outcome = signature::apply(
        &options.repository,
        &options.root_name,
        &options.manifest,
        ApplyOptions {
            checksum: options.checksum,
        },
    );

    if outcome.is_empty() {
        log::info!("No matching artifacts, nothing signed");
    }

    for generated in &outcome.generated {
        println!("{}", generated.display());
    }
    for failed in &outcome.failed {
        log::warn!("Failed to apply signature for: {}", failed.display());
    }

    log::info!(
        "Generated {} signature(s), {} failed",
        outcome.generated.len(),
        outcome.failed.len()
    );

    if options.strict && !outcome.failed.is_empty() {
        bail!("Failed to apply {} signature(s)", outcome.failed.len());
    }

    Ok(())
}

/// Collect the signatures which would be written, including the checksum check.
fn dry_run(options: &Options) -> Vec<(String, PathBuf)> {
    let manifest = match load_manifest(&options.manifest) {
        Some(manifest) => manifest,
        None => return vec![],
    };

    plan(&options.repository, &options.root_name, &manifest)
        .into_iter()
        .filter(|planned| checksum_ok(options.checksum, planned))
        .map(|planned| (planned.record.file.clone(), planned.signature))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use sha2::{Digest, Sha256};
    use std::fs;
    use tempfile::TempDir;

    const ROOT: &str = "maven-repository";

    fn setup() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// A repository with two artifacts, and a manifest signing both
    fn fixture(checksum: &str) -> (TempDir, Options) {
        let dir = tempfile::tempdir().unwrap();
        let repository = dir.path().join(ROOT);
        for version in ["1.0", "2.0"] {
            let path = repository.join(format!("foo/bar/{version}"));
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join(format!("foo-bar-{version}.jar")), "dummy").unwrap();
        }

        let manifest = dir.path().join("result.json");
        let data = serde_json::json!({
            "request-id": "request-id",
            "file-reference": "quay.io/org/maven-zip@hash",
            "results": [
                {
                    "file": "maven-repository/foo/bar/1.0/foo-bar-1.0.jar",
                    "signature": "signature1",
                    "checksum": checksum,
                },
                {
                    "file": "radas-tmp/maven-repository/foo/bar/2.0/foo-bar-2.0.jar",
                    "signature": "signature2",
                    "checksum": "sha256:sha256-content",
                },
            ]
        });
        fs::write(&manifest, data.to_string()).unwrap();

        let options = Options {
            repository,
            manifest,
            root_name: ROOT.to_string(),
            checksum: ChecksumPolicy::Ignore,
            dry_run: false,
            strict: false,
        };

        (dir, options)
    }

    fn asc(options: &Options, version: &str) -> PathBuf {
        options
            .repository
            .join(format!("foo/bar/{version}/foo-bar-{version}.jar.asc"))
    }

    fn read_asc(options: &Options, version: &str) -> String {
        fs::read_to_string(asc(options, version)).unwrap()
    }

    #[test]
    fn test_run() {
        setup();

        let (_dir, options) = fixture("sha256:sha256-content");
        run(options.clone()).unwrap();

        assert_eq!(read_asc(&options, "1.0"), "signature1");
        assert_eq!(read_asc(&options, "2.0"), "signature2");
    }

    #[test]
    fn test_partial_failure() {
        setup();

        let (_dir, options) = fixture("sha256:sha256-content");
        // a directory in place of the signature file fails the write
        fs::create_dir_all(asc(&options, "1.0")).unwrap();

        run(options.clone()).unwrap();
        assert_eq!(read_asc(&options, "2.0"), "signature2");

        let strict = Options {
            strict: true,
            ..options
        };
        assert!(run(strict).is_err());
    }

    #[test]
    fn test_strict_without_failures() {
        setup();

        let (_dir, options) = fixture("sha256:sha256-content");
        let options = Options {
            strict: true,
            ..options
        };

        run(options).unwrap();
    }

    #[test]
    fn test_missing_manifest() {
        setup();

        let (dir, options) = fixture("sha256:sha256-content");
        fs::remove_file(dir.path().join("result.json")).unwrap();
        let options = Options {
            strict: true,
            ..options
        };

        run(options.clone()).unwrap();
        assert!(!asc(&options, "1.0").exists());
    }

    #[test]
    fn test_dry_run() {
        setup();

        let (_dir, options) = fixture("sha256:sha256-content");
        let options = Options {
            dry_run: true,
            ..options
        };

        assert_eq!(
            dry_run(&options),
            vec![
                (
                    "maven-repository/foo/bar/1.0/foo-bar-1.0.jar".to_string(),
                    asc(&options, "1.0")
                ),
                (
                    "radas-tmp/maven-repository/foo/bar/2.0/foo-bar-2.0.jar".to_string(),
                    asc(&options, "2.0")
                ),
            ]
        );

        run(options.clone()).unwrap();
        assert!(!asc(&options, "1.0").exists());
        assert!(!asc(&options, "2.0").exists());
    }

    #[test]
    fn test_dry_run_verifies_checksum() {
        setup();

        let checksum = format!(
            "sha256:{}",
            base16::encode_lower(&Sha256::digest(b"dummy"))
        );
        let (_dir, options) = fixture(&checksum);
        let options = Options {
            checksum: ChecksumPolicy::Verify,
            dry_run: true,
            ..options
        };

        let planned = dry_run(&options);

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].1, asc(&options, "1.0"));
    }
}
