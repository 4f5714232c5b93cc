use crate::data::Manifest;
use anyhow::Context;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Options {
    pub manifest: PathBuf,
}

pub(crate) fn run(options: Options) -> anyhow::Result<()> {
    let manifest = Manifest::from_path(&options.manifest)
        .with_context(|| format!("loading {}", options.manifest.display()))?;

    println!("Request: {}", manifest.request_id);
    println!("Reference: {}", manifest.file_reference);
    println!("Results (#{}):", manifest.results.len());
    for (i, record) in manifest.results.iter().enumerate() {
        println!("  {i: >3}: {}", record.file);
        println!("       Checksum: {}", record.checksum);
    }

    Ok(())
}
