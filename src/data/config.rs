/// How the `checksum` field of a sign record is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ChecksumPolicy {
    /// Pass the checksum through, don't look at it
    #[default]
    Ignore,
    /// Digest the artifact and skip writing the signature on mismatch
    Verify,
}
