use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Reduce a path reported by the signing service to a path relative to the repository root.
///
/// The first segment equal to `root_name` marks the root, everything before it (like a
/// `radas-tmp/` staging prefix) is dropped. A path without such a segment is taken as already
/// relative to the root.
///
/// Returns `None` if the result would be empty, or would leave the repository (absolute paths
/// or `..` segments).
pub fn relative_to_root(file: &str, root_name: &str) -> Option<PathBuf> {
    let components: Vec<_> = Path::new(file).components().collect();

    let start = components
        .iter()
        .position(|c| matches!(c, Component::Normal(name) if *name == OsStr::new(root_name)))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    let mut result = PathBuf::new();
    for component in &components[start..] {
        match component {
            Component::Normal(name) => result.push(name),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                log::debug!("Path leaves the repository: {file}");
                return None;
            }
        }
    }

    if result.as_os_str().is_empty() {
        None
    } else {
        Some(result)
    }
}

/// The location of the detached signature of an artifact.
pub fn signature_path(artifact: &Path) -> PathBuf {
    let mut path = artifact.as_os_str().to_owned();
    path.push(".asc");
    path.into()
}
