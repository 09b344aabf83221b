use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive member name against an extraction root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedPath {
    pub original: String,
    pub relative: String,
    pub resolved: PathBuf,
}

/// Collapse a slash-delimited member name into a relative path.
///
/// Empty and `.` segments are dropped. A `..` segment removes the last
/// segment collected so far; with nothing collected it is dropped, so the
/// result never climbs above the archive root. The output never starts
/// with `/` and never contains a `..` segment.
pub fn normalize(name: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();

    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }

    stack.join("/")
}

/// Resolve `name` under `root`.
///
/// Returns `None` when the name normalizes to nothing, since such a member
/// would target the root itself, or when a segment is not a plain file name
/// on this platform (a drive prefix or backslash separators on Windows).
pub fn sanitize_member(name: &str, root: &Path) -> Option<SanitizedPath> {
    let relative = normalize(name);
    if relative.is_empty() {
        return None;
    }

    let mut resolved = root.to_path_buf();
    for segment in relative.split('/') {
        if !is_plain_segment(segment) {
            return None;
        }
        resolved.push(segment);
    }

    Some(SanitizedPath {
        original: name.to_owned(),
        relative,
        resolved,
    })
}

/// A segment that joins onto a path as exactly one normal component.
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Archive member name for a filesystem path.
///
/// Root and drive prefixes are dropped and the remainder is normalized,
/// so absolute and `./`-prefixed inputs produce the same relative names.
pub fn member_name(path: &Path) -> Result<String> {
    let mut segments = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => segments.push(".."),
            Component::Normal(part) => segments.push(part.to_str().ok_or_else(|| {
                Error::NonUtf8Path {
                    path: path.to_path_buf(),
                }
            })?),
        }
    }

    Ok(normalize(&segments.join("/")))
}
