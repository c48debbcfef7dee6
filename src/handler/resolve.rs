//! Request path resolution
//!
//! Maps a URL path onto a canonical file path under the served root.

use crate::error::ResolveError;
use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `request_path` against `root` after removing the `base_path` context.
///
/// `root` must already be canonical. Any `..` in the relative path is
/// rejected before the filesystem is touched, and the canonical result must
/// still lie under `root`.
pub fn resolve(request_path: &str, base_path: &str, root: &Path) -> Result<PathBuf, ResolveError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ResolveError::InvalidEncoding(request_path.to_string()))?;

    // No filesystem accepts NUL inside a path
    if decoded.contains('\0') {
        return Err(ResolveError::InvalidEncoding(request_path.to_string()));
    }

    let relative =
        strip_base(&decoded, base_path).ok_or_else(|| ResolveError::OutsideContext {
            path: decoded.to_string(),
            base: base_path.to_string(),
        })?;

    if relative.contains("..") {
        return Err(ResolveError::Traversal(relative.to_string()));
    }

    // A leading slash would make the join replace the root entirely
    let joined = root.join(relative.trim_start_matches('/'));
    let canonical = canonicalize_lenient(&joined).map_err(|e| ResolveError::Unresolvable {
        path: joined.display().to_string(),
        reason: e.to_string(),
    })?;

    if !canonical.starts_with(root) {
        return Err(ResolveError::Escape(canonical.display().to_string()));
    }

    Ok(canonical)
}

/// Remove the base context from a request path.
///
/// The root context strips exactly the leading slash; any other context
/// strips its prefix plus one separator.
fn strip_base<'a>(path: &'a str, base_path: &str) -> Option<&'a str> {
    if base_path == "/" {
        return path.strip_prefix('/');
    }

    let rest = path.strip_prefix(base_path)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Canonicalize a path whose trailing components may not exist yet.
///
/// The deepest existing ancestor is canonicalized and the missing
/// components are appended to it.
pub fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<Component<'_>> = Vec::new();

    let mut canonical = loop {
        match existing.canonicalize() {
            Ok(p) => break p,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                let (Some(last), Some(parent)) = (existing.components().next_back(), existing.parent())
                else {
                    return Err(e);
                };
                missing.push(last);
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    };

    for component in missing.iter().rev() {
        match component {
            Component::Normal(name) => canonical.push(name),
            Component::ParentDir => {
                canonical.pop();
            }
            _ => {}
        }
    }

    Ok(canonical)
}
