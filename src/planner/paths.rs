//! Ancestor and descendant tests over literal path strings
//!
//! Paths are compared as written. Nothing here touches the filesystem or
//! normalizes case, duplicate separators or trailing slashes.

/// Parent directory of `path`, following POSIX `dirname`
///
/// The text before the last `/`, with trailing slashes removed unless the
/// result would become empty. A path without any `/` has the empty string as
/// its parent.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => {
            let head = &path[..=idx];
            let trimmed = head.trim_end_matches('/');
            if trimmed.is_empty() { head } else { trimmed }
        }
        None => "",
    }
}

/// Every path that `path` lies beneath, nearest first
///
/// This is the `dirname` chain up to `/`, together with every literal prefix
/// `p` such that `path == p + "/" + suffix` for a non-empty suffix. The two
/// only disagree on unnormalized input such as `/a//b` or `/a/b/`, and a
/// recursive delete of any of them would remove `path`.
pub fn ancestors(path: &str) -> Vec<&str> {
    let mut found = Vec::new();

    let mut current = path;
    loop {
        let parent = parent_dir(current);
        if parent.is_empty() || parent == current {
            break;
        }
        found.push(parent);
        current = parent;
    }

    for (idx, byte) in path.bytes().enumerate().rev() {
        if byte == b'/' && idx > 0 && idx + 1 < path.len() {
            let prefix = &path[..idx];
            if !found.contains(&prefix) {
                found.push(prefix);
            }
        }
    }

    found
}

/// Whether `ancestor` is one of [`ancestors`] of `path`
#[cfg(test)]
pub fn is_ancestor(ancestor: &str, path: &str) -> bool {
    ancestors(path).contains(&ancestor)
}
