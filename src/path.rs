//! Path validation and decomposition (C1).
//!
//! A path is a `/`-separated, `/`-terminated sequence of components over `[a-z]`. This module
//! is a direct port of the source implementation's `split_path`, `make_path_to_parent`,
//! `longest_common_path`, `remove_prefix`, `is_subdirectory` and `make_map_contents_string`,
//! using owned `String`s and `Option`/tuple returns in place of C's out-parameters.

use itertools::Itertools;

/// Longest a single path component (the text between two `/`) may be.
pub const MAX_COMPONENT_LEN: usize = 64;
/// Longest a whole path string may be.
pub const MAX_PATH_LEN: usize = 4096;

/// The root path.
pub const ROOT: &str = "/";

/// Overridable validation limits, so tests can probe near-limit behavior without recompiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_component_len: usize,
    pub max_path_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_component_len: MAX_COMPONENT_LEN,
            max_path_len: MAX_PATH_LEN,
        }
    }
}

/// Is `component` a nonempty string of length within limit over `[a-z]`?
fn is_valid_component(component: &str, limits: &Limits) -> bool {
    !component.is_empty()
        && component.len() <= limits.max_component_len
        && component.bytes().all(|b| b.is_ascii_lowercase())
}

/// §3: is `p` a valid path under `limits`?
pub fn is_valid(p: &str, limits: &Limits) -> bool {
    if p.len() > limits.max_path_len {
        return false;
    }
    if !p.starts_with('/') || !p.ends_with('/') {
        return false;
    }
    // `p` is "/c1/c2/.../cn/"; splitting on '/' yields ["", c1, c2, ..., cn, ""].
    let parts: Vec<&str> = p.split('/').collect();
    if parts.len() < 2 {
        return false;
    }
    let middle = &parts[1..parts.len() - 1];
    if p == ROOT {
        return middle.is_empty();
    }
    !middle.is_empty() && middle.iter().all(|c| is_valid_component(c, limits))
}

/// Advance one component from the front of `subpath` (which must start and end with `/`).
///
/// Returns `Some((component, remaining))` where `remaining` again starts and ends with `/`, or
/// `None` if `subpath` is `/` (no further component — mirrors `split_path`'s `NULL` return).
pub fn split(subpath: &str) -> Option<(String, String)> {
    debug_assert!(subpath.starts_with('/') && subpath.ends_with('/'));
    if subpath == ROOT {
        return None;
    }
    let rest = &subpath[1..];
    let end = rest.find('/').expect("subpath must be '/'-terminated");
    let component = rest[..end].to_string();
    let remaining = rest[end..].to_string();
    Some((component, remaining))
}

/// Decompose `p` into `(path_to_parent, last_component)`.
///
/// Must not be called with `p == "/"` — the root has no parent.
pub fn parent_of(p: &str) -> (String, String) {
    debug_assert!(p != ROOT, "parent_of must not be called on the root path");
    debug_assert!(p.starts_with('/') && p.ends_with('/'));
    let trimmed = &p[..p.len() - 1]; // drop trailing '/'
    let last_slash = trimmed.rfind('/').expect("path must be absolute");
    let parent = &trimmed[..=last_slash];
    let last = &trimmed[last_slash + 1..];
    (parent.to_string(), last.to_string())
}

/// The deepest path prefix (ending in `/`) common to both `a` and `b`, compared component-wise.
pub fn longest_common_path(a: &str, b: &str) -> String {
    debug_assert!(a.starts_with('/') && a.ends_with('/'));
    debug_assert!(b.starts_with('/') && b.ends_with('/'));
    let a_components: Vec<&str> = a.split('/').filter(|s| !s.is_empty()).collect();
    let b_components: Vec<&str> = b.split('/').filter(|s| !s.is_empty()).collect();
    let common = a_components
        .iter()
        .zip(b_components.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let mut result = String::from("/");
    for c in &a_components[..common] {
        result.push_str(c);
        result.push('/');
    }
    result
}

/// The tail of `p` after stripping `prefix`, short one component (`prefix` must be a prefix of
/// `p`, both `/`-terminated). The slice starts one byte before `prefix` ends, so it keeps
/// `prefix`'s trailing `/` as its own leading `/` — the result always starts and ends with `/`,
/// even when `p == prefix` (in which case the result is `/`).
pub fn remove_prefix<'p>(prefix: &str, p: &'p str) -> &'p str {
    debug_assert!(p.starts_with(prefix), "{prefix:?} is not a prefix of {p:?}");
    &p[prefix.len() - 1..]
}

/// True iff `b` lies inside `a`, including `a == b` (used to reject moving a directory into its
/// own subtree).
pub fn is_subdirectory(a: &str, b: &str) -> bool {
    debug_assert!(a.starts_with('/') && a.ends_with('/'));
    debug_assert!(b.starts_with('/') && b.ends_with('/'));
    b.starts_with(a)
}

/// Comma-joined, lexicographically sorted concatenation of `names`.
///
/// The bare spec leaves the join order "unspecified ... convenient for list"; sorting makes
/// `list`'s output reproducible, which the test suite relies on.
pub fn map_contents_string<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .sorted()
        .join(",")
}
