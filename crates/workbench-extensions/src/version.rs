//! Semantic version comparison for the `outdated` flag.
//!
//! Versions are compared with `semver`. Gallery and manifest versions are
//! not always strict semver, so `major.minor` strings get a `.0` patch and a
//! leading `v` is dropped before parsing.
//!
//! ```
//! use workbench_extensions::version::is_newer;
//!
//! assert!(is_newer("1.10.0", "1.9.3"));
//! assert!(is_newer("2.1", "2.0.9"));
//! assert!(!is_newer("1.0.0", "1.0.0"));
//! assert!(!is_newer("garbage", "1.0.0"));
//! ```

/// Return `true` if `candidate` is semantically greater than `current`.
///
/// Either side failing to parse yields `false`.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match (parse_lenient(candidate), parse_lenient(current)) {
        (Some(candidate), Some(current)) => candidate > current,
        (candidate_parsed, current_parsed) => {
            tracing::warn!(
                candidate,
                current,
                candidate_ok = candidate_parsed.is_some(),
                current_ok = current_parsed.is_some(),
                "Unparseable version, treating as not newer"
            );
            false
        }
    }
}

/// Parse a version string, tolerating a `v` prefix and a missing patch.
///
/// - `"3.12"` -> `3.12.0`
/// - `"v1.2.3"` -> `1.2.3`
/// - `"3"` -> `None`
pub fn parse_lenient(s: &str) -> Option<semver::Version> {
    let s = s.trim();
    let s = s.strip_prefix('v').unwrap_or(s);

    if let Ok(v) = semver::Version::parse(s) {
        return Some(v);
    }

    semver::Version::parse(&format!("{s}.0")).ok()
}
