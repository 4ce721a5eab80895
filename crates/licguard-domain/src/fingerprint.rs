use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an incompatible dependency edge.
///
/// Identity fields:
/// - check_id
/// - code
/// - parent full path
/// - child name (artifact basename or slot name)
/// - child license
pub fn fingerprint_for_edge(
    check_id: &str,
    code: &str,
    parent_path: &str,
    child_name: &str,
    child_license: &str,
) -> String {
    let canonical = [check_id, code, parent_path, child_name, child_license].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_hex_sha256_and_field_sensitive() {
        let a = fingerprint_for_edge("c", "x", "/usr/bin/app", "libbar", "GPL");
        let b = fingerprint_for_edge("c", "x", "/usr/bin/app", "libbar", "LGPL");
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
        assert_eq!(a, fingerprint_for_edge("c", "x", "/usr/bin/app", "libbar", "GPL"));
    }
}
