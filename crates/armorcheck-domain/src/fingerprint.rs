use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a field finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - policy name
/// - rule priority (`policy` for policy-level findings)
/// - field path, plus the element index for sequence elements
/// - `doc<N>` when the describe call returned several documents
pub fn fingerprint_for_field(
    check_id: &str,
    code: &str,
    policy: &str,
    priority: Option<u32>,
    field: &str,
    index: Option<usize>,
    doc_index: Option<usize>,
) -> String {
    let subject = priority
        .map(|p| p.to_string())
        .unwrap_or_else(|| "policy".to_string());
    let mut parts = vec![check_id.to_string(), code.to_string(), policy.to_string(), subject];
    parts.push(field.to_string());
    if let Some(i) = index {
        parts.push(i.to_string());
    }
    if let Some(d) = doc_index {
        parts.push(format!("doc{d}"));
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
