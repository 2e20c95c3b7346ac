//! Identity key derivation.
//!
//! A graph element's identity is its `id` and nothing else. Ids come from
//! one canonical discriminator: a URI, or a synthesized `{prefix}_{local}`
//! string built from a short identifier. Synthesis is a pure function of
//! its inputs, so two records naming the same entity always agree.

/// Sentinel for a value a source could not provide.
pub const UNAVAILABLE: &str = "N/A";

pub const ENSEMBL_PREFIX: &str = "ensembl";
pub const UNIPROT_PREFIX: &str = "uniprot";
pub const ORGAN_PREFIX: &str = "organ";
pub const PUBCHEM_PREFIX: &str = "pubchem";
pub const PROCESS_PREFIX: &str = "process";
pub const OBJECT_PREFIX: &str = "object";
pub const EXPRESSION_PREFIX: &str = "expression";

const KE_CANONICAL_PREFIX: &str = "aop.events_";

/// Local short id of a URI: the substring after the last `/`, or the whole
/// string when it has no `/`.
pub fn short_id(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(pos) => &uri[pos + 1..],
        None => uri,
    }
}

/// `{prefix}_{local}`.
pub fn synthesize(prefix: &str, local: &str) -> String {
    format!("{prefix}_{local}")
}

/// True for a present, non-empty value that is not the [`UNAVAILABLE`] sentinel.
pub fn is_available(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some(v) if !v.is_empty() && v != UNAVAILABLE)
}

/// Canonical `aop.events_<num>` form of a key event URI or CURIE.
///
/// Accepts `https://identifiers.org/aop.events/12`, `aop.events:12`,
/// `aop.events_12` and a bare `12`.
pub fn canonical_key_event_id(uri: &str) -> String {
    let local = short_id(uri);
    let num = local
        .strip_prefix(KE_CANONICAL_PREFIX)
        .or_else(|| local.strip_prefix("aop.events:"))
        .unwrap_or(local);
    format!("{KE_CANONICAL_PREFIX}{num}")
}
