//! Pure value transformation between the scan and the re-load.

use std::collections::BTreeMap;

/// Returns a new mapping with every value upper-cased and every key
/// unchanged.
///
/// Uses Rust's locale-invariant Unicode case mapping. Pure: no side
/// effects, no error conditions, and idempotent on already-upper-cased
/// input.
pub fn uppercase_values(data: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    data.iter()
        .map(|(row_key, value)| (row_key.clone(), value.to_uppercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_values_are_uppercased_keys_untouched() {
        let out = uppercase_values(&mapping(&[("k1", "v1"), ("K2", "mixed Case")]));
        assert_eq!(out, mapping(&[("k1", "V1"), ("K2", "MIXED CASE")]));
    }

    #[test]
    fn test_key_set_and_size_preserved() {
        let input = mapping(&[("a", "x"), ("b", "y"), ("c", "z")]);
        let out = uppercase_values(&input);
        assert_eq!(out.len(), input.len());
        assert!(out.keys().eq(input.keys()));
    }

    #[test]
    fn test_idempotent_on_uppercased_input() {
        let input = mapping(&[("k1", "already"), ("k2", "Löss")]);
        let once = uppercase_values(&input);
        let twice = uppercase_values(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_mapping() {
        assert!(uppercase_values(&BTreeMap::new()).is_empty());
    }
}
