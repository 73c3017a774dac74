// Property tests for variant generation over generated readings.

use std::collections::HashSet;

use proptest::prelude::*;
use quantum_sushi::{MAX_VARIANTS, VariantCache, generate_variants};

const PIECES: &[&str] = &[
    "a", "i", "u", "e", "o", "ka", "shi", "tsu", "chi", "fu", "ji", "n", "nn", "-", "kk", "tt",
    "ss", "pp", "nya", "ryo", "sha", "kyu", "wo", "ye", "fa", "xa", "dhi", "ltu",
];

fn reading_from_pieces() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 1..8).prop_map(|v| v.concat())
}

fn check(reading: &str) -> Result<(), TestCaseError> {
    let v = generate_variants(reading);
    prop_assert!(!v.is_empty());
    prop_assert_eq!(&v[0], reading);
    prop_assert!(v.len() <= MAX_VARIANTS);

    let unique: HashSet<&String> = v.iter().collect();
    prop_assert_eq!(unique.len(), v.len());

    for s in v.iter() {
        prop_assert!(
            s.chars().all(|c| c.is_ascii_lowercase() || c == '-' || c == '\''),
            "unexpected character in '{}'",
            s
        );
    }

    // cached, and identical to a fresh computation
    let again = generate_variants(reading);
    prop_assert_eq!(&v[..], &again[..]);
    let fresh = VariantCache::new().variants(reading);
    prop_assert_eq!(&v[..], &fresh[..]);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn syllable_readings_hold_invariants(reading in reading_from_pieces()) {
        check(&reading)?;
    }

    #[test]
    fn arbitrary_readings_hold_invariants(reading in "[a-z-]{1,12}") {
        check(&reading)?;
    }

    #[test]
    fn anything_yields_something(reading in "\\PC{0,8}") {
        let v = generate_variants(&reading);
        prop_assert!(v.iter().any(|s| *s == reading));
    }
}
