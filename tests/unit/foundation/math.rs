use super::*;

#[test]
fn fnv_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"plan");
    a.write_bytes(b"viz");
    assert_eq!(a.finish(), fnv1a64_str("planviz"));
    // Reference value of FNV-1a 64 for the empty input.
    assert_eq!(fnv1a64_str(""), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn numeric_suffix_parses_trailing_digits() {
    assert_eq!(numeric_suffix("peg3"), 3);
    assert_eq!(numeric_suffix("d12"), 12);
    assert_eq!(numeric_suffix("disk"), 0);
    assert_eq!(numeric_suffix(""), 0);
    assert_eq!(numeric_suffix("a1b2"), 2);
}
