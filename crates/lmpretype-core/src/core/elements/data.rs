use phf::{OrderedMap, phf_ordered_map};

/// Reference atomic masses (amu) and atomic numbers of the supported elements.
///
/// Iteration order is significant: mass identification returns the first entry
/// within tolerance.
#[rustfmt::skip]
pub static ELEMENT_DATA: OrderedMap<&'static str, (f64, u8)> = phf_ordered_map! {
    "H"  => (1.008, 1),
    "He" => (4.003, 2),
    "C"  => (12.011, 6),
    "N"  => (14.007, 7),
    "O"  => (15.999, 8),
    "Al" => (26.982, 13),
    "Ti" => (47.867, 22),
    "Cr" => (51.996, 24),
    "Fe" => (55.845, 26),
    "Ni" => (58.693, 28),
    "Cu" => (63.546, 29),
    "Mo" => (95.95, 42),
    "W"  => (183.84, 74),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_data_preserves_declaration_order() {
        let symbols: Vec<_> = ELEMENT_DATA.keys().copied().collect();
        assert_eq!(symbols.first(), Some(&"H"));
        assert_eq!(symbols.last(), Some(&"W"));
        assert_eq!(symbols.len(), 13);
    }

    #[test]
    fn element_data_is_sorted_by_atomic_number() {
        let numbers: Vec<u8> = ELEMENT_DATA.values().map(|&(_, z)| z).collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn element_data_lookup_by_symbol() {
        assert_eq!(ELEMENT_DATA.get("Fe"), Some(&(55.845, 26)));
        assert!(ELEMENT_DATA.get("Xx").is_none());
    }
}
