use proptest::prelude::*;
use solidity_ast::extract::line_range;
use solidity_ast::{LineIndex, Offset};

fn offset_strategy() -> impl Strategy<Value = Offset> {
    (0usize..10_000, 0usize..10_000, 0usize..4).prop_map(|(start, length, file)| Offset::new(start, length, file))
}

proptest! {
    #[test]
    fn offset_string_form_round_trips(offset in offset_strategy()) {
        let text = offset.to_string();
        prop_assert_eq!(Offset::parse(&text), Ok(offset));
    }

    #[test]
    fn containment_is_reflexive(offset in offset_strategy()) {
        prop_assert!(offset.contains(&offset));
    }

    #[test]
    fn containment_is_transitive(a in offset_strategy(), b in offset_strategy(), c in offset_strategy()) {
        if a.contains(&b) && b.contains(&c) {
            prop_assert!(a.contains(&c));
        }
    }

    #[test]
    fn containment_requires_same_file(a in offset_strategy(), b in offset_strategy()) {
        if a.file_index != b.file_index {
            prop_assert!(!a.contains(&b));
        }
    }

    #[test]
    fn line_of_matches_newline_count(text in "[a-z\n]{0,200}", byte in 0usize..220) {
        let index = LineIndex::new(&text);
        let byte = byte.min(text.len());
        let expected = 1 + text[..byte].matches('\n').count();
        prop_assert_eq!(index.line_of(byte), expected);
    }

    #[test]
    fn line_range_is_ordered_and_in_bounds(text in "[a-z \n]{1,200}", start in 0usize..200, length in 0usize..50) {
        let start = start.min(text.len());
        let offset = Offset::new(start, length.min(text.len() - start), 0);
        let (first, last) = line_range(&offset, &text).unwrap();
        let total = 1 + text.matches('\n').count();
        prop_assert!(1 <= first && first <= last && last <= total);
    }
}
