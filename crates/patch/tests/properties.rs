//! Property tests for patch construction, the text format and application.

use patch::{Patcher, from_text, to_text};
use proptest::prelude::*;

fn text_char() -> impl Strategy<Value = char> {
    prop_oneof![
        Just('a'),
        Just('b'),
        Just('c'),
        Just('d'),
        Just(' '),
        Just('\n'),
        Just('%'),
        Just('\u{e9}'),
        Just('\u{1f600}'),
    ]
}

fn text() -> impl Strategy<Value = String> {
    proptest::collection::vec(text_char(), 0..80).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn text_format_round_trips(a in text(), b in text()) {
        let patches = Patcher::default().make_from_texts(&a, &b);
        let parsed = from_text(&to_text(&patches)).unwrap();
        prop_assert_eq!(parsed, patches);
    }

    #[test]
    fn patches_reproduce_destination(a in text(), b in text()) {
        let patcher = Patcher::default();
        let patches = patcher.make_from_texts(&a, &b);
        let (text, results) = patcher.apply(&patches, &a);
        prop_assert_eq!(text, b);
        prop_assert!(results.iter().all(|&ok| ok));
    }

    #[test]
    fn lengths_match_edit_text(a in text(), b in text()) {
        let patcher = Patcher::default();
        let mut patches = patcher.make_from_texts(&a, &b);
        patcher.split_max(&mut patches);
        for patch in &patches {
            prop_assert_eq!(patch.length1, patch.source_text().chars().count());
            prop_assert_eq!(patch.length2, patch.destination_text().chars().count());
        }
    }

    #[test]
    fn apply_leaves_patches_untouched(a in text(), b in text(), target in text()) {
        let patcher = Patcher::default();
        let patches = patcher.make_from_texts(&a, &b);
        let before = patches.clone();
        let _ = patcher.apply(&patches, &target);
        prop_assert_eq!(patches, before);
    }
}
