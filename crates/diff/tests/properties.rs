//! Property tests for the diff engine.
//!
//! Inputs are drawn from a small alphabet with a few multi-byte characters so
//! that shared runs, line breaks and char/byte mismatches all occur often.

use diff::{
    DiffConfig, Differ, Edit, Operation, cleanup_efficiency, cleanup_merge, cleanup_semantic,
    cleanup_semantic_lossless, destination_text, from_delta, levenshtein, source_text, to_delta,
};
use proptest::prelude::*;

fn text_char() -> impl Strategy<Value = char> {
    prop_oneof![
        Just('a'),
        Just('b'),
        Just('c'),
        Just(' '),
        Just('.'),
        Just('\n'),
        Just('\u{e9}'),
        Just('\u{1f600}'),
    ]
}

fn text() -> impl Strategy<Value = String> {
    proptest::collection::vec(text_char(), 0..60).prop_map(|chars| chars.into_iter().collect())
}

fn op() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Equal),
        Just(Operation::Delete),
        Just(Operation::Insert),
    ]
}

fn short_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(text_char(), 0..4).prop_map(|chars| chars.into_iter().collect())
}

/// Hand-built scripts: empty edits, repeated operations and runs where a
/// deletion and an insertion carry the same text.
fn script() -> impl Strategy<Value = Vec<Edit>> {
    let piece = prop_oneof![
        3 => (op(), short_text()).prop_map(|(op, text)| vec![Edit::new(op, text)]),
        1 => short_text().prop_map(|text| vec![Edit::delete(text.clone()), Edit::insert(text)]),
        1 => short_text().prop_map(|text| vec![Edit::insert(text.clone()), Edit::delete(text)]),
    ];
    proptest::collection::vec(piece, 0..12).prop_map(|pieces| pieces.concat())
}

fn is_normalized(edits: &[Edit]) -> bool {
    edits.iter().all(|edit| !edit.text.is_empty())
        && edits.windows(2).all(|pair| pair[0].op != pair[1].op)
}

proptest! {
    #[test]
    fn diff_reconstructs_both_texts(a in text(), b in text(), line_mode in any::<bool>()) {
        let edits = Differ::default().diff(&a, &b, line_mode);
        prop_assert_eq!(source_text(&edits), a);
        prop_assert_eq!(destination_text(&edits), b);
        prop_assert!(is_normalized(&edits));
    }

    #[test]
    fn exact_diff_reconstructs_both_texts(a in text(), b in text()) {
        let differ = Differ::new(DiffConfig::default().without_timeout());
        let edits = differ.diff(&a, &b, false);
        prop_assert_eq!(source_text(&edits), a);
        prop_assert_eq!(destination_text(&edits), b);
    }

    #[test]
    fn identical_texts_have_no_edits(a in text()) {
        let edits = Differ::default().diff(&a, &a, false);
        prop_assert!(edits.iter().all(|edit| edit.op == Operation::Equal));
        prop_assert_eq!(levenshtein(&edits), 0);
    }

    #[test]
    fn merge_is_idempotent(a in text(), b in text()) {
        let mut edits = Differ::default().diff(&a, &b, false);
        let once = edits.clone();
        cleanup_merge(&mut edits);
        prop_assert_eq!(edits, once);
    }

    #[test]
    fn merge_normalizes_any_script(edits in script()) {
        let mut once = edits.clone();
        cleanup_merge(&mut once);
        prop_assert!(is_normalized(&once), "{:?} merged to {:?}", edits, once);
        prop_assert_eq!(source_text(&once), source_text(&edits));
        prop_assert_eq!(destination_text(&once), destination_text(&edits));

        let mut twice = once.clone();
        cleanup_merge(&mut twice);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn cleanups_preserve_texts(a in text(), b in text()) {
        let differ = Differ::default();
        let original = differ.diff(&a, &b, false);

        let mut semantic = original.clone();
        cleanup_semantic(&mut semantic);
        prop_assert_eq!(source_text(&semantic), a.as_str());
        prop_assert_eq!(destination_text(&semantic), b.as_str());

        let mut lossless = original.clone();
        cleanup_semantic_lossless(&mut lossless);
        prop_assert_eq!(source_text(&lossless), a.as_str());
        prop_assert_eq!(destination_text(&lossless), b.as_str());

        let mut efficient = original;
        cleanup_efficiency(&mut efficient, 4);
        prop_assert_eq!(source_text(&efficient), a.as_str());
        prop_assert_eq!(destination_text(&efficient), b.as_str());
    }

    #[test]
    fn delta_round_trips(a in text(), b in text()) {
        let edits = Differ::default().diff(&a, &b, false);
        let delta = to_delta(&edits);
        prop_assert_eq!(from_delta(&a, &delta), Ok(edits));
    }

    #[test]
    fn levenshtein_is_bounded_by_lengths(a in text(), b in text()) {
        let edits = Differ::default().diff(&a, &b, false);
        let distance = levenshtein(&edits);
        prop_assert!(distance <= a.chars().count() + b.chars().count());
    }
}
