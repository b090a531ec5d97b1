//! Integration tests for the edit script cleanup passes.
//!
//! Each case feeds a hand-built script through one pass and checks the exact
//! script that comes out.

use diff::{
    Edit, cleanup_efficiency, cleanup_merge, cleanup_semantic, cleanup_semantic_lossless,
};

fn merged(mut edits: Vec<Edit>) -> Vec<Edit> {
    cleanup_merge(&mut edits);
    edits
}

fn lossless(mut edits: Vec<Edit>) -> Vec<Edit> {
    cleanup_semantic_lossless(&mut edits);
    edits
}

fn semantic(mut edits: Vec<Edit>) -> Vec<Edit> {
    cleanup_semantic(&mut edits);
    edits
}

fn efficient(mut edits: Vec<Edit>, edit_cost: usize) -> Vec<Edit> {
    cleanup_efficiency(&mut edits, edit_cost);
    edits
}

// ============================================================================
// Merge
// ============================================================================

/// Verifies an already normal script is left alone.
#[test]
fn merge_no_change() {
    let edits = vec![Edit::equal("a"), Edit::delete("b"), Edit::insert("c")];
    assert_eq!(merged(edits.clone()), edits);
}

/// Verifies runs of the same operation are joined.
#[test]
fn merge_runs_of_one_kind() {
    assert_eq!(
        merged(vec![Edit::equal("a"), Edit::equal("b"), Edit::equal("c")]),
        [Edit::equal("abc")]
    );
    assert_eq!(
        merged(vec![Edit::delete("a"), Edit::delete("b"), Edit::delete("c")]),
        [Edit::delete("abc")]
    );
    assert_eq!(
        merged(vec![Edit::insert("a"), Edit::insert("b"), Edit::insert("c")]),
        [Edit::insert("abc")]
    );
}

/// Verifies interleaved deletions and insertions are regrouped.
#[test]
fn merge_interweave() {
    assert_eq!(
        merged(vec![
            Edit::delete("a"),
            Edit::insert("b"),
            Edit::delete("c"),
            Edit::insert("d"),
            Edit::equal("e"),
            Edit::equal("f"),
        ]),
        [Edit::delete("ac"), Edit::insert("bd"), Edit::equal("ef")]
    );
}

/// Verifies shared prefixes and suffixes are factored out.
#[test]
fn merge_prefix_and_suffix_detection() {
    assert_eq!(
        merged(vec![Edit::delete("a"), Edit::insert("abc"), Edit::delete("dc")]),
        [
            Edit::equal("a"),
            Edit::delete("d"),
            Edit::insert("b"),
            Edit::equal("c"),
        ]
    );
    assert_eq!(
        merged(vec![
            Edit::equal("x"),
            Edit::delete("a"),
            Edit::insert("abc"),
            Edit::delete("dc"),
            Edit::equal("y"),
        ]),
        [
            Edit::equal("xa"),
            Edit::delete("d"),
            Edit::insert("b"),
            Edit::equal("cy"),
        ]
    );
}

/// Verifies single edits slide to absorb a neighbouring equality.
#[test]
fn merge_slides_edits() {
    assert_eq!(
        merged(vec![Edit::equal("a"), Edit::insert("ba"), Edit::equal("c")]),
        [Edit::insert("ab"), Edit::equal("ac")]
    );
    assert_eq!(
        merged(vec![Edit::equal("c"), Edit::insert("ab"), Edit::equal("a")]),
        [Edit::equal("ca"), Edit::insert("ba")]
    );
}

/// Verifies sliding repeats until nothing moves.
#[test]
fn merge_slides_recursively() {
    assert_eq!(
        merged(vec![
            Edit::equal("a"),
            Edit::delete("b"),
            Edit::equal("c"),
            Edit::delete("ac"),
            Edit::equal("x"),
        ]),
        [Edit::delete("abc"), Edit::equal("acx")]
    );
    assert_eq!(
        merged(vec![
            Edit::equal("x"),
            Edit::delete("ca"),
            Edit::equal("c"),
            Edit::delete("b"),
            Edit::equal("a"),
        ]),
        [Edit::equal("xca"), Edit::delete("cba")]
    );
}

/// Verifies a deletion swallowed by an insertion disappears.
#[test]
fn merge_empty_results() {
    assert_eq!(
        merged(vec![Edit::delete("b"), Edit::insert("ab"), Edit::equal("c")]),
        [Edit::insert("a"), Edit::equal("bc")]
    );
    assert_eq!(
        merged(vec![Edit::equal(""), Edit::insert("a"), Edit::equal("b")]),
        [Edit::insert("a"), Edit::equal("b")]
    );
}

/// Verifies a run that cancels out folds into the equalities around it.
#[test]
fn merge_cancelled_run_joins_equalities() {
    assert_eq!(
        merged(vec![Edit::delete("a"), Edit::insert("a"), Edit::equal("b")]),
        [Edit::equal("ab")]
    );
    assert_eq!(
        merged(vec![
            Edit::equal("x"),
            Edit::delete("a"),
            Edit::insert("a"),
            Edit::equal("y"),
        ]),
        [Edit::equal("xay")]
    );
    assert_eq!(
        merged(vec![
            Edit::insert("ab"),
            Edit::delete("ab"),
            Edit::equal("c"),
            Edit::insert("d"),
        ]),
        [Edit::equal("abc"), Edit::insert("d")]
    );
}

/// Verifies a second merge finds nothing left to do.
#[test]
fn merge_is_stable() {
    let once = merged(vec![
        Edit::equal("x"),
        Edit::delete("ab"),
        Edit::insert("ab"),
        Edit::equal("y"),
        Edit::delete("c"),
        Edit::delete(""),
        Edit::insert("d"),
    ]);
    assert_eq!(merged(once.clone()), once);
    assert_eq!(once, [Edit::equal("xaby"), Edit::delete("c"), Edit::insert("d")]);
}

// ============================================================================
// Semantic Lossless
// ============================================================================

/// Verifies an empty script is left alone.
#[test]
fn lossless_null_case() {
    assert!(lossless(Vec::new()).is_empty());
}

/// Verifies edits prefer to start after a blank line.
#[test]
fn lossless_blank_lines() {
    assert_eq!(
        lossless(vec![
            Edit::equal("AAA\r\n\r\nBBB"),
            Edit::insert("\r\nDDD\r\n\r\nBBB"),
            Edit::equal("\r\nEEE"),
        ]),
        [
            Edit::equal("AAA\r\n\r\n"),
            Edit::insert("BBB\r\nDDD\r\n\r\n"),
            Edit::equal("BBB\r\nEEE"),
        ]
    );
}

/// Verifies edits prefer to start after a line break.
#[test]
fn lossless_line_boundaries() {
    assert_eq!(
        lossless(vec![
            Edit::equal("AAA\r\nBBB"),
            Edit::insert(" DDD\r\nBBB"),
            Edit::equal(" EEE"),
        ]),
        [
            Edit::equal("AAA\r\n"),
            Edit::insert("BBB DDD\r\n"),
            Edit::equal("BBB EEE"),
        ]
    );
}

/// Verifies edits align to whole words.
#[test]
fn lossless_word_boundaries() {
    assert_eq!(
        lossless(vec![
            Edit::equal("The c"),
            Edit::insert("ow and the c"),
            Edit::equal("at."),
        ]),
        [
            Edit::equal("The "),
            Edit::insert("cow and the "),
            Edit::equal("cat."),
        ]
    );
}

/// Verifies punctuation counts as a boundary.
#[test]
fn lossless_alphanumeric_boundaries() {
    assert_eq!(
        lossless(vec![
            Edit::equal("The-c"),
            Edit::insert("ow-and-the-c"),
            Edit::equal("at."),
        ]),
        [
            Edit::equal("The-"),
            Edit::insert("cow-and-the-"),
            Edit::equal("cat."),
        ]
    );
}

/// Verifies sliding to the start of the text consumes the equality.
#[test]
fn lossless_hitting_the_start() {
    assert_eq!(
        lossless(vec![Edit::equal("a"), Edit::delete("a"), Edit::equal("ax")]),
        [Edit::delete("a"), Edit::equal("aax")]
    );
}

/// Verifies sliding to the end of the text consumes the equality.
#[test]
fn lossless_hitting_the_end() {
    assert_eq!(
        lossless(vec![Edit::equal("xa"), Edit::delete("a"), Edit::equal("a")]),
        [Edit::equal("xaa"), Edit::delete("a")]
    );
}

/// Verifies edits prefer to start at a sentence.
#[test]
fn lossless_sentence_boundaries() {
    assert_eq!(
        lossless(vec![
            Edit::equal("The xxx. The "),
            Edit::insert("zzz. The "),
            Edit::equal("yyy."),
        ]),
        [
            Edit::equal("The xxx."),
            Edit::insert(" The zzz."),
            Edit::equal(" The yyy."),
        ]
    );
}

// ============================================================================
// Semantic
// ============================================================================

/// Verifies equalities longer than their neighbouring edits survive.
#[test]
fn semantic_no_elimination() {
    let edits = vec![
        Edit::delete("ab"),
        Edit::insert("cd"),
        Edit::equal("12"),
        Edit::delete("e"),
    ];
    assert_eq!(semantic(edits.clone()), edits);

    let edits = vec![
        Edit::delete("abc"),
        Edit::insert("ABC"),
        Edit::equal("1234"),
        Edit::delete("wxyz"),
    ];
    assert_eq!(semantic(edits.clone()), edits);
}

/// Verifies a short equality between deletions is folded.
#[test]
fn semantic_simple_elimination() {
    assert_eq!(
        semantic(vec![Edit::delete("a"), Edit::equal("b"), Edit::delete("c")]),
        [Edit::delete("abc"), Edit::insert("b")]
    );
}

/// Verifies folding re-examines the equality before the folded one.
#[test]
fn semantic_backpass_elimination() {
    assert_eq!(
        semantic(vec![
            Edit::delete("ab"),
            Edit::equal("cd"),
            Edit::delete("e"),
            Edit::equal("f"),
            Edit::insert("g"),
        ]),
        [Edit::delete("abcdef"), Edit::insert("cdfg")]
    );
}

/// Verifies several equalities can fold in one pass.
#[test]
fn semantic_multiple_eliminations() {
    assert_eq!(
        semantic(vec![
            Edit::insert("1"),
            Edit::equal("A"),
            Edit::delete("B"),
            Edit::insert("2"),
            Edit::equal("_"),
            Edit::insert("1"),
            Edit::equal("A"),
            Edit::delete("B"),
            Edit::insert("2"),
        ]),
        [Edit::delete("AB_AB"), Edit::insert("1A2_1A2")]
    );
}

/// Verifies the lossless pass runs afterwards.
#[test]
fn semantic_word_boundaries() {
    assert_eq!(
        semantic(vec![
            Edit::equal("The c"),
            Edit::delete("ow and the c"),
            Edit::equal("at."),
        ]),
        [
            Edit::equal("The "),
            Edit::delete("cow and the "),
            Edit::equal("cat."),
        ]
    );
}

/// Verifies small overlaps are not pulled out.
#[test]
fn semantic_no_overlap_elimination() {
    let edits = vec![Edit::delete("abcxx"), Edit::insert("xxdef")];
    assert_eq!(semantic(edits.clone()), edits);
}

/// Verifies a deletion tail shared with an insertion head becomes an equality.
#[test]
fn semantic_overlap_elimination() {
    assert_eq!(
        semantic(vec![Edit::delete("abcxxx"), Edit::insert("xxxdef")]),
        [Edit::delete("abc"), Edit::equal("xxx"), Edit::insert("def")]
    );
}

/// Verifies an insertion tail shared with a deletion head swaps the order.
#[test]
fn semantic_reverse_overlap_elimination() {
    assert_eq!(
        semantic(vec![Edit::delete("xxxabc"), Edit::insert("defxxx")]),
        [Edit::insert("def"), Edit::equal("xxx"), Edit::delete("abc")]
    );
}

/// Verifies overlaps are pulled out of every deletion/insertion pair.
#[test]
fn semantic_two_overlap_eliminations() {
    assert_eq!(
        semantic(vec![
            Edit::delete("abcd1212"),
            Edit::insert("1212efghi"),
            Edit::equal("----"),
            Edit::delete("A3"),
            Edit::insert("3BC"),
        ]),
        [
            Edit::delete("abcd"),
            Edit::equal("1212"),
            Edit::insert("efghi"),
            Edit::equal("----"),
            Edit::delete("A"),
            Edit::equal("3"),
            Edit::insert("BC"),
        ]
    );
}

// ============================================================================
// Efficiency
// ============================================================================

/// Verifies an equality as long as the edit cost survives.
#[test]
fn efficiency_no_elimination() {
    let edits = vec![
        Edit::delete("ab"),
        Edit::insert("12"),
        Edit::equal("wxyz"),
        Edit::delete("cd"),
        Edit::insert("34"),
    ];
    assert_eq!(efficient(edits.clone(), 4), edits);
}

/// Verifies a short equality surrounded by four edits is folded.
#[test]
fn efficiency_four_edit_elimination() {
    assert_eq!(
        efficient(
            vec![
                Edit::delete("ab"),
                Edit::insert("12"),
                Edit::equal("xyz"),
                Edit::delete("cd"),
                Edit::insert("34"),
            ],
            4
        ),
        [Edit::delete("abxyzcd"), Edit::insert("12xyz34")]
    );
}

/// Verifies a very short equality surrounded by three edits is folded.
#[test]
fn efficiency_three_edit_elimination() {
    assert_eq!(
        efficient(
            vec![
                Edit::insert("12"),
                Edit::equal("x"),
                Edit::delete("cd"),
                Edit::insert("34"),
            ],
            4
        ),
        [Edit::delete("xcd"), Edit::insert("12x34")]
    );
}

/// Verifies folding cascades backwards.
#[test]
fn efficiency_backpass_elimination() {
    assert_eq!(
        efficient(
            vec![
                Edit::delete("ab"),
                Edit::insert("12"),
                Edit::equal("xy"),
                Edit::insert("34"),
                Edit::equal("z"),
                Edit::delete("cd"),
                Edit::insert("56"),
            ],
            4
        ),
        [Edit::delete("abxyzcd"), Edit::insert("12xy34z56")]
    );
}

/// Verifies a higher edit cost folds longer equalities.
#[test]
fn efficiency_high_cost_elimination() {
    assert_eq!(
        efficient(
            vec![
                Edit::delete("ab"),
                Edit::insert("12"),
                Edit::equal("wxyz"),
                Edit::delete("cd"),
                Edit::insert("34"),
            ],
            5
        ),
        [Edit::delete("abwxyzcd"), Edit::insert("12wxyz34")]
    );
}
