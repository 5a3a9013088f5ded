//! End-to-end behavior of the line aligner.

use difff::{AlignConfig, AlignedPair, PairKind, Span, Summary, align, align_with, split_lines};
use difff_testhelpers::setup;

fn kinds(pairs: &[AlignedPair<'_>]) -> Vec<PairKind> {
    pairs.iter().map(AlignedPair::kind).collect()
}

fn left_lines(pairs: &[AlignedPair<'_>]) -> Vec<String> {
    pairs.iter().filter_map(AlignedPair::left_text).collect()
}

fn right_lines(pairs: &[AlignedPair<'_>]) -> Vec<String> {
    pairs.iter().filter_map(AlignedPair::right_text).collect()
}

/// Texts exercising edits, moves within the window, blank lines and
/// whitespace changes.
const CORPUS: &[(&str, &str)] = &[
    ("", ""),
    ("", "only b"),
    ("only a", ""),
    ("\n\n\n", "\n"),
    (
        "fn main() {\n    println!(\"hello\");\n}",
        "fn main() {\n    println!(\"hello, world\");\n    std::process::exit(0);\n}",
    ),
    (
        "alpha\nbeta\ngamma\ndelta\nepsilon",
        "alpha\ngamma\nbeta\ndelta\nzeta\nepsilon",
    ),
    (
        "id\tname\tscore\n1\tann\t10\n2\tbob\t20\n3\tcid\t30",
        "id\tname\tscore\n1\tann\t11\n3\tcid\t30\n4\tdee\t40",
    ),
    (
        "# Title\n\nSome text.\n\n## Section\n\nMore text here.",
        "# New title\n\n\nSome text.\n## Section\n\nMore text there.\nAppendix",
    ),
    ("a\nb\nc\nd\ne\nf", "f\ne\nd\nc\nb\na"),
    ("   \n\t\nx", "x\n   \n\t"),
];

#[test]
fn identity() {
    setup();
    for (text, _) in CORPUS {
        let pairs = align(text, text);
        assert_eq!(pairs.len(), split_lines(text).len());
        assert!(pairs.iter().all(|p| p.kind() == PairKind::Equal));
        assert!(
            pairs
                .iter()
                .flat_map(|p| p.left.iter().chain(p.right.iter()).flatten())
                .all(|span| !span.is_changed())
        );
    }
}

#[test]
fn every_line_appears_once_in_order() {
    setup();
    for (a, b) in CORPUS {
        let pairs = align(a, b);
        assert_eq!(left_lines(&pairs), split_lines(a), "left side of {a:?}");
        assert_eq!(right_lines(&pairs), split_lines(b), "right side of {b:?}");
    }
}

#[test]
fn reconstruction() {
    setup();
    for (a, b) in CORPUS {
        let pairs = align(a, b);
        let a_lines: Vec<_> = split_lines(a);
        let b_lines: Vec<_> = split_lines(b);
        assert_eq!(left_lines(&pairs).join("\n"), a_lines.join("\n"));
        assert_eq!(right_lines(&pairs).join("\n"), b_lines.join("\n"));
    }

    let a = "one\ntwo\nthree";
    let b = "one\n2\nthree\nfour";
    let pairs = align(a, b);
    assert_eq!(left_lines(&pairs).join("\n"), a);
    assert_eq!(right_lines(&pairs).join("\n"), b);
}

#[test]
fn total_coverage() {
    setup();
    for (a, b) in CORPUS {
        let pairs = align(a, b);
        let left = pairs.iter().filter(|p| p.left.is_some()).count();
        let right = pairs.iter().filter(|p| p.right.is_some()).count();
        assert_eq!(left, split_lines(a).len());
        assert_eq!(right, split_lines(b).len());
    }
}

#[test]
fn pure_insertion() {
    setup();
    let pairs = align("", "a\nb\nc");
    assert_eq!(kinds(&pairs), [PairKind::Insert; 3]);
    assert_eq!(right_lines(&pairs), ["a", "b", "c"]);
}

#[test]
fn pure_deletion() {
    setup();
    let pairs = align("a\nb\nc", "");
    assert_eq!(kinds(&pairs), [PairKind::Delete; 3]);
    assert_eq!(left_lines(&pairs), ["a", "b", "c"]);
}

#[test]
fn disjoint_lines_are_replaced() {
    setup();
    let pairs = align("xyz123", "qqq999");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].kind(), PairKind::Replace);
    assert_eq!(pairs[0].left, Some(vec![Span::changed("xyz123")]));
    assert_eq!(pairs[0].right, Some(vec![Span::changed("qqq999")]));
}

#[test]
fn windowed_realignment() {
    setup();
    let pairs = align("a\nb\nc", "z\na\nb\nc");
    assert_eq!(
        pairs,
        vec![
            AlignedPair::insertion("z"),
            AlignedPair::equal("a"),
            AlignedPair::equal("b"),
            AlignedPair::equal("c"),
        ]
    );
}

#[test]
fn threshold_boundary_is_a_match() {
    setup();
    // "abcd" and "abxy" share half of their characters.
    assert_eq!(difff::similarity_ratio("abcd", "abxy"), 0.5);

    let pairs = align("abcd", "zzzz\nabxy");
    assert_eq!(kinds(&pairs), [PairKind::Insert, PairKind::Replace]);
    assert_eq!(pairs[1].left_text().as_deref(), Some("abcd"));
    assert_eq!(pairs[1].right_text().as_deref(), Some("abxy"));
}

#[test]
fn raising_the_threshold_rejects_the_match() {
    setup();
    let config = AlignConfig::default().with_threshold(0.6);
    let pairs = align_with("abcd", "zzzz\nabxy", &config);
    assert_eq!(kinds(&pairs), [PairKind::Replace, PairKind::Insert]);
    assert_eq!(pairs[0].right_text().as_deref(), Some("zzzz"));
}

fn filler(count: usize) -> Vec<String> {
    (0..count).map(|n| n.to_string()).collect()
}

#[test]
fn window_boundary_last_line_inside() {
    setup();
    let mut b = filler(14);
    b.push("target".to_string());
    let b = b.join("\n");

    let pairs = align("target", &b);
    assert_eq!(pairs.len(), 15);
    assert!(pairs[..14].iter().all(|p| p.kind() == PairKind::Insert));
    assert_eq!(pairs[14], AlignedPair::equal("target"));
}

#[test]
fn window_boundary_first_line_outside() {
    setup();
    let mut b = filler(15);
    b.push("target".to_string());
    let b = b.join("\n");

    let pairs = align("target", &b);
    assert_eq!(pairs.len(), 16);
    assert_eq!(pairs[0].kind(), PairKind::Replace);
    assert_eq!(pairs[0].left_text().as_deref(), Some("target"));
    assert_eq!(pairs[0].right_text().as_deref(), Some("0"));
    assert!(pairs[1..].iter().all(|p| p.kind() == PairKind::Insert));
    assert_eq!(pairs[15].right_text().as_deref(), Some("target"));
}

#[test]
fn wider_window_finds_distant_match() {
    setup();
    let mut b = filler(15);
    b.push("target".to_string());
    let b = b.join("\n");

    let config = AlignConfig::default().with_window(16);
    let pairs = align_with("target", &b, &config);
    let summary = Summary::of(&pairs);
    assert_eq!(summary.inserted, 15);
    assert_eq!(summary.equal, 1);
    assert_eq!(pairs.last(), Some(&AlignedPair::equal("target")));
}

#[test]
fn deletion_search_in_a() {
    setup();
    let a = "header\nremoved one\nremoved two\nbody line\nfooter";
    let b = "header\nbody line!\nfooter";
    let pairs = align(a, b);
    assert_eq!(
        kinds(&pairs),
        [
            PairKind::Equal,
            PairKind::Delete,
            PairKind::Delete,
            PairKind::Replace,
            PairKind::Equal,
        ]
    );
    assert_eq!(
        pairs[3].right,
        Some(vec![Span::plain("body line"), Span::changed("!")])
    );
}

#[test]
fn edited_line_in_code() {
    setup();
    let a = "fn main() {\n    let x = 1;\n    println!(\"{x}\");\n}";
    let b = "fn main() {\n    let x = 42;\n    println!(\"{x}\");\n}";
    let pairs = align(a, b);
    assert_eq!(
        kinds(&pairs),
        [
            PairKind::Equal,
            PairKind::Replace,
            PairKind::Equal,
            PairKind::Equal
        ]
    );
    assert_eq!(
        pairs[1].left,
        Some(vec![
            Span::plain("    let x = "),
            Span::changed("1"),
            Span::plain(";"),
        ])
    );
    assert_eq!(
        pairs[1].right,
        Some(vec![
            Span::plain("    let x = "),
            Span::changed("42"),
            Span::plain(";"),
        ])
    );
}

#[test]
fn crlf_and_lf_texts_align() {
    setup();
    let pairs = align("a\r\nb\r\nc\r\n", "a\nb\nc\n");
    assert_eq!(kinds(&pairs), [PairKind::Equal; 3]);
}

#[test]
fn only_blank_lines() {
    setup();
    let pairs = align("\n\n", "  \n");
    assert_eq!(left_lines(&pairs), ["", ""]);
    assert_eq!(right_lines(&pairs), ["  "]);
}

#[test]
fn shared_prefix_similarity_realigns() {
    setup();
    // LCS("dbdca", "dabd") is "dbd": ratio 6/9.
    assert_eq!(difff::similarity_ratio("dbdca", "dabd"), 6.0 / 9.0);

    let pairs = align("dbdca", "zzzz\ndabd");
    assert_eq!(kinds(&pairs), [PairKind::Insert, PairKind::Replace]);
    assert_eq!(pairs[0].right_text().as_deref(), Some("zzzz"));
    assert_eq!(pairs[1].left_text().as_deref(), Some("dbdca"));
    assert_eq!(pairs[1].right_text().as_deref(), Some("dabd"));
}

#[test]
fn equal_ratios_in_both_directions_insert_from_b() {
    setup();
    // Forward in B, "abcd" ~ "abxy"; forward in A, "wxyz" ~ "wxuv". Both 0.5.
    assert_eq!(difff::similarity_ratio("abcd", "abxy"), 0.5);
    assert_eq!(difff::similarity_ratio("wxyz", "wxuv"), 0.5);

    let pairs = align("abcd\nwxuv", "wxyz\nabxy");
    assert_eq!(
        kinds(&pairs),
        [PairKind::Insert, PairKind::Replace, PairKind::Delete]
    );
    assert_eq!(pairs[0].right_text().as_deref(), Some("wxyz"));
    assert_eq!(pairs[1].left_text().as_deref(), Some("abcd"));
    assert_eq!(pairs[1].right_text().as_deref(), Some("abxy"));
    assert_eq!(pairs[2].left_text().as_deref(), Some("wxuv"));

    let pairs = align("p\nq", "q\np");
    assert_eq!(
        pairs,
        vec![
            AlignedPair::insertion("q"),
            AlignedPair::equal("p"),
            AlignedPair::deletion("q"),
        ]
    );
}

#[test]
fn long_lines_align() {
    setup();
    let a: String = (0..1000).map(|n| format!("{{\"id\":{n},\"ok\":true}}")).collect();
    let b = a.replacen("\"id\":500,\"ok\":true", "\"id\":500,\"ok\":false", 1);
    assert!(a.len() > 5000);

    let text_a = format!("header\n{a}");
    let text_b = format!("header\n{b}");
    let pairs = align(&text_a, &text_b);
    assert_eq!(kinds(&pairs), [PairKind::Equal, PairKind::Replace]);
    assert_eq!(pairs[1].left_text(), Some(a));
    assert_eq!(pairs[1].right_text(), Some(b));
}
