//! End-to-end tests for the parsing module: source text in, block tree,
//! references and inline trees out.
//!
//! Tree shapes are asserted with inline `insta` snapshots of the text dump.

use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use crate::parsing::{
    ParseOptions, ParsedDoc,
    blocks::{BlockNode, ListState},
    parse_document, parse_document_with, parse_inline_for_block,
    rope::span::Span,
    snapshot::{SnapOptions, dump, dump_with, invariants, normalize},
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parse(src: &str) -> (Rope, ParsedDoc) {
    init();
    let rope = Rope::from(src);
    let doc = parse_document(&rope);
    invariants(&rope, &doc);
    (rope, doc)
}

fn dump_of(src: &str) -> String {
    let (rope, doc) = parse(src);
    dump(&rope, &doc)
}

fn kinds(doc: &ParsedDoc) -> Vec<&'static str> {
    doc.blocks.iter().map(|(_, node)| node.name()).collect()
}

#[test]
fn quote_with_two_markers_holds_one_paragraph() {
    insta::assert_snapshot!(dump_of("> a\n> b\n"), @r#"
    Quote markers=2 lazy
      Paragraph
        | a
        | b
        = "a" soft "b"
    "#);
}

#[test]
fn closed_fence_with_both_markers() {
    let (rope, doc) = parse("```\ncode\n```\n");
    insta::assert_snapshot!(dump(&rope, &doc), @r"
    Fence backticks level=3 closed
      | code
    ");
    let BlockNode::Fence(fence) = doc.blocks.get(doc.blocks.roots()[0]) else {
        panic!("expected a fence");
    };
    assert_eq!(fence.open_marker, Span::new(0, 3));
    assert_eq!(fence.close_marker, Some(Span::new(9, 12)));
}

#[test]
fn blank_line_then_shallow_indent_stays_paragraph_in_item() {
    // min_indent is marker width 1 plus one space = 2, so `    b` sits at
    // relative indent 2, short of the 4 columns indented code needs.
    insta::assert_snapshot!(dump_of("- a\n\n    b\n"), @r#"
    List bullet(-) state=Normal min_indent=2 lazy
      ListItem
        Paragraph closed
          | a
          = "a"
        Paragraph
          | b
          = "b"
    "#);
}

#[test]
fn blank_line_then_deep_indent_is_code_in_item() {
    insta::assert_snapshot!(dump_of("- a\n\n      b\n"), @r#"
    List bullet(-) state=Normal min_indent=2 lazy
      ListItem
        Paragraph closed
          | a
          = "a"
        Code
          | b
    "#);
}

#[test]
fn second_blank_line_closes_list() {
    insta::assert_snapshot!(dump_of("- a\n\n\nb\n"), @r#"
    List bullet(-) state=Closed min_indent=2 lazy
      ListItem
        Paragraph closed
          | a
          = "a"
    Paragraph
      | b
      = "b"
    "#);
}

#[test]
fn list_state_moves_through_blank_lines() {
    let states = |src: &str| {
        let (_, doc) = parse(src);
        doc.blocks
            .iter()
            .find_map(|(_, node)| match node {
                BlockNode::List(l) => Some(l.state),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(states("- a\n"), ListState::Normal);
    assert_eq!(states("- a\n\n"), ListState::FollowedByEmptyLine);
    assert_eq!(states("- a\n\n\n"), ListState::Closed);
    assert_eq!(states("- a\n\n  b\n"), ListState::Normal);
}

#[test]
fn blank_lines_inside_fenced_item_do_not_close_list() {
    insta::assert_snapshot!(dump_of("- ```\n  a\n\n\n  b\n  ```\n"), @r"
    List bullet(-) state=Normal min_indent=2
      ListItem
        Fence backticks level=3 closed
          | a
          |
          |
          | b
    ");
}

#[test]
fn nested_list() {
    insta::assert_snapshot!(dump_of("- a\n  - b\n"), @r#"
    List bullet(-) state=Normal min_indent=2 lazy
      ListItem
        Paragraph
          | a
          = "a"
        List bullet(-) state=Normal min_indent=2 lazy
          ListItem
            Paragraph
              | b
              = "b"
    "#);
}

#[test]
fn fence_inside_quote_blocks_lazy_continuation() {
    insta::assert_snapshot!(dump_of("> ```\n> x\n> ```\nafter\n"), @r#"
    Quote markers=3
      Fence backticks level=3 closed
        | x
    Paragraph
      | after
      = "after"
    "#);
}

#[test]
fn lazy_line_reaches_paragraph_in_list_in_quote() {
    let (_, doc) = parse("> - item\ncontinued\n");
    assert_eq!(kinds(&doc), vec!["Quote", "List", "ListItem", "Paragraph"]);
    let paragraph = doc
        .blocks
        .iter()
        .find_map(|(_, node)| match node {
            BlockNode::Paragraph(p) => Some(p),
            _ => None,
        })
        .unwrap();
    assert_eq!(paragraph.lines.len(), 2);
}

#[test]
fn code_buffers_trailing_blank_lines() {
    insta::assert_snapshot!(dump_of("    a\n\n\n    b\n\n"), @r"
    Code trailing_empty=1
      | a
      |
      |
      | b
    ");
}

#[test]
fn emphasis_across_quote_lines() {
    insta::assert_snapshot!(dump_of("> *a\n> b*\n"), @r#"
    Quote markers=2 lazy
      Paragraph
        | *a
        | b*
        = em1("a" soft "b")
    "#);
}

#[test]
fn header_inline_content() {
    insta::assert_snapshot!(dump_of("# Title *x* #\n"), @r#"
    Header level=1
      | Title *x*
      = "Title " em1("x")
    "#);
}

#[test]
fn first_reference_definition_wins() {
    insta::assert_snapshot!(dump_of("[a]: /first\n[a]: /second\n\n[a]\n"), @r#"
    ReferenceDefinition label=a dest=/first
    ReferenceDefinition label=a dest=/second
    Paragraph
      | [a]
      = link</first>("a")
    [a]: /first
    "#);
}

#[rstest]
#[case("[a](\n/u)\n")]
#[case("[a](/u\n\"t\")\n")]
#[case("> [a](/u\n> \"t\") b\n")]
fn link_tail_across_lines_stays_inside_the_link(#[case] src: &str) {
    let (rope, doc) = parse(src);
    let paragraph = doc
        .blocks
        .iter()
        .find_map(|(id, node)| matches!(node, BlockNode::Paragraph(_)).then_some(id))
        .unwrap();
    let tree = parse_inline_for_block(&rope, &doc, paragraph).unwrap();
    let link = tree.roots()[0];
    let link_span = tree.get(link).span();
    for &root in &tree.roots()[1..] {
        assert!(tree.get(root).span().start >= link_span.end);
    }
}

#[test]
fn link_title_on_next_line() {
    insta::assert_snapshot!(dump_of("[a](/u\n\"t\")\n"), @r#"
    Paragraph
      | [a](/u
      | "t")
      = link</u>("a")
    "#);
}

#[test]
fn inline_merge_of_single_emphasis() {
    let (rope, doc) = parse("a*b*c");
    let tree = parse_inline_for_block(&rope, &doc, doc.blocks.roots()[0]).unwrap();
    let shape: Vec<_> = tree
        .iter()
        .map(|(id, node)| (tree.depth(id), node.span()))
        .collect();
    assert_eq!(
        shape,
        vec![
            (0, Span::new(0, 1)),
            (0, Span::new(1, 4)),
            (1, Span::new(2, 3)),
            (0, Span::new(4, 5)),
        ]
    );
}

#[rstest]
#[case("```\nx\n")]
#[case("    code\n")]
#[case("---\n")]
#[case("> ")]
fn raw_and_structural_blocks_have_no_inline_tree(#[case] src: &str) {
    let (rope, doc) = parse(src);
    for (id, _) in doc.blocks.iter() {
        assert!(parse_inline_for_block(&rope, &doc, id).is_none());
    }
}

#[rstest]
#[case(4, "Code")]
#[case(2, "Paragraph")]
fn tab_width_decides_indented_code(#[case] tab_width: usize, #[case] kind: &str) {
    init();
    let rope = Rope::from("\tx\n");
    let doc = parse_document_with(&rope, &ParseOptions { tab_width });
    assert_eq!(kinds(&doc), vec![kind]);
}

#[test]
fn dump_without_inline_trees() {
    let (rope, doc) = parse("*a*\n");
    let options = SnapOptions {
        inline: false,
        ..SnapOptions::default()
    };
    insta::assert_snapshot!(dump_with(&rope, &doc, &options), @r"
    Paragraph
      | *a*
    ");
}

#[test]
fn every_visible_byte_belongs_to_some_block() {
    let src = "\
# Title

> quote *em*
> - item [link][r]
continued

1. one
2. two

   ```rust
   let x = 1;
   ```

    indented

***
[r]: /target \"T\"
";
    let (_, doc) = parse(src);

    let mut spans = Vec::new();
    for (_, node) in doc.blocks.iter() {
        match node {
            BlockNode::Paragraph(p) => spans.extend(&p.lines),
            BlockNode::Header(h) => {
                spans.push(h.open_marker);
                spans.push(h.text);
                spans.extend(h.close_marker);
            }
            BlockNode::Quote(q) => spans.extend(q.markers.iter().map(|&m| Span::new(m, m + 1))),
            BlockNode::ListItem(item) => spans.push(item.marker),
            BlockNode::List(_) => {}
            BlockNode::Fence(f) => {
                spans.push(f.open_marker);
                spans.push(f.info);
                spans.extend(f.close_marker);
                spans.extend(&f.lines);
            }
            BlockNode::Code(c) => spans.extend(&c.lines),
            BlockNode::ThematicBreak(t) => spans.push(t.span),
            BlockNode::ReferenceDefinition(r) => spans.push(r.span),
        }
    }

    for (pos, byte) in src.bytes().enumerate() {
        if byte.is_ascii_whitespace() {
            continue;
        }
        assert!(
            spans.iter().any(|sp| sp.contains(pos)),
            "byte {pos} ({:?}) is not covered by any block",
            byte as char
        );
    }
    assert_eq!(doc.references.len(), 1);
    assert_eq!(
        doc.references.get("R").map(|d| d.title.as_deref()),
        Some(Some("T"))
    );
}

#[test]
fn snapshot_serializes_to_json() {
    let (rope, doc) = parse("- [x](/u)\n");
    let json = serde_json::to_value(normalize(&rope, &doc)).unwrap();
    assert_eq!(json["blocks"][0]["kind"], "List");
    assert_eq!(json["blocks"][0]["children"][0]["parts"]["marker"][0], 0);
    let inline = &json["blocks"][0]["children"][0]["children"][0]["inline"];
    assert_eq!(inline[0]["kind"], "link");
    assert_eq!(inline[0]["destination"], "/u");
}
