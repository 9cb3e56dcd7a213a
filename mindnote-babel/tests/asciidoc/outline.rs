//! Outline renderer tests (mind-map tree → AsciiDoc body)

use crate::common::week_13;
use mindnote_babel::asciidoc::{OutlineOptions, OutlineRenderer, PeriodFilter};
use mindnote_babel::{MindMapNode, NoteError, TaskState};

fn periodic() -> OutlineRenderer {
    OutlineRenderer::new(OutlineOptions::periodic())
}

fn render(renderer: &OutlineRenderer, root: &MindMapNode) -> String {
    renderer.render(root).expect("render")
}

/// `root → a → b → ...` with one node per title.
fn chain(titles: &[&str]) -> MindMapNode {
    titles
        .iter()
        .rev()
        .fold(None, |child: Option<MindMapNode>, title| {
            let node = MindMapNode::new(*title);
            Some(match child {
                Some(child) => node.with_child(child),
                None => node,
            })
        })
        .expect("non-empty chain")
}

/// `node` at depth 5, one level below the periodic heading depth.
fn below_heading_depth(node: MindMapNode) -> MindMapNode {
    MindMapNode::new("Root").with_child(
        MindMapNode::new("A")
            .with_child(MindMapNode::new("B").with_child(MindMapNode::new("C").with_child(node))),
    )
}

#[test]
fn test_root_is_not_rendered() {
    assert_eq!(render(&periodic(), &MindMapNode::new("Root").with_note("n")), "");
}

#[test]
fn test_heading_marker_count_equals_depth() {
    let output = render(&periodic(), &chain(&["Root", "A", "B", "C"]));
    assert_eq!(output, "\n== A\n\n\n=== B\n\n\n==== C\n\n");
}

#[test]
fn test_heading_note_is_followed_by_blank_line() {
    let root = MindMapNode::new("Root")
        .with_child(MindMapNode::new("Topic").with_note("<p>Some <b>note</b></p>"));
    assert_eq!(render(&periodic(), &root), "\n== Topic\n\nSome **note**\n\n");
}

#[test]
fn test_skip_marker_excludes_subtree() {
    let root = MindMapNode::new("Root")
        .with_child(
            MindMapNode::new("[S] Secret")
                .with_child(MindMapNode::new("Inside").with_child(MindMapNode::new("Deeper"))),
        )
        .with_child(MindMapNode::new("Kept"));

    let output = render(&periodic(), &root);
    assert_eq!(output, "\n== Kept\n\n");
}

#[test]
fn test_skip_marker_applies_to_root() {
    let root = MindMapNode::new("[S] Root").with_child(MindMapNode::new("Child"));
    assert_eq!(render(&periodic(), &root), "");
}

#[test]
fn test_skip_marker_is_matched_on_cleaned_title() {
    let root = MindMapNode::new("Root").with_child(MindMapNode::new("<p>\n  [S] Wrapped</p>"));
    assert_eq!(render(&periodic(), &root), "");
}

#[test]
fn test_list_items_below_heading_depth() {
    let root = chain(&["Root", "A", "B", "C", "Item", "Sub item"]);
    let output = render(&periodic(), &root);
    assert!(output.ends_with("\n==== C\n\n* Item\n** Sub item\n"));
}

#[test]
fn test_checkbox_prefixes() {
    let root = MindMapNode::new("Root").with_child(MindMapNode::new("A").with_child(
        MindMapNode::new("B").with_children(vec![
            MindMapNode::new("Open").with_task(TaskState::Open),
            MindMapNode::new("Done").with_task(TaskState::Done),
            MindMapNode::new("Plain"),
        ]),
    ));

    let renderer = OutlineRenderer::new(OutlineOptions::with_heading_depth(3));
    assert_eq!(
        render(&renderer, &root),
        "\n== A\n\n\n=== B\n\n* [ ] Open\n* [x] Done\n* Plain\n"
    );
}

#[test]
fn test_list_item_note_follows_on_next_line() {
    let root = below_heading_depth(MindMapNode::new("Item").with_note("<p>detail</p>"));
    let output = render(&periodic(), &root);
    assert!(output.ends_with("\n==== C\n\n* Item\ndetail\n\n"));
}

#[test]
fn test_image_attachment_wins_over_note() {
    let root = below_heading_depth(
        MindMapNode::new("Photo")
            .with_note("<p>never shown</p>")
            .with_attachment("photo.PNG"),
    );

    let output = render(&periodic(), &root);
    assert!(output.ends_with("\n==== C\n\n+\n.Photo\nimage::photo.PNG[alt=Photo, pdfwidth=85%]\n"));
    assert!(!output.contains("never shown"));
}

#[test]
fn test_image_without_title_has_no_caption() {
    let root = below_heading_depth(MindMapNode::default().with_attachment("x.jpg"));
    let output = render(&periodic(), &root);
    assert!(output.ends_with("+\nimage::x.jpg[pdfwidth=85%]\n"));
}

#[test]
fn test_non_image_attachment_is_a_list_item() {
    let root = below_heading_depth(MindMapNode::new("Spec").with_attachment("spec.pdf"));
    let output = render(&periodic(), &root);
    assert!(output.ends_with("* Spec\n"));
}

#[test]
fn test_image_attachment_at_heading_depth_is_a_heading() {
    let root = MindMapNode::new("Root")
        .with_child(MindMapNode::new("Shot").with_attachment("a.png"));
    assert_eq!(render(&periodic(), &root), "\n== Shot\n\n");
}

#[test]
fn test_week_filter_keeps_previous_and_current_week() {
    let root = MindMapNode::new("Root").with_children(vec![
        MindMapNode::new("W11 Old").with_child(MindMapNode::new("Old child")),
        MindMapNode::new("W12 Previous"),
        MindMapNode::new("W13 Current"),
        MindMapNode::new("General"),
    ]);
    let renderer = periodic().with_filter(PeriodFilter::from_period(&week_13()));

    let output = render(&renderer, &root);
    assert!(!output.contains("W11"));
    assert!(!output.contains("Old child"));
    assert!(output.contains("\n== W12 Previous\n"));
    assert!(output.contains("\n== W13 Current\n"));
    assert!(output.contains("\n== General\n"));
}

#[test]
fn test_quarter_filter() {
    let root = MindMapNode::new("Root").with_children(vec![
        MindMapNode::new("Q1 Goals"),
        MindMapNode::new("Q3 Goals"),
    ]);
    let renderer = periodic().with_filter(PeriodFilter::from_period(&week_13()));

    assert_eq!(render(&renderer, &root), "\n== Q1 Goals\n\n");
}

#[test]
fn test_filters_are_off_without_period() {
    let root = MindMapNode::new("Root").with_children(vec![
        MindMapNode::new("W1 Ancient"),
        MindMapNode::new("Q4 Later"),
    ]);
    let output = render(&OutlineRenderer::new(OutlineOptions::simple()), &root);
    assert_eq!(output, "\n== W1 Ancient\n\n\n== Q4 Later\n\n");
}

#[test]
fn test_titles_are_flattened_to_one_line() {
    let root = MindMapNode::new("Root")
        .with_child(MindMapNode::new("<p>Multi\n   line</p>"))
        .with_child(MindMapNode::new("Broken<br>title"));
    assert_eq!(
        render(&periodic(), &root),
        "\n== Multi line\n\n\n== Broken title\n\n"
    );
}

#[test]
fn test_output_is_deterministic() {
    let root = MindMapNode::new("Root").with_children(vec![
        chain(&["W13 Week", "Topic", "Sub", "Item"]),
        MindMapNode::new("Reading").with_note(r#"<a href="https://example.com">x</a>"#),
    ]);
    let renderer = periodic().with_filter(PeriodFilter::from_period(&week_13()));

    assert_eq!(render(&renderer, &root), render(&renderer, &root));
}

#[test]
fn test_depth_ceiling() {
    let titles: Vec<String> = (0..10).map(|i| format!("N{i}")).collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let root = chain(&titles);

    let renderer =
        OutlineRenderer::new(OutlineOptions::periodic().with_max_tree_depth(5));
    assert!(matches!(
        renderer.render(&root),
        Err(NoteError::DepthExceeded { limit: 5 })
    ));

    let roomy = OutlineRenderer::new(OutlineOptions::periodic().with_max_tree_depth(10));
    assert!(roomy.render(&root).is_ok());
}
