//! HTML fragment parsing
//!
//! Pipeline: markup string → html5ever → RcDom → [`Fragment`] tree.
//!
//! `html5ever` is a browser-grade parser, so whatever note tools emit
//! (unclosed tags, stray entities, foster-parented table content) ends up as
//! a well-formed tree. The tree builder runs with scripting disabled so the
//! content of `<noscript>` is parsed as markup rather than raw text; figures
//! rely on that fallback content.

use super::{ElementKind, Fragment, ListKind};
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Element nesting ceiling; deeper subtrees are dropped.
const MAX_ELEMENT_DEPTH: usize = 256;

/// Parse a markup string into a fragment tree.
///
/// The returned root is a [`ElementKind::PassThrough`] container holding the
/// parsed body content. Parsing never fails.
pub fn parse_fragment(source: &str) -> Fragment {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(source);

    let children = find_element(&dom.document, "body")
        .map(|body| convert_children(&body, 0))
        .unwrap_or_default();

    Fragment::new(ElementKind::PassThrough, children)
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == tag {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

fn convert_children(handle: &Handle, depth: usize) -> Vec<Fragment> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(|child| convert_node(child, depth + 1))
        .collect()
}

fn convert_node(handle: &Handle, depth: usize) -> Option<Fragment> {
    match &handle.data {
        NodeData::Text { contents } => Some(Fragment::text(contents.borrow().to_string())),
        NodeData::Comment { .. } => Some(Fragment::element(ElementKind::Ignored)),
        NodeData::Element { name, attrs, .. } => {
            if depth > MAX_ELEMENT_DEPTH {
                log::warn!("Dropping markup nested deeper than {MAX_ELEMENT_DEPTH} elements");
                return None;
            }

            let attrs = attrs.borrow();
            let attr = |key: &str| {
                attrs
                    .iter()
                    .find(|a| &*a.name.local == key)
                    .map(|a| a.value.to_string())
            };
            let classes = || {
                attr("class")
                    .map(|c| c.split_whitespace().map(str::to_string).collect::<Vec<_>>())
                    .unwrap_or_default()
            };

            let kind = match &*name.local {
                "h1" => ElementKind::Heading(1),
                "h2" => ElementKind::Heading(2),
                "h3" => ElementKind::Heading(3),
                "h4" => ElementKind::Heading(4),
                "h5" => ElementKind::Heading(5),
                "h6" => ElementKind::Heading(6),
                "p" | "div" | "article" => ElementKind::Paragraph,
                "strong" | "b" => ElementKind::Bold,
                "em" | "i" => ElementKind::Italic,
                "a" => ElementKind::Link { href: attr("href") },
                "img" => ElementKind::Image {
                    src: attr("src"),
                    alt: attr("alt").unwrap_or_default(),
                },
                "ul" => ElementKind::List(ListKind::Unordered),
                "ol" => ElementKind::List(ListKind::Ordered),
                "li" => ElementKind::ListItem,
                "blockquote" => ElementKind::Blockquote,
                "cite" => ElementKind::Citation,
                "hr" => ElementKind::Rule,
                "br" => ElementKind::LineBreak,
                "pre" => ElementKind::Preformatted,
                "code" => ElementKind::InlineCode {
                    class: classes().into_iter().next(),
                },
                "table" => {
                    return Some(Fragment::element(ElementKind::Table {
                        html: serialize_node(handle),
                    }))
                }
                "figure" => ElementKind::Figure { classes: classes() },
                "figcaption" => ElementKind::FigureCaption,
                "noscript" => ElementKind::NoScript,
                "span" => ElementKind::Span {
                    style: attr("style"),
                },
                "script" | "style" | "iframe" | "svg" | "button" | "form" => {
                    return Some(Fragment::element(ElementKind::Ignored))
                }
                _ => ElementKind::PassThrough,
            };

            Some(Fragment::new(kind, convert_children(handle, depth)))
        }
        _ => None,
    }
}

/// Serialize an element and its subtree back to HTML.
fn serialize_node(handle: &Handle) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(handle.clone());
    if let Err(e) = serialize(&mut output, &serializable, opts) {
        log::warn!("Table serialization failed: {e}");
        return String::new();
    }
    String::from_utf8_lossy(&output).into_owned()
}
