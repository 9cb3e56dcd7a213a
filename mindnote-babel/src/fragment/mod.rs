//! Rich-text fragment model
//!
//! Titles and notes of mind-map nodes hold small HTML fragments. The
//! [`parser`] turns them into a [`Fragment`] tree whose element kinds are the
//! closed set the AsciiDoc visitor knows how to render. Everything the
//! renderer has no opinion about is mapped to [`ElementKind::PassThrough`]
//! (render children) or [`ElementKind::Ignored`] (drop the subtree).

pub mod parser;

pub use parser::parse_fragment;

/// Whether a list is bulleted or numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    /// AsciiDoc marker character, repeated once per nesting level.
    pub fn marker(self) -> char {
        match self {
            ListKind::Unordered => '*',
            ListKind::Ordered => '.',
        }
    }
}

/// The kind of a fragment element, with the attributes each kind needs.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Character data; never has children
    Text(String),
    /// `h1`..`h6`
    Heading(u8),
    /// `p`, `div`, `article`
    Paragraph,
    Bold,
    Italic,
    Link { href: Option<String> },
    Image { src: Option<String>, alt: String },
    List(ListKind),
    ListItem,
    Blockquote,
    /// `cite`, extracted by an enclosing blockquote
    Citation,
    Rule,
    LineBreak,
    Preformatted,
    /// `code`, with its first class token (e.g. `language-go`)
    InlineCode { class: Option<String> },
    /// `table`, kept as serialized HTML
    Table { html: String },
    Figure { classes: Vec<String> },
    FigureCaption,
    NoScript,
    Span { style: Option<String> },
    /// Scripts, styles, embedded widgets and comments
    Ignored,
    /// Any other container; its children are rendered in place
    PassThrough,
}

/// A parsed element and its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: ElementKind,
    pub children: Vec<Fragment>,
}

impl Fragment {
    pub fn new(kind: ElementKind, children: Vec<Fragment>) -> Self {
        Self { kind, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(text.into()), Vec::new())
    }

    pub fn element(kind: ElementKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn with_children(mut self, children: Vec<Fragment>) -> Self {
        self.children = children;
        self
    }

    /// Concatenated character data of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            ElementKind::Text(text) => out.push_str(text),
            _ => self.children.iter().for_each(|child| child.collect_text(out)),
        }
    }

    /// First descendant (pre-order, excluding `self`) matching `pred`.
    pub fn find(&self, pred: &impl Fn(&Fragment) -> bool) -> Option<&Fragment> {
        self.children.iter().find_map(|child| {
            if pred(child) {
                Some(child)
            } else {
                child.find(pred)
            }
        })
    }

    /// Remove the first descendant (pre-order) matching `pred`.
    ///
    /// Returns the removed element and a copy of `self` without it.
    pub fn extract(&self, pred: &impl Fn(&Fragment) -> bool) -> (Option<Fragment>, Fragment) {
        let mut pruned = self.clone();
        let removed = pruned.remove_first(pred);
        (removed, pruned)
    }

    fn remove_first(&mut self, pred: &impl Fn(&Fragment) -> bool) -> Option<Fragment> {
        for index in 0..self.children.len() {
            if pred(&self.children[index]) {
                return Some(self.children.remove(index));
            }
            if let Some(found) = self.children[index].remove_first(pred) {
                return Some(found);
            }
        }
        None
    }
}
