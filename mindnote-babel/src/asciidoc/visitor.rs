//! Inline markup visitor (rich-text fragment → AsciiDoc)
//!
//! Every [`ElementKind`] has exactly one arm in [`InlineVisitor::render`].
//! Children are always rendered before their parent wraps them. Nested state
//! travels in a [`RenderContext`] that handlers copy and extend for their own
//! children, so sibling subtrees never observe each other's state.
//!
//! | Element          | AsciiDoc                                          |
//! |------------------|---------------------------------------------------|
//! | `h1`..`h4`       | `===`..`=====` section title                      |
//! | `h5`, `h6`       | bold paragraph                                    |
//! | `p`, `div`       | paragraph                                         |
//! | `b`, `strong`    | `**text**`                                        |
//! | `i`, `em`        | `__text__`                                        |
//! | `a`              | `link:href[text]` (absolute http(s) only)         |
//! | `img`            | `image:src[alt]`                                  |
//! | `ul`, `ol`, `li` | `*`/`.` markers repeated per nesting level        |
//! | `blockquote`     | `[quote, cite]` + `____` block                    |
//! | `pre`            | `[listing]` + `....` block                        |
//! | `code`           | `` `text` `` or `[source, lang]` + `----` block   |
//! | `table`          | raw HTML in a `++++` passthrough block            |

use crate::fragment::{parse_fragment, ElementKind, Fragment, ListKind};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Figures carrying this class hold a script-driven placeholder; the usable
/// image lives in their `<noscript>` fallback.
const PLACEHOLDER_FIGURE_CLASS: &str = "paragraph-image";
const LANGUAGE_CLASS_PREFIX: &str = "language-";
const DEFAULT_CODE_LANGUAGE: &str = "text";

/// Collapse every whitespace run into one space and trim both ends.
pub fn cleanup_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// State threaded through the visitor recursion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    /// Number of enclosing lists
    pub list_depth: usize,
    /// Kinds of the enclosing lists, innermost last
    pub list_kinds: Vec<ListKind>,
    /// Inside a `<pre>` block
    pub in_preformatted: bool,
    /// Caption of the enclosing figure
    pub caption: Option<String>,
}

impl RenderContext {
    pub fn nested_list(&self, kind: ListKind) -> Self {
        let mut next = self.clone();
        next.list_depth += 1;
        next.list_kinds.push(kind);
        next
    }

    pub fn preformatted(&self) -> Self {
        Self {
            in_preformatted: true,
            ..self.clone()
        }
    }

    pub fn with_caption(&self, caption: String) -> Self {
        Self {
            caption: Some(caption),
            ..self.clone()
        }
    }

    pub fn current_list(&self) -> Option<ListKind> {
        self.list_kinds.last().copied()
    }
}

/// Converts fragment trees into AsciiDoc.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineVisitor;

impl InlineVisitor {
    pub fn new() -> Self {
        Self
    }

    /// Parse and render a node title or note.
    ///
    /// The markup is wrapped in a paragraph container, rendered with a fresh
    /// context and trimmed. Empty input renders to an empty string.
    pub fn render_markup(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }
        let fragment = parse_fragment(&format!("<div>{source}</div>"));
        self.render(&fragment, &RenderContext::default())
            .trim()
            .to_string()
    }

    /// Render one element and its subtree.
    pub fn render(&self, fragment: &Fragment, ctx: &RenderContext) -> String {
        match &fragment.kind {
            ElementKind::Text(text) => text.clone(),
            ElementKind::Heading(level) => self.render_heading(fragment, *level, ctx),
            ElementKind::Paragraph => format!("{}\n\n", self.render_children(fragment, ctx)),
            ElementKind::Bold => self.render_emphasis(fragment, "**", ctx),
            ElementKind::Italic => self.render_emphasis(fragment, "__", ctx),
            ElementKind::Link { href } => self.render_link(fragment, href.as_deref(), ctx),
            ElementKind::Image { src, alt } => render_image(src.as_deref(), alt, ctx),
            ElementKind::List(kind) => {
                let items = self.render_children(fragment, &ctx.nested_list(*kind));
                if ctx.list_depth > 0 {
                    // A sublist starts on its own line, right below its parent item.
                    format!("\n{items}")
                } else {
                    format!("{items}\n\n")
                }
            }
            ElementKind::ListItem => self.render_list_item(fragment, ctx),
            ElementKind::Blockquote => self.render_blockquote(fragment, ctx),
            ElementKind::Rule => "\n'''\n\n".to_string(),
            ElementKind::LineBreak => {
                let tail = self.render_children(fragment, ctx);
                if ctx.in_preformatted {
                    format!("\n{tail}")
                } else {
                    format!("\n\n{tail}")
                }
            }
            ElementKind::Preformatted => {
                let text = self.render_children(fragment, &ctx.preformatted());
                format!("[listing]\n....\n{text}\n....\n\n")
            }
            ElementKind::InlineCode { class } => self.render_code(fragment, class.as_deref(), ctx),
            ElementKind::Table { html } => format!("++++\n{html}\n++++\n\n"),
            ElementKind::Figure { classes } => self.render_figure(fragment, classes, ctx),
            ElementKind::Span { style } => {
                if style.as_deref().is_some_and(declares_bold) {
                    self.render_emphasis(fragment, "**", ctx)
                } else {
                    self.render_children(fragment, ctx)
                }
            }
            ElementKind::Ignored => String::new(),
            ElementKind::PassThrough
            | ElementKind::NoScript
            | ElementKind::FigureCaption
            | ElementKind::Citation => self.render_children(fragment, ctx),
        }
    }

    fn render_children(&self, fragment: &Fragment, ctx: &RenderContext) -> String {
        fragment
            .children
            .iter()
            .map(|child| self.render(child, ctx))
            .collect()
    }

    fn render_heading(&self, fragment: &Fragment, level: u8, ctx: &RenderContext) -> String {
        let text = cleanup_whitespace(&self.render_children(fragment, ctx));
        if text.is_empty() {
            return "\n\n".to_string();
        }
        if level >= 5 {
            // Not meant for the table of contents.
            return format!("\n\n**{text}**\n\n");
        }
        let marks = "=".repeat(usize::from(level.max(2)) + 1);
        format!("\n{marks} {text}\n\n")
    }

    fn render_emphasis(&self, fragment: &Fragment, marker: &str, ctx: &RenderContext) -> String {
        wrap_around(&self.render_children(fragment, ctx), marker)
    }

    fn render_link(&self, fragment: &Fragment, href: Option<&str>, ctx: &RenderContext) -> String {
        let text = self.render_children(fragment, ctx);
        if text.is_empty() {
            return String::new();
        }
        if let [only] = fragment.children.as_slice() {
            if matches!(only.kind, ElementKind::Image { .. }) {
                return text;
            }
        }
        match href {
            Some(href) if is_web_url(href) => format!("link:{href}[{text}]"),
            _ => text,
        }
    }

    fn render_list_item(&self, fragment: &Fragment, ctx: &RenderContext) -> String {
        let text = self.render_children(fragment, ctx);
        let text = text.trim_end();
        if text.is_empty() {
            return String::new();
        }
        match ctx.current_list() {
            Some(kind) => {
                let marker = kind.marker().to_string().repeat(ctx.list_depth);
                format!("{marker} {text}\n")
            }
            None => String::new(),
        }
    }

    fn render_blockquote(&self, fragment: &Fragment, ctx: &RenderContext) -> String {
        let (citation, body) = fragment.extract(&|f: &Fragment| f.kind == ElementKind::Citation);
        let text = self.render_children(&body, ctx);
        match citation {
            Some(citation) => format!(
                "[quote, {}]\n____\n{text}\n____\n\n",
                citation.text_content()
            ),
            None => format!("[quote]\n____\n{text}\n____\n\n"),
        }
    }

    fn render_code(&self, fragment: &Fragment, class: Option<&str>, ctx: &RenderContext) -> String {
        let text = self.render_children(fragment, ctx);
        if text.is_empty() {
            return String::new();
        }
        if text.contains('\n') {
            let lang = class
                .map(|c| c.strip_prefix(LANGUAGE_CLASS_PREFIX).unwrap_or(c))
                .unwrap_or(DEFAULT_CODE_LANGUAGE);
            format!("[source, {lang}]\n----\n{text}\n----\n")
        } else {
            format!("`{text}`")
        }
    }

    fn render_figure(&self, fragment: &Fragment, classes: &[String], ctx: &RenderContext) -> String {
        let (caption, body) = fragment.extract(&|f: &Fragment| f.kind == ElementKind::FigureCaption);
        let ctx = match caption {
            Some(caption) => ctx.with_caption(cleanup_whitespace(&caption.text_content())),
            None => ctx.clone(),
        };

        let target = if classes.iter().any(|c| c == PLACEHOLDER_FIGURE_CLASS) {
            body.find(&|f: &Fragment| f.kind == ElementKind::NoScript)
                .unwrap_or(&body)
        } else {
            &body
        };

        format!("{}\n\n", self.render_children(target, &ctx))
    }
}

fn render_image(src: Option<&str>, alt: &str, ctx: &RenderContext) -> String {
    let Some(src) = src else {
        return String::new();
    };
    match ctx.caption.as_deref().filter(|c| !c.is_empty()) {
        Some(caption) => format!(
            "image:{src}[{alt},title=\"{}\"]",
            caption.replace('"', "\\\"")
        ),
        None => format!("image:{src}[{alt}]"),
    }
}

/// Wrap the non-whitespace core of `text` with `marker`, keeping the
/// surrounding whitespace outside the markers.
fn wrap_around(text: &str, marker: &str) -> String {
    let inner = text.trim();
    if inner.is_empty() {
        return String::new();
    }
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{leading}{marker}{inner}{marker}{trailing}")
}

/// Absolute `http://` or `https://` URL. `Url::parse` alone also accepts
/// authority-less forms such as `http:foo`.
fn is_web_url(href: &str) -> bool {
    let has_web_prefix = ["http://", "https://"].iter().any(|prefix| {
        href.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    });
    has_web_prefix
        && Url::parse(href)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
}

/// Whether an inline style declares a bold font weight.
fn declares_bold(style: &str) -> bool {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .any(|(key, value)| matches!(key.trim(), "font" | "font-weight") && value.contains("bold"))
}
