//! Outline renderer (mind-map tree → AsciiDoc body)
//!
//! Walks the tree depth-first, pre-order. The root sits at depth 1 and is
//! only descended into; every other node becomes one of:
//!
//! - a section heading (`=` × depth) while depth ≤ the max heading depth,
//! - an image block when it carries an image attachment,
//! - a list item (`*` × (depth − max heading depth)) with a checkbox prefix.
//!
//! Inclusion is decided on the cleaned title before anything is written:
//! `[S]` skips a subtree, and in periodic runs `W<n>` / `Q<n>` prefixed
//! subtrees are kept only when they match the active period.

use crate::asciidoc::visitor::{cleanup_whitespace, InlineVisitor};
use crate::calendar::Period;
use crate::error::NoteError;
use crate::mindmap::MindMapNode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static WEEK_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^W\d+").unwrap());
static QUARTER_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Q\d").unwrap());

/// Title prefix marking a subtree as excluded.
pub const SKIP_MARKER: &str = "[S]";

/// Tunables of the outline walk.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Deepest level rendered as a section heading
    pub max_heading_depth: usize,
    /// Attachment extensions rendered as images (no leading dot)
    pub image_extensions: Vec<String>,
    /// Nesting ceiling; deeper trees abort the run
    pub max_tree_depth: usize,
}

impl OutlineOptions {
    pub const DEFAULT_MAX_TREE_DEPTH: usize = 256;

    /// Defaults for weekly digests.
    pub fn periodic() -> Self {
        Self::with_heading_depth(4)
    }

    /// Defaults for single-document exports.
    pub fn simple() -> Self {
        Self::with_heading_depth(3)
    }

    pub fn with_heading_depth(max_heading_depth: usize) -> Self {
        Self {
            max_heading_depth,
            image_extensions: vec!["png".to_string(), "jpg".to_string()],
            max_tree_depth: Self::DEFAULT_MAX_TREE_DEPTH,
        }
    }

    pub fn with_image_extensions(mut self, extensions: Vec<String>) -> Self {
        self.image_extensions = extensions;
        self
    }

    pub fn with_max_tree_depth(mut self, depth: usize) -> Self {
        self.max_tree_depth = depth;
        self
    }

    /// Whether a file name has one of the image extensions (ASCII
    /// case-insensitive).
    pub fn is_image(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.image_extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self::periodic()
    }
}

/// Week and quarter tokens admitted by a periodic run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeriodFilter {
    /// Retained week tokens, e.g. `["W12", "W13"]`
    pub weeks: Option<Vec<String>>,
    /// Active quarter token, e.g. `"Q1"`
    pub quarter: Option<String>,
}

impl PeriodFilter {
    /// Retain the previous and current week and the current quarter.
    pub fn from_period(period: &Period) -> Self {
        Self {
            weeks: Some(period.retained_weeks().to_vec()),
            quarter: Some(period.quarter_token()),
        }
    }

    /// Why a title is rejected, if it is.
    fn rejection(&self, title: &str) -> Option<&'static str> {
        if let (Some(weeks), Some(token)) = (&self.weeks, WEEK_TOKEN.find(title)) {
            if !weeks.iter().any(|week| week == token.as_str()) {
                return Some("skip");
            }
        }
        if let (Some(quarter), Some(token)) = (&self.quarter, QUARTER_TOKEN.find(title)) {
            if quarter != token.as_str() {
                return Some("skip quarter");
            }
        }
        None
    }
}

/// Renders a mind-map tree into an AsciiDoc body.
#[derive(Debug, Clone, Default)]
pub struct OutlineRenderer {
    visitor: InlineVisitor,
    options: OutlineOptions,
    filter: Option<PeriodFilter>,
}

impl OutlineRenderer {
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            visitor: InlineVisitor::new(),
            options,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: PeriodFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Render everything below `root`.
    ///
    /// Fails only when the tree is nested deeper than
    /// [`OutlineOptions::max_tree_depth`].
    pub fn render(&self, root: &MindMapNode) -> Result<String, NoteError> {
        let mut out = String::new();
        self.visit(root, 1, &mut out)?;
        Ok(out)
    }

    /// A node's title as plain single-line text.
    pub fn node_title(&self, node: &MindMapNode) -> String {
        cleanup_whitespace(&self.visitor.render_markup(&node.title))
    }

    fn visit(&self, node: &MindMapNode, depth: usize, out: &mut String) -> Result<(), NoteError> {
        if depth > self.options.max_tree_depth {
            return Err(NoteError::DepthExceeded {
                limit: self.options.max_tree_depth,
            });
        }

        let title = self.node_title(node);
        if title.starts_with(SKIP_MARKER) {
            log::info!("skip marked {title}");
            return Ok(());
        }
        if let Some(reason) = self.filter.as_ref().and_then(|f| f.rejection(&title)) {
            log::info!("{reason} {title}");
            return Ok(());
        }

        if depth > 1 {
            out.push_str(&self.render_node(node, depth, &title));
        }

        for child in &node.children {
            self.visit(child, depth + 1, out)?;
        }
        Ok(())
    }

    fn render_node(&self, node: &MindMapNode, depth: usize, title: &str) -> String {
        let max = self.options.max_heading_depth;

        if depth <= max {
            let marks = "=".repeat(depth);
            return format!("\n{marks} {title}\n\n{}", self.note(node));
        }

        if let Some(file) = node
            .attachment
            .as_deref()
            .filter(|name| self.options.is_image(name))
        {
            return render_image_block(file, title);
        }

        let bullets = "*".repeat(depth - max);
        let checkbox = node.task_state.checkbox();
        format!("{bullets} {checkbox}{title}\n{}", self.note(node))
    }

    fn note(&self, node: &MindMapNode) -> String {
        let note = self.visitor.render_markup(&node.note);
        if note.is_empty() {
            note
        } else {
            format!("{note}\n\n")
        }
    }
}

/// Block image attached to the preceding list item.
pub fn render_image_block(file_name: &str, caption: &str) -> String {
    let caption = caption.trim();
    if caption.is_empty() {
        format!("+\nimage::{file_name}[pdfwidth=85%]\n")
    } else {
        format!("+\n.{caption}\nimage::{file_name}[alt={caption}, pdfwidth=85%]\n")
    }
}
