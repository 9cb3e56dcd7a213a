//! Document assembly: AsciiDoc header + rendered body.

use crate::calendar::{date_stamp, Period};
use chrono::NaiveDate;

/// Extension of every generated document.
pub const EXTENSION: &str = "asciidoc";
/// Default `:imagesdir:` attribute, also the copy target of package resources.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// A complete output document.
///
/// Dated documents (periodic digests) carry a date line and a blank line
/// after the attribute block; undated ones (single-document exports) do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub author: String,
    pub date: Option<NaiveDate>,
    /// Emitted as `:toclevels:`
    pub max_heading_depth: usize,
    pub images_dir: String,
    pub body: String,
}

impl Document {
    /// A weekly digest titled `{prefix} Notes: W{week}`.
    pub fn periodic(
        prefix: &str,
        author: impl Into<String>,
        period: &Period,
        max_heading_depth: usize,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: format!("{prefix} Notes: W{}", period.current_week),
            author: author.into(),
            date: Some(period.date),
            max_heading_depth,
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
            body: body.into(),
        }
    }

    /// A single-document export titled after the root node.
    pub fn simple(
        title: impl Into<String>,
        author: impl Into<String>,
        max_heading_depth: usize,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            date: None,
            max_heading_depth,
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
            body: body.into(),
        }
    }

    pub fn with_images_dir(mut self, images_dir: impl Into<String>) -> Self {
        self.images_dir = images_dir.into();
        self
    }

    pub fn to_asciidoc(&self) -> String {
        let mut out = format!("= {}\n{}\n", self.title, self.author);
        if let Some(date) = self.date {
            out.push_str(&date_stamp(date));
            out.push('\n');
        }
        out.push_str(&format!(
            ":toc:\n:toclevels: {}\n:imagesdir: {}\n:numbered:\n",
            self.max_heading_depth, self.images_dir
        ));
        if self.date.is_some() {
            out.push('\n');
        }
        out.push_str(&self.body);
        out
    }
}

/// File stem of a weekly digest: `{prefix}_Notes_W{week}`.
pub fn periodic_stem(prefix: &str, period: &Period) -> String {
    format!("{prefix}_Notes_W{}", period.current_week)
}

/// File name for the `index`-th mind map (0-based) of a canvas.
///
/// The first map keeps the plain stem; later ones get `_2`, `_3`, ...
pub fn output_file_name(stem: &str, index: usize) -> String {
    if index == 0 {
        format!("{stem}.{EXTENSION}")
    } else {
        format!("{stem}_{}.{EXTENSION}", index + 1)
    }
}
