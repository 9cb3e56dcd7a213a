//! Generation pipeline.
//!
//! One call per package: copy the attachments into the images directory,
//! read the canvas, render every mind map and write one `.asciidoc` file per
//! map. [`render_documents`] is the in-memory half for callers that do their
//! own I/O.

use crate::asciidoc::document::{output_file_name, periodic_stem, Document, DEFAULT_IMAGES_DIR};
use crate::asciidoc::outline::{OutlineOptions, OutlineRenderer, PeriodFilter};
use crate::calendar::Period;
use crate::error::NoteError;
use crate::mindmap::MindNodePackage;
use crate::resources::copy_resources;
use std::fs;
use std::path::{Path, PathBuf};

/// File name written by [`dump`] when no path is given.
pub const DUMP_FILE: &str = "contents.json";

/// Which kind of document to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Weekly digest, filtered by week and quarter tokens
    Periodic { prefix: String, period: Period },
    /// Whole-tree export titled after the root node
    Simple,
}

/// Specifies one generation run.
///
/// ```ignore
/// let spec = GenerationSpec::periodic("Work.mindnode", "Team", Period::today())
///     .with_output_dir("out")
///     .with_author("Ann");
/// let written = generate(&spec)?;
/// ```
#[derive(Debug, Clone)]
pub struct GenerationSpec {
    /// The `.mindnode` package directory.
    pub input: PathBuf,
    /// Directory receiving the documents and the images directory.
    pub output_dir: PathBuf,
    pub mode: Mode,
    pub author: String,
    pub options: OutlineOptions,
    /// Name of the images directory, relative to `output_dir`.
    pub images_dir: String,
}

impl GenerationSpec {
    pub fn periodic(input: impl AsRef<Path>, prefix: impl Into<String>, period: Period) -> Self {
        Self::new(
            input,
            Mode::Periodic {
                prefix: prefix.into(),
                period,
            },
            OutlineOptions::periodic(),
        )
    }

    pub fn simple(input: impl AsRef<Path>) -> Self {
        Self::new(input, Mode::Simple, OutlineOptions::simple())
    }

    fn new(input: impl AsRef<Path>, mode: Mode, options: OutlineOptions) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output_dir: PathBuf::from("."),
            mode,
            author: String::new(),
            options,
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_images_dir(mut self, images_dir: impl Into<String>) -> Self {
        self.images_dir = images_dir.into();
        self
    }

    fn renderer(&self) -> OutlineRenderer {
        let renderer = OutlineRenderer::new(self.options.clone());
        match &self.mode {
            Mode::Periodic { period, .. } => {
                let filter = PeriodFilter::from_period(period);
                log::info!(
                    "Keeping weeks {:?} and quarter {:?}",
                    filter.weeks.as_deref().unwrap_or_default(),
                    filter.quarter.as_deref().unwrap_or_default()
                );
                renderer.with_filter(filter)
            }
            Mode::Simple => renderer,
        }
    }
}

/// What a run wrote.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationResult {
    /// One document per mind map, in canvas order
    pub documents: Vec<PathBuf>,
    /// Attachments copied into the images directory
    pub resources: Vec<PathBuf>,
}

/// Render every mind map of `package` without touching the filesystem.
///
/// Returns `(file name, document)` pairs in canvas order.
pub fn render_documents(
    package: &MindNodePackage,
    spec: &GenerationSpec,
) -> Result<Vec<(String, Document)>, NoteError> {
    let canvas = package.canvas()?;
    let renderer = spec.renderer();
    let max = spec.options.max_heading_depth;

    let stem = match &spec.mode {
        Mode::Periodic { prefix, period } => periodic_stem(prefix, period),
        Mode::Simple => package.basename(),
    };

    canvas
        .mind_maps
        .iter()
        .enumerate()
        .map(|(index, map)| {
            let body = renderer.render(&map.root)?;
            let document = match &spec.mode {
                Mode::Periodic { prefix, period } => {
                    Document::periodic(prefix, spec.author.clone(), period, max, body)
                }
                Mode::Simple => {
                    Document::simple(renderer.node_title(&map.root), spec.author.clone(), max, body)
                }
            }
            .with_images_dir(spec.images_dir.clone());
            Ok((output_file_name(&stem, index), document))
        })
        .collect()
}

/// Run a full generation: copy resources, render and write.
///
/// # Errors
///
/// Returns [`NoteError`] if the package cannot be read, the tree is nested
/// too deeply, or any file cannot be written. Nothing is rolled back.
pub fn generate(spec: &GenerationSpec) -> Result<GenerationResult, NoteError> {
    let resources = copy_resources(&spec.input, spec.output_dir.join(&spec.images_dir))?;
    let package = MindNodePackage::open(&spec.input)?;

    fs::create_dir_all(&spec.output_dir).map_err(|e| NoteError::io(&spec.output_dir, e))?;

    let documents = render_documents(&package, spec)?
        .into_iter()
        .map(|(file_name, document)| {
            let path = spec.output_dir.join(file_name);
            write_to_path(path, document.to_asciidoc())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GenerationResult {
        documents,
        resources,
    })
}

/// Write the package's property list as pretty JSON with sorted keys.
pub fn dump(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<PathBuf, NoteError> {
    let package = MindNodePackage::open(input)?;
    let json = package.to_json()?;
    write_to_path(output.as_ref().to_path_buf(), json)
}

fn write_to_path(path: PathBuf, text: String) -> Result<PathBuf, NoteError> {
    fs::write(&path, text).map_err(|e| NoteError::io(&path, e))?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}
