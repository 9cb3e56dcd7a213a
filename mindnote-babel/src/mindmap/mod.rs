//! Mind-map model
//!
//! The in-memory tree the renderers walk, plus the on-disk MindNode package
//! it is read from. Extraction from the property list is lenient: missing
//! titles, notes, tasks and attachments become empty values, only the
//! canvas skeleton (`canvas.mindMaps[].mainNode`) is required.

pub mod plist;

use crate::error::NoteError;
use plist::PlistValue;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the property list inside a package directory.
pub const CONTENTS_FILE: &str = "contents.xml";
/// Name of the attachment directory inside a package directory.
pub const RESOURCES_DIR: &str = "resources";

/// Checkbox state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    None,
    Open,
    Done,
}

impl TaskState {
    /// Map the integer stored under `task.state`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => TaskState::Open,
            2 => TaskState::Done,
            _ => TaskState::None,
        }
    }

    /// Prefix prepended to list-item titles.
    pub fn checkbox(self) -> &'static str {
        match self {
            TaskState::None => "",
            TaskState::Open => "[ ] ",
            TaskState::Done => "[x] ",
        }
    }
}

/// A node of the mind-map tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MindMapNode {
    /// Rich-text title markup
    pub title: String,
    /// Rich-text note markup
    pub note: String,
    pub task_state: TaskState,
    /// Attachment file name, relative to the package resources
    pub attachment: Option<String>,
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_task(mut self, state: TaskState) -> Self {
        self.task_state = state;
        self
    }

    pub fn with_attachment(mut self, file_name: impl Into<String>) -> Self {
        self.attachment = Some(file_name.into());
        self
    }

    pub fn with_child(mut self, child: MindMapNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = MindMapNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Build a node (and its subtree) from a plist node dictionary.
    pub fn from_plist(value: &PlistValue) -> Self {
        let text_at = |path: &[&str]| {
            value
                .get_path(path)
                .and_then(PlistValue::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let task_state = value
            .get_path(&["task", "state"])
            .and_then(PlistValue::as_integer)
            .map(TaskState::from_code)
            .unwrap_or_default();

        let attachment = value
            .get_path(&["attachment", "fileName"])
            .and_then(PlistValue::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let children = value
            .get("subnodes")
            .and_then(PlistValue::as_array)
            .unwrap_or_default()
            .iter()
            .map(MindMapNode::from_plist)
            .collect();

        Self {
            title: text_at(&["title", "text"]),
            note: text_at(&["note", "text"]),
            task_state,
            attachment,
            children,
        }
    }
}

/// One mind map of a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct MindMap {
    pub root: MindMapNode,
}

/// All mind maps of a document, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub mind_maps: Vec<MindMap>,
}

impl Canvas {
    /// Extract the canvas from a document's top-level dictionary.
    pub fn from_plist(document: &PlistValue) -> Result<Self, NoteError> {
        let canvas = document
            .get("canvas")
            .ok_or_else(|| NoteError::MissingKey("canvas".to_string()))?;
        let maps = canvas
            .get("mindMaps")
            .and_then(PlistValue::as_array)
            .ok_or_else(|| NoteError::MissingKey("canvas.mindMaps".to_string()))?;

        let mind_maps = maps
            .iter()
            .map(|map| {
                map.get("mainNode")
                    .map(|node| MindMap {
                        root: MindMapNode::from_plist(node),
                    })
                    .ok_or_else(|| NoteError::MissingKey("mainNode".to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { mind_maps })
    }
}

/// A `.mindnode` package directory.
#[derive(Debug, Clone)]
pub struct MindNodePackage {
    path: PathBuf,
    contents: PlistValue,
}

impl MindNodePackage {
    /// Read `contents.xml` from the package directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, NoteError> {
        let path = path.as_ref().to_path_buf();
        let contents_path = path.join(CONTENTS_FILE);
        let source =
            fs::read_to_string(&contents_path).map_err(|e| NoteError::io(&contents_path, e))?;
        let contents = plist::parse(&source)?;
        Ok(Self { path, contents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw property list.
    pub fn contents(&self) -> &PlistValue {
        &self.contents
    }

    /// Package name without its extension (`Work.mindnode` → `Work`).
    pub fn basename(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn canvas(&self) -> Result<Canvas, NoteError> {
        Canvas::from_plist(&self.contents)
    }

    /// The property list as pretty-printed JSON with sorted keys.
    pub fn to_json(&self) -> Result<String, NoteError> {
        serde_json::to_string_pretty(&self.contents)
            .map_err(|e| NoteError::Serialization(e.to_string()))
    }
}
