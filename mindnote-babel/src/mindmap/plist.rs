//! XML property-list reader
//!
//! MindNode stores its document as an XML property list (`contents.xml`).
//! This module turns that file into a [`PlistValue`] tree using `roxmltree`.
//! Binary property lists are not supported.

use crate::error::NoteError;
use roxmltree::{Node, ParsingOptions};
use serde::Serialize;
use std::collections::BTreeMap;

/// Nesting ceiling for dict/array values. Mind-map trees add three plist
/// levels per node level, so this comfortably covers the node depth ceiling.
const MAX_NESTING: usize = 2048;

/// A property-list value.
///
/// Dictionaries keep their keys sorted, which is also the order used when a
/// document is dumped as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlistValue {
    Dict(BTreeMap<String, PlistValue>),
    Array(Vec<PlistValue>),
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    /// ISO-8601 timestamp, kept as written
    Date(String),
    /// Base64 payload with whitespace removed
    Data(String),
}

impl PlistValue {
    /// Look up a key if this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        match self {
            PlistValue::Dict(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a chain of dictionary keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&PlistValue> {
        path.iter().try_fold(self, |value, key| value.get(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PlistValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Parse an XML property list.
pub fn parse(source: &str) -> Result<PlistValue, NoteError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(source, options)
        .map_err(|e| NoteError::Plist(format!("XML parsing error: {e}")))?;

    let root = doc.root_element();
    if root.tag_name().name() != "plist" {
        return Err(NoteError::Plist(format!(
            "Root element is <{}>, expected <plist>",
            root.tag_name().name()
        )));
    }

    let value = root
        .children()
        .find(|n| n.is_element())
        .ok_or_else(|| NoteError::Plist("Empty <plist> element".to_string()))?;

    parse_value(value, 0)
}

fn parse_value(node: Node, depth: usize) -> Result<PlistValue, NoteError> {
    if depth > MAX_NESTING {
        return Err(NoteError::Plist(format!(
            "Values nested deeper than {MAX_NESTING} levels"
        )));
    }

    match node.tag_name().name() {
        "dict" => parse_dict(node, depth),
        "array" => node
            .children()
            .filter(|n| n.is_element())
            .map(|child| parse_value(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(PlistValue::Array),
        "string" => Ok(PlistValue::String(text_of(node))),
        "integer" => {
            let raw = text_of(node);
            raw.trim()
                .parse::<i64>()
                .map(PlistValue::Integer)
                .map_err(|e| NoteError::Plist(format!("Invalid integer '{raw}': {e}")))
        }
        "real" => {
            let raw = text_of(node);
            raw.trim()
                .parse::<f64>()
                .map(PlistValue::Real)
                .map_err(|e| NoteError::Plist(format!("Invalid real '{raw}': {e}")))
        }
        "true" => Ok(PlistValue::Boolean(true)),
        "false" => Ok(PlistValue::Boolean(false)),
        "date" => Ok(PlistValue::Date(text_of(node).trim().to_string())),
        "data" => Ok(PlistValue::Data(
            text_of(node).split_whitespace().collect::<String>(),
        )),
        other => Err(NoteError::Plist(format!("Unknown value element <{other}>"))),
    }
}

fn parse_dict(node: Node, depth: usize) -> Result<PlistValue, NoteError> {
    let mut map = BTreeMap::new();
    let mut elements = node.children().filter(|n| n.is_element());

    while let Some(key_node) = elements.next() {
        if key_node.tag_name().name() != "key" {
            return Err(NoteError::Plist(format!(
                "Expected <key> in <dict>, found <{}>",
                key_node.tag_name().name()
            )));
        }
        let key = text_of(key_node);
        let value_node = elements
            .next()
            .ok_or_else(|| NoteError::Plist(format!("Key '{key}' has no value")))?;
        map.insert(key, parse_value(value_node, depth + 1)?);
    }

    Ok(PlistValue::Dict(map))
}

fn text_of(node: Node) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
