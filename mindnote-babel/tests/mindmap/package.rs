//! Package loading tests

use crate::common::sample_package;
use mindnote_babel::mindmap::plist::PlistValue;
use mindnote_babel::publish::{dump, DUMP_FILE};
use mindnote_babel::{MindNodePackage, NoteError, TaskState};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_opens_sample_package() {
    let package = MindNodePackage::open(sample_package()).expect("fixture to open");

    assert_eq!(package.basename(), "Sample");

    let canvas = package.canvas().expect("canvas");
    assert_eq!(canvas.mind_maps.len(), 1);

    let root = &canvas.mind_maps[0].root;
    assert_eq!(root.title, "<p>Project Notes</p>");
    assert_eq!(root.children.len(), 2);

    let details = &root.children[0].children[0].children[0];
    assert_eq!(details.title, "Details");
    let states: Vec<TaskState> = details.children.iter().map(|n| n.task_state).collect();
    assert_eq!(states, vec![TaskState::Open, TaskState::Done, TaskState::None]);
    assert_eq!(details.children[2].attachment.as_deref(), Some("photo.png"));
}

#[test]
fn test_raw_contents_are_kept() {
    let package = MindNodePackage::open(sample_package()).expect("fixture to open");
    let node_id = package
        .contents()
        .get_path(&["canvas", "mindMaps"])
        .and_then(PlistValue::as_array)
        .and_then(|maps| maps[0].get_path(&["mainNode", "nodeID"]))
        .and_then(PlistValue::as_str);
    assert_eq!(node_id, Some("ROOT"));
}

#[test]
fn test_dump_writes_json() {
    let dir = tempdir().unwrap();
    let target = dir.path().join(DUMP_FILE);

    dump(sample_package(), &target).expect("dump");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).expect("valid json");
    assert_eq!(
        json["canvas"]["mindMaps"][0]["mainNode"]["nodeID"],
        serde_json::json!("ROOT")
    );
    assert_eq!(
        json["canvas"]["mindMaps"][0]["mainNode"]["subnodes"][1]["title"]["text"],
        serde_json::json!("Reading")
    );
}

#[test]
fn test_missing_contents_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = MindNodePackage::open(dir.path()).unwrap_err();
    assert!(matches!(err, NoteError::Io { .. }));
    assert!(err.to_string().contains("contents.xml"));
}

#[test]
fn test_malformed_contents_is_a_plist_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("contents.xml"), "<plist><dict>").unwrap();
    let err = MindNodePackage::open(dir.path()).unwrap_err();
    assert!(matches!(err, NoteError::Plist(_)));
}
