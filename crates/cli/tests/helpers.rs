use std::fs;
use std::path::Path;

use gc_warden::{infer_format, load_annotation_filter, sha256_bytes};
use tempfile::tempdir;

#[test]
fn infer_format_prefers_jsonl_extensions() {
    assert_eq!(infer_format(Path::new("graph.jsonl")), "jsonl");
    assert_eq!(infer_format(Path::new("graph.json")), "jsonl");
    assert_eq!(infer_format(Path::new("callgraph.txt")), "callgraph");
    assert_eq!(infer_format(Path::new("callgraph")), "callgraph");
}

#[test]
fn sha256_bytes_matches_the_known_vector() {
    assert_eq!(
        sha256_bytes(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(sha256_bytes(b"abc").len(), 64);
}

#[test]
fn absent_annotation_file_yields_a_pass_through_filter() {
    let filter = load_annotation_filter(None).expect("no file is a valid configuration");
    assert!(!filter.is_ignored("f"));
    assert!(!filter.forces_gc("f"));
}

#[test]
fn yaml_annotations_load_and_compile() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("annotations.yaml");
    fs::write(&path, "ignore_functions:\n  - Ignored\ntreat_as_gc:\n  - Forced\n")
        .expect("write yaml");

    let filter = load_annotation_filter(Some(&path)).expect("yaml should load");
    assert!(filter.is_ignored("Ignored"));
    assert!(!filter.is_ignored("Forced"));
    assert!(filter.forces_gc("Forced"));
}

#[test]
fn json_annotations_load_by_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("annotations.json");
    fs::write(&path, r#"{"treat_as_gc": ["Forced"]}"#).expect("write json");

    let filter = load_annotation_filter(Some(&path)).expect("json should load");
    assert!(filter.forces_gc("Forced"));
    assert!(!filter.is_ignored("Forced"));
}

#[test]
fn contradictory_annotation_files_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("annotations.yaml");
    fs::write(&path, "ignore_functions:\n  - Both\ntreat_as_gc:\n  - Both\n").expect("write yaml");

    let err = load_annotation_filter(Some(&path)).expect_err("contradiction should be rejected");
    assert!(format!("{err:#}").contains("both"));
}

#[test]
fn missing_annotation_file_is_an_error() {
    let err = load_annotation_filter(Some(Path::new("/nonexistent/annotations.yaml")))
        .expect_err("missing file should be rejected");
    assert!(err.to_string().contains("Failed to read annotations"));
}
