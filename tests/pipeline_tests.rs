mod common;

use common::fixtures::*;
use common::pdf_assertions::*;
use common::{render, TestResult};
use serde_json::json;
use std::fs;
use tempfile::tempdir;
use vitae::{render_to_file, LayoutConfig, PipelineError, RenderPaths, Stage, ValidationIssue};

fn write_inputs(dir: &std::path::Path, text: &serde_json::Value, shapes: &serde_json::Value) -> RenderPaths {
    let paths = RenderPaths {
        text: dir.join("coordinates.json"),
        shapes: dir.join("shapes.json"),
        output: dir.join("out").join("cv.pdf"),
        assets: dir.join("assets"),
    };
    fs::write(&paths.text, text.to_string()).expect("write text");
    fs::write(&paths.shapes, shapes.to_string()).expect("write shapes");
    paths
}

#[test]
fn test_render_to_file_creates_output_directory() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempdir()?;
    let paths = write_inputs(dir.path(), &sample_text(), &sample_shapes());
    let report = render_to_file(&LayoutConfig::default(), &paths)?;

    let bytes = fs::read(&paths.output)?;
    let doc = lopdf::Document::load_mem(&bytes)?;
    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(report.shapes_drawn, 2);
    assert_eq!(report.text_drawn, 11);
    assert_eq!(link_annotations(&doc).len(), report.links);
    Ok(())
}

#[test]
fn test_invalid_text_aborts_before_any_output() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempdir()?;
    let bad = json!([text("Jane Doe", 40.0, 60.0, 20.0), { "text": "No size", "x": 1, "y": 2 }]);
    let paths = write_inputs(dir.path(), &bad, &sample_shapes());

    let err = render_to_file(&LayoutConfig::default(), &paths).unwrap_err();
    match err {
        PipelineError::Validation(e) => assert_eq!(
            e.issues,
            vec![ValidationIssue::MissingFields { index: 1, fields: vec!["size"] }]
        ),
        other => panic!("expected a validation error, got {}", other),
    }
    assert!(!paths.output.exists());
    Ok(())
}

#[test]
fn test_empty_text_collection_is_fatal() {
    let _ = env_logger::builder().is_test(true).try_init();

    assert!(matches!(render(json!([]), sample_shapes()), Err(PipelineError::Validation(_))));
}

#[test]
fn test_bad_fill_color_is_fatal() {
    let _ = env_logger::builder().is_test(true).try_init();

    let shapes = json!([{ "type": "rect", "x": 0, "y": 0, "width": 1, "height": 1, "fill_color": [0.1, 0.2] }]);
    assert!(matches!(render(sample_text(), shapes), Err(PipelineError::Validation(_))));
}

#[test]
fn test_missing_input_file_is_reported_with_path() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempdir()?;
    let mut paths = write_inputs(dir.path(), &sample_text(), &sample_shapes());
    paths.shapes = dir.path().join("nope.json");

    match render_to_file(&LayoutConfig::default(), &paths) {
        Err(PipelineError::Io { path, .. }) => assert_eq!(path, paths.shapes),
        other => panic!("expected an IO error, got {:?}", other.map(|r| r.to_string())),
    }
    Ok(())
}

#[test]
fn test_malformed_and_non_array_json_are_rejected() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempdir()?;
    let paths = write_inputs(dir.path(), &sample_text(), &sample_shapes());

    fs::write(&paths.text, "[{ not json")?;
    assert!(matches!(
        render_to_file(&LayoutConfig::default(), &paths),
        Err(PipelineError::Json { .. })
    ));

    fs::write(&paths.text, r#"{"text": "Jane"}"#)?;
    assert!(matches!(
        render_to_file(&LayoutConfig::default(), &paths),
        Err(PipelineError::NotAnArray { .. })
    ));
    assert!(!paths.output.exists());
    Ok(())
}

#[test]
fn test_assembler_stages_are_observable() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = LayoutConfig::default();
    let mut assembler = vitae::DocumentAssembler::new(&config, vitae::FontLibrary::new());
    assembler.load(vec![text("Jane Doe", 40.0, 60.0, 20.0)], vec![])?;
    assembler.validate()?;
    assert_eq!(assembler.stage(), Stage::Validated);
    assert!(matches!(assembler.finalize(&mut Vec::new()), Err(PipelineError::Stage { .. })));
    assembler.render_shapes()?;
    assert_eq!(assembler.stage(), Stage::ShapesRendered);
    Ok(())
}

#[test]
fn test_metadata_is_written_to_info() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut config = LayoutConfig::default();
    config.metadata.title = Some("Jane Doe CV".into());
    let pdf = common::render_with(&config, sample_text(), json!([]))?;

    let info_id = pdf.doc.trailer.get(b"Info")?.as_reference()?;
    let info = pdf.doc.get_object(info_id)?.as_dict()?;
    match info.get(b"Title")? {
        lopdf::Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"Jane Doe CV"),
        other => panic!("unexpected Title {:?}", other),
    }
    Ok(())
}
