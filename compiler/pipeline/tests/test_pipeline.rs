mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use archive::ExtractionError;
use codegen::EmitError;
use common::{FixedResolver, RecordingRegistrar, Workspace, WIDGET_YML};
use pipeline::{ConfigurationError, ItemState, Pipeline, PipelineError, Stage};
use ir::SchemaDocument;
use schema::{ParseErrorKind, SchemaFormat, SchemaParseError};

#[test]
fn generates_one_source_per_schema() {
    let ws = Workspace::new();
    ws.install_zip("widget-api", "1.0.0", "zip", &[("schemas/widget.yml", WIDGET_YML)]);
    let config = ws.config(vec![ws.item("widget-api", "1.0.0", "zip")]);

    let report = pipeline::run(&config, Arc::new(ws.repo())).expect("runs");

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.documents_generated, 1);
    let generated = ws.generated().join("Widget.rs");
    assert_eq!(report.generated, vec![generated.clone()]);

    let text = fs::read_to_string(&generated).expect("generated file exists");
    assert!(text.contains("pub id: String,"));
    assert!(text.contains("\"a widget\""));
    assert_eq!(fs::read_dir(ws.generated()).expect("list").count(), 1);
    assert_eq!(report.items[0].state, ItemState::Done);
}

#[test]
fn malformed_document_does_not_block_siblings() {
    let ws = Workspace::new();
    ws.install_zip(
        "widget-api",
        "1.0.0",
        "jar",
        &[("a/broken.yml", "description: no name here\nfields: []\n"), ("b/widget.yml", WIDGET_YML)],
    );
    let config = ws.config(vec![ws.item("widget-api", "1.0.0", "jar")]);

    let report = pipeline::run(&config, Arc::new(ws.repo())).expect("runs");

    assert_eq!(report.documents_generated, 1);
    assert_eq!(report.documents_failed, 1);
    assert!(ws.generated().join("Widget.rs").exists());

    let failure = &report.failures[0];
    assert_eq!(failure.stage, Stage::Parse);
    assert!(failure.source.as_ref().is_some_and(|p| p.ends_with("a/broken.yml")));
    match &failure.error {
        PipelineError::Parse(e) => assert!(matches!(e.kind(), ParseErrorKind::MissingName)),
        other => panic!("expected parse error, got {other}"),
    }
    assert_eq!(report.items[0].state, ItemState::Done);
}

#[test]
fn empty_item_list_is_a_configuration_error_without_writes() {
    let ws = Workspace::new();
    let config = ws.config(Vec::new());

    let err = pipeline::run(&config, Arc::new(ws.repo())).expect_err("nothing to do");

    assert!(matches!(err, ConfigurationError::NoArtifactItems));
    assert_eq!(fs::read_dir(ws.root()).expect("list").count(), 0);
}

#[test]
fn incomplete_coordinate_is_rejected_before_running() {
    let ws = Workspace::new();
    let mut item = ws.item("widget-api", "1.0.0", "zip");
    item.coordinate = types::ArtifactCoordinate::new("", "widget-api", "1.0.0");
    let config = ws.config(vec![item]);

    let err = pipeline::run(&config, Arc::new(ws.repo())).expect_err("invalid");
    assert!(matches!(err, ConfigurationError::IncompleteCoordinate { field: "group", .. }));
    assert!(!ws.generated().exists());
}

#[test]
fn resolution_failure_only_fails_that_item() {
    let ws = Workspace::new();
    ws.install_zip("widget-api", "1.0.0", "zip", &[("widget.yml", WIDGET_YML)]);
    let config = ws.config(vec![
        ws.item("missing-api", "3.0.0", "zip"),
        ws.item("widget-api", "", "zip"),
    ]);

    let report = pipeline::run(&config, Arc::new(ws.repo())).expect("runs");

    assert_eq!(report.items[0].state, ItemState::Failed(Stage::Locate));
    assert_eq!(report.items[1].state, ItemState::Done);
    assert_eq!(report.documents_generated, 1);
    assert_eq!(report.documents_failed, 0);
    assert!(matches!(report.failures[0].error, PipelineError::Resolution(_)));
    assert!(report.failures[0].to_string().contains("missing-api"));
}

#[test]
fn unregistered_type_falls_back_to_extension() {
    let ws = Workspace::new();
    let archive = ws.root().join("bundle.zip");
    common::write_zip(&archive, &[("widget.yml", WIDGET_YML)]);
    let config = ws.config(vec![ws.item("bundle", "1.0.0", "custom-bundle")]);

    let report = pipeline::run(&config, Arc::new(FixedResolver(archive))).expect("runs");

    assert!(report.is_success(), "{:?}", report.failures);
    assert!(ws.generated().join("Widget.rs").exists());
}

#[test]
fn directory_artifact_fails_extraction() {
    let ws = Workspace::new();
    let classes = ws.root().join("target/classes");
    fs::create_dir_all(&classes).expect("mkdir");
    let item = ws.item("local-module", "1.0.0", "jar");
    let unpack_dir = item.output_directory.clone();
    let config = ws.config(vec![item]);

    let report = pipeline::run(&config, Arc::new(FixedResolver(classes))).expect("runs");

    assert_eq!(report.items[0].state, ItemState::Failed(Stage::Extract));
    assert!(matches!(
        report.failures[0].error,
        PipelineError::Extraction(ExtractionError::NotPackaged { .. })
    ));
    assert!(!unpack_dir.exists());
}

#[test]
fn name_collisions_keep_the_first_document() {
    let ws = Workspace::new();
    ws.install_zip("first-api", "1.0.0", "zip", &[("widget.yml", WIDGET_YML)]);
    ws.install_zip(
        "second-api",
        "1.0.0",
        "zip",
        &[("other.yaml", "name: Widget\ndescription: imposter\nfields: []\n")],
    );
    let config = ws.config(vec![
        ws.item("first-api", "1.0.0", "zip"),
        ws.item("second-api", "1.0.0", "zip"),
    ]);

    let report = pipeline::run(&config, Arc::new(ws.repo())).expect("runs");

    assert_eq!(report.documents_generated, 1);
    assert_eq!(report.documents_failed, 1);
    let text = fs::read_to_string(ws.generated().join("Widget.rs")).expect("read");
    assert!(text.contains("\"a widget\""));
    match &report.failures[0].error {
        PipelineError::Emit(EmitError::Collision { first, second, .. }) => {
            assert!(first.ends_with("first-api/widget.yml"));
            assert!(second.ends_with("second-api/other.yaml"));
        }
        other => panic!("expected collision, got {other}"),
    }
}

#[test]
fn registers_generated_and_extracted_directories() {
    let ws = Workspace::new();
    ws.install_zip("widget-api", "1.0.0", "zip", &[("widget.yml", WIDGET_YML)]);
    let config = ws.config(vec![
        ws.item("widget-api", "1.0.0", "zip"),
        ws.item("absent-api", "1.0.0", "zip"),
    ]);
    let registrar = Arc::new(RecordingRegistrar::default());

    let report = Pipeline::builder()
        .resolver(Arc::new(ws.repo()))
        .registrar(registrar.clone())
        .build()
        .expect("builds")
        .run(&config)
        .expect("runs");

    let expected = vec![ws.generated(), ws.root().join("unpacked/widget-api")];
    assert_eq!(registrar.roots(), expected);
    assert_eq!(report.output_directories, expected);
}

#[test]
fn rerun_produces_identical_output() {
    let ws = Workspace::new();
    ws.install_zip("widget-api", "1.0.0", "zip", &[("widget.yml", WIDGET_YML)]);
    let config = ws.config(vec![ws.item("widget-api", "1.0.0", "zip")]);

    pipeline::run(&config, Arc::new(ws.repo())).expect("first run");
    let first = fs::read(ws.generated().join("Widget.rs")).expect("read");
    let report = pipeline::run(&config, Arc::new(ws.repo())).expect("second run");
    let second = fs::read(ws.generated().join("Widget.rs")).expect("read");

    assert!(report.is_success());
    assert_eq!(first, second);
}

#[test]
fn builder_requires_a_resolver() {
    assert!(matches!(
        Pipeline::builder().build().err(),
        Some(ConfigurationError::MissingComponent("resolver"))
    ));
}

#[test]
fn summary_serialises_failures() {
    let ws = Workspace::new();
    let config = ws.config(vec![ws.item("missing-api", "1.0.0", "zip")]);
    let report = pipeline::run(&config, Arc::new(ws.repo())).expect("runs");

    let json = report.summary().to_json().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["success"], false);
    assert_eq!(value["failures"][0]["stage"], "locate");
    assert_eq!(value["items"][0]["state"]["state"], "failed");
    assert!(value["completed_at"].is_string());
}

#[test]
fn upgraded_artifact_drops_schemas_it_no_longer_ships() {
    let ws = Workspace::new();
    let gadget = "name: Gadget\nfields:\n  - name: id\n    type: string\n";
    ws.install_zip(
        "widget-api",
        "1.0.0",
        "zip",
        &[("widget.yml", WIDGET_YML), ("gadget.yml", gadget)],
    );
    let config = ws.config(vec![ws.item("widget-api", "", "zip")]);

    let first = pipeline::run(&config, Arc::new(ws.repo())).expect("first run");
    assert_eq!(first.documents_generated, 2);

    ws.install_zip("widget-api", "2.0.0", "zip", &[("widget.yml", WIDGET_YML)]);
    fs::remove_dir_all(ws.generated()).expect("clean generated");

    let second = pipeline::run(&config, Arc::new(ws.repo())).expect("second run");
    assert!(second.is_success(), "{:?}", second.failures);
    assert_eq!(second.generated, vec![ws.generated().join("Widget.rs")]);
    assert!(!ws.generated().join("Gadget.rs").exists());
}

/// Parses every file into an empty `Gizmo` schema.
struct GizmoFormat {
    suffixes: &'static [&'static str],
    accept: bool,
}

impl SchemaFormat for GizmoFormat {
    fn name(&self) -> &str { "gizmo" }

    fn suffixes(&self) -> &[&str] { self.suffixes }

    fn parse(&self, _bytes: &[u8], _origin: &Path) -> Result<SchemaDocument, SchemaParseError> {
        Ok(SchemaDocument::new("Gizmo"))
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.accept {
            path.extension().is_some_and(|ext| ext == "schema")
        } else {
            false
        }
    }
}

#[test]
fn dotted_format_suffix_reaches_the_parser() {
    let ws = Workspace::new();
    ws.install_zip("gizmo-api", "1.0.0", "zip", &[("gizmo.schema", "anything")]);
    let config = ws.config(vec![ws.item("gizmo-api", "1.0.0", "zip")]);

    let report = Pipeline::builder()
        .resolver(Arc::new(ws.repo()))
        .format(Arc::new(GizmoFormat { suffixes: &[".schema"], accept: true }))
        .build()
        .expect("builds")
        .run(&config)
        .expect("runs");

    assert!(report.is_success(), "{:?}", report.failures);
    assert!(ws.generated().join("Gizmo.rs").exists());
}

#[test]
fn discovered_file_without_a_format_is_reported() {
    let ws = Workspace::new();
    ws.install_zip("gizmo-api", "1.0.0", "zip", &[("gizmo.schema", "anything")]);
    let config = ws.config(vec![ws.item("gizmo-api", "1.0.0", "zip")]);

    let report = Pipeline::builder()
        .resolver(Arc::new(ws.repo()))
        .format(Arc::new(GizmoFormat { suffixes: &["schema"], accept: false }))
        .build()
        .expect("builds")
        .run(&config)
        .expect("runs");

    assert_eq!(report.documents_failed, 1);
    let failure = &report.failures[0];
    assert_eq!(failure.stage, Stage::Parse);
    assert!(failure.source.as_ref().is_some_and(|p| p.ends_with("gizmo.schema")));
    match &failure.error {
        PipelineError::Parse(e) => assert!(matches!(e.kind(), ParseErrorKind::NoFormat)),
        other => panic!("expected parse error, got {other}"),
    }
}
