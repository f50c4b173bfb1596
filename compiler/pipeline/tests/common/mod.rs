#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pipeline::CompileRootRegistrar;
use repository::LocalRepositoryResolver;
use resolver::{ArtifactRequest, ArtifactResolver, ResolutionError};
use types::{ArtifactCoordinate, ArtifactItem, PipelineConfig};
use zip::write::SimpleFileOptions;

pub const WIDGET_YML: &str = "name: Widget\ndescription: \"a widget\"\nfields:\n  - name: id\n    type: string\n";

/// Scratch project with a local repository and output directories.
pub struct Workspace {
    pub temp: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self { Self { temp: tempfile::tempdir().expect("tempdir") } }

    pub fn root(&self) -> &Path { self.temp.path() }

    pub fn repo(&self) -> LocalRepositoryResolver {
        LocalRepositoryResolver::new(self.root().join("repo"))
    }

    pub fn generated(&self) -> PathBuf { self.root().join("generated") }

    /// Zip `members` and install it as `com.example:<name>:<version>` with `extension`.
    pub fn install_zip(
        &self,
        name: &str,
        version: &str,
        extension: &str,
        members: &[(&str, &str)],
    ) -> PathBuf {
        let scratch = self.root().join(format!("{name}-scratch.zip"));
        write_zip(&scratch, members);
        let request = ArtifactRequest {
            group: "com.example".to_string(),
            name: name.to_string(),
            version: version.to_string(),
            classifier: None,
            extension: extension.to_string(),
        };
        self.repo().install(&request, &scratch).expect("install")
    }

    pub fn item(&self, name: &str, version: &str, kind: &str) -> ArtifactItem {
        ArtifactItem::new(
            ArtifactCoordinate::new("com.example", name, version).with_kind(kind),
            self.root().join("unpacked").join(name),
        )
    }

    pub fn config(&self, items: Vec<ArtifactItem>) -> PipelineConfig {
        PipelineConfig::new(self.generated(), items).with_project_root(self.root())
    }
}

pub fn write_zip(path: &Path, members: &[(&str, &str)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).expect("create zip"));
    for (name, body) in members {
        writer.start_file(*name, SimpleFileOptions::default()).expect("start file");
        writer.write_all(body.as_bytes()).expect("write member");
    }
    writer.finish().expect("finish zip");
}

/// Resolves every request to one fixed path.
pub struct FixedResolver(pub PathBuf);

impl ArtifactResolver for FixedResolver {
    fn resolve(&self, _request: &ArtifactRequest) -> Result<PathBuf, ResolutionError> {
        Ok(self.0.clone())
    }
}

/// Remembers registered compile roots.
#[derive(Default)]
pub struct RecordingRegistrar(pub Mutex<Vec<PathBuf>>);

impl CompileRootRegistrar for RecordingRegistrar {
    fn add_compile_source_root(&self, dir: &Path) {
        if let Ok(mut roots) = self.0.lock() {
            roots.push(dir.to_path_buf());
        }
    }
}

impl RecordingRegistrar {
    pub fn roots(&self) -> Vec<PathBuf> {
        self.0.lock().map(|r| r.clone()).unwrap_or_default()
    }
}
