//! Drive the pipeline the way a build script would: through the umbrella crate.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use schemagen::{
    ArtifactRequest, CompileRootRegistrar, Config, LocalRepositoryResolver, Pipeline,
};
use zip::write::SimpleFileOptions;

#[derive(Default)]
struct CollectingRegistrar(Mutex<Vec<PathBuf>>);

impl CompileRootRegistrar for CollectingRegistrar {
    fn add_compile_source_root(&self, dir: &Path) {
        self.0.lock().expect("lock").push(dir.to_path_buf());
    }
}

fn install(repo: &LocalRepositoryResolver, scratch: &Path, yml: &str) {
    let mut writer = zip::ZipWriter::new(File::create(scratch).expect("create"));
    writer.start_file("schemas/order.yml", SimpleFileOptions::default()).expect("start");
    writer.write_all(yml.as_bytes()).expect("write");
    writer.finish().expect("finish");
    let request = ArtifactRequest {
        group: "com.example".to_string(),
        name: "orders".to_string(),
        version: "2.1.0".to_string(),
        classifier: None,
        extension: "jar".to_string(),
    };
    repo.install(&request, scratch).expect("install");
}

#[test]
fn build_script_flow_registers_generated_root() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::write(
        root.join("schemagen.toml"),
        "output_directory = \"out\"\nunpack_directory = \"unpacked\"\n\n[repository]\nlocal = \"repo\"\n\n\
         [[artifact_items]]\ngroup = \"com.example\"\nname = \"orders\"\n",
    )
    .expect("write config");

    let config = Config::load(root.join("schemagen.toml")).expect("load");
    let repo = LocalRepositoryResolver::new(config.repository_root(root));
    install(
        &repo,
        &root.join("scratch.jar"),
        "name: Order\nfields:\n  - name: total\n    type: int\n",
    );

    let registrar = Arc::new(CollectingRegistrar::default());
    let report = Pipeline::builder()
        .resolver(Arc::new(repo))
        .registrar(registrar.clone())
        .build()
        .expect("build")
        .run(&config.pipeline_config(root))
        .expect("run");

    assert!(report.is_success(), "{:?}", report.failures);
    assert!(root.join("out/Order.rs").exists());
    let roots = registrar.0.lock().expect("lock").clone();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0], root.join("out"));
    assert!(roots[1].starts_with(root.join("unpacked")));
    assert!(!schemagen::schemagen_meta::VERSION.is_empty());
}
