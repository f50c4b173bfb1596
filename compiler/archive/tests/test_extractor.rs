use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use archive::{ArchiveExtractor, ExtractionError};
use flate2::write::GzEncoder;
use flate2::Compression;
use types::OverwritePolicy;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, members: &[(&str, &str)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).expect("create zip"));
    for (name, body) in members {
        writer.start_file(*name, SimpleFileOptions::default()).expect("start file");
        writer.write_all(body.as_bytes()).expect("write member");
    }
    writer.finish().expect("finish zip");
}

fn write_tar_gz(path: &Path, members: &[(&str, &str)]) {
    let encoder = GzEncoder::new(File::create(path).expect("create tgz"), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, body) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, body.as_bytes()).expect("append");
    }
    builder.into_inner().expect("tar").finish().expect("gzip");
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                found.extend(files_under(&path));
            } else {
                found.push(path);
            }
        }
    }
    found
}

#[test]
fn extracts_jar_by_declared_type() {
    let temp = tempfile::tempdir().expect("tempdir");
    let archive = temp.path().join("widget-api-1.0.jar");
    write_zip(&archive, &[("schemas/widget.yml", "name: Widget\n"), ("META-INF/MANIFEST.MF", "")]);
    let dest = temp.path().join("out/nested");

    let result = ArchiveExtractor::default()
        .extract(&archive, "jar", &dest, OverwritePolicy::Always)
        .expect("extracts");

    assert_eq!(result.len(), 2);
    assert_eq!(
        fs::read_to_string(dest.join("schemas/widget.yml")).expect("member written"),
        "name: Widget\n"
    );
}

#[test]
fn falls_back_to_extension_when_type_unknown() {
    let temp = tempfile::tempdir().expect("tempdir");
    let archive = temp.path().join("bundle-2.0.tar.gz");
    write_tar_gz(&archive, &[("api/order.yaml", "name: Order\nfields: []\n")]);
    let dest = temp.path().join("unpacked");

    let result = ArchiveExtractor::default()
        .extract(&archive, "custom-bundle", &dest, OverwritePolicy::Always)
        .expect("extension fallback");

    assert_eq!(result.files, vec![dest.join("api/order.yaml")]);
}

#[test]
fn unknown_type_and_extension_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let archive = temp.path().join("bundle.rar");
    fs::write(&archive, b"not really").expect("write");

    let err = ArchiveExtractor::default()
        .extract(&archive, "rar", &temp.path().join("out"), OverwritePolicy::Always)
        .expect_err("no strategy");
    assert!(matches!(err, ExtractionError::UnknownArchiveType { ref kind, .. } if kind == "rar"));
}

#[test]
fn directory_input_is_not_packaged_and_writes_nothing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let classes = temp.path().join("target/classes");
    fs::create_dir_all(&classes).expect("mkdir");
    let dest = temp.path().join("out");

    let err = ArchiveExtractor::default()
        .extract(&classes, "jar", &dest, OverwritePolicy::Always)
        .expect_err("directory input");

    assert!(matches!(err, ExtractionError::NotPackaged { .. }));
    assert!(!dest.exists());
    assert!(err.to_string().contains("not been packaged"));
}

#[test]
fn corrupt_archive_reports_source_and_destination() {
    let temp = tempfile::tempdir().expect("tempdir");
    let archive = temp.path().join("broken.zip");
    fs::write(&archive, b"PK garbage").expect("write");
    let dest = temp.path().join("out");

    let err = ArchiveExtractor::default()
        .extract(&archive, "zip", &dest, OverwritePolicy::Always)
        .expect_err("corrupt");

    let message = err.to_string();
    assert!(message.contains("broken.zip"), "{message}");
    assert!(message.contains(&dest.display().to_string()), "{message}");
}

#[test]
fn rejects_entries_escaping_destination() {
    let temp = tempfile::tempdir().expect("tempdir");
    let archive = temp.path().join("evil.zip");
    write_zip(&archive, &[("../evil.yml", "name: Evil\n")]);
    let dest = temp.path().join("out");

    let err = ArchiveExtractor::default()
        .extract(&archive, "zip", &dest, OverwritePolicy::Always)
        .expect_err("unsafe entry");

    assert!(matches!(err, ExtractionError::UnsafeEntry { .. }));
    assert!(!temp.path().join("evil.yml").exists());
}

#[test]
fn never_overwrite_keeps_existing_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let archive = temp.path().join("api.zip");
    write_zip(&archive, &[("a.yml", "from archive"), ("b.yml", "from archive")]);
    let dest = temp.path().join("out");
    fs::create_dir_all(&dest).expect("mkdir");
    fs::write(dest.join("a.yml"), "local edit").expect("seed");

    let result = ArchiveExtractor::default()
        .extract(&archive, "zip", &dest, OverwritePolicy::Never)
        .expect("extracts");

    assert_eq!(result.files, vec![dest.join("b.yml")]);
    assert_eq!(result.kept, vec![dest.join("a.yml")]);
    assert!(result.contains(&dest.join("a.yml")));
    assert_eq!(fs::read_to_string(dest.join("a.yml")).expect("read"), "local edit");
    assert_eq!(files_under(&dest).len(), 2);

    ArchiveExtractor::default()
        .extract(&archive, "zip", &dest, OverwritePolicy::Always)
        .expect("re-extracts");
    assert_eq!(fs::read_to_string(dest.join("a.yml")).expect("read"), "from archive");
}

#[test]
fn leftover_files_are_not_members() {
    let temp = tempfile::tempdir().expect("tempdir");
    let archive = temp.path().join("api.zip");
    write_zip(&archive, &[("widget.yml", "name: Widget")]);
    let dest = temp.path().join("out");
    fs::create_dir_all(&dest).expect("mkdir");
    fs::write(dest.join("gadget.yml"), "name: Gadget").expect("seed");

    let result = ArchiveExtractor::default()
        .extract(&archive, "zip", &dest, OverwritePolicy::Always)
        .expect("extracts");

    let members: Vec<_> = result.members().collect();
    assert_eq!(members, vec![dest.join("widget.yml").as_path()]);
    assert!(!result.contains(&dest.join("gadget.yml")));
}
