//! Tarballs, plain and gzip-compressed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};
use tracing::warn;
use types::OverwritePolicy;

use crate::strategy::{member_target, prepare_target, UnpackError, UnpackStrategy, Unpacked};

/// Unpacks uncompressed `.tar` archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarStrategy;

/// Unpacks `.tar.gz`, `.tgz` and `.crate` archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzStrategy;

impl UnpackStrategy for TarStrategy {
    fn name(&self) -> &str { "tar" }

    fn unpack(
        &self,
        archive: &Path,
        destination: &Path,
        overwrite: OverwritePolicy,
    ) -> Result<Unpacked, UnpackError> {
        unpack_tar(File::open(archive)?, destination, overwrite)
    }
}

impl UnpackStrategy for TarGzStrategy {
    fn name(&self) -> &str { "tar.gz" }

    fn unpack(
        &self,
        archive: &Path,
        destination: &Path,
        overwrite: OverwritePolicy,
    ) -> Result<Unpacked, UnpackError> {
        unpack_tar(GzDecoder::new(File::open(archive)?), destination, overwrite)
    }
}

fn unpack_tar<R: Read>(
    reader: R,
    destination: &Path,
    overwrite: OverwritePolicy,
) -> Result<Unpacked, UnpackError> {
    let mut archive = Archive::new(reader);
    let mut unpacked = Unpacked::default();

    for entry in archive.entries()? {
        let mut entry = entry?;
        let relative = entry.path()?.into_owned();
        let name = relative.display().to_string();
        let target = member_target(destination, &relative, &name)?;

        match entry.header().entry_type() {
            EntryType::Directory => {
                std::fs::create_dir_all(&target)?;
            }
            EntryType::Regular | EntryType::Continuous => {
                if !prepare_target(&target, overwrite)? {
                    unpacked.kept.push(target);
                    continue;
                }
                entry.unpack(&target)?;
                unpacked.written.push(target);
            }
            // pax/GNU metadata records are consumed by the reader itself
            other => warn!(entry = %name, kind = ?other, "skipping non-regular tar entry"),
        }
    }

    Ok(unpacked)
}
