//! Zip-family archives: `zip`, `jar`, `war`, `ear`.

use std::fs::File;
use std::io;
use std::path::Path;

use types::OverwritePolicy;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::strategy::{member_target, prepare_target, UnpackError, UnpackStrategy, Unpacked};

/// Unpacks zip archives with the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipStrategy;

impl From<ZipError> for UnpackError {
    fn from(error: ZipError) -> Self {
        match error {
            ZipError::Io(e) => UnpackError::Io(e),
            other => UnpackError::Archive(other.to_string()),
        }
    }
}

impl UnpackStrategy for ZipStrategy {
    fn name(&self) -> &str { "zip" }

    fn unpack(
        &self,
        archive: &Path,
        destination: &Path,
        overwrite: OverwritePolicy,
    ) -> Result<Unpacked, UnpackError> {
        let mut zip = ZipArchive::new(File::open(archive)?)?;
        let mut unpacked = Unpacked::default();

        for index in 0..zip.len() {
            let mut member = zip.by_index(index)?;
            let name = member.name().to_string();
            let Some(relative) = member.enclosed_name() else {
                return Err(UnpackError::UnsafeEntry(name));
            };
            let target = member_target(destination, &relative, &name)?;

            if member.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }
            if !prepare_target(&target, overwrite)? {
                unpacked.kept.push(target);
                continue;
            }

            let mut out = File::create(&target)?;
            io::copy(&mut member, &mut out)?;
            unpacked.written.push(target);
        }

        Ok(unpacked)
    }
}
