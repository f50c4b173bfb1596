//! Output capabilities the orchestrator writes through.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// Destination for generated file contents.
pub trait SourceSink: Send + Sync {
    /// Write `bytes` to `path`, creating parent directories as needed.
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Host hook that adds a directory to the set of compile source roots.
pub trait CompileRootRegistrar: Send + Sync {
    /// Register `dir` for compilation.
    fn add_compile_source_root(&self, dir: &Path);
}

/// Writes to the filesystem, leaving files whose content is already identical untouched.
///
/// Unchanged files keep their modification time, so build tools that track
/// staleness do not recompile them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalFileSink;

impl IncrementalFileSink {
    /// Create the sink.
    pub fn new() -> Self { Self }
}

impl SourceSink for IncrementalFileSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        match fs::read(path) {
            Ok(existing) if existing == bytes => {
                debug!(file = %path.display(), "content unchanged, skipping write");
                return Ok(());
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    }
}
