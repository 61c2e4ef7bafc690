pub mod diagnostics;
pub mod lexer;
pub mod parser;

use std::path::{Path, PathBuf};
use std::sync::Once;

pub use diagnostics::{ScanError, SourceError};
pub use parser::{ClassDecl, Scanner};

/// Scan a source string for class declarations.
///
/// Returns every non-generic class in source order, or the first error.
/// Each call owns its own scanner state, so concurrent calls are independent.
pub fn scan_source(source: &str) -> Result<Vec<ClassDecl>, ScanError> {
    Scanner::new(source).scan()
}

/// Read `path` as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|e| SourceError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| SourceError::InvalidUtf8 { path: path.to_path_buf() })
}

/// Read and scan a single file.
pub fn scan_file(path: &Path) -> Result<Vec<ClassDecl>, SourceError> {
    let source = read_source(path)?;
    scan_source(&source).map_err(|source| SourceError::Scan { path: path.to_path_buf(), source })
}

/// Expand `root` into the files to scan. A file is returned as is; a
/// directory is walked recursively for files ending in `.{extension}`,
/// sorted by path.
pub fn collect_sources(root: &Path, extension: &str) -> Result<Vec<PathBuf>, SourceError> {
    if !root.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| SourceError::io(&dir, e))?;
        let paths = entries.map(|entry| entry.map(|e| e.path()));
        sort_entries(&dir, paths, extension, &mut files, &mut pending)?;
    }
    files.sort();
    Ok(files)
}

/// Splits one directory listing into subdirectories still to walk and
/// matching files. The first unreadable entry fails the walk.
fn sort_entries(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
    extension: &str,
    files: &mut Vec<PathBuf>,
    pending: &mut Vec<PathBuf>,
) -> Result<(), SourceError> {
    for entry in entries {
        let path = entry.map_err(|e| SourceError::io(dir, e))?;
        if path.is_dir() {
            pending.push(path);
        } else if path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    Ok(())
}

static TRACING_INIT: Once = Once::new();

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `sharpscan=debug`
/// (reports skipped generic classes) over `sharpscan=warn`. Safe to call
/// more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let default = if verbose { "sharpscan=debug" } else { "sharpscan=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(filter)
            .try_init();
    });
}
