use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputGuardError {
    #[error("refusing to overwrite source file: output {output} matches input {input}")]
    SameAsSource { output: PathBuf, input: PathBuf },
    #[error("refusing to overwrite existing file {0} (pass --overwrite to replace it)")]
    Exists(PathBuf),
    #[error("failed to resolve {path}: {source}")]
    Resolve { path: PathBuf, source: io::Error },
}

/// Check that writing `output` neither clobbers `source` nor, unless
/// `overwrite` is set, an existing file.
pub fn check_output_path(output: &Path, source: &Path, overwrite: bool) -> Result<(), OutputGuardError> {
    if normalize_for_compare(output)? == normalize_for_compare(source)? {
        return Err(OutputGuardError::SameAsSource {
            output: output.to_path_buf(),
            input: source.to_path_buf(),
        });
    }
    if output.exists() && !overwrite {
        return Err(OutputGuardError::Exists(output.to_path_buf()));
    }
    Ok(())
}

fn normalize_for_compare(path: &Path) -> Result<PathBuf, OutputGuardError> {
    if path.exists() {
        return path.canonicalize().map_err(|source| OutputGuardError::Resolve {
            path: path.to_path_buf(),
            source,
        });
    }

    // Not on disk yet: `..` segments stay unresolved.
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| OutputGuardError::Resolve {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}
