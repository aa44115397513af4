use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Every `.conf` file under `dir`, recursively, sorted by path.
pub fn find_conf_files(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("conf")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
