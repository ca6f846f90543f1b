use std::path::Path;
use walkdir::WalkDir;

/// Relative paths of all files under `root` with `/` separators, sorted.
pub fn get_all_files(root: &Path) -> Vec<String> {
    let mut files: Vec<_> = WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.expect("access entry"))
        .filter(|entry| !entry.file_type().is_dir())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .expect("strip prefix from path")
                .components()
                .map(|component| component.as_os_str().to_str().expect("invalid UTF-8"))
                .collect::<Vec<_>>()
                .join("/")
        })
        .filter(|suffix| !suffix.is_empty())
        .collect();
    files.sort();
    files
}

/// Write `content` to `root/suffix`, creating parent directories as needed.
pub fn write_file(root: &Path, suffix: &str, content: &str) {
    let path = root.join(suffix);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directories");
    }
    std::fs::write(&path, content).expect("write file");
}
