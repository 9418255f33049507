use std::path::{Path, PathBuf};

use swiftward_compiler::SourceMap;

/// Reads all inputs into one source map; unreadable files are reported and
/// the whole invocation fails.
pub fn load_sources(files: &[PathBuf]) -> Result<SourceMap, String> {
    let mut sources = SourceMap::new();
    for file in files {
        let content = std::fs::read_to_string(file)
            .map_err(|err| format!("{}: {err}", file.display()))?;
        sources.add(&file.display().to_string(), &content);
    }
    Ok(sources)
}

/// `Shape.m` → `Shape.swift`, preserving the stem only.
pub fn swift_file_name(input: &str) -> PathBuf {
    let stem = Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "out".to_string());
    PathBuf::from(format!("{stem}.swift"))
}

#[cfg(test)]
mod tests {
    use super::swift_file_name;
    use std::path::PathBuf;

    #[test]
    fn swift_file_names_keep_the_stem() {
        assert_eq!(swift_file_name("src/Shape.m"), PathBuf::from("Shape.swift"));
        assert_eq!(swift_file_name("Shape.h"), PathBuf::from("Shape.swift"));
        assert_eq!(swift_file_name("Shape"), PathBuf::from("Shape.swift"));
    }
}
