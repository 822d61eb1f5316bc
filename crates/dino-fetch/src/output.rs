//! Atomic JSON output for result mappings and error reports.

use crate::batch::ErrorReport;
use dino_common::{PageviewMap, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write `map` to `path` as one JSON object indented with four spaces.
///
/// The file is written to a temporary file in the same directory and renamed
/// into place, so readers never see a partial mapping. Missing parent
/// directories are created.
pub fn write_mapping(map: &PageviewMap, path: &Path) -> Result<()> {
    write_json_atomic(map, path)?;
    debug!(path = %path.display(), articles = map.len(), "Wrote result mapping");
    Ok(())
}

/// Write the error report next to the mapping it belongs to.
pub fn write_error_report(report: &ErrorReport, path: &Path) -> Result<()> {
    write_json_atomic(report, path)?;
    debug!(path = %path.display(), failures = report.failures.len(), "Wrote error report");
    Ok(())
}

/// `<dir>/<stem>.errors.json` for a mapping written to `<dir>/<stem>.json`.
pub fn errors_path_for(mapping_path: &Path) -> PathBuf {
    let stem = mapping_path
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy().into_owned());
    mapping_path.with_file_name(format!("{stem}.errors.json"))
}

fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&buffer)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dino_common::test_utils::{create_temp_dir, record_fixtures::desktop_map};

    #[test]
    fn test_mapping_uses_four_space_indent() {
        let dir = create_temp_dir();
        let path = dir.path().join("out.json");
        let map = desktop_map(&[("Tyrannosaurus", &[1, 2])]);

        write_mapping(&map, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"Tyrannosaurus\": [\n        {"));
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = create_temp_dir();
        let path = dir.path().join("data").join("data_clean").join("out.json");

        write_mapping(&PageviewMap::new(), &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = create_temp_dir();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale").unwrap();

        write_mapping(&desktop_map(&[("Iguanodon", &[3])]), &path).unwrap();

        let reloaded: PageviewMap =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded.articles().collect::<Vec<_>>(), vec!["Iguanodon"]);
    }

    #[test]
    fn test_errors_path() {
        let path = Path::new("data/dino_monthly_mobile_201501-202210.json");
        assert_eq!(
            errors_path_for(path),
            PathBuf::from("data/dino_monthly_mobile_201501-202210.errors.json")
        );
    }
}
