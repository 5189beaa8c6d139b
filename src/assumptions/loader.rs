//! JSON-based assumption loader
//!
//! Reads a `YearlyAssumptions` document such as data/assumptions.json

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::YearlyAssumptions;
use crate::error::ReturnsResult;

/// Default path to the assumptions document
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions.json";

/// Load and validate assumptions from a JSON file
pub fn load_assumptions(path: &Path) -> ReturnsResult<YearlyAssumptions> {
    let file = File::open(path)?;
    let assumptions: YearlyAssumptions = serde_json::from_reader(BufReader::new(file))?;
    assumptions.validate()?;

    log::debug!(
        "Loaded assumptions from {} ({} cost lines)",
        path.display(),
        assumptions.cost_lines.len()
    );

    Ok(assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReturnsError;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("property_returns_{}_{}", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_default_document() {
        let json = serde_json::to_string_pretty(&YearlyAssumptions::default()).unwrap();
        let path = write_temp("assumptions_ok.json", &json);

        let loaded = load_assumptions(&path).unwrap();
        assert_eq!(loaded, YearlyAssumptions::default());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let json = serde_json::to_string(&YearlyAssumptions::default().with_occupancy(150.0, 0.0)).unwrap();
        let path = write_temp("assumptions_bad.json", &json);

        let err = load_assumptions(&path).unwrap_err();
        assert!(matches!(err, ReturnsError::InvalidInput { .. }));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_bundled_assumptions_match_default() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_ASSUMPTIONS_PATH);
        assert_eq!(load_assumptions(&path).unwrap(), YearlyAssumptions::default());
    }

    #[test]
    fn test_missing_file() {
        let err = load_assumptions(Path::new("/nonexistent/assumptions.json")).unwrap_err();
        assert!(matches!(err, ReturnsError::Io(_)));
    }
}
