//! JSON serialization for screening results.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::result::ScreeningResult;

/// Serialize a ScreeningResult to a compact JSON string.
///
/// # Errors
///
/// Returns `Serialization` if serialization fails (should not happen for ScreeningResult).
pub fn to_json(result: &ScreeningResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}

/// Serialize a ScreeningResult to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns `Serialization` if serialization fails (should not happen for ScreeningResult).
pub fn to_json_pretty(result: &ScreeningResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Parse a ScreeningResult previously written by [`to_json`] or [`to_json_pretty`].
///
/// # Errors
///
/// Returns `Serialization` if `json` is not a valid result.
pub fn from_json(json: &str) -> Result<ScreeningResult> {
    Ok(serde_json::from_str(json)?)
}

/// Write a pretty-printed result to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save_json(result: &ScreeningResult, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json_pretty(result)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a result written by [`save_json`].
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `Serialization` if it does not
/// hold a valid result.
pub fn load_json(path: impl AsRef<Path>) -> Result<ScreeningResult> {
    let json = fs::read_to_string(path)?;
    from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoundedDomain;
    use crate::error::MorrisError;
    use crate::result::{Metadata, SensitivityStatistics};
    use nalgebra::DMatrix;

    fn make_test_result() -> ScreeningResult {
        // d = 1, q = 1, N = 2
        let ee = DMatrix::from_row_slice(2, 1, &[2.0, -1.0]);
        ScreeningResult {
            domain: BoundedDomain::unit(1),
            input_design: DMatrix::from_row_slice(4, 1, &[0.0, 0.5, 1.0, 0.5]),
            output_design: DMatrix::from_row_slice(4, 1, &[0.0, 1.0, 1.5, 2.0]),
            statistics: SensitivityStatistics {
                input_dimension: 1,
                output_dimension: 1,
                absolute_elementary_effects: ee.abs(),
                elementary_effects: ee,
                mean: DMatrix::from_row_slice(1, 1, &[0.5]),
                mean_absolute: DMatrix::from_row_slice(1, 1, &[1.5]),
                standard_deviation: DMatrix::from_row_slice(1, 1, &[1.5]),
            },
            metadata: Metadata {
                trajectories: 2,
                base_size: 2,
                step: vec![0.5],
                seed: Some(7),
                runtime_secs: 1.5,
            },
        }
    }

    #[test]
    fn test_to_json() {
        let result = make_test_result();
        let json = to_json(&result).unwrap();
        assert!(json.contains("\"trajectories\":2"));
        assert!(json.contains("\"seed\":7"));
    }

    #[test]
    fn test_to_json_pretty() {
        let result = make_test_result();
        let json = to_json_pretty(&result).unwrap();
        assert!(json.contains('\n')); // Pretty print has newlines
        assert!(json.contains("mean_absolute"));
    }

    #[test]
    fn test_from_json_restores_result() {
        let result = make_test_result();
        let restored = from_json(&to_json(&result).unwrap()).unwrap();
        assert_eq!(restored.input_design, result.input_design);
        assert_eq!(restored.statistics.mean, result.statistics.mean);
        assert_eq!(restored.domain, result.domain);
        assert_eq!(restored.metadata.step, vec![0.5]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            from_json("{\"domain\": 3}"),
            Err(MorrisError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let result = make_test_result();

        save_json(&result, &path).unwrap();
        let loaded = load_json(&path).unwrap();
        assert_eq!(loaded.output_design, result.output_design);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_json(dir.path().join("missing.json")),
            Err(MorrisError::Io(_))
        ));
    }
}
