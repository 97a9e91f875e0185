use std::fs;
use std::path::Path;
use serde_yaml::Value;
use crate::dataset::error::IngestError;

const SECTION: &str = "data_ingestion";
const TEST_SIZE: &str = "test_size";

/// Read `data_ingestion.test_size` from a YAML params file.
///
/// The value is returned as stored; range checks belong to the splitter.
pub fn load_params(params_path: &Path) -> Result<f64, IngestError> {
    let contents = fs::read_to_string(params_path).map_err(|source| {
        tracing::debug!("params file {} not found", params_path.display());
        IngestError::ConfigNotFound { path: params_path.to_path_buf(), source }
    })?;
    let document: Value = serde_yaml::from_str(&contents).map_err(|e| {
        tracing::debug!("params file {} is not valid yaml", params_path.display());
        IngestError::ConfigParseError { path: params_path.to_path_buf(), message: e.to_string() }
    })?;
    let value = document
        .get(SECTION)
        .and_then(|section| section.get(TEST_SIZE))
        .ok_or_else(|| {
            tracing::debug!("params file {} has no {}.{}", params_path.display(), SECTION, TEST_SIZE);
            IngestError::ConfigKeyMissing {
                path: params_path.to_path_buf(),
                key: format!("{}.{}", SECTION, TEST_SIZE),
            }
        })?;
    let test_size = value.as_f64().ok_or_else(|| IngestError::ConfigParseError {
        path: params_path.to_path_buf(),
        message: format!("{}.{} is not a number: {:?}", SECTION, TEST_SIZE, value),
    })?;
    tracing::debug!("test size retrieved: {}", test_size);
    Ok(test_size)
}
