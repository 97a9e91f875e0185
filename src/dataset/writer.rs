use std::fs;
use std::path::Path;
use arrow::csv::Writer;
use arrow::record_batch::RecordBatch;
use crate::dataset::error::IngestError;

pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

/// Write both partitions as `train.csv` and `test.csv` under `output_path`.
///
/// Missing parent directories are created and existing files are overwritten.
pub fn save_dataset(output_path: &Path, train: &RecordBatch, test: &RecordBatch) -> Result<(), IngestError> {
    fs::create_dir_all(output_path).map_err(|e| {
        tracing::debug!("create directory {} failed", output_path.display());
        IngestError::PersistError { path: output_path.to_path_buf(), message: e.to_string() }
    })?;
    write_csv(&output_path.join(TRAIN_FILE), train)?;
    write_csv(&output_path.join(TEST_FILE), test)?;
    Ok(())
}

/// Serialize `batch` with a header row and no index column.
fn write_csv(record_file: &Path, batch: &RecordBatch) -> Result<(), IngestError> {
    let persist_error = |message: String| IngestError::PersistError {
        path: record_file.to_path_buf(),
        message,
    };
    let mut content: Vec<u8> = Vec::new();
    {
        let mut writer = Writer::new(&mut content);
        writer.write(batch).map_err(|e| persist_error(e.to_string()))?;
    }
    fs::write(record_file, &content).map_err(|e| persist_error(e.to_string()))?;
    tracing::debug!("wrote {} rows to {}", batch.num_rows(), record_file.display());
    Ok(())
}
