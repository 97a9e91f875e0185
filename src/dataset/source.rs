use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use arrow::array::ArrayRef;
use arrow::compute::concat;
use arrow::csv::reader::infer_reader_schema;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use indicatif::ProgressBar;
use crate::dataset::error::IngestError;

const DELIMITER: u8 = b',';

/// Retrieve a CSV dataset from an http(s) url or a local path.
pub fn read_dataset(locator: &str) -> Result<RecordBatch, IngestError> {
    let content = if is_remote(locator) {
        fetch_remote(locator)?
    } else {
        fs::read(locator).map_err(|e| IngestError::AcquisitionError {
            locator: locator.to_string(),
            message: e.to_string(),
        })?
    };
    let dataset = parse_csv(locator, content)?;
    tracing::info!(
        "read {} rows with columns [{}] from {}",
        dataset.num_rows(),
        column_names(&dataset).join(", "),
        locator
    );
    Ok(dataset)
}

fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

fn fetch_remote(url: &str) -> Result<Vec<u8>, IngestError> {
    let acquisition_error = |e: reqwest::Error| IngestError::AcquisitionError {
        locator: url.to_string(),
        message: e.to_string(),
    };
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("fetching {}", url));
    pb.enable_steady_tick(100);
    let result = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes());
    pb.finish_and_clear();
    let bytes = result.map_err(acquisition_error)?;
    tracing::debug!("fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

/// Parse CSV bytes into a single batch, every column kept as text.
pub(crate) fn parse_csv(locator: &str, content: Vec<u8>) -> Result<RecordBatch, IngestError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyDataset(locator.to_string()));
    }
    let parse_error = |source: ArrowError| IngestError::DatasetParseError {
        locator: locator.to_string(),
        source,
    };
    let mut cursor = Cursor::new(content);
    let (header, _) = infer_reader_schema(&mut cursor, DELIMITER, Some(0), true).map_err(parse_error)?;
    let fields = header
        .fields()
        .iter()
        .map(|field| Field::new(field.name(), DataType::Utf8, true))
        .collect::<Vec<_>>();
    let schema = Arc::new(Schema::new(fields));
    cursor.set_position(0);
    let reader = ReaderBuilder::new()
        .has_header(true)
        .with_delimiter(DELIMITER)
        .with_schema(schema.clone())
        .build(cursor)
        .map_err(parse_error)?;
    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch.map_err(parse_error)?);
    }
    let rows: usize = batches.iter().map(|batch| batch.num_rows()).sum();
    if rows == 0 {
        return Err(IngestError::EmptyDataset(locator.to_string()));
    }
    if batches.len() == 1 {
        return Ok(batches.remove(0));
    }
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for i in 0..schema.fields().len() {
        let parts = batches
            .iter()
            .map(|batch| batch.column(i).as_ref())
            .collect::<Vec<_>>();
        columns.push(concat(&parts).map_err(parse_error)?);
    }
    RecordBatch::try_new(schema, columns).map_err(parse_error)
}

pub(crate) fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect()
}
