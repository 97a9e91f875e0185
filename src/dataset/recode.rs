use std::sync::Arc;
use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array, StringArray};
use arrow::compute::filter;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use crate::dataset::error::IngestError;

pub const ID_COLUMN: &str = "tweet_id";
pub const LABEL_COLUMN: &str = "sentiment";

/// Kept labels and the class id each one is recoded to
pub const LABEL_IDS: [(&str, i64); 2] = [("neutral", 1), ("sadness", 0)];

fn label_id(label: &str) -> Option<i64> {
    LABEL_IDS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, id)| *id)
}

/// Drop the id column, keep the two target labels and recode them to class ids.
///
/// Always builds a new batch; surviving rows keep their relative order and an
/// empty result is not an error.
pub fn process_dataset(raw: RecordBatch) -> Result<RecordBatch, IngestError> {
    let schema = raw.schema();
    let (id_index, _) = schema
        .column_with_name(ID_COLUMN)
        .ok_or_else(|| IngestError::SchemaError(ID_COLUMN.to_string()))?;
    let (label_index, _) = schema
        .column_with_name(LABEL_COLUMN)
        .ok_or_else(|| IngestError::SchemaError(LABEL_COLUMN.to_string()))?;

    let labels = raw
        .column(label_index)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| IngestError::TransformError(format!(
            "`{}` column is {:?}, expected text",
            LABEL_COLUMN,
            schema.field(label_index).data_type()
        )))?;
    let keep = labels
        .iter()
        .map(|label| Some(label.and_then(label_id).is_some()))
        .collect::<BooleanArray>();

    let mut fields = Vec::with_capacity(schema.fields().len() - 1);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len() - 1);
    for (i, field) in schema.fields().iter().enumerate() {
        if i == id_index {
            continue;
        }
        if i == label_index {
            let kept = filter(labels, &keep)?;
            let kept = kept
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| IngestError::TransformError("filtered labels lost their type".to_string()))?;
            let class_ids = kept
                .iter()
                .map(|label| label.and_then(label_id))
                .collect::<Option<Vec<i64>>>()
                .ok_or_else(|| IngestError::TransformError("unmapped label survived the filter".to_string()))?;
            fields.push(Field::new(LABEL_COLUMN, DataType::Int64, false));
            columns.push(Arc::new(Int64Array::from(class_ids)));
        } else {
            fields.push(field.clone());
            columns.push(filter(raw.column(i).as_ref(), &keep)?);
        }
    }
    let processed = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    tracing::debug!(
        "kept {} of {} rows labelled {}, dropped {}",
        processed.num_rows(),
        raw.num_rows(),
        LABEL_IDS.iter().map(|(name, _)| *name).collect::<Vec<_>>().join("/"),
        raw.num_rows() - processed.num_rows()
    );
    Ok(processed)
}
