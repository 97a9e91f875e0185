use arrow::array::UInt32Array;
use arrow::compute::take;
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::dataset::error::IngestError;

pub const DEFAULT_SEED: u64 = 42;

/// Row counts `(train, test)` for a dataset of `rows` rows.
///
/// The test partition gets `ceil(test_size * rows)` rows and train gets the rest.
pub fn split_sizes(rows: usize, test_size: f64) -> Result<(usize, usize), IngestError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(IngestError::InvalidSplitFraction(test_size));
    }
    let n_test = (test_size * rows as f64).ceil() as usize;
    if n_test == 0 || n_test >= rows {
        return Err(IngestError::InsufficientData { rows, test_size });
    }
    Ok((rows - n_test, n_test))
}

/// Shuffle row indices with a fixed seed and split the dataset into `(train, test)`.
///
/// Test rows are the head of the permutation, train rows the tail.
pub fn split_dataset(
    dataset: RecordBatch,
    test_size: f64,
    seed: u64,
) -> Result<(RecordBatch, RecordBatch), IngestError> {
    let rows = dataset.num_rows();
    let (n_train, n_test) = split_sizes(rows, test_size)?;
    let mut indices = (0..rows as u32).collect::<Vec<_>>();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let train_indices = indices.split_off(n_test);
    let test = take_rows(&dataset, indices)?;
    let train = take_rows(&dataset, train_indices)?;
    tracing::debug!(
        "dataset split: {} train, {} test (seed {})",
        n_train,
        n_test,
        seed
    );
    Ok((train, test))
}

fn take_rows(dataset: &RecordBatch, indices: Vec<u32>) -> Result<RecordBatch, IngestError> {
    let indices = UInt32Array::from(indices);
    let columns = dataset
        .columns()
        .iter()
        .map(|column| take(column.as_ref(), &indices, None))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RecordBatch::try_new(dataset.schema(), columns)?)
}
