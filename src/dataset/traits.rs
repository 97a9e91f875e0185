use std::fmt;
use arrow::record_batch::RecordBatch;
use thiserror::Error;
use crate::dataset::error::IngestError;

/// Progress of a single ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ConfigLoaded,
    DataAcquired,
    Transformed,
    Partitioned,
    Persisted,
    Done,
}

impl Stage {
    /// Step that moves the run out of this stage
    pub fn next_step(&self) -> &'static str {
        match self {
            Stage::Start => "load params",
            Stage::ConfigLoaded => "read dataset",
            Stage::DataAcquired => "process dataset",
            Stage::Transformed => "split dataset",
            Stage::Partitioned => "save dataset",
            Stage::Persisted => "finish",
            Stage::Done => "none",
        }
    }

    fn attempt<T>(self, step: Result<T, IngestError>) -> Result<T, PipelineError> {
        step.map_err(|source| PipelineError { stage: self, source })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::ConfigLoaded => "config loaded",
            Stage::DataAcquired => "data acquired",
            Stage::Transformed => "transformed",
            Stage::Partitioned => "partitioned",
            Stage::Persisted => "persisted",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Terminal failure of a run, tagged with the last stage it reached
#[derive(Debug, Error)]
#[error("{} failed after reaching `{stage}`: {source}", .stage.next_step())]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: IngestError,
}

pub trait IPipeline {
    fn load_params(&self) -> Result<f64, IngestError>;
    fn read_dataset(&self) -> Result<RecordBatch, IngestError>;
    fn process_dataset(&self, raw: RecordBatch) -> Result<RecordBatch, IngestError>;
    fn split_dataset(&self, dataset: RecordBatch, test_size: f64) -> Result<(RecordBatch, RecordBatch), IngestError>;
    fn save_dataset(&self, train: RecordBatch, test: RecordBatch) -> Result<(), IngestError>;

    /// Run every step in order, stopping at the first failure.
    ///
    /// Nothing is retried or rolled back; files written before a failure stay on disk.
    fn build(&self) -> Result<(), PipelineError> {
        let mut stage = Stage::Start;
        let test_size = stage.attempt(self.load_params())?;
        stage = advance(stage, Stage::ConfigLoaded);
        let raw = stage.attempt(self.read_dataset())?;
        stage = advance(stage, Stage::DataAcquired);
        let processed = stage.attempt(self.process_dataset(raw))?;
        stage = advance(stage, Stage::Transformed);
        let (train, test) = stage.attempt(self.split_dataset(processed, test_size))?;
        stage = advance(stage, Stage::Partitioned);
        stage.attempt(self.save_dataset(train, test))?;
        stage = advance(stage, Stage::Persisted);
        advance(stage, Stage::Done);
        Ok(())
    }
}

fn advance(from: Stage, to: Stage) -> Stage {
    tracing::debug!("{} -> {}", from, to);
    to
}
