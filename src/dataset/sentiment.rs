use std::path::Path;
use arrow::record_batch::RecordBatch;
use clap::Args;
use crate::dataset::error::IngestError;
use crate::dataset::traits::IPipeline;
use crate::dataset::{params, recode, source, splitter, writer};

/// sentiment ingestion args structure
#[derive(Args, Debug)]
pub struct IngestArgs{
    /// yaml file holding `data_ingestion.test_size`
    #[clap(long, visible_alias = "config", default_value = "params.yaml")]
    params: String,
    /// url or local path of the tweet emotions csv
    #[clap(long, short, visible_alias = "input", default_value = "https://raw.githubusercontent.com/campusx-official/jupyter-masterclass/main/tweet_emotions.csv")]
    source: String,
    /// output directory of train.csv and test.csv
    #[clap(long, short, visible_alias = "output", default_value = "data/raw")]
    output_path: String,
    /// random seed of the train/test shuffle
    #[clap(long, default_value_t = splitter::DEFAULT_SEED)]
    seed: u64,
    /// file receiving error level logs
    #[clap(long, default_value = "errors.log")]
    pub error_log: String,
}

/// Binary neutral/sadness dataset builder
pub struct SentimentIngestion<'a>{
    args: &'a IngestArgs,
}

impl <'a>SentimentIngestion<'a> {
    pub fn new(args: &'a IngestArgs) -> Self{
        Self{ args }
    }
}

impl<'a> IPipeline for SentimentIngestion<'a> {
    fn load_params(&self) -> Result<f64, IngestError> {
        params::load_params(Path::new(&self.args.params))
    }

    fn read_dataset(&self) -> Result<RecordBatch, IngestError> {
        source::read_dataset(&self.args.source)
    }

    fn process_dataset(&self, raw: RecordBatch) -> Result<RecordBatch, IngestError> {
        recode::process_dataset(raw)
    }

    fn split_dataset(&self, dataset: RecordBatch, test_size: f64) -> Result<(RecordBatch, RecordBatch), IngestError> {
        splitter::split_dataset(dataset, test_size, self.args.seed)
    }

    fn save_dataset(&self, train: RecordBatch, test: RecordBatch) -> Result<(), IngestError> {
        writer::save_dataset(Path::new(&self.args.output_path), &train, &test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use crate::dataset::traits::Stage;

    const TWEETS: &str = "tweet_id,sentiment,content\n\
        1,neutral,n one\n\
        2,sadness,s one\n\
        3,neutral,n two\n\
        4,happiness,h one\n\
        5,neutral,n three\n\
        6,sadness,s two\n\
        7,neutral,n four\n\
        8,sadness,s three\n\
        9,happiness,h two\n\
        10,neutral,n five\n\
        11,neutral,n six\n\
        12,sadness,s four\n";

    struct Workspace {
        dir: TempDir,
        args: IngestArgs,
    }

    fn workspace(tweets: &str, params: &str) -> Workspace {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("params.yaml"), params).unwrap();
        fs::write(dir.path().join("tweet_emotions.csv"), tweets).unwrap();
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();
        let args = IngestArgs {
            params: path("params.yaml"),
            source: path("tweet_emotions.csv"),
            output_path: path("data/raw"),
            seed: splitter::DEFAULT_SEED,
            error_log: path("errors.log"),
        };
        Workspace { dir, args }
    }

    fn read_output(ws: &Workspace, name: &str) -> String {
        fs::read_to_string(ws.dir.path().join("data").join("raw").join(name)).unwrap()
    }

    #[derive(clap::Parser)]
    struct Cli {
        #[clap(flatten)]
        args: IngestArgs,
    }

    #[test]
    fn cli_defaults_match_pipeline_constants() {
        use clap::Parser;
        let cli = Cli::try_parse_from(["tweet-ingest"]).unwrap();
        assert_eq!(cli.args.seed, splitter::DEFAULT_SEED);
        assert_eq!(cli.args.params, "params.yaml");
        assert_eq!(cli.args.output_path, "data/raw");
        let cli = Cli::try_parse_from(["tweet-ingest", "--seed", "7"]).unwrap();
        assert_eq!(cli.args.seed, 7);
    }

    #[test]
    fn builds_train_and_test_files() {
        let ws = workspace(TWEETS, "data_ingestion:\n  test_size: 0.2\n");
        SentimentIngestion::new(&ws.args).build().unwrap();

        let train = read_output(&ws, writer::TRAIN_FILE);
        let test = read_output(&ws, writer::TEST_FILE);
        let train_lines = train.lines().collect::<Vec<_>>();
        let test_lines = test.lines().collect::<Vec<_>>();
        assert_eq!(train_lines[0], "sentiment,content");
        assert_eq!(test_lines[0], "sentiment,content");
        assert_eq!(train_lines.len() - 1, 8);
        assert_eq!(test_lines.len() - 1, 2);

        let mut rows = train_lines[1..].iter().chain(test_lines[1..].iter()).copied().collect::<Vec<_>>();
        rows.sort_unstable();
        let mut expected = vec![
            "1,n one", "1,n two", "1,n three", "1,n four", "1,n five", "1,n six",
            "0,s one", "0,s two", "0,s three", "0,s four",
        ];
        expected.sort_unstable();
        assert_eq!(rows, expected);
    }

    #[test]
    fn reruns_are_byte_identical() {
        let ws = workspace(TWEETS, "data_ingestion:\n  test_size: 0.3\n");
        SentimentIngestion::new(&ws.args).build().unwrap();
        let first = (read_output(&ws, writer::TRAIN_FILE), read_output(&ws, writer::TEST_FILE));
        SentimentIngestion::new(&ws.args).build().unwrap();
        let second = (read_output(&ws, writer::TRAIN_FILE), read_output(&ws, writer::TEST_FILE));
        assert_eq!(first, second);
    }

    #[test]
    fn missing_label_column_writes_nothing() {
        let ws = workspace("tweet_id,content\n1,a\n2,b\n", "data_ingestion:\n  test_size: 0.2\n");
        let err = SentimentIngestion::new(&ws.args).build().unwrap_err();
        assert_eq!(err.stage, Stage::DataAcquired);
        assert!(matches!(err.source, IngestError::SchemaError(ref column) if column == "sentiment"));
        assert!(!ws.dir.path().join("data").exists());
    }

    #[test]
    fn no_target_labels_fails_at_split() {
        let ws = workspace("tweet_id,sentiment,content\n1,worry,a\n2,love,b\n", "data_ingestion:\n  test_size: 0.2\n");
        let err = SentimentIngestion::new(&ws.args).build().unwrap_err();
        assert_eq!(err.stage, Stage::Transformed);
        assert!(matches!(err.source, IngestError::InsufficientData { rows: 0, .. }));
    }

    #[test]
    fn invalid_test_size_fails_at_split() {
        let ws = workspace(TWEETS, "data_ingestion:\n  test_size: 1.5\n");
        let err = SentimentIngestion::new(&ws.args).build().unwrap_err();
        assert_eq!(err.stage, Stage::Transformed);
        assert!(matches!(err.source, IngestError::InvalidSplitFraction(_)));
    }

    #[test]
    fn missing_params_fails_before_reading() {
        let ws = workspace(TWEETS, "data_ingestion:\n  test_size: 0.2\n");
        fs::remove_file(&ws.args.params).unwrap();
        let err = SentimentIngestion::new(&ws.args).build().unwrap_err();
        assert_eq!(err.stage, Stage::Start);
        assert!(matches!(err.source, IngestError::ConfigNotFound { .. }));
        assert!(err.to_string().starts_with("load params failed"));
    }
}
