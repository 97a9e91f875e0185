mod dataset;
mod logging;
use std::path::Path;
use anyhow::Context;
use clap::Parser;
use dataset::{IngestArgs, SentimentIngestion};
use crate::dataset::IPipeline;

/// Build a binary neutral/sadness train and test split from tweet emotions
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct TweetIngest{
    #[clap(flatten)]
    args: IngestArgs,
}

fn main() -> anyhow::Result<()> {
    let tweet_ingest = TweetIngest::parse();
    logging::init_logging(Path::new(&tweet_ingest.args.error_log))
        .with_context(|| format!("open error log {}", tweet_ingest.args.error_log))?;
    tracing::debug!("ingestion args: {:?}", tweet_ingest.args);
    let builder = SentimentIngestion::new(&tweet_ingest.args);
    let span = tracing::info_span!("data_ingestion");
    let result = span.in_scope(|| builder.build());
    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
    tracing::info!("finished ingestion!");
    Ok(())
}
