mod error;
mod params;
mod recode;
mod sentiment;
mod source;
mod splitter;
mod traits;
mod writer;

pub use sentiment::{IngestArgs, SentimentIngestion};
pub use traits::IPipeline;
