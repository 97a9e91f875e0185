use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Install the process-wide subscriber: console at `debug` (or `RUST_LOG`),
/// plus `error_log` receiving error level events only.
pub fn init_logging(error_log: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(error_log)?;
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);
    let errors = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(LevelFilter::ERROR);
    tracing_subscriber::registry()
        .with(console)
        .with(errors)
        .init();
    Ok(())
}

/// Run `f` under a scoped subscriber and return what it logged at error level.
#[cfg(test)]
pub(crate) fn capture_errors<F: FnOnce()>(f: F) -> String {
    use std::sync::Arc;

    #[derive(Clone)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let captured = Captured(Arc::new(Mutex::new(Vec::new())));
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
