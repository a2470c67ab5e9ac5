pub mod builders;
pub mod stub_engine;

use std::io;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Send engine and analyzer logs through the test harness.
///
/// Output shows up only for failing tests; `RUST_LOG=debug` also surfaces
/// the engine's stderr lines.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Stub engines sleep for at most 30s; anything slower than this is a hang.
const ENGINE_TEST_LIMIT: Duration = Duration::from_secs(10);

/// Fail the test if an analysis does not settle within [`ENGINE_TEST_LIMIT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(ENGINE_TEST_LIMIT, f)
        .await
        .expect("analysis did not settle in time")
}

/// In-memory sink for the diagnostics a piece of code emits.
///
/// Use with `tracing::subscriber::with_default(capture.subscriber(), ..)`
/// and inspect [`LogCapture::contents`] afterwards.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let sink = self.clone();
        fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish()
    }

    pub fn contents(&self) -> String {
        let buf = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
