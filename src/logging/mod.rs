//! Logging infrastructure for structured console output.

mod logger;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::{LOG_ENV, init_subscriber};
pub use types::{EntryRecord, EntryStatus, Log};

/// Capture formatted console output for assertions.
#[cfg(test)]
pub(crate) mod test_helpers {
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a thread-local subscriber using the console formatter
    /// and return everything it wrote.
    pub fn capture(verbose: bool, f: impl FnOnce()) -> String {
        use tracing_subscriber::layer::SubscriberExt as _;

        let buf = Capture::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::registry()
            .with(super::subscriber::console_layer(verbose, move || writer.clone()));
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buf.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
