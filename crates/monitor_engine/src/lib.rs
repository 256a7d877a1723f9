//! Monitor engine: IO pipeline around the pure reconciler.
mod extract;
mod fetch;
mod notify;
mod persist;
mod pipeline;
mod state_store;
mod types;

pub use extract::{Extraction, Extractor, ExtractorError, PatternExtractor};
pub use fetch::{FetchSettings, Fetcher, PageFetcher, RetryPolicy};
pub use notify::{Notifier, NotifyError, TelegramNotifier, TelegramSettings};
pub use persist::{write_atomic, PersistError};
pub use pipeline::{run_once, RunError, RunOutcome};
pub use state_store::{JsonFileStore, StateError, StateStore};
pub use types::{FailureKind, FetchError};
