//! Listing failures degrade quietly for the reader but leave a log trail.

use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use mg_app::{IncrementalFetcher, LoadMoreOutcome, PageDataLoader};
use mg_core::paging::{Page, PageItem};
use mg_core::ports::{PageFetchError, PageSourcePort};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct SharedLogBuffer {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter {
            buffer: self.buffer.clone(),
        }
    }
}

struct SharedLogWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.buffer.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

static LOG_BUFFER: OnceLock<Arc<Mutex<Vec<u8>>>> = OnceLock::new();

fn init_test_tracing() -> Arc<Mutex<Vec<u8>>> {
    LOG_BUFFER
        .get_or_init(|| {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            let writer = SharedLogBuffer {
                buffer: buffer.clone(),
            };
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_env_filter(EnvFilter::new("warn"))
                .with_writer(writer)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("failed to set global tracing subscriber");
            buffer
        })
        .clone()
}

fn captured(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&buffer.lock().unwrap()).into_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Tag {
    name: String,
}

impl PageItem for Tag {
    const COLLECTION: &'static str = "tags";
}

enum Rest {
    Unavailable,
    Renumbered(u32),
}

/// Serves page 1 of a three page listing and answers everything else
/// according to `rest`.
struct PartialSource {
    first_ok: bool,
    rest: Rest,
}

fn tags_page(page: u32) -> Page<Tag> {
    let items = (0..10)
        .map(|n| Tag {
            name: format!("tag-{page}-{n}"),
        })
        .collect();
    Page::new(items, page, 3)
}

#[async_trait]
impl PageSourcePort<Tag> for PartialSource {
    async fn fetch_page(&self, page: u32) -> Result<Page<Tag>, PageFetchError> {
        if page == 1 && self.first_ok {
            return Ok(tags_page(1));
        }
        match self.rest {
            Rest::Renumbered(served) if page != 1 => Ok(tags_page(served)),
            _ => Err(PageFetchError::Status {
                status: 503,
                path: format!("tags-page-{page}.json"),
            }),
        }
    }
}

async fn fetcher_over(source: PartialSource) -> IncrementalFetcher<Tag> {
    let source: Arc<dyn PageSourcePort<Tag>> = Arc::new(source);
    let initial = PageDataLoader::new(source.clone()).load_first().await;
    let fetcher = IncrementalFetcher::new(source, initial);
    fetcher.settle();
    fetcher
}

#[tokio::test]
async fn initial_load_failure_is_logged_and_renders_empty() {
    let logs = init_test_tracing();
    let source: Arc<dyn PageSourcePort<Tag>> = Arc::new(PartialSource {
        first_ok: false,
        rest: Rest::Unavailable,
    });

    let initial = PageDataLoader::new(source).load_first().await;

    assert!(initial.items.is_empty());
    let output = captured(&logs);
    assert!(
        output.contains("Initial page load failed") && output.contains("tags-page-1.json"),
        "missing initial load failure log: {output}"
    );
}

#[tokio::test]
async fn fetch_more_failure_is_logged() {
    let logs = init_test_tracing();
    let fetcher = fetcher_over(PartialSource {
        first_ok: true,
        rest: Rest::Unavailable,
    })
    .await;

    assert_eq!(fetcher.load_more().await, LoadMoreOutcome::Failed);
    assert_eq!(fetcher.len(), 10);

    let output = captured(&logs);
    assert!(
        output.contains("Fetching more failed") && output.contains("tags-page-2.json"),
        "missing fetch-more failure log: {output}"
    );
}

#[tokio::test]
async fn out_of_sequence_page_is_logged_with_both_numbers() {
    let logs = init_test_tracing();
    let fetcher = fetcher_over(PartialSource {
        first_ok: true,
        rest: Rest::Renumbered(3),
    })
    .await;

    assert_eq!(
        fetcher.load_more().await,
        LoadMoreOutcome::OutOfSequence {
            requested: 2,
            received: 3
        }
    );
    assert!(!fetcher.has_more());

    let output = captured(&logs);
    assert!(
        output.contains("Out-of-sequence page") && output.contains("received=3"),
        "missing out-of-sequence log: {output}"
    );
}
