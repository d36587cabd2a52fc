//! JSON encoding of a [`Page`] under its collection key, e.g.
//! `{ "posts": [...], "page": 1, "totalPages": 3, "hasMore": true }`.

use anyhow::Result;
use mg_core::paging::{Page, PageItem};
use mg_core::ports::PageFetchError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Additional top-level fields written next to the page envelope.
pub type PageExtras = Map<String, Value>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    page: u32,
    total_pages: u32,
    has_more: bool,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

pub fn encode_page<T: PageItem>(page: &Page<T>, extras: PageExtras) -> Result<Value> {
    let mut object = extras;
    object.insert(T::COLLECTION.to_string(), serde_json::to_value(&page.items)?);
    object.insert("page".to_string(), Value::from(page.page));
    object.insert("totalPages".to_string(), Value::from(page.total_pages));
    object.insert("hasMore".to_string(), Value::from(page.has_more));
    Ok(Value::Object(object))
}

/// Decodes a page resource, rejecting envelopes whose `hasMore` contradicts
/// `page < totalPages`.
pub fn decode_page<T: PageItem>(path: &str, bytes: &[u8]) -> Result<Page<T>, PageFetchError> {
    let malformed = |reason: String| PageFetchError::Malformed {
        path: path.to_string(),
        reason,
    };

    let mut raw: RawPage =
        serde_json::from_slice(bytes).map_err(|e| malformed(e.to_string()))?;

    let items = raw
        .rest
        .remove(T::COLLECTION)
        .ok_or_else(|| malformed(format!("missing `{}` array", T::COLLECTION)))?;
    let items: Vec<T> = serde_json::from_value(items).map_err(|e| malformed(e.to_string()))?;

    let page = Page {
        items,
        page: raw.page,
        total_pages: raw.total_pages,
        has_more: raw.has_more,
    };
    if !page.is_consistent() {
        return Err(malformed(format!(
            "page {} of {} declares hasMore={}",
            page.page, page.total_pages, page.has_more
        )));
    }
    Ok(page)
}
