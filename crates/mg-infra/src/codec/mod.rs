mod documents;
mod page_codec;

pub use documents::ProfileDocument;
pub use page_codec::{decode_page, encode_page, PageExtras};
