pub mod codec;
pub mod db;
pub mod fs;
pub mod http;
pub mod snapshot;
pub mod time;

pub use time::SystemClock;
