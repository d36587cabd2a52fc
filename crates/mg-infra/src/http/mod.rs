mod data_client;

pub use data_client::{HttpDataClient, HttpPageSource};
