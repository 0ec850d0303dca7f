pub mod fetch_client;
pub mod fetch_worker;

pub use fetch_client::FetchClient;
pub use fetch_worker::spawn_fetch;
