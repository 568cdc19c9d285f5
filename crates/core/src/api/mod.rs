pub mod client;
pub mod http;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use http::HttpTransport;
pub use request::{ApiRequest, ApiResponse, Method};
pub use transport::Transport;
