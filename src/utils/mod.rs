//! Utility modules supporting the classification pipeline.
//!
//! - [`HttpClient`]: shared HTTP client used by the remote classifier
//! - [`extract_json_payload`]: pull the JSON object out of a model reply

mod http;
mod json;

pub use http::HttpClient;
pub use json::extract_json_payload;
