//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings for the page host and the customer backend it talks to.
pub struct ClientConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the customer REST backend, e.g. `http://localhost:5000`.
    pub api_url: String,
    pub templates_dir: String,
    /// Signing key for the session and flash cookies, at least 64 bytes.
    pub secret: String,
}
