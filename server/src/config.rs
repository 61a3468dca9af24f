use std::env;

/// Process configuration, read from the environment once at startup and
/// held for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Namespace prefix for stored image blobs.
    pub blob_namespace: String,
    /// Key for signing image URLs. When unset, image URLs are served
    /// unsigned and never expire.
    pub url_signing_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            blob_namespace: env::var("BLOB_NAMESPACE").unwrap_or_else(|_| "recipes".to_string()),
            url_signing_key: env::var("URL_SIGNING_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}
