use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Root of the address lookup service, `/api/getAddresses` is appended.
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Built-in defaults, then `addressbook.toml` (or `path`), then
/// `ADDRESSBOOK__*` environment variables.
pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .set_default("base_url", "http://localhost:3000")?
        .set_default(
            "user_agent",
            concat!("addressbook/", env!("CARGO_PKG_VERSION")),
        )?
        .set_default("timeout_secs", 10_i64)?;

    builder = match path {
        Some(path) => builder.add_source(File::from(path)),
        None => builder.add_source(File::with_name("addressbook").required(false)),
    };

    builder
        .add_source(
            Environment::with_prefix("ADDRESSBOOK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
