//! Server configuration options.

use std::path::Path;
use std::time::Duration;

use anyhow::Error;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
    value::Uncased,
};
use serde::{Deserialize, Serialize};

/// The default port the server is hosted on.
pub const DEFAULT_PORT: u16 = 5000;

/// The default Scryfall API endpoint.
pub const DEFAULT_SCRYFALL_BASE_URL: &str = "https://api.scryfall.com";

/// Server configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub scryfall: ScryfallConfig,
}

impl Config {
    /// Reads the config from the environment.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Config, Error> {
        Self::figment(config_path).extract().map_err(Error::from)
    }

    fn figment(config_path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("MTGFINDER_").split("__"))
            .merge(
                Env::raw()
                    .only(&["PORT", "DEBUG"])
                    .map(|k| Uncased::from(format!("SERVER.{}", k))),
            )
            .merge(
                Env::raw()
                    .only(&["SCRYFALL_API_BASE_URL"])
                    .map(|_| Uncased::from("SCRYFALL.BASE_URL")),
            )
    }
}

/// Server config.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    /// The port the server is binded to.
    pub port: u16,
    /// Enables debug logging.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

/// Remote card service config.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ScryfallConfig {
    /// The API endpoint, without a trailing slash.
    pub base_url: String,
    /// Seconds to wait for a search before giving up.
    pub search_timeout: u64,
    /// Seconds to wait for autocomplete suggestions before giving up.
    pub autocomplete_timeout: u64,
    /// Only cards printed in this language are searched.
    pub language: String,
    /// The sort order of search results.
    pub order: String,
    /// The `User-Agent` sent with every request.
    pub user_agent: String,
}

impl ScryfallConfig {
    /// The search timeout as a [`Duration`].
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout)
    }

    /// The autocomplete timeout as a [`Duration`].
    pub fn autocomplete_timeout(&self) -> Duration {
        Duration::from_secs(self.autocomplete_timeout)
    }
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        ScryfallConfig {
            base_url: DEFAULT_SCRYFALL_BASE_URL.into(),
            search_timeout: 5,
            autocomplete_timeout: 3,
            language: "en".into(),
            order: "usd".into(),
            user_agent: concat!("mtgfinder/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}
