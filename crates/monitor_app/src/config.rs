//! Environment-backed configuration, validated before any network call.

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

pub const ENV_SEARCH_URL: &str = "MONITOR_SEARCH_URL";
pub const ENV_STATE_FILE: &str = "MONITOR_STATE_FILE";
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_ID_PATTERN: &str = "MONITOR_ID_PATTERN";
pub const ENV_COUNT_PATTERN: &str = "MONITOR_COUNT_PATTERN";
pub const ENV_LISTING_URL_BASE: &str = "MONITOR_LISTING_URL_BASE";
pub const ENV_UPDATE_HEADER: &str = "MONITOR_UPDATE_HEADER";

const DEFAULT_STATE_FILE: &str = "./listing_state.json";
// Defaults target the CROUS housing search; any listing source works by
// overriding the pattern and link-base variables.
const DEFAULT_ID_PATTERN: &str = r"/tools/42/accommodations/(\d+)";
const DEFAULT_COUNT_PATTERN: &str = r"(\d+)\s+logement(?:s)?\s+trouvé";
const DEFAULT_LISTING_URL_BASE: &str =
    "https://trouverunlogement.lescrous.fr/tools/42/accommodations";
const DEFAULT_UPDATE_HEADER: &str = "Listing update";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("{0} is not a valid url: {1}")]
    InvalidUrl(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub search_url: Url,
    pub state_path: PathBuf,
    pub bot_token: String,
    pub chat_id: String,
    pub id_pattern: String,
    pub count_pattern: String,
    pub listing_url_base: String,
    pub update_header: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = required(ENV_SEARCH_URL)?;
        let search_url = Url::parse(&raw_url)
            .map_err(|err| ConfigError::InvalidUrl(ENV_SEARCH_URL, err.to_string()))?;

        Ok(Self {
            search_url,
            state_path: PathBuf::from(with_default(ENV_STATE_FILE, DEFAULT_STATE_FILE)),
            bot_token: required(ENV_BOT_TOKEN)?,
            chat_id: required(ENV_CHAT_ID)?,
            id_pattern: with_default(ENV_ID_PATTERN, DEFAULT_ID_PATTERN),
            count_pattern: with_default(ENV_COUNT_PATTERN, DEFAULT_COUNT_PATTERN),
            listing_url_base: with_default(ENV_LISTING_URL_BASE, DEFAULT_LISTING_URL_BASE),
            update_header: with_default(ENV_UPDATE_HEADER, DEFAULT_UPDATE_HEADER),
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::MissingVar(name))
}

fn with_default(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}
