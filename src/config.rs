use std::{path::PathBuf, time::Duration};

use color_eyre::eyre::{WrapErr, eyre};
use directories::ProjectDirs;

pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";
pub const DEFAULT_RESULT_LIMIT: u32 = 12;
pub const MAX_RESULT_LIMIT: u32 = 200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub search_url: String,
    pub result_limit: u32,
    pub request_timeout: Duration,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> color_eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> color_eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("MOODTUNES_SEARCH_URL") {
            url::Url::parse(&url).wrap_err("MOODTUNES_SEARCH_URL is not a valid url")?;
            config.search_url = url;
        }

        if let Some(limit) = lookup("MOODTUNES_RESULT_LIMIT") {
            let limit: u32 = limit
                .trim()
                .parse()
                .wrap_err("MOODTUNES_RESULT_LIMIT must be a positive integer")?;
            if limit == 0 {
                return Err(eyre!("MOODTUNES_RESULT_LIMIT must be at least 1"));
            }
            config.result_limit = limit.min(MAX_RESULT_LIMIT);
        }

        if let Some(secs) = lookup("MOODTUNES_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .wrap_err("MOODTUNES_TIMEOUT_SECS must be a number of seconds")?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup("MOODTUNES_DATA") {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("com", "moodtunes", env!("CARGO_PKG_NAME")) {
        dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}
