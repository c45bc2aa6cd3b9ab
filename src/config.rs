use std::time::Duration;

use nowplaying::clients::{
    LastFmClient,
    errors::{Error, Result},
    lastfm::DEFAULT_API_URL,
};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Runtime configuration for the service
pub struct Config {
    pub lastfm: LastFmClient,
    pub port: u16,
}

// Every field left unset here is read from the environment in `build`
#[derive(Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    username: Option<String>,
    api_url: Option<String>,
    timeout: Option<Duration>,
    port: Option<u16>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // The key only ever comes from the environment outside of tests
    #[cfg(test)]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn build(self) -> Result<Config> {
        let api_key = match self.api_key {
            Some(k) => k,
            None => required_var("LASTFM_API_KEY")?,
        };
        let username = match self.username {
            Some(u) => u,
            None => required_var("LASTFM_USERNAME")?,
        };
        let api_url = match self.api_url {
            Some(u) => u,
            None => optional_var("LASTFM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };
        let timeout = match self.timeout {
            Some(t) => t,
            None => Duration::from_secs(parse_var("LASTFM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
        };
        let port = match self.port {
            Some(p) => p,
            None => parse_var("PORT", DEFAULT_PORT)?,
        };

        Ok(Config {
            lastfm: LastFmClient::new(api_url, api_key, username, timeout)?,
            port,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    optional_var(name).ok_or_else(|| {
        Error::ConfigurationError(format!(
            "Missing {name} in environment variables. Check README.md for details."
        ))
    })
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match optional_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::ConfigurationError(format!("Invalid value for {name}: {raw:?}"))),
        None => Ok(default),
    }
}
