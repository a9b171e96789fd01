//! Server settings from environment variables (a `.env` file is loaded by the binary).

use crate::document::Links;
use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 31415;
pub const DEFAULT_PREFIX: &str = "v0";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix of all resource routes, without slashes (e.g. "v0").
    pub prefix: String,
    /// Scheme and authority used in generated links.
    pub base_url: String,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            prefix: DEFAULT_PREFIX.into(),
            base_url: format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Reads `API_HOST`, `API_PORT`, `API_PREFIX`, `API_BASE_URL` and `API_BODY_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = match lookup("API_PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "API_PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };
        let body_limit = match lookup("API_BODY_LIMIT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "API_BODY_LIMIT",
                value: v,
            })?,
            None => DEFAULT_BODY_LIMIT,
        };
        let prefix = lookup("API_PREFIX")
            .map(|p| p.trim_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_PREFIX.into());
        let base_url = lookup("API_BASE_URL").unwrap_or_else(|| format!("http://{}:{}", host, port));
        Ok(ServerConfig {
            host,
            port,
            prefix,
            base_url,
            body_limit,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn links(&self) -> Links {
        Links::new(&self.base_url, &self.prefix)
    }
}
