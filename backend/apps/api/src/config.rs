//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MENU_PATH: &str = "coffees.json";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    /// `ENV`; `production` turns on Secure cookies
    pub environment: String,
    pub database_max_connections: u32,
    pub request_timeout: Duration,
    pub menu_path: PathBuf,
    pub password_pepper: Option<Vec<u8>>,
    /// `SESSION_COOKIE_NAME`; `session_id` when unset
    pub session_cookie_name: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            environment: env::var("ENV").unwrap_or_default(),
            database_max_connections,
            request_timeout: Duration::from_secs(request_timeout_secs),
            menu_path: env::var("MENU_PATH")
                .unwrap_or_else(|_| DEFAULT_MENU_PATH.to_string())
                .into(),
            password_pepper: env::var("PASSWORD_PEPPER").ok().map(String::into_bytes),
            session_cookie_name: env::var("SESSION_COOKIE_NAME").ok(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let config = AuthConfig::for_environment(&self.environment)
            .with_pepper(self.password_pepper.clone());

        match &self.session_cookie_name {
            Some(name) => config
                .with_session_cookie_name(name.as_str())
                .context("SESSION_COOKIE_NAME must be a valid cookie name"),
            None => Ok(config),
        }
    }
}
