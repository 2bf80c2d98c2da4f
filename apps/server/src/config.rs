use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use babyassist_core::auth::RateLimitPolicy;
use rand::{rngs::OsRng, RngCore};

use crate::auth::{decode_secret_key, AuthConfig};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_ANALYSIS_URL: &str = "http://localhost:8000";
const DEFAULT_ANALYSIS_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 480;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub analysis_url: String,
    pub analysis_timeout: Duration,
    /// Present only when a password hash is configured.
    pub auth: Option<AuthConfig>,
    pub login_policy: RateLimitPolicy,
    /// Key login throttling on `X-Forwarded-For` instead of the peer address.
    /// Only safe behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: DEFAULT_DB_PATH.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            analysis_url: DEFAULT_ANALYSIS_URL.to_string(),
            analysis_timeout: Duration::from_millis(DEFAULT_ANALYSIS_TIMEOUT_MS),
            auth: None,
            login_policy: RateLimitPolicy::default(),
            trust_forwarded_for: false,
        }
    }
}

impl Config {
    /// Reads `BA_*` variables, loading `.env` first when present.
    ///
    /// Only an unparsable listen address is fatal; other bad values fall back
    /// to their defaults with a warning.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let listen_addr: SocketAddr = std::env::var("BA_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid BA_LISTEN_ADDR")?;
        let db_path = std::env::var("BA_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = std::env::var("BA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = env_or("BA_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS);
        let analysis_url = std::env::var("BA_ANALYSIS_URL").unwrap_or(defaults.analysis_url);
        let analysis_timeout_ms = env_or("BA_ANALYSIS_TIMEOUT_MS", DEFAULT_ANALYSIS_TIMEOUT_MS);

        let login_policy = RateLimitPolicy {
            max_attempts: env_or("BA_LOGIN_MAX_ATTEMPTS", defaults.login_policy.max_attempts),
            window: chrono::Duration::minutes(env_or(
                "BA_LOGIN_WINDOW_MINUTES",
                defaults.login_policy.window.num_minutes(),
            )),
            lockout: chrono::Duration::minutes(env_or(
                "BA_LOGIN_LOCKOUT_MINUTES",
                defaults.login_policy.lockout.num_minutes(),
            )),
        };

        let trust_forwarded_for = env_flag("BA_TRUST_FORWARDED_FOR");

        let auth = std::env::var("BA_AUTH_PASSWORD_HASH")
            .ok()
            .filter(|hash| !hash.trim().is_empty())
            .map(|password_hash| AuthConfig {
                password_hash: password_hash.trim().to_string(),
                jwt_secret: jwt_secret_from_env(),
                access_token_ttl: Duration::from_secs(
                    env_or("BA_AUTH_TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES) * 60,
                ),
            });

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            analysis_url,
            analysis_timeout: Duration::from_millis(analysis_timeout_ms),
            auth,
            login_policy,
            trust_forwarded_for,
        })
    }
}

/// Parses a positive number, keeping `default` when it is unset or malformed.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + Default + PartialOrd + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => value,
            _ => {
                tracing::warn!("Invalid {}={:?}, using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_flag(key: &str) -> bool {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "" | "0" | "false" | "no" | "off" => false,
            _ => {
                tracing::warn!("Invalid {}={:?}, using default false", key, raw);
                false
            }
        },
        Err(_) => false,
    }
}

fn jwt_secret_from_env() -> Vec<u8> {
    match std::env::var("BA_JWT_SECRET") {
        Ok(raw) => match decode_secret_key(&raw) {
            Ok(secret) => return secret,
            Err(err) => {
                tracing::warn!("Ignoring BA_JWT_SECRET: {}; using a per-process secret", err)
            }
        },
        Err(_) => tracing::info!("BA_JWT_SECRET not set; tokens will not survive a restart"),
    }
    let mut secret = vec![0u8; 32];
    OsRng.fill_bytes(&mut secret);
    secret
}
