/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, APP_ENV, JWT_SECRET など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::token_validator::MAX_LEEWAY_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Transport limits applied by `middleware::http`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLimits {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpLimits {
    fn default() -> Self {
        // bearer-authenticated GETs only; bodies stay small
        Self {
            body_limit_bytes: 64 * 1024,
            request_timeout: Duration::from_secs(10),
        }
    }
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub http: HttpLimits,

    // base64-encoded HMAC secret shared with the token issuer
    pub jwt_secret: String,
    pub token_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_leeway_seconds = match lookup("TOKEN_LEEWAY_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|s| *s <= MAX_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let defaults = HttpLimits::default();
        let body_limit_bytes = match lookup("HTTP_BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("HTTP_BODY_LIMIT_BYTES"))?,
            None => defaults.body_limit_bytes,
        };
        let request_timeout = match lookup("HTTP_REQUEST_TIMEOUT_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid("HTTP_REQUEST_TIMEOUT_SECONDS"))?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            addr,
            app_env,
            http: HttpLimits {
                body_limit_bytes,
                request_timeout,
            },
            jwt_secret,
            token_leeway_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = load(&[("JWT_SECRET", "c2VjcmV0")]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.jwt_secret, "c2VjcmV0");
        assert_eq!(config.token_leeway_seconds, 0);
        assert_eq!(config.http, HttpLimits::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = load(&[
            ("JWT_SECRET", "c2VjcmV0"),
            ("PORT", "8081"),
            ("APP_ENV", "PROD"),
            ("TOKEN_LEEWAY_SECONDS", "30"),
            ("HTTP_BODY_LIMIT_BYTES", "1024"),
            ("HTTP_REQUEST_TIMEOUT_SECONDS", "3"),
        ])
        .unwrap();

        assert_eq!(config.http.body_limit_bytes, 1024);
        assert_eq!(config.http.request_timeout, Duration::from_secs(3));

        assert_eq!(config.addr.port(), 8081);
        assert!(config.app_env.is_production());
        assert_eq!(config.token_leeway_seconds, 30);
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(load(&[]).err(), Some(ConfigError::Missing("JWT_SECRET")));
        assert_eq!(
            load(&[("JWT_SECRET", "  ")]).err(),
            Some(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn rejects_unparsable_numbers() {
        assert_eq!(
            load(&[("JWT_SECRET", "c2VjcmV0"), ("PORT", "http")]).err(),
            Some(ConfigError::Invalid("PORT"))
        );
        assert_eq!(
            load(&[("JWT_SECRET", "c2VjcmV0"), ("TOKEN_LEEWAY_SECONDS", "-1")]).err(),
            Some(ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"))
        );
        for (key, value) in [
            ("HTTP_BODY_LIMIT_BYTES", "0"),
            ("HTTP_BODY_LIMIT_BYTES", "1MB"),
            ("HTTP_REQUEST_TIMEOUT_SECONDS", "0"),
            ("HTTP_REQUEST_TIMEOUT_SECONDS", "-5"),
        ] {
            assert_eq!(
                load(&[("JWT_SECRET", "c2VjcmV0"), (key, value)]).err(),
                Some(ConfigError::Invalid(key)),
                "{}={}",
                key,
                value
            );
        }
    }

    #[test]
    fn leeway_above_one_day_is_refused() {
        let at_cap = MAX_LEEWAY_SECONDS.to_string();
        assert_eq!(
            load(&[("JWT_SECRET", "c2VjcmV0"), ("TOKEN_LEEWAY_SECONDS", &at_cap)])
                .unwrap()
                .token_leeway_seconds,
            MAX_LEEWAY_SECONDS
        );

        let over = (MAX_LEEWAY_SECONDS + 1).to_string();
        let huge = u64::MAX.to_string();
        for value in [over.as_str(), huge.as_str()] {
            assert_eq!(
                load(&[("JWT_SECRET", "c2VjcmV0"), ("TOKEN_LEEWAY_SECONDS", value)]).err(),
                Some(ConfigError::Invalid("TOKEN_LEEWAY_SECONDS"))
            );
        }
    }
}
