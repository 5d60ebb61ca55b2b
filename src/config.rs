use crate::core::engine::UnknownMemberPolicy;
use dotenv::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub unknown_member_policy: UnknownMemberPolicy,
    pub balance_cache_ttl_secs: u64,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let unknown_member_policy = match lookup("UNKNOWN_MEMBER_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to reject", e);
                UnknownMemberPolicy::Reject
            }),
            None => UnknownMemberPolicy::default(),
        };

        Self {
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            unknown_member_policy,
            balance_cache_ttl_secs: lookup("BALANCE_CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
