use crate::domain::post::FilterPolicy;
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub posts_root: PathBuf,
    pub blog_id: String,
    pub filter_policy: FilterPolicy,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub recent_posts: i32,
    // Post cache
    pub post_cache_enabled: bool,
    pub post_cache_ttl_secs: u64,
    pub post_cache_max_blogs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            posts_root: env::var("POSTS_ROOT")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
            blog_id: env::var("BLOG_ID").unwrap_or_else(|_| "default".to_string()),
            filter_policy: env::var("FILTER_POLICY")
                .unwrap_or_else(|_| "uniform".to_string())
                .parse()
                .map_err(AppError::Config)?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            recent_posts: parse_var("RECENT_POSTS", 5)?,
            post_cache_enabled: env::var("POST_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            post_cache_ttl_secs: parse_var("POST_CACHE_TTL_SECS", 300)?,
            post_cache_max_blogs: parse_var("POST_CACHE_MAX_BLOGS", 100)?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn post_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.post_cache_ttl_secs)
    }
}

fn parse_var<T>(name: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
