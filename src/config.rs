use std::{env, fmt::Display, str::FromStr};

use tracing::info;

pub const DEFAULT_LIKE_NOTIFY_THRESHOLD: i64 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Address that receives popularity alerts.
    pub admin_email: String,
    /// Received-like count at which the admin gets alerted about a user.
    pub like_notify_threshold: i64,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    /// Server-side secret mixed into password hashes.
    pub auth_pepper: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env"),
            host: or_default("HOST", "127.0.0.1"),
            port: parse_or("PORT", 3000),
            admin_email: or_default("ADMIN_EMAIL", "admin@example.com"),
            like_notify_threshold: parse_or("LIKE_NOTIFY_THRESHOLD", DEFAULT_LIKE_NOTIFY_THRESHOLD),
            mail_api_url: or_default("MAIL_API_URL", "https://smtp.maileroo.com/send"),
            mail_api_key: env::var("MAIL_API_KEY").unwrap_or_default(),
            mail_from: or_default("MAIL_FROM", "Sparkmatch <alerts@sparkmatch.app>"),
            auth_pepper: or_default("AUTH_PEPPER", "dev-pepper"),
        }
    }
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => panic!("Invalid {key} value {raw:?}: {e}"),
        },
        Err(_) => default,
    }
}
