use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::services::locator::DEFAULT_MARKER_COUNT;

pub const SPECIALIST_COUNT_RANGE: RangeInclusive<usize> = 1..=100;
pub const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub city_dataset: PathBuf,
    pub specialist_count: usize,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Reads the process environment. Unset, unparseable or out-of-range
    /// values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://ruralcare.db".to_string()),
            city_dataset: env::var("CITY_DATASET")
                .unwrap_or_else(|_| "worldcities.csv".to_string())
                .into(),
            specialist_count: parse_in_range(
                "SPECIALIST_COUNT",
                SPECIALIST_COUNT_RANGE,
                DEFAULT_MARKER_COUNT,
            ),
            bcrypt_cost: parse_in_range("BCRYPT_COST", BCRYPT_COST_RANGE, bcrypt::DEFAULT_COST),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_in_range<T>(key: &str, range: RangeInclusive<T>, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display + Copy,
{
    let value = parse_or(key, default);
    if range.contains(&value) {
        value
    } else {
        log::warn!(
            "{}={} is outside {}..={}, using {}",
            key,
            value,
            range.start(),
            range.end(),
            default
        );
        default
    }
}
