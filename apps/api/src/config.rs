use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::layout::{ColumnRule, LayoutConfig};

const DEFAULT_GALLERY_PATH: &str = "public/data/gallery.json";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Location of the `{ "panels": [...] }` gallery document.
    pub gallery_path: PathBuf,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = LayoutConfig::default();

        let breakpoints = match lookup("COLUMN_BREAKPOINTS") {
            Some(raw) => parse_breakpoints(&raw).context("COLUMN_BREAKPOINTS is malformed")?,
            None => defaults.breakpoints,
        };

        let layout = LayoutConfig {
            gap: parse_or(&lookup, "LAYOUT_GAP", defaults.gap)?,
            wide_aspect_threshold: parse_or(
                &lookup,
                "WIDE_ASPECT_THRESHOLD",
                defaults.wide_aspect_threshold,
            )?,
            breakpoints,
            max_columns: parse_or(&lookup, "MAX_COLUMNS", defaults.max_columns)?,
        };

        if layout.gap < 0.0 {
            return Err(anyhow!("LAYOUT_GAP must not be negative"));
        }
        if layout.max_columns == 0 {
            return Err(anyhow!("MAX_COLUMNS must be at least 1"));
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            gallery_path: lookup("GALLERY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GALLERY_PATH)),
            layout,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// Parses `"620:2,1100:3"` into ordered column rules.
fn parse_breakpoints(raw: &str) -> Result<Vec<ColumnRule>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| -> Result<ColumnRule> {
            let (width, columns) = part
                .split_once(':')
                .ok_or_else(|| anyhow!("expected 'maxWidth:columns', got '{part}'"))?;
            let columns: usize = columns
                .trim()
                .parse()
                .with_context(|| format!("bad column count in '{part}'"))?;
            if columns == 0 {
                return Err(anyhow!("column count must be at least 1 in '{part}'"));
            }
            Ok(ColumnRule {
                max_width: width.trim().parse().with_context(|| format!("bad width in '{part}'"))?,
                columns,
            })
        })
        .collect()
}
