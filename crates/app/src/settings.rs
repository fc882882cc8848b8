//! Settings of the `hotelpro` binary.
//!
//! Read from `config/hotelpro.toml` (optional), then `HOTELPRO_*` environment
//! variables (`HOTELPRO_REMOTE__KIND=memory`), then command line flags.

use chrono::NaiveDate;
use clap::Parser;
use engine::stats::{DEFAULT_DAYS, DEFAULT_MONTHS_BACK};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/hotelpro.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where the ledger is persisted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Remote {
    /// Nothing survives the process.
    #[default]
    Memory,
    Sqlite {
        path: String,
    },
    Postgrest {
        url: String,
        api_key: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Report {
    /// Pivot date, today when absent.
    pub date: Option<NaiveDate>,
    pub months: u32,
    pub days: u32,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            date: None,
            months: DEFAULT_MONTHS_BACK,
            days: DEFAULT_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub remote: Remote,
    pub report: Report,
}

#[derive(Debug, Parser)]
#[command(name = "hotelpro", version, about = "Daily figures of the hotel ledger")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Pivot date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_pivot)]
    date: Option<NaiveDate>,
    /// Months in the monthly rollup.
    #[arg(long)]
    months: Option<u32>,
    /// Days in the rolling profit window.
    #[arg(long)]
    days: Option<u32>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
}

fn parse_pivot(value: &str) -> std::result::Result<NaiveDate, String> {
    engine::parse_date(value).map_err(|err| err.to_string())
}

impl Settings {
    pub fn new() -> Result<Self> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings = Self::from_sources(config_path)?;

        if let Some(date) = args.date {
            settings.report.date = Some(date);
        }
        if let Some(months) = args.months {
            settings.report.months = months;
        }
        if let Some(days) = args.days {
            settings.report.days = days;
        }
        if let Some(level) = args.level {
            settings.app.level = level;
        }

        Ok(settings)
    }

    fn from_sources(config_path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("HOTELPRO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::from_sources("does/not/exist.toml").unwrap();

        assert_eq!(settings.remote, Remote::Memory);
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.report.months, DEFAULT_MONTHS_BACK);
        assert_eq!(settings.report.days, DEFAULT_DAYS);
        assert!(settings.report.date.is_none());
    }

    #[test]
    fn reads_tagged_remote() {
        let dir = std::env::temp_dir().join(format!("hotelpro-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hotelpro.toml");
        std::fs::write(
            &path,
            "[app]\nlevel = \"debug\"\n\n[remote]\nkind = \"postgrest\"\nurl = \"https://x.supabase.co\"\napi_key = \"k\"\n\n[report]\ndate = \"2025-01-10\"\nmonths = 12\n",
        )
        .unwrap();

        let settings = Settings::from_sources(path.to_str().unwrap()).unwrap();

        assert_eq!(settings.app.level, "debug");
        assert_eq!(
            settings.remote,
            Remote::Postgrest {
                url: "https://x.supabase.co".to_string(),
                api_key: "k".to_string(),
            }
        );
        assert_eq!(settings.report.date, engine::parse_date("2025-01-10").ok());
        assert_eq!(settings.report.months, 12);
        assert_eq!(settings.report.days, DEFAULT_DAYS);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
