//! setup.rs
//!
//! Setup values of the calendar front end.
//!
//! # Overview
//!
//! - **`Setup`**: a string key/value store. It is filled from text in the
//!   `key="value"` format (one pair per line, or several pairs separated by
//!   commas) and written back in the same format by `savesetup`.
//!
//! - **`KoyomiConfig`**: the typed settings derived from a `Setup`:
//!
//!   | key                | type  | default |
//!   |--------------------|-------|---------|
//!   | `extended_details` | bool  | `true`  |
//!   | `min_year`         | year  | 1970    |
//!   | `max_year`         | year  | 2050    |
//!   | `holidays_file`    | path  | none    |
//!
//!   Booleans accept `1`/`0`, `true`/`false`, `on`/`off`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{KoyomiError, Result};
use crate::fileio::do_read;

static SETUP_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*=\s*"([^"]*)""#).expect("setup pair pattern is valid")
});

/// Setup keys understood by [`KoyomiConfig::from_setup`].
pub const SETUP_KEYS: [&str; 4] = ["extended_details", "min_year", "max_year", "holidays_file"];

/// Raw setup values, key -> string.
#[derive(Debug, Clone, Default)]
pub struct Setup {
    store: HashMap<String, String>,
}

impl Setup {
    pub fn new() -> Self {
        Setup {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.store.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.store.insert(name.to_string(), value.to_string());
    }

    /// Reads every `key="value"` pair of `setup_str`; later pairs replace
    /// earlier ones. Lines starting with `#` are ignored.
    ///
    /// ```
    /// # use koyomi::setup::Setup;
    /// let mut setup = Setup::new();
    /// setup.load_from_str("min_year=\"1980\",\n# comment\nextended_details = \"0\"");
    /// assert_eq!(setup.get("min_year"), Some("1980"));
    /// assert_eq!(setup.get("extended_details"), Some("0"));
    /// ```
    pub fn load_from_str(&mut self, setup_str: &str) {
        for line in setup_str.lines() {
            let line = line.trim_start();
            if line.starts_with('#') {
                continue;
            }
            for caps in SETUP_PAIR.captures_iter(line) {
                debug!(key = &caps[1], value = &caps[2], "setup value");
                self.store.insert(caps[1].to_string(), caps[2].to_string());
            }
        }
    }

    /// Loads a setup file; see [`Setup::load_from_str`].
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let lines = do_read(path)?;
        self.load_from_str(&lines.join("\n"));
        Ok(())
    }

    /// Serializes the store as `key="value",` lines, keys sorted.
    pub fn savesetup(&self) -> String {
        let mut keys: Vec<&String> = self.store.keys().collect();
        keys.sort();

        let mut result = String::new();
        for k in keys {
            result.push_str(&format!("{}=\"{}\",\n", k, self.store[k]));
        }
        result
    }
}

/// Typed calendar settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KoyomiConfig {
    /// Show six-day readings/meanings and holiday explanations.
    pub extended_details: bool,
    pub min_year: i32,
    pub max_year: i32,
    /// Holiday table replacing the built-in rules.
    pub holidays_file: Option<PathBuf>,
}

impl Default for KoyomiConfig {
    fn default() -> Self {
        KoyomiConfig {
            extended_details: true,
            min_year: 1970,
            max_year: 2050,
            holidays_file: None,
        }
    }
}

impl KoyomiConfig {
    /// Settings from `setup`, defaults for absent keys.
    ///
    /// ```
    /// # use koyomi::setup::{KoyomiConfig, Setup};
    /// let mut setup = Setup::new();
    /// setup.load_from_str(r#"max_year="2030""#);
    /// let config = KoyomiConfig::from_setup(&setup).unwrap();
    /// assert_eq!((config.min_year, config.max_year), (1970, 2030));
    /// ```
    pub fn from_setup(setup: &Setup) -> Result<Self> {
        let mut config = KoyomiConfig::default();
        for key in setup.store.keys() {
            if !SETUP_KEYS.contains(&key.as_str()) {
                warn!(%key, "ignoring unknown setup key");
            }
        }

        if let Some(value) = setup.get("extended_details") {
            config.extended_details = parse_flag("extended_details", value)?;
        }
        if let Some(value) = setup.get("min_year") {
            config.min_year = parse_value("min_year", value)?;
        }
        if let Some(value) = setup.get("max_year") {
            config.max_year = parse_value("max_year", value)?;
        }
        if let Some(value) = setup.get("holidays_file").filter(|v| !v.trim().is_empty()) {
            config.holidays_file = Some(PathBuf::from(value.trim()));
        }

        if config.max_year < config.min_year {
            return Err(invalid("max_year", &config.max_year.to_string()));
        }
        Ok(config)
    }

    /// Inverse of [`KoyomiConfig::from_setup`].
    pub fn to_setup(&self) -> Setup {
        let mut setup = Setup::new();
        setup.set("extended_details", if self.extended_details { "1" } else { "0" });
        setup.set("min_year", &self.min_year.to_string());
        setup.set("max_year", &self.max_year.to_string());
        if let Some(path) = &self.holidays_file {
            setup.set("holidays_file", &path.display().to_string());
        }
        setup
    }
}

fn invalid(key: &str, value: &str) -> KoyomiError {
    KoyomiError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| invalid(key, value))
}
