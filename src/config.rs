//! Household configuration
//!
//! A config lists the chores to hand out and the people to hand them to.
//! The format is picked from the file extension: `.toml`, `.yaml`/`.yml`,
//! and JSON for anything else.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::models::{Chore, Person};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "chores_config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chores: Vec<Chore>,

    #[serde(default)]
    pub people: Vec<Person>,
}

/// On-disk config formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

impl Config {
    /// Read, parse and validate a config file, with every person reset to
    /// their pre-assigned baseline.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let format = ConfigFormat::from_path(path);
        debug!(path = %path.display(), ?format, "Parsing config");

        let config = Self::parse(&content, format)?;
        info!(
            chores = config.chores.len(),
            people = config.people.len(),
            "Loaded config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate config text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let mut config: Config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };

        config.validate()?;
        config.reset_people();
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json, ConfigFormat::Json)
    }

    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::parse(toml, ConfigFormat::Toml)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::parse(yaml, ConfigFormat::Yaml)
    }

    /// Check the invariants the distributor relies on.
    pub fn validate(&self) -> Result<()> {
        for chore in self.chores.iter().chain(self.people.iter().flat_map(|p| &p.pre_assigned)) {
            if chore.name.trim().is_empty() {
                return Err(ConfigError::Invalid("chore with empty name".to_string()));
            }
        }

        let mut seen = HashSet::new();
        for person in &self.people {
            if person.name.trim().is_empty() {
                return Err(ConfigError::Invalid("person with empty name".to_string()));
            }
            if !seen.insert(person.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate person '{}'",
                    person.name
                )));
            }
        }

        if self.people.is_empty() && !self.chores.is_empty() {
            return Err(ConfigError::Invalid(
                "chores are listed but no people to assign them to".to_string(),
            ));
        }

        Ok(())
    }

    /// Reset every person to the totals of their pre-assigned chores.
    pub fn reset_people(&mut self) {
        for person in &mut self.people {
            person.reset_to_baseline();
        }
    }

    /// A fresh copy of the people, ready for a distribution run.
    pub fn baseline_people(&self) -> Vec<Person> {
        let mut people = self.people.clone();
        for person in &mut people {
            person.reset_to_baseline();
        }
        people
    }
}
