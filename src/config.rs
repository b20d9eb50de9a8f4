//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/stancegraph/config.toml` (XDG) or platform config dir
//! 2. Project config: `.stancegraph.toml`
//! 3. Environment variables: `STANCEGRAPH_*` (nested keys split on `__`)
//!
//! # Intended Usage
//!
//! **Global config** (`~/.config/stancegraph/config.toml`):
//! ```toml
//! [neo4j]
//! uri = "neo4j+s://<id>.databases.neo4j.io"
//! user = "neo4j"
//! password = "..."
//! ```
//!
//! **Project config** (`.stancegraph.toml` next to the corpus):
//! ```toml
//! [pipeline]
//! chunk_size = 10000
//! workers = 0              # 0 = one worker per available processor
//! statement_identity = "text"
//!
//! [keywords]
//! filter = ["lockdown", "curfew", "mask mandate"]
//!
//! [keywords.topics]
//! vaccination = ["vaccine", "jab", "booster"]
//! ```
//!
//! Every keyword list falls back to a built-in default when omitted. The
//! password is typically supplied through `STANCEGRAPH_NEO4J__PASSWORD`.

use std::ops::Deref;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::models::StatementIdentity;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Graph store connection. Only commands that talk to Neo4j require it.
    #[serde(default)]
    pub neo4j: Option<Neo4jConfig>,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub keywords: KeywordConfig,
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    /// Bolt URI, e.g. `neo4j://localhost:7687` or `neo4j+s://<id>.databases.neo4j.io`.
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Filtering and loading settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of input lines per chunk handed to a worker.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Worker pool size. `0` means one worker per available processor.
    #[serde(default)]
    pub workers: usize,
    /// Which attributes identify a Statement node in the graph.
    #[serde(default)]
    pub statement_identity: StatementIdentity,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            workers: 0,
            statement_identity: StatementIdentity::default(),
        }
    }
}

impl PipelineConfig {
    /// Resolved worker count: the configured value, or the number of
    /// available processors when unset.
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }
    }
}

/// Keyword lists driving the filter and the classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    /// Keywords a statement must contain to survive filtering.
    #[serde(default = "default_filter_keywords")]
    pub filter: Vec<String>,
    #[serde(default = "default_defiance_keywords")]
    pub defiance: Vec<String>,
    #[serde(default = "default_compliance_keywords")]
    pub compliance: Vec<String>,
    #[serde(default)]
    pub topics: TopicKeywords,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            filter: default_filter_keywords(),
            defiance: default_defiance_keywords(),
            compliance: default_compliance_keywords(),
            topics: TopicKeywords::default(),
        }
    }
}

/// Keyword lists per topic. The scan order is fixed by
/// [`Topic::PRIORITY`](crate::models::Topic::PRIORITY), not by this struct.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicKeywords {
    #[serde(default = "default_lockdown_keywords")]
    pub lockdown: Vec<String>,
    #[serde(default = "default_social_distancing_keywords")]
    pub social_distancing: Vec<String>,
    #[serde(default = "default_reopening_keywords")]
    pub reopening: Vec<String>,
    #[serde(default = "default_guidelines_keywords")]
    pub guidelines: Vec<String>,
    #[serde(default = "default_vaccination_keywords")]
    pub vaccination: Vec<String>,
}

impl Default for TopicKeywords {
    fn default() -> Self {
        Self {
            lockdown: default_lockdown_keywords(),
            social_distancing: default_social_distancing_keywords(),
            reopening: default_reopening_keywords(),
            guidelines: default_guidelines_keywords(),
            vaccination: default_vaccination_keywords(),
        }
    }
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_chunk_size() -> usize {
    10_000
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_filter_keywords() -> Vec<String> {
    words(&[
        "covid",
        "covid-19",
        "coronavirus",
        "pandemic",
        "lockdown",
        "lockdowns",
        "curfew",
        "quarantine",
        "shutdown",
        "stay at home",
        "social distancing",
        "mask",
        "masks",
        "mandate",
        "reopen",
        "reopening",
        "guidelines",
        "restrictions",
        "vaccine",
        "vaccination",
    ])
}

fn default_defiance_keywords() -> Vec<String> {
    words(&[
        "defy",
        "defied",
        "defies",
        "defying",
        "protest",
        "protested",
        "protesting",
        "protests",
        "refuse",
        "refused",
        "refusing",
        "ignore",
        "ignored",
        "ignoring",
        "violate",
        "violated",
        "violating",
        "reject",
        "rejected",
        "resist",
        "resisted",
        "disobey",
        "disobeyed",
        "flout",
        "flouted",
        "oppose",
        "opposed",
    ])
}

fn default_compliance_keywords() -> Vec<String> {
    words(&[
        "comply",
        "complied",
        "complies",
        "complying",
        "compliance",
        "follow",
        "followed",
        "following",
        "obey",
        "obeyed",
        "adhere",
        "adhered",
        "abide",
        "abided",
        "cooperate",
        "cooperated",
        "observe",
        "observed",
        "support",
        "supported",
    ])
}

fn default_lockdown_keywords() -> Vec<String> {
    words(&[
        "lockdown",
        "lockdowns",
        "lock down",
        "curfew",
        "shutdown",
        "shut down",
        "stay at home",
        "stay-at-home",
        "quarantine",
        "shelter in place",
    ])
}

fn default_social_distancing_keywords() -> Vec<String> {
    words(&[
        "social distancing",
        "social distance",
        "physical distancing",
        "six feet",
        "6 feet",
        "gathering",
        "gatherings",
        "crowds",
    ])
}

fn default_reopening_keywords() -> Vec<String> {
    words(&[
        "reopen",
        "reopens",
        "reopening",
        "reopened",
        "ease restrictions",
        "easing restrictions",
        "lift restrictions",
        "lifted restrictions",
    ])
}

fn default_guidelines_keywords() -> Vec<String> {
    words(&[
        "guideline",
        "guidelines",
        "guidance",
        "recommendation",
        "recommendations",
        "protocol",
        "protocols",
        "cdc",
    ])
}

fn default_vaccination_keywords() -> Vec<String> {
    words(&[
        "vaccine",
        "vaccines",
        "vaccination",
        "vaccinations",
        "vaccinated",
        "vaccinate",
        "booster",
        "immunization",
    ])
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered figment used by [`Config::load`].
    pub fn figment() -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(".stancegraph.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("STANCEGRAPH_").split("__"))
    }

    /// Extract a config from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(ConfigError::from)
    }

    /// Neo4j settings, or an error when the section is absent.
    pub fn neo4j(&self) -> Result<&Neo4jConfig, crate::error::AppError> {
        self.neo4j
            .as_ref()
            .ok_or(crate::error::AppError::MissingNeo4jConfig)
    }

    /// User config path: ~/.config/stancegraph/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("stancegraph").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("stancegraph").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        Config::from_figment(Figment::new().merge(Toml::string(toml))).unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("");
        assert!(config.neo4j.is_none());
        assert_eq!(config.pipeline.chunk_size, 10_000);
        assert_eq!(config.pipeline.workers, 0);
        assert_eq!(config.pipeline.statement_identity, StatementIdentity::Text);
        assert!(config.keywords.filter.contains(&"lockdown".to_string()));
        assert!(config.keywords.topics.vaccination.contains(&"vaccine".to_string()));
    }

    #[test]
    fn test_neo4j_section() {
        let config = parse(
            r#"
            [neo4j]
            uri = "neo4j://localhost:7687"
            password = "secret"
            "#,
        );
        let neo4j = config.neo4j().unwrap();
        assert_eq!(neo4j.uri, "neo4j://localhost:7687");
        assert_eq!(neo4j.user, "neo4j");
        assert_eq!(neo4j.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_missing_neo4j_is_an_error() {
        let config = parse("");
        assert!(matches!(
            config.neo4j(),
            Err(crate::error::AppError::MissingNeo4jConfig)
        ));
    }

    #[test]
    fn test_partial_keyword_override_keeps_other_defaults() {
        let config = parse(
            r#"
            [keywords.topics]
            vaccination = ["jab"]
            "#,
        );
        assert_eq!(config.keywords.topics.vaccination, vec!["jab".to_string()]);
        assert!(config.keywords.topics.lockdown.contains(&"curfew".to_string()));
        assert!(config.keywords.defiance.contains(&"defy".to_string()));
    }

    #[test]
    fn test_pipeline_settings() {
        let config = parse(
            r#"
            [pipeline]
            chunk_size = 500
            workers = 3
            statement_identity = "occurrence"
            "#,
        );
        assert_eq!(config.pipeline.chunk_size, 500);
        assert_eq!(config.pipeline.effective_workers(), 3);
        assert_eq!(
            config.pipeline.statement_identity,
            StatementIdentity::Occurrence
        );
    }

    #[test]
    fn test_effective_workers_defaults_to_processors() {
        let config = PipelineConfig::default();
        assert!(config.effective_workers() >= 1);
    }
}
