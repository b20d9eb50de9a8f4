//! Classification labels assigned to every enriched statement.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stance of a statement toward public-health measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementType {
    Compliance,
    Defiance,
    Neutral,
}

impl StatementType {
    /// Keyword scan order. Defiance outranks compliance when a statement
    /// matches both; `Neutral` is the fallback and is never scanned.
    pub const PRIORITY: [StatementType; 2] = [StatementType::Defiance, StatementType::Compliance];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementType::Compliance => "compliance",
            StatementType::Defiance => "defiance",
            StatementType::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for StatementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pandemic-policy topic of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Lockdown,
    SocialDistancing,
    Reopening,
    Guidelines,
    Vaccination,
    General,
}

impl Topic {
    /// Topic scan order; the first category with a keyword hit wins.
    /// `General` is the fallback and is never scanned.
    pub const PRIORITY: [Topic; 5] = [
        Topic::Lockdown,
        Topic::SocialDistancing,
        Topic::Reopening,
        Topic::Guidelines,
        Topic::Vaccination,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Lockdown => "lockdown",
            Topic::SocialDistancing => "social_distancing",
            Topic::Reopening => "reopening",
            Topic::Guidelines => "guidelines",
            Topic::Vaccination => "vaccination",
            Topic::General => "general",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lockdown" => Ok(Topic::Lockdown),
            "social_distancing" => Ok(Topic::SocialDistancing),
            "reopening" => Ok(Topic::Reopening),
            "guidelines" => Ok(Topic::Guidelines),
            "vaccination" => Ok(Topic::Vaccination),
            "general" => Ok(Topic::General),
            _ => Err(format!(
                "Invalid topic '{}'. Valid values: lockdown, social_distancing, reopening, guidelines, vaccination, general",
                s
            )),
        }
    }
}

/// Downstream public behavior inferred from a statement's stance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicBehavior {
    #[serde(rename = "Public Compliance")]
    Compliance,
    #[serde(rename = "Public Defiance")]
    Defiance,
    #[serde(rename = "Neutral Behavior")]
    Neutral,
}

impl PublicBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicBehavior::Compliance => "Public Compliance",
            PublicBehavior::Defiance => "Public Defiance",
            PublicBehavior::Neutral => "Neutral Behavior",
        }
    }
}

impl From<StatementType> for PublicBehavior {
    fn from(statement_type: StatementType) -> Self {
        match statement_type {
            StatementType::Compliance => PublicBehavior::Compliance,
            StatementType::Defiance => PublicBehavior::Defiance,
            StatementType::Neutral => PublicBehavior::Neutral,
        }
    }
}

impl std::fmt::Display for PublicBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Public Compliance" => Ok(PublicBehavior::Compliance),
            "Public Defiance" => Ok(PublicBehavior::Defiance),
            "Neutral Behavior" => Ok(PublicBehavior::Neutral),
            _ => Err(format!(
                "Invalid behavior '{}'. Valid values: Public Compliance, Public Defiance, Neutral Behavior",
                s
            )),
        }
    }
}
