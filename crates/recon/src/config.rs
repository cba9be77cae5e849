use serde::Deserialize;

use crate::error::MusterError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RosterConfig {
    pub name: String,
    pub sources: SourcesConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The three extracts, as paths relative to the config file's directory.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Personnel roster, authoritative for who exists.
    pub roster: String,
    /// Service-history ledger, enrichment only.
    pub history: String,
    /// Per-unit summary sheet: unit records and capacity counters.
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Service-date cache file, relative to the config file's directory.
    #[serde(default = "default_cache_file")]
    pub file: String,
    /// Rebuild regardless of staleness.
    #[serde(default)]
    pub rebuild: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            file: default_cache_file(),
            rebuild: false,
        }
    }
}

fn default_cache_file() -> String {
    "service_dates.json".into()
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Sentinel for people whose demographic category cannot be resolved.
    /// `category_aliases` entries fold into this token as well.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Category spellings folded into `default_category`.
    #[serde(default = "default_category_aliases")]
    pub category_aliases: Vec<String>,
    /// Sentinel for people whose secondary attribute cannot be resolved.
    #[serde(default = "default_attribute")]
    pub default_attribute: String,
    /// Sentinel label for rows with no zone and for unlabeled ranking buckets.
    #[serde(default = "default_unknown_label")]
    pub unknown_label: String,
    /// Persons served per staff member; drives the needed-staff ceiling.
    #[serde(default = "default_persons_per_staff")]
    pub persons_per_staff: u32,
    /// Case-insensitive substring marking the counted staff role.
    #[serde(default = "default_staff_keyword")]
    pub staff_keyword: String,
    /// Substring marking the unit-head singleton role.
    #[serde(default = "default_head_keyword")]
    pub head_keyword: String,
    /// Substring marking the special-educator singleton role.
    #[serde(default = "default_special_keyword")]
    pub special_keyword: String,
    /// Entries per ranked summary.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            category_aliases: default_category_aliases(),
            default_attribute: default_attribute(),
            unknown_label: default_unknown_label(),
            persons_per_staff: default_persons_per_staff(),
            staff_keyword: default_staff_keyword(),
            head_keyword: default_head_keyword(),
            special_keyword: default_special_keyword(),
            top_n: default_top_n(),
        }
    }
}

fn default_category() -> String {
    "GENERAL".into()
}

fn default_category_aliases() -> Vec<String> {
    vec!["UR".into(), "GEN".into(), "GENERAL".into()]
}

fn default_attribute() -> String {
    "UNSPECIFIED".into()
}

fn default_unknown_label() -> String {
    "UNKNOWN".into()
}

fn default_persons_per_staff() -> u32 {
    40
}

fn default_staff_keyword() -> String {
    "teacher".into()
}

fn default_head_keyword() -> String {
    "principal".into()
}

fn default_special_keyword() -> String {
    "special educator".into()
}

fn default_top_n() -> usize {
    10
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RosterConfig {
    pub fn from_toml(input: &str) -> Result<Self, MusterError> {
        let config: RosterConfig =
            toml::from_str(input).map_err(|e| MusterError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MusterError> {
        for (label, path) in [
            ("roster", &self.sources.roster),
            ("history", &self.sources.history),
            ("summary", &self.sources.summary),
        ] {
            if path.is_empty() {
                return Err(MusterError::ConfigValidation(format!(
                    "sources.{label} must not be empty"
                )));
            }
        }

        if self.cache.file.is_empty() {
            return Err(MusterError::ConfigValidation(
                "cache.file must not be empty".into(),
            ));
        }

        if self.policy.persons_per_staff == 0 {
            return Err(MusterError::ConfigValidation(
                "policy.persons_per_staff must be at least 1".into(),
            ));
        }

        if self.policy.top_n == 0 {
            return Err(MusterError::ConfigValidation(
                "policy.top_n must be at least 1".into(),
            ));
        }

        for (label, keyword) in [
            ("staff_keyword", &self.policy.staff_keyword),
            ("head_keyword", &self.policy.head_keyword),
            ("special_keyword", &self.policy.special_keyword),
        ] {
            if keyword.is_empty() {
                return Err(MusterError::ConfigValidation(format!(
                    "policy.{label} must not be empty"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "Monthly Pass"

[sources]
roster = "roster.csv"
history = "history.csv"
summary = "summary.csv"

[cache]
file = "out/service_dates.json"

[policy]
persons_per_staff = 40
top_n = 10
"#;

    #[test]
    fn parse_valid() {
        let config = RosterConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "Monthly Pass");
        assert_eq!(config.sources.roster, "roster.csv");
        assert_eq!(config.cache.file, "out/service_dates.json");
        assert!(!config.cache.rebuild);
        assert_eq!(config.policy.default_category, "GENERAL");
        assert_eq!(config.policy.persons_per_staff, 40);
    }

    #[test]
    fn policy_defaults_apply() {
        let config = RosterConfig::from_toml(
            r#"
name = "Defaults"

[sources]
roster = "r.csv"
history = "h.csv"
summary = "s.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.policy.unknown_label, "UNKNOWN");
        assert_eq!(config.policy.staff_keyword, "teacher");
        assert_eq!(config.policy.top_n, 10);
        assert_eq!(config.cache.file, "service_dates.json");
        assert!(config
            .policy
            .category_aliases
            .iter()
            .any(|a| a == "UR"));
    }

    #[test]
    fn reject_zero_ratio() {
        let input = VALID.replace("persons_per_staff = 40", "persons_per_staff = 0");
        let err = RosterConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("persons_per_staff"));
    }

    #[test]
    fn reject_empty_source() {
        let input = VALID.replace("roster = \"roster.csv\"", "roster = \"\"");
        let err = RosterConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("sources.roster"));
    }

    #[test]
    fn reject_missing_sources_table() {
        let err = RosterConfig::from_toml("name = \"x\"").unwrap_err();
        assert!(matches!(err, MusterError::ConfigParse(_)));
    }
}
