use log::warn;

/// Environment variable that turns on write auditing
pub const AUDIT_WRITES_VAR: &str = "CURRICULUM_AUDIT_WRITES";

/// Runtime options for a [`CurriculumStore`](crate::CurriculumStore)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Validate every value written with `set`/`update` and log each issue.
    /// The write goes through unchanged either way.
    pub audit_writes: bool,
}

impl StoreConfig {
    /// Reads the configuration from the process environment, loading a
    /// `.env` file first if there is one
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            warn!("Failed to load .env file: {err}");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            audit_writes: lookup(AUDIT_WRITES_VAR).is_some_and(|value| parse_flag(&value)),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(value: Option<&str>) -> StoreConfig {
        StoreConfig::from_lookup(|key| {
            assert_eq!(key, AUDIT_WRITES_VAR);
            value.map(str::to_string)
        })
    }

    #[test]
    fn test_defaults_to_off() {
        assert_eq!(config_with(None), StoreConfig::default());
        assert!(!config_with(Some("")).audit_writes);
        assert!(!config_with(Some("0")).audit_writes);
        assert!(!config_with(Some("nope")).audit_writes);
    }

    #[test]
    fn test_flag_values() {
        for value in ["1", "true", "TRUE", " yes ", "On"] {
            assert!(config_with(Some(value)).audit_writes, "{value:?} should enable");
        }
    }
}
