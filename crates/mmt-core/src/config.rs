use serde::Deserialize;

/// Mastery a prerequisite skill needs before dependent skills unlock
pub const DEFAULT_UNLOCK_THRESHOLD: u8 = 50;

/// Read-only switches the core consults while selecting skills
pub trait Settings {
    fn is_spaced_repetition_enabled(&self) -> bool;

    fn unlock_threshold(&self) -> u8 {
        DEFAULT_UNLOCK_THRESHOLD
    }
}

/// Practice policy knobs, loaded from `PRACTICE_*` environment variables
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PracticeConfig {
    #[serde(default = "default_session_length")]
    pub session_length: usize,
    #[serde(default = "default_warmup_slots")]
    pub warmup_slots: usize,
    #[serde(default = "default_max_retry_slots")]
    pub max_retry_slots: usize,
    #[serde(default)]
    pub spaced_repetition: bool,
    #[serde(default = "default_unlock_threshold")]
    pub unlock_threshold: u8,
}

const fn default_session_length() -> usize {
    10
}

const fn default_warmup_slots() -> usize {
    2
}

const fn default_max_retry_slots() -> usize {
    2
}

const fn default_unlock_threshold() -> u8 {
    DEFAULT_UNLOCK_THRESHOLD
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            session_length: default_session_length(),
            warmup_slots: default_warmup_slots(),
            max_retry_slots: default_max_retry_slots(),
            spaced_repetition: false,
            unlock_threshold: default_unlock_threshold(),
        }
    }
}

impl PracticeConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("PRACTICE_").from_env()
    }

    pub fn with_spaced_repetition(mut self, enabled: bool) -> Self {
        self.spaced_repetition = enabled;
        self
    }
}

impl Settings for PracticeConfig {
    fn is_spaced_repetition_enabled(&self) -> bool {
        self.spaced_repetition
    }

    fn unlock_threshold(&self) -> u8 {
        self.unlock_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config: PracticeConfig = envy::prefixed("PRACTICE_")
            .from_iter(Vec::<(String, String)>::new())
            .unwrap();
        assert_eq!(config, PracticeConfig::default());
        assert_eq!(config.session_length, 10);
        assert!(!config.is_spaced_repetition_enabled());
        assert_eq!(config.unlock_threshold(), 50);
    }

    #[test]
    fn test_overrides_from_env() {
        let vars = vec![
            ("PRACTICE_SPACED_REPETITION".to_string(), "true".to_string()),
            ("PRACTICE_SESSION_LENGTH".to_string(), "12".to_string()),
        ];
        let config: PracticeConfig = envy::prefixed("PRACTICE_").from_iter(vars).unwrap();
        assert!(config.is_spaced_repetition_enabled());
        assert_eq!(config.session_length, 12);
        assert_eq!(config.warmup_slots, 2);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let vars = vec![("PRACTICE_SESSION_LENGTH".to_string(), "lots".to_string())];
        let result: Result<PracticeConfig, _> = envy::prefixed("PRACTICE_").from_iter(vars);
        assert!(result.is_err());
    }
}
