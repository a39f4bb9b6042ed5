//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Uzbek,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Uzbek => "uz",
            Language::English => "en",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Uzbek.code(), "uz");
        assert_eq!(Language::English.code(), "en");
    }

    #[test]
    fn test_language_defaults_to_uzbek() {
        assert_eq!(Language::default(), Language::Uzbek);
    }
}
