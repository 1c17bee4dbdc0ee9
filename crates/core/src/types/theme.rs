//! Site colour theme preference.

use serde::{Deserialize, Serialize};

/// Error returned when a persisted theme value is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid theme: {0}")]
pub struct ThemeError(pub String);

/// Colour theme selected by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = ThemeError;

    /// Accepts `"dark"` / `"light"` and the older boolean encoding where
    /// `"true"` meant dark mode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" | "true" => Ok(Self::Dark),
            "light" | "false" => Ok(Self::Light),
            _ => Err(ThemeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_is_self_inverse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_from_str_accepts_boolean_encoding() {
        assert_eq!("true".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("false".parse::<Theme>().unwrap(), Theme::Light);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }
}
