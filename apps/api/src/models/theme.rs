use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Theme identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Visual themes shared by the editor preview and the exported site.
///
/// The serialized id doubles as the CSS class suffix (`theme-<id>`), so these
/// strings must never change once published. Deserialization goes through
/// `FromStr`, so ids are matched case-insensitively there too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Theme {
    #[default]
    Professional,
    Dark,
    Amazon,
    Netflix,
    Google,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown theme '{0}'")]
pub struct UnknownTheme(pub String);

/// Color and typography variables for one theme.
#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub header_text: &'static str,
    pub font_family: &'static str,
}

const SANS_STACK: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";

const PROFESSIONAL: ThemePalette = ThemePalette {
    primary: "#2c3e50",
    secondary: "#34495e",
    accent: "#3498db",
    background: "#f5f7fa",
    surface: "#ffffff",
    text: "#2c3e50",
    text_muted: "#6c7a89",
    border: "#dfe6ee",
    header_text: "#ffffff",
    font_family: SANS_STACK,
};

const DARK: ThemePalette = ThemePalette {
    primary: "#1f2937",
    secondary: "#374151",
    accent: "#60a5fa",
    background: "#111827",
    surface: "#1f2937",
    text: "#f3f4f6",
    text_muted: "#9ca3af",
    border: "#374151",
    header_text: "#f9fafb",
    font_family: SANS_STACK,
};

const AMAZON: ThemePalette = ThemePalette {
    primary: "#232f3e",
    secondary: "#37475a",
    accent: "#ff9900",
    background: "#eaeded",
    surface: "#ffffff",
    text: "#0f1111",
    text_muted: "#565959",
    border: "#d5d9d9",
    header_text: "#ffffff",
    font_family: "'Amazon Ember', Arial, sans-serif",
};

const NETFLIX: ThemePalette = ThemePalette {
    primary: "#141414",
    secondary: "#221f1f",
    accent: "#e50914",
    background: "#000000",
    surface: "#181818",
    text: "#e5e5e5",
    text_muted: "#b3b3b3",
    border: "#333333",
    header_text: "#ffffff",
    font_family: "'Helvetica Neue', Helvetica, Arial, sans-serif",
};

const GOOGLE: ThemePalette = ThemePalette {
    primary: "#4285f4",
    secondary: "#34a853",
    accent: "#ea4335",
    background: "#f8f9fa",
    surface: "#ffffff",
    text: "#202124",
    text_muted: "#5f6368",
    border: "#dadce0",
    header_text: "#ffffff",
    font_family: "'Google Sans', Roboto, Arial, sans-serif",
};

impl Theme {
    /// Every theme, in the order stylesheets declare them.
    pub const ALL: [Theme; 5] = [
        Theme::Professional,
        Theme::Dark,
        Theme::Amazon,
        Theme::Netflix,
        Theme::Google,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Theme::Professional => "professional",
            Theme::Dark => "dark",
            Theme::Amazon => "amazon",
            Theme::Netflix => "netflix",
            Theme::Google => "google",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Professional => "Professional",
            Theme::Dark => "Dark",
            Theme::Amazon => "Amazon Style",
            Theme::Netflix => "Netflix Style",
            Theme::Google => "Google Style",
        }
    }

    /// Class applied to the exported page root to activate this theme.
    pub fn css_class(&self) -> String {
        format!("theme-{}", self.id())
    }

    pub fn palette(&self) -> &'static ThemePalette {
        match self {
            Theme::Professional => &PROFESSIONAL,
            Theme::Dark => &DARK,
            Theme::Amazon => &AMAZON,
            Theme::Netflix => &NETFLIX,
            Theme::Google => &GOOGLE,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Theme::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

impl TryFrom<String> for Theme {
    type Error = UnknownTheme;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        for theme in Theme::ALL {
            assert_eq!(theme.id().parse::<Theme>().unwrap(), theme);
        }
        assert_eq!(" Dark ".parse::<Theme>().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_parse_unknown_id_rejected() {
        let err = "solarized".parse::<Theme>().unwrap_err();
        assert_eq!(err, UnknownTheme("solarized".to_string()));
    }

    #[test]
    fn test_serde_id_matches_css_class() {
        let json = serde_json::to_string(&Theme::Netflix).unwrap();
        assert_eq!(json, "\"netflix\"");
        assert_eq!(Theme::Netflix.css_class(), "theme-netflix");
    }

    #[test]
    fn test_deserialize_ignores_case() {
        let theme: Theme = serde_json::from_str("\"Dark\"").unwrap();
        assert_eq!(theme, Theme::Dark);
        assert!(serde_json::from_str::<Theme>("\"neon\"").is_err());
    }

    #[test]
    fn test_palettes_are_distinct() {
        let accents: std::collections::HashSet<_> =
            Theme::ALL.iter().map(|t| t.palette().accent).collect();
        assert_eq!(accents.len(), Theme::ALL.len());
    }
}
