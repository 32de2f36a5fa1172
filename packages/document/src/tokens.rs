//! # Theme Tokens
//!
//! Flat record of design variables applied to every block on a page.
//! Tokens are emitted as CSS custom properties on `:root`, so blocks refer to
//! `var(--color-primary)` rather than to concrete values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Design variables for a store theme.
///
/// Decoding is per field: a missing or mistyped token keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeTokens {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub font_family: String,
    /// Corner radius for buttons and cards
    pub radius_base: String,
    /// Corner radius for banners and large surfaces
    pub radius_large: String,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            primary: "#FE7501".to_string(),
            secondary: "#1F2937".to_string(),
            accent: "#FACC15".to_string(),
            background: "#FFFFFF".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            radius_base: "8px".to_string(),
            radius_large: "16px".to_string(),
        }
    }
}

impl ThemeTokens {
    /// Shallow-merge a partial update. Returns true if any field changed.
    pub fn merge(&mut self, patch: &TokensPatch) -> bool {
        let mut changed = false;

        set_field(&mut self.primary, &patch.primary, &mut changed);
        set_field(&mut self.secondary, &patch.secondary, &mut changed);
        set_field(&mut self.accent, &patch.accent, &mut changed);
        set_field(&mut self.background, &patch.background, &mut changed);
        set_field(&mut self.font_family, &patch.font_family, &mut changed);
        set_field(&mut self.radius_base, &patch.radius_base, &mut changed);
        set_field(&mut self.radius_large, &patch.radius_large, &mut changed);

        changed
    }

    /// CSS custom properties for these tokens, in a fixed order
    pub fn css_variables(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("--color-primary", self.primary.as_str()),
            ("--color-secondary", self.secondary.as_str()),
            ("--color-accent", self.accent.as_str()),
            ("--color-background", self.background.as_str()),
            ("--font-family", self.font_family.as_str()),
            ("--radius-base", self.radius_base.as_str()),
            ("--radius-large", self.radius_large.as_str()),
        ]
    }
}

impl<'de> Deserialize<'de> for ThemeTokens {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut tokens = ThemeTokens::default();

        let map = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            Value::Null => return Ok(tokens),
            other => {
                warn!(tokens = %other, "Tokens are not an object, using defaults");
                return Ok(tokens);
            }
        };

        let fields = [
            ("primary", &mut tokens.primary),
            ("secondary", &mut tokens.secondary),
            ("accent", &mut tokens.accent),
            ("background", &mut tokens.background),
            ("font_family", &mut tokens.font_family),
            ("radius_base", &mut tokens.radius_base),
            ("radius_large", &mut tokens.radius_large),
        ];

        for (name, slot) in fields {
            match map.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::String(value)) => *slot = value.clone(),
                Some(other) => {
                    warn!(token = name, value = %other, "Token is not a string, keeping default");
                }
            }
        }

        Ok(tokens)
    }
}

fn set_field(field: &mut String, value: &Option<String>, changed: &mut bool) {
    if let Some(value) = value {
        if field != value {
            *field = value.clone();
            *changed = true;
        }
    }
}

/// Partial token update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_large: Option<String>,
}

impl TokensPatch {
    pub fn primary(value: impl Into<String>) -> Self {
        Self {
            primary: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut tokens = ThemeTokens::default();
        let before = tokens.clone();

        let changed = tokens.merge(&TokensPatch::primary("#123456"));

        assert!(changed);
        assert_eq!(tokens.primary, "#123456");
        assert_eq!(tokens.secondary, before.secondary);
        assert_eq!(tokens.font_family, before.font_family);
        assert_eq!(tokens.radius_large, before.radius_large);
    }

    #[test]
    fn test_merge_same_value_reports_unchanged() {
        let mut tokens = ThemeTokens::default();
        assert!(!tokens.merge(&TokensPatch::primary("#FE7501")));
        assert!(!tokens.merge(&TokensPatch::default()));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let tokens: ThemeTokens =
            serde_json::from_str(r##"{ "accent": "#000000", "unknown_key": 1 }"##).unwrap();

        assert_eq!(tokens.accent, "#000000");
        assert_eq!(tokens.primary, "#FE7501");
        assert_eq!(tokens.radius_base, "8px");
    }

    #[test]
    fn test_css_variables_order() {
        let tokens = ThemeTokens::default();
        let names: Vec<&str> = tokens.css_variables().iter().map(|(name, _)| *name).collect();
        assert_eq!(names[0], "--color-primary");
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_mistyped_token_keeps_default() {
        let tokens: ThemeTokens =
            serde_json::from_str(r##"{ "primary": 5, "accent": "#000000", "radius_base": null }"##)
                .unwrap();

        assert_eq!(tokens.primary, "#FE7501");
        assert_eq!(tokens.accent, "#000000");
        assert_eq!(tokens.radius_base, "8px");
    }
}
