// Theme resolution
// Turns one brand configuration into a plain value the rendering layer
// consumes as parameters. No ambient state: callers thread the resolved
// theme through explicitly.

use serde::{Deserialize, Serialize};

use crate::color::{
    generate_brand_palette, get_chart_theme_colors, get_status_colors, hex_to_hsl, hsl_to_hex,
    ChartThemeColors, StatusColors,
};

/// Default brand color when a record carries none.
pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";

/// Number of chart series colors derived per brand.
pub const CHART_SERIES_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Parse a stored mode string; anything unrecognized falls back to dark,
    /// the app's default presentation mode.
    pub fn parse(value: &str) -> ThemeMode {
        match value {
            "light" => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }
}

/// Branding inputs, as stored on a presentation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    pub company_name: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub theme_mode: ThemeMode,
}

impl Default for BrandConfig {
    fn default() -> Self {
        BrandConfig {
            company_name: "Your Company".to_string(),
            logo_url: None,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            theme_mode: ThemeMode::Dark,
        }
    }
}

/// Brand color variations derived from the primary color.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandColors {
    pub primary: String,
    pub primary_light: String,
    pub primary_dark: String,
    /// Primary with a "40" alpha suffix (25% opacity), for glow effects
    pub primary_glow: String,
}

/// Everything the rendering layer needs to style one presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTheme {
    pub mode: ThemeMode,
    pub colors: BrandColors,
    pub chart_colors: Vec<String>,
    pub chart: ChartThemeColors,
    pub status: StatusColors,
}

/// Resolve a brand configuration into a complete theme.
pub fn resolve_theme(config: &BrandConfig) -> ResolvedTheme {
    let hsl = hex_to_hsl(&config.primary_color);

    let colors = BrandColors {
        primary: config.primary_color.clone(),
        primary_light: hsl_to_hex(hsl.h, (hsl.s + 10).min(100), (hsl.l + 20).min(85)),
        primary_dark: hsl_to_hex(hsl.h, hsl.s, (hsl.l - 20).max(15)),
        primary_glow: format!("{}40", config.primary_color),
    };

    let light_mode = config.theme_mode == ThemeMode::Light;

    ResolvedTheme {
        mode: config.theme_mode,
        colors,
        chart_colors: generate_brand_palette(&config.primary_color, CHART_SERIES_COUNT),
        chart: get_chart_theme_colors(light_mode),
        status: get_status_colors(light_mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_theme_variations() {
        let config = BrandConfig {
            primary_color: "#3B82F6".to_string(),
            ..Default::default()
        };
        let theme = resolve_theme(&config);

        assert_eq!(theme.colors.primary, "#3B82F6");
        assert_eq!(theme.colors.primary_glow, "#3B82F640");
        assert_eq!(theme.chart_colors.len(), CHART_SERIES_COUNT);

        // Light variant raises lightness (clamped to 85), dark lowers it
        let light = hex_to_hsl(&theme.colors.primary_light);
        let dark = hex_to_hsl(&theme.colors.primary_dark);
        let base = hex_to_hsl("#3B82F6");
        assert!(light.l > base.l);
        assert!(light.l <= 85);
        assert!(dark.l < base.l);
        assert!(dark.l >= 15);
    }

    #[test]
    fn test_resolve_theme_mode_tables() {
        let dark = resolve_theme(&BrandConfig::default());
        let light = resolve_theme(&BrandConfig {
            theme_mode: ThemeMode::Light,
            ..Default::default()
        });

        assert_ne!(dark.chart.axis_stroke, light.chart.axis_stroke);
        assert_ne!(dark.status.success, light.status.success);
    }

    #[test]
    fn test_theme_mode_parse_defaults_to_dark() {
        assert_eq!(ThemeMode::parse("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::parse("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::parse("midnight"), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Light).unwrap(), "\"light\"");
        let mode: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, ThemeMode::Dark);
    }
}
