// Brand Palette Generator
// Derives cohesive chart palettes and color variations from a single brand color

use serde::{Deserialize, Serialize};

// ============================================================================
// HSL VALUE TYPE
// ============================================================================

/// A color in HSL space: h in [0,360), s and l in [0,100].
/// Components are integer-rounded, matching the at-rest precision of
/// brand colors throughout the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: i32,
    pub s: i32,
    pub l: i32,
}

/// Fallback used when a hex string cannot be parsed.
/// A mid-blue close to the default brand color, so a bad color in a stored
/// record degrades to a sensible palette instead of failing the render path.
const FALLBACK_HSL: Hsl = Hsl { h: 220, s: 90, l: 56 };

/// Parse "#rrggbb" or "rrggbb" (case-insensitive) into raw channels.
fn parse_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let clean = hex.strip_prefix('#').unwrap_or(hex);
    if clean.len() != 6 || !clean.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&clean[0..2], 16).ok()?;
    let g = u8::from_str_radix(&clean[2..4], 16).ok()?;
    let b = u8::from_str_radix(&clean[4..6], 16).ok()?;
    Some((r, g, b))
}

// ============================================================================
// HEX <-> HSL CONVERSION
// ============================================================================

/// Convert a hex color to HSL.
///
/// Malformed input never fails: it resolves to a fixed fallback color.
/// Sliders and form fields feed this on every change, so a transient bad
/// value must not take down rendering.
pub fn hex_to_hsl(hex: &str) -> Hsl {
    let Some((r8, g8, b8)) = parse_rgb(hex) else {
        return FALLBACK_HSL;
    };

    let r = r8 as f64 / 255.0;
    let g = g8 as f64 / 255.0;
    let b = b8 as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let mut h = 0.0;
    let mut s = 0.0;

    if max != min {
        let d = max - min;
        s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

        // Which channel dominates determines the sixth of the hue circle
        h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
    }

    Hsl {
        // Near-red hues round up to 360; wrap to keep h in [0,360)
        h: ((h * 360.0).round() as i32).rem_euclid(360),
        s: (s * 100.0).round() as i32,
        l: (l * 100.0).round() as i32,
    }
}

/// Convert HSL values to a "#rrggbb" hex string. Hue is taken mod 360, so
/// h=360 means red, not the no-sector fallback.
pub fn hsl_to_hex(h: i32, s: i32, l: i32) -> String {
    let h = (h as f64).rem_euclid(360.0);
    let s = s as f64 / 100.0;
    let l = l as f64 / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    // Six 60-degree hue sectors
    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else if (300.0..360.0).contains(&h) {
        (c, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    let to_channel = |v: f64| ((v + m) * 255.0).round() as u8;

    format!("#{:02x}{:02x}{:02x}", to_channel(r), to_channel(g), to_channel(b))
}

// ============================================================================
// PALETTE GENERATION
// ============================================================================

/// Hue offsets producing an analogous-to-triadic spread that stays cohesive.
const HUE_OFFSETS: [i32; 10] = [0, 30, -25, 55, -50, 80, -75, 105, -100, 130];

/// Saturation and lightness variations for visual separation between series.
const SAT_VARIATIONS: [i32; 5] = [0, 5, -5, 10, -10];
const LIGHT_VARIATIONS: [i32; 5] = [0, 8, -5, 12, -8];

/// Generate a cohesive chart palette from a primary brand color.
///
/// Deterministic: the same seed and count always produce the same palette.
/// Index 0 uses zero offsets, so the first entry keeps the seed's hue
/// (saturation and lightness are clamped into chart-friendly ranges).
pub fn generate_brand_palette(primary_hex: &str, count: usize) -> Vec<String> {
    let Hsl { h, s, l } = hex_to_hsl(primary_hex);

    let mut palette = Vec::with_capacity(count);

    for i in 0..count {
        let hue_offset = HUE_OFFSETS[i % HUE_OFFSETS.len()];
        let new_hue = (h + hue_offset).rem_euclid(360);

        let sat_var = SAT_VARIATIONS[i % SAT_VARIATIONS.len()];
        let new_sat = (s + sat_var).clamp(45, 85);

        let light_var = LIGHT_VARIATIONS[i % LIGHT_VARIATIONS.len()];
        let new_light = (l + light_var).clamp(40, 60);

        palette.push(hsl_to_hex(new_hue, new_sat, new_light));
    }

    palette
}

/// Generate a monochromatic palette (same hue, lightness spread evenly).
/// Useful for charts wanting a more subtle, unified look.
pub fn generate_monochromatic_palette(primary_hex: &str, count: usize) -> Vec<String> {
    let Hsl { h, s, .. } = hex_to_hsl(primary_hex);

    let min_light = 35.0;
    let max_light = 65.0;
    let step = if count > 1 {
        (max_light - min_light) / (count - 1) as f64
    } else {
        0.0
    };

    (0..count)
        .map(|i| {
            let new_light = (min_light + step * i as f64).round() as i32;
            let new_sat = (s + if i % 2 == 0 { 5 } else { -5 }).clamp(50, 90);
            hsl_to_hex(h, new_sat, new_light)
        })
        .collect()
}

// ============================================================================
// DERIVED UTILITIES
// ============================================================================

/// Contrasting text color for a given background.
pub fn get_contrast_color(hex: &str) -> &'static str {
    if hex_to_hsl(hex).l > 50 {
        "#1a1a1a"
    } else {
        "#ffffff"
    }
}

/// Lighten a color by a lightness percentage.
pub fn lighten(hex: &str, percent: i32) -> String {
    let Hsl { h, s, l } = hex_to_hsl(hex);
    hsl_to_hex(h, s, (l + percent).min(100))
}

/// Darken a color by a lightness percentage.
pub fn darken(hex: &str, percent: i32) -> String {
    let Hsl { h, s, l } = hex_to_hsl(hex);
    hsl_to_hex(h, s, (l - percent).max(0))
}

/// Reformat a hex color as an rgba() string at the given opacity.
/// Hue and lightness are untouched; malformed input takes the same
/// fallback as `hex_to_hsl`.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
    let (r, g, b) = match parse_rgb(hex) {
        Some(rgb) => rgb,
        None => {
            let f = hsl_to_hex(FALLBACK_HSL.h, FALLBACK_HSL.s, FALLBACK_HSL.l);
            parse_rgb(&f).unwrap_or((59, 130, 246))
        }
    };
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

// ============================================================================
// THEME-AWARE STYLING TABLES
// ============================================================================

/// Chart chrome colors (axes, grid, tooltips) appropriate for a theme mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartThemeColors {
    pub axis_stroke: String,
    pub grid_stroke: String,
    pub tooltip_background: String,
    pub tooltip_border: String,
    pub tooltip_text: String,
    pub reference_line_stroke: String,
}

pub fn get_chart_theme_colors(light_mode: bool) -> ChartThemeColors {
    if light_mode {
        ChartThemeColors {
            axis_stroke: "rgba(0, 0, 0, 0.5)".to_string(),
            grid_stroke: "rgba(0, 0, 0, 0.1)".to_string(),
            tooltip_background: "rgba(255, 255, 255, 0.95)".to_string(),
            tooltip_border: "1px solid rgba(0, 0, 0, 0.1)".to_string(),
            tooltip_text: "#1a1a1a".to_string(),
            reference_line_stroke: "rgba(0, 0, 0, 0.2)".to_string(),
        }
    } else {
        ChartThemeColors {
            axis_stroke: "rgba(255, 255, 255, 0.5)".to_string(),
            grid_stroke: "rgba(255, 255, 255, 0.1)".to_string(),
            tooltip_background: "rgba(0, 0, 0, 0.8)".to_string(),
            tooltip_border: "1px solid rgba(255, 255, 255, 0.1)".to_string(),
            tooltip_text: "#ffffff".to_string(),
            reference_line_stroke: "rgba(255, 255, 255, 0.2)".to_string(),
        }
    }
}

/// Semantic/status colors tuned for readability per theme mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusColors {
    pub success: String,
    pub success_bg: String,
    pub danger: String,
    pub danger_bg: String,
    pub warning: String,
    pub warning_bg: String,
    pub info: String,
    pub info_bg: String,
}

pub fn get_status_colors(light_mode: bool) -> StatusColors {
    if light_mode {
        StatusColors {
            success: "#15803d".to_string(),
            success_bg: "rgba(21, 128, 61, 0.1)".to_string(),
            danger: "#b91c1c".to_string(),
            danger_bg: "rgba(185, 28, 28, 0.1)".to_string(),
            warning: "#b45309".to_string(),
            warning_bg: "rgba(180, 83, 9, 0.1)".to_string(),
            info: "#1d4ed8".to_string(),
            info_bg: "rgba(29, 78, 216, 0.1)".to_string(),
        }
    } else {
        StatusColors {
            success: "#4ade80".to_string(),
            success_bg: "rgba(74, 222, 128, 0.2)".to_string(),
            danger: "#f87171".to_string(),
            danger_bg: "rgba(248, 113, 113, 0.2)".to_string(),
            warning: "#fbbf24".to_string(),
            warning_bg: "rgba(251, 191, 36, 0.2)".to_string(),
            info: "#60a5fa".to_string(),
            info_bg: "rgba(96, 165, 250, 0.2)".to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_hsl_known_colors() {
        assert_eq!(hex_to_hsl("#ff0000"), Hsl { h: 0, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("#00ff00"), Hsl { h: 120, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("#0000ff"), Hsl { h: 240, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("#ffffff"), Hsl { h: 0, s: 0, l: 100 });
        assert_eq!(hex_to_hsl("#000000"), Hsl { h: 0, s: 0, l: 0 });
    }

    #[test]
    fn test_hex_to_hsl_brand_blue() {
        // #3B82F6 is the default brand color used across the app
        let hsl = hex_to_hsl("#3B82F6");
        assert_eq!(hsl.h, 217);
        assert_eq!(hsl.s, 91);
        assert_eq!(hsl.l, 60);
    }

    #[test]
    fn test_hex_to_hsl_accepts_bare_and_uppercase() {
        assert_eq!(hex_to_hsl("3b82f6"), hex_to_hsl("#3B82F6"));
    }

    #[test]
    fn test_hex_to_hsl_fallback_on_malformed() {
        let fallback = Hsl { h: 220, s: 90, l: 56 };
        assert_eq!(hex_to_hsl(""), fallback);
        assert_eq!(hex_to_hsl("#fff"), fallback);
        assert_eq!(hex_to_hsl("#gggggg"), fallback);
        assert_eq!(hex_to_hsl("not a color"), fallback);
    }

    #[test]
    fn test_hsl_to_hex_primaries() {
        assert_eq!(hsl_to_hex(0, 100, 50), "#ff0000");
        assert_eq!(hsl_to_hex(120, 100, 50), "#00ff00");
        assert_eq!(hsl_to_hex(240, 100, 50), "#0000ff");
    }

    #[test]
    fn test_hue_stays_below_360_for_near_red() {
        // #ff0001 has a raw hue of 359.76, which rounds to 360 before wrapping
        let hsl = hex_to_hsl("#ff0001");
        assert!(
            (0..360).contains(&hsl.h),
            "hue {} outside [0,360)",
            hsl.h
        );
        assert_eq!(hsl.h, 0);
        assert_eq!(hsl.s, 100);
    }

    #[test]
    fn test_hsl_to_hex_wraps_full_circle_hue() {
        // h=360 is the same angle as h=0; it must not fall outside every sector
        assert_eq!(hsl_to_hex(360, 100, 50), "#ff0000");
        assert_eq!(hsl_to_hex(360, 100, 50), hsl_to_hex(0, 100, 50));
    }

    #[test]
    fn test_round_trip_close_per_channel() {
        // h/s/l are integer-rounded, so the round trip is only close,
        // not exact: allow a few units per channel.
        for hex in [
            "#3b82f6", "#543d97", "#2e9ed0", "#10b981", "#f59e0b", "#ef4444",
            // Hue-boundary reds on both sides of 0°/360°
            "#ff0001", "#ff0100",
            // Achromatic and gamut corners
            "#808080", "#ffffff", "#000000", "#ff0000", "#00ffff",
        ] {
            let Hsl { h, s, l } = hex_to_hsl(hex);
            let back = hsl_to_hex(h, s, l);

            let (r1, g1, b1) = parse_rgb(hex).unwrap();
            let (r2, g2, b2) = parse_rgb(&back).unwrap();

            assert!((r1 as i32 - r2 as i32).abs() <= 3, "{} -> {} red drift", hex, back);
            assert!((g1 as i32 - g2 as i32).abs() <= 3, "{} -> {} green drift", hex, back);
            assert!((b1 as i32 - b2 as i32).abs() <= 3, "{} -> {} blue drift", hex, back);
        }
    }

    #[test]
    fn test_palette_length_matches_count() {
        for n in 1..=10 {
            assert_eq!(generate_brand_palette("#3B82F6", n).len(), n);
        }
    }

    #[test]
    fn test_palette_deterministic() {
        let a = generate_brand_palette("#543D97", 5);
        let b = generate_brand_palette("#543D97", 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_palette_first_entry_keeps_seed_hue() {
        let palette = generate_brand_palette("#3B82F6", 5);
        let seed = hex_to_hsl("#3B82F6");
        let first = hex_to_hsl(&palette[0]);

        // Offsets at index 0 are all zero; only the clamps apply
        assert!((first.h - seed.h).abs() <= 1, "hue {} vs seed {}", first.h, seed.h);
        assert!(first.s <= 85);
        assert!(first.l <= 60);
    }

    #[test]
    fn test_palette_entries_are_valid_hex() {
        for color in generate_brand_palette("#2E9ED0", 10) {
            assert!(parse_rgb(&color).is_some(), "invalid palette entry {}", color);
        }
    }

    #[test]
    fn test_monochromatic_palette_length_and_hue() {
        let palette = generate_monochromatic_palette("#10B981", 5);
        assert_eq!(palette.len(), 5);

        let seed_h = hex_to_hsl("#10B981").h;
        for color in &palette {
            let h = hex_to_hsl(color).h;
            assert!((h - seed_h).abs() <= 2, "hue drifted: {} vs {}", h, seed_h);
        }

        // Single-entry palette must not divide by zero
        assert_eq!(generate_monochromatic_palette("#10B981", 1).len(), 1);
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(get_contrast_color("#ffffff"), "#1a1a1a");
        assert_eq!(get_contrast_color("#000000"), "#ffffff");
        assert_eq!(get_contrast_color("#3B82F6"), "#1a1a1a"); // l = 60
    }

    #[test]
    fn test_lighten_darken_clamp() {
        assert_eq!(hex_to_hsl(&lighten("#3B82F6", 100)).l, 100);
        assert_eq!(hex_to_hsl(&darken("#3B82F6", 100)).l, 0);

        let lighter = hex_to_hsl(&lighten("#3B82F6", 10));
        assert_eq!(lighter.l, 70);
    }

    #[test]
    fn test_with_alpha_format() {
        assert_eq!(with_alpha("#3B82F6", 0.25), "rgba(59, 130, 246, 0.25)");
        assert_eq!(with_alpha("#000000", 1.0), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_theme_tables_differ_by_mode() {
        let dark = get_chart_theme_colors(false);
        let light = get_chart_theme_colors(true);
        assert_ne!(dark.axis_stroke, light.axis_stroke);

        let status_dark = get_status_colors(false);
        let status_light = get_status_colors(true);
        assert_ne!(status_dark.success, status_light.success);
    }
}
