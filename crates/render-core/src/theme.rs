use quire_chart::DEFAULT_PALETTE;
use quire_style::{Theme, resolve_color};
use quire_types::Color;

/// Per back-end values for theme fields the document leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDefaults {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub background: Color,
    pub font_family: String,
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x25, 0x63, 0xeb),
            secondary: Color::rgb(0x64, 0x74, 0x8b),
            accent: Color::rgb(0xf5, 0x9e, 0x0b),
            text: Color::rgb(0x1f, 0x29, 0x37),
            muted: Color::rgb(0x6b, 0x72, 0x80),
            background: Color::WHITE,
            font_family: "Helvetica".to_string(),
        }
    }
}

impl ThemeDefaults {
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }
}

/// A theme with every field filled in. Built once per render pass and
/// shared by reference through [`crate::RenderContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub background: Color,
    pub font_family: String,
    /// Series colors for charts without their own palette.
    pub chart_palette: Vec<Color>,
}

impl ResolvedTheme {
    pub fn resolve(theme: &Theme, defaults: &ThemeDefaults) -> Self {
        let pick = |value: &Option<String>, fallback: Color| resolve_color(value.as_deref(), fallback);
        let primary = pick(&theme.primary_color, defaults.primary);
        let secondary = pick(&theme.secondary_color, defaults.secondary);
        let accent = pick(&theme.accent_color, defaults.accent);

        let mut chart_palette = vec![primary, secondary, accent];
        chart_palette.extend(
            DEFAULT_PALETTE
                .iter()
                .copied()
                .filter(|c| ![primary, secondary, accent].contains(c)),
        );

        Self {
            primary,
            secondary,
            accent,
            text: pick(&theme.text_color, defaults.text),
            muted: pick(&theme.muted_color, defaults.muted),
            background: pick(&theme.background_color, defaults.background),
            font_family: theme
                .font_family
                .clone()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| defaults.font_family.clone()),
            chart_palette,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_take_defaults() {
        let theme = Theme {
            primary_color: Some("red".into()),
            font_family: Some("Georgia".into()),
            ..Default::default()
        };
        let resolved = ResolvedTheme::resolve(&theme, &ThemeDefaults::default());
        assert_eq!(resolved.primary, Color::rgb(255, 0, 0));
        assert_eq!(resolved.text, ThemeDefaults::default().text);
        assert_eq!(resolved.font_family, "Georgia");
        assert_eq!(resolved.chart_palette[0], resolved.primary);
    }

    #[test]
    fn palette_has_no_duplicates_of_theme_colors() {
        let resolved = ResolvedTheme::resolve(&Theme::default(), &ThemeDefaults::default());
        let primary_count = resolved
            .chart_palette
            .iter()
            .filter(|c| **c == resolved.primary)
            .count();
        assert_eq!(primary_count, 1);
    }
}
