use std::fmt;

/// An opaque RGB color as understood by the print target.
///
/// This type does no parsing; color strings go through the normalizer in
/// `quire-style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Lower-case `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel values scaled to `0.0..=1.0`, the form PDF color operators take.
    pub fn to_unit_rgb(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Mixes this color towards white. `amount` of 0 keeps the color, 1 yields white.
    pub fn lighten(&self, amount: f32) -> Color {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round() as u8;
        Color { r: mix(self.r), g: mix(self.g), b: mix(self.b) }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_lower_case_hex() {
        assert_eq!(Color::rgb(255, 0, 171).to_hex(), "#ff00ab");
        assert_eq!(Color::rgb(255, 0, 171).to_string(), "#ff00ab");
    }

    #[test]
    fn lighten_moves_towards_white() {
        assert_eq!(Color::BLACK.lighten(1.0), Color::WHITE);
        assert_eq!(Color::BLACK.lighten(0.0), Color::BLACK);
        assert_eq!(Color::rgb(0, 0, 0).lighten(0.5), Color::gray(128));
    }
}
