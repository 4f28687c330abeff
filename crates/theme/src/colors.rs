/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const DARK:   Self = Self::rgb8(0x1e, 0x1e, 0x2e);
    pub const WHITE:  Self = Self::rgb8(0xcd, 0xd6, 0xf4);
    pub const PURPLE: Self = Self::rgb8(0xcb, 0xa6, 0xf7);
    pub const GREEN:  Self = Self::rgb8(0x28, 0xa7, 0x45);
    pub const AMBER:  Self = Self::rgb8(0xff, 0xc1, 0x07);
    pub const RED:    Self = Self::rgb8(0xdc, 0x35, 0x45);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS-style hex color string (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };
        // `#abc` is shorthand for `#aabbcc`.
        let nibble = |c: &str| -> Option<u8> { byte(c).map(|v| v * 0x11) };

        match hex.len() {
            3 => Some(Self::rgb8(nibble(&hex[0..1])?, nibble(&hex[1..2])?, nibble(&hex[2..3])?)),
            6 => Some(Self::rgb8(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Some(
                Self::rgb8(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)
                    .with_alpha(byte(&hex[6..8])? as f32 / 255.0),
            ),
            _ => None,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}
