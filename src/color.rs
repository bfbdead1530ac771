// Simple color struct, created from an unsigned 32 representing RRGGBBAA

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    // Alpha channel as a 0.0..=1.0 fraction
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    // CSS string with the color's own alpha scaled by `opacity`,
    // suitable for canvas fill/stroke styles
    pub fn to_css(&self, opacity: f64) -> String {
        let alpha = (self.alpha() * opacity).max(0.0).min(1.0);
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x00f0_ffcc);
        assert_eq!(c, Color::rgba(0, 240, 255, 204));
    }

    #[test]
    fn css_scales_alpha_by_opacity() {
        let c = Color::rgba(180, 0, 255, 255);
        assert_eq!(c.to_css(1.0), "rgba(180,0,255,1.000)");
        assert_eq!(c.to_css(0.5), "rgba(180,0,255,0.500)");
        assert_eq!(c.to_css(2.0), "rgba(180,0,255,1.000)");
    }
}
