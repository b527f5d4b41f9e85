//! Colors and their markup representation.

/// A straight-alpha RGBA color with components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const CLEAR: Color = Color {
        r: 0.,
        g: 0.,
        b: 0.,
        a: 0.,
    };

    /// Opaque black.
    pub const BLACK: Color = Color {
        r: 0.,
        g: 0.,
        b: 0.,
        a: 1.,
    };

    /// Opaque white.
    pub const WHITE: Color = Color {
        r: 1.,
        g: 1.,
        b: 1.,
        a: 1.,
    };

    /// Creates an opaque color.
    pub fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b, a: 1. }
    }

    /// Returns true if this color would leave any mark when painted.
    pub fn is_visible(&self) -> bool {
        self.a > 0.
    }

    /// Formats the color as a markup color, i.e. `#RRGGBB`. Alpha is dropped.
    pub fn to_markup_string(&self) -> String {
        fn channel(c: f32) -> u8 {
            (c.max(0.).min(1.) * 255.).round() as u8
        }
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Like [`Color::to_markup_string`], but invisible colors become `none`.
    pub fn to_paint_string(&self) -> String {
        if self.is_visible() {
            self.to_markup_string()
        } else {
            "none".into()
        }
    }
}

impl From<(f32, f32, f32, f32)> for Color {
    fn from(i: (f32, f32, f32, f32)) -> Color {
        Color {
            r: i.0,
            g: i.1,
            b: i.2,
            a: i.3,
        }
    }
}

#[test]
fn markup_strings() {
    assert_eq!(Color::BLACK.to_markup_string(), "#000000");
    assert_eq!(Color::WHITE.to_markup_string(), "#FFFFFF");
    assert_eq!(Color::rgb(1., 0.5, 0.).to_markup_string(), "#FF8000");

    // out of range channels are clamped
    assert_eq!(Color::rgb(2., -1., 0.).to_markup_string(), "#FF0000");
}

#[test]
fn paint_strings() {
    assert_eq!(Color::CLEAR.to_paint_string(), "none");
    assert_eq!(Color::from((1., 0., 0., 0.5)).to_paint_string(), "#FF0000");
}
