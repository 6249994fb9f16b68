//! Backend-agnostic draw commands

use glam::Vec2;

use crate::sim::Rgb;

/// RGBA color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn from_rgb(c: Rgb, a: f32) -> Self {
        Color::rgb(c.r, c.g, c.b).with_alpha(a)
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Push transform state
    Save,
    /// Pop transform state
    Restore,
    Translate(Vec2),
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    FillTriangle {
        points: [Vec2; 3],
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        color: Color,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_output() {
        assert_eq!(Color::rgb(0x45, 0xb7, 0xd1).to_css(), "#45b7d1");
        assert_eq!(Color::rgb(255, 0, 0).with_alpha(0.5).to_css(), "rgba(255, 0, 0, 0.500)");
        assert_eq!(Color::WHITE.with_alpha(2.0).a, 1.0);
    }
}
