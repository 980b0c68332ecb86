/// Straight-alpha RGBA color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    /// Menu backdrop drawn over the screen below an overlay.
    pub const DIM: Color = Color::from_rgba8(0, 0, 0, 192);
    /// Classic desktop window face.
    pub const WINDOW_FACE: Color = Color::from_rgba8(236, 233, 216, 255);
    pub const TITLE_BLUE: Color = Color::from_rgba8(0, 84, 227, 255);
    pub const DESKTOP_BLUE: Color = Color::from_rgba8(58, 110, 165, 255);
    pub const TASKBAR_BLUE: Color = Color::from_rgba8(36, 94, 220, 255);
    pub const START_GREEN: Color = Color::from_rgba8(58, 148, 58, 255);
    pub const CLOSE_RED: Color = Color::from_rgba8(224, 67, 22, 255);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Component-wise product, used to tint white glyphs and sprites.
    pub fn modulate(self, other: Color) -> Color {
        Color::rgba(self.r * other.r, self.g * other.g, self.b * other.b, self.a * other.a)
    }

    /// Fully saturated color from HSL components, each in `[0, 1]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Color {
        if s == 0.0 {
            return Color::rgb(l, l, l);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let hue = |mut t: f32| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };
        Color::rgb(hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0))
    }
}
