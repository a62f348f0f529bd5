//! RGBA color

/// RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Bit-exact key for hashing
    pub fn key(&self) -> ColorKey {
        ColorKey([
            self.r.to_bits(),
            self.g.to_bits(),
            self.b.to_bits(),
            self.a.to_bits(),
        ])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Hashable identity of a [`Color`]
///
/// Two colors map to the same key only when every component has the same bit
/// pattern, so `-0.0` and `0.0` are distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey([u32; 4]);
