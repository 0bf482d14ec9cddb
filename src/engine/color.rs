//! RGBA colour values

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Linear RGBA colour, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Uniform grey
    pub const fn grey(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    /// Opaque colour with each channel drawn independently from [0, 1]
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }

    /// Scale the colour channels by `s` and alpha by `a`
    pub fn scale(self, s: f32, a: f32) -> Self {
        Self::rgba(self.r * s, self.g * s, self.b * s, self.a * a)
    }

    /// Same colour with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_scale_fades_alpha_only() {
        let c = Color::rgb(0.2, 0.4, 0.6).scale(1.0, 0.0);
        assert_eq!(c, Color::rgba(0.2, 0.4, 0.6, 0.0));
        assert!(c.is_transparent());
    }

    #[test]
    fn test_random_is_opaque_and_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let c = Color::random(&mut rng);
            assert_eq!(c.a, 1.0);
            for ch in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE.with_alpha(0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgba(0.5, 0.5, 0.5, 0.5));
    }
}
