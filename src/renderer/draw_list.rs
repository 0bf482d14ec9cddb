//! Draw commands produced each frame
//!
//! Rects are world-space instances laid out for direct upload to an
//! instance buffer; text is positioned in canvas pixels.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::engine::Color;

/// One axis-aligned rectangle instance
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl RectInstance {
    pub fn new(center: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            center: center.to_array(),
            size: size.to_array(),
            color: color.to_array(),
        }
    }
}

/// Screen-space text
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    /// Centre of the text in canvas pixels
    pub pos: Vec2,
    /// Glyph height in pixels
    pub size: f32,
    pub color: Color,
}

/// Everything a backend needs to draw one frame, in draw order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Alpha-blended world rects
    pub rects: Vec<RectInstance>,
    /// Additively blended world rects, drawn after `rects`
    pub additive: Vec<RectInstance>,
    /// Overlay text, drawn last
    pub texts: Vec<TextCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a world-space rect. Fully transparent rects are dropped.
    pub fn rect(&mut self, center: Vec2, size: Vec2, color: Color) {
        if !color.is_transparent() {
            self.rects.push(RectInstance::new(center, size, color));
        }
    }

    pub fn additive_rect(&mut self, center: Vec2, size: Vec2, color: Color) {
        if !color.is_transparent() {
            self.additive.push(RectInstance::new(center, size, color));
        }
    }

    pub fn text_screen(&mut self, text: impl Into<String>, pos: Vec2, size: f32) {
        self.texts.push(TextCommand {
            text: text.into(),
            pos,
            size,
            color: Color::WHITE,
        });
    }

    /// Raw bytes of the alpha-blended instances
    pub fn rect_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rects)
    }

    /// Raw bytes of the additive instances
    pub fn additive_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.additive)
    }
}

/// Colors for game elements
pub mod colors {
    use crate::engine::Color;

    /// Behind everything, fills the canvas
    pub const BACKGROUND: Color = Color::grey(0.5);
    /// The playfield itself
    pub const LEVEL: Color = Color::grey(0.1);
    pub const PADDLE: Color = Color::WHITE;
    pub const BALL: Color = Color::WHITE;
    pub const WALL: Color = Color::TRANSPARENT;
}
