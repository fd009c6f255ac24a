//=========================================================================
// Graphics
//=========================================================================
//
// Contracts between the engine and the host's 2D sprite batch, plus the
// procedural shape renderer built on top of them.
//
// Architecture:
//   GraphicsDevice ──create_texture(Bitmap)──> Texture
//   ShapeTextures  (1×1 pixel + circle, created once)
//   Surface        (SpriteBatch + ShapeTextures, borrowed per frame)
//     └─ shapes::*  line / rect / circle / capsule
//          └─ geometry::*  pure transform math
//
//=========================================================================

//=== Module Declarations =================================================

pub mod bitmap;
pub mod canvas;
pub mod geometry;
pub mod shapes;

//=== Public API ==========================================================

pub use bitmap::Bitmap;
pub use canvas::Canvas;
pub use shapes::{ShapeTextures, Surface};

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Color ===============================================================

/// Straight-alpha RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CORNFLOWER_BLUE: Color = Color::rgb(100, 149, 237);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise product, as a sprite tint applies to a texel.
    pub fn modulate(self, tint: Color) -> Color {
        fn mul(a: u8, b: u8) -> u8 {
            ((a as u16 * b as u16 + 127) / 255) as u8
        }

        Color {
            r: mul(self.r, tint.r),
            g: mul(self.g, tint.g),
            b: mul(self.b, tint.b),
            a: mul(self.a, tint.a),
        }
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in pixels, `(x, y)` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle containing both points.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left(), self.bottom()),
        ]
    }
}

//=== Texture =============================================================

/// Opaque handle issued by a [`GraphicsDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A device texture and its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Center in texture-local pixels.
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }
}

//=== Sprite ==============================================================

/// Mirroring applied to a sprite's source region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    pub fn horizontal(self) -> bool {
        matches!(self, Flip::Horizontal | Flip::Both)
    }

    pub fn vertical(self) -> bool {
        matches!(self, Flip::Vertical | Flip::Both)
    }
}

/// One textured quad submitted to a [`SpriteBatch`].
///
/// The quad covers the source region (the whole texture when `source` is
/// `None`). It is translated so that `origin` (texture-local pixels) sits on
/// `position`, scaled by `scale`, then rotated by `rotation` radians about
/// `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    pub source: Option<Rect>,
    pub tint: Color,
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: Vec2,
    pub flip: Flip,
    pub depth: f32,
}

impl Sprite {
    /// Untransformed, untinted sprite at `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            source: None,
            tint: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            flip: Flip::None,
            depth: 0.0,
        }
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }
}

//=== Host Contracts ======================================================

/// Batched 2D drawing context supplied by the host.
pub trait SpriteBatch {
    /// Queues (or immediately draws) one textured quad.
    fn draw(&mut self, texture: &Texture, sprite: &Sprite);
}

/// Texture factory supplied by the host's graphics backend.
pub trait GraphicsDevice {
    /// Uploads a bitmap and returns its texture.
    fn create_texture(&mut self, bitmap: &Bitmap) -> Texture;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_by_white_is_identity() {
        let color = Color::rgba(10, 20, 30, 40);
        assert_eq!(color.modulate(Color::WHITE), color);
    }

    #[test]
    fn modulate_white_by_tint_is_tint() {
        let tint = Color::rgba(100, 149, 237, 128);
        assert_eq!(Color::WHITE.modulate(tint), tint);
    }

    #[test]
    fn rect_from_corners_orders_min_max() {
        let rect = Rect::from_corners(Vec2::new(100.0, -11.0), Vec2::new(0.0, 11.0));
        assert_eq!(rect, Rect::new(0.0, -11.0, 100.0, 22.0));
        assert_eq!(rect.right(), 100.0);
        assert_eq!(rect.bottom(), 11.0);
    }

    #[test]
    fn rect_corners_are_clockwise_from_top_left() {
        let corners = Rect::new(1.0, 2.0, 3.0, 4.0).corners();
        assert_eq!(corners[0], Vec2::new(1.0, 2.0));
        assert_eq!(corners[1], Vec2::new(4.0, 2.0));
        assert_eq!(corners[2], Vec2::new(4.0, 6.0));
        assert_eq!(corners[3], Vec2::new(1.0, 6.0));
    }

    #[test]
    fn flip_flags() {
        assert!(!Flip::None.horizontal() && !Flip::None.vertical());
        assert!(Flip::Horizontal.horizontal() && !Flip::Horizontal.vertical());
        assert!(Flip::Both.horizontal() && Flip::Both.vertical());
    }

    #[test]
    fn sprite_builder_defaults() {
        let sprite = Sprite::at(Vec2::new(5.0, 6.0));
        assert_eq!(sprite.scale, Vec2::ONE);
        assert_eq!(sprite.tint, Color::WHITE);
        assert_eq!(sprite.source, None);
        assert_eq!(sprite.flip, Flip::None);
    }
}
