//=========================================================================
// Shape Renderer
//=========================================================================
//
// Draws lines, rectangles, circles and capsules with two textures only:
// a 1×1 white pixel and a pre-rasterized circle. Every shape is a set of
// scaled/rotated sprites; see `geometry` for the math.
//
// Every function takes the `Surface` as its first argument:
//
//   shapes::line(&mut surface, start, end, Color::RED, 2.0);
//   shapes::filled_circle(&mut surface, center, 12.0, Color::WHITE);
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::geometry::{self, DEFAULT_THICKNESS};
use super::{Bitmap, Color, GraphicsDevice, Rect, Sprite, SpriteBatch, Texture};

//=== ShapeTextures =======================================================

/// Radius in pixels of the cached circle texture.
///
/// Circles of other sizes scale this bitmap; large scale factors show its
/// quantization.
pub const CIRCLE_TEXTURE_RADIUS: u32 = 50;

/// The two textures every shape is drawn with.
///
/// Created once when the graphics device becomes available and shared
/// read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTextures {
    pixel: Texture,
    circle: Texture,
}

impl ShapeTextures {
    /// Uploads the pixel and a circle of [`CIRCLE_TEXTURE_RADIUS`].
    pub fn create(device: &mut dyn GraphicsDevice) -> Self {
        Self::with_circle_radius(device, CIRCLE_TEXTURE_RADIUS)
    }

    /// Uploads the pixel and a circle of the given reference radius.
    ///
    /// # Panics
    ///
    /// Panics if `radius == 0`.
    pub fn with_circle_radius(device: &mut dyn GraphicsDevice, radius: u32) -> Self {
        assert!(radius > 0, "Circle texture radius must be positive");

        let pixel = device.create_texture(&Bitmap::pixel());
        let circle = device.create_texture(&Bitmap::circle(radius));
        debug!(
            target: "graphics",
            "Shape textures created (pixel: {:?}, circle: {:?} r={})",
            pixel.id,
            circle.id,
            radius
        );

        Self { pixel, circle }
    }

    /// Wraps textures that were created elsewhere.
    pub fn from_textures(pixel: Texture, circle: Texture) -> Self {
        Self { pixel, circle }
    }

    pub fn pixel(&self) -> &Texture {
        &self.pixel
    }

    pub fn circle(&self) -> &Texture {
        &self.circle
    }

    /// Radius of the circle texture.
    pub fn circle_radius(&self) -> f32 {
        self.circle.width as f32 / 2.0
    }
}

//=== Surface =============================================================

/// Per-frame drawing target handed to scenes.
///
/// Borrows the host's sprite batch and the shared shape textures.
pub struct Surface<'a> {
    batch: &'a mut dyn SpriteBatch,
    textures: &'a ShapeTextures,
}

impl<'a> Surface<'a> {
    pub fn new(batch: &'a mut dyn SpriteBatch, textures: &'a ShapeTextures) -> Self {
        Self { batch, textures }
    }

    /// Submits a raw sprite.
    pub fn draw(&mut self, texture: &Texture, sprite: &Sprite) {
        self.batch.draw(texture, sprite);
    }

    pub fn textures(&self) -> &ShapeTextures {
        self.textures
    }

    fn draw_pixel(&mut self, sprite: &Sprite) {
        let pixel = *self.textures.pixel();
        self.batch.draw(&pixel, sprite);
    }

    fn draw_circle(&mut self, sprite: &Sprite) {
        let circle = *self.textures.circle();
        self.batch.draw(&circle, sprite);
    }
}

//=== Lines & Rectangles ==================================================

/// Straight line of the given thickness, centered on `start → end`.
pub fn line(surface: &mut Surface<'_>, start: Vec2, end: Vec2, color: Color, thickness: f32) {
    surface.draw_pixel(&geometry::line_sprite(start, end, color, thickness));
}

/// Solid axis-aligned rectangle.
pub fn filled_rect(surface: &mut Surface<'_>, rect: Rect, color: Color) {
    surface.draw_pixel(&geometry::rect_sprite(rect, color));
}

/// Rectangle outline: top, right, bottom, then left edge.
pub fn stroked_rect(surface: &mut Surface<'_>, rect: Rect, color: Color, thickness: f32) {
    for (start, end) in geometry::rect_edges(rect) {
        line(surface, start, end, color, thickness);
    }
}

//=== Circles =============================================================

/// Solid circle, scaled from the cached circle texture.
pub fn filled_circle(surface: &mut Surface<'_>, center: Vec2, radius: f32, color: Color) {
    let sprite = geometry::circle_sprite(surface.textures().circle(), center, radius, color);
    surface.draw_circle(&sprite);
}

/// Circle outline approximated by [`geometry::CIRCLE_SEGMENTS`] lines.
pub fn stroked_circle(surface: &mut Surface<'_>, center: Vec2, radius: f32, color: Color) {
    polyline(surface, &geometry::circle_outline(center, radius), color, DEFAULT_THICKNESS);
}

/// Connected lines through `points`.
pub fn polyline(surface: &mut Surface<'_>, points: &[Vec2], color: Color, thickness: f32) {
    for pair in points.windows(2) {
        line(surface, pair[0], pair[1], color, thickness);
    }
}

//=== Capsules ============================================================

/// Capsule drawn as two side lines plus a filled circle on each endpoint.
///
/// The sides sit at `±(radius - thickness/2)` so their outer edge meets the
/// circles. A zero-length segment draws a single filled circle.
pub fn capsule_with_end_circles(
    surface: &mut Surface<'_>,
    start: Vec2,
    end: Vec2,
    radius: f32,
    color: Color,
    thickness: f32,
) {
    let Some(normal) = geometry::segment_normal(start, end) else {
        filled_circle(surface, start, radius, color);
        return;
    };

    for (from, to) in geometry::capsule_sides(start, end, normal, radius - thickness / 2.0) {
        line(surface, from, to, color, thickness);
    }
    filled_circle(surface, start, radius, color);
    filled_circle(surface, end, radius, color);
}

/// Solid capsule: the bounding rectangle of the body plus two end circles.
///
/// The body rectangle is axis-aligned, so the shape is exact only for
/// horizontal or vertical segments. A zero-length segment draws a single
/// filled circle.
pub fn full_capsule(
    surface: &mut Surface<'_>,
    start: Vec2,
    end: Vec2,
    radius: f32,
    color: Color,
    thickness: f32,
) {
    let Some(normal) = geometry::segment_normal(start, end) else {
        filled_circle(surface, start, radius, color);
        return;
    };

    filled_rect(surface, geometry::capsule_bounds(start, end, normal, radius, thickness), color);
    filled_circle(surface, start, radius, color);
    filled_circle(surface, end, radius, color);
}

/// Capsule outline: two side lines joined by half-circle caps.
///
/// A zero-length segment draws a circle outline.
pub fn stroked_capsule(
    surface: &mut Surface<'_>,
    start: Vec2,
    end: Vec2,
    radius: f32,
    color: Color,
    thickness: f32,
) {
    let offset = radius - thickness / 2.0;

    let Some(normal) = geometry::segment_normal(start, end) else {
        polyline(surface, &geometry::circle_outline(start, offset), color, thickness);
        return;
    };

    for (from, to) in geometry::capsule_sides(start, end, normal, offset) {
        line(surface, from, to, color, thickness);
    }
    for cap in geometry::capsule_caps(start, end, normal, offset) {
        polyline(surface, &cap, color, thickness);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
