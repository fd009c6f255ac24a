//=========================================================================
// Headless Canvas
//=========================================================================
//
// Software sprite batch rendering into an RGBA buffer.
//
// Each sprite is rasterized by mapping destination pixel centers back
// into texture space (inverse of translate → rotate → scale → origin)
// and sampling the nearest texel. Sprites draw immediately in submission
// order with source-over blending; `depth` is ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::warn;

//=== Internal Dependencies ===============================================

use super::bitmap::{pixel_count, pixel_index};
use super::{Bitmap, Color, GraphicsDevice, Rect, Sprite, SpriteBatch, Texture, TextureId};

//=== Canvas ==============================================================

/// Offscreen render target that is also its own texture store.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    textures: Vec<Bitmap>,
}

impl Canvas {
    /// Creates a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; pixel_count(width, height)],
            textures: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[pixel_index(self.width, x, y)])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixels as tightly packed RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    /// Bitmap behind a texture created by this canvas.
    pub fn texture(&self, id: TextureId) -> Option<&Bitmap> {
        self.textures.get(id.0 as usize)
    }

    //--- Rasterization ----------------------------------------------------

    fn rasterize(&mut self, bitmap_index: usize, sprite: &Sprite) {
        let bitmap = &self.textures[bitmap_index];
        let source = sprite
            .source
            .unwrap_or_else(|| Rect::new(0.0, 0.0, bitmap.width() as f32, bitmap.height() as f32));

        if sprite.scale.x == 0.0 || sprite.scale.y == 0.0 || source.width <= 0.0 || source.height <= 0.0 {
            return;
        }

        let rotation = Vec2::from_angle(sprite.rotation);
        let to_world = |local: Vec2| sprite.position + rotation.rotate((local - sprite.origin) * sprite.scale);
        let to_local = |world: Vec2| {
            let unrotated = Vec2::new(rotation.x, -rotation.y).rotate(world - sprite.position);
            unrotated / sprite.scale + sprite.origin
        };

        //--- Destination bounds -------------------------------------------
        let corners = [
            to_world(Vec2::ZERO),
            to_world(Vec2::new(source.width, 0.0)),
            to_world(Vec2::new(source.width, source.height)),
            to_world(Vec2::new(0.0, source.height)),
        ];
        let min = corners.iter().fold(Vec2::splat(f32::INFINITY), |acc, c| acc.min(*c));
        let max = corners.iter().fold(Vec2::splat(f32::NEG_INFINITY), |acc, c| acc.max(*c));

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);

        //--- Per-pixel sampling -------------------------------------------
        for y in y0..y1 {
            for x in x0..x1 {
                let local = to_local(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                if local.x < 0.0 || local.y < 0.0 || local.x >= source.width || local.y >= source.height {
                    continue;
                }

                let mut u = local.x.floor();
                let mut v = local.y.floor();
                if sprite.flip.horizontal() {
                    u = source.width - 1.0 - u;
                }
                if sprite.flip.vertical() {
                    v = source.height - 1.0 - v;
                }

                let Some(texel) = bitmap.get((source.x + u) as u32, (source.y + v) as u32) else {
                    continue;
                };

                let index = pixel_index(self.width, x, y);
                self.pixels[index] = blend(self.pixels[index], texel.modulate(sprite.tint));
            }
        }
    }
}

impl GraphicsDevice for Canvas {
    fn create_texture(&mut self, bitmap: &Bitmap) -> Texture {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(bitmap.clone());

        Texture {
            id,
            width: bitmap.width(),
            height: bitmap.height(),
        }
    }
}

impl SpriteBatch for Canvas {
    fn draw(&mut self, texture: &Texture, sprite: &Sprite) {
        let index = texture.id.0 as usize;
        if index >= self.textures.len() {
            warn!(target: "graphics", "Texture {:?} was not created by this canvas, skipping", texture.id);
            return;
        }

        self.rasterize(index, sprite);
    }
}

//=== Blending ============================================================

/// Source-over blend of straight-alpha colors.
fn blend(dst: Color, src: Color) -> Color {
    match src.a {
        255 => src,
        0 => dst,
        alpha => {
            let a = alpha as u16;
            let mix = |s: u8, d: u8| ((s as u16 * a + d as u16 * (255 - a) + 127) / 255) as u8;

            Color {
                r: mix(src.r, dst.r),
                g: mix(src.g, dst.g),
                b: mix(src.b, dst.b),
                a: (a + (dst.a as u16 * (255 - a) + 127) / 255) as u8,
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
