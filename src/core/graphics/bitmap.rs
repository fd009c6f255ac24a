//=========================================================================
// Bitmap
//=========================================================================
//
// CPU-side pixel grids uploaded once through a GraphicsDevice.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Color;

//=== Bitmap ==============================================================

/// Row-major grid of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; pixel_count(width, height)],
        }
    }

    /// Wraps existing pixels.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        assert_eq!(
            pixels.len(),
            pixel_count(width, height),
            "Bitmap of {}x{} needs {} pixels",
            width,
            height,
            pixel_count(width, height)
        );
        Self { width, height, pixels }
    }

    /// Single opaque white pixel.
    pub fn pixel() -> Self {
        Self::filled(1, 1, Color::WHITE)
    }

    /// Filled white circle on a transparent square of side `2 * radius`.
    ///
    /// Pixel `(i, j)` is opaque when `(i - r)^2 + (j - r)^2 <= r^2`.
    pub fn circle(radius: u32) -> Self {
        let diameter = 2 * radius;
        let r = radius as f32;
        let radius_sq = r * r;

        let pixels = (0..diameter)
            .flat_map(|i| (0..diameter).map(move |j| (i as f32, j as f32)))
            .map(|(i, j)| {
                let distance_sq = (i - r).powi(2) + (j - r).powi(2);
                if distance_sq > radius_sq {
                    Color::TRANSPARENT
                } else {
                    Color::WHITE
                }
            })
            .collect();

        Self::from_pixels(diameter, diameter, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Color at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[pixel_index(self.width, x, y)])
        } else {
            None
        }
    }
}

//=== Indexing ============================================================

/// Number of pixels in a `width x height` grid, computed in `usize`.
pub(crate) fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major index of `(x, y)` in a grid `width` pixels wide.
pub(crate) fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_is_single_white() {
        let bitmap = Bitmap::pixel();
        assert_eq!((bitmap.width(), bitmap.height()), (1, 1));
        assert_eq!(bitmap.get(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn circle_has_diameter_sides() {
        let bitmap = Bitmap::circle(50);
        assert_eq!((bitmap.width(), bitmap.height()), (100, 100));
        assert_eq!(bitmap.pixels().len(), 100 * 100);
    }

    #[test]
    fn circle_center_opaque_corners_transparent() {
        let bitmap = Bitmap::circle(50);
        assert_eq!(bitmap.get(50, 50), Some(Color::WHITE));
        assert_eq!(bitmap.get(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(bitmap.get(99, 0), Some(Color::TRANSPARENT));
        assert_eq!(bitmap.get(0, 99), Some(Color::TRANSPARENT));
        assert_eq!(bitmap.get(99, 99), Some(Color::TRANSPARENT));
    }

    #[test]
    fn circle_boundary_is_inclusive() {
        // (0, r) lies exactly at distance r from the center.
        let bitmap = Bitmap::circle(4);
        assert_eq!(bitmap.get(4, 0), Some(Color::WHITE));
        assert_eq!(bitmap.get(0, 4), Some(Color::WHITE));
        assert_eq!(bitmap.get(1, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn circle_matches_distance_rule_everywhere() {
        let radius = 6;
        let bitmap = Bitmap::circle(radius);
        let r = radius as i32;

        for i in 0..2 * r {
            for j in 0..2 * r {
                let inside = (i - r).pow(2) + (j - r).pow(2) <= r * r;
                let expected = if inside { Color::WHITE } else { Color::TRANSPARENT };
                assert_eq!(bitmap.get(j as u32, i as u32), Some(expected), "pixel ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn get_outside_is_none() {
        let bitmap = Bitmap::filled(2, 3, Color::RED);
        assert_eq!(bitmap.get(2, 0), None);
        assert_eq!(bitmap.get(0, 3), None);
        assert_eq!(bitmap.get(1, 2), Some(Color::RED));
    }

    #[test]
    #[should_panic(expected = "needs 4 pixels")]
    fn from_pixels_rejects_wrong_length() {
        Bitmap::from_pixels(2, 2, vec![Color::WHITE; 3]);
    }

    //--- Indexing ---------------------------------------------------------

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn pixel_count_does_not_overflow_u32() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(pixel_count(u32::MAX, 2), 2 * u32::MAX as usize);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn pixel_index_is_row_major_in_usize() {
        assert_eq!(pixel_index(3, 2, 1), 5);
        assert_eq!(pixel_index(70_000, 5, 70_000), 4_900_000_005);
    }
}
