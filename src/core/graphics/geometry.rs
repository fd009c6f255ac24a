//=========================================================================
// Shape Geometry
//=========================================================================
//
// Closed-form math behind the shape renderer. Nothing here draws; every
// function maps shape parameters to points or sprite transforms so the
// results can be checked directly.
//
// Conventions:
//   - y grows downwards (screen space), angles in radians from +x
//   - segment normal n = (-Δy, Δx) / |Δ|
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::{PI, TAU};

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::{Color, Rect, Sprite, Texture};

//=== Constants ===========================================================

/// Line segments used to outline a full circle.
pub const CIRCLE_SEGMENTS: usize = 20;

/// Line segments used for each half-circle end cap of a stroked capsule.
pub const CAP_SEGMENTS: usize = CIRCLE_SEGMENTS / 2;

/// Stroke width used where a shape takes no explicit thickness.
pub const DEFAULT_THICKNESS: f32 = 2.0;

//=== Lines ===============================================================

/// Angle of a vector, `atan2(y, x)`.
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Sprite that stretches a 1×1 pixel into a `|end - start| × thickness`
/// quad from `start` to `end`.
///
/// The origin sits at the pixel's left-center edge so the quad pivots on
/// `start` and straddles the segment evenly.
pub fn line_sprite(start: Vec2, end: Vec2, color: Color, thickness: f32) -> Sprite {
    let delta = end - start;

    Sprite::at(start)
        .with_tint(color)
        .with_rotation(angle_of(delta))
        .with_origin(Vec2::new(0.0, 0.5))
        .with_scale(Vec2::new(delta.length(), thickness))
}

/// Sprite that stretches a 1×1 pixel over `rect`.
pub fn rect_sprite(rect: Rect, color: Color) -> Sprite {
    Sprite::at(rect.position())
        .with_tint(color)
        .with_scale(rect.size())
}

/// Edges of `rect` as `(start, end)` pairs: top, right, bottom, left.
pub fn rect_edges(rect: Rect) -> [(Vec2, Vec2); 4] {
    let [top_left, top_right, bottom_right, bottom_left] = rect.corners();
    [
        (top_left, top_right),
        (top_right, bottom_right),
        (bottom_right, bottom_left),
        (bottom_left, top_left),
    ]
}

//=== Circles =============================================================

/// Sprite that scales the cached circle texture to `radius` around `center`.
pub fn circle_sprite(circle: &Texture, center: Vec2, radius: f32, color: Color) -> Sprite {
    let scale = 2.0 * radius / circle.width as f32;

    Sprite::at(center)
        .with_tint(color)
        .with_origin(circle.center())
        .with_scale(Vec2::splat(scale))
}

/// Point on the circle at `angle`.
pub fn point_on_circle(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + radius * Vec2::from_angle(angle)
}

/// `segments + 1` evenly spaced points from `start_angle` to
/// `start_angle + sweep`, both ends included.
///
/// # Panics
///
/// Panics if `segments == 0`.
pub fn arc_points(center: Vec2, radius: f32, start_angle: f32, sweep: f32, segments: usize) -> Vec<Vec2> {
    assert!(segments > 0, "Arc needs at least one segment");
    let step = sweep / segments as f32;
    (0..=segments)
        .map(|k| point_on_circle(center, radius, start_angle + k as f32 * step))
        .collect()
}

/// Closed outline of a circle as [`CIRCLE_SEGMENTS`] + 1 points.
///
/// Point `k` sits at angle `2πk / N`; the last point is angle 0 again.
pub fn circle_outline(center: Vec2, radius: f32) -> Vec<Vec2> {
    let mut points = arc_points(center, radius, 0.0, TAU, CIRCLE_SEGMENTS);
    // Close exactly on the first point rather than on cos(2π)/sin(2π).
    if let (Some(first), Some(last)) = (points.first().copied(), points.last_mut()) {
        *last = first;
    }
    points
}

//=== Segments & Capsules =================================================

/// Unit normal `(-Δy, Δx) / |Δ|` of the segment, or `None` when it has no
/// length.
pub fn segment_normal(start: Vec2, end: Vec2) -> Option<Vec2> {
    let delta = end - start;
    let length = delta.length();

    if length > 0.0 && length.is_finite() {
        Some(delta.perp() / length)
    } else {
        None
    }
}

/// The two side segments of a capsule, offset by `±offset` along `normal`.
pub fn capsule_sides(start: Vec2, end: Vec2, normal: Vec2, offset: f32) -> [(Vec2, Vec2); 2] {
    let shift = offset * normal;
    [(start + shift, end + shift), (start - shift, end - shift)]
}

/// Rectangle filled by a full capsule before its end circles are added.
///
/// The corners `start + o·n` and `end - o·n` with `o = radius + thickness/2`
/// span the rectangle. It is exact for axis-aligned segments only.
pub fn capsule_bounds(start: Vec2, end: Vec2, normal: Vec2, radius: f32, thickness: f32) -> Rect {
    let offset = radius + thickness / 2.0;
    Rect::from_corners(start + offset * normal, end - offset * normal)
}

/// Half-circle cap points at `start` and `end` of a stroked capsule.
///
/// The start cap sweeps π from the normal's angle, through the direction
/// pointing away from `end`. The end cap continues from the opposite side,
/// through the direction pointing away from `start`.
pub fn capsule_caps(start: Vec2, end: Vec2, normal: Vec2, radius: f32) -> [Vec<Vec2>; 2] {
    let base = angle_of(normal);
    [
        arc_points(start, radius, base, PI, CAP_SEGMENTS),
        arc_points(end, radius, base + PI, PI, CAP_SEGMENTS),
    ]
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::TextureId;

    const EPSILON: f32 = 1e-4;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(a.abs_diff_eq(b, EPSILON), "{:?} != {:?}", a, b);
    }

    fn texture(width: u32) -> Texture {
        Texture {
            id: TextureId(7),
            width,
            height: width,
        }
    }

    //--- Lines ------------------------------------------------------------

    #[test]
    fn horizontal_line_sprite() {
        let sprite = line_sprite(Vec2::new(10.0, 20.0), Vec2::new(40.0, 20.0), Color::RED, 3.0);
        assert_eq!(sprite.position, Vec2::new(10.0, 20.0));
        assert_eq!(sprite.rotation, 0.0);
        assert_eq!(sprite.origin, Vec2::new(0.0, 0.5));
        assert_eq!(sprite.scale, Vec2::new(30.0, 3.0));
        assert_eq!(sprite.tint, Color::RED);
    }

    #[test]
    fn diagonal_line_sprite_rotates_by_atan2() {
        let sprite = line_sprite(Vec2::ZERO, Vec2::new(3.0, 4.0), Color::WHITE, 1.0);
        assert!((sprite.rotation - 4.0f32.atan2(3.0)).abs() < EPSILON);
        assert!((sprite.scale.x - 5.0).abs() < EPSILON);
    }

    #[test]
    fn vertical_line_points_down() {
        let sprite = line_sprite(Vec2::ZERO, Vec2::new(0.0, 10.0), Color::WHITE, 1.0);
        assert!((sprite.rotation - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn rect_sprite_stretches_pixel() {
        let sprite = rect_sprite(Rect::new(5.0, 6.0, 30.0, 40.0), Color::BLUE);
        assert_eq!(sprite.position, Vec2::new(5.0, 6.0));
        assert_eq!(sprite.scale, Vec2::new(30.0, 40.0));
        assert_eq!(sprite.rotation, 0.0);
        assert_eq!(sprite.origin, Vec2::ZERO);
    }

    #[test]
    fn rect_edges_form_closed_loop() {
        let edges = rect_edges(Rect::new(0.0, 0.0, 10.0, 5.0));
        assert_eq!(edges[0], (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)));
        assert_eq!(edges[1], (Vec2::new(10.0, 0.0), Vec2::new(10.0, 5.0)));
        assert_eq!(edges[2], (Vec2::new(10.0, 5.0), Vec2::new(0.0, 5.0)));
        assert_eq!(edges[3], (Vec2::new(0.0, 5.0), Vec2::new(0.0, 0.0)));
        for k in 0..4 {
            assert_eq!(edges[k].1, edges[(k + 1) % 4].0);
        }
    }

    //--- Circles ----------------------------------------------------------

    #[test]
    fn circle_sprite_scales_reference_texture() {
        let sprite = circle_sprite(&texture(100), Vec2::new(7.0, 8.0), 25.0, Color::GREEN);
        assert_eq!(sprite.position, Vec2::new(7.0, 8.0));
        assert_eq!(sprite.origin, Vec2::new(50.0, 50.0));
        assert_eq!(sprite.scale, Vec2::splat(0.5));
        assert_eq!(sprite.rotation, 0.0);
    }

    #[test]
    fn circle_outline_points_lie_on_circle() {
        let center = Vec2::new(100.0, 50.0);
        let points = circle_outline(center, 30.0);

        assert_eq!(points.len(), CIRCLE_SEGMENTS + 1);
        for point in &points {
            assert!((point.distance(center) - 30.0).abs() < EPSILON);
        }
    }

    #[test]
    fn circle_outline_spacing_and_closure() {
        let points = circle_outline(Vec2::ZERO, 1.0);
        let step = TAU / CIRCLE_SEGMENTS as f32;

        for (k, point) in points.iter().take(CIRCLE_SEGMENTS).enumerate() {
            assert_close(*point, Vec2::from_angle(k as f32 * step));
        }
        assert_eq!(points[CIRCLE_SEGMENTS], points[0]);
        assert_close(points[0], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn arc_points_include_both_ends() {
        let points = arc_points(Vec2::ZERO, 2.0, 0.0, PI, 4);
        assert_eq!(points.len(), 5);
        assert_close(points[0], Vec2::new(2.0, 0.0));
        assert_close(points[2], Vec2::new(0.0, 2.0));
        assert_close(points[4], Vec2::new(-2.0, 0.0));
    }

    //--- Segments & Capsules ----------------------------------------------

    #[test]
    fn normal_is_left_perpendicular_unit() {
        let normal = segment_normal(Vec2::ZERO, Vec2::new(100.0, 0.0)).unwrap();
        assert_close(normal, Vec2::new(0.0, 1.0));

        let normal = segment_normal(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0)).unwrap();
        assert_close(normal, Vec2::new(-0.8, 0.6));
        assert!((normal.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn zero_length_segment_has_no_normal() {
        let p = Vec2::new(3.0, 3.0);
        assert_eq!(segment_normal(p, p), None);
    }

    #[test]
    fn capsule_bounds_axis_aligned() {
        let start = Vec2::ZERO;
        let end = Vec2::new(100.0, 0.0);
        let normal = segment_normal(start, end).unwrap();

        let rect = capsule_bounds(start, end, normal, 10.0, 2.0);

        assert!((rect.left() - 0.0).abs() < EPSILON);
        assert!((rect.right() - 100.0).abs() < EPSILON);
        assert!((rect.top() + 11.0).abs() < EPSILON);
        assert!((rect.bottom() - 11.0).abs() < EPSILON);
    }

    #[test]
    fn capsule_bounds_vertical() {
        let start = Vec2::new(50.0, 0.0);
        let end = Vec2::new(50.0, 80.0);
        let normal = segment_normal(start, end).unwrap();

        let rect = capsule_bounds(start, end, normal, 4.0, 2.0);

        assert!((rect.left() - 45.0).abs() < EPSILON);
        assert!((rect.right() - 55.0).abs() < EPSILON);
        assert!((rect.top() - 0.0).abs() < EPSILON);
        assert!((rect.bottom() - 80.0).abs() < EPSILON);
    }

    #[test]
    fn capsule_sides_are_parallel_offsets() {
        let start = Vec2::ZERO;
        let end = Vec2::new(100.0, 0.0);
        let normal = segment_normal(start, end).unwrap();

        let [upper, lower] = capsule_sides(start, end, normal, 9.0);

        assert_close(upper.0, Vec2::new(0.0, 9.0));
        assert_close(upper.1, Vec2::new(100.0, 9.0));
        assert_close(lower.0, Vec2::new(0.0, -9.0));
        assert_close(lower.1, Vec2::new(100.0, -9.0));
    }

    #[test]
    fn capsule_caps_face_outwards_and_join_sides() {
        let start = Vec2::ZERO;
        let end = Vec2::new(100.0, 0.0);
        let normal = segment_normal(start, end).unwrap();
        let [upper, lower] = capsule_sides(start, end, normal, 9.0);

        let [start_cap, end_cap] = capsule_caps(start, end, normal, 9.0);

        assert_eq!(start_cap.len(), CAP_SEGMENTS + 1);
        assert_eq!(end_cap.len(), CAP_SEGMENTS + 1);

        // Start cap runs from the upper side, around the back, to the lower side.
        assert_close(start_cap[0], upper.0);
        assert_close(start_cap[CAP_SEGMENTS / 2], Vec2::new(-9.0, 0.0));
        assert_close(start_cap[CAP_SEGMENTS], lower.0);

        // End cap runs from the lower side, around the front, to the upper side.
        assert_close(end_cap[0], lower.1);
        assert_close(end_cap[CAP_SEGMENTS / 2], Vec2::new(109.0, 0.0));
        assert_close(end_cap[CAP_SEGMENTS], upper.1);

        for point in &start_cap {
            assert!(point.x <= EPSILON);
            assert!((point.distance(start) - 9.0).abs() < EPSILON);
        }
        for point in &end_cap {
            assert!(point.x >= 100.0 - EPSILON);
        }
    }

    #[test]
    fn capsule_caps_follow_diagonal_segment() {
        let start = Vec2::ZERO;
        let end = Vec2::new(30.0, 40.0);
        let direction = end - start;
        let normal = segment_normal(start, end).unwrap();
        let [upper, lower] = capsule_sides(start, end, normal, 9.0);

        let [start_cap, end_cap] = capsule_caps(start, end, normal, 9.0);

        // Each cap bulges away from the segment body.
        for point in &start_cap {
            assert!((*point - start).dot(direction) <= EPSILON, "{:?} faces inwards", point);
            assert!((point.distance(start) - 9.0).abs() < EPSILON);
        }
        for point in &end_cap {
            assert!((*point - end).dot(direction) >= -EPSILON, "{:?} faces inwards", point);
            assert!((point.distance(end) - 9.0).abs() < EPSILON);
        }

        // Apexes sit on the axis, 9px beyond each end.
        assert_close(start_cap[CAP_SEGMENTS / 2], Vec2::new(-5.4, -7.2));
        assert_close(end_cap[CAP_SEGMENTS / 2], Vec2::new(35.4, 47.2));

        // Cap endpoints meet the side lines.
        assert_close(start_cap[0], upper.0);
        assert_close(start_cap[CAP_SEGMENTS], lower.0);
        assert_close(end_cap[0], lower.1);
        assert_close(end_cap[CAP_SEGMENTS], upper.1);
    }

    #[test]
    #[should_panic(expected = "Arc needs at least one segment")]
    fn arc_without_segments_panics() {
        arc_points(Vec2::ZERO, 1.0, 0.0, PI, 0);
    }
}
