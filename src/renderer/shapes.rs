//! Shape generation for 2D primitives

use glam::{Affine2, Vec2};

use super::vertex::Vertex;

/// Two triangles for an axis-aligned rectangle sampling `uv_min..uv_max`
pub fn rect(min: Vec2, size: Vec2, uv_min: Vec2, uv_max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    let corners = [
        (min, uv_min),
        (Vec2::new(max.x, min.y), Vec2::new(uv_max.x, uv_min.y)),
        (max, uv_max),
        (Vec2::new(min.x, max.y), Vec2::new(uv_min.x, uv_max.y)),
    ];
    corners_to_triangles(corners, color)
}

/// Two triangles for a `width x height` texture mapped through `transform`
pub fn textured_quad(transform: Affine2, width: f32, height: f32, color: [f32; 4]) -> [Vertex; 6] {
    let corners = [
        (transform.transform_point2(Vec2::ZERO), Vec2::new(0.0, 0.0)),
        (transform.transform_point2(Vec2::new(width, 0.0)), Vec2::new(1.0, 0.0)),
        (transform.transform_point2(Vec2::new(width, height)), Vec2::new(1.0, 1.0)),
        (transform.transform_point2(Vec2::new(0.0, height)), Vec2::new(0.0, 1.0)),
    ];
    corners_to_triangles(corners, color)
}

/// Corners in winding order: top-left, top-right, bottom-right, bottom-left
fn corners_to_triangles(corners: [(Vec2, Vec2); 4], color: [f32; 4]) -> [Vertex; 6] {
    let v = |(p, uv): (Vec2, Vec2)| Vertex::new(p.x, p.y, uv.x, uv.y, color);
    [
        v(corners[0]),
        v(corners[1]),
        v(corners[2]),
        v(corners[2]),
        v(corners[3]),
        v(corners[0]),
    ]
}
