//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering the box from `min` with the given `size`
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Hollow box made of four edge strips of `thickness`
pub fn outline(min: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(size.x * 0.5).min(size.y * 0.5);
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right
    vertices.extend(rect(min, Vec2::new(size.x, t), color));
    vertices.extend(rect(
        Vec2::new(min.x, min.y + size.y - t),
        Vec2::new(size.x, t),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - t, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    ));
    vertices
}

/// Horizontal bar filled to `fraction` over a dark backing
pub fn bar(
    min: Vec2,
    size: Vec2,
    fraction: f32,
    fill: [f32; 4],
    back: [f32; 4],
) -> Vec<Vertex> {
    let fraction = fraction.clamp(0.0, 1.0);
    let mut vertices = Vec::with_capacity(12);
    vertices.extend(rect(min, size, back));
    if fraction > 0.0 {
        vertices.extend(rect(min, Vec2::new(size.x * fraction, size.y), fill));
    }
    vertices
}
