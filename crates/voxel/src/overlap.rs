//! Triangle / axis-aligned box intersection.
//!
//! Separating axis test after Akenine-Möller, "Fast 3D Triangle-Box Overlap
//! Testing" (2001). The triangle and the box are treated as closed sets, so
//! touching counts as overlapping.

use meshkit_core::Point3;

/// True if the closed triangle `tri` intersects the closed box centred at
/// `center` with half edge lengths `half`.
///
/// Zero-area triangles are handled: a segment or a point is tested exactly
/// like any other triangle, and the degenerate separating axes (zero
/// vectors) never separate.
pub fn triangle_box_overlap(tri: &[Point3; 3], center: &Point3, half: &[f32; 3]) -> bool {
    let v = [
        sub(&tri[0], center),
        sub(&tri[1], center),
        sub(&tri[2], center),
    ];
    let edges = [sub(&v[1], &v[0]), sub(&v[2], &v[1]), sub(&v[0], &v[2])];

    // Box face normals first: cheapest and rejects most candidates.
    for axis in 0..3 {
        let mut unit = [0.0; 3];
        unit[axis] = 1.0;
        if separated_on(&unit, &v, half) {
            return false;
        }
    }

    for edge in &edges {
        for axis in 0..3 {
            let mut unit = [0.0; 3];
            unit[axis] = 1.0;
            if separated_on(&cross(&unit, edge), &v, half) {
                return false;
            }
        }
    }

    let normal = cross(&edges[0], &edges[1]);
    !separated_on(&normal, &v, half)
}

/// Whether `axis` separates the triangle (box-local vertices `v`) from the
/// box centred at the origin.
fn separated_on(axis: &[f32; 3], v: &[Point3; 3], half: &[f32; 3]) -> bool {
    let p0 = dot(axis, &v[0]);
    let p1 = dot(axis, &v[1]);
    let p2 = dot(axis, &v[2]);
    let radius = half[0] * axis[0].abs() + half[1] * axis[1].abs() + half[2] * axis[2].abs();
    p0.min(p1).min(p2) > radius || p0.max(p1).max(p2) < -radius
}

#[inline]
fn sub(a: &Point3, b: &Point3) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn dot(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
