//! Closed test meshes for demos, benches and integration tests.

use std::f32::consts::{PI, TAU};

use crate::{Point3, TriangleMesh};

/// Axis-aligned cube surface with corner `min` and edge `size`, two
/// triangles per face.
pub fn cube(min: Point3, size: f32) -> TriangleMesh {
    let vertices = (0..8u32)
        .map(|i| {
            [
                min[0] + size * (i & 1) as f32,
                min[1] + size * ((i >> 1) & 1) as f32,
                min[2] + size * ((i >> 2) & 1) as f32,
            ]
        })
        .collect();
    let faces = [
        [0, 2, 3, 1],
        [4, 5, 7, 6],
        [0, 1, 5, 4],
        [2, 6, 7, 3],
        [0, 4, 6, 2],
        [1, 3, 7, 5],
    ];
    let triangles = faces
        .iter()
        .flat_map(|f| [[f[0], f[1], f[2]], [f[0], f[2], f[3]]])
        .collect();
    into_mesh(vertices, triangles)
}

/// Latitude/longitude sphere with `rings` bands and `segments` slices.
///
/// Poles are single vertices, so the surface is closed. `rings` is raised
/// to 2 and `segments` to 3 if smaller.
pub fn uv_sphere(center: Point3, radius: f32, rings: u32, segments: u32) -> TriangleMesh {
    let rings = rings.max(2);
    let segments = segments.max(3);

    let mut vertices = Vec::with_capacity((2 + (rings - 1) * segments) as usize);
    vertices.push([center[0], center[1], center[2] + radius]);
    for r in 1..rings {
        let (sin_t, cos_t) = (PI * r as f32 / rings as f32).sin_cos();
        for s in 0..segments {
            let (sin_p, cos_p) = (TAU * s as f32 / segments as f32).sin_cos();
            vertices.push([
                center[0] + radius * sin_t * cos_p,
                center[1] + radius * sin_t * sin_p,
                center[2] + radius * cos_t,
            ]);
        }
    }
    let south = vertices.len() as u32;
    vertices.push([center[0], center[1], center[2] - radius]);

    let ring = |r: u32, s: u32| 1 + (r - 1) * segments + s % segments;
    let mut triangles = Vec::with_capacity((2 * segments * (rings - 1)) as usize);
    for s in 0..segments {
        triangles.push([0, ring(1, s), ring(1, s + 1)]);
    }
    for r in 1..rings - 1 {
        for s in 0..segments {
            let (a, b) = (ring(r, s), ring(r, s + 1));
            let (c, d) = (ring(r + 1, s), ring(r + 1, s + 1));
            triangles.push([a, c, d]);
            triangles.push([a, d, b]);
        }
    }
    for s in 0..segments {
        triangles.push([south, ring(rings - 1, s + 1), ring(rings - 1, s)]);
    }
    into_mesh(vertices, triangles)
}

fn into_mesh(vertices: Vec<Point3>, triangles: Vec<[u32; 3]>) -> TriangleMesh {
    match TriangleMesh::new(vertices, triangles) {
        Ok(mesh) => mesh,
        Err(e) => unreachable!("generated indices are in bounds: {e}"),
    }
}
