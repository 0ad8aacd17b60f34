use crate::{Aabb, MeshError, Point3, PointCloud};

/// Three indices into a mesh's vertex array.
pub type Triangle = [u32; 3];

/// An indexed triangle mesh.
///
/// Every triangle index is guaranteed to be in bounds of the vertex array;
/// the constructor rejects meshes that violate this. Degenerate (zero-area)
/// triangles are allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    vertices: Vec<Point3>,
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<Point3>, triangles: Vec<Triangle>) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (t, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::InvalidArgument {
                    triangle: t,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of triangle `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= triangle_count()`.
    pub fn triangle_vertices(&self, t: usize) -> [Point3; 3] {
        let [a, b, c] = self.triangles[t];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    pub fn iter_triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        (0..self.triangles.len()).map(|t| self.triangle_vertices(t))
    }

    pub fn triangle_centroids(&self) -> Vec<Point3> {
        self.iter_triangles()
            .map(|[a, b, c]| {
                [
                    (a[0] + b[0] + c[0]) / 3.0,
                    (a[1] + b[1] + c[1]) / 3.0,
                    (a[2] + b[2] + c[2]) / 3.0,
                ]
            })
            .collect()
    }

    pub fn aabb(&self) -> Aabb {
        compute_aabb(self)
    }

    /// The distinct vertex positions, in first-seen order.
    pub fn vertex_cloud(&self) -> PointCloud {
        PointCloud::from_points(&self.vertices).deduplicated()
    }

    /// Same topology, new vertex positions.
    pub fn map_vertices<F>(&self, f: F) -> Self
    where
        F: FnMut(&Point3) -> Point3,
    {
        Self {
            vertices: self.vertices.iter().map(f).collect(),
            triangles: self.triangles.clone(),
        }
    }

    pub fn into_parts(self) -> (Vec<Point3>, Vec<Triangle>) {
        (self.vertices, self.triangles)
    }
}

/// Bounding box of all finite vertices, computed in a single pass.
///
/// Unreferenced vertices count too. A mesh whose vertices are all identical
/// yields a zero-extent box at that position.
pub fn compute_aabb(mesh: &TriangleMesh) -> Aabb {
    Aabb::from_points(mesh.vertices.iter().copied())
}
