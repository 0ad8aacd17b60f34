use approx::assert_relative_eq;
use meshkit::registration::{apply_transform, rmse, transform_mesh};
use meshkit::shapes::{cube, uv_sphere};
use meshkit::{
    compute_aabb, find_correspondences, mesh_similarity, shape_match, voxelize, KdTree,
    PointCloud, RigidTransform, VoxelCoord,
};

/// Index the distinct vertices of a mesh, then pair a shifted copy with them:
/// the flow of a correspondence benchmark run.
#[test]
fn pipeline_mesh_vertices_to_correspondences() {
    let mesh = uv_sphere([0.0; 3], 1.0, 24, 48);
    let target = mesh.vertex_cloud();
    // The generator already shares seam and pole vertices.
    assert_eq!(target.len(), mesh.vertex_count());

    let shift = RigidTransform::from_translation([0.001, 0.0, 0.0]);
    let source = apply_transform(&target, &shift);
    let tree = KdTree::build(&target);
    assert_eq!(tree.len(), target.len());

    let pairs = find_correspondences(&source, &tree, f32::INFINITY).unwrap();
    assert_eq!(pairs.len(), source.len());
    for (i, c) in pairs.iter().enumerate() {
        assert_eq!(c.source_index, i);
        assert_eq!(c.target_index, i);
    }
    assert_relative_eq!(rmse(&pairs), 0.001, epsilon = 1e-5);

    let near = find_correspondences(&source, &tree, 0.0005).unwrap();
    assert!(near.is_empty());
}

#[test]
fn pipeline_voxelize_sphere() {
    let mesh = uv_sphere([0.0; 3], 1.0, 48, 96);
    let aabb = compute_aabb(&mesh);
    let grid = voxelize(&mesh, 32).unwrap();

    assert_relative_eq!(grid.unit(), aabb.max_extent() / 32.0);
    assert_eq!(grid.dims(), [32, 32, 32]);
    assert!(!grid.is_empty());

    // Surface only: the middle is empty until filled.
    let middle = VoxelCoord::new(16, 16, 16);
    assert!(!grid.is_occupied(middle));
    let solid = grid.fill_interior();
    assert!(solid.is_occupied(middle));
    assert!(solid.len() > grid.len());

    // Closed-cell rounding overestimates, but not by much at this resolution.
    let sphere = 4.0 / 3.0 * std::f64::consts::PI;
    let ratio = solid.volume() / sphere;
    assert!((1.0..1.3).contains(&ratio), "volume ratio {ratio}");

    assert_eq!(voxelize(&mesh, 32).unwrap(), grid);
}

#[test]
fn pipeline_shape_match_then_similarity() {
    let source = uv_sphere([0.0; 3], 1.0, 12, 24).map_vertices(|p| [p[0] * 2.0, p[1], p[2] * 0.5]);
    let (s, c) = 0.4f32.sin_cos();
    let moved = RigidTransform {
        rotation: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        translation: [3.0, -1.0, 0.5],
    };
    let target = transform_mesh(&source, &moved);

    let before = mesh_similarity(&source, &target, 32).unwrap();
    let matched = shape_match(&source, &target).unwrap();
    assert!(matched.rmse < 1e-3);

    let aligned = transform_mesh(&source, &matched.transform);
    let after = mesh_similarity(&aligned, &target, 32).unwrap();
    assert!(after > 0.95, "aligned IoU {after}");
    assert!(after > before);
}

#[test]
fn pipeline_similarity_orders_shapes() {
    let sphere = uv_sphere([0.0; 3], 1.0, 32, 64);
    let big_box = cube([-1.0, -1.0, -1.0], 2.0);
    let small_box = cube([-0.5, -0.5, -0.5], 1.0);

    let self_score = mesh_similarity(&sphere, &sphere, 24).unwrap();
    let box_score = mesh_similarity(&sphere, &big_box, 24).unwrap();
    let small_score = mesh_similarity(&sphere, &small_box, 24).unwrap();
    assert_eq!(self_score, 1.0);
    // Sphere fills about pi/6 of its bounding cube, plus the rounded-up shell.
    assert!((0.45..0.75).contains(&box_score), "box IoU {box_score}");
    assert!(small_score < box_score);
}

#[test]
fn pipeline_cloud_roundtrip_through_tree() {
    let cloud: PointCloud = (0..1000)
        .map(|i| {
            let t = i as f32 * 0.01;
            [t.cos(), t.sin(), t]
        })
        .collect();
    let tree = KdTree::build(&cloud);
    let hits = tree.nearest_batch(&cloud).unwrap();
    assert!(hits
        .iter()
        .all(|h| h.query_index == h.neighbor_index && h.squared_distance == 0.0));
}
