use std::error::Error;
use std::time::Instant;

use meshkit::registration::apply_transform;
use meshkit::shapes::uv_sphere;
use meshkit::{find_correspondences, KdTree, RigidTransform};

const RUNS: u32 = 5;

fn main() -> Result<(), Box<dyn Error>> {
    // Target: distinct vertices of a sphere mesh
    let mesh = uv_sphere([0.0, 0.0, 0.0], 1.0, 200, 400);
    let target = mesh.vertex_cloud();
    println!(
        "Target: {} distinct vertices ({} in mesh)",
        target.len(),
        mesh.vertex_count()
    );

    // Source: the same points nudged along x
    let source = apply_transform(&target, &RigidTransform::from_translation([0.002, 0.0, 0.0]));
    println!("Source: {} points (shifted by [0.002, 0.0, 0.0])", source.len());

    let mut total = 0.0;
    let mut pairs = Vec::new();
    for _ in 0..RUNS {
        let start = Instant::now();
        let tree = KdTree::build(&target);
        pairs = find_correspondences(&source, &tree, f32::INFINITY)?;
        total += start.elapsed().as_secs_f64();
    }
    println!("Build + 1-NN average: {:.4} s over {} runs", total / f64::from(RUNS), RUNS);

    println!("Correspondences: {}", pairs.len());
    println!("RMSE: {:.6}", meshkit::registration::rmse(&pairs));
    for c in pairs.iter().take(3) {
        println!(
            "  source {} -> target {} (distance {:.6})",
            c.source_index,
            c.target_index,
            c.distance()
        );
    }
    Ok(())
}
