use std::error::Error;
use std::time::Instant;

use meshkit::shapes::{cube, uv_sphere};
use meshkit::{compute_aabb, mesh_similarity, voxelize};

const RUNS: u32 = 5;
const RESOLUTION: usize = 64;

fn main() -> Result<(), Box<dyn Error>> {
    let mesh = uv_sphere([0.0, 0.0, 0.0], 1.0, 128, 256);
    let aabb = compute_aabb(&mesh);
    println!(
        "Mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    println!("AABB: min {:?}, max {:?}", aabb.min, aabb.max);

    let mut total = 0.0;
    let mut grid = voxelize(&mesh, RESOLUTION)?;
    for _ in 0..RUNS {
        let start = Instant::now();
        grid = voxelize(&mesh, RESOLUTION)?;
        total += start.elapsed().as_secs_f64();
    }
    println!("Voxelize average: {:.4} s over {} runs", total / f64::from(RUNS), RUNS);

    println!("Unit: {:.6}", grid.unit());
    println!("Dims: {:?}", grid.dims());
    println!("Surface cells: {}", grid.len());

    let solid = grid.fill_interior();
    println!(
        "Solid cells: {} (volume {:.4}, sphere {:.4})",
        solid.len(),
        solid.volume(),
        4.0 / 3.0 * std::f64::consts::PI
    );

    let boxed = cube([-1.0, -1.0, -1.0], 2.0);
    println!(
        "Sphere vs bounding cube IoU: {:.4}",
        mesh_similarity(&mesh, &boxed, RESOLUTION)?
    );
    Ok(())
}
