//! Scene builders shared by the collision benchmarks.

use anyhow::Context;
use glam::{Mat4, Vec3};
use scene_collide::{Collider, ColliderShape, CollisionWorld, GlobalTransform};

/// Deterministic pseudo-random position on a cubic lattice of side `extent`.
fn scatter(i: usize, extent: f32) -> Vec3 {
    // Multiplicative hashing keeps the layout stable between runs.
    let h = |k: u32| ((i as u32).wrapping_mul(k) >> 8) as f32 / (1u32 << 24) as f32;
    Vec3::new(
        h(2_654_435_761) * extent,
        h(2_246_822_519) * extent,
        h(3_266_489_917) * extent,
    )
}

fn placed(shape: ColliderShape, position: Vec3) -> anyhow::Result<Collider> {
    let mut collider = Collider::new(shape);
    collider.sync_transform(&GlobalTransform(Mat4::from_translation(position)))?;
    collider.calc_box()?;
    Ok(collider)
}

/// `n` unit spheres packed so that each touches a handful of neighbours.
pub fn setup_sphere_world(n: usize) -> anyhow::Result<(hecs::World, Vec<hecs::Entity>)> {
    let extent = (n as f32).cbrt() * 2.5;
    let mut world = hecs::World::new();
    let mut entities = Vec::with_capacity(n);
    for i in 0..n {
        let position = scatter(i, extent);
        let collider = placed(ColliderShape::sphere(1.0), position)?;
        entities.push(world.spawn((GlobalTransform::from_translation(position), collider)));
    }
    Ok((world, entities))
}

/// Mixed boxes, spheres, capsules and hulls spread sparsely.
pub fn setup_mixed_world(n: usize) -> anyhow::Result<(hecs::World, Vec<hecs::Entity>)> {
    let extent = (n as f32).cbrt() * 4.0;
    let hull = ColliderShape::convex_hull(vec![
        Vec3::ZERO,
        Vec3::X,
        Vec3::Y,
        Vec3::Z,
        Vec3::ONE * 0.6,
    ])
    .context("building hull")?;

    let mut world = hecs::World::new();
    let mut entities = Vec::with_capacity(n);
    for i in 0..n {
        let shape = match i % 4 {
            0 => ColliderShape::from_half_extents(Vec3::splat(0.5)),
            1 => ColliderShape::sphere(0.6),
            2 => ColliderShape::capsule(0.3, Vec3::NEG_Y * 0.5, Vec3::Y * 0.5),
            _ => hull.clone(),
        };
        let position = scatter(i, extent);
        let collider = placed(shape, position)?;
        entities.push(world.spawn((GlobalTransform::from_translation(position), collider)));
    }
    Ok((world, entities))
}

/// A collision world with every collider of `world` attached.
pub fn setup_scene(
    mut world: hecs::World,
    entities: &[hecs::Entity],
) -> anyhow::Result<(hecs::World, CollisionWorld)> {
    let mut collisions = CollisionWorld::default();
    for &entity in entities {
        collisions.attach(&mut world, entity)?;
    }
    Ok((world, collisions))
}

/// Nudge every collider's transform, as a moving scene would each frame.
pub fn jitter(world: &mut hecs::World, frame: u32) {
    let offset = Vec3::new((frame as f32 * 0.7).sin(), 0.0, (frame as f32 * 0.3).cos()) * 0.05;
    for (_, transform) in world.query_mut::<&mut GlobalTransform>() {
        transform.0 = Mat4::from_translation(offset) * transform.0;
    }
}

/// O(n²) reference pair count over the colliders' current boxes.
pub fn brute_force_pairs(world: &hecs::World) -> usize {
    let boxes: Vec<_> = world
        .query::<&Collider>()
        .iter()
        .map(|(_, c)| *c.aabb())
        .collect();
    let mut count = 0;
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            if boxes[i].overlaps(&boxes[j]) {
                count += 1;
            }
        }
    }
    count
}
