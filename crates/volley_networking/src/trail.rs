//! # Trail Stepper
//!
//! Walks a bullet trail segment in fixed steps and yields the points where
//! trail particles go.
//!
//! ```text
//! start                                              start + dir * length
//!   ●────●────●────●────●────●────●────●────●────●────○
//!   │◀──▶│ spacing
//!   skipped while net_distance + i * spacing <= min_distance
//! ```
//!
//! The walk takes exactly `ceil(length / spacing)` steps. Step `i` sits at
//! `start + direction * (i * spacing)` and has flown
//! `net_distance + i * spacing`; it is only kept once that distance is
//! strictly greater than `min_distance`, so trails do not start inside the
//! shooter's face.

use volley_shared::{BulletTrail, ParticleKind, Vec3};

use crate::host::{ParticleData, ParticleSpawn};

/// Number of steps a segment takes. Zero for non-positive spacing or length.
#[must_use]
pub fn step_count(length: f64, spacing: f64) -> usize {
    if !(spacing > 0.0 && length > 0.0) {
        return 0;
    }
    (length / spacing).ceil() as usize
}

/// Index of the first step that has flown strictly past `min_distance`.
/// May undershoot by one step; callers still check each point.
fn first_step(trail: &BulletTrail) -> usize {
    let skipped = (trail.min_distance - trail.net_distance) / trail.spacing;
    if skipped > 0.0 {
        skipped.floor() as usize
    } else {
        0
    }
}

/// Spawn points of a trail segment, in walk order.
///
/// Points are produced lazily and steps short of `min_distance` are skipped
/// without being visited. `spacing` must be positive; debug builds assert
/// it, release builds return no points.
pub fn step(trail: &BulletTrail) -> impl Iterator<Item = Vec3> + '_ {
    debug_assert!(trail.spacing > 0.0, "trail spacing must be positive: {}", trail.spacing);

    let steps = step_count(trail.length, trail.spacing);
    let first = if steps == 0 { 0 } else { first_step(trail).min(steps) };
    (first..steps).filter_map(move |i| {
        let traveled = trail.spacing * i as f64;
        (trail.net_distance + traveled > trail.min_distance).then(|| trail.start + trail.direction * traveled)
    })
}

/// One particle per spawn point: count 1, no offset, no extra. Dust options
/// are attached only to dust trails.
pub fn trail_spawns(trail: &BulletTrail) -> impl Iterator<Item = ParticleSpawn> + '_ {
    let data = match (trail.particle, trail.dust) {
        (ParticleKind::Dust, Some(dust)) => ParticleData::Dust(dust),
        _ => ParticleData::None,
    };
    step(trail).map(move |point| {
        ParticleSpawn::new(trail.particle, point, 1, Vec3::ZERO, trail.force).with_data(data.clone())
    })
}
