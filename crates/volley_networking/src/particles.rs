//! Particle layouts for impacts and explosions.
//!
//! Each function turns one descriptor into the host spawn calls that draw
//! it. Nothing here talks to the host; the dispatcher does that.

use rand::Rng;
use volley_shared::{
    BlockImpact, DustOptions, ExplosionEffect, HitboxImpact, ParticleKind, Vec3,
};

use crate::config::{ImpactDustConfig, TransExplosionConfig};
use crate::host::{ParticleData, ParticleSpawn};

/// Block fragments at the impact point, then a small dust puff.
#[must_use]
pub fn block_impact_spawns(impact: &BlockImpact, dust: &ImpactDustConfig) -> [ParticleSpawn; 2] {
    [
        ParticleSpawn::new(ParticleKind::Block, impact.position, impact.count, Vec3::ZERO, impact.force)
            .with_data(ParticleData::Block(impact.block.clone())),
        ParticleSpawn::new(
            ParticleKind::Dust,
            impact.position,
            dust.count,
            Vec3::splat(dust.offset),
            impact.force,
        )
        .with_data(ParticleData::Dust(DustOptions::new(dust.color, dust.size))),
    ]
}

/// Particles where a bullet hits an entity.
#[must_use]
pub fn hitbox_impact_spawn(impact: &HitboxImpact) -> ParticleSpawn {
    ParticleSpawn::new(impact.particle, impact.position, impact.count, impact.random, impact.force)
}

/// Explosion burst at the explosion center.
#[must_use]
pub fn explosion_spawn(explosion: &ExplosionEffect) -> ParticleSpawn {
    let burst = &explosion.particles;
    ParticleSpawn::new(burst.particle, explosion.position, burst.count, burst.random, explosion.force)
}

/// Cloud of colored dust scattered uniformly in a cube around the center.
///
/// Spawn `i` uses color `i % colors.len()`. Returns nothing if no colors are
/// configured or the radius is not positive.
pub fn trans_explosion_spawns<R: Rng>(
    explosion: &ExplosionEffect,
    config: &TransExplosionConfig,
    rng: &mut R,
) -> Vec<ParticleSpawn> {
    let radius = config.radius;
    if config.colors.is_empty() || !(radius > 0.0 && radius.is_finite()) {
        return Vec::new();
    }
    (0..config.spawns as usize)
        .map(|i| {
            let offset = Vec3::new(
                rng.gen_range(-radius..radius),
                rng.gen_range(-radius..radius),
                rng.gen_range(-radius..radius),
            );
            let color = config.colors[i % config.colors.len()];
            ParticleSpawn::new(
                ParticleKind::Dust,
                explosion.position + offset,
                config.count,
                Vec3::splat(config.spread),
                explosion.force,
            )
            .with_data(ParticleData::Dust(DustOptions::new(color, config.size)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use volley_shared::{BlockVisual, Color, ParticlePacket};

    fn explosion() -> ExplosionEffect {
        ExplosionEffect {
            particles: ParticlePacket::placeholder_impact(),
            world: 0,
            position: Vec3::new(10.0, 70.0, -5.0),
            force: true,
        }
    }

    #[test]
    fn test_block_impact_layout() {
        let impact = BlockImpact {
            world: 0,
            count: 12,
            position: Vec3::new(1.5, 65.0, 2.5),
            block: BlockVisual::new("minecraft:stone"),
            force: false,
        };
        let [fragments, puff] = block_impact_spawns(&impact, &ImpactDustConfig::default());

        assert_eq!(fragments.particle, ParticleKind::Block);
        assert_eq!(fragments.count, 12);
        assert_eq!(fragments.offset, Vec3::ZERO);
        assert_eq!(fragments.data, ParticleData::Block(BlockVisual::new("minecraft:stone")));

        assert_eq!(puff.particle, ParticleKind::Dust);
        assert_eq!(puff.count, 6);
        assert_eq!(puff.offset, Vec3::splat(0.1));
        assert_eq!(puff.data, ParticleData::Dust(DustOptions::new(Color::WHITE, 0.8)));
        assert!(!puff.force);
    }

    #[test]
    fn test_explosion_uses_burst_parameters() {
        let spawn = explosion_spawn(&explosion());
        assert_eq!(spawn.particle, ParticleKind::Explosion);
        assert_eq!(spawn.count, 6);
        assert_eq!(spawn.offset, Vec3::splat(0.25));
        assert_eq!(spawn.position, Vec3::new(10.0, 70.0, -5.0));
        assert_eq!(spawn.data, ParticleData::None);
    }

    #[test]
    fn test_trans_explosion_bounded_and_cycled() {
        let config = TransExplosionConfig::default();
        let center = explosion().position;
        let mut rng = StdRng::seed_from_u64(7);
        let spawns = trans_explosion_spawns(&explosion(), &config, &mut rng);

        assert_eq!(spawns.len(), 101);
        for (i, spawn) in spawns.iter().enumerate() {
            for (p, c) in spawn.position.to_array().into_iter().zip(center.to_array()) {
                assert!(p >= c - 10.0 && p <= c + 10.0);
            }
            assert_eq!(spawn.count, 8);
            assert_eq!(spawn.offset, Vec3::splat(0.7));
            let expected = config.colors[i % 3];
            assert_eq!(spawn.data, ParticleData::Dust(DustOptions::new(expected, 8.0)));
        }
    }

    #[test]
    fn test_trans_explosion_deterministic_with_seed() {
        let config = TransExplosionConfig::default();
        let a = trans_explosion_spawns(&explosion(), &config, &mut StdRng::seed_from_u64(1));
        let b = trans_explosion_spawns(&explosion(), &config, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
