//! # Thread-Affine Dispatcher
//!
//! Gameplay code on any thread hands over a batch of effect descriptors and
//! moves on. The dispatcher makes sure the batch is emitted on the tick
//! thread:
//!
//! ```text
//! dispatch(batch)
//!   │
//!   ├─ on tick thread ──▶ emit every descriptor now, in order
//!   │
//!   └─ elsewhere ───────▶ one deferred task ──(next tick)──▶ emit in order
//! ```
//!
//! ## Failure Policy
//!
//! Each descriptor is emitted on its own. A failure is counted in the
//! [`BatchReport`], logged at `debug`, and the batch carries on. Nothing is
//! retried; a late effect is worse than a missing one.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use volley_compat::CompatibilityAccessor;
use volley_shared::{
    BlockCrack, BlockImpact, BulletTrail, EffectDescriptor, ExplosionEffect, HitboxImpact, LookAt,
    Recoil, SlotChange, SoundPacket,
};

use crate::config::EffectsConfig;
use crate::error::{EmissionError, EmissionResult};
use crate::host::EffectHost;
use crate::packets::PacketSender;
use crate::particles;
use crate::scheduler::TickScheduler;
use crate::sound::SoundResolver;
use crate::trail;

/// Per-batch emission counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Descriptors emitted
    pub emitted: usize,
    /// Descriptors whose emission failed
    pub failed: usize,
    /// Descriptors skipped because this host release cannot emit them
    pub unsupported: usize,
}

impl BatchReport {
    /// Descriptors looked at.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.emitted + self.failed + self.unsupported
    }
}

/// How a dispatch was carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Ran on the calling (tick) thread.
    Immediate(BatchReport),
    /// Queued as one task for the tick thread.
    Deferred,
}

/// Emits descriptors through the host. Tick thread only.
pub struct Emitter<H: EffectHost> {
    host: Arc<H>,
    config: EffectsConfig,
    sounds: SoundResolver,
    accessor: &'static CompatibilityAccessor,
    rng: Mutex<StdRng>,
}

impl<H: EffectHost> Emitter<H> {
    /// Creates an emitter with the process-wide compatibility accessor.
    #[must_use]
    pub fn new(host: Arc<H>, config: EffectsConfig) -> Self {
        Self {
            host,
            sounds: SoundResolver::new(config.sounds.clone()),
            config,
            accessor: CompatibilityAccessor::global(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Uses a specific compatibility accessor.
    #[must_use]
    pub fn with_accessor(mut self, accessor: &'static CompatibilityAccessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Seeds the decorative-effect RNG.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock() = StdRng::seed_from_u64(seed);
        self
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Emits every descriptor in order. Never stops early.
    pub fn emit_batch(&self, batch: &[EffectDescriptor]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, descriptor) in batch.iter().enumerate() {
            match self.emit(descriptor) {
                Ok(()) => report.emitted += 1,
                Err(EmissionError::Unsupported(kind)) => {
                    report.unsupported += 1;
                    tracing::trace!(index, ?kind, "effect skipped, unsupported on this host");
                }
                Err(error) => {
                    report.failed += 1;
                    tracing::debug!(
                        index,
                        kind = ?descriptor.kind(),
                        position = ?descriptor.position(),
                        %error,
                        "effect emission failed"
                    );
                }
            }
        }
        report
    }

    /// Emits one descriptor.
    ///
    /// # Errors
    ///
    /// The first host error hit while emitting it.
    pub fn emit(&self, descriptor: &EffectDescriptor) -> EmissionResult<()> {
        match descriptor {
            EffectDescriptor::Trail(t) => self.emit_trail(t),
            EffectDescriptor::BlockImpact(b) => self.emit_block_impact(b),
            EffectDescriptor::HitboxImpact(h) => self.emit_hitbox_impact(h),
            EffectDescriptor::Explosion(e) => self.emit_explosion(e),
            EffectDescriptor::TransExplosion(e) => self.emit_trans_explosion(e),
            EffectDescriptor::Sound(s) => self.emit_sound(s),
            EffectDescriptor::BlockCrack(c) => self.emit_block_crack(c),
            EffectDescriptor::Recoil(r) => self.emit_recoil(r),
            EffectDescriptor::LookAt(l) => self.emit_look_at(l),
            EffectDescriptor::SlotChange(s) => self.emit_slot_change(s),
        }
    }

    fn packets(&self) -> PacketSender<'_, H> {
        PacketSender::with_accessor(self.host.as_ref(), self.accessor)
    }

    fn emit_trail(&self, trail: &BulletTrail) -> EmissionResult<()> {
        for spawn in trail::trail_spawns(trail) {
            self.host.spawn_particle(trail.world, &spawn)?;
        }
        Ok(())
    }

    fn emit_block_impact(&self, impact: &BlockImpact) -> EmissionResult<()> {
        for spawn in particles::block_impact_spawns(impact, &self.config.impact_dust) {
            self.host.spawn_particle(impact.world, &spawn)?;
        }
        Ok(())
    }

    fn emit_hitbox_impact(&self, impact: &HitboxImpact) -> EmissionResult<()> {
        self.host.spawn_particle(impact.world, &particles::hitbox_impact_spawn(impact))
    }

    fn emit_explosion(&self, explosion: &ExplosionEffect) -> EmissionResult<()> {
        self.host.spawn_particle(explosion.world, &particles::explosion_spawn(explosion))
    }

    fn emit_trans_explosion(&self, explosion: &ExplosionEffect) -> EmissionResult<()> {
        let spawns = {
            let mut rng = self.rng.lock();
            particles::trans_explosion_spawns(explosion, &self.config.trans_explosion, &mut *rng)
        };
        for spawn in &spawns {
            self.host.spawn_particle(explosion.world, spawn)?;
        }
        Ok(())
    }

    fn emit_sound(&self, sound: &SoundPacket) -> EmissionResult<()> {
        // A dropped sound is not a failure.
        self.sounds.play(self.host.as_ref(), sound).map(drop)
    }

    fn emit_block_crack(&self, crack: &BlockCrack) -> EmissionResult<()> {
        let report = self.packets().broadcast_block_crack(crack, self.config.block_crack_radius)?;
        tracing::trace!(sent = report.sent, failed = report.failed, "block crack broadcast");
        Ok(())
    }

    fn emit_recoil(&self, recoil: &Recoil) -> EmissionResult<()> {
        self.packets().send_recoil_relative(
            recoil.client,
            recoil.horizontal,
            recoil.vertical,
            self.config.recoil_look_distance,
        )
    }

    fn emit_look_at(&self, look: &LookAt) -> EmissionResult<()> {
        self.packets().send_look_at(look.client, look.target)
    }

    fn emit_slot_change(&self, change: &SlotChange) -> EmissionResult<()> {
        self.packets().send_item_slot_change(change.client, change.slot, &change.item)
    }
}

/// Entry point for gameplay code on any thread.
pub struct EffectDispatcher<H: EffectHost, S: TickScheduler> {
    emitter: Arc<Emitter<H>>,
    scheduler: S,
}

impl<H: EffectHost, S: TickScheduler> EffectDispatcher<H, S> {
    /// Creates a dispatcher.
    #[must_use]
    pub fn new(emitter: Emitter<H>, scheduler: S) -> Self {
        Self {
            emitter: Arc::new(emitter),
            scheduler,
        }
    }

    /// The emitter batches end up in.
    #[must_use]
    pub fn emitter(&self) -> &Arc<Emitter<H>> {
        &self.emitter
    }

    /// The scheduler batches are deferred to.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Emits `batch` in order on the tick thread: right away if already
    /// there, otherwise as one deferred task. Never blocks.
    pub fn dispatch(&self, batch: Vec<EffectDescriptor>) -> Dispatch {
        if self.scheduler.is_tick_thread() {
            return Dispatch::Immediate(self.emitter.emit_batch(&batch));
        }

        let emitter = Arc::clone(&self.emitter);
        self.scheduler.run_task(Box::new(move || {
            let report = emitter.emit_batch(&batch);
            tracing::trace!(
                emitted = report.emitted,
                failed = report.failed,
                unsupported = report.unsupported,
                "deferred batch emitted"
            );
        }));
        Dispatch::Deferred
    }

    /// Dispatches a single descriptor as a batch of one.
    pub fn dispatch_one(&self, descriptor: impl Into<EffectDescriptor>) -> Dispatch {
        self.dispatch(vec![descriptor.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, MockEffectHost};
    use crate::scheduler::TaskQueue;
    use volley_shared::{ParticleKind, ParticlePacket, Vec3};

    fn accessor() -> &'static CompatibilityAccessor {
        Box::leak(Box::new(CompatibilityAccessor::new()))
    }

    fn explosion(x: f64) -> EffectDescriptor {
        ExplosionEffect {
            particles: ParticlePacket::placeholder_explosion(),
            world: 0,
            position: Vec3::new(x, 0.0, 0.0),
            force: true,
        }
        .into()
    }

    #[test]
    fn test_immediate_on_tick_thread() {
        let host = Arc::new(MockEffectHost::new());
        let emitter = Emitter::new(Arc::clone(&host), EffectsConfig::default()).with_accessor(accessor());
        let dispatcher = EffectDispatcher::new(emitter, TaskQueue::bound_to_current());

        let outcome = dispatcher.dispatch(vec![explosion(1.0), explosion(2.0)]);
        assert_eq!(
            outcome,
            Dispatch::Immediate(BatchReport { emitted: 2, failed: 0, unsupported: 0 })
        );
        assert_eq!(host.particles().len(), 2);
        assert_eq!(dispatcher.scheduler().pending(), 0);
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let host = Arc::new(MockEffectHost::new());
        host.reject_particle(ParticleKind::ExplosionEmitter);
        let emitter = Emitter::new(Arc::clone(&host), EffectsConfig::default()).with_accessor(accessor());

        let hitbox = HitboxImpact {
            world: 0,
            particle: ParticleKind::Crit,
            count: 3,
            position: Vec3::ZERO,
            random: Vec3::splat(0.1),
            force: false,
        };
        let recoil = Recoil { client: 404, horizontal: 1.0, vertical: 1.0 };
        let report = emitter.emit_batch(&[explosion(1.0), hitbox.into(), recoil.into()]);

        assert_eq!(report, BatchReport { emitted: 1, failed: 2, unsupported: 0 });
        assert_eq!(report.total(), 3);
        assert_eq!(host.particles()[0].particle, ParticleKind::Crit);
    }

    #[test]
    fn test_unsupported_packet_is_skipped() {
        let host = Arc::new(MockEffectHost::with_packet_runtime(
            volley_compat::MockPacketRuntime::with_constructors(&[]),
        ));
        let emitter = Emitter::new(Arc::clone(&host), EffectsConfig::default()).with_accessor(accessor());

        let look = LookAt { client: 1, target: Vec3::ZERO };
        let report = emitter.emit_batch(&[look.into(), explosion(0.0)]);
        assert_eq!(report, BatchReport { emitted: 1, failed: 0, unsupported: 1 });
    }

    #[test]
    fn test_sound_fallback_counts_as_emitted() {
        let host = Arc::new(MockEffectHost::new());
        let emitter = Emitter::new(Arc::clone(&host), EffectsConfig::default()).with_accessor(accessor());
        let sound = SoundPacket {
            sound: "xyz_unknown".to_owned(),
            world: 0,
            position: Vec3::ZERO,
            volume: 1.0,
            pitch: 1.0,
        };

        let report = emitter.emit_batch(&[sound.into()]);
        assert_eq!(report.emitted, 1);
        assert!(matches!(&host.calls()[0], HostCall::Sound { sound, .. } if sound == "minecraft:item.crossbow.shoot"));
    }

    #[test]
    fn test_seeded_trans_explosion_is_reproducible() {
        let run = || {
            let host = Arc::new(MockEffectHost::new());
            let emitter = Emitter::new(Arc::clone(&host), EffectsConfig::default())
                .with_accessor(accessor())
                .with_seed(99);
            let EffectDescriptor::Explosion(e) = explosion(0.0) else { unreachable!() };
            emitter.emit_batch(&[EffectDescriptor::TransExplosion(e)]);
            host.particles()
        };
        let first = run();
        assert_eq!(first.len(), 101);
        assert_eq!(first, run());
    }
}
