//! # Volley Networking - Effect Broadcast
//!
//! Fire-and-forget visual and audio feedback for a tick-driven server.
//!
//! ## Architecture
//!
//! - **Dispatch**: batches from any thread are emitted on the tick thread
//! - **Trails**: bullet paths stepped into evenly spaced particles
//! - **Broadcast**: raw packets go only to clients within range
//! - **Sounds**: unknown keys fall back to a close vanilla sound
//! - **Compat**: version-sensitive packets built through `volley_compat`
//!
//! ```text
//! gameplay thread                      tick thread
//!   │                                     │
//!   │── dispatch(batch) ──▶ TaskQueue ───▶│ run_pending()
//!   │                                     │   └─ Emitter::emit_batch
//!   │                                     │        ├─ particles / trails
//!   │                                     │        ├─ SoundResolver
//!   │                                     │        └─ PacketSender ──▶ clients in range
//! ```
//!
//! Delivery is best effort. There are no acknowledgements and nothing is
//! retried; a failed effect is logged and skipped.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use volley_networking::{EffectDispatcher, EffectsConfig, Emitter, MockEffectHost, TaskQueue};
//!
//! let host = Arc::new(MockEffectHost::new());
//! let queue = TaskQueue::bound_to_current();
//! let dispatcher = EffectDispatcher::new(Emitter::new(host, EffectsConfig::default()), queue.clone());
//!
//! // from any thread
//! dispatcher.dispatch(batch);
//!
//! // once per tick, on the tick thread
//! queue.run_pending();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod broadcast;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod packets;
pub mod particles;
pub mod scheduler;
pub mod sound;
pub mod trail;

// Re-exports for convenience
pub use broadcast::{broadcast_within_distance, filter_within, BroadcastReport, Recipient};
pub use config::{
    EffectsConfig, ImpactDustConfig, SchedulerConfig, SoundFallbacks, TransExplosionConfig,
};
pub use dispatch::{BatchReport, Dispatch, EffectDispatcher, Emitter};
pub use error::{ConfigError, ConfigResult, EmissionError, EmissionResult};
pub use host::{EffectHost, HostCall, MockEffectHost, ParticleData, ParticleSpawn};
pub use packets::PacketSender;
pub use scheduler::{Task, TaskQueue, TickLoop, TickScheduler, TickStats};
pub use sound::{SoundOutcome, SoundResolver};
