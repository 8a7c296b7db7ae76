//! # Host Traits
//!
//! The host engine owns worlds, connections and the packet classes. This
//! crate only reaches it through [`EffectHost`], which the host implements.
//!
//! ```text
//! volley defines:        host implements:
//! ┌──────────────────┐    ┌──────────────────┐
//! │ trait EffectHost │ ←─ │ impl EffectHost  │
//! └──────────────────┘    └──────────────────┘
//! ```
//!
//! Every method is only ever called on the tick thread.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use volley_compat::{MockPacket, MockPacketRuntime, PacketEncoder, PacketRuntime};
use volley_shared::constants::{
    SOUND_DRY_FIRE, SOUND_EXPLOSION, SOUND_LOADING_END, SOUND_LOADING_START, SOUND_SHOOT,
};
use volley_shared::{
    BlockVisual, ClientId, DustOptions, EyeLocation, InventoryMenu, ParticleKind, Vec3, WorldId,
};

use crate::broadcast::Recipient;
use crate::error::{EmissionError, EmissionResult};

/// Extra data attached to a particle spawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ParticleData {
    /// No data
    #[default]
    None,
    /// Color and size, for [`ParticleKind::Dust`]
    Dust(DustOptions),
    /// Block visual, for [`ParticleKind::Block`]
    Block(BlockVisual),
}

/// One host particle spawn call.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpawn {
    /// Particle kind
    pub particle: ParticleKind,
    /// Where
    pub position: Vec3,
    /// How many
    pub count: u32,
    /// Random offset per axis
    pub offset: Vec3,
    /// Extra speed parameter
    pub extra: f64,
    /// Extra data
    pub data: ParticleData,
    /// Render regardless of client particle settings
    pub force: bool,
}

impl ParticleSpawn {
    /// Spawn with zero extra and no data.
    #[must_use]
    pub fn new(particle: ParticleKind, position: Vec3, count: u32, offset: Vec3, force: bool) -> Self {
        Self {
            particle,
            position,
            count,
            offset,
            extra: 0.0,
            data: ParticleData::None,
            force,
        }
    }

    /// Attaches data.
    #[must_use]
    pub fn with_data(mut self, data: ParticleData) -> Self {
        self.data = data;
        self
    }
}

/// Host engine primitives used for emission.
///
/// [`PacketRuntime`] is the host's packet-class surface; packets built
/// through it are handed back to [`send_packet`](EffectHost::send_packet).
pub trait EffectHost: PacketRuntime + Send + Sync + 'static {
    /// Spawns particles in a world.
    ///
    /// # Errors
    ///
    /// When the host refuses the spawn.
    fn spawn_particle(&self, world: WorldId, spawn: &ParticleSpawn) -> EmissionResult<()>;

    /// Plays a positional sound.
    ///
    /// # Errors
    ///
    /// [`EmissionError::UnknownSound`] when the host does not know `sound`.
    fn play_sound(
        &self,
        world: WorldId,
        position: Vec3,
        sound: &str,
        volume: f32,
        pitch: f32,
    ) -> EmissionResult<()>;

    /// Returns true if the host would accept `sound`.
    fn knows_sound(&self, sound: &str) -> bool;

    /// Sends a built packet to one client.
    ///
    /// # Errors
    ///
    /// When the client is gone or the connection refuses the packet.
    fn send_packet(&self, client: ClientId, packet: &Self::Packet) -> EmissionResult<()>;

    /// Snapshot of the clients in a world.
    fn recipients(&self, world: WorldId) -> Vec<Recipient>;

    /// Eye position and rotation of a client's player.
    fn eye_location(&self, client: ClientId) -> Option<EyeLocation>;

    /// Advances the state id of the client's inventory menu and returns
    /// `(container_id, state_id)`.
    fn increment_container_state(&self, client: ClientId) -> Option<(i32, i32)>;
}

// ============================================================================
// MOCK HOST
// ============================================================================

/// A call recorded by [`MockEffectHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    /// `spawn_particle`
    Particle {
        /// World
        world: WorldId,
        /// Spawn parameters
        spawn: ParticleSpawn,
    },
    /// `play_sound`
    Sound {
        /// World
        world: WorldId,
        /// Position
        position: Vec3,
        /// Key actually played
        sound: String,
        /// Volume
        volume: f32,
        /// Pitch
        pitch: f32,
    },
    /// `send_packet`
    Packet {
        /// Receiving client
        client: ClientId,
        /// Built packet
        packet: MockPacket,
    },
}

#[derive(Debug, Default)]
struct MockWorldState {
    recipients: HashMap<WorldId, Vec<Recipient>>,
    eyes: HashMap<ClientId, EyeLocation>,
    menus: HashMap<ClientId, InventoryMenu>,
}

/// In-memory host that records every call it accepts.
#[derive(Debug)]
pub struct MockEffectHost {
    packets: MockPacketRuntime,
    sounds: Mutex<HashSet<String>>,
    muted_sounds: Mutex<HashSet<String>>,
    rejected_particles: Mutex<HashSet<ParticleKind>>,
    rejected_clients: Mutex<HashSet<ClientId>>,
    state: Mutex<MockWorldState>,
    calls: Mutex<Vec<HostCall>>,
}

impl MockEffectHost {
    /// Current host release: modern packet constructors and the standard
    /// fallback sound keys.
    #[must_use]
    pub fn new() -> Self {
        Self::with_packet_runtime(MockPacketRuntime::modern())
    }

    /// Host with a specific packet-class surface.
    #[must_use]
    pub fn with_packet_runtime(packets: MockPacketRuntime) -> Self {
        let sounds = [
            SOUND_LOADING_END,
            SOUND_LOADING_START,
            SOUND_DRY_FIRE,
            SOUND_EXPLOSION,
            SOUND_SHOOT,
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();

        Self {
            packets,
            sounds: Mutex::new(sounds),
            muted_sounds: Mutex::new(HashSet::new()),
            rejected_particles: Mutex::new(HashSet::new()),
            rejected_clients: Mutex::new(HashSet::new()),
            state: Mutex::new(MockWorldState::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Registers a sound key.
    pub fn add_sound(&self, sound: impl Into<String>) {
        self.sounds.lock().insert(sound.into());
    }

    /// Unregisters a sound key.
    pub fn remove_sound(&self, sound: &str) {
        self.sounds.lock().remove(sound);
    }

    /// Makes a known sound fail as a host rejection rather than an unknown
    /// key.
    pub fn mute_sound(&self, sound: impl Into<String>) {
        self.muted_sounds.lock().insert(sound.into());
    }

    /// Makes every spawn of `particle` fail.
    pub fn reject_particle(&self, particle: ParticleKind) {
        self.rejected_particles.lock().insert(particle);
    }

    /// Makes every send to `client` fail.
    pub fn reject_client(&self, client: ClientId) {
        self.rejected_clients.lock().insert(client);
    }

    /// Connects a player.
    pub fn add_player(&self, world: WorldId, client: ClientId, eye: EyeLocation, container_id: i32) {
        let mut state = self.state.lock();
        state
            .recipients
            .entry(world)
            .or_default()
            .push(Recipient::new(client, eye.position));
        state.eyes.insert(client, eye);
        state.menus.insert(client, InventoryMenu::new(container_id));
    }

    /// Current state id of a player's menu.
    #[must_use]
    pub fn container_state(&self, client: ClientId) -> Option<i32> {
        self.state.lock().menus.get(&client).map(InventoryMenu::state_id)
    }

    /// Every call accepted so far.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Only the particle spawns.
    #[must_use]
    pub fn particles(&self) -> Vec<ParticleSpawn> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::Particle { spawn, .. } => Some(spawn.clone()),
                _ => None,
            })
            .collect()
    }

    /// Only the packets, with their receivers.
    #[must_use]
    pub fn packets(&self) -> Vec<(ClientId, MockPacket)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                HostCall::Packet { client, packet } => Some((*client, packet.clone())),
                _ => None,
            })
            .collect()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl Default for MockEffectHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketRuntime for MockEffectHost {
    type Packet = MockPacket;

    fn packet_constructor(&self, name: &str) -> Option<PacketEncoder<MockPacket>> {
        self.packets.packet_constructor(name)
    }
}

impl EffectHost for MockEffectHost {
    fn spawn_particle(&self, world: WorldId, spawn: &ParticleSpawn) -> EmissionResult<()> {
        if self.rejected_particles.lock().contains(&spawn.particle) {
            return Err(EmissionError::rejected(format!("particle {} disabled", spawn.particle.key())));
        }
        self.calls.lock().push(HostCall::Particle { world, spawn: spawn.clone() });
        Ok(())
    }

    fn play_sound(
        &self,
        world: WorldId,
        position: Vec3,
        sound: &str,
        volume: f32,
        pitch: f32,
    ) -> EmissionResult<()> {
        if !self.knows_sound(sound) {
            return Err(EmissionError::UnknownSound(sound.to_owned()));
        }
        if self.muted_sounds.lock().contains(sound) {
            return Err(EmissionError::rejected(format!("sound {sound} muted")));
        }
        self.calls.lock().push(HostCall::Sound {
            world,
            position,
            sound: sound.to_owned(),
            volume,
            pitch,
        });
        Ok(())
    }

    fn knows_sound(&self, sound: &str) -> bool {
        self.sounds.lock().contains(sound)
    }

    fn send_packet(&self, client: ClientId, packet: &MockPacket) -> EmissionResult<()> {
        if self.rejected_clients.lock().contains(&client) {
            return Err(EmissionError::rejected(format!("connection {client} closed")));
        }
        self.calls.lock().push(HostCall::Packet { client, packet: packet.clone() });
        Ok(())
    }

    fn recipients(&self, world: WorldId) -> Vec<Recipient> {
        self.state.lock().recipients.get(&world).cloned().unwrap_or_default()
    }

    fn eye_location(&self, client: ClientId) -> Option<EyeLocation> {
        self.state.lock().eyes.get(&client).copied()
    }

    fn increment_container_state(&self, client: ClientId) -> Option<(i32, i32)> {
        let mut state = self.state.lock();
        let menu = state.menus.get_mut(&client)?;
        let state_id = menu.increment_state_id();
        Some((menu.container_id, state_id))
    }
}
