//! # Packet Assembly
//!
//! Turns field-level [`ClientboundPacket`] values into the host's own packet
//! objects. Constructor names moved between host releases, so each kind
//! resolves through a chain: the current name first, then the legacy one.
//!
//! | Kind             | Current                              | Legacy                              |
//! |------------------|--------------------------------------|-------------------------------------|
//! | BlockDestruction | `ClientboundBlockDestructionPacket`  | `PacketPlayOutBlockBreakAnimation`  |
//! | ContainerSetSlot | `ClientboundContainerSetSlotPacket`  | `PacketPlayOutSetSlot`              |
//! | LookAt           | `ClientboundPlayerLookAtPacket`      | `PacketPlayOutLookAt`               |

use std::sync::Arc;

use volley_shared::{ClientboundPacket, PacketKind};

use crate::accessor::{Binding, CompatibilityAccessor};
use crate::strategy::{AttributeKey, StrategyChain};

/// Builds a host packet from field values. `None` means the host rejected
/// the fields.
pub type PacketEncoder<P> = Arc<dyn Fn(&ClientboundPacket) -> Option<P> + Send + Sync>;

/// What the host runtime exposes for building packets.
pub trait PacketRuntime: Send + Sync {
    /// Host packet object.
    type Packet: Send + 'static;

    /// Finds a packet constructor by class name.
    fn packet_constructor(&self, name: &str) -> Option<PacketEncoder<Self::Packet>>;
}

/// Host constructor names for a packet kind, current first.
#[must_use]
pub const fn constructor_names(kind: PacketKind) -> (&'static str, &'static str) {
    match kind {
        PacketKind::BlockDestruction => {
            ("ClientboundBlockDestructionPacket", "PacketPlayOutBlockBreakAnimation")
        }
        PacketKind::ContainerSetSlot => {
            ("ClientboundContainerSetSlotPacket", "PacketPlayOutSetSlot")
        }
        PacketKind::LookAt => ("ClientboundPlayerLookAtPacket", "PacketPlayOutLookAt"),
    }
}

const fn attribute(kind: PacketKind) -> &'static str {
    match kind {
        PacketKind::BlockDestruction => "blockDestruction",
        PacketKind::ContainerSetSlot => "containerSetSlot",
        PacketKind::LookAt => "lookAt",
    }
}

/// Version-agnostic packet construction.
pub struct PacketAssembler<'a, R: PacketRuntime> {
    runtime: &'a R,
    accessor: &'a CompatibilityAccessor,
}

impl<'a, R: PacketRuntime> PacketAssembler<'a, R> {
    /// Uses the process-wide accessor.
    #[must_use]
    pub fn new(runtime: &'a R) -> Self {
        Self::with_accessor(runtime, CompatibilityAccessor::global())
    }

    /// Uses a specific accessor.
    #[must_use]
    pub fn with_accessor(runtime: &'a R, accessor: &'a CompatibilityAccessor) -> Self {
        Self { runtime, accessor }
    }

    /// Builds the host packet, or `None` if this release cannot build the
    /// kind or rejected the fields.
    #[must_use]
    pub fn assemble(&self, packet: &ClientboundPacket) -> Option<R::Packet> {
        let binding = self.encoder(packet.kind());
        let encode = binding.accessor()?;
        encode(packet)
    }

    /// Returns true if this release can build `kind`.
    #[must_use]
    pub fn supports(&self, kind: PacketKind) -> bool {
        self.encoder(kind).is_available()
    }

    fn encoder(&self, kind: PacketKind) -> Arc<Binding<PacketEncoder<R::Packet>>> {
        let runtime = self.runtime;
        let (current, legacy) = constructor_names(kind);
        let key = AttributeKey::new(std::any::type_name::<R::Packet>(), attribute(kind));
        self.accessor.binding(key, move || {
            StrategyChain::new()
                .primary_accessor(current, move || runtime.packet_constructor(current))
                .legacy_accessor(legacy, move || runtime.packet_constructor(legacy))
        })
    }
}
