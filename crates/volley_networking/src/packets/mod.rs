//! # Packet Senders
//!
//! Raw packets that bypass the host's own effect APIs: block crack
//! overlays, recoil look-at packets and single-slot inventory updates.
//!
//! Packets are built through a [`PacketAssembler`], so a host release that
//! lacks a packet class turns the send into [`EmissionError::Unsupported`]
//! instead of a crash.

mod block_crack;
mod inventory;
mod recoil;

use volley_compat::{CompatibilityAccessor, PacketAssembler};
use volley_shared::{ClientId, ClientboundPacket};

use crate::error::{EmissionError, EmissionResult};
use crate::host::EffectHost;

/// Builds and sends client-bound packets through a host.
pub struct PacketSender<'a, H: EffectHost> {
    host: &'a H,
    assembler: PacketAssembler<'a, H>,
}

impl<'a, H: EffectHost> PacketSender<'a, H> {
    /// Sender using the process-wide compatibility accessor.
    #[must_use]
    pub fn new(host: &'a H) -> Self {
        Self::with_accessor(host, CompatibilityAccessor::global())
    }

    /// Sender using a specific accessor.
    #[must_use]
    pub fn with_accessor(host: &'a H, accessor: &'a CompatibilityAccessor) -> Self {
        Self {
            host,
            assembler: PacketAssembler::with_accessor(host, accessor),
        }
    }

    /// Builds the host packet for `packet`.
    ///
    /// # Errors
    ///
    /// [`EmissionError::Unsupported`] if this host release cannot build it.
    pub fn assemble(&self, packet: &ClientboundPacket) -> EmissionResult<H::Packet> {
        self.assembler
            .assemble(packet)
            .ok_or(EmissionError::Unsupported(packet.kind()))
    }

    /// Builds `packet` and sends it to one client.
    ///
    /// # Errors
    ///
    /// As [`assemble`](Self::assemble), or the host's send error.
    pub fn send_to(&self, client: ClientId, packet: &ClientboundPacket) -> EmissionResult<()> {
        let built = self.assemble(packet)?;
        self.host.send_packet(client, &built)
    }
}
