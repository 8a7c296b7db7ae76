//! Block crack overlay broadcast.

use volley_shared::{BlockCrack, BlockDestructionPacket, ClientboundPacket};

use super::PacketSender;
use crate::broadcast::{broadcast_within_distance, BroadcastReport};
use crate::error::EmissionResult;
use crate::host::EffectHost;

impl<H: EffectHost> PacketSender<'_, H> {
    /// Sends a crack overlay for `crack.block` to every client within
    /// `radius` of the block's corner. The packet is built once.
    ///
    /// # Errors
    ///
    /// Only if the packet cannot be built; per-recipient failures are
    /// counted in the report.
    pub fn broadcast_block_crack(&self, crack: &BlockCrack, radius: f64) -> EmissionResult<BroadcastReport> {
        let packet = ClientboundPacket::BlockDestruction(BlockDestructionPacket::new(
            crack.entity_id,
            crack.block,
            crack.stage,
        ));
        let built = self.assemble(&packet)?;
        let recipients = self.host.recipients(crack.world);
        Ok(broadcast_within_distance(&recipients, crack.block.corner(), radius, |client| {
            self.host.send_packet(client, &built)
        }))
    }
}
