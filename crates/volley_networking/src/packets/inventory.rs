//! Single-slot inventory updates.

use volley_shared::{ClientId, ClientboundPacket, ContainerSetSlotPacket, ItemPayload, PacketKind};

use super::PacketSender;
use crate::error::{EmissionError, EmissionResult};
use crate::host::EffectHost;

impl<H: EffectHost> PacketSender<'_, H> {
    /// Resends `slot` of the client's open inventory menu with `item`.
    ///
    /// The menu's state id is advanced first, the same way the host does for
    /// its own slot updates, so the client accepts the packet. A host that
    /// cannot build the packet leaves the menu untouched.
    ///
    /// # Errors
    ///
    /// [`EmissionError::Unsupported`] if the packet cannot be built,
    /// [`EmissionError::RecipientGone`] if the client has no menu, otherwise
    /// send errors.
    pub fn send_item_slot_change(&self, client: ClientId, slot: i32, item: &ItemPayload) -> EmissionResult<()> {
        if !self.assembler.supports(PacketKind::ContainerSetSlot) {
            return Err(EmissionError::Unsupported(PacketKind::ContainerSetSlot));
        }
        let (container_id, state_id) = self
            .host
            .increment_container_state(client)
            .ok_or(EmissionError::RecipientGone(client))?;
        let packet = ClientboundPacket::ContainerSetSlot(ContainerSetSlotPacket {
            container_id,
            state_id,
            slot,
            item: item.clone(),
        });
        self.send_to(client, &packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockEffectHost;
    use volley_compat::{CompatibilityAccessor, MockPacketRuntime};
    use volley_shared::{CompoundTag, EyeLocation, Tag, Vec3};

    fn eye() -> EyeLocation {
        EyeLocation { position: Vec3::ZERO, yaw: 0.0, pitch: 0.0 }
    }

    #[test]
    fn test_slot_change_increments_state() {
        let host = MockEffectHost::new();
        host.add_player(0, 8, eye(), 3);
        let accessor = CompatibilityAccessor::new();
        let sender = PacketSender::with_accessor(&host, &accessor);

        let mut tag = CompoundTag::new();
        tag.put("model", Tag::int(12));
        let item = ItemPayload::new("minecraft:iron_horse_armor", 1).with_tag(tag);

        sender.send_item_slot_change(8, 36, &item).unwrap();
        sender.send_item_slot_change(8, 36, &item).unwrap();

        let packets = host.packets();
        assert_eq!(packets.len(), 2);
        assert_eq!(
            packets[1].1.packet,
            ClientboundPacket::ContainerSetSlot(ContainerSetSlotPacket {
                container_id: 3,
                state_id: 2,
                slot: 36,
                item,
            })
        );
        assert_eq!(host.container_state(8), Some(2));
    }

    #[test]
    fn test_legacy_constructor() {
        let host = MockEffectHost::with_packet_runtime(MockPacketRuntime::legacy());
        host.add_player(0, 8, eye(), 0);
        let accessor = CompatibilityAccessor::new();
        let sender = PacketSender::with_accessor(&host, &accessor);

        sender.send_item_slot_change(8, 0, &ItemPayload::new("minecraft:stick", 1)).unwrap();
        assert_eq!(host.packets()[0].1.constructor, "PacketPlayOutSetSlot");
    }

    #[test]
    fn test_unknown_client() {
        let host = MockEffectHost::new();
        let accessor = CompatibilityAccessor::new();
        let sender = PacketSender::with_accessor(&host, &accessor);

        let err = sender
            .send_item_slot_change(1, 0, &ItemPayload::new("minecraft:stick", 1))
            .unwrap_err();
        assert_eq!(err, EmissionError::RecipientGone(1));
    }

    #[test]
    fn test_unsupported_host_keeps_state_id() {
        let host = MockEffectHost::with_packet_runtime(MockPacketRuntime::with_constructors(&[]));
        host.add_player(0, 8, eye(), 0);
        let accessor = CompatibilityAccessor::new();
        let sender = PacketSender::with_accessor(&host, &accessor);

        for _ in 0..3 {
            let err = sender
                .send_item_slot_change(8, 0, &ItemPayload::new("minecraft:stick", 1))
                .unwrap_err();
            assert_eq!(err, EmissionError::Unsupported(PacketKind::ContainerSetSlot));
        }
        assert!(host.packets().is_empty());
        assert_eq!(host.container_state(8), Some(0));
    }
}
