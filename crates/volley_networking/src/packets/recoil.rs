//! Visual recoil through look-at packets.
//!
//! The client is told to look at a point far along its rotated view
//! direction, which snaps the camera by the recoil delta without moving the
//! player.

use volley_shared::{ClientId, ClientboundPacket, LookAtPacket, Vec3};

use super::PacketSender;
use crate::error::{EmissionError, EmissionResult};
use crate::host::EffectHost;

impl<H: EffectHost> PacketSender<'_, H> {
    /// Rotates `client`'s view by `(horizontal, vertical)` degrees relative
    /// to its current eye rotation. The target sits `look_distance` along
    /// the new direction.
    ///
    /// # Errors
    ///
    /// [`EmissionError::RecipientGone`] if the client has no player, or
    /// any error from [`send_look_at`](Self::send_look_at).
    pub fn send_recoil_relative(
        &self,
        client: ClientId,
        horizontal: f32,
        vertical: f32,
        look_distance: f64,
    ) -> EmissionResult<()> {
        let eye = self
            .host
            .eye_location(client)
            .ok_or(EmissionError::RecipientGone(client))?;
        let direction = Vec3::from_rotation(eye.yaw + horizontal, eye.pitch + vertical);
        self.send_look_at(client, eye.position + direction * look_distance)
    }

    /// Makes `client` look at `target` with its eyes.
    ///
    /// # Errors
    ///
    /// If the look-at packet cannot be built or sent.
    pub fn send_look_at(&self, client: ClientId, target: Vec3) -> EmissionResult<()> {
        self.send_to(client, &ClientboundPacket::LookAt(LookAtPacket::eyes(target)))
    }
}
