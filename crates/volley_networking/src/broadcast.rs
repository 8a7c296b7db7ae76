//! # Spatial Broadcast Filter
//!
//! Picks which connected clients should receive a raw packet: everyone whose
//! position is within `max_distance` of the origin, boundary included.
//!
//! Distances are compared squared, so no square root runs per recipient.
//! Recipient lists are snapshots borrowed from the host; nothing here
//! mutates or keeps them.

use volley_shared::{ClientId, Vec3};

use crate::error::EmissionResult;

/// A connected client and where it stands right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recipient {
    /// Client id
    pub id: ClientId,
    /// Position snapshot
    pub position: Vec3,
}

impl Recipient {
    /// Creates a recipient.
    #[must_use]
    pub const fn new(id: ClientId, position: Vec3) -> Self {
        Self { id, position }
    }
}

/// Recipients within `max_distance` of `origin`, in input order. A negative
/// or NaN distance matches nobody.
pub fn filter_within<'r>(
    recipients: &'r [Recipient],
    origin: Vec3,
    max_distance: f64,
) -> impl Iterator<Item = &'r Recipient> + 'r {
    let in_range = max_distance >= 0.0;
    let max_distance_squared = max_distance * max_distance;
    recipients
        .iter()
        .filter(move |r| in_range && r.position.distance_squared(origin) <= max_distance_squared)
}

/// Per-broadcast delivery counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Recipients the packet was handed to
    pub sent: usize,
    /// Recipients whose send failed
    pub failed: usize,
}

/// Calls `send` for every recipient within range. A failed send is counted
/// and logged; it does not stop the others.
pub fn broadcast_within_distance<F>(
    recipients: &[Recipient],
    origin: Vec3,
    max_distance: f64,
    mut send: F,
) -> BroadcastReport
where
    F: FnMut(ClientId) -> EmissionResult<()>,
{
    let mut report = BroadcastReport::default();
    for recipient in filter_within(recipients, origin, max_distance) {
        match send(recipient.id) {
            Ok(()) => report.sent += 1,
            Err(error) => {
                report.failed += 1;
                tracing::trace!(client = recipient.id, %error, "broadcast send failed");
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmissionError;

    fn ids<'r>(it: impl Iterator<Item = &'r Recipient>) -> Vec<ClientId> {
        it.map(|r| r.id).collect()
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let recipients = [
            Recipient::new(1, Vec3::new(64.0, 0.0, 0.0)),
            Recipient::new(2, Vec3::new(64.0001, 0.0, 0.0)),
            Recipient::new(3, Vec3::new(0.0, -64.0, 0.0)),
        ];
        assert_eq!(ids(filter_within(&recipients, Vec3::ZERO, 64.0)), vec![1, 3]);
    }

    #[test]
    fn test_order_preserved() {
        let recipients: Vec<_> = (0..10)
            .rev()
            .map(|i| Recipient::new(i, Vec3::new(f64::from(i as u32), 0.0, 0.0)))
            .collect();
        assert_eq!(ids(filter_within(&recipients, Vec3::ZERO, 4.5)), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_diagonal_distance() {
        // (3, 4, 12) is exactly 13 away
        let recipients = [Recipient::new(7, Vec3::new(3.0, 4.0, 12.0))];
        assert_eq!(ids(filter_within(&recipients, Vec3::ZERO, 13.0)).len(), 1);
        assert_eq!(ids(filter_within(&recipients, Vec3::ZERO, 12.999)).len(), 0);
    }

    #[test]
    fn test_negative_distance_matches_nobody() {
        let recipients = [Recipient::new(1, Vec3::ZERO), Recipient::new(2, Vec3::splat(5.0))];
        assert!(ids(filter_within(&recipients, Vec3::ZERO, -10.0)).is_empty());
        assert!(ids(filter_within(&recipients, Vec3::ZERO, f64::NAN)).is_empty());
        assert_eq!(ids(filter_within(&recipients, Vec3::ZERO, 0.0)), vec![1]);
    }

    #[test]
    fn test_failed_send_does_not_stop_broadcast() {
        let recipients = [
            Recipient::new(1, Vec3::ZERO),
            Recipient::new(2, Vec3::ZERO),
            Recipient::new(3, Vec3::ZERO),
            Recipient::new(4, Vec3::splat(100.0)),
        ];
        let mut attempted = Vec::new();
        let report = broadcast_within_distance(&recipients, Vec3::ZERO, 10.0, |id| {
            attempted.push(id);
            if id == 2 {
                Err(EmissionError::RecipientGone(id))
            } else {
                Ok(())
            }
        });

        assert_eq!(attempted, vec![1, 2, 3]);
        assert_eq!(report, BroadcastReport { sent: 2, failed: 1 });
    }
}
