//! # Sound Resolver
//!
//! Gun configs name sounds freely, often with keys from a resource pack the
//! server does not have. A rejected key is mapped to a vanilla sound by
//! looking for keywords in it:
//!
//! | Lowercased key contains          | Fallback      |
//! |----------------------------------|---------------|
//! | `reload` and (`finish` or `end`) | loading end   |
//! | `reload`                         | loading start |
//! | `empty`                          | dry fire      |
//! | `explosion` or `explode`         | explosion     |
//! | `shoot` or `fire`                | shoot         |
//! | anything else                    | shoot         |
//!
//! Rules are checked top to bottom. A fallback that plays is logged at
//! `warn` every time; a fallback that fails for any reason is dropped
//! quietly.

use volley_shared::SoundPacket;

use crate::config::SoundFallbacks;
use crate::error::{EmissionError, EmissionResult};
use crate::host::EffectHost;

/// How a sound request ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoundOutcome {
    /// Played under the requested key.
    Played,
    /// Played under a fallback key.
    Fallback(String),
    /// Neither the requested key nor its fallback played.
    Dropped,
}

/// Sound key resolution with keyword fallback.
#[derive(Clone, Debug, Default)]
pub struct SoundResolver {
    fallbacks: SoundFallbacks,
}

impl SoundResolver {
    /// Creates a resolver with the given fallback keys.
    #[must_use]
    pub fn new(fallbacks: SoundFallbacks) -> Self {
        Self { fallbacks }
    }

    /// Fallback key for an identifier, without asking the host.
    #[must_use]
    pub fn fallback_key_for(&self, identifier: &str) -> &str {
        let key = identifier.to_lowercase();
        let has = |word: &str| key.contains(word);

        if has("reload") && (has("finish") || has("end")) {
            &self.fallbacks.loading_end
        } else if has("reload") {
            &self.fallbacks.loading_start
        } else if has("empty") {
            &self.fallbacks.dry_fire
        } else if has("explosion") || has("explode") {
            &self.fallbacks.explosion
        } else {
            // "shoot"/"fire" and the default land on the same key
            &self.fallbacks.shoot
        }
    }

    /// Key the host would play for `identifier`: the identifier itself if
    /// known, else its fallback if known, else `None`.
    #[must_use]
    pub fn resolve<'s, H: EffectHost>(&'s self, host: &H, identifier: &'s str) -> Option<&'s str> {
        if host.knows_sound(identifier) {
            return Some(identifier);
        }
        let fallback = self.fallback_key_for(identifier);
        host.knows_sound(fallback).then_some(fallback)
    }

    /// Plays a sound, retrying once with the fallback key if the host
    /// rejects the requested one. Any failure of the fallback drops the
    /// sound.
    ///
    /// # Errors
    ///
    /// Host errors for the requested key other than an unknown key are
    /// returned unchanged.
    pub fn play<H: EffectHost>(&self, host: &H, sound: &SoundPacket) -> EmissionResult<SoundOutcome> {
        let attempt = |key: &str| {
            host.play_sound(sound.world, sound.position, key, sound.volume, sound.pitch)
        };

        match attempt(&sound.sound) {
            Ok(()) => Ok(SoundOutcome::Played),
            Err(EmissionError::UnknownSound(_)) => {
                let fallback = self.fallback_key_for(&sound.sound);
                match attempt(fallback) {
                    Ok(()) => {
                        tracing::warn!(
                            requested = sound.sound.as_str(),
                            fallback,
                            "unknown sound, played fallback"
                        );
                        Ok(SoundOutcome::Fallback(fallback.to_owned()))
                    }
                    Err(_) => Ok(SoundOutcome::Dropped),
                }
            }
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, MockEffectHost};
    use volley_shared::constants::{
        SOUND_DRY_FIRE, SOUND_EXPLOSION, SOUND_LOADING_END, SOUND_LOADING_START, SOUND_SHOOT,
    };
    use volley_shared::Vec3;

    fn request(key: &str) -> SoundPacket {
        SoundPacket {
            sound: key.to_owned(),
            world: 0,
            position: Vec3::new(1.0, 2.0, 3.0),
            volume: 1.0,
            pitch: 1.2,
        }
    }

    #[test]
    fn test_fallback_rules() {
        let resolver = SoundResolver::default();
        let cases = [
            ("player_reload_end", SOUND_LOADING_END),
            ("gun.RELOAD.finish", SOUND_LOADING_END),
            ("reload_start", SOUND_LOADING_START),
            ("gun_empty_click", SOUND_DRY_FIRE),
            ("rocket_explosion", SOUND_EXPLOSION),
            ("grenade.explode", SOUND_EXPLOSION),
            ("rifle_shoot", SOUND_SHOOT),
            ("flamethrower_fire", SOUND_SHOOT),
            ("xyz_unknown", SOUND_SHOOT),
        ];
        for (identifier, expected) in cases {
            assert_eq!(resolver.fallback_key_for(identifier), expected, "{identifier}");
        }
    }

    #[test]
    fn test_rules_checked_in_order() {
        let resolver = SoundResolver::default();
        // "reload" beats "empty", "empty" beats "explode"
        assert_eq!(resolver.fallback_key_for("empty_reload"), SOUND_LOADING_START);
        assert_eq!(resolver.fallback_key_for("empty_explode"), SOUND_DRY_FIRE);
    }

    #[test]
    fn test_known_sound_plays_verbatim() {
        let host = MockEffectHost::new();
        host.add_sound("custom:ak47.shoot");
        let resolver = SoundResolver::default();

        let outcome = resolver.play(&host, &request("custom:ak47.shoot")).unwrap();
        assert_eq!(outcome, SoundOutcome::Played);
        assert_eq!(resolver.resolve(&host, "custom:ak47.shoot"), Some("custom:ak47.shoot"));
    }

    #[test]
    fn test_unknown_sound_falls_back() {
        let host = MockEffectHost::new();
        let resolver = SoundResolver::default();

        let outcome = resolver.play(&host, &request("player_reload_end")).unwrap();
        assert_eq!(outcome, SoundOutcome::Fallback(SOUND_LOADING_END.to_owned()));
        assert_eq!(
            host.calls(),
            vec![HostCall::Sound {
                world: 0,
                position: Vec3::new(1.0, 2.0, 3.0),
                sound: SOUND_LOADING_END.to_owned(),
                volume: 1.0,
                pitch: 1.2,
            }]
        );
    }

    #[test]
    fn test_double_failure_is_dropped() {
        let host = MockEffectHost::new();
        host.remove_sound(SOUND_DRY_FIRE);
        let resolver = SoundResolver::default();

        let outcome = resolver.play(&host, &request("gun_empty_click")).unwrap();
        assert_eq!(outcome, SoundOutcome::Dropped);
        assert!(host.calls().is_empty());
        assert_eq!(resolver.resolve(&host, "gun_empty_click"), None);
    }

    #[test]
    fn test_fallback_rejected_by_host_is_dropped() {
        let host = MockEffectHost::new();
        host.mute_sound(SOUND_SHOOT);
        let resolver = SoundResolver::default();

        let outcome = resolver.play(&host, &request("xyz_unknown")).unwrap();
        assert_eq!(outcome, SoundOutcome::Dropped);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_requested_key_rejection_is_returned() {
        let host = MockEffectHost::new();
        host.mute_sound(SOUND_EXPLOSION);
        let resolver = SoundResolver::default();

        let err = resolver.play(&host, &request(SOUND_EXPLOSION)).unwrap_err();
        assert!(matches!(err, EmissionError::HostRejected { .. }));
    }
}
