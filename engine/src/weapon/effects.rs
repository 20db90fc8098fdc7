//! Weapon Effect Sink
//!
//! Fire-and-forget presentation hooks: sound, particles and animation
//! montages. The core never waits on or inspects their outcome.

use glam::Vec3;

use super::MuzzleSocket;

/// Receiver for the presentation side of a shot.
pub trait WeaponEffects {
    fn play_sound(&mut self, asset: &str, location: Vec3);
    fn spawn_muzzle_flash(&mut self, asset: &str, socket: &MuzzleSocket);
    fn spawn_impact(&mut self, asset: &str, location: Vec3);
    /// Beam particle running from `start` to its `end` target parameter.
    fn spawn_beam(&mut self, asset: &str, start: Vec3, end: Vec3);
    fn play_montage_section(&mut self, asset: &str, section: &str);
}

/// One recorded effect.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectEvent {
    Sound { asset: String, location: Vec3 },
    MuzzleFlash { asset: String, socket: MuzzleSocket },
    Impact { asset: String, location: Vec3 },
    Beam { asset: String, start: Vec3, end: Vec3 },
    Montage { asset: String, section: String },
}

impl EffectEvent {
    /// Short kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EffectEvent::Sound { .. } => "sound",
            EffectEvent::MuzzleFlash { .. } => "muzzle_flash",
            EffectEvent::Impact { .. } => "impact",
            EffectEvent::Beam { .. } => "beam",
            EffectEvent::Montage { .. } => "montage",
        }
    }
}

/// Records every effect in order. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    events: Vec<EffectEvent>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EffectEvent] {
        &self.events
    }

    /// Take every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl WeaponEffects for EffectLog {
    fn play_sound(&mut self, asset: &str, location: Vec3) {
        self.events.push(EffectEvent::Sound {
            asset: asset.to_string(),
            location,
        });
    }

    fn spawn_muzzle_flash(&mut self, asset: &str, socket: &MuzzleSocket) {
        self.events.push(EffectEvent::MuzzleFlash {
            asset: asset.to_string(),
            socket: *socket,
        });
    }

    fn spawn_impact(&mut self, asset: &str, location: Vec3) {
        self.events.push(EffectEvent::Impact {
            asset: asset.to_string(),
            location,
        });
    }

    fn spawn_beam(&mut self, asset: &str, start: Vec3, end: Vec3) {
        self.events.push(EffectEvent::Beam {
            asset: asset.to_string(),
            start,
            end,
        });
    }

    fn play_montage_section(&mut self, asset: &str, section: &str) {
        self.events.push(EffectEvent::Montage {
            asset: asset.to_string(),
            section: section.to_string(),
        });
    }
}
