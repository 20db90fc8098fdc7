//! Weapon Module
//!
//! Hit-scan firing: muzzle socket placement, the fire sequence and the
//! effect sink it reports to.

pub mod effects;
pub mod fire;
pub mod socket;

pub use effects::{EffectEvent, EffectLog, WeaponEffects};
pub use fire::{DEFAULT_FIRE_SECTION, FireContext, ShotReport, WeaponConfig, fire};
pub use socket::MuzzleSocket;
