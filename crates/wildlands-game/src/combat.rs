//! Mob damage rolls.
//!
//! Only the mob-to-player side lives here. Player-to-mob damage arrives
//! already computed through the admin surface.

use rand::rngs::StdRng;
use rand::Rng;
use wildlands_world::MobDefinition;

/// Decides how hard a mob hits.
pub trait DamageModel: Send {
    fn roll(&self, attacker: &MobDefinition, rng: &mut StdRng) -> u32;
}

// ---------------------------------------------------------------------------
// Strength roll
// ---------------------------------------------------------------------------

/// `floor(strength * U(min_factor, max_factor))`.
#[derive(Debug, Clone, Copy)]
pub struct StrengthRoll {
    pub min_factor: f32,
    pub max_factor: f32,
}

impl Default for StrengthRoll {
    fn default() -> Self {
        Self {
            min_factor: 0.8,
            max_factor: 1.2,
        }
    }
}

impl StrengthRoll {
    /// Largest value this model can produce for a mob.
    pub fn max_hit(&self, attacker: &MobDefinition) -> u32 {
        (attacker.stats.strength as f32 * self.max_factor).floor() as u32
    }
}

impl DamageModel for StrengthRoll {
    fn roll(&self, attacker: &MobDefinition, rng: &mut StdRng) -> u32 {
        let spread = (self.max_factor - self.min_factor).max(0.0);
        let factor = self.min_factor + rng.gen::<f32>() * spread;
        (attacker.stats.strength as f32 * factor).floor().max(0.0) as u32
    }
}

// ---------------------------------------------------------------------------
// Fixed damage
// ---------------------------------------------------------------------------

/// Always hits for the same amount.
#[derive(Debug, Clone, Copy)]
pub struct FixedDamage(pub u32);

impl DamageModel for FixedDamage {
    fn roll(&self, _attacker: &MobDefinition, _rng: &mut StdRng) -> u32 {
        self.0
    }
}
