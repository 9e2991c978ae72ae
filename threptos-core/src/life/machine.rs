//! Lifecycle state machine
//!
//! Phases cycle `Waiting -> Egg -> Alive -> Dead -> Waiting`. All
//! transitions happen either on a lifecycle tick or on the start combo;
//! the machine never looks at the clock itself, the orchestrator decides
//! when a tick is due.

use crate::gfx::atlas::EggVariant;
use crate::life::pet::{CareAction, PetStats};
use crate::traits::Entropy;

/// Ticks before a laid egg hatches (~60 s at the 600 ms tick).
pub const EGG_HATCH_TICKS: u32 = 100;

/// Ticks a pet lives after hatching.
pub const DEATH_TICKS: u32 = 100;

/// Lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No pet; the start combo lays an egg.
    Waiting,
    /// Egg on screen, hatch countdown running.
    Egg,
    /// Pet on screen, stats decaying.
    Alive,
    /// One-tick transient before returning to `Waiting`.
    Dead,
}

/// Emitted when a tick or the start combo changes phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseChange {
    EggLaid(EggVariant),
    Hatched,
    Died,
    /// The board was cleared; back to `Waiting`.
    Cleared,
}

/// The lifecycle state machine. Owns the pet.
pub struct Lifecycle {
    phase: Phase,
    /// Ticks spent in the current phase; reset on every transition.
    phase_ticks: u32,
    egg: Option<EggVariant>,
    pet: Option<PetStats>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            phase_ticks: 0,
            egg: None,
            pet: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_ticks(&self) -> u32 {
        self.phase_ticks
    }

    /// The current egg, present only during `Egg`.
    pub fn egg_variant(&self) -> Option<EggVariant> {
        self.egg
    }

    /// The pet, present during `Alive` and the `Dead` transient.
    pub fn pet(&self) -> Option<&PetStats> {
        self.pet.as_ref()
    }

    /// Start incubation: `Waiting -> Egg` with a random variant. No-op in
    /// any other phase.
    pub fn start_egg(&mut self, entropy: &mut impl Entropy) -> Option<PhaseChange> {
        if self.phase != Phase::Waiting {
            return None;
        }
        let variant = EggVariant::pick(entropy);
        self.phase = Phase::Egg;
        self.phase_ticks = 0;
        self.egg = Some(variant);
        Some(PhaseChange::EggLaid(variant))
    }

    /// Advance one lifecycle tick.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        match self.phase {
            Phase::Waiting => {
                self.phase_ticks += 1;
                None
            }
            Phase::Egg => {
                self.phase_ticks += 1;
                if self.phase_ticks >= EGG_HATCH_TICKS {
                    self.phase = Phase::Alive;
                    self.phase_ticks = 0;
                    self.egg = None;
                    self.pet = Some(PetStats::hatchling());
                    Some(PhaseChange::Hatched)
                } else {
                    None
                }
            }
            Phase::Alive => {
                self.phase_ticks += 1;
                if let Some(pet) = self.pet.as_mut() {
                    pet.tick();
                    if pet.age_ticks >= DEATH_TICKS {
                        pet.is_alive = false;
                        self.phase = Phase::Dead;
                        self.phase_ticks = 0;
                        return Some(PhaseChange::Died);
                    }
                }
                None
            }
            Phase::Dead => {
                self.phase = Phase::Waiting;
                self.phase_ticks = 0;
                self.pet = None;
                Some(PhaseChange::Cleared)
            }
        }
    }

    /// Apply a care operation to the living pet. Returns whether it had
    /// any effect.
    pub fn apply_care(&mut self, action: CareAction) -> bool {
        match (self.phase, self.pet.as_mut()) {
            (Phase::Alive, Some(pet)) => pet.apply(action),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::pet::EvolutionStage;
    use crate::testutil::ScriptedEntropy;

    #[test]
    fn test_full_lifecycle_walk() {
        let mut life = Lifecycle::new();
        let mut entropy = ScriptedEntropy::new(&[7]);
        assert_eq!(life.phase(), Phase::Waiting);
        assert!(life.pet().is_none());

        // Start combo lays an egg with phase_ticks reset
        let change = life.start_egg(&mut entropy);
        assert!(matches!(change, Some(PhaseChange::EggLaid(_))));
        assert_eq!(life.phase(), Phase::Egg);
        assert_eq!(life.phase_ticks(), 0);
        assert!(life.egg_variant().is_some());

        // Exactly EGG_HATCH_TICKS ticks later it hatches
        for _ in 0..EGG_HATCH_TICKS - 1 {
            assert_eq!(life.tick(), None);
        }
        assert_eq!(life.tick(), Some(PhaseChange::Hatched));
        assert_eq!(life.phase(), Phase::Alive);
        assert_eq!(life.phase_ticks(), 0);
        assert!(life.egg_variant().is_none());

        // Hatchling baseline
        let pet = life.pet().unwrap();
        assert_eq!(pet.hunger, 0);
        assert_eq!(pet.happiness, 0);
        assert_eq!(pet.age_ticks, 0);
        assert!(pet.is_alive);
        assert_eq!(pet.evolution_stage, EvolutionStage::Baby);

        // Lives exactly DEATH_TICKS ticks
        for _ in 0..DEATH_TICKS - 1 {
            assert_eq!(life.tick(), None);
        }
        assert_eq!(life.tick(), Some(PhaseChange::Died));
        assert_eq!(life.phase(), Phase::Dead);
        assert!(!life.pet().unwrap().is_alive);

        // Dead is a one-tick transient
        assert_eq!(life.tick(), Some(PhaseChange::Cleared));
        assert_eq!(life.phase(), Phase::Waiting);
        assert!(life.pet().is_none());
    }

    #[test]
    fn test_start_egg_only_from_waiting() {
        let mut life = Lifecycle::new();
        let mut entropy = ScriptedEntropy::new(&[0]);
        life.start_egg(&mut entropy).unwrap();
        assert_eq!(life.start_egg(&mut entropy), None);
        assert_eq!(life.phase(), Phase::Egg);

        // Still refused while alive
        for _ in 0..EGG_HATCH_TICKS {
            life.tick();
        }
        assert_eq!(life.phase(), Phase::Alive);
        assert_eq!(life.start_egg(&mut entropy), None);
    }

    #[test]
    fn test_care_only_while_alive() {
        let mut life = Lifecycle::new();
        let mut entropy = ScriptedEntropy::new(&[0]);
        assert!(!life.apply_care(CareAction::Feed));

        life.start_egg(&mut entropy);
        assert!(!life.apply_care(CareAction::Feed));

        for _ in 0..EGG_HATCH_TICKS {
            life.tick();
        }
        assert!(life.apply_care(CareAction::Feed));
        assert_eq!(life.pet().unwrap().hunger, 2_000);
    }

    #[test]
    fn test_egg_variant_follows_entropy() {
        // raw = 1 -> color index 1 (Red), (raw >> 8) % 2 == 0 -> Small
        let mut life = Lifecycle::new();
        let mut entropy = ScriptedEntropy::new(&[1]);
        life.start_egg(&mut entropy);
        let variant = life.egg_variant().unwrap();
        assert_eq!(variant.cell(0), (1, 0));
    }

    #[test]
    fn test_waiting_counts_phase_ticks() {
        let mut life = Lifecycle::new();
        assert_eq!(life.tick(), None);
        assert_eq!(life.tick(), None);
        assert_eq!(life.phase_ticks(), 2);
    }
}
