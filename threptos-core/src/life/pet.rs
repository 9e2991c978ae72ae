//! Pet statistics and care operations
//!
//! Stats are fixed-point centi-units: `10_000` means `100.00`. Integer
//! units keep per-tick decay exact on a soft-float core.

/// Upper bound of every stat (100.00).
pub const STAT_MAX: u16 = 10_000;

/// Per-tick decay while awake.
const HUNGER_DECAY: u16 = 10;
const HAPPINESS_DECAY: u16 = 5;
const ENERGY_DECAY: u16 = 2;

/// Per-tick energy regeneration while sleeping.
const SLEEP_ENERGY_REGEN: u16 = 20;

/// Care operation effects.
const FEED_HUNGER: u16 = 2_000;
const PLAY_HAPPINESS: u16 = 1_500;
const PLAY_ENERGY_COST: u16 = 500;
const TRAIN_DISCIPLINE: u16 = 500;
const TRAIN_HAPPINESS_COST: u16 = 500;

/// Growth stages. Only `Baby` is reachable today; the rest are the
/// recorded evolution path the care-mistake counter will eventually feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EvolutionStage {
    Egg,
    Baby,
    Child,
    Teen,
    Adult,
}

/// Care operations reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CareAction {
    Feed,
    Play,
    Train,
    ToggleSleep,
    Heal,
}

impl CareAction {
    /// Map a confirmed menu entry to its care operation. Entries without
    /// an assigned operation confirm to nothing.
    pub const fn from_menu_entry(entry: u8) -> Option<Self> {
        match entry {
            0 => Some(CareAction::Feed),
            1 => Some(CareAction::Play),
            3 => Some(CareAction::ToggleSleep),
            6 => Some(CareAction::Train),
            7 => Some(CareAction::Heal),
            _ => None,
        }
    }
}

/// The pet's mutable state. Owned by the lifecycle machine; mutated only
/// through [`PetStats::tick`] and the care operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PetStats {
    pub hunger: u16,
    pub happiness: u16,
    pub discipline: u16,
    pub energy: u16,
    /// Ticks lived since hatching.
    pub age_ticks: u32,
    pub is_sleeping: bool,
    pub is_sick: bool,
    pub is_alive: bool,
    pub evolution_stage: EvolutionStage,
    /// Ticks that ended with hunger or happiness at zero. Recorded for
    /// the future evolution path; nothing consults it yet.
    pub care_mistakes: u16,
}

impl PetStats {
    /// A freshly hatched pet: all stats at zero, ready to be cared up.
    pub const fn hatchling() -> Self {
        Self {
            hunger: 0,
            happiness: 0,
            discipline: 0,
            energy: 0,
            age_ticks: 0,
            is_sleeping: false,
            is_sick: false,
            is_alive: true,
            evolution_stage: EvolutionStage::Baby,
            care_mistakes: 0,
        }
    }

    /// One lifecycle tick: age, stat decay (or sleep regeneration), and
    /// the care-mistake check.
    pub fn tick(&mut self) {
        if !self.is_alive {
            return;
        }
        self.age_ticks += 1;

        if !self.is_sleeping {
            self.hunger = self.hunger.saturating_sub(HUNGER_DECAY);
            self.happiness = self.happiness.saturating_sub(HAPPINESS_DECAY);
            self.energy = self.energy.saturating_sub(ENERGY_DECAY);
        } else {
            self.energy = (self.energy + SLEEP_ENERGY_REGEN).min(STAT_MAX);
        }

        if self.hunger == 0 || self.happiness == 0 {
            self.care_mistakes = self.care_mistakes.saturating_add(1);
        }
    }

    /// Apply a care operation. Returns whether it had any effect; callers
    /// must check before assuming state changed.
    pub fn apply(&mut self, action: CareAction) -> bool {
        if !self.is_alive {
            return false;
        }
        if action == CareAction::ToggleSleep {
            self.is_sleeping = !self.is_sleeping;
            return true;
        }
        if self.is_sleeping {
            return false;
        }
        match action {
            CareAction::Feed => {
                self.hunger = (self.hunger + FEED_HUNGER).min(STAT_MAX);
            }
            CareAction::Play => {
                self.happiness = (self.happiness + PLAY_HAPPINESS).min(STAT_MAX);
                self.energy = self.energy.saturating_sub(PLAY_ENERGY_COST);
            }
            CareAction::Train => {
                self.discipline = (self.discipline + TRAIN_DISCIPLINE).min(STAT_MAX);
                self.happiness = self.happiness.saturating_sub(TRAIN_HAPPINESS_COST);
            }
            CareAction::Heal => {
                self.is_sick = false;
            }
            CareAction::ToggleSleep => unreachable!(),
        }
        true
    }
}
