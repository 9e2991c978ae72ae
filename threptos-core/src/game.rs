//! Per-cycle orchestration
//!
//! One [`Game`] value owns the compositor, the lifecycle machine, and the
//! menu cursor, and advances all three from a single cooperative context.
//! Each cycle: lifecycle tick if due (also while the panel sleeps), then
//! - with the screen on - button handling, animation advance, and a
//! visual reconciliation pass that patches exactly the regions whose
//! target state changed.

use crate::config::DeviceConfig;
use crate::gfx::atlas::{PetAnim, EGG_FRAME_COUNT};
use crate::gfx::{Compositor, DisplayedSprite, RenderState};
use crate::input::InputSnapshot;
use crate::life::{CareAction, Lifecycle, MenuState, Phase, PhaseChange};
use crate::time::{elapsed, Millis};
use crate::traits::{DisplaySink, Entropy};

/// The orchestrator.
pub struct Game<'a> {
    cfg: &'a DeviceConfig,
    gfx: Compositor<'a>,
    life: Lifecycle,
    menu: MenuState,
    pet_anim: PetAnim,
    pet_frame: u8,
    egg_frame: u8,
    last_tick: Millis,
    last_anim: Millis,
}

impl<'a> Game<'a> {
    pub fn new(cfg: &'a DeviceConfig, gfx: Compositor<'a>, now: Millis) -> Self {
        Self {
            cfg,
            gfx,
            life: Lifecycle::new(),
            menu: MenuState::new(),
            pet_anim: PetAnim::default(),
            pet_frame: 0,
            egg_frame: 0,
            last_tick: now,
            last_anim: now,
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.life
    }

    pub fn render_state(&self) -> RenderState {
        self.gfx.render_state()
    }

    /// Full-frame render at startup.
    pub fn render_initial<S: DisplaySink>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        let target = self.target_sprite();
        self.gfx.render_initial(sink, target)
    }

    /// Run one orchestrator cycle. Returns the phase change, if this
    /// cycle produced one.
    pub fn cycle<S: DisplaySink, E: Entropy>(
        &mut self,
        snap: &InputSnapshot,
        now: Millis,
        sink: &mut S,
        entropy: &mut E,
    ) -> Result<Option<PhaseChange>, S::Error> {
        let mut change = None;

        // The lifecycle runs on wall-clock time, screen on or off
        if elapsed(now, self.last_tick) >= self.cfg.timing.game_tick_ms {
            self.last_tick = now;
            if let Some(c) = self.life.tick() {
                self.apply_change(c);
                change = Some(c);
            }
        }

        if !snap.screen_on {
            // No patch work while dark
            return Ok(change);
        }

        // The wake gesture's presses were swallowed by the input source;
        // everything else about the cycle proceeds so stale visuals are
        // repaired below.
        if !snap.just_woke {
            let p = snap.pressed;
            if self.life.phase() == Phase::Waiting && p.next && p.back {
                if let Some(c) = self.life.start_egg(entropy) {
                    self.apply_change(c);
                    change = Some(c);
                }
            } else {
                if p.next {
                    self.menu.select_next();
                }
                if p.confirm {
                    if let Some(entry) = self.menu.confirm() {
                        if let Some(action) = CareAction::from_menu_entry(entry) {
                            // Ineffective care (asleep, dead) is simply dropped
                            let _ = self.life.apply_care(action);
                        }
                    }
                }
                if p.back {
                    self.menu.clear_selection();
                }
            }
        }

        if elapsed(now, self.last_anim) >= self.cfg.timing.sprite_frame_delay_ms {
            self.last_anim = now;
            self.pet_frame = (self.pet_frame + 1) % self.pet_anim.frame_count();
            self.egg_frame = (self.egg_frame + 1) % EGG_FRAME_COUNT;
        }

        // Reconcile: after these two calls the render state equals the
        // target state, whatever mixture of input, ticks, and sleep led
        // here. Menu bars and sprite window never overlap, so the order
        // is immaterial.
        self.gfx.update_menu_selection(sink, self.menu.selected())?;
        let target = self.target_sprite();
        self.gfx.update_sprite(sink, target)?;

        Ok(change)
    }

    /// Bookkeeping attached to phase transitions.
    fn apply_change(&mut self, change: PhaseChange) {
        match change {
            PhaseChange::EggLaid(_) => self.egg_frame = 0,
            PhaseChange::Hatched => self.pet_frame = 0,
            PhaseChange::Died => {}
            PhaseChange::Cleared => self.menu.clear_selection(),
        }
    }

    /// What the sprite window should show for the current phase.
    fn target_sprite(&self) -> DisplayedSprite {
        match self.life.phase() {
            Phase::Waiting | Phase::Dead => DisplayedSprite::None,
            Phase::Egg => match self.life.egg_variant() {
                Some(variant) => DisplayedSprite::Egg {
                    variant,
                    frame: self.egg_frame,
                },
                None => DisplayedSprite::None,
            },
            Phase::Alive => DisplayedSprite::Pet {
                anim: self.pet_anim,
                frame: self.pet_frame,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceConfig, SCRATCH_BYTES};
    use crate::gfx::Assets;
    use crate::input::PressSet;
    use crate::life::{DEATH_TICKS, EGG_HATCH_TICKS};
    use crate::testutil::{ScriptedEntropy, TestAssets, TestSink};

    static CFG: DeviceConfig = DeviceConfig::DEFAULT;

    fn awake(pressed: PressSet) -> InputSnapshot {
        InputSnapshot {
            pressed,
            screen_on: true,
            just_woke: false,
        }
    }

    fn idle() -> InputSnapshot {
        awake(PressSet::default())
    }

    const NEXT: PressSet = PressSet {
        next: true,
        confirm: false,
        back: false,
    };
    const CONFIRM: PressSet = PressSet {
        next: false,
        confirm: true,
        back: false,
    };
    const BACK: PressSet = PressSet {
        next: false,
        confirm: false,
        back: true,
    };
    const COMBO: PressSet = PressSet {
        next: true,
        confirm: false,
        back: true,
    };

    /// Test fixture owning the buffers a `Game` borrows.
    struct World {
        sink: TestSink,
        entropy: ScriptedEntropy,
        now: u32,
    }

    macro_rules! game {
        ($world:ident, $game:ident) => {
            let assets = TestAssets::new(&CFG);
            let mut storage = std::vec![0u8; CFG.frame_bytes()];
            let mut scratch = [0u8; SCRATCH_BYTES];
            let loaded = Assets::load(&CFG, &assets, &mut storage).unwrap();
            let gfx = Compositor::new(&CFG, loaded, &mut scratch);
            let mut $world = World {
                sink: TestSink::new(&CFG),
                entropy: ScriptedEntropy::new(&[3]),
                now: 0,
            };
            let mut $game = Game::new(&CFG, gfx, 0);
            $game.render_initial(&mut $world.sink).unwrap();
            $world.sink.clear_log();
        };
    }

    impl World {
        /// Run one cycle `dt` ms after the previous one.
        fn cycle(&mut self, game: &mut Game<'_>, snap: InputSnapshot, dt: u32) -> Option<PhaseChange> {
            self.now += dt;
            game.cycle(&snap, self.now, &mut self.sink, &mut self.entropy)
                .unwrap()
        }

        /// Run enough idle cycles for `n` lifecycle ticks, keeping only
        /// the last cycle's pushes in the log.
        fn run_ticks(&mut self, game: &mut Game<'_>, n: u32) -> Option<PhaseChange> {
            let mut last = None;
            for _ in 0..n {
                self.sink.clear_log();
                let change = self.cycle(game, idle(), CFG.timing.game_tick_ms);
                if change.is_some() {
                    last = change;
                }
            }
            last
        }
    }

    #[test]
    fn test_idle_cycle_pushes_nothing() {
        game!(world, game);
        world.cycle(&mut game, idle(), 80);
        assert!(world.sink.pushes.is_empty());
    }

    #[test]
    fn test_menu_navigation_patches_only_menu() {
        game!(world, game);

        world.cycle(&mut game, awake(NEXT), 80);
        assert_eq!(&world.sink.pushes[..], &[CFG.menu[0]]);
        assert_eq!(game.render_state().menu_selection, Some(0));

        world.sink.clear_log();
        world.cycle(&mut game, awake(NEXT), 80);
        assert_eq!(&world.sink.pushes[..], &[CFG.menu[0], CFG.menu[1]]);

        world.sink.clear_log();
        world.cycle(&mut game, awake(BACK), 80);
        assert_eq!(&world.sink.pushes[..], &[CFG.menu[1]]);
        assert_eq!(game.render_state().menu_selection, None);
    }

    #[test]
    fn test_start_combo_lays_egg_and_shows_it() {
        game!(world, game);
        let change = world.cycle(&mut game, awake(COMBO), 80);
        assert!(matches!(change, Some(PhaseChange::EggLaid(_))));
        assert_eq!(game.lifecycle().phase(), Phase::Egg);
        // The egg appears in the sprite window the same cycle
        assert_eq!(&world.sink.pushes[..], &[CFG.window.rect()]);
        assert!(matches!(
            game.render_state().sprite,
            DisplayedSprite::Egg { frame: 0, .. }
        ));
        // The combo does not also navigate the menu
        assert_eq!(game.render_state().menu_selection, None);
    }

    #[test]
    fn test_combo_outside_waiting_is_menu_input() {
        game!(world, game);
        world.cycle(&mut game, awake(COMBO), 80);

        // In Egg phase the same chord is ordinary navigation: Next moves,
        // Back clears, net effect no selection
        world.sink.clear_log();
        world.cycle(&mut game, awake(COMBO), 80);
        assert_eq!(game.lifecycle().phase(), Phase::Egg);
        assert_eq!(game.render_state().menu_selection, None);
    }

    #[test]
    fn test_egg_hatches_into_pet() {
        game!(world, game);
        world.cycle(&mut game, awake(COMBO), 80);

        let change = world.run_ticks(&mut game, EGG_HATCH_TICKS);
        assert_eq!(change, Some(PhaseChange::Hatched));
        assert_eq!(game.lifecycle().phase(), Phase::Alive);
        assert!(matches!(
            game.render_state().sprite,
            DisplayedSprite::Pet { .. }
        ));
    }

    #[test]
    fn test_pet_dies_and_board_clears() {
        game!(world, game);
        world.cycle(&mut game, awake(COMBO), 80);
        world.run_ticks(&mut game, EGG_HATCH_TICKS);

        // Select a menu entry so the clear has something to restore
        world.cycle(&mut game, awake(NEXT), 80);
        assert_eq!(game.render_state().menu_selection, Some(0));

        let change = world.run_ticks(&mut game, DEATH_TICKS);
        assert_eq!(change, Some(PhaseChange::Died));
        assert_eq!(game.lifecycle().phase(), Phase::Dead);
        // Sprite window restored on the death cycle
        assert_eq!(game.render_state().sprite, DisplayedSprite::None);

        let change = world.run_ticks(&mut game, 1);
        assert_eq!(change, Some(PhaseChange::Cleared));
        assert_eq!(game.lifecycle().phase(), Phase::Waiting);
        // Menu selection cleared with the board
        assert_eq!(game.render_state().menu_selection, None);
    }

    #[test]
    fn test_confirm_feeds_the_pet() {
        game!(world, game);
        world.cycle(&mut game, awake(COMBO), 80);
        world.run_ticks(&mut game, EGG_HATCH_TICKS);

        // Select entry 0 (Feed) and confirm it
        world.cycle(&mut game, awake(NEXT), 80);
        let hunger_before = game.lifecycle().pet().unwrap().hunger;
        world.cycle(&mut game, awake(CONFIRM), 80);
        assert!(game.lifecycle().pet().unwrap().hunger > hunger_before);
    }

    #[test]
    fn test_animation_advances_on_cadence() {
        game!(world, game);
        world.cycle(&mut game, awake(COMBO), 80);
        world.run_ticks(&mut game, EGG_HATCH_TICKS);
        world.sink.clear_log();

        // Under the animation period: no sprite push
        world.cycle(&mut game, idle(), 80);
        assert!(world.sink.pushes.is_empty());

        // Crossing it: one sprite push with the next frame
        world.cycle(&mut game, idle(), CFG.timing.sprite_frame_delay_ms);
        assert_eq!(&world.sink.pushes[..], &[CFG.window.rect()]);
    }

    #[test]
    fn test_ticks_advance_while_screen_off() {
        game!(world, game);
        world.cycle(&mut game, awake(COMBO), 80);

        let dark = InputSnapshot {
            pressed: PressSet::default(),
            screen_on: false,
            just_woke: false,
        };
        world.sink.clear_log();
        let mut change = None;
        for _ in 0..EGG_HATCH_TICKS {
            if let Some(c) = world.cycle(&mut game, dark, CFG.timing.game_tick_ms) {
                change = Some(c);
            }
        }
        // The egg hatched in the dark, with zero patch work
        assert_eq!(change, Some(PhaseChange::Hatched));
        assert_eq!(game.lifecycle().phase(), Phase::Alive);
        assert!(world.sink.pushes.is_empty());
        // The panel still believes it shows the egg
        assert!(matches!(game.render_state().sprite, DisplayedSprite::Egg { .. }));

        // The wake cycle repairs the stale sprite window
        let woke = InputSnapshot {
            pressed: PressSet::default(),
            screen_on: true,
            just_woke: true,
        };
        world.cycle(&mut game, woke, 80);
        assert!(matches!(game.render_state().sprite, DisplayedSprite::Pet { .. }));
        assert_eq!(&world.sink.pushes[..], &[CFG.window.rect()]);
    }

    #[test]
    fn test_wake_cycle_ignores_presses() {
        game!(world, game);
        // A malformed snapshot claiming presses on the wake cycle still
        // must not navigate
        let woke = InputSnapshot {
            pressed: NEXT,
            screen_on: true,
            just_woke: true,
        };
        world.cycle(&mut game, woke, 80);
        assert_eq!(game.render_state().menu_selection, None);
    }
}
