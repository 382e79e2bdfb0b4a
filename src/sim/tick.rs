//! Fixed timestep simulation tick
//!
//! Moves every entity, applies collision rules and updates score, lives and
//! game-over. Spawning is not part of the tick (see `spawn`).

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Held-key snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Doubles movement speed
    pub boost: bool,
    /// Raise the shield if it is ready
    pub shield: bool,
}

impl TickInput {
    /// Unit-per-axis movement direction (opposing keys cancel)
    fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// Advance the game state by one tick at the current `state.now_ms`
///
/// Does nothing once the run is over.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.game_over {
        return events;
    }

    let now = state.now_ms;
    state.player.shield.update(now);

    // Player movement
    let speed = if input.boost {
        state.player.speed * state.tuning.boost_multiplier
    } else {
        state.player.speed
    };
    state
        .player
        .move_clamped(input.direction() * speed, GameState::bounds());

    // Shield activation
    if input.shield && state.player.shield.try_activate(now) {
        log::debug!("Shield raised at {}ms", now);
        events.push(GameEvent::ShieldRaised);
    }

    update_asteroids(state, &mut events);
    if state.game_over {
        return events;
    }
    update_orbs(state, &mut events);
    update_ufos(state);
    update_stars(state);

    events
}

/// Fall, recycle and hurt the player. Stops at the hit that ends the run.
fn update_asteroids(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for i in 0..state.asteroids.len() {
        state.asteroids[i].fall();
        if state.asteroids[i].exited(PLAYFIELD_HEIGHT) {
            let x = state.random_x(state.asteroids[i].rect.size.x);
            state.asteroids[i].recycle(x);
        }

        // No invulnerability window: a lingering overlap costs a life every tick
        if state.player.shield.is_active() || !state.asteroids[i].rect.overlaps(&state.player.rect)
        {
            continue;
        }

        state.player.lives = state.player.lives.saturating_sub(1);
        events.push(GameEvent::AsteroidHit {
            lives_left: state.player.lives,
        });

        if state.player.lives == 0 {
            state.game_over = true;
            log::info!("Game over at {}ms with score {}", state.now_ms, state.score);
            events.push(GameEvent::GameOver { score: state.score });
            return;
        }
    }
}

/// Fall, drop off the bottom, or get collected (shield doesn't matter)
fn update_orbs(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.player.rect;
    let reward = state.tuning.orb_score;
    let score = &mut state.score;

    state.orbs.retain_mut(|orb| {
        orb.fall();
        if orb.exited(PLAYFIELD_HEIGHT) {
            return false;
        }
        if orb.rect.overlaps(&player) {
            *score = score.saturating_add(reward);
            events.push(GameEvent::OrbCollected { score: *score });
            return false;
        }
        true
    });
}

/// UFOs only fall and recycle; they are never tested against the player
fn update_ufos(state: &mut GameState) {
    for i in 0..state.ufos.len() {
        state.ufos[i].fall();
        if state.ufos[i].exited(PLAYFIELD_HEIGHT) {
            let x = state.random_x(state.ufos[i].rect.size.x);
            state.ufos[i].recycle(x);
        }
    }
}

fn update_stars(state: &mut GameState) {
    for i in 0..state.stars.len() {
        state.stars[i].pos.y += state.stars[i].speed;
        if state.stars[i].pos.y > PLAYFIELD_HEIGHT {
            let x = state.random_x(0.0);
            state.stars[i].pos = Vec2::new(x, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Faller, Rect};
    use crate::sim::shield::ShieldPhase;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn faller(id: u32, rect: Rect, speed: f32) -> Faller {
        Faller { id, rect, speed }
    }

    fn place_player(state: &mut GameState, x: f32, y: f32) {
        state.player.rect.pos = Vec2::new(x, y);
    }

    #[test]
    fn test_movement_and_boost() {
        let mut state = GameState::new(1);
        let start = state.player.rect.pos;

        tick(
            &mut state,
            &TickInput {
                left: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.rect.pos, start + Vec2::new(-5.0, 0.0));

        tick(
            &mut state,
            &TickInput {
                up: true,
                boost: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.rect.pos, start + Vec2::new(-5.0, -10.0));

        // Opposing keys cancel
        tick(
            &mut state,
            &TickInput {
                left: true,
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.rect.pos, start + Vec2::new(-5.0, -10.0));
    }

    #[test]
    fn test_movement_clamped_at_walls() {
        let mut state = GameState::new(1);
        place_player(&mut state, 3.0, 558.0);
        tick(
            &mut state,
            &TickInput {
                left: true,
                down: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.rect.pos, Vec2::new(0.0, 560.0));
    }

    #[test]
    fn test_orb_collected_once() {
        let mut state = GameState::new(1);
        place_player(&mut state, 240.0, 540.0);
        state
            .orbs
            .push(faller(10, Rect::new(245.0, 541.0, 20.0, 20.0), 2.0));
        assert!(state.orbs[0].rect.overlaps(&state.player.rect));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
        assert!(state.orbs.is_empty());
        assert_eq!(events, vec![GameEvent::OrbCollected { score: 10 }]);

        // Nothing left to award
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let tuning = Tuning::from_json(r#"{ "orb_score": 18446744073709551615 }"#).unwrap();
        let mut state = GameState::with_tuning(1, tuning);
        place_player(&mut state, 240.0, 540.0);

        for id in [10, 11] {
            state
                .orbs
                .push(faller(id, Rect::new(245.0, 541.0, 20.0, 20.0), 2.0));
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, u64::MAX);
        assert!(state.orbs.is_empty());
    }

    #[test]
    fn test_orb_collected_through_shield() {
        let mut state = GameState::new(1);
        place_player(&mut state, 240.0, 540.0);
        state.player.shield.try_activate(0);
        state
            .orbs
            .push(faller(10, Rect::new(245.0, 541.0, 20.0, 20.0), 2.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_orb_removed_off_bottom() {
        let mut state = GameState::new(1);
        state
            .orbs
            .push(faller(10, Rect::new(0.0, 599.0, 20.0, 20.0), 2.0));
        state
            .orbs
            .push(faller(11, Rect::new(0.0, 100.0, 20.0, 20.0), 2.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.orbs.len(), 1);
        assert_eq!(state.orbs[0].id, 11);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_asteroid_hit_every_tick_of_overlap() {
        let mut state = GameState::new(1);
        place_player(&mut state, 240.0, 540.0);
        state
            .asteroids
            .push(faller(1, Rect::new(240.0, 540.0, 40.0, 40.0), 0.0));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, 2);
        assert_eq!(events, vec![GameEvent::AsteroidHit { lives_left: 2 }]);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, 1);
        // Collision never removes the asteroid
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_three_hits_end_the_run() {
        let mut state = GameState::new(1);
        place_player(&mut state, 240.0, 540.0);
        let rock = Rect::new(240.0, 540.0, 40.0, 40.0);

        for (n, expected_lives) in [(1u32, 2u8), (2, 1)] {
            state.asteroids = vec![faller(n, rock, 0.0)];
            tick(&mut state, &TickInput::default());
            state.asteroids.clear();
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.lives, expected_lives);
            assert!(!state.game_over);
        }

        state.asteroids = vec![faller(3, rock, 0.0)];
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, 0);
        assert!(state.game_over);
        assert_eq!(
            events,
            vec![
                GameEvent::AsteroidHit { lives_left: 0 },
                GameEvent::GameOver { score: 0 }
            ]
        );
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = GameState::new(1);
        state
            .asteroids
            .push(faller(1, Rect::new(10.0, 10.0, 30.0, 30.0), 4.0));
        state.game_over = true;
        let player_before = state.player.rect;
        let stars_before = state.stars.clone();

        let events = tick(
            &mut state,
            &TickInput {
                right: true,
                shield: true,
                ..Default::default()
            },
        );
        assert!(events.is_empty());
        assert_eq!(state.player.rect, player_before);
        assert_eq!(state.asteroids[0].rect.pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.stars, stars_before);
        assert_eq!(state.player.shield.phase, ShieldPhase::Ready);
        assert!(state.game_over);
    }

    #[test]
    fn test_simultaneous_hits_stop_at_zero_lives() {
        let mut state = GameState::new(1);
        state.player.lives = 1;
        place_player(&mut state, 240.0, 540.0);
        let rock = Rect::new(240.0, 540.0, 40.0, 40.0);
        state.asteroids = vec![faller(1, rock, 0.0), faller(2, rock, 0.0)];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, 0);
        assert!(state.game_over);
    }

    #[test]
    fn test_shield_blocks_asteroid_damage() {
        let mut state = GameState::new(1);
        place_player(&mut state, 240.0, 540.0);
        state
            .asteroids
            .push(faller(1, Rect::new(240.0, 540.0, 40.0, 40.0), 0.0));

        let events = tick(
            &mut state,
            &TickInput {
                shield: true,
                ..Default::default()
            },
        );
        assert_eq!(events, vec![GameEvent::ShieldRaised]);
        assert_eq!(state.player.lives, 3);

        // Hold the overlap for the whole active window
        for _ in 1..150 {
            state.now_ms += TICK_MS as u64;
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.now_ms, 2_980);
        assert_eq!(state.player.lives, 3);

        // 3000ms after activation the shield drops and damage resumes
        state.now_ms += TICK_MS as u64;
        tick(&mut state, &TickInput::default());
        assert!(state.player.shield.on_cooldown());
        assert_eq!(state.player.lives, 2);
    }

    #[test]
    fn test_shield_key_during_cooldown_is_ignored() {
        let mut state = GameState::new(1);
        let hold = TickInput {
            shield: true,
            ..Default::default()
        };

        assert_eq!(tick(&mut state, &hold), vec![GameEvent::ShieldRaised]);
        state.now_ms = 3_000;
        assert!(tick(&mut state, &hold).is_empty());
        assert!(state.player.shield.on_cooldown());

        state.now_ms = 12_980;
        assert!(tick(&mut state, &hold).is_empty());

        state.now_ms = 13_000;
        assert_eq!(tick(&mut state, &hold), vec![GameEvent::ShieldRaised]);
        assert!(state.player.shield.is_active());
    }

    #[test]
    fn test_asteroid_and_ufo_recycle() {
        let mut state = GameState::new(1);
        state
            .asteroids
            .push(faller(1, Rect::new(100.0, 598.0, 30.0, 30.0), 4.0));
        state
            .ufos
            .push(faller(2, Rect::new(100.0, 599.0, 40.0, 30.0), 2.0));

        tick(&mut state, &TickInput::default());
        let rock = &state.asteroids[0];
        assert_eq!(rock.rect.pos.y, -30.0);
        assert!(rock.rect.pos.x >= 0.0 && rock.rect.max().x <= PLAYFIELD_WIDTH);
        let ufo = &state.ufos[0];
        assert_eq!(ufo.rect.pos.y, -30.0);
        assert!(ufo.rect.max().x <= PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_ufo_never_collides() {
        let mut state = GameState::new(1);
        place_player(&mut state, 240.0, 540.0);
        state
            .ufos
            .push(faller(1, Rect::new(240.0, 540.0, 40.0, 30.0), 0.0));
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.player.lives, 3);
    }

    #[test]
    fn test_stars_wrap_to_top() {
        let mut state = GameState::new(1);
        state.stars.truncate(1);
        state.stars[0].pos = Vec2::new(50.0, 599.5);
        state.stars[0].speed = 1.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.stars[0].pos.y, 0.0);
        assert!((0.0..PLAYFIELD_WIDTH).contains(&state.stars[0].pos.x));
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down, boost)| TickInput {
                left,
                right,
                up,
                down,
                boost,
                shield: false,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_playfield(inputs in prop::collection::vec(arb_input(), 1..400)) {
            let mut state = GameState::new(17);
            let size = state.player.rect.size;
            for input in &inputs {
                tick(&mut state, input);
                let pos = state.player.rect.pos;
                prop_assert!(pos.x >= 0.0 && pos.x <= PLAYFIELD_WIDTH - size.x);
                prop_assert!(pos.y >= 0.0 && pos.y <= PLAYFIELD_HEIGHT - size.y);
            }
        }
    }
}
