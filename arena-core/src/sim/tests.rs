use super::*;
use crate::config::{PlayerStats, StrategyChoice};
use crate::geometry::Direction;

const DT: f64 = 0.05;
const EPS: f64 = 1e-9;

fn field() -> FieldConfig {
    FieldConfig::default()
}

fn placed(id: u32, position: Vector, stats: PlayerStats, choice: StrategyChoice) -> Player {
    let id = PlayerId(id);
    let mut player = Player::new(id, &stats, choice.build(id));
    player.set_bounds(Bounds::field(800.0, 800.0).expect("valid field"));
    player.set_position(position);
    player
}

fn idle_at(id: u32, x: f64, y: f64) -> Player {
    placed(id, Vector::new(x, y), PlayerStats::default(), StrategyChoice::Idle)
}

fn external_at(id: u32, x: f64, y: f64) -> Player {
    placed(id, Vector::new(x, y), PlayerStats::default(), StrategyChoice::External)
}

fn push(movement: Vector) -> RawInput {
    RawInput {
        movement,
        aim: None,
    }
}

#[test]
fn clock_and_frame_advance_every_update() {
    let mut game = Game::from_parts(field(), vec![idle_at(1, 100.0, 100.0)], 600.0);
    let first = game.update(0.1, &[]);
    assert_eq!(first.frame, 1);
    game.update(0.1, &[]);
    let third = game.update(0.1, &[]);
    assert_eq!(third.frame, 3);
    assert_eq!(game.frame(), 3);
    assert!((game.clock() - 0.3).abs() < EPS);
}

#[test]
fn blocked_move_is_pushed_back_from_pre_move_position() {
    let mover = external_at(1, 100.0, 400.0);
    let wall = idle_at(2, 125.0, 400.0);
    let mut game = Game::from_parts(field(), vec![mover, wall], 600.0);

    let report = game.update(DT, &[push(Vector::new(1.0, 0.0))]);

    // 400 px/s for 0.05 s is 20 px; (120, 400) would overlap the wall.
    assert_eq!(report.blocked_moves, vec![PlayerId(1)]);
    let mover = game.player(PlayerId(1)).expect("mover alive");
    assert!(mover.position().distance(Vector::new(80.0, 400.0)) < EPS);
    assert_eq!(
        game.player(PlayerId(2)).expect("wall alive").position(),
        Vector::new(125.0, 400.0)
    );
}

#[test]
fn inputs_go_to_external_players_in_list_order() {
    let players = vec![
        external_at(1, 100.0, 100.0),
        idle_at(2, 400.0, 400.0),
        external_at(3, 700.0, 100.0),
    ];
    let mut game = Game::from_parts(field(), players, 600.0);
    assert_eq!(game.external_players(), 2);

    game.update(DT, &[push(Vector::new(1.0, 0.0)), push(Vector::new(0.0, 1.0))]);

    let first = game.player(PlayerId(1)).expect("p1");
    let third = game.player(PlayerId(3)).expect("p3");
    assert!(first.position().distance(Vector::new(120.0, 100.0)) < EPS);
    assert!(third.position().distance(Vector::new(700.0, 120.0)) < EPS);
    assert_eq!(
        game.player(PlayerId(2)).expect("p2").position(),
        Vector::new(400.0, 400.0)
    );
}

#[test]
fn missing_inputs_count_as_no_input() {
    let players = vec![external_at(1, 100.0, 100.0), external_at(2, 700.0, 700.0)];
    let mut game = Game::from_parts(field(), players, 600.0);

    game.update(DT, &[push(Vector::new(0.0, 1.0))]);
    game.update(DT, &[]);

    let first = game.player(PlayerId(1)).expect("p1");
    let second = game.player(PlayerId(2)).expect("p2");
    assert!(first.position().distance(Vector::new(100.0, 120.0)) < EPS);
    assert_eq!(second.position(), Vector::new(700.0, 700.0));
}

#[test]
fn external_aim_fires_on_simulation_clock() {
    let shooter = external_at(1, 100.0, 400.0);
    let bystander = idle_at(2, 100.0, 100.0);
    let mut game = Game::from_parts(field(), vec![shooter, bystander], 600.0);
    let fire = RawInput {
        movement: Vector::ZERO,
        aim: Some(Direction::East),
    };

    let mut shot_clocks = Vec::new();
    for _ in 0..40 {
        let report = game.update(DT, &[fire]);
        if report.shots.contains(&PlayerId(1)) {
            shot_clocks.push(report.clock);
        }
    }

    // Default firerate is 4/s. Frame granularity can delay each shot by one frame.
    assert!((6..=8).contains(&shot_clocks.len()), "{shot_clocks:?}");
    assert!(shot_clocks[0] >= 0.25 - EPS);
    for pair in shot_clocks.windows(2) {
        assert!(pair[1] - pair[0] >= 0.25 - EPS, "{pair:?}");
    }
}

#[test]
fn one_bullet_hits_at_most_one_player() {
    let players = vec![idle_at(1, 400.0, 400.0), idle_at(2, 420.0, 400.0)];
    let mut game = Game::from_parts(field(), players, 600.0);
    game.insert_bullet(Bullet::new(Vector::new(410.0, 400.0), Vector::new(1.0, 0.0), 10, 0.0));

    let report = game.update(DT, &[]);

    assert_eq!(
        report.hits,
        vec![HitEvent {
            victim: PlayerId(1),
            damage: 10,
            remaining_health: 90,
        }]
    );
    assert!(game.bullets().is_empty());
    assert_eq!(game.player(PlayerId(2)).expect("p2").health(), 100);
}

#[test]
fn bullets_leaving_the_field_expire() {
    let mut game = Game::from_parts(field(), vec![idle_at(1, 100.0, 100.0)], 600.0);
    game.insert_bullet(Bullet::new(Vector::new(795.0, 400.0), Vector::new(1.0, 0.0), 10, 600.0));
    game.insert_bullet(Bullet::new(Vector::new(400.0, 400.0), Vector::new(0.0, 1.0), 10, 600.0));

    let report = game.update(DT, &[]);

    assert_eq!(report.expired_bullets, 1);
    assert!(report.hits.is_empty());
    assert_eq!(game.bullets().len(), 1);
    assert!(game.bullets()[0].position().distance(Vector::new(400.0, 430.0)) < EPS);
}

#[test]
fn lethal_hit_eliminates_and_leaves_a_winner() {
    let fragile = PlayerStats {
        max_health: 10,
        ..PlayerStats::default()
    };
    let players = vec![
        idle_at(1, 100.0, 100.0),
        placed(2, Vector::new(600.0, 600.0), fragile, StrategyChoice::Idle),
    ];
    let mut game = Game::from_parts(field(), players, 600.0);
    assert!(!game.is_over());
    assert_eq!(game.winner(), None);

    game.insert_bullet(Bullet::new(Vector::new(580.0, 600.0), Vector::new(1.0, 0.0), 10, 0.0));
    let report = game.update(DT, &[]);

    assert_eq!(report.eliminated, vec![PlayerId(2)]);
    assert!(game.player(PlayerId(2)).is_none());
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(PlayerId(1)));
}

#[test]
fn circles_list_players_before_bullets() {
    let mut game = Game::from_parts(
        field(),
        vec![idle_at(1, 100.0, 100.0), idle_at(2, 300.0, 300.0)],
        600.0,
    );
    game.insert_bullet(Bullet::new(Vector::new(500.0, 500.0), Vector::new(0.0, 1.0), 10, 600.0));

    let circles = game.circles();
    assert_eq!(circles.len(), 3);
    assert_eq!(circles[0].center, (100, 100));
    assert_eq!(circles[1].center, (300, 300));
    assert_eq!(circles[2].center, (500, 500));
    assert_eq!(circles[2].radius, 5.0);
}

#[test]
fn new_validates_config() {
    let mut config = MatchConfig::default();
    config.num_players = 0;
    assert_eq!(Game::new(&config, 1).err(), Some(ConfigError::NoPlayers));
}

#[test]
fn seeded_spawns_are_reproducible_and_inside_the_field() {
    let config = MatchConfig::with_lineup(vec![StrategyChoice::Idle; 4]);
    for seed in 1..50 {
        let a = Game::new(&config, seed).expect("valid config");
        let b = Game::new(&config, seed).expect("valid config");
        assert_eq!(a.circles(), b.circles());

        let ids: Vec<PlayerId> = a.players().iter().map(Player::id).collect();
        assert_eq!(ids, vec![PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)]);
        for player in a.players() {
            let p = player.position();
            assert!((15.0..=785.0).contains(&p.x), "seed {seed}: {p}");
            assert!((15.0..=785.0).contains(&p.y), "seed {seed}: {p}");
        }
    }

    let one = Game::new(&config, 1).expect("valid config");
    let two = Game::new(&config, 2).expect("valid config");
    assert_ne!(one.circles(), two.circles());
}

#[test]
fn autonomous_matches_replay_identically() {
    let config = MatchConfig::with_lineup(vec![
        StrategyChoice::SemiSmart,
        StrategyChoice::Smart,
        StrategyChoice::Bounce {
            aim: Default::default(),
        },
    ]);
    let mut a = Game::new(&config, 0xC0FFEE).expect("valid config");
    let mut b = Game::new(&config, 0xC0FFEE).expect("valid config");

    for _ in 0..600 {
        let left = a.update(1.0 / 60.0, &[]);
        let right = b.update(1.0 / 60.0, &[]);
        assert_eq!(left, right);
        assert_eq!(a.circles(), b.circles());
    }
}

#[test]
fn every_strategy_decides_from_the_frame_start_world() {
    let players = vec![
        placed(1, Vector::new(100.0, 100.0), PlayerStats::default(), StrategyChoice::SemiSmart),
        placed(2, Vector::new(500.0, 101.0), PlayerStats::default(), StrategyChoice::SemiSmart),
    ];
    let mut game = Game::from_parts(field(), players, 600.0);

    game.update(DT, &[]);

    // p1 moves first, down to y=120. p2 must still chase the y=100 it saw.
    let first = game.player(PlayerId(1)).expect("p1");
    let second = game.player(PlayerId(2)).expect("p2");
    assert!(first.position().distance(Vector::new(100.0, 120.0)) < EPS);
    assert!(second.position().distance(Vector::new(500.0, 81.0)) < EPS);
}

#[test]
fn wide_bounce_player_turns_at_the_bottom() {
    let mut config = MatchConfig::with_lineup(vec![StrategyChoice::Bounce {
        aim: Default::default(),
    }]);
    config.stats[0].radius = 20.0;
    let mut game = Game::new(&config, 5).expect("valid config");

    let mut lowest_reached = false;
    let mut turned = false;
    for _ in 0..600 {
        let before = game.players()[0].position().y;
        game.update(1.0 / 60.0, &[]);
        let after = game.players()[0].position().y;
        lowest_reached |= after >= 780.0 - EPS;
        turned |= lowest_reached && after < before;
    }
    assert!(turned, "patrol never left the bottom edge");
}
