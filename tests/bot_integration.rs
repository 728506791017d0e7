//! Bot decision engine integration tests

mod common;

use std::sync::Arc;

use common::{at, mech, BlindMap, CountingToHit, FixedToHit, Table};
use mech_bots::bots::{
    Bot, DeploymentEngine, EndPhaseEngine, MovementEngine, TacticalEvaluator, TurnState,
    WeaponsEngine,
};
use mech_bots::combat::{WeaponConfiguration, WeaponConfigurationType};
use mech_bots::core::config::BotConfig;
use mech_bots::core::types::PlayerId;
use mech_bots::game::{ClientCommand, CommandPublisher, PhaseName, Scenario};
use mech_bots::map::{HexCoordinates, HexDirection, MovementPath, MovementType};
use mech_bots::units::{PartLocation, Unit, Weapon};

fn declared_names(command: &ClientCommand) -> Vec<String> {
    match command {
        ClientCommand::WeaponAttackDeclaration(d) => {
            d.weapon_targets.iter().map(|t| t.weapon.name.clone()).collect()
        }
        other => panic!("expected a weapon declaration, got {:?}", other),
    }
}

// === Deployment ===

#[tokio::test]
async fn test_deploys_one_unit_on_border_of_5x5() {
    let mut table = Table::new(vec![mech("first", 4, vec![]), mech("second", 4, vec![])], vec![])
        .with_open_map(5, 5);

    DeploymentEngine::new()
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    assert_eq!(commands.len(), 1);
    let ClientCommand::DeployUnit(deploy) = &commands[0] else {
        panic!("expected a deployment, got {:?}", commands[0]);
    };
    let hex = deploy.position;
    assert!(hex.q == 1 || hex.q == 5 || hex.r == 1 || hex.r == 5);
    assert_eq!(hex, HexCoordinates::new(1, 1));
    assert_eq!(deploy.unit_id, table.bot_unit(0).id);
}

#[tokio::test]
async fn test_deployment_skips_occupied_hexes() {
    let waiting = mech("waiting", 4, vec![]);
    let placed = mech("placed", 4, vec![]).deployed_at(at(3, 3, HexDirection::Top));
    let blockers = vec![
        mech("a", 4, vec![]).deployed_at(at(1, 1, HexDirection::Top)),
        mech("b", 4, vec![]).deployed_at(at(1, 2, HexDirection::Top)),
    ];
    let mut table = Table::new(vec![placed, waiting], blockers).with_open_map(5, 5);

    DeploymentEngine::new()
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    let ClientCommand::DeployUnit(deploy) = &commands[0] else {
        panic!("expected a deployment, got {:?}", commands[0]);
    };
    assert_eq!(deploy.position, HexCoordinates::new(1, 3));
    assert_eq!(deploy.unit_id, table.bot_unit(1).id);
}

#[tokio::test]
async fn test_deployment_is_silent_without_work() {
    let deployed = mech("deployed", 4, vec![]).deployed_at(at(2, 2, HexDirection::Top));
    let mut table = Table::new(vec![deployed], vec![]).with_open_map(5, 5);
    DeploymentEngine::new()
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();
    assert!(table.drain().is_empty());

    // No map at all
    let mut table = Table::new(vec![mech("waiting", 4, vec![])], vec![]);
    DeploymentEngine::new()
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();
    assert!(table.drain().is_empty());
}

// === Movement ===

#[tokio::test]
async fn test_movement_fails_when_everyone_has_moved() {
    let position = at(3, 3, HexDirection::Top);
    let mut moved = mech("moved", 4, vec![]).deployed_at(position);
    moved.movement_taken = Some(MovementPath::standing_still(position));
    let table = Table::new(vec![moved], vec![]).with_open_map(8, 8);

    let result = MovementEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await;
    let err = result.unwrap_err();
    assert_eq!(err.engine_name(), Some("MovementEngine"));
}

#[tokio::test]
async fn test_units_that_cannot_move_stand_still() {
    let mut immobile = mech("immobile", 4, vec![]).deployed_at(at(3, 3, HexDirection::Top));
    immobile.status.immobile = true;
    let legless = mech("legless", 0, vec![]).deployed_at(at(5, 5, HexDirection::Top));

    for unit in [immobile, legless] {
        let mut table = Table::new(vec![unit], vec![]).with_open_map(8, 8);
        MovementEngine::new(&BotConfig::default())
            .make_decision(&table.game, table.bot, &mut TurnState::new())
            .await
            .unwrap();

        let commands = table.drain();
        assert_eq!(commands.len(), 1);
        let ClientCommand::MoveUnit(movement) = &commands[0] else {
            panic!("expected a move, got {:?}", commands[0]);
        };
        assert_eq!(movement.movement_type, MovementType::StandingStill);
        assert!(movement.movement_path.is_empty());
    }
}

#[tokio::test]
async fn test_movement_path_is_contiguous_and_closes_range() {
    let start = at(5, 12, HexDirection::Top);
    let laser =
        mech("laser", 4, vec![Weapon::medium_laser(PartLocation::RightArm)]).deployed_at(start);
    let target = mech("target", 4, vec![]).deployed_at(at(5, 2, HexDirection::Bottom));
    let mut table = Table::new(vec![laser], vec![target]).with_open_map(10, 14);

    MovementEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    let ClientCommand::MoveUnit(movement) = &commands[0] else {
        panic!("expected a move, got {:?}", commands[0]);
    };
    assert_ne!(movement.movement_type, MovementType::StandingStill);
    assert_eq!(movement.movement_path[0].from, start);
    for pair in movement.movement_path.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
    let end = movement.movement_path.last().unwrap().to.coordinates;
    let goal = HexCoordinates::new(5, 2);
    assert!(end.distance(&goal) < start.coordinates.distance(&goal));
}

// === Tactical evaluation ===

#[test]
fn test_enemies_without_line_of_sight_only_count_for_rear_arc() {
    let unit = mech("unit", 4, vec![Weapon::medium_laser(PartLocation::RightArm)])
        .deployed_at(at(5, 5, HexDirection::Top));
    let behind = mech("behind", 4, vec![Weapon::large_laser(PartLocation::RightArm)])
        .deployed_at(at(5, 8, HexDirection::Top));
    let table = Table::new(vec![unit], vec![behind]).with_map(BlindMap { width: 10, height: 10 });

    let unit = table.bot_unit(0);
    let enemies = table.game.enemy_units(table.bot);
    let path = unit.current_path().unwrap();
    let score = TacticalEvaluator::default().evaluate_path(&table.game, unit, &path, &enemies);

    assert_eq!(score.defensive_index, 0.0);
    assert_eq!(score.offensive_index, 0.0);
    assert_eq!(score.enemies_in_rear_arc, 1);
}

#[test]
fn test_out_of_range_weapons_are_not_viable() {
    let unit = mech(
        "unit",
        4,
        vec![
            Weapon::medium_laser(PartLocation::LeftArm),
            Weapon::large_laser(PartLocation::RightArm),
        ],
    )
    .deployed_at(at(5, 14, HexDirection::Top));
    let target = mech("target", 4, vec![]).deployed_at(at(5, 2, HexDirection::Bottom));
    let table = Table::new(vec![unit], vec![target]).with_open_map(10, 16);

    let unit = table.bot_unit(0);
    let enemies = table.game.enemy_units(table.bot);
    let path = unit.current_path().unwrap();
    let scores = TacticalEvaluator::default()
        .evaluate_targets(&table.game, unit, &path, &enemies, None)
        .unwrap();

    assert_eq!(scores.len(), 1);
    let names: Vec<&str> = scores[0]
        .viable_weapons
        .iter()
        .map(|w| w.weapon.name.as_str())
        .collect();
    assert_eq!(names, vec!["Large Laser"]);
    assert!(scores[0].viable_weapons.iter().all(|w| (0.0..=1.0).contains(&w.hit_probability)));
}

#[test]
fn test_leg_weapons_never_get_torso_rotation() {
    let unit = mech(
        "unit",
        4,
        vec![
            Weapon::small_laser(PartLocation::RightLeg),
            Weapon::medium_laser(PartLocation::RightArm),
        ],
    )
    .deployed_at(at(5, 5, HexDirection::Top));
    let target = mech("target", 4, vec![]).deployed_at(at(5, 3, HexDirection::Bottom));
    let table = Table::new(vec![unit], vec![target]).with_open_map(10, 10);

    let unit = table.bot_unit(0);
    let enemies = table.game.enemy_units(table.bot);
    let path = unit.current_path().unwrap();
    let scores = TacticalEvaluator::default()
        .evaluate_targets(&table.game, unit, &path, &enemies, None)
        .unwrap();

    assert!(!scores[0].configuration_scores.is_empty());
    for configuration in &scores[0].configuration_scores {
        for weapon in &configuration.weapons {
            if weapon.weapon.location == PartLocation::RightLeg {
                assert_eq!(weapon.configuration.config_type, WeaponConfigurationType::None);
            }
        }
    }

    // Nothing that twists, so only the untwisted stance is offered
    let legs_only = mech("legs", 4, vec![Weapon::small_laser(PartLocation::LeftLeg)])
        .deployed_at(at(5, 5, HexDirection::Top));
    let target = mech("target", 4, vec![]).deployed_at(at(5, 3, HexDirection::Bottom));
    let table = Table::new(vec![legs_only], vec![target]).with_open_map(10, 10);
    let unit = table.bot_unit(0);
    let enemies = table.game.enemy_units(table.bot);
    let scores = TacticalEvaluator::default()
        .evaluate_targets(&table.game, unit, &unit.current_path().unwrap(), &enemies, None)
        .unwrap();
    assert_eq!(scores[0].configuration_scores.len(), 1);
    assert!(scores[0].configuration.is_none());
}

// === Weapons ===

fn gunner(heat: i32, weapons: Vec<Weapon>) -> Unit {
    mech("gunner", 4, weapons)
        .with_heat(heat, 10)
        .deployed_at(at(5, 5, HexDirection::Top))
}

fn standing_target() -> Unit {
    mech("target", 4, vec![]).deployed_at(at(5, 3, HexDirection::Bottom))
}

fn three_lasers() -> Vec<Weapon> {
    vec![
        Weapon::small_laser(PartLocation::Head),
        Weapon::large_laser(PartLocation::RightArm),
        Weapon::medium_laser(PartLocation::LeftArm),
    ]
}

#[tokio::test]
async fn test_declaration_ordered_by_probability_then_damage() {
    let mut table = Table::new(vec![gunner(0, three_lasers())], vec![standing_target()])
        .with_open_map(10, 10)
        .with_to_hit(Arc::new(FixedToHit(5)));

    WeaponsEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    assert_eq!(commands.len(), 1);
    assert_eq!(declared_names(&commands[0]), vec!["Large Laser", "Medium Laser", "Small Laser"]);
    let ClientCommand::WeaponAttackDeclaration(declaration) = &commands[0] else {
        unreachable!();
    };
    let target_id = table.foe_unit(0).id;
    assert!(declaration
        .weapon_targets
        .iter()
        .all(|t| t.target_id == target_id && t.is_primary_target));
}

#[tokio::test]
async fn test_declaration_stays_within_heat_budget() {
    // 10 dissipation + 4 margin - 8 current leaves 6 heat
    let mut table = Table::new(vec![gunner(8, three_lasers())], vec![standing_target()])
        .with_open_map(10, 10)
        .with_to_hit(Arc::new(FixedToHit(5)));

    WeaponsEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    assert_eq!(declared_names(&commands[0]), vec!["Medium Laser", "Small Laser"]);
}

#[tokio::test]
async fn test_scarce_ammo_needs_a_good_shot() {
    let weapons = || {
        vec![
            Weapon::autocannon20(PartLocation::RightTorso).with_ammo(2),
            Weapon::medium_laser(PartLocation::LeftArm),
        ]
    };

    // 2d6 >= 9 is 10/36
    let mut long_odds = Table::new(vec![gunner(0, weapons())], vec![standing_target()])
        .with_open_map(10, 10)
        .with_to_hit(Arc::new(FixedToHit(9)));
    WeaponsEngine::new(&BotConfig::default())
        .make_decision(&long_odds.game, long_odds.bot, &mut TurnState::new())
        .await
        .unwrap();
    assert_eq!(declared_names(&long_odds.drain()[0]), vec!["Medium Laser"]);

    // 2d6 >= 6 is 26/36
    let mut good_odds = Table::new(vec![gunner(0, weapons())], vec![standing_target()])
        .with_open_map(10, 10)
        .with_to_hit(Arc::new(FixedToHit(6)));
    WeaponsEngine::new(&BotConfig::default())
        .make_decision(&good_odds.game, good_odds.bot, &mut TurnState::new())
        .await
        .unwrap();
    assert_eq!(declared_names(&good_odds.drain()[0]), vec!["AC/20", "Medium Laser"]);
}

#[tokio::test]
async fn test_torso_twist_requested_before_declaration() {
    let attacker = at(5, 5, HexDirection::Top);
    let side = attacker
        .coordinates
        .neighbor(HexDirection::BottomRight)
        .neighbor(HexDirection::BottomRight);
    let unit =
        mech("gunner", 4, vec![Weapon::medium_laser(PartLocation::RightArm)]).deployed_at(attacker);
    let target = mech("target", 4, vec![]).deployed_at(at(side.q, side.r, HexDirection::Top));
    let mut table = Table::new(vec![unit], vec![target]).with_open_map(10, 10);

    WeaponsEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    assert_eq!(commands.len(), 2);
    let ClientCommand::WeaponConfiguration(configuration) = &commands[0] else {
        panic!("expected a configuration first, got {:?}", commands[0]);
    };
    assert_eq!(
        configuration.configuration,
        WeaponConfiguration::torso_rotation(HexDirection::TopRight)
    );
    assert_eq!(declared_names(&commands[1]), vec!["Medium Laser"]);
}

#[tokio::test]
async fn test_empty_declaration_without_targets() {
    let mut table = Table::new(vec![gunner(0, three_lasers())], vec![]).with_open_map(10, 10);
    WeaponsEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    assert_eq!(commands.len(), 1);
    assert!(declared_names(&commands[0]).is_empty());
}

#[tokio::test]
async fn test_shut_down_unit_gets_empty_declaration() {
    let mut unit = gunner(0, three_lasers());
    unit.status.shutdown = true;
    let mut table = Table::new(vec![unit], vec![standing_target()]).with_open_map(10, 10);

    WeaponsEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    let ClientCommand::WeaponAttackDeclaration(declaration) = &commands[0] else {
        panic!("expected a declaration, got {:?}", commands[0]);
    };
    assert_eq!(declaration.attacker_id, table.bot_unit(0).id);
    assert!(declaration.weapon_targets.is_empty());
}

#[tokio::test]
async fn test_weapons_engine_needs_a_unit() {
    let table = Table::new(vec![], vec![standing_target()]).with_open_map(10, 10);
    let err = WeaponsEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap_err();
    assert_eq!(err.engine_name(), Some("WeaponsEngine"));
}

#[tokio::test]
async fn test_weapons_engine_rejects_unknown_player() {
    let mut table =
        Table::new(vec![mech("a", 4, vec![])], vec![standing_target()]).with_open_map(10, 10);
    let err = WeaponsEngine::new(&BotConfig::default())
        .make_decision(&table.game, PlayerId::new(), &mut TurnState::new())
        .await
        .unwrap_err();
    assert_eq!(err.engine_name(), Some("WeaponsEngine"));
    assert!(table.drain().is_empty());
}

#[tokio::test]
async fn test_weapons_phase_reuses_movement_evaluations() {
    let counter = Arc::new(CountingToHit::default());
    let laser = mech("laser", 4, vec![Weapon::medium_laser(PartLocation::RightArm)])
        .deployed_at(at(5, 10, HexDirection::Top));
    let target = mech("target", 4, vec![]).deployed_at(at(5, 3, HexDirection::Bottom));
    let mut table = Table::new(vec![laser], vec![target])
        .with_open_map(10, 12)
        .with_to_hit(counter.clone());
    let config = BotConfig::default();
    let mut turn_state = TurnState::new();

    MovementEngine::new(&config)
        .make_decision(&table.game, table.bot, &mut turn_state)
        .await
        .unwrap();
    assert!(!turn_state.is_empty());

    // Apply the move the way the rules engine would
    let commands = table.drain();
    let ClientCommand::MoveUnit(movement) = &commands[0] else {
        panic!("expected a move, got {:?}", commands[0]);
    };
    let start = table.bot_unit(0).position.unwrap();
    let path = MovementPath::new(start, movement.movement_path.clone(), movement.movement_type);
    let unit = table
        .game
        .player_mut(table.bot)
        .unwrap()
        .unit_mut(movement.unit_id)
        .unwrap();
    unit.position = Some(path.destination());
    unit.movement_taken = Some(path);

    let calls_before = counter.calls();
    WeaponsEngine::new(&config)
        .make_decision(&table.game, table.bot, &mut turn_state)
        .await
        .unwrap();

    assert_eq!(counter.calls(), calls_before);
    assert!(turn_state.hits() >= 1);
    let commands = table.drain();
    assert_eq!(declared_names(commands.last().unwrap()), vec!["Medium Laser"]);
}

// === End phase ===

#[tokio::test]
async fn test_end_phase_manages_heat_then_ends_turn() {
    let hot = mech("hot", 4, vec![]).with_heat(20, 10);
    let mut asleep = mech("asleep", 4, vec![]);
    asleep.status.shutdown = true;
    let cool = mech("cool", 4, vec![]).with_heat(5, 10);
    let mut knocked_out = mech("knocked out", 4, vec![]).with_heat(30, 10);
    knocked_out.status.shutdown = true;
    knocked_out.status.pilot_conscious = false;
    let mut table = Table::new(vec![hot, asleep, cool, knocked_out], vec![]);

    EndPhaseEngine::new(&BotConfig::default())
        .make_decision(&table.game, table.bot, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    let names: Vec<&str> = commands.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["ShutdownUnit", "StartupUnit", "TurnEnded"]);
    let ClientCommand::ShutdownUnit(shutdown) = &commands[0] else {
        unreachable!();
    };
    assert_eq!(shutdown.unit_id, table.bot_unit(0).id);
}

#[tokio::test]
async fn test_end_phase_ends_turn_for_unknown_player() {
    let mut table = Table::new(vec![mech("a", 4, vec![])], vec![]);
    let stranger = PlayerId::new();

    EndPhaseEngine::new(&BotConfig::default())
        .make_decision(&table.game, stranger, &mut TurnState::new())
        .await
        .unwrap();

    let commands = table.drain();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].name(), "TurnEnded");
    assert_eq!(commands[0].player_id(), stranger);
}

// === Bot turn controller ===

#[tokio::test]
async fn test_bot_clears_cache_on_new_turn() {
    let laser = mech("laser", 4, vec![Weapon::medium_laser(PartLocation::RightArm)])
        .deployed_at(at(5, 10, HexDirection::Top));
    let target = mech("target", 4, vec![]).deployed_at(at(5, 3, HexDirection::Bottom));
    let mut table = Table::new(vec![laser], vec![target])
        .with_open_map(10, 12)
        .with_phase(PhaseName::Movement);
    let mut bot = Bot::new(table.bot, &BotConfig::default());

    assert!(bot.on_phase(&table.game).await.unwrap());
    assert!(!bot.turn_state().is_empty());

    table.game.set_turn(2);
    table.game.set_phase(PhaseName::Initiative);
    assert!(!bot.on_phase(&table.game).await.unwrap());
    assert!(bot.turn_state().is_empty());
    assert_eq!(table.drain().len(), 1);
}

#[tokio::test]
async fn test_bot_ends_turn_in_end_phase() {
    let mut table = Table::new(vec![mech("a", 4, vec![])], vec![]).with_phase(PhaseName::End);
    let mut bot = Bot::new(table.bot, &BotConfig::default());

    assert!(bot.on_phase(&table.game).await.unwrap());
    let commands = table.drain();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].name(), "TurnEnded");
}

#[tokio::test]
async fn test_shipped_scenario_moves_the_trooper_first() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/scenarios/duel.json");
    let (publisher, mut receiver) = CommandPublisher::channel(16);
    let game = Scenario::load(path).unwrap().into_game(publisher).unwrap();
    let bot_player = game.players()[0].id;
    let config =
        BotConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/bots/default.toml")).unwrap();

    let mut bot = Bot::new(bot_player, &config);
    assert!(bot.on_phase(&game).await.unwrap());

    let ClientCommand::MoveUnit(movement) = receiver.try_recv().unwrap() else {
        panic!("expected a move");
    };
    assert_eq!(movement.unit_id, game.players()[0].units[0].id);
}
