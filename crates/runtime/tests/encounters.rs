//! Full encounters driven by the built-in and file-based content.

use std::io::{BufRead, BufReader};
use std::sync::Arc;

use game_content::{ContentFactory, defaults};
use game_core::{ActionKind, BattleContext, BattleState, CombatConfig, PcgRng};
use runtime::providers::ai::ActionCategory;
use runtime::{AiDecisionEngine, CombatEvent, DecisionInput, Event, Runtime, Topic, TurnEvent};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

fn assert_settled(runtime: &Runtime) {
    let outcome = runtime.outcome().expect("battle decided");
    let defeated = outcome.defeated();

    assert!(
        runtime
            .battle()
            .iter()
            .filter(|c| c.side == defeated)
            .all(|c| !c.is_alive())
    );
    assert!(runtime.battle().living(defeated.opposite()).count() > 0);
    for c in runtime.battle().iter() {
        assert!(c.hp <= c.max_hp, "{} hp out of bounds", c.name);
        assert!(c.mp <= c.max_mp, "{} mp out of bounds", c.name);
        assert!(c.brave <= c.max_brave, "{} brave out of bounds", c.name);
    }
    assert!(matches!(
        runtime.events().iter().last(),
        Some(Event::Turn(TurnEvent::BattleEnded { .. }))
    ));
}

#[test]
fn default_skirmish_runs_to_an_outcome() {
    for seed in 1..=3 {
        let mut runtime = Runtime::builder()
            .encounter(defaults::encounter(seed))
            .build()
            .unwrap();
        runtime.run_to_end().unwrap();

        assert_settled(&runtime);
        assert_eq!(runtime.context().seed, seed);
        assert!(
            runtime
                .events()
                .by_topic(Topic::Turn)
                .any(|e| matches!(e, Event::Turn(TurnEvent::RoundEnded { .. })))
        );
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed| {
        let mut runtime = Runtime::builder()
            .encounter(defaults::encounter(seed))
            .build()
            .unwrap();
        let outcome = runtime.run_to_end().unwrap();
        let hp: Vec<u32> = runtime.battle().iter().map(|c| c.hp).collect();
        (outcome, runtime.clock(), runtime.events().len(), hp)
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn skirmish_loads_from_data_files() {
    let factory = ContentFactory::new(DATA_DIR);
    let config = factory.load_config().unwrap();
    let content = factory.load_registry().unwrap();
    let encounter = factory.load_encounter("skirmish", &content).unwrap();

    let mut runtime = Runtime::builder()
        .combat_config(config)
        .content(Arc::new(content))
        .encounter(encounter)
        .build()
        .unwrap();
    runtime.run_to_end().unwrap();

    assert_settled(&runtime);
}

#[test]
fn event_log_exports_as_json_lines() {
    let mut runtime = Runtime::builder()
        .encounter(defaults::encounter(5))
        .build()
        .unwrap();
    runtime.run_to_end().unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    runtime.events().write_json_lines(file.as_file()).unwrap();

    let lines: Vec<String> = BufReader::new(file.reopen().unwrap())
        .lines()
        .map(|l| l.unwrap())
        .collect();
    assert_eq!(lines.len(), runtime.events().len());
    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.is_object());
    }
}

#[test]
fn cleric_heals_a_dying_ally() {
    let content = defaults::registry();
    let mut battle = defaults::encounter(7).build(&content);
    let find = |battle: &BattleState, name: &str| {
        battle.iter().find(|c| c.name == name).map(|c| c.id).unwrap()
    };
    let brand = find(&battle, "Brand");
    let oren = find(&battle, "Oren");
    battle.get_mut(brand).unwrap().hp = 40;

    let ctx = BattleContext::new(7);
    let config = CombatConfig::default();
    let input = DecisionInput {
        actor: oren,
        battle: &battle,
        ctx: &ctx,
        config: &config,
        skills: &content,
        rng: &PcgRng,
    };

    let engine = AiDecisionEngine::new();
    let candidates = engine.candidates(&input);
    let top = candidates.first().unwrap();
    assert_eq!(top.category, ActionCategory::Heal);
    assert_eq!(top.action.target.single_id(), Some(brand));

    let chosen = engine.choose_action(&input);
    assert_eq!(chosen.actor, oren);
    assert!(!chosen.is_wait());
}

#[test]
fn party_fights_on_without_a_player_provider() {
    let mut runtime = Runtime::builder()
        .encounter(defaults::encounter_with_player(11))
        .build()
        .unwrap();
    let player = runtime
        .battle()
        .iter()
        .find(|c| c.is_player())
        .map(|c| c.id)
        .unwrap();

    runtime.run_to_end().unwrap();
    assert_settled(&runtime);
    assert!(runtime.events().iter().any(|e| matches!(
        e,
        Event::Combat(CombatEvent::ActionResolved { report, .. })
            if report.actor == player && report.kind != ActionKind::Wait
    )));
}
