//! Engine integration: configuration overrides and custom rules

use std::sync::Arc;

use enemy_forge::core::config::EngineConfig;
use enemy_forge::core::types::{Difficulty, Region, TimeOfDay, Weather};
use enemy_forge::entity::GameContext;
use enemy_forge::forward::{ForwardPipeline, WorkingMemory};
use enemy_forge::rules::registry::FINAL_SELECTION;
use enemy_forge::rules::{FactRef, PhaseRegistry, Rule, RuleError, Scope};
use enemy_forge::store::InMemoryEnemyStore;
use enemy_forge::EnemyDirector;
use ordered_float::OrderedFloat;

fn castle(difficulty: Difficulty) -> GameContext {
    GameContext::new(Region::Castle, difficulty, Weather::Clear, TimeOfDay::Day, None)
}

fn nothing_pinned(memory: &WorkingMemory, _: FactRef, _: &EngineConfig) -> bool {
    memory.pinned().is_none() && memory.candidate_count() > 0
}

fn pin_weakest(memory: &mut WorkingMemory, _: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
    let weakest = memory
        .candidates()
        .min_by_key(|(_, c)| OrderedFloat(c.enemy.hp))
        .map(|(id, _)| id)
        .ok_or(RuleError::MissingFact("candidate"))?;
    memory.pin(weakest);
    Ok(())
}

#[test]
fn test_toml_config_overrides_difficulty_table() {
    let config = EngineConfig::from_toml_str(
        r#"
        firing_cap = 10

        [[difficulty]]
        tier = "easy"
        hp = 0.5
        damage = 0.5
        "#,
    )
    .unwrap();
    assert_eq!(config.firing_cap, 10);
    // Untouched sections keep their defaults
    assert_eq!(config.regions.len(), EngineConfig::default().regions.len());

    let outcome = ForwardPipeline::new(config).run_with_pool(&castle(Difficulty::Easy), Vec::new());

    let sentry = outcome.pool.iter().find(|e| e.name == "Hollow Sentry").unwrap();
    assert!((sentry.hp - 400.0).abs() < 1e-9);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = EngineConfig::from_toml_str("firing_cap = 0");
    assert!(result.is_err());
}

#[test]
fn test_registered_rule_can_pin_a_candidate() {
    let mut director = EnemyDirector::new(EngineConfig::default(), Arc::new(InMemoryEnemyStore::new()));
    let registered = director
        .pipeline_mut()
        .registry_mut()
        .register(FINAL_SELECTION, Rule::new("pin-weakest", 75, Scope::Memory, nothing_pinned, pin_weakest));
    assert!(registered);

    let enemy = director.generate_forward(&castle(Difficulty::Medium));

    // Hollow Sentry (regular) is weaker than Gargoyle Warden (elite)
    assert_eq!(enemy.name, "Hollow Sentry");
}

#[test]
fn test_empty_registry_synthesizes() {
    let pipeline = ForwardPipeline::with_registry(EngineConfig::default(), PhaseRegistry::empty());
    let outcome = pipeline.run_with_pool(&castle(Difficulty::Hard), Vec::new());

    assert!(outcome.pool.is_empty());
    assert_eq!(outcome.enemy.name, "Fallback Castle Creature");
    assert_eq!(outcome.reports.len(), 5);
}
