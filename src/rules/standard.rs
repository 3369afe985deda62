//! Built-in rules for the seven forward phases
//!
//! Every number used here comes from [`EngineConfig`]; the rules only decide
//! which candidates a number applies to.

use crate::core::config::EngineConfig;
use crate::core::types::{Archetype, Difficulty};
use crate::entity::Enemy;
use crate::forward::memory::{Candidate, CandidateOrigin, WorkingMemory};
use crate::forward::selector::first_max_by_score;
use crate::rules::counter::counter_score;
use crate::rules::phase::Phase;
use crate::rules::registry::{
    DIFFICULTY_ADJUSTMENT, FINAL_SELECTION, PLAYER_BUILD_COUNTER, PLAYER_LEVEL_ADJUSTMENT,
    TEMPLATE_GENERATION, TIME_OF_DAY_EFFECTS, WEATHER_EFFECTS,
};
use crate::rules::rule::{candidate, candidate_mut, FactRef, Rule, RuleError, Scope};

// === TEMPLATE GENERATION ===

pub fn template_generation() -> Phase {
    Phase::new(TEMPLATE_GENERATION)
        .with_rule(Rule::new("seed-region-archetypes", 100, Scope::Memory, roster_missing, seed_roster))
        .with_rule(Rule::new("apply-archetype-score", 50, Scope::EachCandidate, unscored, apply_archetype_score))
        .with_rule(Rule::new("repair-nonpositive-stats", 40, Scope::EachCandidate, stats_unusable, repair_stats))
}

fn roster_missing(memory: &WorkingMemory, _: FactRef, config: &EngineConfig) -> bool {
    !memory.has_generated() && config.region_profile(memory.context().region).is_some()
}

fn seed_roster(memory: &mut WorkingMemory, _: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let region = memory.context().region;
    let profile = config
        .region_profile(region)
        .ok_or(RuleError::MissingFact("region profile"))?;

    for spec in &profile.roster {
        // A stored enemy of the same name takes the slot
        let taken = memory.candidates().any(|(_, c)| c.enemy.name_matches(&spec.name));
        if taken {
            continue;
        }
        let enemy = Enemy::from_template(spec, &config.archetype(spec.archetype), region);
        memory.insert_candidate(enemy, CandidateOrigin::Generated);
    }
    Ok(())
}

fn unscored(memory: &WorkingMemory, fact: FactRef, _: &EngineConfig) -> bool {
    candidate(memory, fact).is_some_and(|e| e.score <= 0.0)
}

fn apply_archetype_score(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let enemy = candidate_mut(memory, fact)?;
    enemy.score = config.archetype(enemy.archetype).base_score;
    Ok(())
}

fn stats_unusable(memory: &WorkingMemory, fact: FactRef, _: &EngineConfig) -> bool {
    candidate(memory, fact).is_some_and(|e| !(e.hp > 0.0 && e.damage > 0.0 && e.hp.is_finite() && e.damage.is_finite()))
}

fn repair_stats(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let enemy = candidate_mut(memory, fact)?;
    let profile = config.archetype(enemy.archetype);
    if !(enemy.hp > 0.0 && enemy.hp.is_finite()) {
        enemy.hp = profile.hp;
    }
    if !(enemy.damage > 0.0 && enemy.damage.is_finite()) {
        enemy.damage = profile.damage;
    }
    Ok(())
}

// === DIFFICULTY ===

pub fn difficulty_adjustment() -> Phase {
    Phase::new(DIFFICULTY_ADJUSTMENT)
        .with_rule(Rule::new("scale-by-difficulty", 100, Scope::EachCandidate, difficulty_known, scale_by_difficulty))
        .with_rule(Rule::new("hard-favours-elites", 50, Scope::EachCandidate, hard_and_strong, hard_bonus))
        .with_rule(Rule::new("easy-favours-regulars", 50, Scope::EachCandidate, easy_and_regular, easy_bonus))
}

fn difficulty_known(memory: &WorkingMemory, fact: FactRef, config: &EngineConfig) -> bool {
    candidate(memory, fact).is_some() && config.difficulty_modifier(memory.context().difficulty).is_some()
}

fn scale_by_difficulty(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let tier = memory.context().difficulty;
    let (hp, damage) = config
        .difficulty_modifier(tier)
        .ok_or(RuleError::MissingFact("difficulty modifier"))?;
    scale_checked(candidate_mut(memory, fact)?, hp, damage)
}

fn hard_and_strong(memory: &WorkingMemory, fact: FactRef, _: &EngineConfig) -> bool {
    memory.context().difficulty == Difficulty::Hard && candidate(memory, fact).is_some_and(|e| e.archetype.is_strong())
}

fn hard_bonus(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    candidate_mut(memory, fact)?.score += config.scoring.hard_elite_bonus;
    Ok(())
}

fn easy_and_regular(memory: &WorkingMemory, fact: FactRef, _: &EngineConfig) -> bool {
    memory.context().difficulty == Difficulty::Easy
        && candidate(memory, fact).is_some_and(|e| e.archetype == Archetype::Regular)
}

fn easy_bonus(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    candidate_mut(memory, fact)?.score += config.scoring.easy_regular_bonus;
    Ok(())
}

// === PLAYER LEVEL ===

pub fn player_level_adjustment() -> Phase {
    Phase::new(PLAYER_LEVEL_ADJUSTMENT)
        .requiring_player()
        .with_rule(Rule::new("scale-by-level-band", 100, Scope::EachCandidate, has_candidate, scale_by_level))
        .with_rule(Rule::new("novice-avoids-bosses", 50, Scope::EachCandidate, novice_facing_boss, novice_penalty))
        .with_rule(Rule::new("novice-prefers-regulars", 50, Scope::EachCandidate, novice_facing_regular, novice_bonus))
        .with_rule(Rule::new("pin-region-boss", 10, Scope::Memory, boss_hunt, pin_region_boss))
}

fn has_candidate(memory: &WorkingMemory, fact: FactRef, _: &EngineConfig) -> bool {
    candidate(memory, fact).is_some()
}

fn scale_by_level(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let (hp, damage) = config.level_modifier(memory.context().player_level());
    scale_checked(candidate_mut(memory, fact)?, hp, damage)
}

fn is_novice(memory: &WorkingMemory, config: &EngineConfig) -> bool {
    memory.player().is_some_and(|p| p.level <= config.scoring.novice_level)
}

fn novice_facing_boss(memory: &WorkingMemory, fact: FactRef, config: &EngineConfig) -> bool {
    is_novice(memory, config) && candidate(memory, fact).is_some_and(|e| e.archetype == Archetype::Boss)
}

fn novice_penalty(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    candidate_mut(memory, fact)?.score -= config.scoring.novice_boss_penalty;
    Ok(())
}

fn novice_facing_regular(memory: &WorkingMemory, fact: FactRef, config: &EngineConfig) -> bool {
    is_novice(memory, config) && candidate(memory, fact).is_some_and(|e| e.archetype == Archetype::Regular)
}

fn novice_bonus(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    candidate_mut(memory, fact)?.score += config.scoring.novice_regular_bonus;
    Ok(())
}

fn boss_hunt(memory: &WorkingMemory, _: FactRef, config: &EngineConfig) -> bool {
    memory.pinned().is_none()
        && memory.context().difficulty == Difficulty::Hard
        && memory.player().is_some_and(|p| p.level >= config.scoring.boss_pin_level)
        && memory.candidates().any(|(_, c)| is_regional_boss(memory, c))
}

fn is_regional_boss(memory: &WorkingMemory, c: &Candidate) -> bool {
    c.origin == CandidateOrigin::Persisted
        && c.enemy.archetype == Archetype::Boss
        && c.enemy.region == memory.context().region
}

fn pin_region_boss(memory: &mut WorkingMemory, _: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
    let best = first_max_by_score(
        memory
            .candidates()
            .filter(|(_, c)| is_regional_boss(memory, c))
            .map(|(id, c)| (id, &c.enemy)),
    );
    let (id, _) = best.ok_or(RuleError::MissingFact("regional boss"))?;
    memory.pin(id);
    Ok(())
}

// === PLAYER BUILD ===

pub fn player_build_counter() -> Phase {
    Phase::new(PLAYER_BUILD_COUNTER)
        .requiring_player()
        .with_rule(Rule::new("counter-bias", 100, Scope::EachCandidate, counters_build, counter_bias))
        .with_rule(Rule::new("weakness-penalty", 80, Scope::EachCandidate, weak_to_build, weakness_penalty))
        .with_rule(Rule::new("arm-elites-against-build", 60, Scope::EachCandidate, strong_without_answer, arm_against_build))
}

fn counters_build(memory: &WorkingMemory, fact: FactRef, config: &EngineConfig) -> bool {
    match (memory.player(), candidate(memory, fact)) {
        (Some(player), Some(enemy)) => counter_score(enemy, player.player_class, config) > 0.0,
        _ => false,
    }
}

fn counter_bias(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let class = memory.player().ok_or(RuleError::MissingFact("player"))?.player_class;
    let enemy = candidate_mut(memory, fact)?;
    enemy.score += counter_score(enemy, class, config);
    Ok(())
}

fn weak_to_build(memory: &WorkingMemory, fact: FactRef, _: &EngineConfig) -> bool {
    let school = memory.player().and_then(|p| p.player_class.school());
    match (school, candidate(memory, fact)) {
        (Some(school), Some(enemy)) => enemy.is_weak_to(school),
        _ => false,
    }
}

fn weakness_penalty(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    candidate_mut(memory, fact)?.score -= config.scoring.weakness_penalty;
    Ok(())
}

fn strong_without_answer(memory: &WorkingMemory, fact: FactRef, config: &EngineConfig) -> bool {
    let Some(player) = memory.player() else {
        return false;
    };
    candidate(memory, fact).is_some_and(|e| {
        e.archetype.is_strong()
            && config
                .grants_for(player.player_class)
                .any(|g| !e.carries(g.kind, &g.tag))
    })
}

fn arm_against_build(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let class = memory.player().ok_or(RuleError::MissingFact("player"))?.player_class;
    let enemy = candidate_mut(memory, fact)?;
    for grant in config.grants_for(class) {
        enemy.grant(grant.kind, &grant.tag);
    }
    Ok(())
}

// === WEATHER ===

pub fn weather_effects() -> Phase {
    Phase::new(WEATHER_EFFECTS).with_rule(Rule::new("weather-bias", 100, Scope::EachCandidate, weather_favours, apply_weather))
}

fn weather_favours(memory: &WorkingMemory, fact: FactRef, config: &EngineConfig) -> bool {
    let ctx = memory.context();
    candidate(memory, fact).is_some_and(|e| {
        config
            .weather_biases(ctx.weather, ctx.region)
            .any(|b| e.has_tag(&b.favoured))
    })
}

fn apply_weather(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let (weather, region) = (memory.context().weather, memory.context().region);
    let enemy = candidate_mut(memory, fact)?;

    // Match against the tags the candidate had before this rule
    let matching: Vec<_> = config
        .weather_biases(weather, region)
        .filter(|b| enemy.has_tag(&b.favoured))
        .collect();
    for bias in matching {
        enemy.score += bias.bonus;
        if let Some(ability) = &bias.grant {
            enemy.add_ability(ability.clone());
        }
    }
    Ok(())
}

// === TIME OF DAY ===

pub fn time_of_day_effects() -> Phase {
    Phase::new(TIME_OF_DAY_EFFECTS).with_rule(Rule::new("time-bias", 100, Scope::EachCandidate, time_favours, apply_time))
}

fn time_favours(memory: &WorkingMemory, fact: FactRef, config: &EngineConfig) -> bool {
    let time = memory.context().time_of_day;
    candidate(memory, fact).is_some_and(|e| config.time_biases(time).any(|b| e.has_tag(&b.favoured)))
}

fn apply_time(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let time = memory.context().time_of_day;
    let enemy = candidate_mut(memory, fact)?;

    let matching: Vec<_> = config.time_biases(time).filter(|b| enemy.has_tag(&b.favoured)).collect();
    for bias in matching {
        enemy.score += bias.bonus;
        enemy.dodge_chance = (enemy.dodge_chance + bias.dodge_bonus).clamp(0.0, 1.0);
        scale_checked(enemy, 1.0, bias.damage_multiplier)?;
    }
    Ok(())
}

// === FINAL SELECTION ===

pub fn final_selection() -> Phase {
    Phase::new(FINAL_SELECTION)
        .with_rule(Rule::new("price-experience", 100, Scope::EachCandidate, has_candidate, price_experience))
        .with_rule(Rule::new("commit-selection", 50, Scope::Memory, nothing_selected, commit_selection))
}

fn price_experience(memory: &mut WorkingMemory, fact: FactRef, config: &EngineConfig) -> Result<(), RuleError> {
    let enemy = candidate_mut(memory, fact)?;
    let multiplier = config.archetype(enemy.archetype).experience_multiplier;
    let reward = (enemy.hp / 10.0 + enemy.damage / 2.0) * multiplier;
    if !reward.is_finite() || reward < 0.0 {
        return Err(RuleError::InvalidStat {
            name: enemy.name.clone(),
            stat: "experience",
        });
    }
    enemy.experience_reward = reward.round() as u32;
    Ok(())
}

fn nothing_selected(memory: &WorkingMemory, _: FactRef, _: &EngineConfig) -> bool {
    memory.selected().is_none() && memory.candidate_count() > 0
}

fn commit_selection(memory: &mut WorkingMemory, _: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
    let choice = memory.pinned().or_else(|| {
        first_max_by_score(memory.candidates().map(|(id, c)| (id, &c.enemy))).map(|(id, _)| id)
    });
    let id = choice.ok_or(RuleError::MissingFact("candidate"))?;
    memory.select(id);
    Ok(())
}

/// Scale hp/damage, refusing results that would break the positive-stat rule
fn scale_checked(enemy: &mut Enemy, hp: f64, damage: f64) -> Result<(), RuleError> {
    let (new_hp, new_damage) = (enemy.hp * hp, enemy.damage * damage);
    if !(new_hp.is_finite() && new_hp > 0.0) {
        return Err(RuleError::InvalidStat { name: enemy.name.clone(), stat: "hp" });
    }
    if !(new_damage.is_finite() && new_damage > 0.0) {
        return Err(RuleError::InvalidStat { name: enemy.name.clone(), stat: "damage" });
    }
    enemy.hp = new_hp;
    enemy.damage = new_damage;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlayerClass, Region, TimeOfDay, WeaponType, Weather};
    use crate::entity::{GameContext, Player};

    fn context(region: Region, difficulty: Difficulty, level: u32, class: PlayerClass) -> GameContext {
        GameContext::new(
            region,
            difficulty,
            Weather::Clear,
            TimeOfDay::Day,
            Some(Player::new("Tester", level, class, WeaponType::Sword)),
        )
    }

    #[test]
    fn test_template_generation_seeds_roster() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Swamp, Difficulty::Medium, 20, PlayerClass::Dex));

        template_generation().run(&mut memory, &config).unwrap();

        let names: Vec<_> = memory.candidates().map(|(_, c)| c.enemy.name.clone()).collect();
        assert_eq!(names, vec!["Bog Lurker", "Mire Hag"]);
        let hag = memory.candidate(1).unwrap();
        assert_eq!(hag.score, 70.0);
        assert_eq!(hag.region, Region::Swamp);
    }

    #[test]
    fn test_template_generation_keeps_persisted_names() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Swamp, Difficulty::Medium, 20, PlayerClass::Dex));
        let mut stored = Enemy::new("Bog Lurker", Archetype::Regular, Region::Swamp);
        stored.hp = 0.0;
        memory.insert_candidate(stored, CandidateOrigin::Persisted);

        template_generation().run(&mut memory, &config).unwrap();

        assert_eq!(memory.candidate_count(), 2);
        let lurker = memory.candidate(0).unwrap();
        assert_eq!(lurker.score, 50.0);
        assert_eq!(lurker.hp, 800.0);
    }

    #[test]
    fn test_unknown_region_generates_nothing() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Unknown, Difficulty::Medium, 20, PlayerClass::Dex));

        let report = template_generation().run(&mut memory, &config).unwrap();

        assert_eq!(report.fired, 0);
        assert_eq!(memory.candidate_count(), 0);
    }

    #[test]
    fn test_difficulty_scaling() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Castle, Difficulty::Hard, 20, PlayerClass::Mage));
        memory.insert_candidate(Enemy::new("Knight", Archetype::Elite, Region::Castle), CandidateOrigin::Persisted);

        difficulty_adjustment().run(&mut memory, &config).unwrap();

        let knight = memory.candidate(0).unwrap();
        assert!((knight.hp - 1500.0).abs() < 1e-9);
        assert!((knight.damage - 140.0).abs() < 1e-9);
        assert_eq!(knight.score, 15.0);
    }

    #[test]
    fn test_unknown_difficulty_applies_no_modifier() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Castle, Difficulty::Unknown, 20, PlayerClass::Mage));
        memory.insert_candidate(Enemy::new("Knight", Archetype::Elite, Region::Castle), CandidateOrigin::Persisted);

        let report = difficulty_adjustment().run(&mut memory, &config).unwrap();

        assert_eq!(report.fired, 0);
        assert_eq!(memory.candidate(0).unwrap().hp, 1000.0);
    }

    #[test]
    fn test_level_band_and_boss_pin() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Castle, Difficulty::Hard, 60, PlayerClass::Strength));
        let mut lord = Enemy::new("Iron Lord", Archetype::Boss, Region::Castle);
        lord.score = 10.0;
        memory.insert_candidate(Enemy::new("Guard", Archetype::Regular, Region::Castle), CandidateOrigin::Persisted);
        memory.insert_candidate(lord, CandidateOrigin::Persisted);

        player_level_adjustment().run(&mut memory, &config).unwrap();
        final_selection().run(&mut memory, &config).unwrap();

        assert_eq!(memory.pinned(), Some(1));
        assert_eq!(memory.selected_enemy().map(|e| e.name.as_str()), Some("Iron Lord"));
        assert!((memory.candidate(0).unwrap().hp - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_novice_steers_away_from_bosses() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Castle, Difficulty::Medium, 5, PlayerClass::Strength));
        let mut lord = Enemy::new("Iron Lord", Archetype::Boss, Region::Castle);
        lord.score = 90.0;
        let mut guard = Enemy::new("Guard", Archetype::Regular, Region::Castle);
        guard.score = 50.0;
        memory.insert_candidate(lord, CandidateOrigin::Persisted);
        memory.insert_candidate(guard, CandidateOrigin::Persisted);

        player_level_adjustment().run(&mut memory, &config).unwrap();

        assert_eq!(memory.candidate(0).unwrap().score, 60.0);
        assert_eq!(memory.candidate(1).unwrap().score, 70.0);
        assert_eq!(memory.pinned(), None);
    }

    #[test]
    fn test_build_counter_biases_and_arms() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Swamp, Difficulty::Medium, 20, PlayerClass::Dex));
        let mut witch = Enemy::new("Swamp Witch", Archetype::Elite, Region::Swamp);
        witch.add_ability("stealth");
        let mut brute = Enemy::new("Bog Brute", Archetype::Regular, Region::Swamp);
        brute.weaknesses.insert("dex".into());
        memory.insert_candidate(witch, CandidateOrigin::Persisted);
        memory.insert_candidate(brute, CandidateOrigin::Persisted);

        player_build_counter().run(&mut memory, &config).unwrap();

        let witch = memory.candidate(0).unwrap();
        // stealth (30) counted once; granted poison_blade does not re-trigger the bias
        assert_eq!(witch.score, 30.0);
        assert!(witch.abilities.contains("poison_blade"));
        assert_eq!(memory.candidate(1).unwrap().score, -20.0);
    }

    #[test]
    fn test_player_phases_fail_without_player() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(GameContext::default());
        assert!(player_build_counter().run(&mut memory, &config).is_err());
        assert!(player_level_adjustment().run(&mut memory, &config).is_err());
    }

    #[test]
    fn test_fog_rewards_stealth_and_grants_ambush() {
        let config = EngineConfig::default();
        let mut ctx = context(Region::Swamp, Difficulty::Easy, 15, PlayerClass::Dex);
        ctx.weather = Weather::Fog;
        let mut memory = WorkingMemory::new(ctx);
        let mut stalker = Enemy::new("Stalker", Archetype::Regular, Region::Swamp);
        stalker.add_ability("stealth");
        memory.insert_candidate(stalker, CandidateOrigin::Persisted);
        memory.insert_candidate(Enemy::new("Brute", Archetype::Regular, Region::Swamp), CandidateOrigin::Persisted);

        weather_effects().run(&mut memory, &config).unwrap();

        let stalker = memory.candidate(0).unwrap();
        assert_eq!(stalker.score, 20.0);
        assert!(stalker.abilities.contains("ambush"));
        assert_eq!(memory.candidate(1).unwrap().score, 0.0);
    }

    #[test]
    fn test_night_boosts_nocturnal_damage() {
        let config = EngineConfig::default();
        let mut ctx = context(Region::Castle, Difficulty::Medium, 20, PlayerClass::Mage);
        ctx.time_of_day = TimeOfDay::Night;
        let mut memory = WorkingMemory::new(ctx);
        let mut bat = Enemy::new("Vampire Bat", Archetype::Regular, Region::Castle);
        bat.behaviour = "nocturnal".into();
        memory.insert_candidate(bat, CandidateOrigin::Persisted);

        time_of_day_effects().run(&mut memory, &config).unwrap();

        let bat = memory.candidate(0).unwrap();
        assert!((bat.damage - 110.0).abs() < 1e-9);
        assert_eq!(bat.score, 15.0);
    }

    #[test]
    fn test_final_selection_prices_and_picks_best() {
        let config = EngineConfig::default();
        let mut memory = WorkingMemory::new(context(Region::Castle, Difficulty::Medium, 20, PlayerClass::Mage));
        let mut a = Enemy::new("A", Archetype::Regular, Region::Castle);
        a.score = 10.0;
        let mut b = Enemy::new("B", Archetype::Regular, Region::Castle);
        b.score = 30.0;
        let mut c = Enemy::new("C", Archetype::Regular, Region::Castle);
        c.score = 30.0;
        memory.insert_candidate(a, CandidateOrigin::Persisted);
        memory.insert_candidate(b, CandidateOrigin::Persisted);
        memory.insert_candidate(c, CandidateOrigin::Persisted);

        final_selection().run(&mut memory, &config).unwrap();

        assert_eq!(memory.selected(), Some(1));
        // (1000 / 10 + 100 / 2) * 1.0
        assert_eq!(memory.candidate(0).unwrap().experience_reward, 150);
    }
}
