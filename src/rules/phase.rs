//! Phase evaluation
//!
//! A phase fires its rules against working memory until no activation is
//! eligible or the firing cap is reached. Every (rule, fact) activation
//! fires at most once per phase. After each firing the agenda is scanned
//! again from the top, so a higher-salience rule that became eligible
//! through the last mutation fires before lower ones.

use crate::core::config::EngineConfig;
use crate::forward::memory::WorkingMemory;
use crate::rules::rule::{FactRef, Rule};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Failure of a whole phase
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhaseError {
    #[error("phase '{phase}' requires a {fact} fact")]
    MissingFact { phase: &'static str, fact: &'static str },
    #[error("phase '{phase}' panicked: {message}")]
    Panicked { phase: &'static str, message: String },
}

/// Outcome of running one phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: &'static str,
    pub fired: usize,
    pub failed_rules: usize,
    /// True when the firing cap ended the phase
    pub capped: bool,
}

/// A named batch of salience-ordered rules
#[derive(Debug, Clone)]
pub struct Phase {
    name: &'static str,
    rules: Vec<Rule>,
    requires_player: bool,
}

impl Phase {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
            requires_player: false,
        }
    }

    /// Fail the phase when the memory holds no player
    pub fn requiring_player(mut self) -> Self {
        self.requires_player = true;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Add a rule, keeping the agenda order (salience desc, then declaration)
    pub fn add_rule(&mut self, rule: Rule) {
        let at = self
            .rules
            .iter()
            .position(|r| r.salience < rule.salience)
            .unwrap_or(self.rules.len());
        self.rules.insert(at, rule);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn requires_player(&self) -> bool {
        self.requires_player
    }

    /// Rules in the order they take precedence
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn run(&self, memory: &mut WorkingMemory, config: &EngineConfig) -> Result<PhaseReport, PhaseError> {
        if self.requires_player && memory.player().is_none() {
            return Err(PhaseError::MissingFact {
                phase: self.name,
                fact: "player",
            });
        }

        panic::catch_unwind(AssertUnwindSafe(|| self.fire_all(memory, config))).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".into());
            PhaseError::Panicked {
                phase: self.name,
                message,
            }
        })
    }

    fn fire_all(&self, memory: &mut WorkingMemory, config: &EngineConfig) -> PhaseReport {
        let mut fired: HashSet<(usize, FactRef)> = HashSet::new();
        let mut report = PhaseReport {
            phase: self.name,
            fired: 0,
            failed_rules: 0,
            capped: false,
        };

        loop {
            if report.fired >= config.firing_cap {
                tracing::warn!(phase = self.name, cap = config.firing_cap, "Firing cap reached");
                report.capped = true;
                break;
            }

            let Some((index, fact)) = self.next_activation(memory, config, &fired) else {
                break;
            };
            fired.insert((index, fact));
            report.fired += 1;

            let rule = &self.rules[index];
            if let Err(e) = (rule.then)(memory, fact, config) {
                report.failed_rules += 1;
                tracing::warn!(phase = self.name, rule = rule.name, ?fact, error = %e, "Rule action failed, skipping");
            } else {
                tracing::trace!(phase = self.name, rule = rule.name, ?fact, "Rule fired");
            }
        }

        report
    }

    fn next_activation(
        &self,
        memory: &WorkingMemory,
        config: &EngineConfig,
        fired: &HashSet<(usize, FactRef)>,
    ) -> Option<(usize, FactRef)> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.activations(memory)
                .into_iter()
                .find(|fact| !fired.contains(&(index, *fact)) && (rule.when)(memory, *fact, config))
                .map(|fact| (index, fact))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Archetype, Region};
    use crate::entity::{Enemy, GameContext};
    use crate::forward::memory::CandidateOrigin;
    use crate::rules::rule::{candidate, candidate_mut, RuleError, Scope};

    fn memory_with(names: &[&str]) -> WorkingMemory {
        let mut memory = WorkingMemory::new(GameContext::default());
        for name in names {
            memory.insert_candidate(
                Enemy::new(*name, Archetype::Regular, Region::Castle),
                CandidateOrigin::Persisted,
            );
        }
        memory
    }

    fn always(_: &WorkingMemory, _: FactRef, _: &EngineConfig) -> bool {
        true
    }

    fn add_ten(memory: &mut WorkingMemory, fact: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
        candidate_mut(memory, fact)?.score += 10.0;
        Ok(())
    }

    fn double(memory: &mut WorkingMemory, fact: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
        candidate_mut(memory, fact)?.score *= 2.0;
        Ok(())
    }

    fn fail(_: &mut WorkingMemory, _: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
        Err(RuleError::Failed("boom".into()))
    }

    fn explode(_: &mut WorkingMemory, _: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
        panic!("rule exploded");
    }

    fn spawn_clone(memory: &mut WorkingMemory, _: FactRef, _: &EngineConfig) -> Result<(), RuleError> {
        memory.insert_candidate(
            Enemy::new("Spawn", Archetype::Regular, Region::Castle),
            CandidateOrigin::Generated,
        );
        Ok(())
    }

    fn unscored(memory: &WorkingMemory, fact: FactRef, _: &EngineConfig) -> bool {
        candidate(memory, fact).is_some_and(|e| e.score == 0.0)
    }

    #[test]
    fn test_each_activation_fires_once() {
        let phase = Phase::new("test").with_rule(Rule::new("add", 10, Scope::EachCandidate, always, add_ten));
        let mut memory = memory_with(&["a", "b"]);

        let report = phase.run(&mut memory, &EngineConfig::default()).unwrap();

        assert_eq!(report.fired, 2);
        assert_eq!(memory.candidate(0).unwrap().score, 10.0);
        assert_eq!(memory.candidate(1).unwrap().score, 10.0);
    }

    #[test]
    fn test_higher_salience_fires_first() {
        // add(10) then double => 20; the reverse order would give 10
        let phase = Phase::new("test")
            .with_rule(Rule::new("double", 1, Scope::EachCandidate, always, double))
            .with_rule(Rule::new("add", 5, Scope::EachCandidate, always, add_ten));
        let mut memory = memory_with(&["a"]);

        phase.run(&mut memory, &EngineConfig::default()).unwrap();

        assert_eq!(memory.candidate(0).unwrap().score, 20.0);
        assert_eq!(phase.rules()[0].name, "add");
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let phase = Phase::new("test")
            .with_rule(Rule::new("add", 5, Scope::EachCandidate, always, add_ten))
            .with_rule(Rule::new("double", 5, Scope::EachCandidate, always, double));
        let mut memory = memory_with(&["a"]);

        phase.run(&mut memory, &EngineConfig::default()).unwrap();

        assert_eq!(memory.candidate(0).unwrap().score, 20.0);
    }

    #[test]
    fn test_condition_checked_against_current_memory() {
        // Once "add" scores the candidate, "double-unscored" is no longer eligible
        let phase = Phase::new("test")
            .with_rule(Rule::new("add", 5, Scope::EachCandidate, always, add_ten))
            .with_rule(Rule::new("double-unscored", 1, Scope::EachCandidate, unscored, double));
        let mut memory = memory_with(&["a"]);

        let report = phase.run(&mut memory, &EngineConfig::default()).unwrap();

        assert_eq!(report.fired, 1);
        assert_eq!(memory.candidate(0).unwrap().score, 10.0);
    }

    #[test]
    fn test_failing_rule_is_skipped() {
        let phase = Phase::new("test")
            .with_rule(Rule::new("fail", 10, Scope::EachCandidate, always, fail))
            .with_rule(Rule::new("add", 1, Scope::EachCandidate, always, add_ten));
        let mut memory = memory_with(&["a"]);

        let report = phase.run(&mut memory, &EngineConfig::default()).unwrap();

        assert_eq!(report.failed_rules, 1);
        assert_eq!(memory.candidate(0).unwrap().score, 10.0);
    }

    #[test]
    fn test_firing_cap_guarantees_termination() {
        // Every spawned candidate creates a new activation for the same rule
        let phase = Phase::new("test").with_rule(Rule::new("spawn", 1, Scope::EachCandidate, always, spawn_clone));
        let mut memory = memory_with(&["seed"]);
        let config = EngineConfig { firing_cap: 50, ..EngineConfig::default() };

        let report = phase.run(&mut memory, &config).unwrap();

        assert!(report.capped);
        assert_eq!(report.fired, 50);
        assert_eq!(memory.candidate_count(), 51);
    }

    #[test]
    fn test_panicking_phase_reports_failure() {
        let phase = Phase::new("test").with_rule(Rule::new("explode", 1, Scope::Memory, always, explode));
        let mut memory = memory_with(&[]);

        let result = phase.run(&mut memory, &EngineConfig::default());

        assert!(matches!(result, Err(PhaseError::Panicked { phase: "test", .. })));
    }

    #[test]
    fn test_player_requirement() {
        let phase = Phase::new("needs-player").requiring_player();
        let mut memory = memory_with(&[]);

        let result = phase.run(&mut memory, &EngineConfig::default());

        assert_eq!(
            result,
            Err(PhaseError::MissingFact { phase: "needs-player", fact: "player" })
        );
    }
}
