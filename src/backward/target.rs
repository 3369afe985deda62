use crate::core::types::Archetype;
use std::fmt;

/// What a backward query asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// Whichever regional enemy best counters the player's class
    CounterOf,
    /// Best-scoring regional enemy of an archetype
    BestOf(Archetype),
    /// One fixed enemy, matched case-insensitively
    Named(String),
}

impl TargetSpec {
    pub const AUTO_COUNTER: &'static str = "AUTO_COUNTER";
    pub const AUTO_BOSS: &'static str = "AUTO_BOSS";
    pub const AUTO_ELITE: &'static str = "AUTO_ELITE";

    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        if target.eq_ignore_ascii_case(Self::AUTO_COUNTER) {
            Self::CounterOf
        } else if target.eq_ignore_ascii_case(Self::AUTO_BOSS) {
            Self::BestOf(Archetype::Boss)
        } else if target.eq_ignore_ascii_case(Self::AUTO_ELITE) {
            Self::BestOf(Archetype::Elite)
        } else {
            Self::Named(target.to_string())
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CounterOf => f.write_str(Self::AUTO_COUNTER),
            Self::BestOf(Archetype::Boss) => f.write_str(Self::AUTO_BOSS),
            Self::BestOf(Archetype::Elite) => f.write_str(Self::AUTO_ELITE),
            Self::BestOf(other) => write!(f, "AUTO_{}", other.to_string().to_uppercase()),
            Self::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_targets() {
        assert_eq!(TargetSpec::parse("AUTO_COUNTER"), TargetSpec::CounterOf);
        assert_eq!(TargetSpec::parse(" auto_boss "), TargetSpec::BestOf(Archetype::Boss));
        assert_eq!(TargetSpec::parse("AUTO_ELITE"), TargetSpec::BestOf(Archetype::Elite));
    }

    #[test]
    fn test_parse_named_target() {
        let spec = TargetSpec::parse("Iron Lord");
        assert_eq!(spec, TargetSpec::Named("Iron Lord".into()));
        assert_eq!(spec.to_string(), "Iron Lord");
    }
}
