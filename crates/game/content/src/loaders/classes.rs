//! Class table loader.
//!
//! Loads skills, class counters and trigger tables from RON into a
//! [`ContentRegistry`].

use std::collections::HashSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::registry::{ClassDefinition, ContentRegistry};

/// Loader for class tables from RON files.
pub struct ClassLoader;

impl ClassLoader {
    /// Load a class table.
    ///
    /// RON format: `Vec<ClassDefinition>`
    ///
    /// ```ron
    /// [
    ///     (
    ///         name: "rogue",
    ///         archetype: Some(Aggressive),
    ///         resources: [(name: "combo", max: 5)],
    ///         skills: [(name: "Backstab", kind: BraveAttack, crit_bonus: 25)],
    ///         triggers: { OnCritical: [GainResource(name: "combo", amount: 1)] },
    ///     ),
    /// ]
    /// ```
    pub fn load(path: &Path) -> LoadResult<ContentRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load classes from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ContentRegistry> {
        let classes: Vec<ClassDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class RON: {}", e))?;

        let mut seen = HashSet::new();
        for class in &classes {
            anyhow::ensure!(
                seen.insert(class.name.clone()),
                "class '{}' is defined twice",
                class.name
            );
            validate_class(class)?;
        }
        Ok(ContentRegistry::from_classes(classes))
    }
}

/// Every counter a skill or trigger names must be declared by the class.
fn validate_class(class: &ClassDefinition) -> LoadResult<()> {
    let declared: HashSet<&str> = class.resources.iter().map(|r| r.name.as_str()).collect();

    for skill in &class.skills {
        let named = skill.resource_cost.iter().chain(skill.resource_gain.iter());
        for amount in named {
            anyhow::ensure!(
                declared.contains(amount.name.as_str()),
                "class '{}': skill '{}' uses undeclared resource '{}'",
                class.name,
                skill.name,
                amount.name
            );
        }
    }
    for (trigger, effects) in &class.triggers {
        for effect in effects {
            if let game_core::TriggerEffect::GainResource { name, .. } = effect {
                anyhow::ensure!(
                    declared.contains(name.as_str()),
                    "class '{}': {} trigger gains undeclared resource '{}'",
                    class.name,
                    trigger,
                    name
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::env::{SkillOracle, Trigger, TriggerOracle};
    use game_core::{ActionKind, ClassTag, SkillFlags, StatusTag};

    const ROGUE: &str = r#"
[
    (
        name: "rogue",
        archetype: Some(Aggressive),
        resources: [(name: "combo", max: 5)],
        skills: [
            (name: "Backstab", kind: BraveAttack, brave_power: 110, crit_bonus: 25),
            (
                name: "Eviscerate",
                kind: HpAttack,
                hp_power: 150,
                resource_cost: Some((name: "combo", amount: 3)),
                flags: "SURE_HIT",
            ),
            (
                name: "Venom Strike",
                kind: BraveAttack,
                statuses: [(tag: Poison, chance: 60, duration: 4, intensity: 10.0)],
            ),
        ],
        triggers: {
            OnCritical: [GainResource(name: "combo", amount: 1)],
        },
    ),
]
"#;

    #[test]
    fn parses_skills_and_triggers() {
        let registry = ClassLoader::parse(ROGUE).unwrap();
        let tag = ClassTag::from("rogue");

        let eviscerate = registry.skill(&tag, "Eviscerate").unwrap();
        assert_eq!(eviscerate.kind, ActionKind::HpAttack);
        assert!(eviscerate.flags.contains(SkillFlags::SURE_HIT));
        assert_eq!(eviscerate.brave_power, 100);

        let venom = registry.skill(&tag, "Venom Strike").unwrap();
        assert_eq!(venom.statuses[0].tag, StatusTag::Poison);
        assert!(!venom.statuses[0].on_self);

        assert_eq!(registry.effects(&tag, Trigger::OnCritical).len(), 1);
    }

    #[test]
    fn rejects_undeclared_resources() {
        let broken = ROGUE.replace(r#"resources: [(name: "combo", max: 5)],"#, "");
        let err = ClassLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("undeclared resource"));
    }

    #[test]
    fn rejects_duplicate_classes() {
        let doubled = format!("[{0}, {0}]", r#"(name: "mage")"#);
        assert!(ClassLoader::parse(&doubled).is_err());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.ron");
        std::fs::write(&path, "[ (name: ").unwrap();
        let err = ClassLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("classes.ron"));
    }
}
