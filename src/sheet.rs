use crate::extract;
use crate::formats::{Ability, CharacterView};
use crate::stats;
use crate::tree::{Node, get_text, parse_int_or};

/// Builds the render-ready view of a parsed export. Accepts either the export
/// root (reads beneath `character`) or the character element itself.
pub fn assemble(tree: &Node) -> CharacterView {
    let character = match tree.as_map().and_then(|root| root.get("character")) {
        Some(character) => character.unwrapped(),
        None => tree,
    };

    let name = get_text(character, "name", "");
    let race = get_text(character, "race", "");
    let subrace = get_text(character, "subrace", "");
    let alignment = get_text(character, "alignment", "");
    let background = get_text(character, "background", "");

    let classes = extract::classes(character);
    let total_level = classes
        .iter()
        .fold(0i64, |total, class| total.saturating_add(class.level));
    let proficiency_bonus = stats::proficiency_bonus(total_level);

    let abilities = extract::abilities(character);
    let modifier = |ability: Ability| {
        abilities
            .get(&ability)
            .map(|score| parse_int_or(&score.bonus, 0))
            .unwrap_or(0)
    };

    let class_names: Vec<&str> = classes.iter().map(|class| class.name.as_str()).collect();
    let spellcasting_ability = stats::spellcasting_ability(&class_names[..]);
    let spellcasting_modifier = spellcasting_ability.map(modifier).unwrap_or(0);
    let spell_save_dc = stats::spell_save_dc(proficiency_bonus, spellcasting_modifier);
    let spell_attack_bonus = stats::spell_attack_bonus(proficiency_bonus, spellcasting_modifier);
    let melee_attack_bonus =
        stats::melee_attack_bonus(modifier(Ability::Strength), proficiency_bonus);

    let dexterity_bonus = abilities
        .get(&Ability::Dexterity)
        .map(|score| score.bonus.clone())
        .unwrap_or_else(|| "0".to_owned());
    let vitals = extract::vitals(character, &dexterity_bonus);

    let skills = extract::skills(character);
    let features = extract::features(character);
    let feats = extract::feats(character);
    let inventory = extract::inventory(character);
    let coins = extract::coins(character);
    let spell_slots = extract::spell_slots(character);
    let sorcery_points = extract::sorcery_points(character);
    let spells = extract::spells(character);

    tracing::debug!(
        name = %name,
        total_level,
        classes = classes.len(),
        skills = skills.len(),
        features = features.len(),
        feats = feats.len(),
        items = inventory.len(),
        spells = spells.len(),
        ?spellcasting_ability,
        "assembled character view"
    );

    CharacterView {
        name,
        race,
        subrace,
        alignment,
        background,
        classes,
        total_level,
        abilities,
        proficiency_bonus,
        spellcasting_ability,
        spell_save_dc,
        spell_attack_bonus,
        melee_attack_bonus,
        vitals,
        skills,
        features,
        feats,
        inventory,
        coins,
        spell_slots,
        sorcery_points,
        spells,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_tree_yields_defaults() {
        let view = assemble(&Node::from(json!({})));
        assert_eq!(view.name, "");
        assert_eq!(view.total_level, 0);
        assert_eq!(view.proficiency_bonus, 2);
        assert_eq!(view.abilities.len(), 6);
        assert_eq!(view.vitals.armor_class, "10");
        assert_eq!(view.vitals.initiative, "+0");
        assert!(view.skills.is_empty());
        assert!(view.spells.is_empty());
        assert!(view.spell_slots.is_empty());
        assert_eq!(view.sorcery_points, None);
    }

    #[test]
    fn fighter_stats_are_strength_based() {
        let tree = Node::from(json!({
            "character": [{
                "name": "Brakka",
                "abilities": {"strength": {"score": "16", "bonus": "3"}},
                "classes": {"id-00001": {"name": "Fighter", "level": "5"}},
            }]
        }));
        let view = assemble(&tree);
        assert_eq!(view.name, "Brakka");
        assert_eq!(view.total_level, 5);
        assert_eq!(view.proficiency_bonus, 3);
        assert_eq!(view.melee_attack_bonus, 6);
        assert_eq!(view.spellcasting_ability, None);
        assert_eq!(view.spell_save_dc, 11);
        assert_eq!(view.spell_attack_bonus, 3);
    }

    #[test]
    fn warlock_uses_charisma() {
        let tree = Node::from(json!({
            "abilities": {
                "charisma": {"bonus": "4"},
                "strength": {"bonus": "-1"},
            },
            "classes": {"id-00001": {"name": "Warlock", "level": "9"}},
        }));
        let view = assemble(&tree);
        assert_eq!(view.spellcasting_ability, Some(Ability::Charisma));
        assert_eq!(view.proficiency_bonus, 4);
        assert_eq!(view.spell_save_dc, 16);
        assert_eq!(view.spell_attack_bonus, 8);
        assert_eq!(view.melee_attack_bonus, 3);
    }

    #[test]
    fn extreme_numbers_saturate() {
        let tree = Node::from(json!({
            "abilities": {
                "strength": {"bonus": i64::MAX.to_string()},
                "wisdom": {"bonus": i64::MIN.to_string()},
            },
            "classes": {
                "id-00001": {"name": "Cleric", "level": i64::MAX.to_string()},
                "id-00002": {"name": "Fighter", "level": "1"},
            },
        }));
        let view = assemble(&tree);
        assert_eq!(view.total_level, i64::MAX);
        assert_eq!(view.melee_attack_bonus, i64::MAX);
        assert_eq!(view.spell_attack_bonus, i64::MIN + view.proficiency_bonus);
    }

    #[test]
    fn multiclass_levels_are_summed() {
        let tree = Node::from(json!({
            "classes": {
                "id-00001": {"name": "Fighter", "level": "3"},
                "id-00002": {"name": "Wizard", "level": "2"},
            },
            "abilities": {"intelligence": {"bonus": "3"}},
        }));
        let view = assemble(&tree);
        assert_eq!(view.total_level, 5);
        assert_eq!(view.spellcasting_ability, Some(Ability::Intelligence));
        assert_eq!(view.spell_save_dc, 14);
    }
}
