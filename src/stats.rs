use crate::formats::Ability;

/// `2 + floor((level - 1) / 4)`; levels below 1 count as level 1.
pub fn proficiency_bonus(total_level: i64) -> i64 {
    let level = if total_level < 1 { 1 } else { total_level };
    2 + (level - 1).div_euclid(4)
}

/// Signed rendering of a modifier (`+0`, `+3`, `-1`). Non-numeric input is
/// returned unchanged.
pub fn format_modifier(value: &str) -> String {
    match value.trim().parse::<i64>() {
        Ok(n) => format_bonus(n),
        Err(_) => value.to_owned(),
    }
}

pub fn format_bonus(n: i64) -> String {
    if n >= 0 { format!("+{n}") } else { n.to_string() }
}

/// Ability governing spellcasting for the given classes. When several classes
/// qualify, the last one in list order wins.
pub fn spellcasting_ability<S: AsRef<str>>(class_names: &[S]) -> Option<Ability> {
    let mut ability = None;
    for name in class_names {
        let name = name.as_ref().to_lowercase();
        if name.contains("wizard") {
            ability = Some(Ability::Intelligence);
        } else if ["druid", "cleric", "ranger"]
            .iter()
            .any(|class| name.contains(class))
        {
            ability = Some(Ability::Wisdom);
        } else if ["paladin", "sorcerer", "bard", "warlock"]
            .iter()
            .any(|class| name.contains(class))
        {
            ability = Some(Ability::Charisma);
        }
    }
    ability
}

pub fn spell_save_dc(proficiency_bonus: i64, spellcasting_modifier: i64) -> i64 {
    8i64.saturating_add(proficiency_bonus)
        .saturating_add(spellcasting_modifier)
}

pub fn spell_attack_bonus(proficiency_bonus: i64, spellcasting_modifier: i64) -> i64 {
    proficiency_bonus.saturating_add(spellcasting_modifier)
}

/// Strength-based regardless of weapon properties.
pub fn melee_attack_bonus(strength_modifier: i64, proficiency_bonus: i64) -> i64 {
    strength_modifier.saturating_add(proficiency_bonus)
}
