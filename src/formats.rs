use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Element name used by the character export.
    pub fn key(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterClass {
    pub name: String,
    pub level: i64,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbilityScore {
    pub score: String,
    pub bonus: String,
    pub save: String,
    pub save_proficient: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vitals {
    pub hp_total: String,
    pub hp_wounds: String,
    pub hp_temp: String,
    pub armor_class: String,
    pub speed: String,
    pub initiative: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub total: String,
    pub proficient: bool,
    pub governing_ability: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub level: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feat {
    pub name: String,
    pub category: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub count: String,
    pub cost: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coin {
    #[serde(rename = "PP")]
    Platinum,
    #[serde(rename = "GP")]
    Gold,
    #[serde(rename = "EP")]
    Electrum,
    #[serde(rename = "SP")]
    Silver,
    #[serde(rename = "CP")]
    Copper,
}

impl Coin {
    pub const ALL: [Coin; 5] = [
        Coin::Platinum,
        Coin::Gold,
        Coin::Electrum,
        Coin::Silver,
        Coin::Copper,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Coin::Platinum => "PP",
            Coin::Gold => "GP",
            Coin::Electrum => "EP",
            Coin::Silver => "SP",
            Coin::Copper => "CP",
        }
    }

    pub fn from_code(code: &str) -> Option<Coin> {
        let code = code.trim();
        Coin::ALL
            .into_iter()
            .find(|coin| coin.code().eq_ignore_ascii_case(code))
    }
}

/// Amounts keyed by coin; every coin is always present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coins(pub BTreeMap<Coin, String>);

impl Default for Coins {
    fn default() -> Self {
        Self(Coin::ALL.into_iter().map(|c| (c, "0".to_owned())).collect())
    }
}

impl Coins {
    pub fn amount(&self, coin: Coin) -> &str {
        self.0.get(&coin).map(String::as_str).unwrap_or("0")
    }

    pub fn is_empty(&self) -> bool {
        Coin::ALL
            .iter()
            .all(|coin| matches!(self.amount(*coin).trim(), "" | "0"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub max: String,
    pub used: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Spell {
    pub name: String,
    pub level: String,
    pub prepared: bool,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub components: String,
    pub duration: String,
    pub ritual: bool,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterView {
    pub name: String,
    pub race: String,
    pub subrace: String,
    pub alignment: String,
    pub background: String,

    pub classes: Vec<CharacterClass>,
    pub total_level: i64,

    pub abilities: BTreeMap<Ability, AbilityScore>,

    pub proficiency_bonus: i64,
    pub spellcasting_ability: Option<Ability>,
    pub spell_save_dc: i64,
    pub spell_attack_bonus: i64,
    pub melee_attack_bonus: i64,

    pub vitals: Vitals,

    pub skills: Vec<Skill>,
    pub features: Vec<Feature>,
    pub feats: Vec<Feat>,
    pub inventory: Vec<Item>,
    pub coins: Coins,

    /// Keyed by slot level 1..=9; only levels with a nonzero maximum.
    pub spell_slots: BTreeMap<u8, Usage>,
    pub sorcery_points: Option<Usage>,
    pub spells: Vec<Spell>,
}
