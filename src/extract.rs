//! Field extractors over the character subtree.
//!
//! Every extractor tolerates missing or oddly shaped input and falls back to
//! defaults; nothing here returns an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::formats::{
    Ability, AbilityScore, CharacterClass, Coin, Coins, Feat, Feature, Item, Skill, Spell, Usage,
    Vitals,
};
use crate::stats::format_modifier;
use crate::tree::{Node, get, get_text, parse_int_or};

/// Keys of repeated records: `id-00001` style, plus `slot1` style in the coin purse.
static INDEXED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:id-|slot)\d+$").expect("valid indexed-entry pattern"));

const SORCERY_POINTS: &str = "Sorcery Points";

pub fn is_indexed_entry(key: &str) -> bool {
    INDEXED_ENTRY.is_match(key)
}

/// Maps every indexed entry under `key`, in document order.
pub fn entries<T>(character: &Node, key: &str, mut map: impl FnMut(&Node) -> T) -> Vec<T> {
    let Some(Node::Map(list)) = get(character, key) else {
        return Vec::new();
    };
    list.iter()
        .filter(|(k, _)| is_indexed_entry(k))
        .map(|(_, entry)| map(entry.unwrapped()))
        .collect()
}

/// Paragraphs of a rich-text field, in document order, blanks dropped.
/// With `lead_in`, a paragraph's bold fragment is prefixed to its text.
pub fn paragraphs(entry: &Node, key: &str, lead_in: bool) -> Vec<String> {
    let Some(node) = get(entry, key) else {
        return Vec::new();
    };
    let paras: Vec<&Node> = match node {
        Node::Text(_) => vec![node],
        // Raw child: the normalizer would collapse a lone `<p>` with a bold
        // lead-in down to its trailing text.
        Node::Map(map) => match map.get("p").map(Node::unwrapped) {
            Some(Node::List(items)) => items.iter().collect(),
            Some(p) => vec![p],
            None => Vec::new(),
        },
        Node::List(items) => items.iter().collect(),
    };

    paras
        .into_iter()
        .map(|p| paragraph_text(p, lead_in))
        .filter(|text| !text.is_empty())
        .collect()
}

fn paragraph_text(p: &Node, lead_in: bool) -> String {
    let p = p.unwrapped();
    if lead_in
        && let Node::Map(_) = p
        && let Some(bold) = get(p, "b").and_then(plain_text)
    {
        let rest = match p.as_map().and_then(|m| m.get("_")) {
            Some(rest) => plain_text(rest.unwrapped()).unwrap_or_default(),
            None => String::new(),
        };
        return format!("{} {}", bold.trim(), rest.trim()).trim().to_owned();
    }
    get_text(p, "", "").trim().to_owned()
}

fn plain_text(node: &Node) -> Option<String> {
    match get(node, "") {
        Some(Node::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

pub fn classes(character: &Node) -> Vec<CharacterClass> {
    entries(character, "classes", |entry| CharacterClass {
        name: get_text(entry, "name", ""),
        level: parse_int_or(&get_text(entry, "level", "0"), 0),
        specialization: get_text(entry, "specialization", ""),
    })
}

pub fn abilities(character: &Node) -> BTreeMap<Ability, AbilityScore> {
    Ability::ALL
        .into_iter()
        .map(|ability| {
            let base = format!("abilities.{}", ability.key());
            let bonus = get_text(character, &format!("{base}.bonus"), "0");
            let score = AbilityScore {
                score: get_text(character, &format!("{base}.score"), "10"),
                save: get_text(character, &format!("{base}.save"), &bonus),
                save_proficient: parse_int_or(
                    &get_text(character, &format!("{base}.saveprof"), "0"),
                    0,
                ) != 0,
                bonus,
            };
            (ability, score)
        })
        .collect()
}

pub fn vitals(character: &Node, dexterity_bonus: &str) -> Vitals {
    Vitals {
        hp_total: get_text(character, "hp.total", "0"),
        hp_wounds: get_text(character, "hp.wounds", "0"),
        hp_temp: get_text(character, "hp.temporary", "0"),
        armor_class: get_text(character, "defenses.ac.total", "10"),
        speed: get_text(character, "speed.total", "30"),
        initiative: get_text(
            character,
            "initiative.total",
            &format_modifier(dexterity_bonus),
        ),
    }
}

/// Skills sorted by name.
pub fn skills(character: &Node) -> Vec<Skill> {
    let mut skills = entries(character, "skilllist", |entry| Skill {
        name: get_text(entry, "name", ""),
        total: get_text(entry, "total", "0"),
        proficient: parse_int_or(&get_text(entry, "prof", "0"), 0) > 0,
        governing_ability: get_text(entry, "stat", ""),
    });
    skills.sort_by(|a, b| a.name.cmp(&b.name));
    skills
}

pub fn features(character: &Node) -> Vec<Feature> {
    entries(character, "featurelist", |entry| Feature {
        name: get_text(entry, "name", ""),
        level: get_text(entry, "level", ""),
        description: paragraphs(entry, "text", false),
    })
}

pub fn feats(character: &Node) -> Vec<Feat> {
    entries(character, "featlist", |entry| Feat {
        name: get_text(entry, "name", ""),
        category: get_text(entry, "category", ""),
        description: paragraphs(entry, "text", false),
    })
}

pub fn inventory(character: &Node) -> Vec<Item> {
    entries(character, "inventorylist", |entry| Item {
        name: get_text(entry, "name", ""),
        count: get_text(entry, "count", "1"),
        cost: get_text(entry, "cost", ""),
        description: paragraphs(entry, "description", true),
    })
}

pub fn coins(character: &Node) -> Coins {
    let mut coins = Coins::default();
    let found = entries(character, "coins", |entry| {
        (
            Coin::from_code(&get_text(entry, "name", "")),
            get_text(entry, "amount", "0"),
        )
    });
    for (coin, amount) in found {
        match coin {
            Some(coin) => {
                coins.0.insert(coin, amount);
            }
            None => tracing::trace!(amount = %amount, "ignoring coin entry with unknown code"),
        }
    }
    coins
}

pub fn spell_slots(character: &Node) -> BTreeMap<u8, Usage> {
    (1..=9u8)
        .filter_map(|level| {
            let base = format!("powermeta.spellslots{level}");
            let max = get_text(character, &format!("{base}.max"), "0");
            if max.trim() == "0" {
                return None;
            }
            let used = get_text(character, &format!("{base}.used"), "0");
            Some((level, Usage { max, used }))
        })
        .collect()
}

pub fn sorcery_points(character: &Node) -> Option<Usage> {
    entries(character, "powers", |entry| {
        if get_text(entry, "name", "").trim() != SORCERY_POINTS {
            return None;
        }
        let max = get_text(entry, "prepared", "0");
        if parse_int_or(&max, 0) == 0 {
            return None;
        }
        Some(Usage {
            max,
            used: get_text(entry, "cast", "0"),
        })
    })
    .into_iter()
    .flatten()
    .next()
}

/// Spell entries among the powers, sorted by level then name.
pub fn spells(character: &Node) -> Vec<Spell> {
    let mut spells: Vec<Spell> = entries(character, "powers", spell)
        .into_iter()
        .flatten()
        .collect();
    spells.sort_by(|a, b| {
        parse_int_or(&a.level, 0)
            .cmp(&parse_int_or(&b.level, 0))
            .then_with(|| a.name.cmp(&b.name))
    });
    spells
}

fn spell(entry: &Node) -> Option<Spell> {
    let group = get_text(entry, "group", "");
    let school = get_text(entry, "school", "");
    if !group.contains("Spells") && school.is_empty() {
        return None;
    }
    let level = get(entry, "level")?;
    let Node::Text(level) = level else {
        return None;
    };

    Some(Spell {
        name: get_text(entry, "name", ""),
        level: level.trim().to_owned(),
        prepared: parse_int_or(&get_text(entry, "prepared", "0"), 0) != 0,
        school,
        casting_time: get_text(entry, "castingtime", ""),
        range: get_text(entry, "range", ""),
        components: get_text(entry, "components", ""),
        duration: get_text(entry, "duration", ""),
        ritual: parse_int_or(&get_text(entry, "ritual", "0"), 0) != 0,
        description: paragraphs(entry, "description", false),
    })
}
