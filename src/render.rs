//! HTML character sheet renderer.
//!
//! Output is a single self-contained document (inline CSS and script). Every
//! piece of text that comes from the export goes through [`escape_html`].

use std::collections::BTreeMap;

use crate::formats::{Ability, CharacterView, Coin, Spell, Usage};
use crate::stats::{format_bonus, format_modifier};
use crate::tree::parse_int_or;

/// Upper bound on rendered usage bubbles per tracker. Larger `max` values are
/// drawn as this many markers rather than the exact count.
const MAX_BUBBLES: i64 = 99;

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn esc(input: &str) -> String {
    escape_html(input)
}

pub fn render(view: &CharacterView) -> String {
    let mut out = String::with_capacity(32 * 1024);
    let title = if view.name.trim().is_empty() {
        "Character Sheet".to_owned()
    } else {
        format!("{} - Character Sheet", view.name)
    };

    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html lang=\"en\">\n");
    out.push_str("<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    out.push_str(&format!("  <title>{}</title>\n", esc(&title)));
    out.push_str("  <style>\n");
    out.push_str(STYLE_CSS);
    out.push_str("  </style>\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    out.push_str("<main class=\"sheet\">\n");

    render_header(&mut out, view);
    render_abilities(&mut out, view);
    render_combat(&mut out, view);
    render_skills(&mut out, view);
    render_features(&mut out, view);
    render_feats(&mut out, view);
    render_inventory(&mut out, view);
    render_spellcasting(&mut out, view);

    out.push_str("</main>\n");
    if !view.spells.is_empty() {
        out.push_str("<script>\n");
        out.push_str(SPELL_SCRIPT);
        out.push_str("</script>\n");
    }
    out.push_str("</body>\n");
    out.push_str("</html>\n");
    out
}

/// `Fighter 5 (Champion) / Wizard 2`
pub fn class_line(view: &CharacterView) -> String {
    view.classes
        .iter()
        .map(|class| {
            let mut line = format!("{} {}", class.name, class.level);
            if !class.specialization.is_empty() {
                line.push_str(&format!(" ({})", class.specialization));
            }
            line
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn render_header(out: &mut String, view: &CharacterView) {
    out.push_str("<header class=\"sheet-header\">\n");
    let name = if view.name.trim().is_empty() {
        "Unnamed Character"
    } else {
        view.name.as_str()
    };
    out.push_str(&format!("  <h1 class=\"character-name\">{}</h1>\n", esc(name)));

    let classes = class_line(view);
    if !classes.is_empty() {
        out.push_str(&format!("  <div class=\"class-line\">{}</div>\n", esc(&classes)));
    }
    if !view.race.is_empty() {
        let mut race = esc(&view.race);
        if !view.subrace.is_empty() {
            race.push_str(&format!(" ({})", esc(&view.subrace)));
        }
        out.push_str(&format!("  <div class=\"race-line\">{race}</div>\n"));
    }

    out.push_str("  <dl class=\"identity\">\n");
    out.push_str(&format!(
        "    <div><dt>Level</dt><dd>{}</dd></div>\n",
        view.total_level
    ));
    if !view.background.is_empty() {
        out.push_str(&format!(
            "    <div><dt>Background</dt><dd>{}</dd></div>\n",
            esc(&view.background)
        ));
    }
    if !view.alignment.is_empty() {
        out.push_str(&format!(
            "    <div><dt>Alignment</dt><dd>{}</dd></div>\n",
            esc(&view.alignment)
        ));
    }
    out.push_str("  </dl>\n");
    out.push_str("</header>\n");
}

fn render_abilities(out: &mut String, view: &CharacterView) {
    out.push_str("<section class=\"abilities\">\n");
    out.push_str("  <h2>Abilities</h2>\n");
    out.push_str("  <div class=\"ability-grid\">\n");
    for ability in Ability::ALL {
        let Some(score) = view.abilities.get(&ability) else {
            continue;
        };
        out.push_str(&format!(
            "    <div class=\"ability\" data-ability=\"{}\">\n",
            ability.key()
        ));
        out.push_str(&format!(
            "      <div class=\"ability-name\" title=\"{}\">{}</div>\n",
            ability.name(),
            ability.abbreviation()
        ));
        out.push_str(&format!(
            "      <div class=\"ability-mod\">{}</div>\n",
            esc(&format_modifier(&score.bonus))
        ));
        out.push_str(&format!(
            "      <div class=\"ability-score\">{}</div>\n",
            esc(&score.score)
        ));
        let marker = if score.save_proficient {
            "<span class=\"prof-dot on\"></span>"
        } else {
            "<span class=\"prof-dot\"></span>"
        };
        out.push_str(&format!(
            "      <div class=\"ability-save\">{marker}Save {}</div>\n",
            esc(&format_modifier(&score.save))
        ));
        out.push_str("    </div>\n");
    }
    out.push_str("  </div>\n");
    out.push_str("</section>\n");
}

fn render_combat(out: &mut String, view: &CharacterView) {
    let vitals = &view.vitals;
    let current_hp = match (
        vitals.hp_total.trim().parse::<i64>(),
        vitals.hp_wounds.trim().parse::<i64>(),
    ) {
        (Ok(total), Ok(wounds)) => total.saturating_sub(wounds).to_string(),
        _ => vitals.hp_total.clone(),
    };

    out.push_str("<section class=\"combat\">\n");
    out.push_str("  <h2>Combat</h2>\n");
    out.push_str("  <div class=\"stat-row\">\n");
    stat_box(out, "Armor Class", &esc(&vitals.armor_class));
    stat_box(out, "Initiative", &esc(&format_modifier(&vitals.initiative)));
    stat_box(out, "Speed", &esc(&vitals.speed));
    stat_box(out, "Proficiency Bonus", &format_bonus(view.proficiency_bonus));
    stat_box(out, "Melee Attack", &format_bonus(view.melee_attack_bonus));
    out.push_str("  </div>\n");
    out.push_str("  <div class=\"stat-row\">\n");
    stat_box(out, "Max HP", &esc(&vitals.hp_total));
    stat_box(out, "Current HP", &esc(&current_hp));
    stat_box(out, "Temp HP", &esc(&vitals.hp_temp));
    out.push_str("  </div>\n");
    out.push_str("</section>\n");
}

/// `value` must already be escaped.
fn stat_box(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "    <div class=\"stat-box\"><div class=\"stat-value\">{value}</div><div class=\"stat-label\">{label}</div></div>\n"
    ));
}

fn render_skills(out: &mut String, view: &CharacterView) {
    if view.skills.is_empty() {
        return;
    }
    out.push_str("<section class=\"skills\">\n");
    out.push_str("  <h2>Skills</h2>\n");
    out.push_str("  <ul class=\"skill-list\">\n");
    for skill in &view.skills {
        let class = if skill.proficient {
            "skill proficient"
        } else {
            "skill"
        };
        out.push_str(&format!(
            "    <li class=\"{class}\"><span class=\"prof-dot{}\"></span><span class=\"skill-total\">{}</span> <span class=\"skill-name\">{}</span>",
            if skill.proficient { " on" } else { "" },
            esc(&format_modifier(&skill.total)),
            esc(&skill.name)
        ));
        if !skill.governing_ability.is_empty() {
            out.push_str(&format!(
                " <span class=\"skill-stat\">({})</span>",
                esc(&abbreviate_ability(&skill.governing_ability))
            ));
        }
        out.push_str("</li>\n");
    }
    out.push_str("  </ul>\n");
    out.push_str("</section>\n");
}

fn abbreviate_ability(stat: &str) -> String {
    Ability::ALL
        .into_iter()
        .find(|ability| ability.key().eq_ignore_ascii_case(stat.trim()))
        .map(|ability| ability.abbreviation().to_owned())
        .unwrap_or_else(|| stat.to_owned())
}

fn render_description(out: &mut String, paragraphs: &[String]) {
    if paragraphs.is_empty() {
        return;
    }
    out.push_str("      <div class=\"description\">\n");
    for paragraph in paragraphs {
        out.push_str(&format!("        <p>{}</p>\n", esc(paragraph)));
    }
    out.push_str("      </div>\n");
}

fn render_features(out: &mut String, view: &CharacterView) {
    if view.features.is_empty() {
        return;
    }
    out.push_str("<section class=\"features\">\n");
    out.push_str("  <h2>Features</h2>\n");
    for feature in &view.features {
        out.push_str("    <article class=\"entry\">\n");
        out.push_str(&format!("      <h3>{}", esc(&feature.name)));
        if !feature.level.is_empty() {
            out.push_str(&format!(
                " <span class=\"tag\">Level {}</span>",
                esc(&feature.level)
            ));
        }
        out.push_str("</h3>\n");
        render_description(out, &feature.description);
        out.push_str("    </article>\n");
    }
    out.push_str("</section>\n");
}

fn render_feats(out: &mut String, view: &CharacterView) {
    if view.feats.is_empty() {
        return;
    }
    out.push_str("<section class=\"feats\">\n");
    out.push_str("  <h2>Feats</h2>\n");
    for feat in &view.feats {
        out.push_str("    <article class=\"entry\">\n");
        out.push_str(&format!("      <h3>{}", esc(&feat.name)));
        if !feat.category.is_empty() {
            out.push_str(&format!(" <span class=\"tag\">{}</span>", esc(&feat.category)));
        }
        out.push_str("</h3>\n");
        render_description(out, &feat.description);
        out.push_str("    </article>\n");
    }
    out.push_str("</section>\n");
}

fn render_inventory(out: &mut String, view: &CharacterView) {
    if view.inventory.is_empty() && view.coins.is_empty() {
        return;
    }
    out.push_str("<section class=\"inventory\">\n");
    out.push_str("  <h2>Equipment</h2>\n");
    if !view.coins.is_empty() {
        out.push_str("  <div class=\"coins\">\n");
        for coin in Coin::ALL {
            out.push_str(&format!(
                "    <div class=\"coin\"><span class=\"coin-amount\">{}</span> <span class=\"coin-code\">{}</span></div>\n",
                esc(view.coins.amount(coin)),
                coin.code()
            ));
        }
        out.push_str("  </div>\n");
    }
    for item in &view.inventory {
        out.push_str("    <article class=\"entry item\">\n");
        out.push_str(&format!(
            "      <h3><span class=\"item-count\">{}&times;</span> {}",
            esc(&item.count),
            esc(&item.name)
        ));
        if !item.cost.is_empty() {
            out.push_str(&format!(" <span class=\"tag\">{}</span>", esc(&item.cost)));
        }
        out.push_str("</h3>\n");
        render_description(out, &item.description);
        out.push_str("    </article>\n");
    }
    out.push_str("</section>\n");
}

fn render_spellcasting(out: &mut String, view: &CharacterView) {
    render_spell_slots(out, &view.spell_slots);
    if let Some(points) = &view.sorcery_points {
        out.push_str("<section class=\"sorcery-points\">\n");
        out.push_str("  <h2>Sorcery Points</h2>\n");
        out.push_str(&format!(
            "  <div class=\"tracker\">{}</div>\n",
            bubbles(points)
        ));
        out.push_str("</section>\n");
    }

    if view.spells.is_empty() {
        return;
    }

    out.push_str("<section class=\"spellcasting\">\n");
    out.push_str("  <h2>Spellcasting</h2>\n");
    out.push_str("  <div class=\"stat-row\">\n");
    let ability = view
        .spellcasting_ability
        .map(Ability::name)
        .unwrap_or("None");
    stat_box(out, "Spellcasting Ability", ability);
    stat_box(out, "Spell Save DC", &view.spell_save_dc.to_string());
    stat_box(out, "Spell Attack", &format_bonus(view.spell_attack_bonus));
    out.push_str("  </div>\n");
    out.push_str("</section>\n");

    out.push_str("<section class=\"spells\">\n");
    out.push_str("  <h2>Spells</h2>\n");
    out.push_str("  <div class=\"toolbar\">\n");
    out.push_str("    <button type=\"button\" onclick=\"expandAll()\">Expand all</button>\n");
    out.push_str("    <button type=\"button\" onclick=\"collapseAll()\">Collapse all</button>\n");
    out.push_str("  </div>\n");

    let mut by_level: BTreeMap<i64, Vec<&Spell>> = BTreeMap::new();
    for spell in &view.spells {
        by_level
            .entry(parse_int_or(&spell.level, 0))
            .or_default()
            .push(spell);
    }
    for (level, spells) in by_level {
        let heading = if level == 0 {
            "Cantrips".to_owned()
        } else {
            format!("Level {level}")
        };
        out.push_str(&format!(
            "  <section class=\"spell-level\" id=\"spell-level-{level}\" data-level=\"{level}\">\n"
        ));
        out.push_str(&format!(
            "    <h3 class=\"spell-level-header\" onclick=\"toggleLevel({level})\">{heading} <span class=\"count\">({})</span></h3>\n",
            spells.len()
        ));
        out.push_str("    <div class=\"spell-level-body\">\n");
        for spell in spells {
            render_spell(out, spell);
        }
        out.push_str("    </div>\n");
        out.push_str("  </section>\n");
    }
    out.push_str("</section>\n");
}

fn render_spell(out: &mut String, spell: &Spell) {
    let class = if spell.prepared {
        "entry spell prepared"
    } else {
        "entry spell"
    };
    out.push_str(&format!("      <article class=\"{class}\">\n"));
    out.push_str(&format!("      <h4>{}", esc(&spell.name)));
    if spell.prepared {
        out.push_str(" <span class=\"tag\">Prepared</span>");
    }
    if spell.ritual {
        out.push_str(" <span class=\"tag\">Ritual</span>");
    }
    out.push_str("</h4>\n");

    let details = [
        ("School", &spell.school),
        ("Casting Time", &spell.casting_time),
        ("Range", &spell.range),
        ("Components", &spell.components),
        ("Duration", &spell.duration),
    ];
    if details.iter().any(|(_, value)| !value.is_empty()) {
        out.push_str("      <dl class=\"spell-details\">\n");
        for (label, value) in details {
            if value.is_empty() {
                continue;
            }
            out.push_str(&format!(
                "        <div><dt>{label}</dt><dd>{}</dd></div>\n",
                esc(value)
            ));
        }
        out.push_str("      </dl>\n");
    }
    render_description(out, &spell.description);
    out.push_str("      </article>\n");
}

fn render_spell_slots(out: &mut String, slots: &BTreeMap<u8, Usage>) {
    let slots: Vec<_> = slots
        .iter()
        .filter(|(_, usage)| parse_int_or(&usage.max, 0) > 0)
        .collect();
    if slots.is_empty() {
        return;
    }
    out.push_str("<section class=\"spell-slots\">\n");
    out.push_str("  <h2>Spell Slots</h2>\n");
    for (level, usage) in slots {
        out.push_str(&format!(
            "  <div class=\"tracker\" data-level=\"{level}\"><span class=\"tracker-label\">Level {level}</span>{}</div>\n",
            bubbles(usage)
        ));
    }
    out.push_str("</section>\n");
}

/// `max` markers, the first `used` of them filled.
pub fn bubbles(usage: &Usage) -> String {
    let max = parse_int_or(&usage.max, 0).clamp(0, MAX_BUBBLES);
    let used = parse_int_or(&usage.used, 0);
    let mut out = String::new();
    for i in 0..max {
        if i < used {
            out.push_str("<span class=\"bubble used\"></span>");
        } else {
            out.push_str("<span class=\"bubble\"></span>");
        }
    }
    out
}

const STYLE_CSS: &str = r#"    :root { --ink: #2b2118; --accent: #7a1f1f; --paper: #fbf7ef; --line: #d8cbb3; }
    * { box-sizing: border-box; }
    body { margin: 0; background: #e9e2d3; color: var(--ink); font-family: Georgia, "Times New Roman", serif; }
    .sheet { max-width: 960px; margin: 2em auto; padding: 2em; background: var(--paper); border: 1px solid var(--line); box-shadow: 0 2px 12px rgba(0,0,0,.15); }
    h1, h2, h3, h4 { color: var(--accent); margin: .4em 0; }
    h2 { border-bottom: 2px solid var(--accent); padding-bottom: .2em; font-variant: small-caps; }
    section { margin-top: 1.5em; }
    .class-line { font-size: 1.2em; font-weight: bold; }
    .race-line { font-style: italic; }
    .identity { display: flex; flex-wrap: wrap; gap: 1.5em; margin: .8em 0 0; }
    .identity dt { font-size: .75em; text-transform: uppercase; color: #6b5b45; }
    .identity dd { margin: 0; }
    .ability-grid { display: grid; grid-template-columns: repeat(6, 1fr); gap: .6em; }
    .ability { border: 2px solid var(--line); border-radius: 8px; text-align: center; padding: .5em; }
    .ability-name { font-weight: bold; letter-spacing: .1em; }
    .ability-mod { font-size: 1.8em; }
    .ability-score { display: inline-block; border: 1px solid var(--line); border-radius: 1em; padding: 0 .6em; }
    .ability-save { font-size: .85em; margin-top: .3em; }
    .stat-row { display: flex; flex-wrap: wrap; gap: .6em; margin-bottom: .6em; }
    .stat-box { flex: 1 1 120px; border: 2px solid var(--line); border-radius: 8px; text-align: center; padding: .4em; }
    .stat-value { font-size: 1.5em; }
    .stat-label { font-size: .75em; text-transform: uppercase; color: #6b5b45; }
    .skill-list { columns: 2; list-style: none; padding: 0; }
    .skill-total { display: inline-block; min-width: 2.5em; text-align: right; font-weight: bold; }
    .skill-stat { color: #6b5b45; font-size: .85em; }
    .prof-dot { display: inline-block; width: .7em; height: .7em; border: 1px solid var(--ink); border-radius: 50%; margin-right: .4em; }
    .prof-dot.on { background: var(--ink); }
    .entry { border-left: 3px solid var(--line); padding-left: .8em; margin: .8em 0; }
    .tag { font-size: .7em; background: var(--line); color: var(--ink); border-radius: 4px; padding: .1em .4em; vertical-align: middle; }
    .description p { margin: .3em 0; }
    .coins { display: flex; gap: 1em; margin-bottom: .8em; }
    .coin-code { font-weight: bold; }
    .tracker { margin: .3em 0; }
    .tracker-label { display: inline-block; min-width: 5em; }
    .bubble { display: inline-block; width: 1em; height: 1em; border: 2px solid var(--accent); border-radius: 50%; margin-right: .3em; vertical-align: middle; }
    .bubble.used { background: var(--accent); }
    .toolbar button { margin-right: .5em; }
    .spell-level-header { cursor: pointer; user-select: none; }
    .spell-level.collapsed .spell-level-body { display: none; }
    .spell-details { display: flex; flex-wrap: wrap; gap: 1em; font-size: .85em; margin: .2em 0; }
    .spell-details dt { font-weight: bold; display: inline; }
    .spell-details dd { display: inline; margin: 0 0 0 .3em; }
    @media print { body { background: none; } .sheet { box-shadow: none; border: none; margin: 0; } .toolbar { display: none; } }
"#;

const SPELL_SCRIPT: &str = r#"  function toggleLevel(level) {
    var section = document.getElementById('spell-level-' + level);
    if (section) { section.classList.toggle('collapsed'); }
  }
  function expandAll() {
    document.querySelectorAll('.spell-level').forEach(function (s) { s.classList.remove('collapsed'); });
  }
  function collapseAll() {
    document.querySelectorAll('.spell-level').forEach(function (s) { s.classList.add('collapsed'); });
  }
"#;
