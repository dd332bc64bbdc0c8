use charsheet::convert::{DEFAULT_FILENAME, convert_xml, view_from_xml};
use charsheet::formats::{Ability, Coin, Usage};

static ELARA: &[u8] = include_bytes!("fixtures/elara.xml");

#[test]
fn fixture_view_has_expected_fields() -> anyhow::Result<()> {
    let view = view_from_xml(ELARA)?;

    assert_eq!(view.name, "Elara Brightwater");
    assert_eq!(view.race, "Elf");
    assert_eq!(view.subrace, "High Elf");
    assert_eq!(view.total_level, 5);
    assert_eq!(view.classes[0].specialization, "School of Evocation");

    assert_eq!(view.proficiency_bonus, 3);
    assert_eq!(view.spellcasting_ability, Some(Ability::Intelligence));
    assert_eq!(view.spell_save_dc, 15);
    assert_eq!(view.spell_attack_bonus, 7);
    assert_eq!(view.melee_attack_bonus, 2);
    assert!(view.abilities[&Ability::Intelligence].save_proficient);
    assert!(!view.abilities[&Ability::Strength].save_proficient);

    assert_eq!(view.vitals.hp_total, "27");
    assert_eq!(view.vitals.hp_wounds, "5");
    assert_eq!(view.vitals.armor_class, "12");

    let skills: Vec<_> = view.skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skills, ["Arcana", "Stealth"]);
    assert!(view.skills[0].proficient);

    assert_eq!(view.features[0].description.len(), 2);
    assert_eq!(
        view.inventory[0].description,
        ["Versatile: 1d8 when wielded with two hands."]
    );
    assert_eq!(view.inventory[1].count, "1");

    assert_eq!(view.coins.amount(Coin::Platinum), "3");
    assert_eq!(view.coins.amount(Coin::Gold), "42");
    assert_eq!(view.coins.amount(Coin::Silver), "0");

    assert_eq!(view.spell_slots.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(
        view.spell_slots[&2],
        Usage {
            max: "3".into(),
            used: "0".into()
        }
    );
    assert_eq!(view.sorcery_points, None);

    let spells: Vec<_> = view
        .spells
        .iter()
        .map(|s| format!("{}:{}", s.level, s.name))
        .collect();
    assert_eq!(
        spells,
        ["0:Fire Bolt", "1:Detect Magic", "1:Magic Missile", "3:Fireball"]
    );
    assert!(view.spells[2].prepared);
    assert!(view.spells[1].ritual);
    Ok(())
}

#[test]
fn fixture_renders_full_sheet() -> anyhow::Result<()> {
    let sheet = convert_xml(ELARA)?;

    assert_eq!(sheet.filename, "ElaraBrightwater.html");
    assert_eq!(sheet.name, "Elara Brightwater");
    let html = &sheet.html;
    assert!(html.contains("Wizard 5 (School of Evocation)"));
    assert!(html.contains("Elf (High Elf)"));
    assert!(html.contains("Spell Slots"));
    assert!(html.contains("Spellcasting"));
    assert!(html.contains("<div class=\"stat-value\">15</div><div class=\"stat-label\">Spell Save DC</div>"));
    assert!(html.contains("<div class=\"stat-value\">+7</div><div class=\"stat-label\">Spell Attack</div>"));
    assert!(html.contains("id=\"spell-level-3\""));
    assert!(!html.contains("Sorcery Points"));
    assert!(!html.contains("Sculpt Spells"));
    Ok(())
}

#[test]
fn minimal_fighter_renders_core_stats_only() -> anyhow::Result<()> {
    let xml = br#"<root>
  <character>
    <name type="string">Brakka</name>
    <abilities>
      <strength><score type="number">16</score><bonus type="number">3</bonus></strength>
    </abilities>
    <classes>
      <id-00001><name type="string">Fighter</name><level type="number">5</level></id-00001>
    </classes>
  </character>
</root>"#;
    let sheet = convert_xml(xml)?;
    let html = &sheet.html;

    assert!(html.contains("Fighter 5"));
    assert!(html.contains("<div class=\"stat-value\">+3</div><div class=\"stat-label\">Proficiency Bonus</div>"));
    assert!(html.contains("<div class=\"stat-value\">+6</div><div class=\"stat-label\">Melee Attack</div>"));
    assert!(!html.contains("Spell Slots"));
    assert!(!html.contains("Spells"));
    assert!(!html.contains("Spellcasting"));
    Ok(())
}

#[test]
fn hostile_names_are_escaped() -> anyhow::Result<()> {
    let xml = br#"<root><character>
  <name type="string">&lt;img src=x onerror=&quot;alert(1)&quot;&gt; &amp; 'co'</name>
  <featurelist><id-00001>
    <name type="string">&lt;b&gt;bold&lt;/b&gt;</name>
    <text type="formattedtext"><p>&lt;script&gt;steal()&lt;/script&gt;</p></text>
  </id-00001></featurelist>
</character></root>"#;
    let sheet = convert_xml(xml)?;
    let html = &sheet.html;

    assert!(!html.contains("<img src=x"));
    assert!(!html.contains("<b>bold</b>"));
    assert!(!html.contains("<script>steal"));
    assert!(html.contains("&lt;img src=x onerror=&quot;alert(1)&quot;&gt; &amp; &#39;co&#39;"));
    assert_eq!(sheet.filename, "imgsrcxonerroralert1co.html");
    Ok(())
}

#[test]
fn unnamed_character_gets_default_filename() -> anyhow::Result<()> {
    let sheet = convert_xml(b"<root><character><race>Dwarf</race></character></root>")?;
    assert_eq!(sheet.filename, DEFAULT_FILENAME);
    assert!(sheet.html.contains("<div class=\"race-line\">Dwarf</div>"));
    Ok(())
}

#[test]
fn non_xml_input_is_rejected() {
    assert!(convert_xml(b"this is not xml").is_err());
    assert!(convert_xml(b"").is_err());
}
