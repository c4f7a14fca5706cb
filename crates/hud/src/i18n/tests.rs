use super::*;

fn table(entries: &[(&str, &str)]) -> LocaleTable {
	entries.iter().copied().collect()
}

#[test]
fn resolve_returns_first_known_candidate() {
	let i18n = table(&[("b", "Bee"), ("c", "Sea")]);
	assert_eq!(resolve(&i18n, ["a", "b", "c"]), Some("Bee".to_string()));
}

#[test]
fn resolve_returns_none_when_nothing_matches() {
	let i18n = table(&[("x", "Ex")]);
	assert_eq!(resolve(&i18n, ["a", "b"]), None);
	assert_eq!(resolve(&i18n, Vec::<String>::new()), None);
}

#[test]
fn type_keys_try_standard_then_backups() {
	assert_eq!(
		type_label_keys("weapon"),
		vec!["TYPES.Item.weapon", "SR5.ItemTypes.weapon", "Item.weapon"]
	);
}

#[test]
fn type_keys_offer_capitalized_variant_for_separated_codes() {
	let keys = type_label_keys("call_in_action");
	assert_eq!(keys[..3], ["TYPES.Item.call_in_action", "SR5.ItemTypes.call_in_action", "Item.call_in_action"]);
	assert!(keys.contains(&"SR5.ItemTypes.CallInAction".to_string()));
	assert!(keys.contains(&"Item.CallInAction".to_string()));
}

#[test]
fn category_label_falls_back_through_tiers() {
	let standard = table(&[("TYPES.Item.weapon", "Weapon"), ("SR5.ItemTypes.weapon", "Old Weapon")]);
	assert_eq!(category_label(&standard, "weapon"), "Weapon");

	let backup = table(&[("Item.cyberware", "Cyberware")]);
	assert_eq!(category_label(&backup, "cyberware"), "Cyberware");

	let capitalized = table(&[("SR5.ItemTypes.AdeptPower", "Adept Power")]);
	assert_eq!(category_label(&capitalized, "adept_power"), "Adept Power");
}

#[test]
fn category_label_uses_raw_code_when_unresolved() {
	let i18n = LocaleTable::new();
	assert_eq!(category_label(&i18n, "sprite_power"), "sprite_power");
}

#[test]
fn action_keys_keep_then_strip_spaces() {
	assert_eq!(
		action_label_keys("Judge Intentions"),
		["SR5.Content.Actions.Judge Intentions", "SR5.Content.Actions.JudgeIntentions"]
	);
}

#[test]
fn locale_table_flattens_nested_json() {
	let i18n = LocaleTable::from_json(r#"{ "SR5": { "ItemTypes": { "weapon": "Weapon" }, "Count": 3 }, "TYPES": { "Item": { "ammo": "Ammo" } } }"#).unwrap();
	assert_eq!(i18n.len(), 2);
	assert!(i18n.has("SR5.ItemTypes.weapon"));
	assert_eq!(i18n.get("TYPES.Item.ammo"), "Ammo");
	assert!(!i18n.has("SR5.Count"));
}

#[test]
fn locale_table_get_echoes_unknown_key() {
	let i18n = LocaleTable::new();
	assert_eq!(i18n.get("SR5.Missing"), "SR5.Missing");
}
