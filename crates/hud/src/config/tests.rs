use std::io::Write;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_document_is_default() {
	assert_eq!(HudConfig::from_toml_str("").unwrap(), HudConfig::default());
}

#[test]
fn defaults_match_documented_timings() {
	let config = HudConfig::default();
	assert_eq!(config.refresh_debounce(), Duration::from_millis(100));
	assert_eq!(config.selection_settle(), Duration::from_millis(50));
	assert_eq!(config.notice_timeout(), Duration::from_millis(2000));
	assert!(!config.window.resizable);
	assert!(config.window.chromeless);
	assert_eq!(config.window.height, None);
}

#[test]
fn partial_document_keeps_other_defaults() {
	let config = HudConfig::from_toml_str(
		r#"
			refresh_debounce_ms = 250
			[window]
			width = 520
		"#,
	)
	.unwrap();
	assert_eq!(config.refresh_debounce_ms, 250);
	assert_eq!(config.selection_settle_ms, 50);
	assert_eq!(config.window.width, 520);
	assert_eq!(config.window.id, "steve-sr5-hud");
}

#[test]
fn unknown_keys_are_rejected() {
	let err = HudConfig::from_toml_str("refresh_debounce = 5").unwrap_err();
	assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[test]
fn bad_keybinding_is_rejected() {
	let err = HudConfig::from_toml_str(r#"keybinding = "hyper-""#).unwrap_err();
	assert!(matches!(err, ConfigError::InvalidKeybinding(_)), "{err}");
}

#[test]
fn load_reads_file_and_reports_missing_path() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "keybinding = \"ctrl-alt-j\"").unwrap();
	let config = HudConfig::load(file.path()).unwrap();
	assert_eq!(config.keybinding, "ctrl-alt-j");

	let missing = file.path().with_extension("absent");
	let err = HudConfig::load(&missing).unwrap_err();
	assert!(matches!(err, ConfigError::Io { .. }));
}
