// Configuration loading and parsing (config/lineup.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use tracing::info;

use crate::controller::Mode;

const CONFIG_FILE: &str = "lineup.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// lineup.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub roster: RosterConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub auto_assign: AutoAssignConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// CSV file with the players registered for the match.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_touch_threshold")]
    pub touch_threshold_px: f64,
    #[serde(default = "default_preview_offset")]
    pub preview_offset_px: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            touch_threshold_px: default_touch_threshold(),
            preview_offset_px: default_preview_offset(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutoAssignConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for AutoAssignConfig {
    fn default() -> Self {
        AutoAssignConfig {
            delay_ms: default_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitConfig {
    /// Endpoint receiving the assignment form. When absent the form is only logged.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_home_field")]
    pub home_field: String,
    #[serde(default = "default_away_field")]
    pub away_field: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        SubmitConfig {
            url: None,
            home_field: default_home_field(),
            away_field: default_away_field(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_initial_mode")]
    pub initial_mode: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            initial_mode: default_initial_mode(),
        }
    }
}

impl UiConfig {
    /// The configured starting mode. Validation guarantees it parses.
    pub fn mode(&self) -> Mode {
        Mode::from_str_mode(&self.initial_mode).unwrap_or(Mode::Drag)
    }
}

fn default_touch_threshold() -> f64 {
    crate::gesture::DRAG_THRESHOLD_PX
}

fn default_preview_offset() -> f64 {
    30.0
}

fn default_delay_ms() -> u64 {
    crate::auto_assign::DEFAULT_DELAY_MS
}

fn default_home_field() -> String {
    "home_players".into()
}

fn default_away_field() -> String {
    "away_players".into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_initial_mode() -> String {
    "drag".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/lineup.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse config text without validating it. `path` is only used for errors.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/lineup.toml` to `config/lineup.toml` unless the user
/// already has one. Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_FILE} in {}/config or {}/defaults; run from the project root",
                base_dir.display(),
                base_dir.display()
            ),
        });
    }

    let copy_err = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    };
    if let Some(config_dir) = target.parent() {
        std::fs::create_dir_all(config_dir).map_err(copy_err)?;
    }
    std::fs::copy(&source, &target).map_err(copy_err)?;
    Ok(Some(target))
}

/// Load config relative to the current working directory, copying defaults
/// into `config/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(path) = ensure_config_file(&cwd)? {
        info!("Created {} from defaults", path.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.roster.path.trim().is_empty() {
        return Err(invalid("roster.path", "must not be empty"));
    }

    let threshold = config.drag.touch_threshold_px;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(invalid(
            "drag.touch_threshold_px",
            format!("must be a finite number > 0, got {threshold}"),
        ));
    }

    let offset = config.drag.preview_offset_px;
    if !offset.is_finite() || offset < 0.0 {
        return Err(invalid(
            "drag.preview_offset_px",
            format!("must be a finite number >= 0, got {offset}"),
        ));
    }

    let submit = &config.submit;
    for (name, value) in [
        ("submit.home_field", &submit.home_field),
        ("submit.away_field", &submit.away_field),
    ] {
        if value.trim().is_empty() {
            return Err(invalid(name, "must not be empty"));
        }
    }
    if submit.home_field == submit.away_field {
        return Err(invalid(
            "submit.away_field",
            format!("must differ from submit.home_field (both are `{}`)", submit.home_field),
        ));
    }
    if submit.timeout_secs == 0 {
        return Err(invalid("submit.timeout_secs", "must be > 0"));
    }
    if let Some(url) = &submit.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(
                "submit.url",
                format!("must start with http:// or https://, got `{url}`"),
            ));
        }
    }

    if Mode::from_str_mode(&config.ui.initial_mode).is_none() {
        return Err(invalid(
            "ui.initial_mode",
            format!(
                "must be one of drag, dropdown, auto; got `{}`",
                config.ui.initial_mode
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MINIMAL: &str = r#"
[roster]
path = "data/roster.csv"
"#;

    /// The repository root, which holds `defaults/`.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    fn write_config(name: &str, text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("lineup.toml"), text).unwrap();
        tmp
    }

    #[test]
    fn default_file_is_valid() {
        let path = project_root().join("defaults/lineup.toml");
        let text = fs::read_to_string(&path).expect("defaults/lineup.toml should exist");
        let config = parse_config(&text, &path).expect("should parse");
        validate(&config).expect("should validate");
        assert_eq!(config.roster.path, "data/roster.csv");
        assert!((config.drag.touch_threshold_px - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.auto_assign.delay_ms, 500);
        assert_eq!(config.ui.mode(), Mode::Drag);
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let tmp = write_config("lineup_config_minimal", MINIMAL);
        let config = load_config_from(&tmp).expect("should load");
        assert!((config.drag.touch_threshold_px - 10.0).abs() < f64::EPSILON);
        assert!((config.drag.preview_offset_px - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.auto_assign.delay_ms, 500);
        assert!(config.submit.url.is_none());
        assert_eq!(config.submit.home_field, "home_players");
        assert_eq!(config.submit.away_field, "away_players");
        assert_eq!(config.submit.timeout_secs, 10);
        assert_eq!(config.ui.mode(), Mode::Drag);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn full_config_is_read() {
        let text = r#"
[roster]
path = "players.csv"

[drag]
touch_threshold_px = 12.5
preview_offset_px = 0.0

[auto_assign]
delay_ms = 0

[submit]
url = "https://example.test/match/3/"
home_field = "equipo_local_jugadores"
away_field = "equipo_visitante_jugadores"
timeout_secs = 3

[ui]
initial_mode = "dropdown"
"#;
        let tmp = write_config("lineup_config_full", text);
        let config = load_config_from(&tmp).expect("should load");
        assert!((config.drag.touch_threshold_px - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.auto_assign.delay_ms, 0);
        assert_eq!(config.submit.url.as_deref(), Some("https://example.test/match/3/"));
        assert_eq!(config.submit.home_field, "equipo_local_jugadores");
        assert_eq!(config.ui.mode(), Mode::Dropdown);
        let _ = fs::remove_dir_all(&tmp);
    }

    fn expect_invalid(name: &str, text: &str, field: &str) {
        let tmp = write_config(name, text);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field: f, .. } => assert_eq!(f, field),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_threshold() {
        expect_invalid(
            "lineup_config_zero_threshold",
            &format!("{MINIMAL}\n[drag]\ntouch_threshold_px = 0.0\n"),
            "drag.touch_threshold_px",
        );
    }

    #[test]
    fn rejects_negative_preview_offset() {
        expect_invalid(
            "lineup_config_negative_offset",
            &format!("{MINIMAL}\n[drag]\npreview_offset_px = -1.0\n"),
            "drag.preview_offset_px",
        );
    }

    #[test]
    fn rejects_identical_field_names() {
        expect_invalid(
            "lineup_config_same_fields",
            &format!("{MINIMAL}\n[submit]\nhome_field = \"ids\"\naway_field = \"ids\"\n"),
            "submit.away_field",
        );
    }

    #[test]
    fn rejects_empty_field_name() {
        expect_invalid(
            "lineup_config_empty_field",
            &format!("{MINIMAL}\n[submit]\nhome_field = \"  \"\n"),
            "submit.home_field",
        );
    }

    #[test]
    fn rejects_non_http_url() {
        expect_invalid(
            "lineup_config_bad_url",
            &format!("{MINIMAL}\n[submit]\nurl = \"ftp://example.test\"\n"),
            "submit.url",
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        expect_invalid(
            "lineup_config_zero_timeout",
            &format!("{MINIMAL}\n[submit]\ntimeout_secs = 0\n"),
            "submit.timeout_secs",
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        expect_invalid(
            "lineup_config_bad_mode",
            &format!("{MINIMAL}\n[ui]\ninitial_mode = \"voice\"\n"),
            "ui.initial_mode",
        );
    }

    #[test]
    fn rejects_empty_roster_path() {
        expect_invalid("lineup_config_empty_roster", "[roster]\npath = \"\"\n", "roster.path");
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = std::env::temp_dir().join("lineup_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("lineup.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = write_config("lineup_config_invalid_toml", "this is not valid [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("lineup.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_copies_defaults() {
        let tmp = std::env::temp_dir().join("lineup_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/lineup.toml"), MINIMAL).unwrap();

        let copied = ensure_config_file(&tmp).expect("should succeed");
        assert_eq!(copied, Some(tmp.join("config/lineup.toml")));
        assert_eq!(fs::read_to_string(tmp.join("config/lineup.toml")).unwrap(), MINIMAL);
        assert!(load_config_from(&tmp).is_ok());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_keeps_existing() {
        let tmp = std::env::temp_dir().join("lineup_config_ensure_keeps");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/lineup.toml"), MINIMAL).unwrap();
        fs::write(tmp.join("config/lineup.toml"), "# custom\n").unwrap();

        assert_eq!(ensure_config_file(&tmp).expect("should succeed"), None);
        let content = fs::read_to_string(tmp.join("config/lineup.toml")).unwrap();
        assert_eq!(content, "# custom\n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_needs_defaults_or_config() {
        let tmp = std::env::temp_dir().join("lineup_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        match ensure_config_file(&tmp) {
            Err(ConfigError::DefaultsCopyError { message }) => {
                assert!(message.contains("lineup.toml"));
            }
            other => panic!("expected DefaultsCopyError, got: {other:?}"),
        }
        assert!(!tmp.join("config").exists());
        let _ = fs::remove_dir_all(&tmp);
    }
}
