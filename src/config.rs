use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::icons::IconStyle;

pub const CONFIG_ENV: &str = "WINDOW_NAMER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub programs: ProgramsConfig,

    #[serde(default)]
    pub names: NamesConfig,

    #[serde(default)]
    pub substitute: SubstituteConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramsConfig {
    /// Commands treated as "no program": the window is named after its directory.
    #[serde(default = "default_shells")]
    pub shells: Vec<String>,

    /// Programs shown as `program:dir`, disambiguated by directory.
    #[serde(default = "default_dir_programs")]
    pub dir_programs: Vec<String>,

    /// Programs that never name a window; handled like shells.
    #[serde(default)]
    pub ignored: Vec<String>,

    /// Keep the arguments of the foreground command in the name.
    #[serde(default = "default_show_args")]
    pub show_args: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamesConfig {
    #[serde(default = "default_max_len")]
    pub max_len: usize,

    /// Show the home directory as `~`.
    #[serde(default)]
    pub use_tilde: bool,

    #[serde(default)]
    pub icon_style: IconStyle,

    /// Program name to icon; overrides the built-in table.
    #[serde(default)]
    pub custom_icons: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstituteConfig {
    /// `(pattern, replacement)` pairs applied to program names, in order.
    #[serde(default = "default_program_substitutes")]
    pub programs: Vec<(String, String)>,

    /// `(pattern, replacement)` pairs applied to directory displays, in order.
    #[serde(default)]
    pub dirs: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_shells() -> Vec<String> {
    ["bash", "fish", "sh", "zsh"].map(String::from).to_vec()
}

fn default_dir_programs() -> Vec<String> {
    ["nvim", "vim", "vi", "git"].map(String::from).to_vec()
}

fn default_show_args() -> bool {
    true
}

fn default_max_len() -> usize {
    20
}

fn default_program_substitutes() -> Vec<(String, String)> {
    [
        (r".+ipython([32])", r"ipython${1}"),
        (r"^(/usr)?/bin/(.+)", r"${2}"),
        (r"(bash) (.+)/(.+[ $])(.+)", r"${3}${4}"),
        (r".+poetry shell", "poetry"),
    ]
    .map(|(p, r)| (p.to_string(), r.to_string()))
    .to_vec()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ProgramsConfig {
    fn default() -> Self {
        Self {
            shells: default_shells(),
            dir_programs: default_dir_programs(),
            ignored: Vec::new(),
            show_args: default_show_args(),
        }
    }
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            max_len: default_max_len(),
            use_tilde: false,
            icon_style: IconStyle::default(),
            custom_icons: BTreeMap::new(),
        }
    }
}

impl Default for SubstituteConfig {
    fn default() -> Self {
        Self {
            programs: default_program_substitutes(),
            dirs: Vec::new(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub fn resolve_config_path(arg: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = arg {
        return Ok(p.to_path_buf());
    }
    let home = dirs::home_dir().context("failed to resolve home dir")?;
    Ok(home.join(".window-namer").join("config.toml"))
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: Config =
            toml::from_str(&s).with_context(|| format!("invalid TOML: {}", path.display()))?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let s = self.to_toml()?;
        fs::write(path, s).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }

    /// `None` when `log.level` is not a level name.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log.level.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_take_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [names]
            max_len = 12
            icon_style = "name_and_icon"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.names.max_len, 12);
        assert_eq!(cfg.names.icon_style, IconStyle::NameAndIcon);
        assert!(!cfg.names.use_tilde);
        assert_eq!(cfg.programs, ProgramsConfig::default());
        assert_eq!(cfg.substitute.programs.len(), 4);
    }

    #[test]
    fn substitute_pairs_parse_from_arrays() {
        let cfg: Config = toml::from_str(
            r#"
            [substitute]
            dirs = [["^~/src/(.+)", "src:${1}"]]
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.substitute.dirs,
            vec![("^~/src/(.+)".to_string(), "src:${1}".to_string())]
        );
        assert_eq!(cfg.substitute.programs, default_program_substitutes());
    }

    #[test]
    fn unknown_icon_style_is_rejected() {
        let parsed = toml::from_str::<Config>("[names]\nicon_style = \"emoji\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.names.use_tilde = true;
        cfg.programs.ignored.push("htop".to_string());
        cfg.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn log_level_parses() {
        let mut cfg = Config::default();
        assert_eq!(cfg.log_level(), Some(log::LevelFilter::Warn));
        cfg.log.level = "DEBUG".to_string();
        assert_eq!(cfg.log_level(), Some(log::LevelFilter::Debug));
        cfg.log.level = "loud".to_string();
        assert_eq!(cfg.log_level(), None);
    }
}
