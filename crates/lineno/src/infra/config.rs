//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".lineno/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub keybindings: Keybindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    delimiter: Option<String>,
    #[serde(default)]
    submenu_mark: Option<String>,
}

impl Defaults {
    fn default_delimiter() -> &'static str {
        ": "
    }

    fn default_submenu_mark() -> &'static str {
        "▸"
    }

    /// The string separating a rendered number from its payload. Validity
    /// (non-empty once trimmed) is judged where the prefix grammar is built.
    pub fn delimiter(&self) -> String {
        self.delimiter
            .clone()
            .unwrap_or_else(|| Self::default_delimiter().to_owned())
    }

    /// Glyph decorating menu entries that open a submenu.
    pub fn submenu_mark(&self) -> String {
        self.submenu_mark
            .clone()
            .unwrap_or_else(|| Self::default_submenu_mark().to_owned())
    }

    pub fn set_delimiter<S: Into<String>>(&mut self, delimiter: S) {
        self.delimiter = Some(delimiter.into());
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            delimiter: Some(Self::default_delimiter().to_owned()),
            submenu_mark: Some(Self::default_submenu_mark().to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybindings {
    #[serde(default = "Keybindings::default_up")]
    pub up: String,
    #[serde(default = "Keybindings::default_down")]
    pub down: String,
    #[serde(default = "Keybindings::default_select")]
    pub select: String,
    #[serde(default = "Keybindings::default_menu")]
    pub menu: String,
}

impl Keybindings {
    fn default_up() -> String {
        "k".into()
    }

    fn default_down() -> String {
        "j".into()
    }

    fn default_select() -> String {
        "space".into()
    }

    fn default_menu() -> String {
        ":".into()
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: Self::default_up(),
            down: Self::default_down(),
            select: Self::default_select(),
            menu: Self::default_menu(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    delimiter: Option<String>,
    submenu_mark: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            delimiter: env::var("LINENO_DELIMITER").ok(),
            submenu_mark: env::var("LINENO_SUBMENU_MARK").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(delimiter: &str) -> Self {
        Self {
            delimiter: Some(delimiter.to_owned()),
            submenu_mark: None,
        }
    }
}

impl Config {
    /// Load configuration from defaults, user config, workspace config, and
    /// env overrides, in ascending precedence.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            keybindings: merge_keybindings(self.keybindings, other.keybindings),
        }
    }
}

fn merge_defaults(mut base: Defaults, overlay: Defaults) -> Defaults {
    if let Some(delimiter) = overlay.delimiter {
        base.delimiter = Some(delimiter);
    }
    if let Some(mark) = overlay.submenu_mark {
        base.submenu_mark = Some(mark);
    }
    base
}

fn merge_keybindings(base: Keybindings, overlay: Keybindings) -> Keybindings {
    Keybindings {
        up: choose_keybinding(base.up, overlay.up, Keybindings::default_up),
        down: choose_keybinding(base.down, overlay.down, Keybindings::default_down),
        select: choose_keybinding(base.select, overlay.select, Keybindings::default_select),
        menu: choose_keybinding(base.menu, overlay.menu, Keybindings::default_menu),
    }
}

fn choose_keybinding(base: String, overlay: String, default_fn: fn() -> String) -> String {
    if overlay != default_fn() { overlay } else { base }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("lineno/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(delimiter) = env.delimiter {
        config.defaults.delimiter = Some(delimiter);
    }
    if let Some(mark) = env.submenu_mark {
        config.defaults.submenu_mark = Some(mark);
    }
    config
}
