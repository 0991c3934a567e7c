// src/settings.rs
//
// Réglages (optionnels) lus depuis <config_dir>/calculatrice-sci/config.toml
// --------------------------------------------------------------------------
// - fichier absent      => valeurs par défaut, sans bruit
// - fichier illisible   => valeurs par défaut + warn!
// - valeurs hors bornes => ramenées dans les bornes (clamp)
//
// Exemple :
//   angle_mode = "degrees"
//   history_capacity = 50
//   max_input_length = 100
//   precision = 12

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::calc::history::HISTORY_CAPACITY;
use crate::calc::AngleMode;
use crate::engine::format::PRECISION_RESULTAT;

/// Longueur max de l’expression avant refus des touches.
pub const MAX_INPUT_LENGTH: usize = 100;

const DOSSIER: &str = "calculatrice-sci";
const FICHIER: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub angle_mode: AngleMode,
    pub history_capacity: usize,
    pub max_input_length: usize,
    pub precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Radians,
            history_capacity: HISTORY_CAPACITY,
            max_input_length: MAX_INPUT_LENGTH,
            precision: PRECISION_RESULTAT,
        }
    }
}

impl Settings {
    /// Chemin standard du fichier (None si pas de dossier de config, ex. wasm).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DOSSIER).join(FICHIER))
    }

    /// Chargement “tolérant” : n’échoue jamais.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(s) => {
                info!(path = %path.display(), "réglages chargés");
                s
            }
            Err(e) => {
                warn!(error = %e, "réglages ignorés, valeurs par défaut");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let s: Settings = toml::from_str(content)?;
        Ok(s.clamped())
    }

    /// Garde-fous : bornes raisonnables (anti-abus / anti-gel).
    pub fn clamped(self) -> Self {
        Self {
            angle_mode: self.angle_mode,
            history_capacity: self.history_capacity.clamp(1, 500),
            max_input_length: self.max_input_length.clamp(10, 1000),
            precision: self.precision.clamp(1, 17),
        }
    }
}
