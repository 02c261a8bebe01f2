use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::ConfigError;
use crate::mapping::{key_to_string, normalize_escapes};

// =============================================================================
// Naming constants
// =============================================================================

/// Separator between a stem and its version number (`report_v03.csv`)
pub const DEFAULT_VERSIONING_MARKER: &str = "_v";

/// Entries containing this character are transient/lock files and never count as versions
pub const TRANSIENT_FILE_MARKER: char = '$';

/// Separator used when joining nested keys of a flattened mapping
pub const DEFAULT_FLATTEN_SEPARATOR: &str = "__";

/// Name of the project configuration file, looked up at the project root
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Options for computing the next version of a path
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct VersioningOptions {
    /// Marker placed between the stem and the new version number.
    /// Existing versions are always detected with [`DEFAULT_VERSIONING_MARKER`].
    pub marker: String,
    /// Return the input path untouched
    pub overwrite: bool,
    /// Resolve the latest existing sibling before incrementing
    pub from_last_version: bool,
}

impl Default for VersioningOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_VERSIONING_MARKER.to_string(),
            overwrite: false,
            from_last_version: false,
        }
    }
}

impl VersioningOptions {
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn from_last_version(mut self, from_last_version: bool) -> Self {
        self.from_last_version = from_last_version;
        self
    }
}

/// Settings read by the fixed-width writer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FfwParams {
    pub encoding: String,
    /// Keys of `_KEYWORDS_`, in document order
    pub keywords: Vec<String>,
    pub strict_order: bool,
    /// `_KEYWORDS_` with `\t` / `\n` tokens turned into control characters
    pub delimiters: Mapping,
    pub offset: Value,
}

#[derive(Debug, Deserialize)]
struct RawFfwParams {
    #[serde(rename = "_ENCODING_")]
    encoding: String,
    #[serde(rename = "_KEYWORDS_")]
    keywords: Mapping,
    #[serde(rename = "_STRICT_ORDER_")]
    strict_order: bool,
    offset: Value,
}

/// Load `root/file_name` as a YAML mapping.
pub fn load_config(root: &Path, file_name: &str) -> Result<Mapping, ConfigError> {
    let path = root.join(file_name);
    debug!("Loading config from {:?}", path);

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ConfigError::NotAMapping(path)),
    }
}

/// Extract the fixed-width writer settings from the project config.
pub fn ffw_params(root: &Path, file_name: &str) -> Result<FfwParams, ConfigError> {
    let config = load_config(root, file_name)?;

    for key in ["_ENCODING_", "_KEYWORDS_", "_STRICT_ORDER_", "offset"] {
        if !config.contains_key(key) {
            return Err(ConfigError::Missing(key.to_string()));
        }
    }

    let raw: RawFfwParams = serde_yaml::from_value(Value::Mapping(config))?;

    let keywords = raw.keywords.keys().map(key_to_string).collect();

    let mut delimiters = raw.keywords;
    normalize_escapes(&mut delimiters);

    Ok(FfwParams {
        encoding: raw.encoding,
        keywords,
        strict_order: raw.strict_order,
        delimiters,
        offset: raw.offset,
    })
}

/// Returns the path to the data directory for projutils.
/// Uses $XDG_DATA_HOME/projutils if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/projutils,
/// or ./projutils if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("projutils.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("projutils")
}
