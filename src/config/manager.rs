use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::config::profile::{ProfileDef, ResolutionProfile};
use crate::foundation::error::{WallgenError, WallgenResult};

/// JSON shape of an output file type entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFileTypeDef {
    /// File type name, also the file extension (`"PNG"`).
    #[serde(rename = "type")]
    pub name: String,
    /// Disabled types are dropped at load.
    #[serde(default)]
    pub enabled: bool,
    /// Whether the encoder can store alpha.
    #[serde(default)]
    pub supports_transparency: bool,
}

/// JSON shape of a whole configuration document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDef {
    /// Output encoders.
    #[serde(default)]
    pub output_file_types: Vec<OutputFileTypeDef>,
    /// Resolution profiles.
    pub profiles: Vec<ProfileDef>,
}

/// An enabled output encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFileType {
    name: String,
    format: ImageFormat,
    supports_transparency: bool,
}

impl OutputFileType {
    /// Build a file type, resolving its encoder from the name used as extension.
    pub fn new(name: impl Into<String>, supports_transparency: bool) -> WallgenResult<Self> {
        let name = name.into();
        let format = ImageFormat::from_extension(name.to_ascii_lowercase()).ok_or_else(|| {
            WallgenError::validation(format!("output file type \"{name}\" has no known encoder"))
        })?;
        Ok(Self {
            name,
            format,
            supports_transparency,
        })
    }

    /// Configured name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoder.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Whether the encoder can store alpha.
    pub fn supports_transparency(&self) -> bool {
        self.supports_transparency
    }

    /// Lowercase file extension.
    pub fn extension(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

/// Loaded configuration: resolution profiles and output file types.
#[derive(Clone, Debug)]
pub struct ConfigManager {
    profiles: BTreeMap<String, ResolutionProfile>,
    file_types: BTreeMap<String, OutputFileType>,
}

impl ConfigManager {
    /// Parse and validate a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> WallgenResult<Self> {
        let def: ConfigDef = serde_json::from_reader(r)
            .map_err(|e| WallgenError::serde(format!("parse configuration JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> WallgenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WallgenError::validation(format!("open configuration '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate an already-parsed configuration.
    #[tracing::instrument(skip(def), fields(profiles = def.profiles.len()))]
    pub fn from_def(def: ConfigDef) -> WallgenResult<Self> {
        let mut file_types = BTreeMap::new();
        for ft in def.output_file_types.into_iter().filter(|ft| ft.enabled) {
            let t = OutputFileType::new(ft.name, ft.supports_transparency)?;
            file_types.insert(t.name().to_owned(), t);
        }

        let mut profiles = BTreeMap::new();
        for p in def.profiles {
            let profile = ResolutionProfile::from_def(p)?;
            let name = profile.name().to_owned();
            if profiles.insert(name.clone(), profile).is_some() {
                return Err(WallgenError::validation(format!(
                    "resolution \"{name}\" is defined more than once"
                )));
            }
        }

        tracing::info!(
            profiles = profiles.len(),
            file_types = file_types.len(),
            "configuration loaded"
        );
        Ok(Self {
            profiles,
            file_types,
        })
    }

    /// Profile by resolution name.
    pub fn profile(&self, resolution: &str) -> Option<&ResolutionProfile> {
        self.profiles.get(resolution)
    }

    /// Profile by resolution name, or a validation error.
    pub fn require_profile(&self, resolution: &str) -> WallgenResult<&ResolutionProfile> {
        self.profile(resolution).ok_or_else(|| {
            WallgenError::validation(format!("unknown resolution \"{resolution}\""))
        })
    }

    /// Resolution names ordered by sort order, then name.
    pub fn available_resolutions(&self) -> Vec<String> {
        let mut all: Vec<&ResolutionProfile> = self.profiles.values().collect();
        all.sort_by(|a, b| {
            a.sort_order()
                .cmp(&b.sort_order())
                .then_with(|| a.name().cmp(b.name()))
        });
        all.into_iter().map(|p| p.name().to_owned()).collect()
    }

    /// Union of output names across every profile, sorted.
    pub fn available_output_formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .profiles
            .values()
            .flat_map(|p| p.output_names().map(str::to_owned))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Enabled output file type names, sorted.
    pub fn available_output_file_types(&self) -> Vec<String> {
        self.file_types.keys().cloned().collect()
    }

    /// Output file type by name.
    pub fn output_file_type(&self, name: &str) -> Option<&OutputFileType> {
        self.file_types.get(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/manager.rs"]
mod tests;
