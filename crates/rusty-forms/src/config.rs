// File: src/config.rs
// Purpose: Form settings parsed from forms.toml

use crate::error::Result as FormResult;
use crate::template::TemplateRegistry;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Form configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FormsConfig {
    #[serde(default)]
    pub templates: TemplateConfig,

    #[serde(default)]
    pub csrf: CsrfConfig,
}

/// Format overrides, as registered with [`TemplateRegistry::set_format`]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Input formats keyed by input type, or `default` for all of them
    #[serde(default)]
    pub input: IndexMap<String, String>,

    #[serde(default)]
    pub textarea: Option<String>,

    #[serde(default)]
    pub button: Option<String>,

    #[serde(default)]
    pub select: Option<String>,
}

/// CSRF token naming
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CsrfConfig {
    /// Name of the hidden input, and the input key it is read back from
    #[serde(default = "default_csrf_name")]
    pub field_name: String,

    /// Session key is `{form_id}.{session_suffix}`
    #[serde(default = "default_csrf_name")]
    pub session_suffix: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            field_name: default_csrf_name(),
            session_suffix: default_csrf_name(),
        }
    }
}

fn default_csrf_name() -> String {
    "csrf".to_string()
}

impl CsrfConfig {
    pub fn session_key(&self, form_id: &str) -> String {
        format!("{}.{}", form_id, self.session_suffix)
    }
}

impl FormsConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read forms config: {:?}", path))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse forms config: {:?}", path))?;

        debug!(path = ?path, "loaded forms config");
        Ok(config)
    }

    /// Load configuration from default path (./forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("forms.toml")
    }

    /// Parse TOML text; blank text gives the defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Build a registry holding every configured format
    pub fn registry(&self) -> FormResult<TemplateRegistry> {
        TemplateRegistry::from_config(&self.templates)
    }
}
