//! Tool configuration.
//!
//! A configuration file is YAML (or JSON) and every field is optional:
//!
//! ```yaml
//! indent: 4
//! flatten:
//!   separator: "_"
//!   arrayNotation: dot
//! schema:
//!   additionalProperties: true
//! env:
//!   format: k8s
//! proto:
//!   package: demo.v1
//! ```

use crate::convert::{EnvFormat, ProtoOptions};
use crate::error::{Error, Result};
use crate::flatten::FlattenOptions;
use crate::format::DEFAULT_INDENT;
use crate::schema::SchemaOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Defaults applied to every operation run by the command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub indent: usize,
    pub flatten: FlattenOptions,
    pub schema: SchemaOptions,
    pub env: EnvConfig,
    pub proto: ProtoOptions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: DEFAULT_INDENT,
            flatten: FlattenOptions::default(),
            schema: SchemaOptions::default(),
            env: EnvConfig::default(),
            proto: ProtoOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub format: EnvFormat,
}

impl Config {
    /// Loads a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        text.parse()
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(text: &str) -> Result<Config> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
