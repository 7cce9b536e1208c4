//! Domain value objects: Tool, Stage, the per-tool subcommands, and the
//! ordered [`KeyValues`] mapping.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! Subcommand enums only know their string form and their `FromStr`
//! parser; which flags each subcommand takes lives in `command_builder.rs`.
//!
//! # Adding a Pluralith subcommand
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. If it takes something other than variable flags, add an arm in
//!    `CommandBuilder::build`

use crate::domain::error::DomainError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ── Tool ─────────────────────────────────────────────────────────────────────

/// An external command-line tool driven by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// The diagram tool. Always runs.
    Pluralith,
    /// The provisioning tool. Only runs its `init` stage, and only on request.
    Terraform,
}

impl Tool {
    /// Executable name looked up on `PATH` when no override is given.
    pub const fn binary_name(&self) -> &'static str {
        match self {
            Self::Pluralith => "pluralith",
            Self::Terraform => "terraform",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

// ── Stage ────────────────────────────────────────────────────────────────────

/// One discrete tool invocation within an orchestrated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// `terraform init`, run before the diagram tool when requested.
    TerraformInit,
    /// The requested Pluralith subcommand.
    Pluralith,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TerraformInit => "terraform_init",
            Self::Pluralith => "pluralith",
        }
    }

    pub const fn tool(&self) -> Tool {
        match self {
            Self::TerraformInit => Tool::Terraform,
            Self::Pluralith => Tool::Pluralith,
        }
    }

    /// Report key under which this stage's stdout is stored.
    pub const fn output_key(&self) -> &'static str {
        match self {
            Self::TerraformInit => "terraform_init_output",
            Self::Pluralith => "pluralith_output",
        }
    }

    /// Report key under which check mode stores the rendered command line.
    pub const fn planned_key(&self) -> &'static str {
        match self {
            Self::TerraformInit => "terraform_init_planned",
            Self::Pluralith => "pluralith_planned",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PluralithCommand ─────────────────────────────────────────────────────────

/// Subcommands of the Pluralith CLI this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralithCommand {
    Init,
    Login,
    Plan,
    Run,
    Graph,
    Apply,
    Destroy,
    Strip,
}

impl PluralithCommand {
    pub const ALL: [Self; 8] = [
        Self::Init,
        Self::Login,
        Self::Plan,
        Self::Run,
        Self::Graph,
        Self::Apply,
        Self::Destroy,
        Self::Strip,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Login => "login",
            Self::Plan => "plan",
            Self::Run => "run",
            Self::Graph => "graph",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
            Self::Strip => "strip",
        }
    }
}

impl fmt::Display for PluralithCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralithCommand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| DomainError::UnsupportedSubcommand {
                tool: Tool::Pluralith,
                subcommand: s.to_string(),
            })
    }
}

// ── TerraformCommand ─────────────────────────────────────────────────────────

/// Subcommands of the provisioning tool. Only `init` is ever orchestrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerraformCommand {
    Init,
}

impl TerraformCommand {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
        }
    }
}

impl fmt::Display for TerraformCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerraformCommand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "init" => Ok(Self::Init),
            _ => Err(DomainError::UnsupportedSubcommand {
                tool: Tool::Terraform,
                subcommand: s.to_string(),
            }),
        }
    }
}

// ── KeyValues ────────────────────────────────────────────────────────────────

/// An insertion-ordered string mapping.
///
/// Flag emission order is part of the observable contract, so variable and
/// backend-config maps are never stored in a hash map. Inserting an existing
/// key replaces its value in place and keeps its original position.
///
/// Deserializes from a map whose values may be strings, numbers or booleans;
/// non-string scalars are stored in their display form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    entries: Vec<(String, String)>,
}

impl KeyValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for KeyValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for KeyValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Scalar accepted as a map value on input.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

struct KeyValuesVisitor;

impl<'de> Visitor<'de> for KeyValuesVisitor {
    type Value = KeyValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of string keys to scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = KeyValues::new();
        while let Some((key, value)) = access.next_entry::<String, Scalar>()? {
            map.insert(key, value.into_string());
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for KeyValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeyValuesVisitor)
    }
}
