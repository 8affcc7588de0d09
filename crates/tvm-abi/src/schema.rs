//! Contract interface schema (`<Contract>.abi.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::AbiType;

/// One declared parameter: a function input/output, getter input/output,
/// event input or state field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiParam>>,
    /// Set on state fields that are supplied when building initial data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<bool>,
}

impl AbiParam {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: None,
            init: None,
        }
    }

    pub fn with_components(mut self, components: Vec<AbiParam>) -> Self {
        self.components = Some(components);
        self
    }

    /// Whether this field is set by the constructor data.
    pub fn is_init(&self) -> bool {
        self.init == Some(true)
    }

    /// Parse this parameter's type descriptor.
    pub fn abi_type(&self) -> Result<AbiType> {
        AbiType::from_param(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A read-only method; same shape as a function but never carries value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiGetter {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEvent {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A parsed contract schema. Read-only after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiContract {
    #[serde(rename = "ABI version", default, skip_serializing_if = "Option::is_none")]
    pub abi_version_legacy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub header: Vec<String>,
    #[serde(default)]
    pub functions: Vec<AbiFunction>,
    #[serde(default)]
    pub getters: Vec<AbiGetter>,
    #[serde(default)]
    pub events: Vec<AbiEvent>,
    #[serde(default)]
    pub fields: Vec<AbiParam>,
}

impl AbiContract {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn getter(&self, name: &str) -> Option<&AbiGetter> {
        self.getters.iter().find(|g| g.name == name)
    }

    /// Whether the schema declares a function literally named `constructor`.
    pub fn has_constructor(&self) -> bool {
        self.function("constructor").is_some()
    }

    /// State fields supplied through initial data.
    pub fn init_fields(&self) -> impl Iterator<Item = &AbiParam> {
        self.fields.iter().filter(|f| f.is_init())
    }

    /// Parameters of state fields, functions and getters. Event parameters
    /// are passed through untouched and not included.
    pub fn binding_params(&self) -> impl Iterator<Item = &AbiParam> {
        self.fields
            .iter()
            .chain(self.functions.iter().flat_map(|f| f.inputs.iter().chain(&f.outputs)))
            .chain(self.getters.iter().flat_map(|g| g.inputs.iter().chain(&g.outputs)))
    }

    /// Parse every type descriptor bindings depend on, failing on the first
    /// unsupported one.
    pub fn validate(&self) -> Result<()> {
        for param in self.binding_params() {
            param.abi_type()?;
        }
        Ok(())
    }
}
