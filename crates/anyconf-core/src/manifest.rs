//! Reader for declarative component manifests.
//!
//! A manifest describes service components as JSON:
//!
//! ```json
//! {
//!   "components": [{
//!     "implementation-class": "sample::Greeter",
//!     "configuration-policy": "require",
//!     "configuration-pid": "sample.greeter",
//!     "service": { "scope": "singleton", "interfaces": ["sample::IGreeter"] },
//!     "references": [{
//!       "name": "log", "interface": "sample::ILog",
//!       "cardinality": "0..1", "policy": "dynamic", "policy-option": "greedy"
//!     }]
//!   }]
//! }
//! ```
//!
//! Validation is all-or-nothing: the first structural problem aborts the
//! whole document. Duplicate reference names are the exception to "first
//! problem wins": every duplicated name in a component is reported together.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::warn;

use crate::error::ManifestError;

type Result<T> = std::result::Result<T, ManifestError>;

/// One validated component description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentInfo {
    pub implementation_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub inject_references: bool,
    pub configuration_policy: ConfigurationPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_pid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceInfo>,
    pub references: Vec<ReferenceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub scope: Scope,
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReferenceInfo {
    pub name: String,
    pub interface: String,
    pub cardinality: Cardinality,
    pub policy: ReferencePolicy,
    pub policy_option: PolicyOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// A closed set of string choices in the manifest.
trait Choice: Sized + Copy + 'static {
    const CHOICES: &'static [&'static str];
    const VARIANTS: &'static [Self];

    fn parse(field: &str, raw: &str) -> Result<Self> {
        Self::CHOICES
            .iter()
            .position(|choice| *choice == raw)
            .map(|i| Self::VARIANTS[i])
            .ok_or_else(|| ManifestError::InvalidChoice {
                field: field.to_string(),
                value: raw.to_string(),
                choices: Self::CHOICES,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationPolicy {
    #[default]
    Ignore,
    Optional,
    Require,
}

impl Choice for ConfigurationPolicy {
    const CHOICES: &'static [&'static str] = &["ignore", "optional", "require"];
    const VARIANTS: &'static [Self] = &[Self::Ignore, Self::Optional, Self::Require];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Singleton,
    Bundle,
    Prototype,
}

impl Choice for Scope {
    const CHOICES: &'static [&'static str] = &["singleton", "bundle", "prototype"];
    const VARIANTS: &'static [Self] = &[Self::Singleton, Self::Bundle, Self::Prototype];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinality {
    #[serde(rename = "0..1")]
    Optional,
    #[serde(rename = "1..1")]
    Mandatory,
    #[serde(rename = "0..n")]
    Multiple,
    #[serde(rename = "1..n")]
    AtLeastOne,
}

impl Choice for Cardinality {
    const CHOICES: &'static [&'static str] = &["0..1", "1..1", "0..n", "1..n"];
    const VARIANTS: &'static [Self] = &[
        Self::Optional,
        Self::Mandatory,
        Self::Multiple,
        Self::AtLeastOne,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    Static,
    Dynamic,
}

impl Choice for ReferencePolicy {
    const CHOICES: &'static [&'static str] = &["static", "dynamic"];
    const VARIANTS: &'static [Self] = &[Self::Static, Self::Dynamic];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyOption {
    Reluctant,
    Greedy,
}

impl Choice for PolicyOption {
    const CHOICES: &'static [&'static str] = &["reluctant", "greedy"];
    const VARIANTS: &'static [Self] = &[Self::Reluctant, Self::Greedy];
}

/// Parse manifest JSON text into component records.
pub fn parse_manifest(json: &str) -> Result<Vec<ComponentInfo>> {
    let doc: JsonValue = serde_json::from_str(json)?;
    component_infos(&doc)
}

/// Validate an already-parsed manifest document.
pub fn component_infos(doc: &JsonValue) -> Result<Vec<ComponentInfo>> {
    let root = doc.as_object().ok_or_else(|| ManifestError::WrongType {
        field: "<root>".to_string(),
        expected: "an object",
    })?;
    required_array(root, "components")?
        .iter()
        .map(|component| {
            let fields = component.as_object().ok_or_else(|| ManifestError::WrongType {
                field: "components".to_string(),
                expected: "an array of objects",
            })?;
            parse_component(fields)
        })
        .collect()
}

fn parse_component(fields: &Map<String, JsonValue>) -> Result<ComponentInfo> {
    let implementation_class = required_str(fields, "implementation-class")?.to_string();

    // The name is optional; a value of the wrong shape is ignored.
    let name = fields
        .get("name")
        .and_then(JsonValue::as_str)
        .map(str::to_string);

    let inject_references = match fields.get("inject-references") {
        Some(raw) => raw.as_bool().ok_or_else(|| ManifestError::WrongType {
            field: "inject-references".to_string(),
            expected: "a boolean",
        })?,
        None => true,
    };

    let policy = optional_str(fields, "configuration-policy")?
        .map(|raw| ConfigurationPolicy::parse("configuration-policy", raw))
        .transpose()?;
    let configuration_pid = optional_str(fields, "configuration-pid")?.map(str::to_string);

    // Configuration only applies when both the policy and the pid are given.
    let configuration_policy = match (policy, &configuration_pid) {
        (Some(policy), Some(_)) => policy,
        (None, None) => ConfigurationPolicy::Ignore,
        _ => {
            warn!(
                component = %implementation_class,
                "configuration-policy has been set to ignore; both configuration-policy and \
                 configuration-pid must be present to participate in configuration"
            );
            ConfigurationPolicy::Ignore
        }
    };

    let service = match fields.get("service") {
        Some(raw) => {
            let service = raw.as_object().ok_or_else(|| ManifestError::WrongType {
                field: "service".to_string(),
                expected: "an object",
            })?;
            Some(parse_service(service)?)
        }
        None => None,
    };

    let references = match fields.get("references") {
        Some(_) => parse_references(required_array(fields, "references")?)?,
        None => Vec::new(),
    };

    Ok(ComponentInfo {
        implementation_class,
        name,
        inject_references,
        configuration_policy,
        configuration_pid,
        service,
        references,
    })
}

fn parse_service(fields: &Map<String, JsonValue>) -> Result<ServiceInfo> {
    let scope = Scope::parse("scope", required_str(fields, "scope")?)?;
    let raw_interfaces = required_array(fields, "interfaces")?;
    if raw_interfaces.is_empty() {
        return Err(ManifestError::WrongType {
            field: "interfaces".to_string(),
            expected: "a non-empty array",
        });
    }
    let interfaces = raw_interfaces
        .iter()
        .map(|raw| match raw.as_str() {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(ManifestError::EmptyInterface),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ServiceInfo { scope, interfaces })
}

fn parse_references(raw: &[JsonValue]) -> Result<Vec<ReferenceInfo>> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    let mut references = Vec::with_capacity(raw.len());
    for entry in raw {
        let fields = entry.as_object().ok_or_else(|| ManifestError::WrongType {
            field: "references".to_string(),
            expected: "an array of objects",
        })?;
        let name = required_str(fields, "name")?;
        *seen.entry(name).or_default() += 1;
        references.push(ReferenceInfo {
            name: name.to_string(),
            interface: required_str(fields, "interface")?.to_string(),
            cardinality: Cardinality::parse("cardinality", required_str(fields, "cardinality")?)?,
            policy: ReferencePolicy::parse("policy", required_str(fields, "policy")?)?,
            policy_option: PolicyOption::parse(
                "policy-option",
                required_str(fields, "policy-option")?,
            )?,
            target: optional_str(fields, "target")?.map(str::to_string),
        });
    }

    let duplicates: Vec<String> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    if !duplicates.is_empty() {
        return Err(ManifestError::DuplicateReferences(duplicates));
    }
    Ok(references)
}

fn required<'a>(fields: &'a Map<String, JsonValue>, field: &str) -> Result<&'a JsonValue> {
    fields.get(field).ok_or_else(|| ManifestError::MissingField {
        field: field.to_string(),
    })
}

fn required_str<'a>(fields: &'a Map<String, JsonValue>, field: &str) -> Result<&'a str> {
    required(fields, field)?
        .as_str()
        .ok_or_else(|| ManifestError::WrongType {
            field: field.to_string(),
            expected: "a string",
        })
}

fn required_array<'a>(fields: &'a Map<String, JsonValue>, field: &str) -> Result<&'a [JsonValue]> {
    required(fields, field)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ManifestError::WrongType {
            field: field.to_string(),
            expected: "an array",
        })
}

/// `Ok(None)` when absent; a present value must be a string.
fn optional_str<'a>(fields: &'a Map<String, JsonValue>, field: &str) -> Result<Option<&'a str>> {
    match fields.get(field) {
        Some(raw) => raw.as_str().map(Some).ok_or_else(|| ManifestError::WrongType {
            field: field.to_string(),
            expected: "a string",
        }),
        None => Ok(None),
    }
}
