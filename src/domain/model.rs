use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata key holding the model architecture name
pub const ARCHITECTURE_KEY: &str = "general.architecture";
/// Metadata key holding the raw parameter count
pub const PARAMETER_COUNT_KEY: &str = "general.parameter_count";

/// Key-ordered metadata map
pub type ModelInfo = BTreeMap<String, MetadataValue>;

/// Description of a model as returned by a metadata query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDescription {
    pub details: ModelDetails,
    pub model_info: ModelInfo,
    pub projector_info: ModelInfo,
    /// Newline separated `key value` pairs
    pub parameters: String,
    pub tensors: Vec<Tensor>,
    pub system: String,
    pub license: String,
    pub template: String,
    pub modelfile: String,
    pub capabilities: Vec<Capability>,
}

/// Summary details of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDetails {
    pub family: String,
    pub parameter_size: String,
    pub quantization_level: String,
}

/// A single tensor entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub name: String,
    #[serde(rename = "type")]
    pub tensor_type: String,
    #[serde(default)]
    pub shape: Vec<u64>,
}

impl Tensor {
    pub fn new(name: impl Into<String>, tensor_type: impl Into<String>, shape: Vec<u64>) -> Self {
        Self {
            name: name.into(),
            tensor_type: tensor_type.into(),
            shape,
        }
    }
}

/// Heterogeneous metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<MetadataValue>),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Supported model feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Capability {
    Completion,
    Tools,
    Insert,
    Vision,
    Embedding,
    Thinking,
    Other(String),
}

impl From<String> for Capability {
    fn from(tag: String) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "completion" => Self::Completion,
            "tools" => Self::Tools,
            "insert" => Self::Insert,
            "vision" => Self::Vision,
            "embedding" => Self::Embedding,
            "thinking" => Self::Thinking,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<Capability> for String {
    fn from(capability: Capability) -> Self {
        capability.to_string()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Completion => write!(f, "completion"),
            Capability::Tools => write!(f, "tools"),
            Capability::Insert => write!(f, "insert"),
            Capability::Vision => write!(f, "vision"),
            Capability::Embedding => write!(f, "embedding"),
            Capability::Thinking => write!(f, "thinking"),
            Capability::Other(tag) => write!(f, "{}", tag),
        }
    }
}
