use crate::domain::error::{LlmCtlError, LlmCtlResult};
use crate::domain::model::ModelDescription;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Anything that can describe a model by name
#[async_trait]
pub trait ModelSource: Send + Sync {
    async fn describe(&self, name: &str) -> LlmCtlResult<ModelDescription>;
}

/// Reads descriptions from JSON files. A name is either a path to a file or
/// a file stem under the base directory (`llama3` -> `<base>/llama3.json`).
pub struct JsonFileSource {
    base_dir: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn locate(&self, name: &str) -> PathBuf {
        let direct = PathBuf::from(name);
        if direct.is_file() {
            return direct;
        }
        match &self.base_dir {
            Some(base) => base.join(format!("{}.json", name)),
            None => direct,
        }
    }
}

impl Default for JsonFileSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelSource for JsonFileSource {
    async fn describe(&self, name: &str) -> LlmCtlResult<ModelDescription> {
        if name.trim().is_empty() {
            return Err(LlmCtlError::InvalidInput("model name is empty".to_string()));
        }

        let path = self.locate(name);
        debug!("Loading model description from {}", path.display());

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LlmCtlError::ModelSource {
                message: format!("Failed to read {}: {}", path.display(), e),
            })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_describe_by_stem() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tiny.json"),
            r#"{"details": {"family": "tiny", "parameter_size": "1M"}}"#,
        )
        .unwrap();

        let source = JsonFileSource::with_base_dir(dir.path());
        let description = source.describe("tiny").await.unwrap();
        assert_eq!(description.details.family, "tiny");
    }

    #[tokio::test]
    async fn test_describe_by_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "{}").unwrap();

        let description = JsonFileSource::new()
            .describe(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(description, ModelDescription::default());
    }

    #[tokio::test]
    async fn test_describe_errors() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileSource::with_base_dir(dir.path());

        assert!(matches!(source.describe(" ").await, Err(LlmCtlError::InvalidInput(_))));
        assert!(matches!(source.describe("missing").await, Err(LlmCtlError::ModelSource { .. })));

        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        assert!(matches!(source.describe("broken").await, Err(LlmCtlError::Json(_))));
    }
}
