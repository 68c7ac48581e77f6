//! Loading configuration from files and strings

use std::path::Path;

use tracing::{debug, info};

use crate::{ConfigError, KGraphConfig};

/// Serialization format of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Reads and validates [`KGraphConfig`]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a config file, choosing the format by extension
    pub async fn load_from_file(path: impl AsRef<Path>) -> Result<KGraphConfig, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_str(&text, format)?;
        info!(path = %path.display(), graph = %config.graph.uri, "Loaded kgraph config");
        Ok(config)
    }

    /// Parse and validate config text
    pub fn from_str(text: &str, format: ConfigFormat) -> Result<KGraphConfig, ConfigError> {
        debug!(format = format.name(), "Parsing kgraph config");
        let config: KGraphConfig = match format {
            #[cfg(feature = "toml")]
            ConfigFormat::Toml => {
                toml::from_str(text).map_err(|e| ConfigError::parse("toml", e))?
            }
            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| ConfigError::parse("yaml", e))?
            }
            ConfigFormat::Json => {
                serde_json::from_str(text).map_err(|e| ConfigError::parse("json", e))?
            }
            #[allow(unreachable_patterns)]
            other => return Err(ConfigError::UnsupportedFormat(other.name().to_string())),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricConfig;
    use test_case::test_case;

    #[test_case("graph.toml", ConfigFormat::Toml)]
    #[test_case("graph.YAML", ConfigFormat::Yaml)]
    #[test_case("graph.yml", ConfigFormat::Yaml)]
    #[test_case("graph.json", ConfigFormat::Json)]
    fn test_format_from_extension(name: &str, expected: ConfigFormat) {
        assert_eq!(ConfigFormat::from_path(Path::new(name)).unwrap(), expected);
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            ConfigFormat::from_path(Path::new("graph.ini")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }

    #[test]
    fn test_toml_sections() {
        let text = r#"
            [graph]
            id = "people"
            uri = "http://example.org/graph/people"

            [vector_store]
            metric = "dot"

            [projections.types."http://example.org/Person"]
            general = ["http://example.org/name", "http://example.org/bio"]
        "#;
        let config = ConfigLoader::from_str(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.graph.id, "people");
        assert_eq!(config.vector_store.metric, MetricConfig::Dot);
        assert_eq!(
            config.projections.types["http://example.org/Person"]["general"],
            vec!["http://example.org/name", "http://example.org/bio"]
        );
        assert!(!config.projections.replace_defaults);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let text = "graph:\n  id: notes\n  uri: urn:kgraph:notes\n";
        let config = ConfigLoader::from_str(text, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.graph.id, "notes");
        assert_eq!(config.collection_name(), "notes_vectors");
        assert!(config.projections.types.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected_on_load() {
        let text = r#"{"graph": {"id": "g", "uri": "relative/path"}}"#;
        assert!(matches!(
            ConfigLoader::from_str(text, ConfigFormat::Json),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ConfigLoader::from_str("[graph", ConfigFormat::Toml),
            Err(ConfigError::Parse { .. })
        ));
    }
}
