use serde::{Deserialize, Serialize};

/// Configuration from docket.toml (all optional).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// File the application list is persisted to, relative to the data
    /// directory.
    #[serde(default = "default_data_file")]
    pub file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            file: default_data_file(),
        }
    }
}

fn default_data_file() -> String {
    "applications.json".to_string()
}
