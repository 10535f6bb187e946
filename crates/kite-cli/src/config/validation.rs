use super::KiteConfig;
use crate::error::{ConfigError, Result};

impl KiteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency".to_string(),
                value: "0".to_string(),
                hint: "Use at least 1 worker".to_string(),
            }
            .into());
        }

        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                value: "[]".to_string(),
                hint: "List at least one extension, e.g. [\"ts\", \"vue\"]".to_string(),
            }
            .into());
        }

        if let Some(ext) = self.extensions.iter().find(|e| e.starts_with('.') || e.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                value: ext.clone(),
                hint: "Write extensions without the leading dot".to_string(),
            }
            .into());
        }

        if self.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maxFileSize".to_string(),
                value: "0".to_string(),
                hint: "Use a size in bytes greater than zero".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
