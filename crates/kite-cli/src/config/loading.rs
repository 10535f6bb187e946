use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use tracing::debug;

use super::{FlagOverrides, KiteConfig};
use crate::error::{ConfigError, Result};

/// File looked up in the package root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "kite.config.json";

const ENV_PREFIX: &str = "KITE_";

/// Prefix-stripped variable names that map onto config fields. Other
/// `KITE_*` variables belong to someone else and are ignored.
const ENV_FIELDS: &[&str] = &[
    "concurrency",
    "extensions",
    "excluded_dirs",
    "use_project_config",
    "max_file_size",
    "out",
];

/// Config file to load: the explicit path (which must exist) or
/// `kite.config.json` in the package root when present.
pub fn locate_config_file(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        None => {
            let default_path = root.join(CONFIG_FILE_NAME);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}

impl KiteConfig {
    /// Merge every layer for one `analyze` invocation.
    pub fn load(args: &crate::cli::AnalyzeArgs) -> Result<Self> {
        let config_file = locate_config_file(&args.root, args.config.as_deref())?;
        let config = Self::from_layers(config_file.as_deref(), &FlagOverrides::from(args))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults < config file < `KITE_*` environment < flags.
    pub fn from_layers(config_file: Option<&Path>, flags: &FlagOverrides) -> Result<Self> {
        Ok(Self::figment(config_file, flags)
            .extract::<Self>()
            .map_err(ConfigError::from)?)
    }

    fn figment(config_file: Option<&Path>, flags: &FlagOverrides) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            debug!("loading config file {}", path.display());
            figment = figment.merge(Json::file(path));
        }

        figment
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .only(ENV_FIELDS)
                    .map(|key| env_key_to_field(key.as_str()).into())
                    .lowercase(false),
            )
            .merge(Serialized::defaults(flags))
    }
}

/// `KITE_MAX_FILE_SIZE` arrives as `max_file_size`; fields are camelCase.
fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            field.extend(ch.to_uppercase());
            upper = false;
        } else {
            field.push(ch.to_ascii_lowercase());
        }
    }
    field
}

#[cfg(test)]
mod tests {
    use super::env_key_to_field;

    #[test]
    fn test_env_key_to_field() {
        assert_eq!(env_key_to_field("concurrency"), "concurrency");
        assert_eq!(env_key_to_field("max_file_size"), "maxFileSize");
        assert_eq!(env_key_to_field("USE_PROJECT_CONFIG"), "useProjectConfig");
    }
}
