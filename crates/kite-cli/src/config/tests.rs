#[cfg(test)]
mod tests {
    use crate::cli::AnalyzeArgs;
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use serial_test::serial;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn args(root: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            root: root.to_path_buf(),
            out: None,
            concurrency: None,
            no_project_config: false,
            config: None,
        }
    }

    fn clear_env() {
        unsafe {
            for key in [
                "KITE_CONCURRENCY",
                "KITE_MAX_FILE_SIZE",
                "KITE_USE_PROJECT_CONFIG",
                "KITE_HOME",
            ] {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_match_library() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let config = KiteConfig::load(&args(temp.path())).unwrap();
        assert_eq!(config.analyzer_config(), kite_graph::AnalyzerConfig::default());
        assert!(config.out.is_none());
    }

    #[test]
    #[serial]
    fn test_config_file_in_root_is_picked_up() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "concurrency": 3, "useProjectConfig": false, "out": "graph.json" }"#,
        )
        .unwrap();

        let config = KiteConfig::load(&args(temp.path())).unwrap();
        assert_eq!(config.concurrency, 3);
        assert!(!config.use_project_config);
        assert_eq!(config.out, Some(PathBuf::from("graph.json")));
        // Untouched fields keep their defaults
        assert_eq!(config.max_file_size, kite_graph::DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "concurrency": 3, "maxFileSize": 1000 }"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var("KITE_CONCURRENCY", "5");
            std::env::set_var("KITE_MAX_FILE_SIZE", "2048");
        }
        let config = KiteConfig::load(&args(temp.path()));
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.max_file_size, 2048);
    }

    #[test]
    #[serial]
    fn test_flags_override_everything() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "concurrency": 3, "out": "from-file.json" }"#,
        )
        .unwrap();
        unsafe {
            std::env::set_var("KITE_CONCURRENCY", "5");
        }

        let mut cli_args = args(temp.path());
        cli_args.concurrency = Some(7);
        cli_args.no_project_config = true;
        cli_args.out = Some(PathBuf::from("from-flag.json"));
        let config = KiteConfig::load(&cli_args);
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.concurrency, 7);
        assert!(!config.use_project_config);
        assert_eq!(config.out, Some(PathBuf::from("from-flag.json")));
    }

    #[test]
    #[serial]
    fn test_absent_flags_do_not_mask_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "useProjectConfig": false }"#,
        )
        .unwrap();

        // --no-project-config not given: the file's false survives
        let config = KiteConfig::load(&args(temp.path())).unwrap();
        assert!(!config.use_project_config);
    }

    #[test]
    #[serial]
    fn test_explicit_config_path() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let custom = temp.path().join("custom.json");
        fs::write(&custom, r#"{ "extensions": ["ts"] }"#).unwrap();

        let mut cli_args = args(temp.path());
        cli_args.config = Some(custom);
        let config = KiteConfig::load(&cli_args).unwrap();
        assert_eq!(config.extensions, vec!["ts".to_string()]);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.json");
        let err = locate_config_file(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_no_default_file_is_fine() {
        let temp = TempDir::new().unwrap();
        assert!(locate_config_file(temp.path(), None).unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_unrelated_env_vars_are_ignored() {
        clear_env();
        let temp = TempDir::new().unwrap();

        unsafe {
            std::env::set_var("KITE_HOME", "/opt/kite");
            std::env::set_var("KITE_CONCURRENCY", "2");
        }
        let config = KiteConfig::load(&args(temp.path()));
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.max_file_size, kite_graph::DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    #[serial]
    fn test_unknown_field_rejected() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), r#"{ "entry": ["x"] }"#).unwrap();
        let err = KiteConfig::load(&args(temp.path())).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation() {
        assert!(KiteConfig::default().validate().is_ok());

        let zero = KiteConfig {
            concurrency: 0,
            ..KiteConfig::default()
        };
        assert!(zero.validate().is_err());

        let dotted = KiteConfig {
            extensions: vec![".ts".to_string()],
            ..KiteConfig::default()
        };
        assert!(dotted.validate().is_err());

        let empty = KiteConfig {
            extensions: vec![],
            ..KiteConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_serialization_is_camel_case() {
        let json = serde_json::to_value(KiteConfig::default()).unwrap();
        assert!(json.get("maxFileSize").is_some());
        assert!(json.get("useProjectConfig").is_some());
        assert!(json.get("out").is_none());
    }
}
