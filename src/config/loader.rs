use crate::config::schema::{
    ConfigOverrides, ExporterConfig, DEFAULT_LISTEN_ADDRESS, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{Error, Result};
use ::config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use validator::Validate;

/// Environment variables read by the exporter. Each maps onto the
/// lowercased config key of the same name.
pub const ENV_VARS: [&str; 4] = [
    "LISTEN_ADDRESS",
    "SABNZBD_URI",
    "SABNZBD_APIKEY",
    "SABNZBD_TIMEOUT_SECS",
];

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the process environment.
    pub fn load(file: Option<&Path>, flags: &ConfigOverrides) -> Result<ExporterConfig> {
        Self::load_with_env(file, flags, std::env::vars())
    }

    /// Layers, lowest first: defaults, config file, flags, environment.
    /// Empty environment values count as unset.
    pub fn load_with_env<I>(
        file: Option<&Path>,
        flags: &ConfigOverrides,
        env: I,
    ) -> Result<ExporterConfig>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut builder = Config::builder()
            .set_default("listen_address", DEFAULT_LISTEN_ADDRESS)?
            .set_default("sabnzbd_timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;

        if let Some(path) = file {
            if !path.exists() {
                return Err(Error::Config(format!("{}: file not found", path.display())));
            }
            builder = builder.add_source(File::from(path));
        }

        let env: HashMap<String, String> = env
            .into_iter()
            .filter(|(k, v)| ENV_VARS.contains(&k.as_str()) && !v.is_empty())
            .collect();

        let config = builder
            .add_source(Self::flags_source(flags)?)
            .add_source(Environment::default().source(Some(env)))
            .build()?;

        let config: ExporterConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn flags_source(flags: &ConfigOverrides) -> Result<Config> {
        let mut builder = Config::builder();
        if let Some(v) = &flags.listen_address {
            builder = builder.set_override("listen_address", v.clone())?;
        }
        if let Some(v) = &flags.sabnzbd_uri {
            builder = builder.set_override("sabnzbd_uri", v.clone())?;
        }
        if let Some(v) = &flags.sabnzbd_apikey {
            builder = builder.set_override("sabnzbd_apikey", v.clone())?;
        }
        if let Some(v) = flags.sabnzbd_timeout_secs {
            builder = builder.set_override("sabnzbd_timeout_secs", v as i64)?;
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn flags(uri: &str, key: &str) -> ConfigOverrides {
        ConfigOverrides {
            sabnzbd_uri: Some(uri.into()),
            sabnzbd_apikey: Some(key.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_with_flags() {
        let cfg = ConfigLoader::load_with_env(None, &flags("http://sab:8080", "k"), env(&[])).unwrap();
        assert_eq!(cfg.listen_address, ":8081");
        assert_eq!(cfg.bind_address(), "0.0.0.0:8081");
        assert_eq!(cfg.sabnzbd_uri, "http://sab:8080");
        assert_eq!(cfg.sabnzbd_apikey, "k");
        assert_eq!(cfg.sabnzbd_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_takes_precedence_over_flags() {
        let cfg = ConfigLoader::load_with_env(
            None,
            &flags("http://flag", "flag-key"),
            env(&[("SABNZBD_URI", "http://env"), ("LISTEN_ADDRESS", "127.0.0.1:9000")]),
        )
        .unwrap();
        assert_eq!(cfg.sabnzbd_uri, "http://env");
        assert_eq!(cfg.sabnzbd_apikey, "flag-key");
        assert_eq!(cfg.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let cfg = ConfigLoader::load_with_env(
            None,
            &flags("http://flag", "flag-key"),
            env(&[("SABNZBD_APIKEY", "")]),
        )
        .unwrap();
        assert_eq!(cfg.sabnzbd_apikey, "flag-key");
    }

    #[test]
    fn test_unrelated_env_is_ignored() {
        let cfg = ConfigLoader::load_with_env(
            None,
            &flags("http://flag", "k"),
            env(&[("PATH", "/usr/bin"), ("sabnzbd_uri", "http://lowercase")]),
        )
        .unwrap();
        assert_eq!(cfg.sabnzbd_uri, "http://flag");
    }

    #[test]
    fn test_env_only() {
        let cfg = ConfigLoader::load_with_env(
            None,
            &ConfigOverrides::default(),
            env(&[
                ("SABNZBD_URI", "http://env"),
                ("SABNZBD_APIKEY", "env-key"),
                ("SABNZBD_TIMEOUT_SECS", "3"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.sabnzbd_apikey, "env-key");
        assert_eq!(cfg.sabnzbd_timeout_secs, 3);
    }

    #[test]
    fn test_missing_uri_is_rejected() {
        let overrides = ConfigOverrides {
            sabnzbd_apikey: Some("k".into()),
            ..Default::default()
        };
        let result = ConfigLoader::load_with_env(None, &overrides, env(&[]));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let overrides = ConfigOverrides {
            sabnzbd_uri: Some("http://sab".into()),
            ..Default::default()
        };
        let result = ConfigLoader::load_with_env(None, &overrides, env(&[]));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_file_layer_below_flags() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "listen_address = \"127.0.0.1:9100\"\nsabnzbd_uri = \"http://file\"\nsabnzbd_apikey = \"file-key\""
        )
        .unwrap();

        let overrides = ConfigOverrides {
            sabnzbd_apikey: Some("flag-key".into()),
            ..Default::default()
        };
        let cfg = ConfigLoader::load_with_env(Some(file.path()), &overrides, env(&[])).unwrap();
        assert_eq!(cfg.listen_address, "127.0.0.1:9100");
        assert_eq!(cfg.sabnzbd_uri, "http://file");
        assert_eq!(cfg.sabnzbd_apikey, "flag-key");
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_with_env(
            Some(Path::new("/nonexistent/exporter.toml")),
            &flags("http://sab", "k"),
            env(&[]),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
