use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::config_file;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_OUTPUT: &str = "data.json";
pub const DEFAULT_YEARS: [i32; 4] = [2023, 2024, 2025, 2026];
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// A credential that never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Everything one run needs, resolved up front and passed explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub account: String,
    pub token: Secret,
    pub years: Vec<i32>,
    pub output_path: PathBuf,
    pub endpoint: String,
}

/// Optional `config.toml` contents.
///
/// Example TOML:
/// ```toml
/// account = "octocat"
/// years   = [2024, 2025]
/// output  = "site/data.json"
/// ```
///
/// The token is not a recognized key; it only comes from `GITHUB_TOKEN`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub years: Option<Vec<i32>>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Values given on the command line. Anything set here wins over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub account: Option<String>,
    pub years: Vec<i32>,
    pub output: Option<PathBuf>,
}

/// Read and parse a TOML config file.
///
/// # Errors
/// - The file cannot be read.
/// - The TOML is invalid or contains unknown keys.
pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("config not found: {}", path.display()))?;
    let cfg: FileConfig =
        toml::from_str(&txt).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(cfg)
}

impl Config {
    /// Layer defaults, file values, CLI overrides and the token into one [`Config`].
    pub(crate) fn resolve(file: FileConfig, ov: Overrides, token: Option<String>) -> Result<Config> {
        let account = ov
            .account
            .or(file.account)
            .map(|a| a.trim().to_string())
            .unwrap_or_default();
        if account.is_empty() {
            bail!("no account configured (set `account` in config.toml or pass --account)");
        }

        let token = match token {
            Some(t) if !t.trim().is_empty() => Secret::new(t.trim()),
            _ => bail!("{} is not set", TOKEN_ENV),
        };

        let years = if !ov.years.is_empty() {
            ov.years
        } else {
            file.years.unwrap_or_else(|| DEFAULT_YEARS.to_vec())
        };

        let output_path = ov
            .output
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let endpoint = file
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Config {
            account,
            token,
            years,
            output_path,
            endpoint,
        })
    }
}

/// Resolve the run configuration from disk, flags and environment.
///
/// An explicit `--config` path must exist. The default `config.toml`
/// is optional; when absent, built-in defaults apply.
pub fn load_config(ov: Overrides) -> Result<Config> {
    let file = match ov.config_path.as_deref() {
        Some(p) => read_file_config(p)?,
        None => {
            let p = config_file()?;
            if p.is_file() {
                read_file_config(&p)?
            } else {
                FileConfig::default()
            }
        }
    };
    let token = std::env::var(TOKEN_ENV).ok();
    Config::resolve(file, ov, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn tok() -> Option<String> {
        Some("t0ken".to_string())
    }

    #[test]
    fn defaults_apply_when_only_account_given() {
        let ov = Overrides {
            account: Some("octocat".into()),
            ..Default::default()
        };
        let cfg = Config::resolve(FileConfig::default(), ov, tok()).unwrap();
        assert_eq!(cfg.account, "octocat");
        assert_eq!(cfg.years, vec![2023, 2024, 2025, 2026]);
        assert_eq!(cfg.output_path, PathBuf::from("data.json"));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.token.expose(), "t0ken");
    }

    #[test]
    fn overrides_win_over_file() {
        let file: FileConfig = toml::from_str(
            r#"
            account = "from-file"
            years = [2020]
            output = "file.json"
            endpoint = "http://localhost:1/graphql"
            "#,
        )
        .unwrap();
        let ov = Overrides {
            account: Some("from-cli".into()),
            years: vec![2021, 2022],
            output: Some(PathBuf::from("cli.json")),
            ..Default::default()
        };
        let cfg = Config::resolve(file, ov, tok()).unwrap();
        assert_eq!(cfg.account, "from-cli");
        assert_eq!(cfg.years, vec![2021, 2022]);
        assert_eq!(cfg.output_path, PathBuf::from("cli.json"));
        assert_eq!(cfg.endpoint, "http://localhost:1/graphql");
    }

    #[test]
    fn file_values_used_without_overrides() {
        let file: FileConfig = toml::from_str("account = \"a\"\nyears = [2019, 2018]\n").unwrap();
        let cfg = Config::resolve(file, Overrides::default(), tok()).unwrap();
        assert_eq!(cfg.account, "a");
        assert_eq!(cfg.years, vec![2019, 2018]);
    }

    #[test]
    fn missing_account_is_rejected() {
        let err = Config::resolve(FileConfig::default(), Overrides::default(), tok()).unwrap_err();
        assert!(err.to_string().contains("no account configured"));
    }

    #[test]
    fn missing_or_blank_token_is_rejected() {
        let ov = Overrides {
            account: Some("octocat".into()),
            ..Default::default()
        };
        for t in [None, Some(String::new()), Some("   ".to_string())] {
            let err = Config::resolve(FileConfig::default(), ov.clone(), t).unwrap_err();
            assert!(err.to_string().contains("GITHUB_TOKEN"));
        }
    }

    #[test]
    fn unknown_keys_and_token_key_are_rejected() {
        assert!(toml::from_str::<FileConfig>("token = \"x\"").is_err());
        assert!(toml::from_str::<FileConfig>("acount = \"typo\"").is_err());
    }

    #[test]
    fn secret_debug_is_redacted() {
        let s = Secret::new("hunter2");
        assert_eq!(format!("{:?}", s), "Secret(***)");
        let cfg = Config::resolve(
            FileConfig::default(),
            Overrides {
                account: Some("octocat".into()),
                ..Default::default()
            },
            Some("hunter2".into()),
        )
        .unwrap();
        assert!(!format!("{:?}", cfg).contains("hunter2"));
    }

    #[test]
    #[serial]
    fn load_config_reads_explicit_file_and_env_token() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("custom.toml");
        fs::write(&path, "account = \"octocat\"\nyears = [2024]\n").unwrap();
        unsafe { env::set_var(TOKEN_ENV, "env-token") };

        let cfg = load_config(Overrides {
            config_path: Some(path),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cfg.account, "octocat");
        assert_eq!(cfg.years, vec![2024]);
        assert_eq!(cfg.token.expose(), "env-token");

        unsafe { env::remove_var(TOKEN_ENV) };
    }

    #[test]
    #[serial]
    fn load_config_errors_on_missing_explicit_file() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("nope.toml");
        let err = load_config(Overrides {
            config_path: Some(missing.clone()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains(&missing.display().to_string()));
    }

    #[test]
    #[serial]
    fn load_config_tolerates_missing_default_file() {
        let td = tempfile::tempdir().unwrap();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", td.path());
            env::set_var(TOKEN_ENV, "env-token");
        }

        let cfg = load_config(Overrides {
            account: Some("octocat".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cfg.years, DEFAULT_YEARS.to_vec());

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
            env::remove_var(TOKEN_ENV);
        }
    }
}
