use anyhow::Result;
use std::{env, path::PathBuf};

pub fn ghstats_home() -> Result<PathBuf> {
    let xdg = env::var_os("XDG_CONFIG_HOME");
    let base = xdg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env::var_os("HOME").unwrap_or_default()).join(".config"));
    Ok(base.join("ghstats"))
}

/// Default location of `config.toml`, inside [`ghstats_home`].
pub fn config_file() -> Result<PathBuf> {
    Ok(ghstats_home()?.join("config.toml"))
}
