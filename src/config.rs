use crate::models::MissingFilePolicy;
use crate::storage::{Store, DEFAULT_DB_FILE};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DATA_FILE_VAR: &str = "VAULT_DATA_FILE";
pub const SEED_ON_MISSING_VAR: &str = "VAULT_SEED_ON_MISSING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub missing_policy: MissingFilePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DB_FILE),
            missing_policy: MissingFilePolicy::Seed,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let cwd = env::current_dir().context("reading working directory")?;
        Ok(Self::from_lookup(|name| env::var(name).ok()).resolved_against(cwd))
    }

    /// Build from an arbitrary variable source; unknown or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let data_file = lookup(DATA_FILE_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);
        let seed = lookup(SEED_ON_MISSING_VAR)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.missing_policy == MissingFilePolicy::Seed);
        Config {
            data_file,
            missing_policy: if seed { MissingFilePolicy::Seed } else { MissingFilePolicy::Empty },
        }
    }

    fn resolved_against(mut self, base: PathBuf) -> Self {
        if self.data_file.is_relative() {
            self.data_file = base.join(&self.data_file);
        }
        self
    }

    pub fn store(&self) -> Store {
        Store::new(&self.data_file, self.missing_policy)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            (DATA_FILE_VAR, "/srv/vault.json"),
            (SEED_ON_MISSING_VAR, "no"),
        ]));
        assert_eq!(cfg.data_file, PathBuf::from("/srv/vault.json"));
        assert_eq!(cfg.missing_policy, MissingFilePolicy::Empty);
    }

    #[test]
    fn garbage_bool_keeps_default() {
        let cfg = Config::from_lookup(lookup(&[(SEED_ON_MISSING_VAR, "maybe"), (DATA_FILE_VAR, "  ")]));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn bool_values_ignore_case() {
        for v in ["True", "YES", " on ", "1"] {
            assert_eq!(parse_bool(v), Some(true), "{:?}", v);
        }
        for v in ["False", "No", "OFF", "0"] {
            assert_eq!(parse_bool(v), Some(false), "{:?}", v);
        }
        let cfg = Config::from_lookup(lookup(&[(SEED_ON_MISSING_VAR, "False")]));
        assert_eq!(cfg.missing_policy, MissingFilePolicy::Empty);
    }

    #[test]
    fn relative_path_is_resolved() {
        let cfg = Config::default().resolved_against(PathBuf::from("/home/me"));
        assert_eq!(cfg.data_file, PathBuf::from("/home/me/communities.json"));
    }
}
