//! Runtime configuration from environment variables.

use std::path::PathBuf;

/// Directory for the CSV store (`BRACKET_DATA_DIR`).
pub const DATA_DIR_VAR: &str = "BRACKET_DATA_DIR";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build from `(name, value)` pairs. Unset or blank values fall back to defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            if key.as_ref() == DATA_DIR_VAR {
                let value: String = value.into();
                if !value.trim().is_empty() {
                    config.data_dir = PathBuf::from(value.trim());
                }
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        assert_eq!(Config::from_vars(Vec::<(String, String)>::new()), Config::default());
        assert_eq!(Config::from_vars([(DATA_DIR_VAR, "  ")]).data_dir, PathBuf::from("data"));
    }

    #[test]
    fn reads_data_dir() {
        let config = Config::from_vars([("OTHER", "x"), (DATA_DIR_VAR, "/srv/bracket")]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/bracket"));
    }
}
