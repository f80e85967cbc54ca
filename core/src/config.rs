use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

const DEFAULT_DIR_NAME: &str = ".dtr";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Uses `base_dir` when given, otherwise `~/.dtr`. The directory is
    /// created if missing.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(DEFAULT_DIR_NAME)
            }
        };
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Could not create data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("dtr");

        let config = Config::new(Some(dir.clone())).unwrap();
        assert!(dir.is_dir());
        assert_eq!(config.file("logs.json"), dir.join("logs.json"));
    }
}
