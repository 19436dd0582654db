use std::{path::PathBuf, time::Duration};

use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Адрес АПИ.
    pub api_url: String,

    /// Путь до файла локального хранилища.
    pub storage_path: PathBuf,

    /// Таймаут запросов к АПИ в секундах.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5678".to_owned(),
            storage_path: PathBuf::from("./storage.json"),
            timeout_secs: 5,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Загружает конфигурацию.
/// Если файла нет, он будет создан со значениями по умолчанию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg)?;

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config) -> anyhow::Result<()> {
    // Чтобы правильно обработать относительные пути.
    cfg.storage_path = cfg.storage_path.try_resolve()?.into_owned();

    Ok(())
}
