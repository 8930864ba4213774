use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".bookkeeping_core";
const HOME_ENV: &str = "BOOKKEEPING_CORE_HOME";
const CONFIG_FILE: &str = "config.json";
const SNAPSHOT_DIR: &str = "snapshots";

/// Returns the application data directory, defaulting to `~/.bookkeeping_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Cached collection for one domain, e.g. `snapshots/creditor.json`.
pub fn snapshot_file_in(base: &Path, domain: &str) -> PathBuf {
    base.join(SNAPSHOT_DIR).join(format!("{}.json", domain))
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_the_base() {
        let base = Path::new("/data/books");
        assert_eq!(config_file_in(base), base.join("config.json"));
        assert_eq!(
            snapshot_file_in(base, "supplier"),
            base.join("snapshots").join("supplier.json")
        );
    }
}
