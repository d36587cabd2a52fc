//! # Configuration Loader
//!
//! Layers, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. TOML file (`--config FILE`, else `mediagallery.toml` when present)
//! 3. `MG_` environment variables, `__` between sections and keys
//!    (`MG_STORAGE__DATABASE_PATH`, `MG_PAGING__POSTS_PER_PAGE`)
//!
//! Values are accepted as found; nothing here checks paths or addresses.

use std::path::Path;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use mg_core::config::AppConfig;
use mg_core::paging::DEFAULT_PAGE_SIZE;

pub const DEFAULT_CONFIG_FILE: &str = "mediagallery.toml";

const ENV_PREFIX: &str = "MG";

/// Load configuration from defaults, the TOML file and the environment.
///
/// An explicit `config_path` must exist; the default file is optional.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    build_config(config_path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build_config(config_path: Option<&Path>, env: Environment) -> anyhow::Result<AppConfig> {
    let (file, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    let page_size = DEFAULT_PAGE_SIZE as i64;

    let settings = Config::builder()
        .set_default("storage.database_path", "gallery.db")?
        .set_default("dataset.data_dir", "public/data")?
        .set_default("dataset.media_root", "public")?
        .set_default("server.bind_addr", "127.0.0.1:3000")?
        .set_default("client.base_url", "http://127.0.0.1:3000")?
        .set_default("paging.posts_per_page", page_size)?
        .set_default("paging.models_per_page", page_size)?
        .add_source(File::from(file).format(FileFormat::Toml).required(required))
        .add_source(env)
        .build()
        .with_context(|| format!("Failed to load configuration ({})", file.display()))?;

    settings
        .try_deserialize::<AppConfig>()
        .context("Failed to map configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let mut vars = config::Map::new();
        for (key, value) in pairs {
            vars.insert(key.to_string(), value.to_string());
        }
        environment().source(Some(vars))
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let missing = PathBuf::from("/nonexistent/mediagallery.toml");
        let err = build_config(Some(&missing), env_from(&[]));
        assert!(err.is_err(), "explicit config path must exist");

        let config = build_config(None, env_from(&[])).unwrap();
        assert_eq!(config.storage.database_path, PathBuf::from("gallery.db"));
        assert_eq!(config.dataset.data_dir, PathBuf::from("public/data"));
        assert_eq!(config.dataset.media_root, PathBuf::from("public"));
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.client.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.paging.posts_per_page, 10);
        assert_eq!(config.paging.models_per_page, 10);
    }

    #[test]
    fn file_overrides_defaults_and_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
            [storage]
            database_path = "/srv/gallery/catalog.db"

            [paging]
            posts_per_page = 24
            "#,
        )
        .unwrap();

        let config = build_config(
            Some(file.path()),
            env_from(&[
                ("MG_PAGING__POSTS_PER_PAGE", "30"),
                ("MG_SERVER__BIND_ADDR", "0.0.0.0:8080"),
                ("OTHER_SERVER__BIND_ADDR", "ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.storage.database_path,
            PathBuf::from("/srv/gallery/catalog.db")
        );
        assert_eq!(config.paging.posts_per_page, 30);
        assert_eq!(config.paging.models_per_page, 10);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[storage\ndatabase_path = ").unwrap();

        assert!(build_config(Some(file.path()), env_from(&[])).is_err());
    }
}
