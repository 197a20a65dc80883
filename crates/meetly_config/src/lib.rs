use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Env var prefix for configuration overrides, e.g. `MEETLY_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "MEETLY";

/// Env var holding the identity provider secret key.
pub const IDENTITY_SECRET_ENV: &str = "IDENTITY_SECRET_KEY";

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
///
/// 1. `config/default.toml` (optional)
/// 2. `config/{RUN_ENV}.toml` (optional, `RUN_ENV` defaults to `debug`)
/// 3. `MEETLY_*` environment variables, `__` separating nested keys
///
/// The directory can be moved with `MEETLY_CONFIG_DIR`. A `.env` file is read
/// once beforehand, see [`ensure_dotenv_loaded`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("MEETLY_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let config = load_config_from(&config_dir, &run_env)?;
    Ok(apply_secret_overrides(config))
}

/// Loads the configuration from an explicit directory and run environment.
///
/// Unlike [`load_config`] this neither reads `.env` nor injects secrets.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    load_config_with_env(config_dir, run_env, env_source())
}

/// Environment source for `MEETLY_SECTION__KEY` overrides.
///
/// The prefix is joined with a single `_`, nested keys with `__`.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn load_config_with_env(
    config_dir: &Path,
    run_env: &str,
    environment: Environment,
) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(environment);

    builder.build()?.try_deserialize()
}

/// Fills secrets that are kept out of the config files from their env vars.
pub fn apply_secret_overrides(mut config: AppConfig) -> AppConfig {
    if let Ok(secret) = env::var(IDENTITY_SECRET_ENV) {
        config
            .identity
            .get_or_insert_with(IdentityConfig::default)
            .secret_key = Some(secret);
    }
    config
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The path defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// Loading happens at most once per process; a missing file is not an error.
/// Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
