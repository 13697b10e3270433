use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";
const DIRECTORY_VARIABLE: &str = "APP_CONFIG_DIR";

fn configuration_directory() -> anyhow::Result<PathBuf> {
    if let Ok(directory) = std::env::var(DIRECTORY_VARIABLE) {
        return Ok(PathBuf::from(directory));
    }
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(base_path.join("configuration"))
}

/// Loads `base.yaml`, then `{APP_ENVIRONMENT}.yaml` if it exists, then `APP_*` env vars.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let configuration_directory = configuration_directory()?;
    let environment = std::env::var(ENVIRONMENT_VARIABLE).unwrap_or_else(|_| "local".into());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(format!("{environment}.yaml")))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
