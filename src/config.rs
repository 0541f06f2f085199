use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::cli::CliArgs;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
    /// Worker threads (default: number of CPUs)
    pub workers: Option<usize>,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    /// Max JSON body size in bytes
    pub body_limit: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Anthropic {
    /// Anthropic API key
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SerpApi {
    /// SerpApi key
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub base_url: String,
    pub engine: String,
    /// Raw results requested from the provider
    pub num: usize,
    /// Normalized results handed back to the caller
    pub limit: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Finder {
    /// Timeout in sec around each provider call made by the `find` command
    pub timeout: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub server: Server,
    pub anthropic: Anthropic,
    pub serpapi: SerpApi,
    pub finder: Finder,
}

fn defaults() -> serde_json::Value {
    json!({
        "server": {
            "host": "0.0.0.0",
            "port": 8000,
            "cors_origins": ["http://localhost:3000"],
            "body_limit": 16 * 1024 * 1024,
        },
        "anthropic": {
            "base_url": "https://api.anthropic.com",
            "model": "claude-3-5-sonnet-20241022",
            "max_tokens": 1024,
        },
        "serpapi": {
            "base_url": "https://serpapi.com",
            "engine": "google_shopping",
            "num": 20,
            "limit": 12,
        },
        "finder": {
            "timeout": 60,
        },
    })
}

fn file_provider(figment: Figment, config_path: PathBuf) -> anyhow::Result<Figment> {
    let figment = match config_path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => figment.merge(Toml::file(config_path)),
        Some("json") => figment.merge(Json::file(config_path)),
        Some("yaml") | Some("yml") => figment.merge(Yaml::file(config_path)),
        _ => anyhow::bail!("Cannot identify config file type. Must be .toml, .json or .yaml"),
    };
    Ok(figment)
}

pub(crate) fn load_config(args: &CliArgs) -> anyhow::Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(defaults()));

    let config_path = crate::files::local::resolve(Path::new(
        args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH),
    ));

    if config_path.exists() {
        log::info!("Config file found: {}", config_path.display());
        figment = file_provider(figment, config_path)?;
    } else if args.config.is_some() {
        anyhow::bail!("Config file not found: {}", config_path.display());
    }

    let config: Config = figment
        .merge(Serialized::defaults(args.as_overrides()))
        .extract()?;

    log::debug!(
        "Loaded config: {:#}",
        serde_json::to_value(&config).unwrap_or_default()
    );

    if config.anthropic.token.is_none() {
        log::warn!("ANTHROPIC_API_KEY not set, image analysis is disabled");
    }
    if config.serpapi.token.is_none() {
        log::warn!("SERPAPI_KEY not set, product search is disabled");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["outfit-finder", "--config", "missing.toml"]);
        assert!(load_config(&args).is_err());

        let config: Config = Figment::new()
            .merge(Serialized::defaults(defaults()))
            .extract()
            .unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.workers, None);
        assert_eq!(config.serpapi.num, 20);
        assert_eq!(config.serpapi.limit, 12);
        assert_eq!(config.anthropic.max_tokens, 1024);
        assert!(config.anthropic.token.is_none());
    }

    #[test]
    fn test_file_and_cli_layers() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "finder.toml",
                r#"
                [server]
                port = 9000

                [serpapi]
                token = "from-file"
                limit = 5
                "#,
            )?;

            let args = CliArgs::parse_from([
                "outfit-finder",
                "--config",
                "finder.toml",
                "--serpapi-token",
                "from-cli",
                "--anthropic-model",
                "claude-test",
            ]);
            let config = load_config(&args).map_err(|e| e.to_string())?;

            assert_eq!(config.server.port, 9000);
            assert_eq!(config.serpapi.limit, 5);
            assert_eq!(config.serpapi.token.as_deref(), Some("from-cli"));
            assert_eq!(config.anthropic.model, "claude-test");
            assert_eq!(config.anthropic.base_url, "https://api.anthropic.com");
            Ok(())
        });
    }

    #[test]
    fn test_unknown_extension() {
        let figment = Figment::new();
        assert!(file_provider(figment, PathBuf::from("config.ini")).is_err());
    }
}
