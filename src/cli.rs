use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Analyze a local image and look for similar products
    Find {
        /// Path to the clothing photo
        image: PathBuf,

        /// Stop after the analysis, skip the product search
        #[arg(long)]
        analyze_only: bool,
    },
}

#[derive(Parser, Debug)]
#[command(version, about = "Find shoppable look-alikes for a photo of a clothing item")]
pub(crate) struct CliArgs {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,

    /// Config file path (default: "config.toml")
    #[arg(short, long, env = "FINDER_CONFIG", global = true)]
    pub(crate) config: Option<String>,

    /// Listen address (default: 0.0.0.0)
    #[arg(long, env = "FINDER_HOST")]
    pub(crate) host: Option<String>,

    /// Listen port (default: 8000)
    #[arg(short, long, env = "FINDER_PORT")]
    pub(crate) port: Option<u16>,

    /// Worker Num (default: number of CPUs)
    #[arg(short, long, env = "FINDER_WORKERS")]
    pub(crate) workers: Option<usize>,

    /// Comma separated CORS origins (default: http://localhost:3000)
    #[arg(long, env = "FINDER_CORS_ORIGINS", value_delimiter = ',')]
    pub(crate) cors_origins: Option<Vec<String>>,

    /// Max request body in bytes (default: 16 MiB)
    #[arg(long, env = "FINDER_BODY_LIMIT")]
    pub(crate) body_limit: Option<usize>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub(crate) anthropic_token: Option<String>,

    /// Anthropic base URL (default: https://api.anthropic.com)
    #[arg(long, env = "FINDER_ANTHROPIC_BASE_URL")]
    pub(crate) anthropic_base_url: Option<String>,

    /// Anthropic vision model
    #[arg(long, env = "FINDER_ANTHROPIC_MODEL")]
    pub(crate) anthropic_model: Option<String>,

    /// Anthropic max tokens (default: 1024)
    #[arg(long, env = "FINDER_ANTHROPIC_MAX_TOKENS")]
    pub(crate) anthropic_max_tokens: Option<u32>,

    /// SerpApi key
    #[arg(long, env = "SERPAPI_KEY", hide_env_values = true)]
    pub(crate) serpapi_token: Option<String>,

    /// SerpApi base URL (default: https://serpapi.com)
    #[arg(long, env = "FINDER_SERPAPI_BASE_URL")]
    pub(crate) serpapi_base_url: Option<String>,

    /// SerpApi engine (default: google_shopping)
    #[arg(long, env = "FINDER_SERPAPI_ENGINE")]
    pub(crate) serpapi_engine: Option<String>,

    /// Raw results requested from SerpApi (default: 20)
    #[arg(long, env = "FINDER_SERPAPI_NUM")]
    pub(crate) serpapi_num: Option<usize>,

    /// Results returned to the caller (default: 12)
    #[arg(long, env = "FINDER_SERPAPI_LIMIT")]
    pub(crate) serpapi_limit: Option<usize>,

    /// Timeout in sec per provider call in `find` (default: 60)
    #[arg(long, env = "FINDER_TIMEOUT")]
    pub(crate) timeout: Option<u64>,
}

fn set<T: Serialize>(root: &mut Value, section: &str, key: &str, value: &Option<T>) {
    if let Some(value) = value {
        root[section][key] = json!(value);
    }
}

impl CliArgs {
    /// Only the flags that were actually given, shaped like [`crate::config::Config`].
    pub fn as_overrides(&self) -> Value {
        let mut overrides = json!({});

        set(&mut overrides, "server", "host", &self.host);
        set(&mut overrides, "server", "port", &self.port);
        set(&mut overrides, "server", "workers", &self.workers);
        set(&mut overrides, "server", "cors_origins", &self.cors_origins);
        set(&mut overrides, "server", "body_limit", &self.body_limit);

        set(&mut overrides, "anthropic", "token", &self.anthropic_token);
        set(&mut overrides, "anthropic", "base_url", &self.anthropic_base_url);
        set(&mut overrides, "anthropic", "model", &self.anthropic_model);
        set(&mut overrides, "anthropic", "max_tokens", &self.anthropic_max_tokens);

        set(&mut overrides, "serpapi", "token", &self.serpapi_token);
        set(&mut overrides, "serpapi", "base_url", &self.serpapi_base_url);
        set(&mut overrides, "serpapi", "engine", &self.serpapi_engine);
        set(&mut overrides, "serpapi", "num", &self.serpapi_num);
        set(&mut overrides, "serpapi", "limit", &self.serpapi_limit);

        set(&mut overrides, "finder", "timeout", &self.timeout);

        overrides
    }
}
