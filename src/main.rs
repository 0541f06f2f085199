use std::{path::Path, sync::Arc, time::Duration};

use clap::Parser;

use crate::{
    cli::{CliArgs, Command},
    core::{FeatureExtractor, Finder, ResultSearcher},
    engines::{Claude, SerpApi},
    handlers::Services,
};

mod cli;
mod config;
mod core;
mod engines;
mod error;
mod files;
mod handlers;
mod models;
mod server;

async fn find(finder: &Finder, image: &Path, analyze_only: bool) -> anyhow::Result<()> {
    let image = match files::local::load_image(image).await {
        Ok(image) => image,
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&err.body())?);
            std::process::exit(2);
        }
    };

    match finder.find(&image.to_data_url(), !analyze_only).await {
        Ok(findings) => {
            println!("{}", serde_json::to_string_pretty(&findings)?);
            Ok(())
        }
        Err(err) => {
            log::error!("{}: {}", err.kind(), err);
            eprintln!("{}", serde_json::to_string_pretty(&err.body())?);
            std::process::exit(1);
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = CliArgs::parse();
    let config = match config::load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    let extractor = Arc::new(FeatureExtractor::new(Box::new(Claude::new(
        &config.anthropic,
    ))));
    let searcher = Arc::new(ResultSearcher::new(
        Box::new(SerpApi::new(&config.serpapi)),
        &config.serpapi,
    ));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            log::info!("Starting server...");
            server::run(
                &config.server,
                Services {
                    extractor,
                    searcher,
                },
            )
            .await?;
            log::info!("Server stopped");
        }
        Command::Find {
            image,
            analyze_only,
        } => {
            let finder = Finder::new(
                extractor,
                searcher,
                Duration::from_secs(config.finder.timeout),
            );
            find(&finder, &image, analyze_only).await?;
        }
    }

    Ok(())
}
