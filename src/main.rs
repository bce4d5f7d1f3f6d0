use anyhow::Context;
use clap::Parser;
use serde_json::{Map, Value};
use std::sync::Arc;

mod cli;
mod config;
mod errors;
mod wire;
mod classify;
mod prompt;
mod provider;
mod parse;
mod augment;
mod archive;
mod store;
mod history;
mod pipeline;
mod transcript;
mod safety;
mod server;
mod ux;

use cli::{Command, ItemsCommand};
use config::Config;
use pipeline::Pipeline;
use store::ItemStore;
use wire::GenerateRequest;

fn parse_fields(raw: &str) -> anyhow::Result<Map<String, Value>> {
    let v: Value = serde_json::from_str(raw).context("fields must be valid JSON")?;
    match v {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("fields must be a JSON object"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    let cfg = Config::resolve(&args).context("loading configuration")?;
    log::debug!("configuration: {:?}", cfg);

    match args.command {
        Command::Generate { prompt, kind, json } => {
            let provider = provider::make_provider(&cfg)?;
            let pipeline = Pipeline::from_config(&cfg, provider);
            let req = GenerateRequest { prompt, requested_type: kind };

            if json {
                let (resp, _) = pipeline.handle_generate(&req).await;
                println!("{}", serde_json::to_string_pretty(&resp)?);
                if !resp.success {
                    std::process::exit(1);
                }
                return Ok(());
            }

            let pb = (!args.no_progress).then(|| ux::spinner("waiting for the generator"));
            let result = pipeline.generate(&req).await;
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            let outcome = result?;
            ux::print_outcome(&outcome);
        }
        Command::History { limit, json } => {
            let history = history::HistoryRecorder::new(cfg.history_path());
            let entries = history.list_recent(limit.unwrap_or(cfg.history_limit)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                ux::print_history(&entries);
            }
        }
        Command::Items { action } => {
            let items = ItemStore::new(cfg.items_path());
            match action {
                ItemsCommand::List => ux::print_items(&items.list().await?),
                ItemsCommand::Create { fields } => {
                    let item = items.create(parse_fields(&fields)?).await?;
                    ux::print_items(&[item]);
                }
                ItemsCommand::Update { id, fields } => {
                    let item = items.update(&id, parse_fields(&fields)?).await?;
                    ux::print_items(&[item]);
                }
                ItemsCommand::Delete { id } => {
                    items.delete(&id).await?;
                    println!("deleted {id}");
                }
            }
        }
        Command::Serve => {
            let provider = provider::make_provider(&cfg)?;
            let state = Arc::new(server::AppState {
                pipeline: Pipeline::from_config(&cfg, provider),
                items: ItemStore::new(cfg.items_path()),
                downloads_dir: cfg.downloads_dir.clone().into(),
                history_limit: cfg.history_limit,
            });
            server::serve(state, &cfg.bind).await?;
        }
    }

    Ok(())
}
