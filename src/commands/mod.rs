//! Command handlers. Each returns the lines to print so the binary owns stdout.

pub mod admin;
pub mod client;

use mg_core::config::AppConfig;

use crate::cli::Command;
use crate::server;

pub async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let lines = match command {
        Command::CreateModel(args) => admin::create_model(config, args).await?,
        Command::CreatePost(args) => admin::create_post(config, args).await?,
        Command::BulkImport { root } => {
            let root = root.unwrap_or_else(|| config.dataset.media_root.clone());
            admin::bulk_import(config, &root).await?
        }
        Command::Generate => admin::generate(config).await?,
        Command::Clear { yes } => admin::clear(config, yes).await?,
        Command::ShowPost {
            username,
            post_count,
        } => admin::show_post(config, &username, post_count).await?,
        Command::Serve => {
            server::serve(&config.server.bind_addr, &config.dataset.data_dir).await?;
            Vec::new()
        }
        Command::Browse { route, more } => client::browse(config, &route, more).await?,
        Command::Search { query, all } => client::search(config, &query, all).await?,
        Command::Random => client::random(config).await?,
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
