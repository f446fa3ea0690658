//! Todo CLI
//!
//! Thin presentation layer over `todo_sync::TodoStore`.

mod args;
mod renderer;

use anyhow::{anyhow, bail, Context, Result};
use args::{Args, Commands};
use clap::Parser;
use todo_sync::{ClientConfig, RemoteTodoStore, TodoId, TodoItem};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let Args { url, command } = Args::parse();
    let config = ClientConfig::new().with_base_url(url);
    info!(base_url = %config.base_url, "connecting");

    let store = RemoteTodoStore::connect(&config);
    store
        .refresh()
        .await
        .with_context(|| format!("could not load todos from {}", config.base_url))?;

    match command.unwrap_or(Commands::List) {
        Commands::List => {}
        Commands::Add { title, description } => {
            if title.trim().is_empty() {
                bail!("title must not be empty");
            }
            let mut draft = TodoItem::draft(title);
            draft.description = description;
            store.add(draft).await.context("could not add todo")?;
        }
        Commands::Toggle { id } => {
            let item = find(&store, id)?;
            store
                .toggle_completion(&item)
                .await
                .with_context(|| format!("could not toggle todo {id}"))?;
        }
        Commands::Remove { id } => {
            let item = find(&store, id)?;
            store
                .remove(&item)
                .await
                .with_context(|| format!("could not remove todo {id}"))?;
        }
    }

    println!("{}", renderer::render(&store.snapshot()));
    Ok(())
}

fn find(store: &RemoteTodoStore, id: TodoId) -> Result<TodoItem> {
    store
        .items()
        .into_iter()
        .find(|item| item.id == Some(id))
        .ok_or_else(|| anyhow!("no todo with id {id}"))
}
