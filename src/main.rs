use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use imace_lib::bootstrap::{build_app, init_tracing_subscriber, resolve_config};
use imace_lib::console::{self, Command};

/// Browse, search and manage images served by an image index.
#[derive(Debug, Parser)]
#[command(name = "imace", version, about)]
struct Args {
    /// Config file (defaults to <config_dir>/imace/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the index base URL from the config file
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing_subscriber().context("Failed to initialize tracing")?;

    let mut config = resolve_config(args.config)?;
    if let Some(base_url) = args.base_url {
        config.index_base_url = base_url;
    }

    let app = Arc::new(build_app(&config).context("Failed to build app")?);
    info!(base_url = %config.index_base_url, "imace starting");

    // Re-render whenever the store publishes a change.
    let renderer = {
        let app = app.clone();
        let mut changes = app.subscribe();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let state = changes.borrow_and_update().clone();
                println!("{}", console::render_view(&state, |path| app.image_url(path)));
            }
        })
    };

    app.start().await;
    println!("{}", console::HELP);

    // Status lines of commands that finish in the background.
    let (status_tx, mut status_rx) = mpsc::unbounded_channel::<String>();
    let printer = tokio::spawn(async move {
        while let Some(message) = status_rx.recv().await {
            println!("{message}");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match console::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) if console::runs_in_background(&command) => {
                console::spawn_command(app.clone(), command, status_tx.clone());
            }
            Ok(command) => {
                if let Some(message) = console::execute(&app, command).await {
                    println!("{message}");
                }
            }
            Err(console::CommandError::Empty) => {}
            Err(err) => println!("{err}"),
        }
    }

    printer.abort();
    renderer.abort();
    info!("imace stopped");
    Ok(())
}
