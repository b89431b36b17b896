use crate::wizard::launch;
use anyhow::Result;
use clap::Parser;

mod cache;
mod cli;
mod config;
mod llm;
mod normalize;
mod store;
mod types;
mod utils;
mod wizard;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config();

    launch(&config).await
}
