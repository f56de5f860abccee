use clap::Parser;

use mallhub_admin::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mallhub_observability::init();

    let cli = Cli::parse();
    cli::run(cli).await
}
