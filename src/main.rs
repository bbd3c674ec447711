use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    menuseal_cli::cli::app::run().await
}
