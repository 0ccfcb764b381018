use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    pdfsuite::cli::run().await
}
