use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hosts_directory::run().await
}
