//! `cas chains`

use cas_client::AnchorServiceClient;
use clap::Args;

#[derive(Args, Debug)]
pub struct ChainsArgs {}

/// Print the supported chain IDs, one per line.
pub async fn run(client: &AnchorServiceClient, _args: &ChainsArgs) -> anyhow::Result<String> {
    let chains = client.supported_chains().await?;
    Ok(chains
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
