//! `cas status <STREAM_ID> <TIP>`

use cas_client::AnchorServiceClient;
use cas_core::{Cid, StreamId};
use clap::Args;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Stream whose anchor request to look up.
    pub stream_id: StreamId,
    /// Tip commit of the anchor request.
    pub tip: Cid,
}

/// Print the anchor request status as JSON.
pub async fn run(client: &AnchorServiceClient, args: &StatusArgs) -> anyhow::Result<String> {
    let response = client.get(&args.stream_id, &args.tip).await?;
    Ok(serde_json::to_string_pretty(&response)?)
}
