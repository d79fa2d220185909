//! `cas request --stream-id <ID> --tip <CID> --car <FILE> [--wait]`

use std::path::PathBuf;

use anyhow::Context;
use cas_client::{AnchorArchive, AnchorRequestArchive, AnchorServiceClient};
use cas_core::{Cid, StreamId};
use clap::Args;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Stream whose tip to anchor.
    #[arg(long)]
    pub stream_id: StreamId,
    /// Commit to anchor.
    #[arg(long)]
    pub tip: Cid,
    /// Encoded CAR file carrying the anchor request.
    #[arg(long)]
    pub car: PathBuf,
    /// Retry until the service acknowledges the request.
    #[arg(long)]
    pub wait: bool,
}

/// Read the CAR file named by `args`.
pub fn load_archive(args: &RequestArgs) -> anyhow::Result<AnchorRequestArchive> {
    let bytes = std::fs::read(&args.car)
        .with_context(|| format!("failed to read CAR file {}", args.car.display()))?;
    anyhow::ensure!(!bytes.is_empty(), "CAR file {} is empty", args.car.display());
    Ok(AnchorRequestArchive::new(
        args.stream_id.clone(),
        args.tip.clone(),
        bytes,
    ))
}

/// Submit the anchor request and print the service's answer as JSON.
pub async fn run(client: &AnchorServiceClient, args: &RequestArgs) -> anyhow::Result<String> {
    let archive = load_archive(args)?;
    tracing::info!(
        stream_id = %args.stream_id,
        tip = %args.tip,
        bytes = archive.bytes().len(),
        wait = args.wait,
        "submitting anchor request"
    );
    let response = client.create(&archive, args.wait).await?;
    Ok(serde_json::to_string_pretty(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STREAM: &str = "kjzl6cwe1jw147dvq16zluojmraqvwdmbh61dx9e0c59i344lcrsgqfohexp60s";
    const TIP: &str = "bagcqceraplay4erv6l32qrki522uhiz7rf46xccwniw7ypmvs3cvu2b3oulq";

    fn args(car: PathBuf) -> RequestArgs {
        RequestArgs {
            stream_id: STREAM.parse().unwrap(),
            tip: TIP.parse().unwrap(),
            car,
            wait: false,
        }
    }

    #[test]
    fn loads_car_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"car bytes").unwrap();
        let archive = load_archive(&args(file.path().to_path_buf())).unwrap();
        assert_eq!(archive.bytes(), b"car bytes");
        assert_eq!(archive.stream_id().as_str(), STREAM);
        assert_eq!(archive.tip().as_str(), TIP);
    }

    #[test]
    fn empty_car_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_archive(&args(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn missing_car_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.car");
        let err = load_archive(&args(path.clone())).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
