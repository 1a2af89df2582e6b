//! Classify an image file or URL.
//!
//! Usage:
//!   EPIGOS_API_KEY=... cargo run --example classify -- <model-id> <path-or-url>
//!
//! Set RUST_LOG=epigos=debug to see request tracing.

use anyhow::Context;
use epigos::{ClassificationPayload, ClientConfig, EpigosClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let model_id = args.next().context("missing <model-id> argument")?;
    let image = args.next().context("missing <path-or-url> argument")?;
    let api_key = std::env::var("EPIGOS_API_KEY").context("EPIGOS_API_KEY not set")?;

    let client = EpigosClient::new(ClientConfig::new(api_key))?;
    let model = client.classification(model_id)?;

    let payload = if image.starts_with("http://") || image.starts_with("https://") {
        ClassificationPayload::from_url(image)
    } else {
        ClassificationPayload::from_file(&image).await?
    };

    let prediction = model.predict(&payload).await?;
    println!("{} ({:.3})", prediction.category, prediction.confidence);
    for class in &prediction.predictions {
        println!("  {:<24} {:.3}", class.category, class.confidence);
    }
    Ok(())
}
