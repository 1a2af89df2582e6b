//! Detect objects in an image and optionally save the annotated result.
//!
//! Usage:
//!   EPIGOS_API_KEY=... cargo run --example detect -- <model-id> <image-path> [annotated.png]

use anyhow::Context;
use epigos::{ClientConfig, DetectionOptions, EpigosClient, ObjectDetectionPayload};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let model_id = args.next().context("missing <model-id> argument")?;
    let image_path = args.next().context("missing <image-path> argument")?;
    let output = args.next();
    let api_key = std::env::var("EPIGOS_API_KEY").context("EPIGOS_API_KEY not set")?;

    let client = EpigosClient::new(ClientConfig::new(api_key))?;
    let model = client.object_detection(model_id)?;

    let mut payload = ObjectDetectionPayload::from_file(&image_path)
        .await?
        .with_confidence(0.5);
    if output.is_some() {
        payload = payload.with_options(DetectionOptions::annotated().with_show_prob(true));
    }

    let prediction = model.detect(&payload).await?;
    for d in &prediction.detections {
        println!(
            "{:<16} {:.3}  x={:.0} y={:.0} w={:.0} h={:.0}",
            d.label, d.confidence, d.x, d.y, d.width, d.height
        );
    }

    if let (Some(path), Some(bytes)) = (output, prediction.decode_image()?) {
        tokio::fs::write(&path, bytes).await?;
        println!("annotated image written to {}", path);
    }
    Ok(())
}
