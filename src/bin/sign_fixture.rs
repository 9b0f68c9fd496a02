//! Prints the `X-Hub-Signature-256` header for a payload file.
//!
//! ```text
//! GITHUB_WEBHOOK_SECRET=... sign-fixture fixtures/push.json
//! ```
//!
//! The signature covers the file's exact bytes, so send the file unchanged
//! (e.g. `curl --data-binary @fixtures/push.json`).

use anyhow::{Context, bail};

use launch_readiness::webhooks::{compute_signature, format_signature_header};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: sign-fixture <payload.json>");
    };

    let secret = std::env::var("GITHUB_WEBHOOK_SECRET")
        .context("GITHUB_WEBHOOK_SECRET is not set")?;
    if secret.is_empty() {
        bail!("GITHUB_WEBHOOK_SECRET is empty");
    }

    let payload = std::fs::read(&path).with_context(|| format!("failed to read {path}"))?;

    println!(
        "{}",
        format_signature_header(&compute_signature(&payload, secret.as_bytes()))
    );
    Ok(())
}
