/// Implementation of `fmq encode`.
use std::fs;

use anyhow::{Context, Result};
use fmq_encoder::FrameEncoder;

use crate::EncodeArgs;

/// Run the `fmq encode` command.
///
/// # Errors
///
/// Returns an error if an input cannot be read, a payload exceeds the
/// addressable message size, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let mut payloads = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let bytes =
            fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
        payloads.push(bytes);
    }

    let mut encoder = FrameEncoder::new();
    if args.multipart {
        encoder.add_multipart(payloads);
    } else {
        for payload in payloads {
            encoder.add_message(payload);
        }
    }

    let frames = encoder.len();
    let stream = encoder.encode().context("failed to frame the payloads")?;
    fs::write(&args.output, &stream)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    eprintln!(
        "wrote {} frame{} ({} bytes) to {}",
        frames,
        if frames == 1 { "" } else { "s" },
        stream.len(),
        args.output.display()
    );
    Ok(())
}
