/// Implementation of `fmq inspect`.
///
/// # Output format
///
/// ```text
/// Frame 0 @0x000000: MORE=1 LARGE=0 length=3
/// Frame 1 @0x000005: MORE=0 LARGE=0 length=0
/// ---
/// 2 frames, 1 logical message, 7 bytes
/// ```
use std::fs;

use anyhow::{Context, Result, bail};
use fmq_wire::frame::FrameHeader;
use serde::Serialize;

use crate::InspectArgs;

/// One row of the frame table.
#[derive(Serialize)]
struct FrameInfo {
    offset: usize,
    more: bool,
    large: bool,
    length: u64,
}

/// Run the `fmq inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the stream ends
/// inside a frame.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut frames = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let (header, header_len) = FrameHeader::read_from(&bytes[offset..])
            .with_context(|| format!("malformed frame header at offset {offset}"))?;

        frames.push(FrameInfo {
            offset,
            more: header.flags.has_more(),
            large: header.flags.is_large(),
            length: header.length,
        });

        let frame_len = header_len as u64 + header.length;
        if ((bytes.len() - offset) as u64) < frame_len {
            bail!(
                "truncated frame at offset {offset}: declared {} payload bytes, {} present",
                header.length,
                bytes.len() - offset - header_len
            );
        }
        offset += frame_len as usize;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&frames)?);
        return Ok(());
    }

    for (idx, frame) in frames.iter().enumerate() {
        println!(
            "Frame {idx} @{:#08x}: MORE={} LARGE={} length={}",
            frame.offset,
            u8::from(frame.more),
            u8::from(frame.large),
            frame.length
        );
    }
    let logical = frames.iter().filter(|f| !f.more).count();
    println!("---");
    println!(
        "{} frame{}, {} logical message{}, {} bytes",
        frames.len(),
        if frames.len() == 1 { "" } else { "s" },
        logical,
        if logical == 1 { "" } else { "s" },
        bytes.len()
    );
    Ok(())
}
