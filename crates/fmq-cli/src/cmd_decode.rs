/// Implementation of `fmq decode`.
use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use fmq_driver::{DriverConfig, ReadDriver};
use fmq_msg::CollectSink;

use crate::DecodeArgs;

/// Run the `fmq decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the stream is
/// malformed or truncated, or an output cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let file = fs::File::open(&args.file)
        .with_context(|| format!("cannot open {}", args.file.display()))?;

    let config = DriverConfig::default().with_max_message_size(args.max_message_size);
    let mut driver = ReadDriver::new(file, config, CollectSink::new());
    driver
        .run()
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let (_, mut decoder) = driver.into_parts();
    let messages = decoder
        .take_sink()
        .map(CollectSink::into_messages)
        .unwrap_or_default();

    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("cannot create {}", out_dir.display()))?;
        for (idx, message) in messages.iter().enumerate() {
            let path = out_dir.join(format!("msg-{idx:04}.bin"));
            fs::write(&path, message.payload())
                .with_context(|| format!("cannot write {}", path.display()))?;
        }
        eprintln!("wrote {} message(s) to {}", messages.len(), out_dir.display());
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for message in &messages {
            out.write_all(message.payload())?;
        }
        out.flush()?;
    }

    Ok(())
}
