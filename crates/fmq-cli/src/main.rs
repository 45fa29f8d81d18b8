/// FMQ command-line tool — encode, decode, and inspect framed message
/// streams.
///
/// # Command overview
///
/// ```text
/// fmq <COMMAND> [OPTIONS]
///
/// Commands:
///   encode     Frame one or more payload files into a wire stream
///   decode     Extract message payloads from a wire stream
///   inspect    Print a frame-by-frame summary of a wire stream
///   help       Print help information
/// ```
///
/// Exit code 0 on success, 1 on any error; error details go to stderr
/// so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The FMQ framing command-line tool.
#[derive(Parser)]
#[command(name = "fmq", version, about = "Framed message stream CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Frame one or more payload files into a wire stream.
    Encode(EncodeArgs),
    /// Extract message payloads from a wire stream.
    Decode(DecodeArgs),
    /// Print a frame-by-frame summary of a wire stream.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `fmq encode`.
///
/// Each input file becomes one message. With `--multipart`, the inputs
/// become the frames of a single logical message instead (MORE set on
/// every frame but the last).
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Payload files, one message per file (in order).
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output wire-stream file path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Group all inputs into one multi-frame logical message.
    #[arg(long)]
    pub multipart: bool,
}

/// Arguments for `fmq decode`.
///
/// Decodes a wire stream through the read driver. Payloads go to
/// stdout back to back, or one file per message with `--out-dir`.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the wire-stream file to decode.
    pub file: PathBuf,

    /// Write each message payload to `<out-dir>/msg-NNNN.bin` instead
    /// of stdout.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Maximum accepted message size in bytes; negative = unlimited.
    #[arg(long, default_value_t = -1)]
    pub max_message_size: i64,
}

/// Arguments for `fmq inspect`.
///
/// Walks the stream frame by frame without materializing payloads and
/// prints offset, flags, and declared length for each.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the wire-stream file to inspect.
    pub file: PathBuf,

    /// Emit the frame table as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
