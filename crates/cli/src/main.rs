use anyhow::Result;
use clap::{Parser, Subcommand};
use gc_warden::commands::{
    list_formats_command, run_analyze_command, run_chain_command, run_inspect_command,
};

/// Whole-program GC-reachability analyzer CLI.
///
/// This CLI is a thin wrapper around `gc-hazard-core` (exposed in code as
/// `gc_hazard_core`). All substantive logic lives in the library so it can
/// be tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "gc-warden",
    version,
    about = "Whole-program GC-reachability analyzer",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the GC-reachability closure over a call graph dump.
    ///
    /// Prints every function that can reach a garbage collection together
    /// with a witness call chain, then every function whose collector
    /// calls are all suppressed. An empty result is a valid outcome; the
    /// exit code is non-zero only when the input cannot be read or parsed.
    Analyze {
        /// Path to the call graph dump.
        #[arg(long)]
        input: String,

        /// Input format name (see `formats`). Inferred from the file
        /// extension when omitted.
        #[arg(long)]
        format: Option<String>,

        /// Optional annotation file (YAML, or JSON for a `.json` extension).
        #[arg(long)]
        annotations: Option<String>,

        /// Emit a JSON report on stdout instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write report files (text, name lists, JSON, run metadata) into
        /// this directory.
        #[arg(long)]
        out: Option<String>,

        /// Write the witness forest as Graphviz DOT to this path.
        #[arg(long)]
        dot: Option<String>,
    },

    /// Print the witness call chain for a single function.
    ///
    /// Exits non-zero when the function does not appear in the call graph
    /// at all; a function that merely cannot reach a collection is
    /// reported as such and is not an error.
    Chain {
        /// Path to the call graph dump.
        #[arg(long)]
        input: String,

        /// Input format name (see `formats`). Inferred from the file
        /// extension when omitted.
        #[arg(long)]
        format: Option<String>,

        /// Optional annotation file (YAML, or JSON for a `.json` extension).
        #[arg(long)]
        annotations: Option<String>,

        /// Function name, exactly as it appears in the dump.
        function: String,
    },

    /// Load a call graph and report its shape without running the analysis.
    Inspect {
        /// Path to the call graph dump.
        #[arg(long)]
        input: String,

        /// Input format name (see `formats`). Inferred from the file
        /// extension when omitted.
        #[arg(long)]
        format: Option<String>,

        /// Optional annotation file (YAML, or JSON for a `.json` extension).
        #[arg(long)]
        annotations: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the input formats this binary understands.
    Formats {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            input,
            format,
            annotations,
            json,
            out,
            dot,
        } => run_analyze_command(
            &input,
            format.as_deref(),
            annotations.as_deref(),
            json,
            out.as_deref(),
            dot.as_deref(),
        )?,
        Command::Chain {
            input,
            format,
            annotations,
            function,
        } => run_chain_command(&input, format.as_deref(), annotations.as_deref(), &function)?,
        Command::Inspect {
            input,
            format,
            annotations,
            json,
        } => run_inspect_command(&input, format.as_deref(), annotations.as_deref(), json)?,
        Command::Formats { json } => list_formats_command(json)?,
    }

    Ok(())
}
