use anyhow::Result;
use clap::{Parser, Subcommand};
use structpack_cli::commands;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "structpack")]
#[command(about = "Structpack - Format-string driven binary pack/unpack", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the number of bytes a format covers
    Calcsize {
        /// Format string, e.g. "<BI3B"
        format: String,

        /// Also list the parsed field specifications
        #[arg(long)]
        fields: bool,
    },

    /// Pack a JSON array of values into binary
    Pack {
        /// Format string
        #[arg(short, long)]
        format: String,

        /// Input JSON file (array of values), or "-" for stdin
        #[arg(short, long)]
        input: String,

        /// Output file for packed bytes
        #[arg(short, long)]
        output: Option<String>,

        /// Keep the packed prefix when values run out
        #[arg(long)]
        loose: bool,

        /// Print the packed bytes as hex
        #[arg(long)]
        hex: bool,
    },

    /// Unpack binary data into a JSON array of values
    Unpack {
        /// Format string
        #[arg(short, long)]
        format: String,

        /// Input binary file, or "-" for stdin
        #[arg(short, long)]
        input: String,

        /// Output JSON file for decoded values
        #[arg(short, long)]
        output: Option<String>,

        /// Byte offset to start reading at
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Return the decoded prefix when bytes run out
        #[arg(long)]
        loose: bool,

        /// Render byte strings as (lossy) UTF-8 text instead of byte arrays
        #[arg(long)]
        text: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Calcsize { format, fields } => commands::calcsize::execute(&format, fields),

        Commands::Pack {
            format,
            input,
            output,
            loose,
            hex,
        } => commands::pack::execute(&format, &input, output.as_deref(), loose, hex),

        Commands::Unpack {
            format,
            input,
            output,
            offset,
            loose,
            text,
        } => commands::unpack::execute(&format, &input, output.as_deref(), offset, loose, text),
    }
}
