//! htmlbin CLI.
//!
//! Packs markup files into compressed binary streams and unpacks them again.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};

use htmlbin::{HtmlBinService, Options, StringEncoding, Vocabulary};

#[derive(Parser)]
#[command(name = "htmlbin")]
#[command(author, version, about = "Pack markup into a compact binary stream", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    codec: CodecArgs,

    /// Log pipeline details (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct CodecArgs {
    /// Store the encoded stream without compression
    #[arg(long, global = true)]
    raw: bool,

    /// Gzip compression level
    #[arg(long, global = true, default_value = "6", value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,

    /// Encode strings as UTF-8 instead of one byte per character
    #[arg(long, global = true)]
    utf8: bool,

    /// Do not log custom element and attribute names
    #[arg(long, global = true)]
    quiet_custom: bool,
}

impl From<&CodecArgs> for Options {
    fn from(args: &CodecArgs) -> Self {
        Options {
            string_encoding: if args.utf8 {
                StringEncoding::Utf8
            } else {
                StringEncoding::Latin1
            },
            compress: !args.raw,
            compression_level: args.level,
            report_custom_identifiers: !args.quiet_custom,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a markup file into a binary stream
    Pack {
        /// Markup file to read
        input: PathBuf,
        /// Packed file to write
        output: PathBuf,
    },

    /// Unpack a binary stream back into markup
    Unpack {
        /// Packed file to read
        input: PathBuf,
        /// Markup file to write
        output: PathBuf,
    },

    /// Pack and unpack a markup file in memory
    Roundtrip {
        /// Markup file to read
        input: PathBuf,
        /// Write the regenerated markup here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print registry lines for the custom names used by the given files
    Registry {
        /// Markup files to scan
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let service = HtmlBinService::with_options(Options::from(&cli.codec));

    match cli.command {
        Commands::Pack { input, output } => {
            let html = read_markup(&input)?;
            let packed = service
                .pack(&html)
                .with_context(|| format!("Failed to pack {}", input.display()))?;
            fs::write(&output, &packed)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                "{}: {} bytes -> {} bytes",
                input.display(),
                html.len(),
                packed.len()
            );
        }

        Commands::Unpack { input, output } => {
            let packed = fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let html = service
                .unpack_html(&packed)
                .with_context(|| format!("Failed to unpack {}", input.display()))?;
            fs::write(&output, &html)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                "{}: {} bytes -> {} bytes",
                input.display(),
                packed.len(),
                html.len()
            );
        }

        Commands::Roundtrip { input, output } => {
            let html = read_markup(&input)?;
            let packed = service
                .pack(&html)
                .with_context(|| format!("Failed to pack {}", input.display()))?;
            let regenerated = service
                .unpack_html(&packed)
                .context("Failed to unpack the packed stream")?;
            info!(
                "{}: {} bytes -> {} packed -> {} bytes",
                input.display(),
                html.len(),
                packed.len(),
                regenerated.len()
            );
            match output {
                Some(path) => fs::write(&path, &regenerated)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{regenerated}"),
            }
        }

        Commands::Registry { inputs } => {
            for input in &inputs {
                let html = read_markup(input)?;
                let document = service
                    .parse(&html)
                    .with_context(|| format!("Failed to parse {}", input.display()))?;
                service
                    .encode(&document)
                    .with_context(|| format!("Failed to encode {}", input.display()))?;
            }
            let extensions = service.extensions();
            println!("// elements");
            print!("{}", extensions.listing(Vocabulary::Element));
            println!("// attributes");
            print!("{}", extensions.listing(Vocabulary::Attribute));
        }
    }

    Ok(())
}

fn read_markup(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
