use std::{error::Error, path::PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrbits::{ECLevel, MaskPattern, QRBuilder, Version};

#[derive(Parser)]
#[command(name = "qrbits", about = "Encode text into a QR code")]
struct Cli {
    /// Payload, encoded as UTF-8 bytes
    text: String,

    /// Error correction level: L, M, Q or H
    #[arg(short, long, default_value = "M")]
    ec_level: ECLevel,

    /// Fixed version 1..=40, smallest fitting one when omitted
    #[arg(short, long)]
    version: Option<Version>,

    /// Fixed mask 0..=7, lowest penalty one when omitted
    #[arg(short, long, value_parser = parse_mask)]
    mask: Option<MaskPattern>,

    /// Pixels per module for image output, characters per module otherwise
    #[arg(short, long, default_value_t = 1)]
    scale: u32,

    /// Writes a PNG instead of printing to the terminal
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_mask(s: &str) -> Result<MaskPattern, String> {
    let m = s.parse::<u8>().map_err(|e| e.to_string())?;
    MaskPattern::new(m).map_err(|e| e.to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = QRBuilder::new(cli.text.as_bytes());
    builder.ec_level(cli.ec_level);
    if let Some(v) = cli.version {
        builder.version(v);
    }
    if let Some(m) = cli.mask {
        builder.mask(m);
    }
    let symbol = builder.build()?;
    info!("Encoded {}", symbol.metadata());

    match cli.output {
        Some(path) => {
            symbol.to_image(cli.scale.max(1)).save(&path)?;
            info!(path = %path.display(), "Saved image");
        }
        None => print!("{}", symbol.to_str(cli.scale.max(1) as usize)),
    }

    Ok(())
}
