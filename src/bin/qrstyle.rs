use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, ValueEnum};
use qr_style::encode::DEFAULT_EC_LEVEL;
use qr_style::{Payload, PayloadKind, RenderRequest, StyleOverrides, encode_text, render_to_file};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrstyle", version, about = "Styled QR code generator")]
struct Cli {
    /// Content to encode
    text: String,
    /// Output file (default: qr_YYYYMMDD_HHMMSS.png)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Logo to place in the center
    #[arg(short, long)]
    logo: Option<PathBuf>,
    /// Module color as hex
    #[arg(short, long, default_value = "#000000")]
    color: String,
    /// Background color as hex
    #[arg(short, long, default_value = "#FFFFFF")]
    bg: String,
    /// Pixels per module
    #[arg(short, long, default_value_t = 10)]
    size: u32,
    /// Quiet-zone width in modules
    #[arg(long, default_value_t = 4)]
    border: u32,
    /// Style preset
    #[arg(long, default_value = "default", value_parser = [
        "default", "instagram", "telegram", "dark", "neon", "vintage",
        "minimal", "abstract", "watercolor", "cyber", "pastel",
    ])]
    style: String,
    /// Gradient endpoints as two hex colors
    #[arg(short, long, num_args = 2, value_names = ["START", "END"])]
    gradient: Option<Vec<String>>,
    /// Overlay pattern
    #[arg(short, long, value_parser = ["dots", "circles", "diamonds", "rounded", "watercolor", "cyber"])]
    pattern: Option<String>,
    /// Shape of finder-pattern modules
    #[arg(long, default_value = "square", value_parser = ["square", "rounded", "pointed", "circle"])]
    corner_style: String,
    /// Shape of all other modules
    #[arg(long, default_value = "square", value_parser = ["square", "circle", "rounded", "diamond", "random"])]
    dot_style: String,
    /// How to interpret TEXT
    #[arg(short = 't', long = "type", value_enum, default_value_t = ContentType::Text)]
    content_type: ContentType,
    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContentType {
    Text,
    Url,
    Wifi,
    Vcard,
}

impl From<ContentType> for PayloadKind {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Text => PayloadKind::Text,
            ContentType::Url => PayloadKind::Url,
            ContentType::Wifi => PayloadKind::Wifi,
            ContentType::Vcard => PayloadKind::VCard,
        }
    }
}

fn default_output() -> PathBuf {
    output_name(Local::now().naive_local())
}

fn output_name(at: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!("qr_{}.png", at.format("%Y%m%d_%H%M%S")))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let payload = Payload::parse(cli.content_type.into(), &cli.text)?;
    let matrix = encode_text(&payload.encode(), DEFAULT_EC_LEVEL)?;

    let mut overrides = StyleOverrides::default()
        .color(cli.color)
        .background(cli.bg)
        .corner_style(cli.corner_style)
        .dot_style(cli.dot_style);
    if let Some([start, end]) = cli.gradient.as_deref() {
        overrides = overrides.gradient(start.as_str(), end.as_str());
    }
    if let Some(pattern) = cli.pattern {
        overrides = overrides.pattern(pattern);
    }

    let mut request = RenderRequest::new(matrix)
        .style(cli.style)
        .overrides(overrides)
        .pixels_per_module(cli.size)
        .border(cli.border)
        .seed(cli.seed);
    if let Some(logo) = cli.logo {
        request = request.logo(logo);
    }

    let output = cli.output.unwrap_or_else(default_output);
    let start = Instant::now();
    let warnings = render_to_file(&request, &output)
        .with_context(|| format!("failed to generate {}", output.display()))?;
    log::info!(
        "QR code written to {} in {:.1}ms ({} warnings)",
        output.display(),
        start.elapsed().as_secs_f64() * 1000.0,
        warnings.len()
    );
    Ok(())
}
