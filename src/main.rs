//! Stack Layout demo CLI
//!
//! Usage:
//!   stack-layout [OPTIONS]
//!
//! Options:
//!   --width <W>, --height <H>  Window size
//!   -c, --config <FILE>        Demo config (TOML format)
//!   -s, --stylesheet <FILE>    Stylesheet file for SVG colors (TOML format)
//!   --state <STATE>            Column texts to show (1-4)
//!   --tap <X,Y>                Tap at a point, may be repeated
//!   -f, --format <FORMAT>      Output a tree dump or SVG
//!   -d, --debug                Print the laid-out tree to stderr
//!   -h, --help                 Print help

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use stack_layout::{Demo, DemoConfig, DemoError, DemoState, Point, Stylesheet, SvgConfig};

#[derive(Parser)]
#[command(name = "stack-layout")]
#[command(about = "Lay out the stack layout demo screen, deliver taps and print the result")]
struct Cli {
    /// Window width (overrides the config file)
    #[arg(long)]
    width: Option<f64>,

    /// Window height (overrides the config file)
    #[arg(long)]
    height: Option<f64>,

    /// Demo config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stylesheet file for SVG colors (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Column texts to start with: 1-4 or one, two, three, four
    #[arg(long)]
    state: Option<DemoState>,

    /// Tap at X,Y in window coordinates; taps are delivered in order
    #[arg(long = "tap", value_parser = parse_point)]
    taps: Vec<Point>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Debug mode: print the laid-out view tree to stderr
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Tree,
    Svg,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("invalid x '{}': {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("invalid y '{}': {}", y, e))?;
    Ok(Point::new(x, y))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    match run(&cli, &stylesheet) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, stylesheet: &Stylesheet) -> Result<String, DemoError> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    };
    let width = cli.width.unwrap_or(config.width);
    let height = cli.height.unwrap_or(config.height);
    config = config.with_window_size(width, height);

    let mut demo = Demo::build(config)?;
    if let Some(state) = cli.state {
        demo.set_state(state)?;
    }

    for &point in &cli.taps {
        let hit = demo.tap(point)?;
        tracing::info!(x = point.x, y = point.y, ?hit, state = %demo.state(), "delivered tap");
    }

    if cli.debug {
        eprint!("{}", demo.dump()?);
    }

    match cli.format {
        Format::Tree => Ok(format!("state: {}\n{}", demo.state(), demo.dump()?.trim_end())),
        Format::Svg => demo.render_svg(&SvgConfig::default(), stylesheet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,20").unwrap(), Point::new(10.0, 20.0));
        assert_eq!(parse_point(" 1.5 , 2 ").unwrap(), Point::new(1.5, 2.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,2").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_taps() {
        let cli = Cli::try_parse_from([
            "stack-layout",
            "--tap",
            "10,20",
            "--tap",
            "30,40",
            "--state",
            "3",
            "--format",
            "svg",
        ])
        .unwrap();

        assert_eq!(cli.taps.len(), 2);
        assert_eq!(cli.state, Some(DemoState::Three));
        assert!(matches!(cli.format, Format::Svg));
    }
}
