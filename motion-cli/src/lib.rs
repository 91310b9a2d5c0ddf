//! # Portfolio Motion CLI
//!
//! Headless preview of the portfolio page choreography. A simulated page
//! is laid out for a viewport width, scrolled at a constant speed and
//! sampled on a fixed frame interval; every frame is printed as one JSON
//! line.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p motion-cli -- --width 1280 --until 8000
//! ```
//!
//! ## Resizing mid-run:
//!
//! ```bash
//! cargo run -p motion-cli -- --resize 2000:600 --resize 4000:1280
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `SimSettings` - Viewport, scroll and resize schedule of one run
//! - `Simulator` - Drives a `PortfolioPage` against a `MemoryHost`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod simulator;

pub use simulator::{populate_layout, run_realtime, SimFrame, SimSettings, Simulator};

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use motion_core::{Millis, PageVariant};

/// Command-line arguments for portfolio-motion.
#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-motion")]
#[command(about = "Simulate the portfolio page choreography and print frames as JSON lines")]
#[command(version)]
pub struct CliArgs {
    /// JSON configuration file
    #[arg(long, env = "PORTFOLIO_MOTION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Page variant, overriding the configuration
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    pub width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    pub height: f32,

    /// Simulated run length in milliseconds
    #[arg(long, default_value = "12000")]
    pub until: Millis,

    /// Frame interval in milliseconds
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    pub step: Millis,

    /// Scroll speed in pixels per second
    #[arg(long, default_value = "400")]
    pub scroll_speed: f32,

    /// Resize the viewport at a simulated time (repeatable)
    #[arg(long = "resize", value_name = "AT:WIDTH")]
    pub resizes: Vec<ResizeEvent>,

    /// Pace frames against the wall clock
    #[arg(long)]
    pub realtime: bool,
}

/// Page variant as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// No connector layer.
    Static,
    /// Animated connector lines.
    Connected,
}

impl From<VariantArg> for PageVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Static => Self::Static,
            VariantArg::Connected => Self::Connected,
        }
    }
}

/// A scheduled viewport resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// Simulated time of the resize.
    pub at: Millis,
    /// New viewport width.
    pub width: f32,
}

/// Error parsing an `AT:WIDTH` resize argument.
#[derive(Debug, thiserror::Error)]
pub enum ParseResizeError {
    /// No `:` separator.
    #[error("expected AT:WIDTH, got {0:?}")]
    Format(String),
    /// The time is not a whole number of milliseconds.
    #[error("invalid resize time: {0}")]
    Time(#[from] std::num::ParseIntError),
    /// The width is not a number.
    #[error("invalid resize width: {0}")]
    Width(#[from] std::num::ParseFloatError),
    /// The width is zero, negative or not finite.
    #[error("resize width must be positive, got {0}")]
    NonPositive(f32),
}

impl FromStr for ResizeEvent {
    type Err = ParseResizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, width) = s
            .split_once(':')
            .ok_or_else(|| ParseResizeError::Format(s.to_string()))?;
        let at = at.trim().parse()?;
        let width: f32 = width.trim().parse()?;
        if !width.is_finite() || width <= 0.0 {
            return Err(ParseResizeError::NonPositive(width));
        }
        Ok(Self { at, width })
    }
}
