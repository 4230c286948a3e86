use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::display::DisplayMode;
use crate::model::{Dimension, FillMode, PixelType};
use crate::stack::Position;

#[derive(Debug, Parser)]
#[command(
    name = "image5d",
    version,
    about = "Inspect and grow five-dimensional image layouts"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Summarise the image a layout file describes
    Info {
        #[arg(long)]
        layout: PathBuf,
    },
    /// List the backing store offset of every position
    Offsets {
        #[arg(long)]
        layout: PathBuf,
    },
    /// Grow one dimension and summarise the result
    Expand {
        #[arg(long)]
        layout: PathBuf,
        #[arg(long, value_enum)]
        dimension: DimensionArg,
        #[arg(long)]
        size: usize,
        #[arg(long, value_enum, default_value_t = FillArg::Zero)]
        fill: FillArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum DimensionArg {
    Channel,
    Slice,
    Frame,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Channel => Dimension::Channel,
            DimensionArg::Slice => Dimension::Slice,
            DimensionArg::Frame => Dimension::Frame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum FillArg {
    Zero,
    Shared,
}

impl From<FillArg> for FillMode {
    fn from(arg: FillArg) -> Self {
        match arg {
            FillArg::Zero => FillMode::Zero,
            FillArg::Shared => FillMode::SharedDummy,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ImageSummary {
    pub(super) title: String,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) pixel_type: PixelType,
    pub(super) channels: usize,
    pub(super) slices: usize,
    pub(super) frames: usize,
    pub(super) stack_size: usize,
    pub(super) placeholders: usize,
    pub(super) position: Position,
    pub(super) display_mode: DisplayMode,
    pub(super) channel_info: Vec<ChannelSummary>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChannelSummary {
    pub(super) channel: usize,
    pub(super) label: String,
    pub(super) color: [u8; 3],
    pub(super) min: f64,
    pub(super) max: f64,
    pub(super) in_overlay: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct OffsetEntry {
    pub(super) channel: usize,
    pub(super) slice: usize,
    pub(super) frame: usize,
    pub(super) offset: usize,
}
