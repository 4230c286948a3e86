use std::path::Path;

use serde::Serialize;

use crate::config::load_layout;
use crate::image5d::Image5D;

use super::types::{ChannelSummary, Cli, Commands, ImageSummary, OffsetEntry};

pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Info { layout } => {
            let image = open_layout(&layout)?;
            print_json(&summarize(&image)?)?;
        }
        Commands::Offsets { layout } => {
            let image = open_layout(&layout)?;
            let index = image.index();
            let entries = (0..index.len())
                .map(|offset| {
                    let position = index.position(offset)?;
                    Ok(OffsetEntry {
                        channel: position.channel,
                        slice: position.slice,
                        frame: position.frame,
                        offset,
                    })
                })
                .collect::<crate::model::Result<Vec<_>>>()
                .map_err(|error| error.to_string())?;
            print_json(&entries)?;
        }
        Commands::Expand {
            layout,
            dimension,
            size,
            fill,
        } => {
            let mut image = open_layout(&layout)?;
            image
                .expand(dimension.into(), size, fill.into())
                .map_err(|error| error.to_string())?;
            print_json(&summarize(&image)?)?;
        }
    }

    Ok(())
}

fn open_layout(path: &Path) -> Result<Image5D, String> {
    let layout = load_layout(path).map_err(|error| error.to_string())?;
    Image5D::from_layout(&layout).map_err(|error| error.to_string())
}

fn summarize(image: &Image5D) -> Result<ImageSummary, String> {
    let channel_info = (1..=image.channel_count())
        .map(|channel| {
            let state = image.display_state(channel)?;
            Ok(ChannelSummary {
                channel,
                label: image.channel_label(channel)?.to_string(),
                color: state.lut.color(),
                min: state.min,
                max: state.max,
                in_overlay: state.in_overlay,
            })
        })
        .collect::<crate::model::Result<Vec<_>>>()
        .map_err(|error| error.to_string())?;
    let placeholders = (0..image.stack_size())
        .filter(|offset| image.store().is_placeholder(*offset))
        .count();
    Ok(ImageSummary {
        title: image.title().to_string(),
        width: image.width(),
        height: image.height(),
        pixel_type: image.pixel_type(),
        channels: image.channel_count(),
        slices: image.slice_count(),
        frames: image.frame_count(),
        stack_size: image.stack_size(),
        placeholders,
        position: image.current_position(),
        display_mode: image.display_mode(),
        channel_info,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}
