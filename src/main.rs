mod cli;
mod clipper;
mod config;
mod io;
mod logging;
mod my_regex;
mod outside;
mod pipeline;
mod result;
mod sampler;
mod selector;
#[cfg(test)]
mod testing;
mod types;

use clap::Parser;
use fastrand::Rng;
use miette::{Context, Result};
use tracing::{debug, error, info};

use crate::{
    cli::{Args, BatchArgs, Command},
    config::Settings,
    outside::{Ffmpeg, Ytdl},
    pipeline::Pipeline,
    types::{ChannelRef, VideoId},
};

fn main() -> Result<()> {
    // Initialize the CLI & the environment
    let args = Args::parse();
    logging::init_logging(logging::level_from_verbosity(args.verbose))?;

    let settings = Settings::load(args.config.as_deref())?;
    debug!("Settings: {settings:?}");

    let (ytdl, ffmpeg) = load_external_components(&settings)?;

    let rng = match args.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };
    let mut pipeline = Pipeline::new(&ytdl, &ffmpeg, settings.container, rng);

    match args.command {
        Command::Video { video, clip } => {
            let Some(video_id) = VideoId::parse(&video) else {
                error!("Invalid video URL: {video}");
                return Ok(());
            };

            pipeline.run_video(&video_id, &clip.options()?);
        }
        Command::ChannelId { channel_id, batch } => {
            run_batch(&mut pipeline, ChannelRef::parse_id(&channel_id), &channel_id, &batch)?
        }
        Command::User { user, batch } => {
            run_batch(&mut pipeline, ChannelRef::parse_user(&user), &user, &batch)?
        }
        Command::Slug { slug, batch } => {
            run_batch(&mut pipeline, ChannelRef::parse_slug(&slug), &slug, &batch)?
        }
        Command::Handle { handle, batch } => {
            run_batch(&mut pipeline, ChannelRef::parse_handle(&handle), &handle, &batch)?
        }
    }

    info!("All tasks completed");
    Ok(())
}

/// Load the external components
fn load_external_components(settings: &Settings) -> Result<(Ytdl, Ffmpeg)> {
    // Construct the handles concurrently as executing an external program
    // is not instantaneous. That way we can avoid adding the costs
    let ytdl_program = settings.ytdl.clone();
    let socket_timeout = settings.socket_timeout();
    let ffmpeg_program = settings.ffmpeg.clone();

    let ytdl_thread =
        std::thread::spawn(move || Ytdl::new(ytdl_program.as_deref(), socket_timeout));
    let ffmpeg_thread = std::thread::spawn(move || Ffmpeg::new(&ffmpeg_program));

    let ytdl = ytdl_thread
        .join()
        .map_err(|_| miette::miette!("Could not join thread"))?
        .map_err(miette::Report::from)
        .wrap_err("Could not find the platform client")?;
    let ffmpeg = ffmpeg_thread
        .join()
        .map_err(|_| miette::miette!("Could not join thread"))?
        .map_err(miette::Report::from)
        .wrap_err("Could not find ffmpeg")?;

    Ok((ytdl, ffmpeg))
}

/// Generate the clips of a channel.
/// A channel that cannot be resolved is logged, not returned as an error.
fn run_batch(
    pipeline: &mut Pipeline,
    channel: Option<ChannelRef>,
    raw: &str,
    batch: &BatchArgs,
) -> Result<()> {
    let Some(channel) = channel else {
        error!("Invalid channel reference: {raw}");
        return Ok(());
    };

    let options = batch.clip.options()?;
    let count = usize::try_from(batch.clips).unwrap_or(usize::MAX);

    if let Err(err) = pipeline.run_channel(&channel, count, &options) {
        error!("Failed to get video IDs for {channel}: {err}");
    }

    Ok(())
}
