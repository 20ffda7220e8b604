use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::{pipeline::ClipOptions, types::Resolution};

macro_rules! arg_env {
    ($v:literal) => {
        concat!("CLIPGEN_", $v)
    };
}

/// Cut short clips out of online videos.
///
/// Videos are either given directly or drawn at random from the uploads of a channel.
/// The best video and audio streams are selected and muxed by ffmpeg.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// The path to a TOML settings file for the external programs.
    /// Defaults to `clipgen.toml` in the working directory, if any
    #[arg(long, global = true, env = arg_env!("CONFIG"))]
    pub config: Option<PathBuf>,

    /// Log more details. Can be repeated
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Seed of the random generator, to reproduce the videos drawn and the random clips
    #[arg(long, global = true, env = arg_env!("SEED"))]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a clip from a video
    Video {
        /// The video URL or ID
        video: String,

        #[command(flatten)]
        clip: ClipArgs,
    },

    /// Generate clips from videos of a channel, given its channel ID
    ChannelId {
        /// The channel ID (UC...) or URL
        channel_id: String,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Generate clips from videos of a channel, given its legacy username
    User {
        /// The username or /user/ URL
        user: String,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Generate clips from videos of a channel, given its custom URL slug
    Slug {
        /// The slug or /c/ URL
        slug: String,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Generate clips from videos of a channel, given its handle
    Handle {
        /// The handle, with or without the leading @, or URL
        handle: String,

        #[command(flatten)]
        batch: BatchArgs,
    },
}

#[derive(clap::Args, Debug)]
pub struct ClipArgs {
    /// The start of the clip, in seconds.
    /// With --random, the earliest start of the clip
    #[arg(short, long, default_value_t = 0, env = arg_env!("SEEK"))]
    pub seek: u64,

    /// The length of the clip, in seconds
    #[arg(
        short,
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..),
        env = arg_env!("LENGTH")
    )]
    pub length: u64,

    /// Start the clip at a random time of the video
    #[arg(short, long, env = arg_env!("RANDOM"))]
    pub random: bool,

    /// The path to the output directory. Defaults to the current directory
    #[arg(short, long, env = arg_env!("OUTPUT"))]
    pub output: Option<PathBuf>,

    /// The maximum resolution of the video. Defaults to the highest available
    #[arg(short = 'q', long, value_enum, env = arg_env!("RESOLUTION"))]
    pub resolution: Option<Resolution>,

    /// Rescale the video to the exact size of --resolution
    #[arg(long, requires = "resolution", env = arg_env!("EXACT_SCALE"))]
    pub exact_scale: bool,
}

#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// The number of clips to generate, each from a different video
    #[arg(
        short = 'c',
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..),
        env = arg_env!("CLIPS")
    )]
    pub clips: u64,

    #[command(flatten)]
    pub clip: ClipArgs,
}

impl ClipArgs {
    pub fn options(&self) -> Result<ClipOptions> {
        let out_dir = match &self.output {
            Some(out) => out.clone(),
            None => std::env::current_dir()
                .into_diagnostic()
                .wrap_err("Could not get the current directory")?,
        };

        Ok(ClipOptions {
            seek: self.seek,
            length: self.length,
            random: self.random,
            out_dir,
            resolution: self.resolution,
            exact_scale: self.exact_scale,
        })
    }
}
