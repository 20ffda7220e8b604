use std::{path::PathBuf, time::Duration};

use fastrand::Rng;
use tracing::{error, info, info_span};

use crate::{
    clipper::{ClipOutcome, ClipRequest, Clipper},
    outside::{MediaTool, VideoPlatform},
    result::{Error, Result},
    sampler::sample_uploads,
    selector::resolve_streams,
    types::{format_clock, ChannelRef, Container, Resolution, VideoId},
};

/// How to cut the clips, shared by every video of a run
#[derive(Debug, Clone)]
pub struct ClipOptions {
    /// Start of the clip in seconds, or the earliest start in random mode
    pub seek: u64,
    /// Length of the clip in seconds
    pub length: u64,
    /// Draw the start of the clip at random
    pub random: bool,
    pub out_dir: PathBuf,
    pub resolution: Option<Resolution>,
    /// Always rescale to the exact size of `resolution`
    pub exact_scale: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of videos drawn from the channel
    pub attempted: usize,
    pub succeeded: usize,
}

/// Drive the whole clip generation, one video after the other.
///
/// The random generator is owned here and shared by the upload sampling
/// and the random seeks, so a seeded generator makes a run reproducible.
#[derive(Debug)]
pub struct Pipeline<'a> {
    platform: &'a dyn VideoPlatform,
    clipper: Clipper<'a>,
    container: Container,
    rng: Rng,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        platform: &'a dyn VideoPlatform,
        tool: &'a dyn MediaTool,
        container: Container,
        rng: Rng,
    ) -> Self {
        Self {
            platform,
            clipper: Clipper::new(tool, container),
            container,
            rng,
        }
    }

    /// Generate one clip of the video.
    ///
    /// Failures are logged and result in None, they never go further up.
    pub fn run_video(&mut self, video: &VideoId, options: &ClipOptions) -> Option<ClipOutcome> {
        let span = info_span!("video", id = %video);
        let _enter = span.enter();

        match self.process_video(video, options) {
            Ok(outcome) => {
                info!("Clip saved to {}", outcome.path.display());
                info!("Clip took {}ms to generate.", outcome.elapsed.as_millis());
                Some(outcome)
            }
            Err(err) => {
                error!("{err}");
                None
            }
        }
    }

    /// Generate one clip for each of `count` videos drawn from the channel.
    ///
    /// Returns an error only if the channel videos could not be listed.
    /// A failing video does not stop the others.
    pub fn run_channel(
        &mut self,
        channel: &ChannelRef,
        count: usize,
        options: &ClipOptions,
    ) -> Result<BatchSummary> {
        let videos = sample_uploads(self.platform, channel, count, &mut self.rng)?;

        let mut summary = BatchSummary {
            attempted: videos.len(),
            succeeded: 0,
        };
        for video in &videos {
            if self.run_video(video, options).is_some() {
                summary.succeeded += 1;
            }
        }

        info!(
            "{} of {} clips generated",
            summary.succeeded, summary.attempted
        );
        Ok(summary)
    }

    fn process_video(&mut self, video: &VideoId, options: &ClipOptions) -> Result<ClipOutcome> {
        let duration = self
            .platform
            .get_duration(video)
            .map_err(|err| err.wrap_err_with(|| "Failed to get video duration"))?;

        let seek = if options.random {
            random_seek(&mut self.rng, duration, options.seek, options.length)?
        } else {
            options.seek
        };

        info!(
            "Generating clip from {video} at {} for {} seconds.",
            format_clock(seek),
            options.length
        );

        let streams = resolve_streams(self.platform, video, self.container, options.resolution)?;

        self.clipper.extract(&ClipRequest {
            video_id: video,
            streams: &streams,
            seek: Duration::from_secs(seek),
            length: Duration::from_secs(options.length),
            out_dir: &options.out_dir,
            resolution: options.resolution,
            scale: streams.scale_required || options.exact_scale,
        })
    }
}

/// Draw the start of a clip uniformly in `[floor, duration - length)`,
/// the duration being truncated to whole seconds.
pub fn random_seek(rng: &mut Rng, duration: Duration, floor: u64, length: u64) -> Result<u64> {
    let total = duration.as_secs();

    match total.checked_sub(length) {
        Some(max_start) if max_start > floor => Ok(rng.u64(floor..max_start)),
        _ => Err(Error::TooShort {
            duration: total,
            length,
            seek: floor,
        }),
    }
}
