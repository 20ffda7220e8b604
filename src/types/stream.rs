use std::cmp::Ordering;

use super::Container;

/// Which media an elementary stream carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    VideoOnly,
    AudioOnly,
    /// Both video and audio, never selected as the muxing is done by ffmpeg
    Muxed,
}

/// One downloadable variant of a video, as listed in its manifest
#[derive(Debug, Clone, PartialEq)]
pub struct StreamVariant {
    pub format_id: String,
    /// None if the platform uses a container family we do not handle
    pub container: Option<Container>,
    pub kind: StreamKind,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    /// Average bitrate, in kbit/s
    pub bitrate: Option<f64>,
    pub url: String,
}

impl StreamVariant {
    /// Compare the video quality of two variants: height first, then frame rate,
    /// then bitrate. Missing values rank below any known one.
    pub fn cmp_video_quality(&self, other: &Self) -> Ordering {
        self.height
            .cmp(&other.height)
            .then_with(|| cmp_opt_f64(self.fps, other.fps))
            .then_with(|| cmp_opt_f64(self.bitrate, other.bitrate))
    }

    pub fn cmp_bitrate(&self, other: &Self) -> Ordering {
        cmp_opt_f64(self.bitrate, other.bitrate)
    }
}

fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// The streams chosen for one clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSelection {
    pub video_url: String,
    pub audio_url: String,
    /// Whether the video must be explicitly rescaled to the requested resolution
    pub scale_required: bool,
}
