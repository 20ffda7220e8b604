use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{
    io::{ensure_dir, unique_clip_path},
    outside::MediaTool,
    result::Result,
    types::{format_timecode, scale_of, Container, Resolution, StreamSelection, VideoId},
};

/// Everything needed to extract one clip
#[derive(Debug)]
pub struct ClipRequest<'a> {
    pub video_id: &'a VideoId,
    pub streams: &'a StreamSelection,
    pub seek: Duration,
    pub length: Duration,
    pub out_dir: &'a Path,
    pub resolution: Option<Resolution>,
    /// Whether to rescale the video to the exact size of `resolution`
    pub scale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipOutcome {
    pub path: PathBuf,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct Clipper<'a> {
    tool: &'a dyn MediaTool,
    container: Container,
}

impl<'a> Clipper<'a> {
    pub fn new(tool: &'a dyn MediaTool, container: Container) -> Self {
        Self { tool, container }
    }

    /// Cut the clip out of the remote streams and mux it into a new file
    /// of the output directory.
    pub fn extract(&self, request: &ClipRequest) -> Result<ClipOutcome> {
        ensure_dir(request.out_dir)?;
        let output = unique_clip_path(request.out_dir, request.video_id, self.container);
        let args = extraction_args(request, &output);

        let start = Instant::now();
        self.tool.extract_clip(&args)?;

        Ok(ClipOutcome {
            path: output,
            elapsed: start.elapsed(),
        })
    }
}

/// Build the arguments of the extraction.
///
/// Both inputs are seeked before being opened, so only the needed part of each
/// stream is downloaded and decoded.
pub fn extraction_args(request: &ClipRequest, output: &Path) -> Vec<OsString> {
    let seek = format_timecode(request.seek);
    let length = format_timecode(request.length);

    let inputs: [&str; 10] = [
        "-ss",
        &seek,
        "-i",
        &request.streams.video_url,
        "-ss",
        &seek,
        "-i",
        &request.streams.audio_url,
        "-t",
        &length,
    ];
    let mut args: Vec<OsString> = inputs.into_iter().map(OsString::from).collect();

    if request.resolution.is_some() && request.scale {
        let filter = format!("scale={}", scale_of(request.resolution));
        debug!("Rescaling with {filter}");
        args.push("-vf".into());
        args.push(filter.into());
    }

    args.push(output.into());
    args
}
