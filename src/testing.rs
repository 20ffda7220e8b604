//! In-memory stand-ins for the external programs

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    ffi::OsString,
    path::PathBuf,
    time::Duration,
};

use miette::IntoDiagnostic;

use crate::{
    outside::{MediaTool, VideoPlatform},
    result::{err_msg, Error, Result},
    types::{ChannelRecord, ChannelRef, Container, StreamKind, StreamVariant, VideoId},
};

fn ext(container: Container) -> &'static str {
    &container.with_dot()[1..]
}

pub fn video(container: Container, height: u32, fps: f64) -> StreamVariant {
    StreamVariant {
        format_id: format!("v{height}"),
        container: Some(container),
        kind: StreamKind::VideoOnly,
        height: Some(height),
        fps: Some(fps),
        bitrate: Some(height as f64 * 3.0),
        url: format!("https://cdn/v/{}/{height}", ext(container)),
    }
}

pub fn audio(container: Container, bitrate: f64) -> StreamVariant {
    StreamVariant {
        format_id: format!("a{bitrate}"),
        container: Some(container),
        kind: StreamKind::AudioOnly,
        height: None,
        fps: None,
        bitrate: Some(bitrate),
        url: format!("https://cdn/a/{}/{}", ext(container), bitrate as u32),
    }
}

/// A manifest with streams of both families at several heights
pub fn manifest() -> Vec<StreamVariant> {
    vec![
        video(Container::Mp4, 360, 30.0),
        audio(Container::Mp4, 48.0),
        video(Container::Mp4, 1080, 30.0),
        video(Container::Webm, 2160, 30.0),
        video(Container::Mp4, 720, 30.0),
        audio(Container::Webm, 160.0),
        audio(Container::Mp4, 128.0),
        video(Container::Webm, 1080, 60.0),
        audio(Container::Webm, 70.0),
    ]
}

pub fn video_id(n: usize) -> VideoId {
    VideoId::parse(&format!("video{n:06}")).expect("valid test video id")
}

#[derive(Debug, Default)]
pub struct FakePlatform {
    /// None makes every channel resolution fail
    pub channel: Option<ChannelRecord>,
    pub uploads: Vec<VideoId>,
    pub durations: HashMap<VideoId, Duration>,
    pub manifest: Vec<StreamVariant>,
    pub resolved: RefCell<Vec<ChannelRef>>,
}

impl FakePlatform {
    /// A platform knowing one channel whose uploads all last `duration`
    pub fn with_uploads(count: usize, duration: Duration) -> Self {
        let uploads: Vec<_> = (0..count).map(video_id).collect();

        Self {
            channel: Some(ChannelRecord {
                id: "UCuAXFkgsw1L7xaCfnd5JJOw".to_owned(),
                title: "Test channel".to_owned(),
            }),
            durations: uploads.iter().map(|id| (id.clone(), duration)).collect(),
            uploads,
            manifest: manifest(),
            resolved: RefCell::default(),
        }
    }
}

impl VideoPlatform for FakePlatform {
    fn resolve_channel(&self, channel: &ChannelRef) -> Result<ChannelRecord> {
        self.resolved.borrow_mut().push(channel.clone());
        self.channel
            .clone()
            .ok_or_else(|| err_msg(format!("Channel not found: {channel}")))
    }

    fn list_uploads(&self, _channel: &ChannelRecord) -> Result<Vec<VideoId>> {
        Ok(self.uploads.clone())
    }

    fn get_duration(&self, video: &VideoId) -> Result<Duration> {
        self.durations
            .get(video)
            .copied()
            .ok_or(Error::DurationUnavailable)
    }

    fn get_manifest(&self, _video: &VideoId) -> Result<Vec<StreamVariant>> {
        Ok(self.manifest.clone())
    }
}

/// Record every invocation and write an empty output file on success
#[derive(Debug, Default)]
pub struct FakeTool {
    pub calls: RefCell<Vec<Vec<OsString>>>,
    /// Exit codes of the next invocations, 0 once exhausted
    pub exit_codes: RefCell<VecDeque<i32>>,
}

impl FakeTool {
    pub fn failing_with(codes: &[i32]) -> Self {
        Self {
            calls: RefCell::default(),
            exit_codes: RefCell::new(codes.iter().copied().collect()),
        }
    }

    /// Arguments of every call, lossily converted for easy comparisons
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .map(|args| {
                args.iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect()
            })
            .collect()
    }
}

impl MediaTool for FakeTool {
    fn extract_clip(&self, args: &[OsString]) -> Result<()> {
        self.calls.borrow_mut().push(args.to_vec());

        match self.exit_codes.borrow_mut().pop_front().unwrap_or(0) {
            0 => {
                let output = PathBuf::from(args.last().expect("no output argument"));
                std::fs::write(output, b"").into_diagnostic()?;
                Ok(())
            }
            code => Err(Error::ToolFailed(Some(code))),
        }
    }
}
