use std::{
    fmt::Debug,
    process::{Command, Output},
    time::Duration,
};

use miette::{miette, Context, IntoDiagnostic};
use serde::Deserialize;

use super::command::{assert_success_command, run_command, Capture, YT_DL, YT_DLP};
use crate::{
    result::{bail, Error, Result},
    types::{ChannelRecord, ChannelRef, Container, StreamKind, StreamVariant, VideoId},
};

/// Interface to the video platform: channels, uploads and stream manifests
pub trait VideoPlatform: Debug {
    /// Resolve a channel identity to the channel metadata
    fn resolve_channel(&self, channel: &ChannelRef) -> Result<ChannelRecord>;

    /// List the IDs of all the videos uploaded by the channel
    fn list_uploads(&self, channel: &ChannelRecord) -> Result<Vec<VideoId>>;

    /// Get the total duration of the video
    fn get_duration(&self, video: &VideoId) -> Result<Duration>;

    /// Get every stream variant available for the video
    fn get_manifest(&self, video: &VideoId) -> Result<Vec<StreamVariant>>;
}

/// Interface for the [yt-dlp](https://github.com/yt-dlp/yt-dlp) program,
/// or its ancestor youtube-dl
#[derive(Debug)]
pub struct Ytdl {
    program: String,
    socket_timeout: String,
}

impl Ytdl {
    /// Verify that the configured program is reachable.
    /// If none is configured, look for `yt-dlp` then `youtube-dl`.
    pub fn new(program: Option<&str>, socket_timeout: Duration) -> Result<Self> {
        let program = match program {
            Some(program) => {
                assert_success_command(program, |cmd| cmd.arg("--version"))?;
                program
            }
            None if assert_success_command(YT_DLP, |cmd| cmd.arg("--version")).is_ok() => YT_DLP,
            None if assert_success_command(YT_DL, |cmd| cmd.arg("--version")).is_ok() => YT_DL,
            None => return bail("Neither yt-dlp nor youtube-dl found"),
        };

        Ok(Self {
            program: program.to_owned(),
            socket_timeout: socket_timeout.as_secs().max(1).to_string(),
        })
    }

    /// Run the command and check if it failed with saying the stream is unavailable.
    /// In that case, return [`Error::UnavailableStream`].
    ///
    /// The socket timeout is always given to the program.
    /// In other cases, return the output handle.
    pub fn run_check_availability<F>(&self, f: F, capture: Capture) -> Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let res = run_command(
            &self.program,
            |cmd| f(cmd.args(["--socket-timeout", &self.socket_timeout])),
            capture | Capture::STDERR,
        )?;

        let stderr = String::from_utf8_lossy(&res.stderr);
        if is_unavailable(&stderr) {
            Err(Error::UnavailableStream)
        } else {
            Ok(res)
        }
    }

    /// Run the command and return its stdout if it succeeded
    fn run_stdout<F>(&self, f: F) -> Result<String>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let res = self.run_check_availability(f, Capture::STDOUT)?;

        if res.status.success() {
            Ok(String::from_utf8_lossy(&res.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&res.stderr);
            bail(format!(
                "{} did run but was not successful: {}",
                self.program,
                stderr.trim()
            ))
        }
    }
}

fn is_unavailable(stderr: &str) -> bool {
    stderr
        .lines()
        .any(|line| line.starts_with("ERROR:") && line.to_lowercase().contains("unavailable"))
}

impl VideoPlatform for Ytdl {
    fn resolve_channel(&self, channel: &ChannelRef) -> Result<ChannelRecord> {
        let url = channel.url();
        let output = self.run_stdout(|cmd| {
            cmd.arg("-q")
                .arg("--flat-playlist")
                .args(["--playlist-items", "1"])
                .arg("-J")
                .arg("--")
                .arg(&url)
        })?;

        parse_channel(&output)
            .map_err(|err| err.wrap_err_with(|| format!("Could not resolve {channel}")))
    }

    fn list_uploads(&self, channel: &ChannelRecord) -> Result<Vec<VideoId>> {
        let url = channel.uploads_url();
        let output = self.run_stdout(|cmd| {
            cmd.arg("-q")
                .arg("--flat-playlist")
                .args(["--print", "%(id)s"])
                .arg("--")
                .arg(&url)
        })?;

        Ok(output.split_whitespace().filter_map(VideoId::parse).collect())
    }

    fn get_duration(&self, video: &VideoId) -> Result<Duration> {
        let output = self.run_stdout(|cmd| {
            cmd.arg("-q")
                .arg("--skip-download")
                .args(["--print", "%(duration)s"])
                .arg("--")
                .arg(video.as_str())
        })?;

        parse_duration(&output)
    }

    fn get_manifest(&self, video: &VideoId) -> Result<Vec<StreamVariant>> {
        let output = self.run_stdout(|cmd| {
            cmd.arg("-q")
                .arg("--skip-download")
                .arg("-J")
                .arg("--")
                .arg(video.as_str())
        })?;

        parse_manifest(&output)
    }
}

#[derive(Debug, Deserialize)]
struct ChannelJson {
    channel_id: Option<String>,
    id: Option<String>,
    channel: Option<String>,
    title: Option<String>,
    uploader: Option<String>,
}

fn parse_channel(json: &str) -> Result<ChannelRecord> {
    let info: ChannelJson = serde_json::from_str(json)
        .into_diagnostic()
        .wrap_err("Could not parse channel JSON")?;

    let id = info
        .channel_id
        .or(info.id.filter(|id| id.starts_with("UC")))
        .ok_or_else(|| miette!("Channel ID not found in JSON"))?;
    let title = info
        .channel
        .or(info.uploader)
        .or(info.title)
        .unwrap_or_else(|| id.clone());

    Ok(ChannelRecord { id, title })
}

fn parse_duration(output: &str) -> Result<Duration> {
    let output = output.trim();
    if output.is_empty() || output == "NA" {
        return Err(Error::DurationUnavailable);
    }

    let secs: f64 = output
        .parse()
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not parse duration {output:?}"))?;

    if secs.is_finite() && secs >= 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(Error::DurationUnavailable)
    }
}

#[derive(Debug, Deserialize)]
struct ManifestJson {
    #[serde(default)]
    formats: Vec<FormatJson>,
}

#[derive(Debug, Deserialize)]
struct FormatJson {
    format_id: Option<String>,
    url: Option<String>,
    ext: Option<String>,
    protocol: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
    height: Option<u32>,
    fps: Option<f64>,
    tbr: Option<f64>,
    vbr: Option<f64>,
    abr: Option<f64>,
}

impl FormatJson {
    fn into_variant(self) -> Option<StreamVariant> {
        // Manifest-based protocols (HLS, DASH fragments) and storyboards
        // cannot be given to ffmpeg as a plain input
        let protocol = self.protocol.as_deref().unwrap_or("https");
        if protocol != "https" && protocol != "http" {
            return None;
        }

        let has = |codec: &Option<String>| codec.as_deref().is_some_and(|c| c != "none");
        let kind = match (has(&self.vcodec), has(&self.acodec)) {
            (true, false) => StreamKind::VideoOnly,
            (false, true) => StreamKind::AudioOnly,
            (true, true) => StreamKind::Muxed,
            (false, false) => return None,
        };

        let bitrate = match kind {
            StreamKind::VideoOnly => self.tbr.or(self.vbr),
            StreamKind::AudioOnly => self.tbr.or(self.abr),
            StreamKind::Muxed => self.tbr,
        };

        Some(StreamVariant {
            format_id: self.format_id.unwrap_or_default(),
            container: self.ext.as_deref().and_then(Container::from_stream_ext),
            kind,
            height: self.height,
            fps: self.fps,
            bitrate,
            url: self.url?,
        })
    }
}

fn parse_manifest(json: &str) -> Result<Vec<StreamVariant>> {
    let manifest: ManifestJson = serde_json::from_str(json)
        .into_diagnostic()
        .wrap_err("Could not parse manifest JSON")?;

    Ok(manifest
        .formats
        .into_iter()
        .filter_map(FormatJson::into_variant)
        .collect())
}
