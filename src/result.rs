use std::fmt::Display;

use miette::miette;

#[derive(Debug)]
pub enum Error {
    /// The platform reported the video or channel as unavailable
    UnavailableStream,

    /// The platform did not give a duration for the video (e.g. live streams)
    DurationUnavailable,

    /// The video is not long enough to fit a random clip after the seek floor
    TooShort { duration: u64, length: u64, seek: u64 },

    NoVideoStream,
    NoAudioStream,

    /// The channel exists but has no upload to sample from
    NoUploads,

    /// The media tool did run but exited with a non-zero status.
    /// `None` if it was killed by a signal.
    ToolFailed(Option<i32>),

    Miette(miette::Report),
}

impl From<miette::Report> for Error {
    fn from(err: miette::Report) -> Self {
        Error::Miette(err)
    }
}

impl From<Error> for miette::Report {
    fn from(err: Error) -> Self {
        match err {
            Error::Miette(err) => err,
            err => miette!("{err}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnavailableStream => write!(f, "Unavailable stream"),
            Error::DurationUnavailable => write!(f, "Failed to get video duration"),
            Error::TooShort {
                duration,
                length,
                seek,
            } => write!(
                f,
                "Video is too short for a random clip \
                ({duration}s long, {length}s clip starting at {seek}s at the earliest)"
            ),
            Error::NoVideoStream => write!(f, "No video stream info found"),
            Error::NoAudioStream => write!(f, "No audio stream info found"),
            Error::NoUploads => write!(f, "Channel has no uploaded video"),
            Error::ToolFailed(Some(code)) => {
                write!(f, "Failed to generate clip (exit status {code})")
            }
            Error::ToolFailed(None) => write!(f, "Failed to generate clip (killed by a signal)"),
            // Print the whole context chain on one line, logs are line based
            Error::Miette(report) => {
                let mut first = true;
                for cause in report.chain() {
                    if !first {
                        write!(f, ": ")?;
                    }
                    write!(f, "{cause}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl Error {
    pub fn wrap_err_with<D, F>(self, f: F) -> Error
    where
        D: Display + Send + Sync + 'static,
        F: FnOnce() -> D,
    {
        match self {
            Error::Miette(report) => Error::Miette(report.wrap_err(f())),
            err => err,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Create an error from a simple message
pub fn err_msg<D>(msg: D) -> Error
where
    D: Display + std::fmt::Debug + Send + Sync + 'static,
{
    Error::Miette(miette::Report::msg(msg))
}

/// Return early with an error made from a simple message
pub fn bail<T, D>(msg: D) -> Result<T>
where
    D: Display + std::fmt::Debug + Send + Sync + 'static,
{
    Err(err_msg(msg))
}
