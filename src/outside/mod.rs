mod command;
mod ffmpeg;
mod ytdl;

pub use ffmpeg::{Ffmpeg, MediaTool};
pub use ytdl::{VideoPlatform, Ytdl};
