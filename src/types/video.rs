use std::fmt::Display;

use crate::my_regex::{capture_id, patterns};

/// Validated identifier of a single video
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Parse a video ID or any of the known video URL shapes.
    /// Return None if the input does not refer to a video.
    pub fn parse(input: &str) -> Option<Self> {
        capture_id(&patterns().video, input).map(|id| Self(id.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
