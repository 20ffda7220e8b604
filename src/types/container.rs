use serde::Deserialize;

/// Container family of the elementary streams and of the produced clip.
///
/// Video and audio streams must share the same family to be muxed
/// without transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Mp4,
    Webm,
}

impl Container {
    /// Return the extension with the leading dot.
    /// e.g. ".ext"
    pub fn with_dot(self) -> &'static str {
        match self {
            Container::Mp4 => ".mp4",
            Container::Webm => ".webm",
        }
    }

    /// Parse the extension the platform reports for a stream.
    /// Return None in case of an unknown extension.
    ///
    /// Audio-only streams use their own extensions (`m4a`, `weba`)
    /// but still belong to the same family.
    pub fn from_stream_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp4" | "m4a" => Some(Self::Mp4),
            "webm" | "weba" => Some(Self::Webm),
            _ => None,
        }
    }
}
