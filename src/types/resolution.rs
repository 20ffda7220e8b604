use clap::ValueEnum;

/// Maximum vertical resolution of the selected video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Resolution {
    #[value(name = "144p")]
    P144,
    #[value(name = "240p")]
    P240,
    #[value(name = "360p")]
    P360,
    #[value(name = "480p")]
    P480,
    #[value(name = "720p")]
    P720,
    #[value(name = "1080p")]
    P1080,
    #[value(name = "1440p")]
    P1440,
    #[value(name = "2160p")]
    P2160,
}

/// Scale used when no resolution is known
pub const DEFAULT_SCALE: &str = "1920:1080";

impl Resolution {
    /// Height in pixels
    pub fn height(self) -> u32 {
        match self {
            Resolution::P144 => 144,
            Resolution::P240 => 240,
            Resolution::P360 => 360,
            Resolution::P480 => 480,
            Resolution::P720 => 720,
            Resolution::P1080 => 1080,
            Resolution::P1440 => 1440,
            Resolution::P2160 => 2160,
        }
    }

    /// Canonical `width:height` of the resolution, as the ffmpeg `scale` filter expects it
    pub fn scale(self) -> &'static str {
        match self {
            Resolution::P144 => "256:144",
            Resolution::P240 => "426:240",
            Resolution::P360 => "640:360",
            Resolution::P480 => "854:480",
            Resolution::P720 => "1280:720",
            Resolution::P1080 => "1920:1080",
            Resolution::P1440 => "2560:1440",
            Resolution::P2160 => "3840:2160",
        }
    }
}

/// Scale of an optional resolution, [`DEFAULT_SCALE`] if absent
pub fn scale_of(resolution: Option<Resolution>) -> &'static str {
    resolution.map_or(DEFAULT_SCALE, Resolution::scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Resolution; 8] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P1440,
        Resolution::P2160,
    ];

    #[test]
    fn every_resolution_maps_to_its_canonical_size() {
        let expected = [
            "256:144",
            "426:240",
            "640:360",
            "854:480",
            "1280:720",
            "1920:1080",
            "2560:1440",
            "3840:2160",
        ];

        for (res, scale) in ALL.into_iter().zip(expected) {
            assert_eq!(scale_of(Some(res)), scale);
            assert!(scale.ends_with(&format!(":{}", res.height())));
        }
    }

    #[test]
    fn absent_resolution_defaults_to_1080p() {
        assert_eq!(scale_of(None), "1920:1080");
    }

    #[test]
    fn parses_cli_names() {
        assert_eq!(Resolution::from_str("720p", false), Ok(Resolution::P720));
        assert_eq!(Resolution::from_str("2160P", true), Ok(Resolution::P2160));
        assert!(Resolution::from_str("1000p", false).is_err());
    }
}
