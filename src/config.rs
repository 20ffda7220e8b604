use std::{path::Path, time::Duration};

use config::{Config, Environment, File, FileFormat};
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;

use crate::types::Container;

/// Settings file looked up in the working directory
const DEFAULT_FILE: &str = "clipgen.toml";
const ENV_PREFIX: &str = "CLIPGEN";

/// Settings of the external programs, that rarely change between runs
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Program used to extract the clips
    pub ffmpeg: String,

    /// Program used to query the platform. Auto-detected if absent
    pub ytdl: Option<String>,

    /// Network timeout of the platform queries, in seconds
    pub socket_timeout: u64,

    /// Container family of the streams and of the clips
    pub container: Container,
}

impl Settings {
    /// Load the settings: defaults, then the settings file, then the environment.
    ///
    /// Without an explicit path, a `clipgen.toml` file in the working
    /// directory is used if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Path::new(DEFAULT_FILE))
    }

    /// Same as [`Settings::load`], with the optional file at `default_file`.
    ///
    /// The default file is matched by its exact name, a `clipgen` binary
    /// next to it is never read as settings.
    fn load_from(path: Option<&Path>, default_file: &Path) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(default_file)
                .format(FileFormat::Toml)
                .required(false),
        };

        Config::builder()
            .set_default("ffmpeg", "ffmpeg")
            .and_then(|b| b.set_default("socket_timeout", 3))
            .and_then(|b| b.set_default("container", "mp4"))
            .into_diagnostic()?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .into_diagnostic()
            .wrap_err("Could not load the settings")?
            .try_deserialize()
            .into_diagnostic()
            .wrap_err("Invalid settings")
    }

    pub fn socket_timeout(&self) -> Duration {
        Duration::from_secs(self.socket_timeout)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            indoc! {r#"
                ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
                ytdl = "yt-dlp"
                container = "webm"
            "#},
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(settings.ytdl.as_deref(), Some("yt-dlp"));
        assert_eq!(settings.container, Container::Webm);
        assert_eq!(settings.socket_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let res = Settings::load(Some(&dir.path().join("missing.toml")));
        assert!(res.is_err());
    }

    #[test]
    fn executable_next_to_the_default_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clipgen"), b"\x7fELF\x02\x01\x01\0garbage = [").unwrap();
        let default_file = dir.path().join(DEFAULT_FILE);

        let settings = Settings::load_from(None, &default_file).unwrap();
        assert_eq!(settings.ffmpeg, "ffmpeg");
        assert_eq!(settings.container, Container::Mp4);

        std::fs::write(&default_file, "container = \"webm\"\n").unwrap();
        let settings = Settings::load_from(None, &default_file).unwrap();
        assert_eq!(settings.container, Container::Webm);
    }

    #[test]
    fn unknown_container_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "container = \"avi\"\n").unwrap();

        assert!(Settings::load(Some(&path)).is_err());
    }
}
