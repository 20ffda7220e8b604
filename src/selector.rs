use tracing::debug;

use crate::{
    outside::VideoPlatform,
    result::{Error, Result},
    types::{Container, Resolution, StreamKind, StreamSelection, StreamVariant, VideoId},
};

/// Fetch the manifest of the video and select the streams to clip from
pub fn resolve_streams(
    platform: &dyn VideoPlatform,
    video: &VideoId,
    container: Container,
    ceiling: Option<Resolution>,
) -> Result<StreamSelection> {
    let manifest = platform
        .get_manifest(video)
        .map_err(|err| err.wrap_err_with(|| "Could not get the stream manifest"))?;
    debug!("{} stream variants in the manifest", manifest.len());

    select_streams(&manifest, container, ceiling)
}

/// Select the best video-only and audio-only streams of the container family.
///
/// If a resolution ceiling is given, video streams taller than it are ignored
/// and the selection does not require any explicit scaling: the best stream
/// under the ceiling is used as-is. Without a ceiling the selection is marked as
/// requiring scaling, which the extraction only honors when a resolution is known.
pub fn select_streams(
    manifest: &[StreamVariant],
    container: Container,
    ceiling: Option<Resolution>,
) -> Result<StreamSelection> {
    let in_family = |v: &&StreamVariant| v.container == Some(container);

    let video = manifest
        .iter()
        .filter(|v| v.kind == StreamKind::VideoOnly)
        .filter(in_family)
        .filter(|v| match ceiling {
            Some(ceiling) => v.height.is_some_and(|h| h <= ceiling.height()),
            None => true,
        })
        .max_by(|a, b| a.cmp_video_quality(b))
        .ok_or(Error::NoVideoStream)?;

    let audio = manifest
        .iter()
        .filter(|v| v.kind == StreamKind::AudioOnly)
        .filter(in_family)
        .max_by(|a, b| a.cmp_bitrate(b))
        .ok_or(Error::NoAudioStream)?;

    debug!(
        "Selected video format {} ({}p) and audio format {}",
        video.format_id,
        video.height.unwrap_or_default(),
        audio.format_id
    );

    Ok(StreamSelection {
        video_url: video.url.clone(),
        audio_url: audio.url.clone(),
        scale_required: ceiling.is_none(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{audio, manifest, video};

    #[test]
    fn best_video_and_audio_of_the_family() {
        let selection = select_streams(&manifest(), Container::Mp4, None).unwrap();

        assert_eq!(selection.video_url, "https://cdn/v/mp4/1080");
        assert_eq!(selection.audio_url, "https://cdn/a/mp4/128");
        assert!(selection.scale_required);
    }

    #[test]
    fn other_family_is_never_mixed_in() {
        let selection = select_streams(&manifest(), Container::Webm, None).unwrap();

        assert_eq!(selection.video_url, "https://cdn/v/webm/2160");
        assert_eq!(selection.audio_url, "https://cdn/a/webm/160");
    }

    #[test]
    fn ceiling_filters_out_taller_streams_and_disables_scaling() {
        let selection =
            select_streams(&manifest(), Container::Mp4, Some(Resolution::P720)).unwrap();

        assert_eq!(selection.video_url, "https://cdn/v/mp4/720");
        assert!(!selection.scale_required);

        let selection =
            select_streams(&manifest(), Container::Mp4, Some(Resolution::P480)).unwrap();
        assert_eq!(selection.video_url, "https://cdn/v/mp4/360");
    }

    #[test]
    fn nothing_under_the_ceiling() {
        let res = select_streams(&manifest(), Container::Mp4, Some(Resolution::P144));
        assert!(matches!(res, Err(Error::NoVideoStream)));
    }

    #[test]
    fn muxed_streams_are_not_candidates() {
        let mut muxed = video(Container::Mp4, 1080, 30.0);
        muxed.kind = StreamKind::Muxed;
        let manifest = [muxed, audio(Container::Mp4, 128.0)];

        let res = select_streams(&manifest, Container::Mp4, None);
        assert!(matches!(res, Err(Error::NoVideoStream)));
    }

    #[test]
    fn missing_audio() {
        let manifest = [video(Container::Mp4, 720, 30.0), audio(Container::Webm, 160.0)];

        let res = select_streams(&manifest, Container::Mp4, None);
        assert!(matches!(res, Err(Error::NoAudioStream)));
    }
}
