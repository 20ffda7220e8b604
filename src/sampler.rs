use fastrand::Rng;
use tracing::info;

use crate::{
    outside::VideoPlatform,
    result::{Error, Result},
    types::{ChannelRef, VideoId},
};

/// Resolve the channel, list all its uploads and draw `count` of them at random.
///
/// Fewer videos are returned if the channel does not have enough uploads.
/// Any failure means no video can be processed for this channel.
pub fn sample_uploads(
    platform: &dyn VideoPlatform,
    channel: &ChannelRef,
    count: usize,
    rng: &mut Rng,
) -> Result<Vec<VideoId>> {
    let record = platform.resolve_channel(channel)?;

    info!("Getting videos from {}", record.title);
    let uploads = platform.list_uploads(&record).map_err(|err| {
        err.wrap_err_with(|| format!("Could not list the uploads of {}", record.title))
    })?;
    info!("Found {} videos.", uploads.len());

    if uploads.is_empty() {
        return Err(Error::NoUploads);
    }

    Ok(draw(uploads, count, rng))
}

/// Draw `count` items without replacement, with no bias toward the original order
pub fn draw<T>(mut items: Vec<T>, count: usize, rng: &mut Rng) -> Vec<T> {
    rng.shuffle(&mut items);
    items.truncate(count);
    items
}
