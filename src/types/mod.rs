mod channel;
mod container;
mod resolution;
mod stream;
mod timecode;
mod video;

pub use channel::{ChannelRecord, ChannelRef};
pub use container::Container;
pub use resolution::{scale_of, Resolution};
pub use stream::{StreamKind, StreamSelection, StreamVariant};
pub use timecode::{format_clock, format_timecode};
pub use video::VideoId;
