use std::fmt::Display;

use crate::my_regex::{capture_id, patterns};

const BASE_URL: &str = "https://www.youtube.com";

/// Identity of a channel, in one of the forms the platform knows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// Canonical ID, e.g. `UCuAXFkgsw1L7xaCfnd5JJOw`
    Id(String),
    /// Legacy username
    User(String),
    /// Vanity URL slug
    Slug(String),
    /// Handle, without the leading `@`
    Handle(String),
}

impl ChannelRef {
    pub fn parse_id(input: &str) -> Option<Self> {
        capture_id(&patterns().channel_id, input).map(|s| Self::Id(s.to_owned()))
    }

    pub fn parse_user(input: &str) -> Option<Self> {
        capture_id(&patterns().user, input).map(|s| Self::User(s.to_owned()))
    }

    pub fn parse_slug(input: &str) -> Option<Self> {
        capture_id(&patterns().slug, input).map(|s| Self::Slug(s.to_owned()))
    }

    pub fn parse_handle(input: &str) -> Option<Self> {
        capture_id(&patterns().handle, input).map(|s| Self::Handle(s.to_owned()))
    }

    /// URL of the channel page
    pub fn url(&self) -> String {
        match self {
            ChannelRef::Id(id) => format!("{BASE_URL}/channel/{id}"),
            ChannelRef::User(user) => format!("{BASE_URL}/user/{user}"),
            ChannelRef::Slug(slug) => format!("{BASE_URL}/c/{slug}"),
            ChannelRef::Handle(handle) => format!("{BASE_URL}/@{handle}"),
        }
    }
}

impl Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelRef::Id(id) => write!(f, "channel {id}"),
            ChannelRef::User(user) => write!(f, "user {user}"),
            ChannelRef::Slug(slug) => write!(f, "slug {slug}"),
            ChannelRef::Handle(handle) => write!(f, "handle @{handle}"),
        }
    }
}

/// Channel metadata, as resolved by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub id: String,
    pub title: String,
}

impl ChannelRecord {
    /// URL of the playlist gathering all the uploads of the channel.
    ///
    /// Its ID is the channel ID with the `UC` prefix replaced by `UU`.
    pub fn uploads_url(&self) -> String {
        let suffix = self.id.strip_prefix("UC").unwrap_or(&self.id);
        format!("{BASE_URL}/playlist?list=UU{suffix}")
    }
}
