use std::sync::OnceLock;

use regex::Regex;

// Same idea as building one big regex per URL shape, but at least
// each part is named and can be reused

/// Characters allowed in video and channel IDs
macro_rules! id_chars {
    () => {
        r#"[0-9A-Za-z_\-]"#
    };
}
/// A video ID, captured
macro_rules! video_id {
    () => {
        concat!("(?P<id>", id_chars!(), "{11})")
    };
}
/// A channel ID, captured
macro_rules! channel_id {
    () => {
        concat!("(?P<id>UC", id_chars!(), "{22})")
    };
}
/// The platform host, with any subdomain and TLD
macro_rules! host {
    () => {
        r#"(?:https?://)?(?:[\w\-]+\.)*youtube\.[a-z.]+"#
    };
}
/// The end of a path segment
macro_rules! seg_end {
    () => {
        r#"(?:[/?&#]|$)"#
    };
}

/// Example: "https://www.youtube.com/watch?app=desktop&v=dQw4w9WgXcQ"
const VIDEO_WATCH: &str = concat!("^", host!(), r#"/watch\?(?:.*&)?v="#, video_id!(), seg_end!());
/// Example: "https://youtu.be/dQw4w9WgXcQ?t=42"
const VIDEO_SHORT_LINK: &str = concat!(r#"^(?:https?://)?youtu\.be/"#, video_id!(), seg_end!());
/// Example: "https://www.youtube.com/shorts/dQw4w9WgXcQ", also for `embed` and `live`
const VIDEO_PATH: &str = concat!("^", host!(), "/(?:embed|shorts|live)/", video_id!(), seg_end!());
const VIDEO_BARE: &str = concat!("^", video_id!(), "$");

/// Example: "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw/videos"
const CHANNEL_ID_URL: &str = concat!("^", host!(), "/channel/", channel_id!(), seg_end!());
const CHANNEL_ID_BARE: &str = concat!("^", channel_id!(), "$");

/// Example: "https://www.youtube.com/user/TheTrueMoo"
const USER_URL: &str = concat!("^", host!(), "/user/(?P<id>[0-9A-Za-z]{1,20})", seg_end!());
const USER_BARE: &str = "^(?P<id>[0-9A-Za-z]{1,20})$";

/// Example: "https://www.youtube.com/c/Tyrrrz"
const SLUG_URL: &str = concat!("^", host!(), "/c/(?P<id>", id_chars!(), "+)", seg_end!());
const SLUG_BARE: &str = concat!("^(?P<id>", id_chars!(), "+)$");

/// Example: "https://www.youtube.com/@BeauMiles"
const HANDLE_URL: &str = concat!("^", host!(), r#"/@(?P<id>[\w\-.]{3,30})"#, seg_end!());
const HANDLE_BARE: &str = r#"^@?(?P<id>[\w\-.]{3,30})$"#;

/// The patterns recognized for each kind of identity.
/// For each kind, the first pattern matching the input wins.
pub struct IdentityPatterns {
    pub video: [Regex; 4],
    pub channel_id: [Regex; 2],
    pub user: [Regex; 2],
    pub slug: [Regex; 2],
    pub handle: [Regex; 2],
}

static PATTERNS: OnceLock<IdentityPatterns> = OnceLock::new();

pub fn patterns() -> &'static IdentityPatterns {
    PATTERNS.get_or_init(|| {
        // The patterns are constants, they are checked by the tests
        let re = |p: &str| Regex::new(p).expect("invalid identity pattern");

        IdentityPatterns {
            video: [
                re(VIDEO_BARE),
                re(VIDEO_WATCH),
                re(VIDEO_SHORT_LINK),
                re(VIDEO_PATH),
            ],
            channel_id: [re(CHANNEL_ID_BARE), re(CHANNEL_ID_URL)],
            user: [re(USER_BARE), re(USER_URL)],
            slug: [re(SLUG_BARE), re(SLUG_URL)],
            handle: [re(HANDLE_BARE), re(HANDLE_URL)],
        }
    })
}

/// Return the `id` group of the first pattern matching the trimmed input
pub fn capture_id<'a>(patterns: &[Regex], input: &'a str) -> Option<&'a str> {
    let input = input.trim();
    patterns
        .iter()
        .find_map(|re| re.captures(input))
        .and_then(|cap| cap.name("id"))
        .map(|m| m.as_str())
}
