use std::time::Duration;

/// Format a duration as the `H:MM:SS.mmm` time code ffmpeg expects.
///
/// The hours are not bounded nor padded.
pub fn format_timecode(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    let millis = duration.subsec_millis();

    format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Format whole seconds as `H:MM:SS`, for humans
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
fn parse_timecode(tc: &str) -> Option<u128> {
    let (hms, millis) = tc.split_once('.')?;
    let mut parts = hms.split(':');
    let h: u128 = parts.next()?.parse().ok()?;
    let m: u128 = parts.next()?.parse().ok()?;
    let s: u128 = parts.next()?.parse().ok()?;
    let ms: u128 = millis.parse().ok()?;

    Some(((h * 60 + m) * 60 + s) * 1000 + ms)
}
