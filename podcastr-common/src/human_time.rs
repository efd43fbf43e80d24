//! Human-readable duration formatting
//!
//! Every duration shown by Podcastr (episode lists, detail page, player
//! progress) goes through [`convert_duration`] so the display is uniform.

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Format a count of seconds as `HH:MM:SS`.
///
/// Each component is zero-padded to two digits. Hours are not wrapped into
/// days, so long recordings keep counting up (`90000` is `25:00:00`).
///
/// # Examples
///
/// ```
/// use podcastr_common::human_time::convert_duration;
///
/// assert_eq!(convert_duration(0), "00:00:00");
/// assert_eq!(convert_duration(61), "00:01:01");
/// assert_eq!(convert_duration(3661), "01:01:01");
/// assert_eq!(convert_duration(90000), "25:00:00");
/// ```
pub fn convert_duration(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
