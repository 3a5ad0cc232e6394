use crate::alert::NotificationType;
use crate::config::ColorConfig;

/// Maps a notification type onto its configured display color.
pub fn urgency_color<'a>(kind: &NotificationType, colors: &'a ColorConfig) -> &'a str {
    match kind {
        NotificationType::Problem => colors.problem.as_str(),
        NotificationType::Recovery => colors.recovery.as_str(),
        NotificationType::Acknowledgement => colors.acknowledge.as_str(),
        NotificationType::FlappingStart => colors.flapping_start.as_str(),
        NotificationType::FlappingStop => colors.flapping_stop.as_str(),
        NotificationType::FlappingDisabled => colors.flapping_disabled.as_str(),
        NotificationType::DowntimeStart => colors.downtime_start.as_str(),
        NotificationType::DowntimeStop => colors.downtime_stop.as_str(),
        NotificationType::DowntimeCancelled => colors.downtime_cancelled.as_str(),
        NotificationType::Other(_) => colors.default.as_str(),
    }
}

/// Acknowledging only makes sense for alerts rendered in the problem color.
/// The check is on the resolved color, so a color shared with the problem
/// color also gets the acknowledge action.
pub fn is_acknowledgeable(color: &str, colors: &ColorConfig) -> bool {
    color == colors.problem
}
