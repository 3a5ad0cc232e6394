use log::{debug, error};

use crate::alert::{missing_args, position, AlertRecord};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::slack::SlackMessage;
use crate::teams::TeamsMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Disabled,
    Delivered,
    Printed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySummary {
    pub slack: DeliveryStatus,
    pub teams: DeliveryStatus,
}

/// Parses the invocation vector, logging what was padded.
pub fn parse_invocation<S: AsRef<str>>(args: &[S]) -> AlertRecord {
    let missing = missing_args(args.len());
    if missing > 0 {
        debug!("Not enough arguments, missing {}", missing);
    }

    let alert = AlertRecord::from_args(args);
    debug!(
        "{} (sentinel {:?})",
        alert.mode,
        args.get(position::MODE).map(|mode| mode.as_ref()).unwrap_or("")
    );
    debug!("{:?}", alert);
    alert
}

/// Sends the alert to every enabled platform, one after the other.
/// Delivery failures are logged and never escalated.
pub async fn relay(config: &Config, alert: &AlertRecord, dispatcher: &Dispatcher) -> RelaySummary {
    let slack = if config.alert_slack {
        let message = SlackMessage::from_alert(alert, config);
        send("Slack", &config.slack_hook_url, &message, dispatcher).await
    } else {
        DeliveryStatus::Disabled
    };

    let teams = if config.alert_teams {
        let message = TeamsMessage::from_alert(alert, config);
        send("Teams", &config.teams_hook_url, &message, dispatcher).await
    } else {
        DeliveryStatus::Disabled
    };

    RelaySummary { slack, teams }
}

async fn send<T: serde::Serialize>(
    platform: &str,
    url: &str,
    message: &T,
    dispatcher: &Dispatcher,
) -> DeliveryStatus {
    match dispatcher.post(url, message).await {
        Ok(Some(delivery)) => {
            debug!("{} notification delivered ({})", platform, delivery.status);
            DeliveryStatus::Delivered
        }
        Ok(None) => DeliveryStatus::Printed,
        Err(e) => {
            error!("{} notification failed: {:#}", platform, e);
            DeliveryStatus::Failed
        }
    }
}
