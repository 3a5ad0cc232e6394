use serde::{Deserialize, Serialize};

use crate::ack::ack_url;
use crate::alert::AlertRecord;
use crate::config::Config;
use crate::severity::{is_acknowledgeable, urgency_color};

pub const MESSAGE_CARD_TYPE: &str = "MessageCard";
pub const MESSAGE_CARD_CONTEXT: &str = "http://schema.org/extensions";

/// Legacy Office 365 connector card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamsMessage {
    #[serde(rename = "@type", default, skip_serializing_if = "String::is_empty")]
    pub card_type: String,
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "themeColor")]
    pub theme_color: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<TeamsSection>,
    #[serde(rename = "potentialAction", default, skip_serializing_if = "Vec::is_empty")]
    pub potential_action: Vec<TeamsPotentialAction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamsSection {
    #[serde(rename = "activityTitle")]
    pub activity_title: String,
    #[serde(rename = "activitySubtitle")]
    pub activity_subtitle: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facts: Vec<TeamsFact>,
    pub markdown: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamsFact {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamsPotentialAction {
    #[serde(rename = "@type")]
    pub action_type: String,
    pub name: String,
    pub targets: Vec<TeamsTarget>,
}

/// Supported `os` values are default, windows, iOS and android.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamsTarget {
    pub os: String,
    pub uri: String,
}

impl TeamsFact {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl TeamsMessage {
    pub fn from_alert(alert: &AlertRecord, config: &Config) -> Self {
        let color = urgency_color(&alert.notification_type, &config.colors);

        let summary = format!(
            "{} ({}) - {} - {} - {} \n {}",
            alert.host_alias,
            alert.host_address,
            alert.service_desc,
            alert.notification_type,
            alert.long_date_time,
            alert.service_output
        );

        let section = TeamsSection {
            activity_title: alert.host_alias.clone(),
            activity_subtitle: alert.host_address.clone(),
            facts: vec![
                TeamsFact::new("TYPE", alert.notification_type.as_str()),
                TeamsFact::new("OUTPUT", &alert.service_output),
                TeamsFact::new("SOURCE", &config.teams_source),
            ],
            markdown: true,
        };

        let potential_action = if is_acknowledgeable(color, &config.colors) {
            vec![TeamsPotentialAction {
                action_type: "OpenUri".to_string(),
                name: "Acknowledge".to_string(),
                targets: vec![TeamsTarget {
                    os: "default".to_string(),
                    uri: ack_url(&config.nagios_ack_url, alert),
                }],
            }]
        } else {
            Vec::new()
        };

        Self {
            card_type: MESSAGE_CARD_TYPE.to_string(),
            context: MESSAGE_CARD_CONTEXT.to_string(),
            theme_color: color.to_string(),
            summary,
            sections: vec![section],
            potential_action,
        }
    }
}
