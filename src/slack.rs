use log::debug;
use serde::{Deserialize, Serialize};

use crate::ack::ack_url;
use crate::alert::AlertRecord;
use crate::config::Config;
use crate::severity::{is_acknowledgeable, urgency_color};

pub const ACK_CONFIRM_TITLE: &str = "Are you sure?";
pub const ACK_CONFIRM_TEXT: &str =
    "This acknowledges the alarm on Nagios, thus muting notifications until a change occurs.";

/// Incoming-webhook message with legacy attachments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlackMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub channel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon_emoji: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    pub pretext: String,
    pub author_name: String,
    pub author_link: String,
    pub author_icon: String,
    pub title: String,
    pub title_link: String,
    pub text: String,
    pub image_url: String,
    pub fields: Vec<Field>,
    pub footer: String,
    pub footer_icon: String,
    pub ts: i64,
    pub mrkdwn_in: Option<Vec<String>>,
    pub actions: Option<Vec<Action>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Action {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub text: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub style: String,
    pub confirm: ConfirmFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfirmFields {
    pub title: String,
    pub text: String,
    pub ok_text: String,
    pub dismiss_text: String,
}

impl SlackMessage {
    pub fn from_alert(alert: &AlertRecord, config: &Config) -> Self {
        let color = urgency_color(&alert.notification_type, &config.colors);
        let (fallback, title, value) = summarize(alert);

        let mut attachment = Attachment {
            fallback,
            color: color.to_string(),
            fields: vec![Field { title, value, short: false }],
            footer: config.slack_nagios_link.clone(),
            ..Default::default()
        };

        if is_acknowledgeable(color, &config.colors) {
            attachment.add_action(Action::acknowledge(ack_url(&config.nagios_ack_url, alert)));
        }

        let mut message = SlackMessage {
            channel: config.slack_channel.clone(),
            username: config.slack_username.clone(),
            icon_url: config.slack_icon_url.clone(),
            ..Default::default()
        };
        message.add_attachment(attachment);
        message
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }
}

impl Attachment {
    pub fn add_action(&mut self, action: Action) {
        self.actions.get_or_insert_with(Vec::new).push(action);
    }
}

impl Action {
    pub fn acknowledge(url: String) -> Self {
        Self {
            action_type: "button".to_string(),
            text: "ACKNOWLEDGE".to_string(),
            url,
            style: "primary".to_string(),
            confirm: ConfirmFields {
                title: ACK_CONFIRM_TITLE.to_string(),
                text: ACK_CONFIRM_TEXT.to_string(),
                ok_text: "Yes".to_string(),
                dismiss_text: "No".to_string(),
            },
            ..Default::default()
        }
    }
}

/// Returns the fallback, field title and field value for the attachment.
fn summarize(alert: &AlertRecord) -> (String, String, String) {
    let (fallback, title, value) = if alert.mode.is_service() {
        let title = format!(
            "{} ({}) - {} - {}",
            alert.host_alias, alert.host_address, alert.service_desc, alert.notification_type
        );
        let value = format!("{} {}", alert.notification_comments, alert.service_output);
        let fallback = format!(
            "{} ({}) - {} - {} - {}\n{}",
            alert.host_alias,
            alert.host_address,
            alert.service_desc,
            alert.notification_type,
            alert.long_date_time,
            value
        );
        (fallback, title, value)
    } else {
        let title = format!(
            "{} ({}) - {}",
            alert.host_alias, alert.host_address, alert.notification_type
        );
        let fallback = format!(
            "{} ({}) - {} - {}\n{}",
            alert.host_alias,
            alert.host_address,
            alert.notification_type,
            alert.long_date_time,
            alert.service_output
        );
        (fallback, title, alert.service_output.clone())
    };

    debug!("Fallback: {}", fallback);
    debug!("Title: {}", title);
    debug!("Value: {}", value);
    (fallback, title, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn config() -> Config {
        Config {
            slack_channel: "#ops".to_string(),
            slack_username: "nagios-bot".to_string(),
            slack_icon_url: "https://example.com/icon.png".to_string(),
            slack_nagios_link: "<https://nagios.example.com|Nagios>".to_string(),
            nagios_ack_url: "https://nagios.example.com/cgi-bin/cmd.cgi?cmd_typ=".to_string(),
            ..Config::default()
        }
    }

    fn alert(mode: &str, kind: &str) -> AlertRecord {
        AlertRecord::from_args(&[
            mode,
            "",
            "",
            kind,
            "CPU Load",
            "web01",
            "10.0.0.5",
            "CRITICAL",
            "2024-01-01 00:00:00",
            "100% load",
            "looking",
        ])
    }

    #[test]
    fn test_service_problem_message() {
        let message = SlackMessage::from_alert(&alert("SERVICE", "PROBLEM"), &config());

        assert_eq!(message.channel, "#ops");
        assert_eq!(message.username, "nagios-bot");
        assert_eq!(message.icon_url, "https://example.com/icon.png");
        assert_eq!(message.attachments.len(), 1);

        let attachment = &message.attachments[0];
        assert_eq!(attachment.color, "danger");
        assert_eq!(
            attachment.fallback,
            "web01 (10.0.0.5) - CPU Load - PROBLEM - 2024-01-01 00:00:00\nlooking 100% load"
        );
        assert_eq!(attachment.fields.len(), 1);
        assert_eq!(attachment.fields[0].title, "web01 (10.0.0.5) - CPU Load - PROBLEM");
        assert_eq!(attachment.fields[0].value, "looking 100% load");
        assert!(!attachment.fields[0].short);
        assert_eq!(attachment.footer, "<https://nagios.example.com|Nagios>");

        let actions = attachment.actions.as_ref().expect("acknowledge action");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, "button");
        assert_eq!(actions[0].text, "ACKNOWLEDGE");
        assert_eq!(actions[0].style, "primary");
        assert_eq!(
            actions[0].url,
            "https://nagios.example.com/cgi-bin/cmd.cgi?cmd_typ=34&host=web01&service=CPU+Load"
        );
        assert_eq!(actions[0].confirm.title, "Are you sure?");
        assert_eq!(actions[0].confirm.ok_text, "Yes");
        assert_eq!(actions[0].confirm.dismiss_text, "No");
    }

    #[test]
    fn test_host_message_omits_service_and_comments() {
        let message = SlackMessage::from_alert(&alert("0", "PROBLEM"), &config());
        let attachment = &message.attachments[0];

        assert_eq!(
            attachment.fallback,
            "web01 (10.0.0.5) - PROBLEM - 2024-01-01 00:00:00\n100% load"
        );
        assert_eq!(attachment.fields[0].title, "web01 (10.0.0.5) - PROBLEM");
        assert_eq!(attachment.fields[0].value, "100% load");

        let actions = attachment.actions.as_ref().expect("acknowledge action");
        assert!(actions[0].url.ends_with("cmd_typ=33&host=web01"));
    }

    #[test]
    fn test_no_acknowledge_for_non_problem_colors() {
        for kind in ["RECOVERY", "ACKNOWLEDGEMENT", "FLAPPINGSTART", "DOWNTIMESTART", ""] {
            let message = SlackMessage::from_alert(&alert("SERVICE", kind), &config());
            assert!(message.attachments[0].actions.is_none(), "{kind:?}");
        }
    }

    #[test]
    fn test_wire_shape() -> anyhow::Result<()> {
        let mut config = config();
        config.slack_icon_url.clear();
        let message = SlackMessage::from_alert(&alert("SERVICE", "RECOVERY"), &config);
        let json: Value = serde_json::to_value(&message)?;

        assert_eq!(json["text"], "");
        assert!(json.get("icon_url").is_none());
        assert!(json.get("icon_emoji").is_none());

        let attachment = &json["attachments"][0];
        assert_eq!(attachment["color"], "good");
        assert_eq!(attachment["pretext"], "");
        assert_eq!(attachment["ts"], 0);
        assert!(attachment["actions"].is_null());
        assert!(attachment["mrkdwn_in"].is_null());
        assert_eq!(attachment["fields"][0]["short"], false);

        Ok(())
    }

    #[test]
    fn test_acknowledge_action_wire_shape() -> anyhow::Result<()> {
        let action = Action::acknowledge("https://nagios/ack".to_string());
        let json: Value = serde_json::to_value(&action)?;

        assert_eq!(json["type"], "button");
        assert_eq!(json["url"], "https://nagios/ack");
        assert!(json.get("name").is_none());
        assert!(json.get("value").is_none());
        assert_eq!(json["confirm"]["text"], ACK_CONFIRM_TEXT);
        assert_eq!(json["confirm"]["dismiss_text"], "No");

        Ok(())
    }
}
