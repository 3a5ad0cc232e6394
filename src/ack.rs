use crate::alert::AlertRecord;
use log::debug;
use url::form_urlencoded;

/// Nagios `cmd_typ` for acknowledging a service problem.
pub const ACK_SERVICE_CMD: &str = "34";
/// Nagios `cmd_typ` for acknowledging a host problem.
pub const ACK_HOST_CMD: &str = "33";

/// Escapes a query value the way Nagios' CGI links expect: space becomes
/// `+`, `*` is percent-encoded and `~` is left alone.
pub fn query_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Deep link into the Nagios CGI that acknowledges this alert.
/// `base` is expected to end with `cmd_typ=`.
pub fn ack_url(base: &str, alert: &AlertRecord) -> String {
    let url = if alert.mode.is_service() {
        format!(
            "{}{}&host={}&service={}",
            base,
            ACK_SERVICE_CMD,
            query_escape(&alert.host_alias),
            query_escape(&alert.service_desc)
        )
    } else {
        format!("{}{}&host={}", base, ACK_HOST_CMD, query_escape(&alert.host_alias))
    };
    debug!("ackURL: {}", url);
    url
}
