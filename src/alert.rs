use std::fmt;

/// Positions in the invocation argument vector handed over by Nagios.
pub mod position {
    pub const MODE: usize = 0;
    pub const NAGIOS_HOST: usize = 1;
    pub const SLACK_CHANNEL: usize = 2;
    pub const NOTIFICATION_TYPE: usize = 3;
    pub const SERVICE_DESC: usize = 4;
    pub const HOST_ALIAS: usize = 5;
    pub const HOST_ADDRESS: usize = 6;
    pub const SERVICE_STATE: usize = 7;
    pub const LONG_DATE_TIME: usize = 8;
    pub const SERVICE_OUTPUT: usize = 9;
    pub const NOTIFICATION_COMMENTS: usize = 10;
    /// Reserved; never read but part of the arity Nagios commands are written against.
    pub const MAX_INPUT: usize = 11;
}

/// Minimum arity of the invocation vector. Shorter vectors are padded with
/// empty strings up to this length instead of being rejected.
pub const REQUIRED_ARGS: usize = position::MAX_INPUT + 1;

pub const SERVICE_MODE_SENTINEL: &str = "SERVICE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationType {
    Problem,
    Recovery,
    Acknowledgement,
    FlappingStart,
    FlappingStop,
    FlappingDisabled,
    DowntimeStart,
    DowntimeStop,
    DowntimeCancelled,
    Other(String),
}

impl NotificationType {
    /// Exact, case-sensitive match on the Nagios macro value.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PROBLEM" => Self::Problem,
            "RECOVERY" => Self::Recovery,
            "ACKNOWLEDGEMENT" => Self::Acknowledgement,
            "FLAPPINGSTART" => Self::FlappingStart,
            "FLAPPINGSTOP" => Self::FlappingStop,
            "FLAPPINGDISABLED" => Self::FlappingDisabled,
            "DOWNTIMESTART" => Self::DowntimeStart,
            "DOWNTIMESTOP" => Self::DowntimeStop,
            "DOWNTIMECANCELLED" => Self::DowntimeCancelled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Problem => "PROBLEM",
            Self::Recovery => "RECOVERY",
            Self::Acknowledgement => "ACKNOWLEDGEMENT",
            Self::FlappingStart => "FLAPPINGSTART",
            Self::FlappingStop => "FLAPPINGSTOP",
            Self::FlappingDisabled => "FLAPPINGDISABLED",
            Self::DowntimeStart => "DOWNTIMESTART",
            Self::DowntimeStop => "DOWNTIMESTOP",
            Self::DowntimeCancelled => "DOWNTIMECANCELLED",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    Host,
    Service,
}

impl InvocationMode {
    pub fn from_sentinel(raw: &str) -> Self {
        if raw == SERVICE_MODE_SENTINEL {
            Self::Service
        } else {
            Self::Host
        }
    }

    pub fn is_service(self) -> bool {
        self == Self::Service
    }
}

impl fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => f.write_str("Host mode"),
            Self::Service => f.write_str("Service mode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub mode: InvocationMode,
    pub notification_type: NotificationType,
    pub service_desc: String,
    pub host_alias: String,
    pub host_address: String,
    pub service_state: String,
    pub long_date_time: String,
    pub service_output: String,
    pub notification_comments: String,
}

impl AlertRecord {
    /// Builds the record from the positional vector. Missing trailing
    /// arguments read as empty strings; malformed input is never rejected.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let field = |index: usize| -> String {
            args.get(index)
                .map(|value| value.as_ref().to_string())
                .unwrap_or_default()
        };

        Self {
            mode: InvocationMode::from_sentinel(&field(position::MODE)),
            notification_type: NotificationType::parse(&field(position::NOTIFICATION_TYPE)),
            service_desc: field(position::SERVICE_DESC),
            host_alias: field(position::HOST_ALIAS),
            host_address: field(position::HOST_ADDRESS),
            service_state: field(position::SERVICE_STATE),
            long_date_time: field(position::LONG_DATE_TIME),
            service_output: field(position::SERVICE_OUTPUT),
            notification_comments: field(position::NOTIFICATION_COMMENTS),
        }
    }
}

/// Number of trailing arguments that will be padded, if any.
pub fn missing_args(supplied: usize) -> usize {
    REQUIRED_ARGS.saturating_sub(supplied)
}
