pub mod ack;
pub mod alert;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod relay;
pub mod severity;
pub mod slack;
pub mod teams;

pub use alert::{AlertRecord, InvocationMode, NotificationType};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use relay::{parse_invocation, relay, DeliveryStatus, RelaySummary};
pub use slack::SlackMessage;
pub use teams::TeamsMessage;
