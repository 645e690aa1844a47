use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("item index {index} is out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("missing configuration: {0}")]
    ConfigurationMissing(String),
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}
