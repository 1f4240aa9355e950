use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("SMTP transport error: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Mail address error: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("Mail build error: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Mail provider rejected message: {message}")]
    DeliveryError { message: String },
}

impl FolioError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FolioError::HttpError(_) | FolioError::SmtpError(_) | FolioError::DeliveryError { .. } => {
                "Could not reach the mail provider".to_string()
            }
            FolioError::AddressError(_) | FolioError::MessageError(_) => {
                "Could not build the outgoing message".to_string()
            }
            FolioError::IoError(e) => format!("File access failed: {}", e),
            FolioError::SerializationError(_) | FolioError::TomlError(_) => {
                "Could not parse the input file".to_string()
            }
            FolioError::InvalidConfigValueError { field, reason, .. } => {
                format!("{} is invalid: {}", field, reason)
            }
            FolioError::MissingConfigError { field } => format!("{} must be set", field),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
