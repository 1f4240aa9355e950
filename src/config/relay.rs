use crate::adapters::{HttpApiMailer, SmtpMailer};
use crate::core::relay::{ContactRelay, RelayTarget};
use crate::domain::model::MailIdentity;
use crate::domain::ports::Mailer;
use crate::utils::error::{FolioError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SMTP_SERVICE: &str = "gmail";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTransport {
    Smtp { host: String, port: Option<u16> },
    HttpApi { url: String },
}

/// Relay settings sourced from the process environment.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub identity: Option<MailIdentity>,
    pub target_email: Option<String>,
    pub port: u16,
    pub transport: MailTransport,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以任意查詢函式建立設定，測試時不必改動行程環境變數
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空字串視同未設定
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let identity = match (var("EMAIL_USER"), var("EMAIL_PASS")) {
            (Some(user), Some(password)) => Some(MailIdentity { user, password }),
            _ => None,
        };

        let port = match var("PORT") {
            Some(raw) => parse_port("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let transport = match var("MAIL_TRANSPORT").as_deref() {
            None | Some("smtp") => {
                let host = match var("SMTP_HOST") {
                    Some(host) => host,
                    None => {
                        let service =
                            var("SMTP_SERVICE").unwrap_or_else(|| DEFAULT_SMTP_SERVICE.to_string());
                        crate::adapters::smtp::service_host(&service)
                            .ok_or_else(|| FolioError::InvalidConfigValueError {
                                field: "SMTP_SERVICE".to_string(),
                                value: service.clone(),
                                reason: "Unknown mail service, set SMTP_HOST instead".to_string(),
                            })?
                            .to_string()
                    }
                };
                let port = var("SMTP_PORT")
                    .map(|raw| parse_port("SMTP_PORT", &raw))
                    .transpose()?;
                MailTransport::Smtp { host, port }
            }
            Some("http") => MailTransport::HttpApi {
                url: var("MAIL_API_URL").ok_or_else(|| FolioError::MissingConfigError {
                    field: "MAIL_API_URL".to_string(),
                })?,
            },
            Some(other) => {
                return Err(FolioError::InvalidConfigValueError {
                    field: "MAIL_TRANSPORT".to_string(),
                    value: other.to_string(),
                    reason: "Expected 'smtp' or 'http'".to_string(),
                })
            }
        };

        Ok(Self {
            identity,
            target_email: var("TARGET_EMAIL"),
            port,
            transport,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.identity.is_some()
    }

    /// Recipient of relayed messages: the override address, else the account itself.
    pub fn recipient(&self) -> Option<&str> {
        self.target_email
            .as_deref()
            .or(self.identity.as_ref().map(|id| id.user.as_str()))
    }

    pub fn build_mailer(&self, identity: &MailIdentity) -> Result<Arc<dyn Mailer>> {
        let mailer: Arc<dyn Mailer> = match &self.transport {
            MailTransport::Smtp { host, port } => {
                Arc::new(SmtpMailer::new(host, *port, identity)?)
            }
            MailTransport::HttpApi { url } => {
                Arc::new(HttpApiMailer::new(url.clone(), identity.password.clone()))
            }
        };
        Ok(mailer)
    }

    /// Build the relay. Missing credentials yield a degraded relay, not an error.
    pub fn build_relay(&self) -> Result<ContactRelay> {
        let Some(identity) = &self.identity else {
            tracing::warn!(
                "⚠️ EMAIL_USER or EMAIL_PASS not set. Server will reject requests until configured."
            );
            return Ok(ContactRelay::unconfigured());
        };

        let mailer = self.build_mailer(identity)?;
        let target = RelayTarget {
            account: identity.user.clone(),
            recipient: self.recipient().unwrap_or(&identity.user).to_string(),
        };
        tracing::info!("📮 Relaying contact messages to {} via {}", target.recipient, mailer.name());
        Ok(ContactRelay::new(mailer, target))
    }
}

fn parse_port(field: &str, raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| FolioError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: format!("Not a valid port: {}", e),
        })
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_range("PORT", self.port, 1, u16::MAX)?;

        match &self.transport {
            MailTransport::Smtp { port: Some(port), .. } => {
                validate_range("SMTP_PORT", *port, 1, u16::MAX)?;
            }
            MailTransport::Smtp { port: None, .. } => {}
            MailTransport::HttpApi { url } => validate_url("MAIL_API_URL", url)?,
        }

        Ok(())
    }
}
