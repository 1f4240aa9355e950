use crate::domain::model::{MailIdentity, OutgoingMail};
use crate::domain::ports::Mailer;
use crate::utils::error::Result;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Resolve a well-known service name to its SMTP relay host.
pub fn service_host(service: &str) -> Option<&'static str> {
    match service.to_ascii_lowercase().as_str() {
        "gmail" => Some("smtp.gmail.com"),
        "outlook" | "hotmail" => Some("smtp-mail.outlook.com"),
        "yahoo" => Some("smtp.mail.yahoo.com"),
        "icloud" => Some("smtp.mail.me.com"),
        _ => None,
    }
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    account: Address,
}

impl SmtpMailer {
    pub fn new(host: &str, port: Option<u16>, identity: &MailIdentity) -> Result<Self> {
        let account: Address = identity.user.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?;
        if let Some(port) = port {
            builder = builder.port(port);
        }
        let transport = builder
            .credentials(Credentials::new(
                identity.user.clone(),
                identity.password.clone(),
            ))
            .build();

        tracing::debug!("SMTP transport configured for {}", host);
        Ok(Self { transport, account })
    }

    pub fn build_message(&self, mail: &OutgoingMail) -> Result<Message> {
        let from = sender_mailbox(mail, &self.account);
        let to: Mailbox = mail.to.parse()?;

        let mut builder = Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.clone());

        if let Some(reply_to) = mail.reply_to.as_deref() {
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(e) => tracing::warn!("Ignoring unparseable reply-to {:?}: {}", reply_to, e),
            }
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            mail.text.clone(),
            mail.html.clone(),
        ))?;
        Ok(message)
    }
}

// 訪客填的 email 不合法時改用帳號本身的地址
fn sender_mailbox(mail: &OutgoingMail, account: &Address) -> Mailbox {
    let address = mail
        .from
        .address
        .parse::<Address>()
        .unwrap_or_else(|e| {
            tracing::warn!(
                "Visitor address {:?} is invalid ({}), sending as account",
                mail.from.address,
                e
            );
            account.clone()
        });
    Mailbox::new(Some(mail.from.name.clone()), address)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = self.build_message(mail)?;
        let response = self.transport.send(message).await?;
        tracing::debug!("SMTP response code: {}", response.code());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
