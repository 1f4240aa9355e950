// Adapters layer: concrete mail transports behind the `Mailer` port.

pub mod http_api;
pub mod smtp;

pub use http_api::HttpApiMailer;
pub use smtp::SmtpMailer;
