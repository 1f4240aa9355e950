pub mod relay;

pub use crate::domain::model::{ContactSubmission, OutgoingMail};
pub use crate::domain::ports::Mailer;
pub use crate::utils::error::Result;
pub use relay::{ContactRelay, RelayError, RelayTarget};
