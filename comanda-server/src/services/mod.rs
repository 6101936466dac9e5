//! External collaborator services
//!
//! - [`mailer`] - fire-and-forget mail relay client
//! - [`avatar`] - gravatar URL resolution

pub mod avatar;
pub mod mailer;

pub use mailer::{MailerConfig, MailerService};
