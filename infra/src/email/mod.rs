//! Email delivery - SMTP implementation of the EmailNotifier trait

pub mod smtp;

pub use smtp::{SmtpConfig, SmtpNotifier};
