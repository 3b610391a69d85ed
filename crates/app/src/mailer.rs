//! Outgoing email. Nothing is actually delivered: [`SimulatedMailer`] keeps an
//! outbox in memory and logs each message.

use std::sync::RwLock;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("email has no recipient")]
    MissingRecipient,
    #[error("outbox unavailable")]
    OutboxUnavailable,
}

pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

#[derive(Debug, Default)]
pub struct SimulatedMailer {
    outbox: RwLock<Vec<EmailMessage>>,
}

impl SimulatedMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages "sent" so far, oldest first.
    pub fn sent(&self) -> Result<Vec<EmailMessage>, MailError> {
        self.outbox
            .read()
            .map(|outbox| outbox.clone())
            .map_err(|_| MailError::OutboxUnavailable)
    }
}

impl Mailer for SimulatedMailer {
    fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        if message.to.trim().is_empty() {
            return Err(MailError::MissingRecipient);
        }

        let mut outbox = self
            .outbox
            .write()
            .map_err(|_| MailError::OutboxUnavailable)?;
        outbox.push(message.clone());

        tracing::info!(to = %message.to, subject = %message.subject, "email sent (simulated)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            subject: "Invoice INV-1".to_string(),
            body: "Dear Acme Corporation".to_string(),
        }
    }

    #[test]
    fn records_messages_in_order() {
        let mailer = SimulatedMailer::new();
        mailer.send(&message("a@example.com")).unwrap();
        mailer.send(&message("b@example.com")).unwrap();

        let to: Vec<_> = mailer.sent().unwrap().into_iter().map(|m| m.to).collect();
        assert_eq!(to, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn poisoned_outbox_is_unavailable_for_reads_and_writes() {
        let mailer = SimulatedMailer::new();
        mailer.send(&message("a@example.com")).unwrap();

        std::thread::scope(|s| {
            let poisoner = s.spawn(|| {
                let _guard = mailer.outbox.write().unwrap();
                panic!("writer died holding the outbox");
            });
            assert!(poisoner.join().is_err());
        });

        assert_eq!(mailer.sent(), Err(MailError::OutboxUnavailable));
        assert_eq!(
            mailer.send(&message("b@example.com")),
            Err(MailError::OutboxUnavailable)
        );
    }

    #[test]
    fn blank_recipient_is_rejected() {
        let mailer = SimulatedMailer::new();
        assert_eq!(mailer.send(&message("  ")), Err(MailError::MissingRecipient));
        assert!(mailer.sent().unwrap().is_empty());
    }
}
