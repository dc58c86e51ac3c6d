//! Best-effort outbound notifications.
//!
//! Mail is dispatched on a detached task after the state transition that
//! triggered it has committed. A delivery failure is logged and swallowed;
//! it never rolls back or fails the request.

use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config;
use crate::database::models::User;

/// Notify a user that their account was approved. Fire-and-forget.
pub fn send_approval_notice(user: &User) {
    let name = user.name.clone();
    let email = user.email.clone();

    tokio::spawn(async move {
        if let Err(e) = deliver_approval(&name, &email).await {
            tracing::warn!("approval notification to {} failed: {}", email, e);
        }
    });
}

async fn deliver_approval(name: &str, email: &str) -> Result<(), anyhow::Error> {
    let mail = &config::config().mail;

    let Some(host) = mail.smtp_host.as_deref() else {
        tracing::debug!("SMTP_HOST not configured; skipping approval notice");
        return Ok(());
    };

    let message = Message::builder()
        .from(mail.from_address.parse()?)
        .to(email.parse()?)
        .subject("Your account has been approved")
        .body(format!(
            "Hello {name},\n\n\
             Your account has been approved. You can now sign in.\n"
        ))?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        .port(mail.smtp_port)
        .build();

    mailer.send(message).await?;
    tracing::info!("approval notice sent to {}", email);
    Ok(())
}
