use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use devfeed_core::ContactForm;
use devfeed_engine::{contact_router, ContactRelay, RelayError, SmtpMailer};
use feed_logging::feed_info;
use tokio::net::TcpListener;

use crate::config::AppConfig;

fn smtp_relay(config: &AppConfig) -> Result<ContactRelay> {
    let mailer = SmtpMailer::new(config.smtp_settings()?).context("failed to configure SMTP")?;
    Ok(ContactRelay::new(Arc::new(mailer)))
}

/// Hosts `POST /api/contact` until Ctrl-C.
pub async fn serve(config: &AppConfig, bind: SocketAddr) -> Result<()> {
    let router = contact_router(smtp_relay(config)?);
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    feed_info!("contact relay listening on {}", bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Validates and relays one message from the command line.
pub async fn send_once(config: &AppConfig, form: ContactForm) -> Result<()> {
    // Report field errors before asking for credentials.
    if let Err(err) = form.validate() {
        bail!("{err}");
    }
    match smtp_relay(config)?.submit(&form).await {
        Ok(()) => {
            println!("Message sent successfully");
            Ok(())
        }
        Err(RelayError::Validation(err)) => bail!("{err}"),
        Err(err) => Err(err).context("Failed to send message"),
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        feed_info!("shutdown requested");
    }
}
