use anyhow::{Context, Result, bail};

use super::{client, notifier};
use crate::api::ApiClient;
use crate::auth::AuthSession;
use crate::config::Settings;

/// The session cookie lives only as long as the process, so commands that
/// need one authenticate up front from the configured credentials.
pub(crate) async fn ensure_session(settings: &Settings, client: &ApiClient) -> Result<AuthSession> {
    let mut session = AuthSession::new(client.clone(), notifier());
    let (Some(email), Some(password)) = (&settings.email, &settings.password) else {
        bail!("set AUDIOSHELF_EMAIL and AUDIOSHELF_PASSWORD to use this command");
    };
    session
        .login(email, password)
        .await
        .context("could not establish a session")?;
    Ok(session)
}

pub async fn login(settings: &Settings, email: &str, password: Option<&str>) -> Result<()> {
    let password = password
        .map(str::to_string)
        .or_else(|| settings.password.clone())
        .context("pass --password or set AUDIOSHELF_PASSWORD")?;

    let mut session = AuthSession::new(client(settings)?, notifier());
    let user = session.login(email, &password).await?;
    println!("Logged in as {}", user.email);
    Ok(())
}

pub async fn register(settings: &Settings, email: &str, password: Option<&str>) -> Result<()> {
    let password = password
        .map(str::to_string)
        .or_else(|| settings.password.clone())
        .context("pass --password or set AUDIOSHELF_PASSWORD")?;

    let mut session = AuthSession::new(client(settings)?, notifier());
    let user = session.register(email, &password).await?;
    println!("Registered as {}", user.email);
    Ok(())
}

pub async fn whoami(settings: &Settings) -> Result<()> {
    let client = client(settings)?;
    let session = ensure_session(settings, &client).await?;
    match session.current_user() {
        Some(user) => println!("{} (id {})", user.email, user.id),
        None => println!("Not logged in."),
    }
    Ok(())
}
