//! `legalis auth`

use crate::auth::{SessionManager, User};
use crate::cli::AuthCommand;
use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

fn describe(user: &User) -> String {
    format!(
        "{} <{}> ({} plan, joined {})",
        user.name.bold(),
        user.email,
        user.plan,
        user.joined_at.format("%Y-%m-%d")
    )
}

/// Handle account commands
///
/// # Errors
///
/// Returns validation or authentication errors from the account flows
pub async fn handle_auth(config: &Config, command: AuthCommand) -> Result<()> {
    let sessions = SessionManager::from_config(open_store(config)?, &config.auth);

    match command {
        AuthCommand::Signup {
            name,
            email,
            password,
        } => {
            let user = sessions.signup(&name, &email, &password).await?;
            println!("{} {}", "Account created:".green(), describe(&user));
        }
        AuthCommand::Login { email, password } => {
            let user = sessions.login(&email, &password).await?;
            println!("{} {}", "Logged in:".green(), describe(&user));
        }
        AuthCommand::Logout => {
            sessions.logout()?;
            println!("{}", "Logged out.".green());
        }
        AuthCommand::Whoami => match sessions.current_user() {
            Some(user) => println!("{}", describe(&user)),
            None => println!("{}", "Not logged in.".yellow()),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LegalisError;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.storage.path = Some(dir.path().join("store.db"));
        config.auth.signup_latency_ms = 0;
        config.auth.login_latency_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_signup_then_login_flow() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        handle_auth(
            &config,
            AuthCommand::Signup {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap();
        handle_auth(&config, AuthCommand::Logout).await.unwrap();
        handle_auth(
            &config,
            AuthCommand::Login {
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap();
        handle_auth(&config, AuthCommand::Whoami).await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_login_reports_authentication_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let err = handle_auth(
            &config,
            AuthCommand::Login {
                email: "nobody@example.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LegalisError>(),
            Some(LegalisError::Authentication(_))
        ));
    }
}
