//! `auth` commands: store and remove service credentials.

use crate::cli::{AuthCommand, LoginArgs};
use crate::client::{linkding, miniflux, wallabag};
use crate::commands::{Context, print_success};
use crate::config::{self, ApiKeyConfig, Config, Service, WallabagConfig};
use crate::error::{Error, Result};

pub fn run(cmd: &AuthCommand, ctx: &Context) -> Result<()> {
    match cmd {
        AuthCommand::Login(args) => login(args, ctx),
        AuthCommand::Logout { service } => logout(service, ctx),
    }
}

/// Verify the given credentials against the service, then save them.
fn login(args: &LoginArgs, ctx: &Context) -> Result<()> {
    let service: Service = args.service.parse()?;
    let endpoint = args.endpoint.trim().to_string();
    if endpoint.is_empty() {
        return Err(Error::InvalidArgument("--endpoint must not be empty".into()));
    }

    // Re-read the file so logins made since startup are kept.
    let mut config = Config::load(&ctx.config_path)?;

    match service {
        Service::Miniflux | Service::Linkding => {
            let creds = ApiKeyConfig {
                endpoint,
                api_key: required(&args.api_key, "--api-key", service)?,
            };
            if service == Service::Miniflux {
                miniflux::Client::new(&creds)
                    .validate()
                    .map_err(|e| verify_failed(service, e))?;
                config.miniflux = creds;
            } else {
                linkding::Client::new(&creds)
                    .validate()
                    .map_err(|e| verify_failed(service, e))?;
                config.linkding = creds;
            }
        }
        Service::Wallabag => {
            let creds = WallabagConfig {
                endpoint,
                client_id: required(&args.client_id, "--client-id", service)?,
                client_secret: required(&args.client_secret, "--client-secret", service)?,
                username: required(&args.username, "--username", service)?,
                password: required(&args.password, "--password", service)?,
            };
            wallabag::Client::connect(&creds).map_err(|e| verify_failed(service, e))?;
            config.wallabag = creds;
        }
    }

    config.save(&ctx.config_path)?;
    tracing::info!(%service, "credentials stored");
    print_success("Configuration saved successfully");
    Ok(())
}

fn logout(service: &str, ctx: &Context) -> Result<()> {
    let service: Service = service.parse()?;
    config::remove_service(&ctx.config_path, service)?;
    print_success(&format!("Logged out from {} successfully", service));
    Ok(())
}

/// A trimmed, non-empty flag value.
fn required(value: &Option<String>, flag: &str, service: Service) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::InvalidArgument(format!(
            "{} is required for {}",
            flag, service
        ))),
    }
}

/// Prefix a validation failure with the service it came from.
fn verify_failed(service: Service, err: Error) -> Error {
    match err {
        Error::Api { status, message } => Error::Api {
            status,
            message: format!("failed to verify {} connection: {}", service, message),
        },
        Error::Network(message) => {
            Error::Network(format!("failed to verify {} connection: {}", service, message))
        }
        other => other,
    }
}
