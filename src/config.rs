use anyhow::{bail, Result};
use std::env;
use url::Url;

use crate::cli::Cli;

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub csrf_token: Option<String>,
    pub assume_yes: bool,
}

impl ClientConfig {
    pub fn load_from_cli(cli: &Cli) -> Result<Self> {
        Self::resolve(
            cli.url.clone(),
            cli.csrf_token.clone(),
            cli.yes,
            |name| env::var(name).ok(),
        )
    }

    fn resolve(
        url: Option<String>,
        csrf_token: Option<String>,
        assume_yes: bool,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let base_url = url
            .or_else(|| env_var("FILE_MANAGER_URL"))
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let csrf_token = csrf_token
            .or_else(|| env_var("FILE_MANAGER_CSRF_TOKEN"))
            .filter(|t| !t.is_empty());

        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => bail!("Unsupported URL scheme '{}' in {}", url.scheme(), base_url),
            Err(e) => bail!("Invalid file manager URL {}: {}", base_url, e),
        }

        Ok(ClientConfig {
            base_url,
            csrf_token,
            assume_yes,
        })
    }
}
