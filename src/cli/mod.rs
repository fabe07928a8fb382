//! CLI command definitions and handlers

pub mod list;
pub mod lookup;

use crate::registry::{AuthChain, ClientConfig, Credentials, RegistryClient, Scheme, StatusPolicy};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Harbor Lookup - find tags that share an image digest
#[derive(Parser)]
#[command(name = "harbor-lookup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Find every tag sharing the source tag's digest
    Lookup(lookup::LookupArgs),

    /// List a repository's tags and digests
    List(list::ListArgs),
}

/// Registry connection options shared by all commands
#[derive(Args)]
pub struct RegistryArgs {
    /// Registry host, without scheme (e.g. harbor.example.com)
    #[arg(long, env = "HARBOR_HOST")]
    pub registry_host: String,

    /// Repository path (e.g. project/image)
    #[arg(long, env = "HARBOR_REPOSITORY")]
    pub repository: String,

    /// Username for HTTP basic authentication
    #[arg(long, env = "HARBOR_USERNAME")]
    pub registry_username: Option<String>,

    /// Password for HTTP basic authentication
    #[arg(long, env = "HARBOR_PASSWORD", hide_env_values = true)]
    pub registry_password: Option<String>,

    /// Do not send the built-in service credential
    #[arg(long)]
    pub no_builtin_auth: bool,

    /// Decode the response body even when the registry returns an error status
    #[arg(long)]
    pub ignore_status: bool,

    /// Request timeout in seconds (transport default when unset)
    #[arg(long, env = "HARBOR_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Talk plain HTTP instead of HTTPS
    #[arg(long)]
    pub plain_http: bool,
}

impl RegistryArgs {
    /// Transport settings derived from the flags
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            scheme: if self.plain_http {
                Scheme::Http
            } else {
                Scheme::Https
            },
            timeout: self.timeout.map(Duration::from_secs),
            status_policy: if self.ignore_status {
                StatusPolicy::Ignore
            } else {
                StatusPolicy::RequireSuccess
            },
            ..ClientConfig::default()
        }
    }

    pub fn client(&self) -> crate::Result<RegistryClient> {
        RegistryClient::with_config(self.client_config())
    }

    /// Authentication layers derived from the flags
    pub fn auth(&self) -> AuthChain {
        let credentials = Credentials::from_parts(
            self.registry_username.clone(),
            self.registry_password.clone(),
        );
        AuthChain::standard(credentials, !self.no_builtin_auth)
    }
}
