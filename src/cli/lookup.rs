//! `harbor-lookup lookup` command implementation

use crate::cli::RegistryArgs;
use crate::registry::{AuthChain, RegistryClient};
use crate::resolver::{self, Resolution};
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Arguments for the `lookup` command
#[derive(Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Tag whose duplicates should be found
    #[arg(long, env = "HARBOR_SRC_TAG")]
    pub src_tag: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// How the result is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON document
    Json,
    /// Indented JSON document
    Pretty,
    /// One alternative tag per line
    Text,
}

/// Result handed back to the calling automation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupOutput {
    /// True when other tags share the source tag's digest
    pub changed: bool,
    pub src_tag: String,
    pub tags: Vec<String>,
    pub alternative_tags: Vec<String>,
}

impl From<Resolution> for LookupOutput {
    fn from(resolution: Resolution) -> Self {
        Self {
            changed: resolution.has_duplicates(),
            src_tag: resolution.src_tag,
            tags: resolution.tags,
            alternative_tags: resolution.alternative_tags,
        }
    }
}

/// Failure document written in JSON modes
#[derive(Debug, Serialize)]
struct FailureOutput<'a> {
    failed: bool,
    msg: &'a str,
}

/// Fetch the listing and resolve the duplicates of `src_tag`
pub async fn find_duplicate_tags(
    client: &RegistryClient,
    host: &str,
    repository: &str,
    auth: &AuthChain,
    src_tag: &str,
) -> crate::Result<LookupOutput> {
    if src_tag.is_empty() {
        return Err(crate::LookupError::InvalidArgument(
            "source tag must not be empty".to_string(),
        ));
    }

    let records = client.fetch_tags(host, repository, auth).await?;
    let resolution = resolver::resolve(&records, src_tag);

    tracing::info!(
        repository,
        src_tag,
        duplicates = resolution.alternative_tags.len(),
        "resolved duplicate tags"
    );

    Ok(resolution.into())
}

/// Render a successful result
pub fn render(output: &LookupOutput, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(output),
        OutputFormat::Pretty => serde_json::to_string_pretty(output),
        OutputFormat::Text => Ok(output.alternative_tags.join("\n")),
    }
}

/// Render a failure, if the format has a failure document
fn render_failure(msg: &str, format: OutputFormat) -> Option<String> {
    let failure = FailureOutput { failed: true, msg };
    match format {
        OutputFormat::Json => serde_json::to_string(&failure).ok(),
        OutputFormat::Pretty => serde_json::to_string_pretty(&failure).ok(),
        OutputFormat::Text => None,
    }
}

/// Execute the `lookup` command
pub async fn execute(args: LookupArgs) -> anyhow::Result<()> {
    let client = args.registry.client()?;
    let auth = args.registry.auth();

    let result = find_duplicate_tags(
        &client,
        &args.registry.registry_host,
        &args.registry.repository,
        &auth,
        &args.src_tag,
    )
    .await;

    match result {
        Ok(output) => {
            let rendered = render(&output, args.format)?;
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
            Ok(())
        }
        Err(e) => {
            if let Some(doc) = render_failure(&e.to_string(), args.format) {
                println!("{}", doc);
            }
            Err(e.into())
        }
    }
}
