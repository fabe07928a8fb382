//! `harbor-lookup list` command implementation

use crate::cli::RegistryArgs;
use crate::registry::TagRecord;
use clap::Args;

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Only show tag names
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `list` command
pub async fn execute(args: ListArgs) -> anyhow::Result<()> {
    let client = args.registry.client()?;
    let auth = args.registry.auth();

    let records = client
        .fetch_tags(&args.registry.registry_host, &args.registry.repository, &auth)
        .await?;

    for line in format_records(&records, args.quiet) {
        println!("{}", line);
    }

    Ok(())
}

/// Table rows for `records`, in listing order
fn format_records(records: &[TagRecord], quiet: bool) -> Vec<String> {
    if quiet {
        return records.iter().map(|r| r.name.clone()).collect();
    }

    let width = records
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("TAG".len());

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!("{:<width$}   {}", "TAG", "DIGEST", width = width));
    for record in records {
        lines.push(format!(
            "{:<width$}   {}",
            record.name,
            record.digest,
            width = width
        ));
    }
    lines
}
