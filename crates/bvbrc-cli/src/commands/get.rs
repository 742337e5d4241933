//! `bvbrc get` command implementation

use super::{fetch_and_print, parse_resource, warn_unknown_fields};
use crate::config::CliContext;
use crate::error::Result;
use crate::OutputArgs;
use bvbrc_client::QueryOptions;
use tracing::info;

/// Fetch the rows whose primary key equals `id`.
pub async fn run(
    ctx: &CliContext,
    resource: &str,
    id: &str,
    select: &[String],
    output: &OutputArgs,
) -> Result<()> {
    let resource = parse_resource(resource)?;
    info!(%resource, id, "Running get command");
    warn_unknown_fields(resource, select.iter().map(String::as_str));

    let handle = ctx.client()?.resource(resource);
    let options = QueryOptions::new().select(select.iter().cloned());

    fetch_and_print(&handle, &options, output, handle.get_by_id(id, &options)).await
}
