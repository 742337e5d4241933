//! `bvbrc search` command implementation
//!
//! Keyword search within one collection.

use super::{fetch_and_print, parse_resource, warn_unknown_fields};
use crate::config::CliContext;
use crate::error::{CliError, Result};
use crate::OutputArgs;
use bvbrc_client::QueryOptions;
use tracing::info;

pub async fn run(
    ctx: &CliContext,
    resource: &str,
    keyword: &str,
    select: &[String],
    limit: Option<u64>,
    output: &OutputArgs,
) -> Result<()> {
    let resource = parse_resource(resource)?;
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(CliError::invalid_argument("Search keyword cannot be empty"));
    }
    info!(%resource, keyword, "Running search command");
    warn_unknown_fields(resource, select.iter().map(String::as_str));

    let handle = ctx.client()?.resource(resource);
    let mut options = QueryOptions::new().select(select.iter().cloned());
    options.limit = limit;

    fetch_and_print(
        &handle,
        &options,
        output,
        handle.search_by_keyword(keyword, &options),
    )
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_keyword_is_rejected() {
        let err = run(
            &CliContext::default(),
            "genome",
            "   ",
            &[],
            None,
            &OutputArgs::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_unknown_resource_is_rejected() {
        let err = run(
            &CliContext::default(),
            "genomez",
            "katG",
            &[],
            None,
            &OutputArgs::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::UnknownResource { .. }));
    }
}
