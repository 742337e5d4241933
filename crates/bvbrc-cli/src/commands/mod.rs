//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod config;
pub mod get;
pub mod query;
pub mod resources;
pub mod search;

use crate::error::{CliError, Result};
use crate::output::{self, OutputFormat};
use crate::progress;
use crate::OutputArgs;
use bvbrc_client::{QueryOptions, Resource, ResourceClient};
use colored::Colorize;
use std::future::Future;
use tracing::debug;

/// Largest edit distance still offered as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Resolve a collection name, suggesting the closest known one on failure.
pub(crate) fn parse_resource(name: &str) -> Result<Resource> {
    name.parse::<Resource>().map_err(|_| {
        let suggestion = closest(name, Resource::names());
        CliError::unknown_resource(name, suggestion)
    })
}

/// Closest candidate to `input` within [`MAX_SUGGESTION_DISTANCE`].
pub(crate) fn closest<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let input = input.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (strsim::levenshtein(&input, c), c))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, c)| c)
}

/// Warn about fields the catalog does not know. The query is still sent.
pub(crate) fn warn_unknown_fields<'a>(
    resource: Resource,
    fields: impl IntoIterator<Item = &'a str>,
) {
    for field in fields {
        if resource.knows_field(field) {
            continue;
        }
        match closest(field, resource.all_fields()) {
            Some(hint) => eprintln!(
                "{} '{}' is not a known {} field. Did you mean '{}'?",
                "warning:".yellow().bold(),
                field,
                resource,
                hint
            ),
            None => debug!(%resource, field, "Field not in catalog"),
        }
    }
}

/// Run one request behind a spinner, then print the rows.
pub(crate) async fn fetch_and_print<F>(
    handle: &ResourceClient,
    options: &QueryOptions,
    output_args: &OutputArgs,
    request: F,
) -> Result<()>
where
    F: Future<Output = bvbrc_client::Result<serde_json::Value>>,
{
    let format: OutputFormat = output::determine_format(output_args.format);
    let spinner = progress::spinner_if_tty(&format!("Querying {}...", handle.name()));
    let result = request.await;
    progress::finish(spinner);

    let rows = result?;
    debug!(
        resource = handle.name(),
        rows = output::rows(&rows).len(),
        "Query returned"
    );
    output::write(&rows, format, &options.select, output_args.output.as_deref())
}
