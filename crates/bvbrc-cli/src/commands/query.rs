//! `bvbrc query` command implementation
//!
//! Turns repeatable filter flags into one RQL expression. Clauses are
//! grouped by flag (eq, ne, gt, lt, ge, le, in, keyword) and joined with
//! `and(...)`.

use super::{fetch_and_print, parse_resource, warn_unknown_fields};
use crate::config::CliContext;
use crate::error::{CliError, Result};
use crate::QueryArgs;
use bvbrc_client::{rql, Comparison, FieldFilter, QueryOptions};
use colored::Colorize;
use tracing::{debug, info};

pub async fn run(ctx: &CliContext, args: &QueryArgs) -> Result<()> {
    let resource = parse_resource(&args.resource)?;
    info!(%resource, "Running query command");

    let filter = build_filter(args)?;
    let options = build_options(args);
    warn_unknown_fields(resource, referenced_fields(args)?);
    debug!(%filter, "Built RQL filter");

    let handle = ctx.client()?.resource(resource);

    if args.dry_run {
        let request = handle.prepare(&filter, &options)?;
        println!("{} {}", "POST".bold(), request.url);
        println!("{}", request.body);
        return Ok(());
    }

    fetch_and_print(&handle, &options, &args.output, handle.run(&filter, &options)).await
}

/// Split `FIELD=VALUE` at the first `=`.
pub fn parse_pair(raw: &str) -> Result<(&str, &str)> {
    let (field, value) = raw.split_once('=').ok_or_else(|| {
        CliError::invalid_argument(format!("Expected FIELD=VALUE, got '{}'", raw))
    })?;
    let field = field.trim();
    if field.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "Missing field name in '{}'",
            raw
        )));
    }
    Ok((field, value))
}

/// Full RQL filter for the flags; empty when none were given.
pub fn build_filter(args: &QueryArgs) -> Result<String> {
    let mut clauses = Vec::new();

    for (op, values) in comparison_flags(args) {
        for raw in values {
            let (field, value) = parse_pair(raw)?;
            clauses.push(FieldFilter::new(field, op, value).to_rql());
        }
    }

    for raw in &args.any_of {
        let (field, values) = parse_pair(raw)?;
        let values: Vec<&str> = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() {
            return Err(CliError::invalid_argument(format!(
                "--in {} needs at least one value",
                field
            )));
        }
        clauses.push(rql::in_(field, values));
    }

    if let Some(keyword) = args.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
        clauses.push(rql::keyword(keyword.trim()));
    }

    Ok(rql::and(clauses))
}

pub fn build_options(args: &QueryArgs) -> QueryOptions {
    let mut options = QueryOptions::new()
        .select(args.select.iter().cloned())
        .http_download(args.download);
    options.sort = args.sort.clone();
    options.limit = args.limit;
    options
}

fn comparison_flags(args: &QueryArgs) -> [(Comparison, &Vec<String>); 6] {
    [
        (Comparison::Eq, &args.eq),
        (Comparison::Ne, &args.ne),
        (Comparison::Gt, &args.gt),
        (Comparison::Lt, &args.lt),
        (Comparison::Ge, &args.ge),
        (Comparison::Le, &args.le),
    ]
}

/// Every field named by a filter flag, `--select` or `--sort`.
fn referenced_fields(args: &QueryArgs) -> Result<Vec<&str>> {
    let mut fields = Vec::new();
    for (_, values) in comparison_flags(args) {
        for raw in values {
            fields.push(parse_pair(raw)?.0);
        }
    }
    for raw in &args.any_of {
        fields.push(parse_pair(raw)?.0);
    }
    fields.extend(args.select.iter().map(String::as_str));
    if let Some(sort) = args.sort.as_deref() {
        fields.extend(
            sort.split(',')
                .map(|s| s.trim().trim_start_matches(['+', '-']))
                .filter(|s| !s.is_empty()),
        );
    }
    Ok(fields)
}
