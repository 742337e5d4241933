//! Build automation tasks for the BV-BRC client workspace
//!
//! Currently generates the CLI reference from the clap definitions.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for the bvbrc workspace", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &Path) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<bvbrc_cli::Cli>();

    let content = format!(
        r#"# bvbrc CLI Reference

Generated from the CLI source code on {}.

`bvbrc` queries the collections of the Bacterial and Viral Bioinformatics
Resource Center Data API with RQL filters built from command-line flags.

## Installation

```bash
cargo install --path crates/bvbrc-cli
```

## Quick Start

```bash
# List the collections
bvbrc resources --fields

# One genome by id
bvbrc get genome 83332.12

# Filtered query with projection and ordering
bvbrc query genome_feature \
  --eq genome_id=83332.12 --eq feature_type=CDS \
  --select patric_id,product --sort +start --limit 20

# Show the request without sending it
bvbrc query genome --in genome_id=83332.12,224308.43 --dry-run

# Keyword search
bvbrc search sp_gene "beta lactamase" --format csv --output hits.csv
```

## Commands

{}

## Environment Variables

- `BVBRC_API_URL` - Data API base URL (default: `https://www.bv-brc.org/api`)
- `BVBRC_AUTH_TOKEN` - Token sent as the `Authorization` header
- `BVBRC_LOG_LEVEL`, `BVBRC_LOG_OUTPUT`, `BVBRC_LOG_FORMAT`, `BVBRC_LOG_DIR`, `BVBRC_LOG_FILTER` - Logging

## Configuration

Settings are read from `config.json` in the working directory (or `--config`):

```json
{{
  "auth_token": "un=alice@patricbrc.org|tokenid=...",
  "base_url": "https://www.bv-brc.org/api"
}}
```

Flags win over environment variables, which win over the file.

---

*Regenerate with `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    fs::create_dir_all(output_dir)?;

    let file_path = output_dir.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
