//! spandiff — schema differ for Cloud Spanner DDL.
//!
//! # Usage
//!
//! ```bash
//! # Diff two schema files
//! spandiff --base-ddl-file base.sql --target-ddl-file target.sql
//!
//! # Inline DDL, target from stdin
//! spandiff --base-ddl "CREATE TABLE t1 (c1 INT64) PRIMARY KEY (c1)" --target-from-stdin
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use spandiff::style::{ColorMode, ColorPrinter};
use spandiff::{DiffOptions, diff_ddls, diff_to_writer};
use spandiff_core::printer::NoStylePrinter;
use spandiff_core::sql::ToSql;

#[derive(Parser)]
#[command(name = "spandiff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Schema differ for Cloud Spanner DDL", long_about = None)]
#[command(after_help = "EXAMPLES:
    spandiff --base-ddl-file base.sql --target-ddl-file target.sql
    spandiff --base-ddl \"CREATE TABLE t1 (c1 INT64) PRIMARY KEY (c1)\" \\
             --target-ddl \"CREATE TABLE t1 (c1 INT64, c2 INT64) PRIMARY KEY (c1)\"")]
struct Cli {
    /// Base schema DDL
    #[arg(long, value_name = "SQL")]
    base_ddl: Option<String>,

    /// Read the base schema from a file
    #[arg(long, value_name = "PATH", conflicts_with = "base_ddl")]
    base_ddl_file: Option<PathBuf>,

    /// Read the base schema from stdin
    #[arg(long, conflicts_with_all = ["base_ddl", "base_ddl_file"])]
    base_from_stdin: bool,

    /// Target schema DDL
    #[arg(long, value_name = "SQL")]
    target_ddl: Option<String>,

    /// Read the target schema from a file
    #[arg(long, value_name = "PATH", conflicts_with = "target_ddl")]
    target_ddl_file: Option<PathBuf>,

    /// Read the target schema from stdin
    #[arg(long, conflicts_with_all = ["target_ddl", "target_ddl_file"])]
    target_from_stdin: bool,

    /// Abort on input DDL outside the supported surface
    #[arg(long)]
    error_on_unsupported_ddl: bool,

    /// Color mode
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorArg,

    /// Output format
    #[arg(long, value_enum, default_value = "sql")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(value: ColorArg) -> Self {
        match value {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.base_from_stdin && cli.target_from_stdin {
        bail!("cannot read both the base and the target schema from stdin");
    }

    let base = read_input(&cli.base_ddl, &cli.base_ddl_file, cli.base_from_stdin)
        .context("failed to read base schema")?;
    let target = read_input(&cli.target_ddl, &cli.target_ddl_file, cli.target_from_stdin)
        .context("failed to read target schema")?;

    let options = DiffOptions {
        error_on_unsupported_ddl: cli.error_on_unsupported_ddl,
    };

    match cli.format {
        OutputFormat::Json => {
            let statements: Vec<String> = diff_ddls(&base, &target, &options)?
                .iter()
                .map(ToSql::to_sql)
                .collect();
            println!("{}", serde_json::to_string_pretty(&statements)?);
        }
        OutputFormat::Sql => {
            let mut stdout = std::io::stdout().lock();
            let color: ColorMode = cli.color.into();
            if color.enabled() {
                diff_to_writer(&base, &target, &mut stdout, &options, &ColorPrinter)?;
            } else {
                diff_to_writer(&base, &target, &mut stdout, &options, &NoStylePrinter)?;
            }
        }
    }
    Ok(())
}

/// An unspecified side is an empty schema.
fn read_input(
    inline: &Option<String>,
    file: &Option<PathBuf>,
    from_stdin: bool,
) -> Result<String> {
    if let Some(sql) = inline {
        return Ok(sql.clone());
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    if from_stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(String::new())
}
