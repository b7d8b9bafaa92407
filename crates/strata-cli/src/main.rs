//! Command-line inspector for strata.
//!
//! Usage:
//!   strata parse `<path>` [--format tree|json] [--config `<file>`] [--no-inline]
//!   strata refs `<path>`
//!   strata check `<path>`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use strata_config::{Config, OutputFormat};
use strata_engine::{
    ParseOptions, ParsedDoc,
    parsing::snapshot::{self, SnapOptions},
    parse_document_with, read_document,
};
use xi_rope::Rope;

#[derive(Debug, Parser)]
#[command(name = "strata", version, about = "Inspect block and inline trees of markdown-like text")]
struct Cli {
    /// Config file to use instead of ~/.config/strata/config.toml
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the block tree of a document
    Parse {
        path: PathBuf,
        /// Output format (defaults to the configured one)
        #[arg(long, short, value_enum)]
        format: Option<Format>,
        /// Skip inline trees for paragraphs and headers
        #[arg(long)]
        no_inline: bool,
    },
    /// List resolved reference definitions in document order
    Refs { path: PathBuf },
    /// Parse a document and verify the tree's structural invariants
    Check { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Tree,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Tree => OutputFormat::Tree,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let out = run(&cli.command, &config)?;
    print!("{out}");
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let loaded = match explicit {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            if config.is_none() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            config
        }
        None => Config::load()?,
    };
    match loaded {
        Some(config) => Ok(config),
        None => {
            log::debug!(
                "no config file at {}, using defaults",
                Config::config_path().display()
            );
            Ok(Config::default())
        }
    }
}

fn parse_file(path: &Path, config: &Config) -> Result<(Rope, ParsedDoc)> {
    let rope =
        read_document(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let options = ParseOptions {
        tab_width: config.parse.tab_width,
    };
    let doc = parse_document_with(&rope, &options);
    Ok((rope, doc))
}

/// Runs one subcommand and returns what it prints.
fn run(command: &Command, config: &Config) -> Result<String> {
    match command {
        Command::Parse {
            path,
            format,
            no_inline,
        } => {
            let (rope, doc) = parse_file(path, config)?;
            let options = SnapOptions {
                preview_width: config.output.preview_width,
                inline: config.parse.inline && !no_inline,
            };
            let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
            match format {
                OutputFormat::Tree => Ok(snapshot::dump_with(&rope, &doc, &options)),
                OutputFormat::Json => {
                    let snap = snapshot::normalize_with(&rope, &doc, &options);
                    let mut json = serde_json::to_string_pretty(&snap)?;
                    json.push('\n');
                    Ok(json)
                }
            }
        }
        Command::Refs { path } => {
            let (_, doc) = parse_file(path, config)?;
            let mut out = String::new();
            for (label, definition) in doc.references.iter() {
                out.push_str(&format!("[{label}]: {}", definition.destination));
                if let Some(title) = &definition.title {
                    out.push_str(&format!(" \"{title}\""));
                }
                out.push('\n');
            }
            Ok(out)
        }
        Command::Check { path } => {
            let (rope, doc) = parse_file(path, config)?;
            // Violations panic with a description of the first one found.
            snapshot::invariants(&rope, &doc);
            Ok(format!(
                "{}: ok ({} blocks, {} references)\n",
                path.display(),
                doc.blocks.len(),
                doc.references.len()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_doc(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("doc.md");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_subcommand_arguments() {
        let cli = Cli::try_parse_from(["strata", "-v", "parse", "doc.md", "--format", "json"])
            .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Parse {
                path,
                format,
                no_inline,
            } => {
                assert_eq!(path, PathBuf::from("doc.md"));
                assert_eq!(format, Some(Format::Json));
                assert!(!no_inline);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_prints_tree_dump() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "# Hi\n\n- *a*\n");
        let command = Command::Parse {
            path,
            format: None,
            no_inline: false,
        };

        let out = run(&command, &Config::default()).unwrap();
        assert_eq!(
            out,
            "Header level=1\n  | Hi\n  = \"Hi\"\nList bullet(-) state=Normal min_indent=2 lazy\n  ListItem\n    Paragraph\n      | *a*\n      = em1(\"a\")\n"
        );
    }

    #[test]
    fn no_inline_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "*a*\n");
        let command = Command::Parse {
            path,
            format: Some(Format::Tree),
            no_inline: true,
        };

        let out = run(&command, &Config::default()).unwrap();
        assert_eq!(out, "Paragraph\n  | *a*\n");
    }

    #[test]
    fn configured_json_format_is_used_by_default() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "text\n");
        let mut config = Config::default();
        config.output.format = OutputFormat::Json;
        let command = Command::Parse {
            path,
            format: None,
            no_inline: false,
        };

        let out = run(&command, &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["blocks"][0]["kind"], "Paragraph");
    }

    #[test]
    fn refs_lists_first_definitions() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "[a]: /one \"One\"\n[b]: /two\n[A]: /dup\n");

        let out = run(&Command::Refs { path }, &Config::default()).unwrap();
        assert_eq!(out, "[a]: /one \"One\"\n[b]: /two\n");
    }

    #[test]
    fn check_reports_counts() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "> quote\n\n[r]: /x\n");

        let out = run(&Command::Check { path: path.clone() }, &Config::default()).unwrap();
        assert_eq!(out, format!("{}: ok (3 blocks, 1 references)\n", path.display()));
    }

    #[test]
    fn missing_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.md");

        let err = run(&Command::Check { path }, &Config::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("none.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
