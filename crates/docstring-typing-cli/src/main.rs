//! Command-line front end for docstring-typing.
//!
//! Usage:
//!   docstring-typing transform `<ANNOTATION>`...          - Print markup for each annotation
//!   docstring-typing rewrite [FILE]... [--in-place]       - Rewrite docstring text (stdin when no FILE)
//!   docstring-typing init [--force]                       - Write a config file with the defaults

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use docstring_typing_config::Config;
use docstring_typing_engine::{
    BracketMatching, DocstringContext, DocumentationHost, HookRegistry, MarkupStyle,
    PROCESS_DOCSTRING_EVENT, RewriteOptions, Rewriter, Vocabulary,
};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Parser)]
#[command(name = "docstring-typing", version, about)]
struct Cli {
    /// Config file to use instead of ~/.config/docstring-typing/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log rewritten lines (-v) or everything (-vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the markup for each annotation
    Transform {
        #[arg(required = true)]
        annotations: Vec<String>,
    },
    /// Rewrite every annotation in docstring text files
    Rewrite {
        /// Files to rewrite; reads stdin when none are given
        files: Vec<PathBuf>,

        /// Object name used in log messages (defaults to the file path)
        #[arg(long)]
        name: Option<String>,

        /// Write results back to the files instead of stdout
        #[arg(long)]
        in_place: bool,

        /// Exit with an error if any line could not be rewritten
        #[arg(long)]
        strict: bool,
    },
    /// Write a config file holding the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Transform { annotations } => {
            let rewriter = build_rewriter(&load_config(config)?)?;
            Ok(run_transform(&rewriter, &annotations))
        }
        Commands::Rewrite {
            files,
            name,
            in_place,
            strict,
        } => {
            let rewriter = build_rewriter(&load_config(config)?)?;
            run_rewrite(rewriter, &files, name.as_deref(), in_place, strict)
        }
        Commands::Init { force } => {
            run_init(config, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG is parsed last so it wins over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = Config::expand_path(path);
            log::debug!("Loading config from {}", path.display());
            Config::load_from_path(&path)?
                .with_context(|| format!("config file not found: {}", path.display()))
        }
        None => {
            log::debug!("Loading config from {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

fn run_init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = explicit.map_or_else(Config::config_path, Config::expand_path);
    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite", path.display());
    }
    Config::default().save_to_path(&path)?;
    log::info!("Wrote default config to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

/// Map the on-disk configuration onto engine types.
fn build_rewriter(config: &Config) -> Result<Rewriter> {
    let vocabulary = Vocabulary::standard()
        .clone()
        .with_argument_types(&config.vocabulary.extra_argument_types)?
        .with_bare_types(&config.vocabulary.extra_bare_types)?
        .without(&config.vocabulary.excluded);

    let options = RewriteOptions {
        bracket_matching: match config.bracket_matching {
            docstring_typing_config::BracketMatching::Greedy => BracketMatching::Greedy,
            docstring_typing_config::BracketMatching::Balanced => BracketMatching::Balanced,
        },
        decorations: config.decorations.clone(),
        style: MarkupStyle {
            role: config.markup.role.clone(),
            module: config.markup.module.clone(),
        },
    };

    Ok(Rewriter::new(vocabulary, options)?)
}

fn run_transform(rewriter: &Rewriter, annotations: &[String]) -> ExitCode {
    let mut failed = false;
    for annotation in annotations {
        match rewriter.transform(annotation) {
            Ok(markup) => println!("{markup}"),
            Err(e) => {
                eprintln!("error: `{annotation}`: {e}");
                failed = true;
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_rewrite(
    rewriter: Rewriter,
    files: &[PathBuf],
    name: Option<&str>,
    in_place: bool,
    strict: bool,
) -> Result<ExitCode> {
    if in_place && files.is_empty() {
        bail!("--in-place needs at least one FILE");
    }

    let failures = Arc::new(AtomicUsize::new(0));
    let mut registry = HookRegistry::new();
    {
        let rewriter = Arc::new(rewriter);
        let failures = Arc::clone(&failures);
        registry.connect(
            PROCESS_DOCSTRING_EVENT,
            Box::new(move |context: &DocstringContext<'_>, lines: &mut [String]| {
                let report = rewriter.rewrite_lines(context.name, lines);
                failures.fetch_add(report.failures.len(), Ordering::Relaxed);
            }),
        );
    }

    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        let output = rewrite_text(&registry, name.unwrap_or("<stdin>"), &text);
        std::io::stdout().write_all(output.as_bytes())?;
    }

    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let label = path.display().to_string();
        let output = rewrite_text(&registry, name.unwrap_or(&label), &text);

        if in_place {
            if output != text {
                log::info!("Rewrote {}", path.display());
                std::fs::write(path, output)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        } else {
            std::io::stdout().write_all(output.as_bytes())?;
        }
    }

    let failures = failures.load(Ordering::Relaxed);
    if strict && failures > 0 {
        eprintln!("error: {failures} line(s) could not be rewritten");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run one document through the host event, keeping its line endings.
fn rewrite_text(registry: &HookRegistry, name: &str, text: &str) -> String {
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let context = DocstringContext {
        what: "module",
        name,
    };
    registry.emit(PROCESS_DOCSTRING_EVENT, &context, &mut lines);

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut output = lines.join(newline);
    if text.ends_with('\n') {
        output.push_str(newline);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstring_typing_config::{MarkupConfig, VocabularyConfig};

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn default_config_builds_standard_rewriter() {
        let rewriter = build_rewriter(&Config::default()).unwrap();
        assert_eq!(
            rewriter.transform("List[Any]").unwrap(),
            Rewriter::standard().transform("List[Any]").unwrap()
        );
    }

    #[test]
    fn config_maps_onto_engine() {
        let config = Config {
            bracket_matching: docstring_typing_config::BracketMatching::Balanced,
            decorations: "*|".to_string(),
            vocabulary: VocabularyConfig {
                extra_argument_types: vec!["Shaped".to_string()],
                extra_bare_types: vec!["Never".to_string()],
                excluded: vec!["Text".to_string()],
            },
            markup: MarkupConfig {
                role: "class".to_string(),
                module: "typing".to_string(),
            },
        };
        let rewriter = build_rewriter(&config).unwrap();

        let mut lines = vec![
            "|Shaped[int]| or Set[str]".to_string(),
            "Never Text".to_string(),
        ];
        rewriter.rewrite_lines("test", &mut lines);

        assert_eq!(
            lines,
            vec![
                ":class:`~typing.Shaped` [ :class:`int` ]  or :class:`~typing.Set` [ :class:`str` ] "
                    .to_string(),
                ":class:`~typing.Never` Text".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_vocabulary_is_an_error() {
        let mut config = Config::default();
        config.vocabulary.extra_bare_types = vec!["not valid".to_string()];
        assert!(build_rewriter(&config).is_err());
    }

    #[test]
    fn rewrite_text_keeps_line_endings() {
        let mut registry = HookRegistry::new();
        docstring_typing_engine::setup(&mut registry);

        assert_eq!(rewrite_text(&registry, "t", "Any\n"), ":py:obj:`~typing.Any`\n");
        assert_eq!(rewrite_text(&registry, "t", "Any\r\nx"), ":py:obj:`~typing.Any`\r\nx");
        assert_eq!(rewrite_text(&registry, "t", ""), "");
    }
}
