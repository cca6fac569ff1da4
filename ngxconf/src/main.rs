//! ngxconf - nginx-style configuration formatter and editor
//!
//! This is the main entry point for the ngxconf CLI.

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use ngxconf_config::{JsonAdapter, LoadError, Node, ParseError, Selector};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ngxconf - parse, query and rewrite nginx-style configuration files
#[derive(Parser)]
#[command(name = "ngxconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the configuration in canonical layout
    Fmt {
        /// Path to the configuration file
        #[arg(default_value = "nginx.conf")]
        config: String,

        /// Rewrite the file in place instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(default_value = "nginx.conf")]
        config: String,
    },

    /// Print the nodes matched by a selector such as `http/server/listen 80`
    Get {
        /// Path to the configuration file
        config: String,

        /// `/`-separated steps of `directive [args...]`
        selector: String,

        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add the last step of the selector under every node matched by the rest
    Add {
        /// Path to the configuration file
        config: String,

        /// `/`-separated steps of `directive [args...]`
        selector: String,

        /// Rewrite the file in place instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Delete the last step of the selector under every node matched by the rest
    Del {
        /// Path to the configuration file
        config: String,

        /// `/`-separated steps of `directive [args...]`
        selector: String,

        /// Rewrite the file in place instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Fmt { config, write } => {
            let root = load(&config);
            emit(&config, &root, write)?;
        }

        Commands::Validate { config } => {
            tracing::info!("Validating config: {}", config);
            let root = load(&config);
            println!(
                "✅ Configuration '{}' is valid ({} top-level nodes)",
                config,
                root.children().len()
            );
        }

        Commands::Get {
            config,
            selector,
            json,
        } => {
            let selector: Selector = selector.parse()?;
            let root = load(&config);
            let matches = selector.select(&root);
            tracing::debug!("{} node(s) matched `{}`", matches.len(), selector);

            if matches.is_empty() {
                eprintln!("❌ Nothing matches '{}'", selector);
                std::process::exit(1);
            }

            for node in matches {
                if json {
                    println!("{}", JsonAdapter::serialize(node)?);
                } else {
                    println!("{}", node.dump(0));
                }
            }
        }

        Commands::Add {
            config,
            selector,
            write,
        } => {
            let selector: Selector = selector.parse()?;
            let mut root = load(&config);
            let Some((parents, step)) = selector.split_last() else {
                anyhow::bail!("selector '{}' has no steps", selector);
            };

            let args: Vec<&str> = step.args.iter().map(String::as_str).collect();
            let targets = parents.select_mut(&mut root);
            if targets.is_empty() {
                eprintln!("❌ Nothing matches '{}'", parents);
                std::process::exit(1);
            }
            for parent in targets {
                parent.add(&step.directive, &args);
            }

            emit(&config, &root, write)?;
        }

        Commands::Del {
            config,
            selector,
            write,
        } => {
            let selector: Selector = selector.parse()?;
            let mut root = load(&config);
            let Some((parents, step)) = selector.split_last() else {
                anyhow::bail!("selector '{}' has no steps", selector);
            };

            let args: Vec<&str> = step.args.iter().map(String::as_str).collect();
            for parent in parents.select_mut(&mut root) {
                parent.del(&step.directive, &args);
            }

            emit(&config, &root, write)?;
        }

        Commands::Version => {
            println!("ngxconf v{}", ngxconf_core::VERSION);
        }
    }

    Ok(())
}

/// Load a configuration file, exiting with a diagnostic on failure.
fn load(path: &str) -> Node {
    tracing::debug!("Loading config: {}", path);

    match ngxconf_config::parse_file(path) {
        Ok(root) => root,
        Err(LoadError::Io(e)) => {
            eprintln!("❌ Failed to read '{}': {}", path, e);
            std::process::exit(1);
        }
        Err(LoadError::Parse(e)) => {
            report_parse_error(path, &e);
            std::process::exit(1);
        }
    }
}

/// Print the rendered tree, or write it back to `path`.
fn emit(path: &str, root: &Node, write: bool) -> anyhow::Result<()> {
    if !write {
        println!("{}", root);
        return Ok(());
    }

    let mut file = std::fs::File::create(Path::new(path))?;
    let written = root.write_to(&mut file)?;
    tracing::info!("Wrote {} bytes to {}", written, path);
    Ok(())
}

fn report_parse_error(path: &str, err: &ParseError) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("❌ Configuration Error: {}", err);
            return;
        }
    };

    // ariadne counts characters, the parser reports bytes
    let byte = err.position().min(source.len());
    let start = source
        .char_indices()
        .take_while(|(i, _)| *i < byte)
        .count();
    let span = start..start + 1;

    let printed = Report::build(ReportKind::Error, (path, span.clone()))
        .with_message("Configuration Error")
        .with_label(
            Label::new((path, span))
                .with_message(err.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((path, Source::from(source.as_str())));

    if printed.is_err() {
        eprintln!("❌ Configuration Error: {}", err);
    }
}
