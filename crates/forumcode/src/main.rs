use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use forumcode::{
    check_sources, quote_source, read_sources, render_sources, smiley_json, smiley_table, Config,
    Source,
};

/// Render forum BBCode to HTML
#[derive(Parser)]
#[command(name = "forumcode")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render files (or standard input) to HTML
    Render {
        #[command(flatten)]
        settings: Settings,

        /// Files to render, `-` for standard input
        files: Vec<PathBuf>,
    },

    /// Report markup that would be rendered as text
    Check {
        #[command(flatten)]
        settings: Settings,

        /// Files to check, `-` for standard input
        files: Vec<PathBuf>,
    },

    /// List the smiley vocabulary
    Smileys {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a reply that quotes a post
    Quote {
        /// Author of the quoted post
        #[arg(short, long)]
        author: Option<String>,

        /// File with the quoted post, standard input if omitted
        file: Option<PathBuf>,
    },
}

/// Renderer settings shared by `render` and `check`.
#[derive(Args)]
struct Settings {
    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Quotes nested deeper than this render as text
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Leave smiley shortcuts as text
    #[arg(long)]
    no_smileys: bool,

    /// Do not wrap the output in paragraphs
    #[arg(long)]
    no_paragraphs: bool,

    /// Path prefix of post and thread links
    #[arg(long, value_name = "PREFIX")]
    link_prefix: Option<String>,
}

impl Settings {
    /// Loads the configuration file and applies the flags on top.
    fn resolve(self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(depth) = self.max_depth {
            config.max_quote_depth = depth;
        }
        if self.no_smileys {
            config.smileys = false;
        }
        if self.no_paragraphs {
            config.paragraphs = false;
        }
        if let Some(prefix) = self.link_prefix {
            config.link_prefix = prefix;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Render { settings, files } => {
            let renderer = settings.resolve()?.renderer();
            let sources = read_sources(&files)?;
            print!("{}", render_sources(&renderer, &sources));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { settings, files } => {
            let renderer = settings.resolve()?.renderer();
            let sources = read_sources(&files)?;
            let color = console::Term::stdout().features().colors_supported();
            let report = check_sources(&renderer, &sources, color);
            print!("{}", report.output);
            if report.is_clean() {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{} problem(s) found", report.problems);
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Smileys { json } => {
            if json {
                println!("{}", smiley_json()?);
            } else {
                print!("{}", smiley_table());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Quote { author, file } => {
            let source = match file {
                Some(path) => Source::read(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => Source::stdin().context("failed to read standard input")?,
            };
            print!("{}", quote_source(author.as_deref(), &source));
            Ok(ExitCode::SUCCESS)
        }
    }
}
