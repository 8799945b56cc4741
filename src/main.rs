//! cst-lens CLI: inspect the concrete syntax tree of a source file.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use cst_lens::analysis::{AnalysisRequest, Analyzer};
use cst_lens::commentary::CommentaryProvider;
use cst_lens::config::AnalyzerConfig;
use cst_lens::error::{AnalyzerError, Result};
use cst_lens::observability::init_logging_with;
use cst_lens::types::Language;

/// Parse source code and inspect its syntax tree.
#[derive(Parser)]
#[command(name = "cst-lens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file (or stdin) and print the requested view
    Analyze {
        /// Source file, or `-` for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Language identifier or name (detected from the extension when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Maximum depth of the rendered graph
        #[arg(short = 'd', long)]
        max_depth: Option<usize>,

        /// Output view
        #[arg(short, long, value_enum, default_value_t = Format::Dot)]
        format: Format,

        /// Ask the language model for commentary
        #[arg(long)]
        commentary: bool,
    },

    /// List supported languages
    Languages,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Graphviz DOT digraph
    Dot,
    /// Human-readable statistics
    Summary,
    /// Full report as JSON
    Json,
    /// Indented text tree
    Outline,
    /// Full syntax tree as JSON
    Tree,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "cst_lens=warn",
        1 => "cst_lens=info",
        2 => "cst_lens=debug",
        _ => "cst_lens=trace",
    };
    init_logging_with(filter);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Languages => {
            for lang in Language::ALL {
                println!("{:<12} {}", lang.as_str(), lang.display_name());
            }
            Ok(())
        }
        Commands::Analyze {
            file,
            language,
            max_depth,
            format,
            commentary,
        } => {
            let mut config = AnalyzerConfig::load(cli.config.as_deref())?;
            if commentary {
                config.commentary.enabled = true;
            }

            let language = match language {
                Some(l) => l,
                None => Language::detect(&file)
                    .map(|l| l.as_str().to_string())
                    .ok_or_else(|| {
                        AnalyzerError::Config(format!(
                            "cannot detect language of {file:?}; pass --language"
                        ))
                    })?,
            };
            let source = read_source(&file)?;

            let mut request = AnalysisRequest::new(source, language);
            request.max_depth = max_depth;
            request.include_outline = format == Format::Outline || format == Format::Json;
            request.include_tree = format == Format::Tree;
            request.commentary = config.commentary.enabled;

            let provider = commentary_provider(&config);
            let analyzer = Analyzer::from_config(config);
            let report = analyzer.analyze(&request, provider.as_deref())?;

            match format {
                Format::Dot => print!("{}", report.dot),
                Format::Json => println!("{}", report.to_json()?),
                Format::Outline => print!("{}", report.outline.unwrap_or_default()),
                Format::Summary => print_summary(&report),
                Format::Tree => println!("{}", serde_json::to_string_pretty(&report.tree)?),
            }
            if format != Format::Json && format != Format::Tree {
                if let Some(text) = &report.commentary {
                    eprintln!("\n{text}");
                }
            }
            Ok(())
        }
    }
}

fn read_source(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

#[cfg(feature = "commentary")]
fn commentary_provider(config: &AnalyzerConfig) -> Option<Box<dyn CommentaryProvider>> {
    if !config.commentary.enabled {
        return None;
    }
    match cst_lens::commentary::GeminiProvider::from_config(&config.commentary) {
        Ok(provider) => Some(Box::new(provider)),
        Err(err) => Some(Box::new(Unavailable(err.to_string()))),
    }
}

#[cfg(not(feature = "commentary"))]
fn commentary_provider(config: &AnalyzerConfig) -> Option<Box<dyn CommentaryProvider>> {
    config.commentary.enabled.then(|| {
        Box::new(Unavailable(
            "built without the `commentary` feature".to_string(),
        )) as Box<dyn CommentaryProvider>
    })
}

/// Stands in for a provider that could not be constructed, so the reason
/// ends up in the report instead of aborting the run.
struct Unavailable(String);

impl CommentaryProvider for Unavailable {
    fn comment(&self, _request: &cst_lens::commentary::CommentaryRequest) -> Result<String> {
        Err(AnalyzerError::Commentary(self.0.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "unavailable"
    }
}

fn print_summary(report: &cst_lens::AnalysisReport) {
    let summary = &report.summary;
    println!("Language:        {}", report.language.display_name());
    println!("Total nodes:     {}", summary.total_nodes);
    println!("Tree depth:      {}", summary.max_depth);
    println!("Top-level nodes: {}", summary.top_level_nodes.len());
    if report.has_syntax_errors {
        println!("Syntax errors:   yes ({} ERROR nodes)", summary.error_nodes());
    }
    println!(
        "Graph:           {} nodes, {} edges (depth <= {})",
        report.graph_nodes, report.graph_edges, report.max_depth
    );

    if !summary.top_level_nodes.is_empty() {
        println!("\nTop-level nodes");
        println!("  {:<32} {:>10} {:>10}", "Node Type", "Start", "End");
        for node in &summary.top_level_nodes {
            println!(
                "  {:<32} {:>10} {:>10}",
                node.kind,
                node.start.to_string(),
                node.end.to_string()
            );
        }
    }

    let common = summary.most_common(10);
    if !common.is_empty() {
        println!("\nNode type distribution");
        for (kind, count) in common {
            println!("  {kind:<32} {count:>6}");
        }
    }
}
