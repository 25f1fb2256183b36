//! CLI binary for linkgraph: analyze a site's internal links and suggest new ones.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linkgraph_analysis::authority::{authority_ranking, score_authority};
use linkgraph_analysis::hubs::generate_hub_spoke_structure;
use linkgraph_analysis::report::analyze_site;
use linkgraph_analysis::suggest::suggest_from;
use linkgraph_core::config::LinkGraphConfig;
use linkgraph_core::graph::{LinkGraph, PageType, find_orphan_pages};
use linkgraph_core::inventory::SiteInventory;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "linkgraph", about = "Internal link graph analyzer")]
struct Cli {
    /// Project root holding .linkgraph/config.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis and print the full report as JSON
    Analyze {
        /// Site inventory JSON file
        inventory: PathBuf,
    },

    /// List pages with no incoming links
    Orphans {
        /// Site inventory JSON file
        inventory: PathBuf,
    },

    /// Suggest new internal links
    Suggest {
        /// Site inventory JSON file
        inventory: PathBuf,

        /// Only suggest links from pages whose path matches this glob (e.g. "/blog/*")
        #[arg(long)]
        page: Option<String>,
    },

    /// Check hub pages against their outgoing-link target
    Hubs {
        /// Site inventory JSON file
        inventory: PathBuf,
    },

    /// Rank pages by authority score
    Authority {
        /// Site inventory JSON file
        inventory: PathBuf,
    },

    /// Report links to unknown pages and self-links
    Validate {
        /// Site inventory JSON file
        inventory: PathBuf,
    },

    /// Show link graph statistics
    Info {
        /// Site inventory JSON file
        inventory: PathBuf,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = LinkGraphConfig::load(&project_root)?;

    match cli.command {
        Commands::Analyze { inventory } => cmd_analyze(&inventory, &config),
        Commands::Orphans { inventory } => cmd_orphans(&inventory, &config),
        Commands::Suggest { inventory, page } => cmd_suggest(&inventory, page.as_deref(), &config),
        Commands::Hubs { inventory } => cmd_hubs(&inventory, &config),
        Commands::Authority { inventory } => cmd_authority(&inventory, &config),
        Commands::Validate { inventory } => cmd_validate(&inventory, &config),
        Commands::Info { inventory } => cmd_info(&inventory, &config),
    }
}

fn load_inventory(path: &Path) -> Result<SiteInventory> {
    SiteInventory::load(path)
        .with_context(|| format!("failed to load site inventory {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn cmd_analyze(inventory: &Path, config: &LinkGraphConfig) -> Result<()> {
    let site = load_inventory(inventory)?;
    let report = analyze_site(&site, config);
    print_json(&report)
}

fn cmd_orphans(inventory: &Path, config: &LinkGraphConfig) -> Result<()> {
    let site = load_inventory(inventory)?;
    let graph = LinkGraph::from_inventory(&site, config);
    let orphans = find_orphan_pages(&graph);

    if orphans.is_empty() {
        eprintln!("No orphan pages. Every page has at least one incoming link.");
        return Ok(());
    }
    for path in &orphans {
        println!("{}", path);
    }
    eprintln!("{} orphan page(s) of {}", orphans.len(), graph.metadata.total_pages);
    Ok(())
}

fn cmd_suggest(inventory: &Path, page: Option<&str>, config: &LinkGraphConfig) -> Result<()> {
    let site = load_inventory(inventory)?;
    let graph = LinkGraph::from_inventory(&site, config);
    let contents = site.contents();

    let matcher = page
        .map(|p| {
            globset::Glob::new(p)
                .map(|g| g.compile_matcher())
                .with_context(|| format!("invalid --page glob: {}", p))
        })
        .transpose()?;

    let suggestions = suggest_from(&graph, &contents, &config.suggestion, |source| {
        matcher.as_ref().is_none_or(|m| m.is_match(&source.path))
    });

    if suggestions.is_empty() {
        eprintln!("No link suggestions above the relevance threshold.");
    }
    print_json(&suggestions)
}

fn cmd_hubs(inventory: &Path, config: &LinkGraphConfig) -> Result<()> {
    let site = load_inventory(inventory)?;
    let graph = LinkGraph::from_inventory(&site, config);
    let report = generate_hub_spoke_structure(&graph, config);

    for rec in &report.recommendations {
        eprintln!("{}", rec);
    }
    print_json(&report)
}

fn cmd_authority(inventory: &Path, config: &LinkGraphConfig) -> Result<()> {
    let site = load_inventory(inventory)?;
    let mut graph = LinkGraph::from_inventory(&site, config);
    score_authority(&mut graph, config);
    print_json(&authority_ranking(&graph))
}

fn cmd_validate(inventory: &Path, config: &LinkGraphConfig) -> Result<()> {
    let site = load_inventory(inventory)?;
    let mut issues = 0;

    // Self-links are dropped while building the graph, so check the raw records.
    for record in &site.pages {
        if record.links.iter().any(|l| l == &record.path) {
            println!("WARN: self-link on {}", record.path);
            issues += 1;
        }
    }

    let graph = LinkGraph::from_inventory(&site, config);
    for (source, target) in graph.dangling_links() {
        println!("WARN: {} links to unknown page {}", source, target);
        issues += 1;
    }

    if issues == 0 {
        eprintln!("Inventory is valid. No link issues found.");
        eprintln!(
            "  {} pages, {} links",
            graph.metadata.total_pages, graph.metadata.total_links
        );
    } else {
        eprintln!("\nFound {} link issue(s).", issues);
    }

    Ok(())
}

fn cmd_info(inventory: &Path, config: &LinkGraphConfig) -> Result<()> {
    let site = load_inventory(inventory)?;
    let graph = LinkGraph::from_inventory(&site, config);
    let meta = &graph.metadata;

    println!("Link graph v{}", graph.version);
    println!("Inventory: {}", inventory.display());
    println!();
    println!("Pages: {}", meta.total_pages);
    println!("Links: {}", meta.total_links);
    println!("Dangling links: {}", meta.dangling_links);
    println!("Average incoming: {:.2}", meta.average_incoming);
    println!("Average outgoing: {:.2}", meta.average_outgoing);
    println!("Orphans: {}", graph.orphan_pages.len());
    println!("Hubs: {}", graph.hub_pages.len());

    println!("\nPage types:");
    for page_type in [PageType::Hub, PageType::Guide, PageType::Content, PageType::Pseo] {
        let count = graph.pages_of_type(page_type).count();
        println!("  {} ({} pages)", page_type.as_str(), count);
    }

    Ok(())
}
