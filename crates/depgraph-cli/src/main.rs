//! CLI binary for depgraph: inspect, extend, and validate dependency graph files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use depgraph_core::config::DepgraphConfig;
use depgraph_core::export::ExportFormat;
use depgraph_core::graph::DirectedGraph;
use depgraph_core::storage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "depgraph", about = "Dependency graph inspector")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Graph file (defaults to the configured path under the project root)
    #[arg(short, long, global = true)]
    graph: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show vertex, edge, leaf, and root counts
    Info,

    /// Print every vertex with its outgoing edges
    Edges {
        /// Print the reversed graph instead
        #[arg(long)]
        reverse: bool,
    },

    /// Print vertices with no outgoing edges
    Leaves {
        /// Use the reversed graph (vertices with no incoming edges)
        #[arg(long)]
        reverse: bool,
    },

    /// Add a vertex, creating the graph file if needed
    AddVertex {
        /// Vertex label
        vertex: String,
    },

    /// Add a directed edge, creating the graph file if needed
    AddEdge {
        /// Edge source
        source: String,

        /// Edge target
        target: String,
    },

    /// Write the reversed graph as JSON
    Reverse {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Longest-path level of every vertex reachable from a root
    Levels {
        /// Root vertex (defaults to [traversal] root in config)
        root: Option<String>,

        /// Follow edges target → source (defaults to [traversal] reverse in config)
        #[arg(long, overrides_with = "no_reverse")]
        reverse: bool,

        /// Follow edges source → target even if config says reverse
        #[arg(long, overrides_with = "reverse")]
        no_reverse: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fail if a cycle is reachable from a root
    Check {
        /// Root vertex (defaults to [traversal] root in config)
        root: Option<String>,

        /// Follow edges target → source (defaults to [traversal] reverse in config)
        #[arg(long, overrides_with = "no_reverse")]
        reverse: bool,

        /// Follow edges source → target even if config says reverse
        #[arg(long, overrides_with = "reverse")]
        no_reverse: bool,
    },

    /// Export graph as DOT (Graphviz) or Mermaid flowchart
    Export {
        /// Output format: dot, mermaid (defaults to [export] format in config)
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[derive(Serialize)]
struct LevelEntry<'a> {
    vertex: &'a str,
    level: usize,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = DepgraphConfig::load(&project_root)?;
    let graph_path = cli
        .graph
        .clone()
        .unwrap_or_else(|| config.graph_path(&project_root));
    debug!("using graph file {}", graph_path.display());

    match cli.command {
        Commands::Info => cmd_info(&graph_path),
        Commands::Edges { reverse } => cmd_edges(&graph_path, reverse),
        Commands::Leaves { reverse } => cmd_leaves(&graph_path, reverse),
        Commands::AddVertex { vertex } => cmd_add_vertex(&graph_path, vertex),
        Commands::AddEdge { source, target } => cmd_add_edge(&graph_path, source, target),
        Commands::Reverse { output } => cmd_reverse(&graph_path, output.as_deref()),
        Commands::Levels {
            root,
            reverse,
            no_reverse,
            json,
        } => cmd_levels(
            &graph_path,
            &resolve_root(root, &config)?,
            resolve_reverse(reverse, no_reverse, &config),
            json,
        ),
        Commands::Check {
            root,
            reverse,
            no_reverse,
        } => cmd_check(
            &graph_path,
            &resolve_root(root, &config)?,
            resolve_reverse(reverse, no_reverse, &config),
        ),
        Commands::Export { format } => {
            let format = format.unwrap_or_else(|| config.export.format.clone());
            cmd_export(&graph_path, &format)
        }
    }
}

fn resolve_root(root: Option<String>, config: &DepgraphConfig) -> Result<String> {
    root.or_else(|| config.traversal.root.clone()).context(
        "no root vertex given. Pass one or set [traversal] root in .depgraph/config.toml",
    )
}

/// `--reverse` / `--no-reverse` win over `[traversal] reverse`.
fn resolve_reverse(reverse: bool, no_reverse: bool, config: &DepgraphConfig) -> bool {
    if reverse {
        true
    } else if no_reverse {
        false
    } else {
        config.traversal.reverse
    }
}

fn load_graph(path: &Path) -> Result<DirectedGraph<String>> {
    if !storage::exists(path) {
        anyhow::bail!(
            "No graph found at {}. Run `depgraph add-edge` to create one.",
            path.display()
        );
    }
    storage::load(path)
}

/// Load the graph, flipping every edge when `reverse` is set.
fn load_oriented(path: &Path, reverse: bool) -> Result<DirectedGraph<String>> {
    let graph = load_graph(path)?;
    Ok(if reverse { graph.reverse() } else { graph })
}

/// Load the graph for mutation, starting empty if the file does not exist yet.
fn load_or_new(path: &Path) -> Result<DirectedGraph<String>> {
    if storage::exists(path) {
        storage::load(path)
    } else {
        info!("creating new graph at {}", path.display());
        Ok(DirectedGraph::new())
    }
}

fn cmd_info(path: &Path) -> Result<()> {
    let graph = load_graph(path)?;
    let reversed = graph.reverse();

    println!("Graph: {}", path.display());
    println!("Vertices: {}", graph.vertex_count());
    println!("Edges: {}", graph.edge_count());
    println!("Leaves: {}", graph.leaves().len());

    let roots = reversed.leaves();
    println!("Roots: {}", roots.len());
    for root in roots {
        println!("  {}", root);
    }

    Ok(())
}

fn cmd_edges(path: &Path, reverse: bool) -> Result<()> {
    let graph = load_oriented(path, reverse)?;
    for (vertex, targets) in graph.edges() {
        if targets.is_empty() {
            println!("{}", vertex);
        } else {
            println!("{} -> {}", vertex, targets.join(", "));
        }
    }
    Ok(())
}

fn cmd_leaves(path: &Path, reverse: bool) -> Result<()> {
    let graph = load_oriented(path, reverse)?;
    for leaf in graph.leaves() {
        println!("{}", leaf);
    }
    Ok(())
}

fn cmd_add_vertex(path: &Path, vertex: String) -> Result<()> {
    let mut graph = load_or_new(path)?;
    let known = graph.contains_vertex(&vertex);
    graph.add_vertex(vertex.clone());
    storage::save(path, &graph)?;

    if known {
        info!("vertex {} already present", vertex);
    } else {
        info!("added vertex {}", vertex);
    }
    Ok(())
}

fn cmd_add_edge(path: &Path, source: String, target: String) -> Result<()> {
    let mut graph = load_or_new(path)?;
    info!("added edge {} -> {}", source, target);
    graph.add_edge(source, target);
    storage::save(path, &graph)
}

fn cmd_reverse(path: &Path, output: Option<&Path>) -> Result<()> {
    let reversed = load_graph(path)?.reverse();
    match output {
        Some(out) => {
            storage::save(out, &reversed)?;
            info!("wrote reversed graph to {}", out.display());
        }
        None => println!("{}", storage::to_json(&reversed)?),
    }
    Ok(())
}

fn cmd_levels(path: &Path, root: &str, reverse: bool, json: bool) -> Result<()> {
    let graph = load_oriented(path, reverse)?;
    let levels = graph.adjacency_to_node(&root.to_string())?;

    // Level first, then first-seen order for vertices at the same level.
    let mut ordered: Vec<LevelEntry> = graph
        .vertices()
        .filter_map(|v| {
            levels.get(v).map(|&level| LevelEntry {
                vertex: v.as_str(),
                level,
            })
        })
        .collect();
    ordered.sort_by_key(|entry| entry.level);

    if json {
        println!("{}", serde_json::to_string_pretty(&ordered)?);
    } else {
        for entry in &ordered {
            println!("{:>4}  {}", entry.level, entry.vertex);
        }
    }
    Ok(())
}

fn cmd_check(path: &Path, root: &str, reverse: bool) -> Result<()> {
    let graph = load_oriented(path, reverse)?;
    let levels = graph
        .adjacency_to_node(&root.to_string())
        .with_context(|| format!("cycle check from {} failed", root))?;

    println!(
        "OK: no cycles reachable from {} ({} vertices)",
        root,
        levels.len()
    );
    Ok(())
}

fn cmd_export(path: &Path, format: &str) -> Result<()> {
    let graph = load_graph(path)?;
    let export_format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;

    let output = depgraph_core::export::export(&graph, export_format);
    print!("{}", output);

    Ok(())
}
