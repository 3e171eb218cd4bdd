//! Export a graph as DOT (Graphviz) or a Mermaid flowchart.

use crate::graph::DirectedGraph;
use std::collections::HashMap;
use std::fmt::{self, Display, Write};
use std::hash::Hash;
use std::str::FromStr;

/// Export format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dot,
    Mermaid,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "mermaid" | "md" => Ok(Self::Mermaid),
            other => Err(format!(
                "unknown export format: {}. Use 'dot' or 'mermaid'.",
                other
            )),
        }
    }
}

/// Quote a label for DOT, escaping backslashes and double quotes.
fn dot_quote(label: &str) -> String {
    format!("\"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Write the graph as DOT (Graphviz) into `out`.
pub fn write_dot<T, W>(graph: &DirectedGraph<T>, out: &mut W) -> fmt::Result
where
    T: Eq + Hash + Clone + Display,
    W: Write,
{
    writeln!(out, "digraph depgraph {{")?;
    writeln!(out, "  rankdir=LR;")?;
    writeln!(out, "  node [shape=box, fontsize=10];")?;
    writeln!(out)?;

    for vertex in graph.vertices() {
        writeln!(out, "  {};", dot_quote(&vertex.to_string()))?;
    }

    writeln!(out)?;

    for (source, targets) in graph.edges() {
        let source = dot_quote(&source.to_string());
        for target in targets {
            writeln!(out, "  {} -> {};", source, dot_quote(&target.to_string()))?;
        }
    }

    writeln!(out, "}}")
}

/// Write the graph as a Mermaid flowchart into `out`.
///
/// Vertices get positional ids (`n0`, `n1`, ...) so arbitrary labels never clash
/// with Mermaid syntax.
pub fn write_mermaid<T, W>(graph: &DirectedGraph<T>, out: &mut W) -> fmt::Result
where
    T: Eq + Hash + Clone + Display,
    W: Write,
{
    let ids: HashMap<&T, String> = graph
        .vertices()
        .enumerate()
        .map(|(i, v)| (v, format!("n{}", i)))
        .collect();

    writeln!(out, "flowchart LR")?;
    for vertex in graph.vertices() {
        let label = vertex.to_string().replace('"', "#quot;");
        writeln!(out, "  {}[\"{}\"]", ids[vertex], label)?;
    }
    for (source, targets) in graph.edges() {
        for target in targets {
            if let (Some(from), Some(to)) = (ids.get(source), ids.get(target)) {
                writeln!(out, "  {} --> {}", from, to)?;
            }
        }
    }
    Ok(())
}

/// Export the graph as a DOT (Graphviz) string.
pub fn export_dot<T>(graph: &DirectedGraph<T>) -> String
where
    T: Eq + Hash + Clone + Display,
{
    let mut out = String::new();
    write_dot(graph, &mut out).expect("writing to a String cannot fail");
    out
}

/// Export the graph as a Mermaid flowchart string.
pub fn export_mermaid<T>(graph: &DirectedGraph<T>) -> String
where
    T: Eq + Hash + Clone + Display,
{
    let mut out = String::new();
    write_mermaid(graph, &mut out).expect("writing to a String cannot fail");
    out
}

/// Export the graph in the given format.
pub fn export<T>(graph: &DirectedGraph<T>, format: ExportFormat) -> String
where
    T: Eq + Hash + Clone + Display,
{
    match format {
        ExportFormat::Dot => export_dot(graph),
        ExportFormat::Mermaid => export_mermaid(graph),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph() -> DirectedGraph<String> {
        let mut graph = DirectedGraph::new();
        graph.add_edge("app".to_string(), "db".to_string());
        graph.add_edge("app".to_string(), "cache".to_string());
        graph.add_vertex("metrics".to_string());
        graph
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("dot".parse::<ExportFormat>(), Ok(ExportFormat::Dot));
        assert_eq!("Graphviz".parse::<ExportFormat>(), Ok(ExportFormat::Dot));
        assert_eq!("md".parse::<ExportFormat>(), Ok(ExportFormat::Mermaid));
        assert!("svg".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_dot() {
        let dot = export_dot(&make_graph());
        assert!(dot.starts_with("digraph depgraph {"));
        assert!(dot.contains("  \"metrics\";"));
        assert!(dot.contains("  \"app\" -> \"db\";"));
        assert!(dot.contains("  \"app\" -> \"cache\";"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_escapes_quotes() {
        let mut graph = DirectedGraph::new();
        graph.add_vertex("say \"hi\"".to_string());
        let dot = export_dot(&graph);
        assert!(dot.contains(r#""say \"hi\"""#));
    }

    #[test]
    fn test_export_mermaid() {
        let mermaid = export(&make_graph(), ExportFormat::Mermaid);
        assert!(mermaid.starts_with("flowchart LR"));
        assert!(mermaid.contains("n0[\"app\"]"));
        assert!(mermaid.contains("n3[\"metrics\"]"));
        assert!(mermaid.contains("n0 --> n1"));
        assert!(mermaid.contains("n0 --> n2"));
    }

    #[test]
    fn test_write_dot_matches_export() {
        let graph = make_graph();
        let mut out = String::new();
        write_dot(&graph, &mut out).unwrap();
        assert_eq!(out, export_dot(&graph));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_parallel_edges_repeat() {
        let mut graph = DirectedGraph::new();
        graph.add_edge("a".to_string(), "b".to_string());
        graph.add_edge("a".to_string(), "b".to_string());
        let dot = export_dot(&graph);
        assert_eq!(dot.matches("\"a\" -> \"b\"").count(), 2);
    }
}
