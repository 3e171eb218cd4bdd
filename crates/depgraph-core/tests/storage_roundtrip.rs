use depgraph_core::graph::DirectedGraph;
use depgraph_core::storage;
use tempfile::TempDir;

fn make_graph() -> DirectedGraph<String> {
    let mut graph = DirectedGraph::new();
    graph.add_edge("ConfigReadyStage".to_string(), "DbReadyStage".to_string());
    graph.add_edge("DbReadyStage".to_string(), "AuthReadyStage".to_string());
    graph.add_edge("DbReadyStage".to_string(), "DevSetup".to_string());
    graph.add_vertex("Standalone".to_string());
    graph
}

#[test]
fn test_save_and_load_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("depgraph.json");

    let graph = make_graph();
    storage::save(&path, &graph).unwrap();
    assert!(storage::exists(&path));

    let loaded = storage::load(&path).unwrap();
    assert_eq!(loaded.vertex_count(), 5);
    assert_eq!(loaded.edge_count(), 3);
    let original: Vec<_> = graph.vertices().collect();
    let restored: Vec<_> = loaded.vertices().collect();
    assert_eq!(original, restored);
    assert_eq!(
        loaded.targets(&"DbReadyStage".to_string()).unwrap(),
        ["AuthReadyStage", "DevSetup"]
    );
}

#[test]
fn test_save_creates_parent_dirs() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("graphs").join("init.json");

    storage::save(&path, &make_graph()).unwrap();
    assert!(storage::exists(&path));
}

#[test]
fn test_load_nonexistent() {
    let tmp = TempDir::new().unwrap();
    let result = storage::load(&tmp.path().join("missing.json"));
    assert!(result.is_err(), "loading a missing file should fail");
}

#[test]
fn test_load_rejects_non_map() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.json");
    std::fs::write(&path, r#"["A", "B"]"#).unwrap();

    let err = storage::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid graph file"));
}

#[test]
fn test_json_format() {
    let json = storage::to_json(&make_graph()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["DbReadyStage"][0], "AuthReadyStage");
    assert_eq!(value["Standalone"], serde_json::json!([]));
}

#[test]
fn test_from_json_handwritten_file() {
    // Hand-written files may omit leaves; they are registered on load.
    let graph = storage::from_json(r#"{"__root__": ["ConfigReadyStage"]}"#).unwrap();
    assert_eq!(graph.leaves(), ["ConfigReadyStage"]);
    let levels = graph.adjacency_to_node(&"__root__".to_string()).unwrap();
    assert_eq!(levels["ConfigReadyStage"], 1);
}
