use super::*;
use crate::error::LayoutError;

#[test]
fn test_parse_minimal_document() {
    let doc = GraphDocument::from_json(r#"{"nodes": [{"id": "a"}]}"#).unwrap();
    assert_eq!(doc.direction, None);
    assert_eq!(doc.nodes.len(), 1);
    assert!(doc.edges.is_empty());
}

#[test]
fn test_missing_dimensions_use_config() {
    let doc = GraphDocument::from_json(r#"{"nodes": [{"id": "a"}, {"id": "b", "width": 100}]}"#)
        .unwrap();
    let config = LayoutConfig {
        node_height: 50.0,
        ..LayoutConfig::default()
    };
    let nodes = doc.nodes(&config);
    assert_eq!(nodes[0], LayoutNode::new("a", 260.0, 50.0));
    assert_eq!(nodes[1], LayoutNode::new("b", 100.0, 50.0));
}

#[test]
fn test_invalid_direction_rejected() {
    let err = GraphDocument::from_json(r#"{"direction": "sideways", "nodes": []}"#).unwrap_err();
    assert!(matches!(err, LayoutError::Json(_)));
    assert!(err.to_string().contains("sideways"));
}

#[test]
fn test_document_direction_and_override() {
    let doc = GraphDocument::from_json(
        r#"{"direction": "LR",
            "nodes": [{"id": "a"}, {"id": "b"}],
            "edges": [{"source": "a", "target": "b"}]}"#,
    )
    .unwrap();
    let config = LayoutConfig::default();

    let lr = doc.layout(None, &config, LayoutMode::Full).unwrap();
    assert_eq!(lr.get("a").unwrap().y, lr.get("b").unwrap().y);
    assert!(lr.get("a").unwrap().x < lr.get("b").unwrap().x);

    let tb = doc.layout(Some(Direction::TB), &config, LayoutMode::Full).unwrap();
    assert_eq!(tb.get("a").unwrap().x, tb.get("b").unwrap().x);
    assert!(tb.get("a").unwrap().y < tb.get("b").unwrap().y);
}

#[test]
fn test_connected_only_mode_skips_grid() {
    let doc = GraphDocument::from_json(r#"{"nodes": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
    let config = LayoutConfig::default();
    let out = doc.layout(None, &config, LayoutMode::ConnectedOnly).unwrap();
    // side by side on a single rank, inside the margin
    assert_eq!((out.nodes[0].x, out.nodes[0].y), (60.0, 60.0));
    assert_eq!((out.nodes[1].x, out.nodes[1].y), (380.0, 60.0));

    let full = doc.layout(None, &config, LayoutMode::Full).unwrap();
    assert_eq!((full.nodes[1].x, full.nodes[1].y), (300.0, 100.0));
}

#[test]
fn test_dangling_edge_in_document() {
    let doc = GraphDocument::from_json(
        r#"{"nodes": [{"id": "a"}], "edges": [{"source": "a", "target": "zzz"}]}"#,
    )
    .unwrap();
    let err = doc
        .layout(None, &LayoutConfig::default(), LayoutMode::Full)
        .unwrap_err();
    assert!(matches!(err, LayoutError::DanglingEdge { ref missing, .. } if missing == "zzz"));
}
