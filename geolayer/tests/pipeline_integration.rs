//! End-to-end test of one fetch cycle: raw payloads through schema
//! resolution, decoding, reprojection and persistence.

use geolayer::config::ConfigFile;
use geolayer::document::RawDocument;
use geolayer::pipeline::Pipeline;
use geolayer::store;

fn parse(payloads: &[&str]) -> Vec<RawDocument> {
    payloads
        .iter()
        .map(|p| RawDocument::parse_payload(p).expect("test payload should parse"))
        .collect()
}

#[test]
fn full_cycle_reconstructs_titled_layers() {
    let documents = parse(&[
        // Metadata with the descriptor nested several levels down,
        // exactly as the tile server buries it
        r#"cb({"Result": {"children": [{"content": {"properties": {
            "LayerID": "X42",
            "name": "X42",
            "title": "Охотничьи угодья",
            "attributes": ["name", "area_ha"]
        }}}]}})"#,
        // Two value documents feeding the same layer
        r#"cb({"LayerName": "X42", "values": [
            [0, "Зона 1", 120.5, {"type": "Point", "coordinates": [0.0, 0.0]}],
            [1, "Зона 2", 64.0, {"type": "Point", "coordinates": [111319.49079327357, 0.0]}]
        ]})"#,
        r#"cb({"LayerName": "X42", "values": [
            [2, "Зона 3", 7.25, {"type": "Point", "coordinates": [0.0, 0.0]}]
        ]})"#,
    ]);

    let pipeline = Pipeline::new(&ConfigFile::default()).unwrap();
    let layers = pipeline.process(&documents).unwrap();

    assert_eq!(layers.len(), 1);
    let features = layers.get("Охотничьи угодья").expect("resolved title");
    assert_eq!(features.len(), 3, "both documents must contribute");

    // Properties keep tuple order and names
    let first = &features[0];
    let keys: Vec<&String> = first.properties.keys().collect();
    assert_eq!(keys, ["name", "area_ha"]);

    // Second feature sat one Mercator degree east, now ~1.0 in WGS84
    match &features[1].geometry {
        Some(geo_types::Geometry::Point(p)) => {
            assert!((p.x() - 1.0).abs() < 1e-9, "longitude {}", p.x());
            assert!(p.y().abs() < 1e-9);
        }
        other => panic!("expected point, got {:?}", other),
    }
}

#[test]
fn malformed_geometries_drop_features_not_cycles() {
    let documents = parse(&[
        r#"({"LayerName": "orphan", "values": [
            [0, "ok", {"type": "Point", "coordinates": [1.0, 2.0]}],
            [1, "broken", {"type": "Polygon"}],
            [2, "also ok", {"type": "Point", "coordinates": [3.0, 4.0]}]
        ]})"#,
    ]);

    let pipeline = Pipeline::new(&ConfigFile::default()).unwrap();
    let layers = pipeline.process(&documents).unwrap();

    // No metadata at all: placeholder names, identifier as label
    let features = layers.get("orphan").expect("identifier fallback label");
    assert_eq!(features.len(), 2, "only the broken tuple is dropped");
    assert_eq!(
        features[0].properties["property_1"],
        serde_json::json!("ok")
    );
}

#[test]
fn persisted_cycle_output_round_trips() {
    let documents = parse(&[
        r#"({"meta": {"LayerID": "L", "name": "L", "title": "Trails", "attributes": ["label"]}})"#,
        r#"({"LayerName": "L", "values": [
            [0, "north", {"type": "LineString", "coordinates": [[0.0, 0.0], [111319.49079327357, 0.0]]}]
        ]})"#,
    ]);

    let pipeline = Pipeline::new(&ConfigFile::default()).unwrap();
    let layers = pipeline.process(&documents).unwrap();

    let temp = tempfile::TempDir::new().unwrap();
    let region_dir =
        store::write_region(temp.path(), "county", "region", &layers, false).unwrap();

    let reloaded = store::read_collection(&region_dir.join("Trails.geojson")).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].properties["label"], serde_json::json!("north"));
    assert_eq!(reloaded[0], layers.get("Trails").unwrap()[0]);
}
