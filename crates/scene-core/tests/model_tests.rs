use scene_core::{BoatMesh, ModelError};

// Single right triangle, positions + u16 indices, buffer embedded as a data
// URI so the whole asset fits in one string.
const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "mesh": 0 }],
  "meshes": [{
    "primitives": [{
      "attributes": { "POSITION": 0 },
      "indices": 1
    }]
  }],
  "accessors": [
    {
      "bufferView": 0,
      "componentType": 5126,
      "count": 3,
      "type": "VEC3",
      "min": [0.0, 0.0, 0.0],
      "max": [1.0, 1.0, 0.0]
    },
    {
      "bufferView": 1,
      "componentType": 5123,
      "count": 3,
      "type": "SCALAR"
    }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "buffers": [{
    "byteLength": 42,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIA"
  }]
}"#;

#[test]
fn decodes_a_minimal_triangle() {
    let mesh = BoatMesh::from_gltf_bytes(TRIANGLE_GLTF.as_bytes()).unwrap();
    assert_eq!(mesh.positions.len(), 3);
    assert_eq!(mesh.normals.len(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.positions[1], [1.0, 0.0, 0.0]);
}

#[test]
fn missing_normals_are_synthesized() {
    let mesh = BoatMesh::from_gltf_bytes(TRIANGLE_GLTF.as_bytes()).unwrap();
    // Triangle lies in the XY plane wound counter-clockwise, so the face
    // normal points along +Z and every vertex shares it.
    for normal in &mesh.normals {
        assert!((normal[0]).abs() < 1e-6);
        assert!((normal[1]).abs() < 1e-6);
        assert!((normal[2] - 1.0).abs() < 1e-6);
    }
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = BoatMesh::from_gltf_bytes(b"not a gltf document").unwrap_err();
    assert!(matches!(err, ModelError::Decode(_)));
}

#[test]
fn empty_document_reports_no_geometry() {
    let gltf = r#"{
      "asset": { "version": "2.0" },
      "scene": 0,
      "scenes": [{ "nodes": [] }]
    }"#;
    let err = BoatMesh::from_gltf_bytes(gltf.as_bytes()).unwrap_err();
    assert!(matches!(err, ModelError::NoGeometry));
}
