//! Integration tests for loading SU2 files through the public API.
//!
//! Fixtures are written to temporary files so every test goes through the
//! same path a host would: open, stream, parse, assemble.

use std::io::Write;
use std::sync::Arc;

use su2mesh::*;
use tempfile::NamedTempFile;

const UNIT_SQUARE: &str = "\
% unit square, two triangles
NDIME= 2
NPOIN= 4
0.0 0.0 0
1.0 0.0 1
1.0 1.0 2
0.0 1.0 3
NELEM= 2
5 0 1 2 0
5 0 2 3 1
NMARK= 1
MARKER_TAG= wall
MARKER_ELEMS= 4
3 0 1
3 1 2
3 2 3
3 3 0
";

const MIXED_3D: &str = "\
NDIME= 3
NPOIN= 10
0 0 0
1 0 0
1 1 0
0 1 0
0 0 1
1 0 1
1 1 1
0 1 1
0.5 0.5 2
0.5 0.5 -1
NELEM= 3
12 0 1 2 3 4 5 6 7
14 4 5 6 7 8
10 0 1 2 9
NMARK= 3
MARKER_TAG= top
MARKER_ELEMS= 4
5 4 5 8
5 5 6 8
5 6 7 8
5 7 4 8
MARKER_TAG= unused
MARKER_ELEMS= 0
MARKER_TAG= sides
MARKER_ELEMS= 2
9 0 1 5 4
9 3 2 6 7
";

fn fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write fixture");
    file.flush().expect("failed to flush fixture");
    file
}

fn load_fixture(contents: &str) -> Result<(VolumeMesh, BoundaryCollection)> {
    let file = fixture(contents);
    load(file.path())
}

#[test]
fn test_unit_square() {
    let (volume, boundaries) = load_fixture(UNIT_SQUARE).expect("load failed");

    assert_eq!(volume.dimension(), Dimension::Two);
    assert_eq!(volume.num_points(), 4);
    assert_eq!(volume.num_elements(), 2);
    assert!(volume
        .elements()
        .iter()
        .all(|e| e.element_type() == ElementType::Triangle));
    assert_eq!(volume.coordinates(2), Some(vec![1.0, 1.0]));

    assert_eq!(boundaries.len(), 1);
    let wall = boundaries.get("wall").expect("missing marker");
    assert_eq!(wall.num_elements(), 4);
    assert!(wall
        .elements()
        .iter()
        .all(|e| e.element_type() == ElementType::Line));
    assert_eq!(wall.elements()[3].vertices(), &[3, 0]);
}

#[test]
fn test_mixed_3d_mesh() {
    let (volume, boundaries) = load_fixture(MIXED_3D).expect("load failed");

    let counts = volume.element_type_counts();
    assert_eq!(counts.get("hexahedron"), Some(&1));
    assert_eq!(counts.get("pyramid"), Some(&1));
    assert_eq!(counts.get("tetrahedron"), Some(&1));

    let cell_types: Vec<u8> = volume.vtk_cells().map(|(t, _)| t).collect();
    assert_eq!(cell_types, vec![12, 14, 10]);

    assert_eq!(
        boundaries.names().collect::<Vec<_>>(),
        vec!["top", "unused", "sides"]
    );
    assert!(boundaries.get("unused").unwrap().is_empty());
    assert_eq!(boundaries.num_elements(), 6);

    let (min, max) = volume.bounding_box().unwrap();
    assert_eq!(min, DVec3::new(0.0, 0.0, -1.0));
    assert_eq!(max, DVec3::new(1.0, 1.0, 2.0));
}

#[test]
fn test_element_count_mismatch() {
    let source = UNIT_SQUARE.replace("NELEM= 2", "NELEM= 5");
    let err = load_fixture(&source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ElementCountMismatch);
    assert!(err.to_string().contains("declared 5"));
}

#[test]
fn test_vertex_index_equal_to_point_count() {
    let source = UNIT_SQUARE.replace("5 0 2 3 1", "5 0 2 4 1");
    let err = load_fixture(&source).unwrap_err();
    match err {
        Su2Error::DanglingVertexReference {
            line,
            index,
            num_points,
        } => {
            assert_eq!(line, 10);
            assert_eq!(index, 4);
            assert_eq!(num_points, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_marker_name() {
    let source = "\
NDIME= 2
NPOIN= 3
0 0
1 0
0 1
NELEM= 1
5 0 1 2
NMARK= 2
MARKER_TAG= inlet
MARKER_ELEMS= 1
3 0 1
MARKER_TAG= inlet
MARKER_ELEMS= 1
3 1 2
";
    let err = load_fixture(source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateMarkerName);
    assert!(err.to_string().contains("inlet"));
}

#[test]
fn test_line_element_in_3d_volume() {
    let source = MIXED_3D
        .replace("NELEM= 3", "NELEM= 4")
        .replace("10 0 1 2 9\n", "10 0 1 2 9\n3 0 1\n");
    let err = load_fixture(&source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionTypeMismatch);
    assert_eq!(err.line(), Some(17));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("absent.su2")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.line(), None);
}

#[test]
fn test_reload_is_deterministic() {
    let file = fixture(MIXED_3D);
    let (volume_a, boundaries_a) = load(file.path()).unwrap();
    let (volume_b, boundaries_b) = load(file.path()).unwrap();

    assert_eq!(volume_a, volume_b);
    assert_eq!(boundaries_a, boundaries_b);
    // Independent loads never share storage.
    assert!(!Arc::ptr_eq(
        &volume_a.shared_points(),
        &volume_b.shared_points()
    ));
}

#[test]
fn test_boundaries_share_volume_points() {
    let (volume, boundaries) = load_fixture(MIXED_3D).unwrap();
    assert!(Arc::ptr_eq(
        &volume.shared_points(),
        &boundaries.shared_points()
    ));

    let top = boundaries.position("top").unwrap();
    let apex = boundaries.element_points(top, 0).unwrap()[2];
    assert_eq!(apex, volume.point(8).unwrap());
}

#[test]
fn test_options_from_json_file() {
    let options_file = fixture(r#"{ "section_order": "ElementsFirst", "id_column": "Validate" }"#);
    let options = ReaderOptions::from_json_file(options_file.path()).unwrap();

    let su2_layout = "\
NDIME= 2
NELEM= 1
5 0 1 2 0
NPOIN= 3
0 0 0
1 0 1
0 1 2
NMARK= 0
";
    let mesh = fixture(su2_layout);
    let (volume, boundaries) = load_with_options(mesh.path(), &options).unwrap();
    assert_eq!(volume.num_points(), 3);
    assert!(boundaries.is_empty());

    // The same layout is rejected by default.
    let err = load(mesh.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedSection);
}

#[test]
fn test_invalid_options() {
    let err = ReaderOptions::from_json_str(r#"{ "compact": false }"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOptions);
}

#[test]
fn test_load_from_reader() {
    let cursor = std::io::Cursor::new(UNIT_SQUARE.as_bytes().to_vec());
    let (volume, _) = load_from_reader(cursor, &ReaderOptions::default()).unwrap();
    assert_eq!(volume.num_elements(), 2);
}

#[test]
fn test_init_logging_is_idempotent() {
    init_logging();
    init_logging();
    assert!(load_from_str(UNIT_SQUARE).is_ok());
}

// -----------------------------------------------------------------------------
// Host adapter
// -----------------------------------------------------------------------------

#[test]
fn test_reader_ports() {
    let file = fixture(MIXED_3D);
    let mut reader = Su2MeshReader::new();
    reader.set_file_name(file.path());
    let output = reader.update().expect("update failed");

    let PortData::Volume(volume) = output.port(OutputPort::VolumeMesh) else {
        panic!("port 0 should carry the volume mesh");
    };
    assert_eq!(volume.num_elements(), 3);

    let PortData::Blocks(blocks) = output.port(OutputPort::BoundaryMeshes) else {
        panic!("port 1 should carry boundary blocks");
    };
    // The empty marker produces no block.
    assert_eq!(
        blocks.names().collect::<Vec<_>>(),
        vec!["marker:top", "marker:sides"]
    );

    let top = blocks.find_marker("top").unwrap();
    assert_eq!(top.global_indices(), &[4, 5, 6, 7, 8]);
    assert_eq!(top.num_points(), 5);
    for (local, &global) in top.global_indices().iter().enumerate() {
        assert_eq!(top.points()[local], volume.point(global as usize).unwrap());
    }
    let cells: Vec<(u8, Vec<u32>)> = top.vtk_cells().map(|(t, c)| (t, c.to_vec())).collect();
    assert_eq!(cells[0], (5, vec![0, 1, 4]));

    let sides = blocks.find_marker("sides").unwrap();
    assert_eq!(sides.global_indices(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert!(sides.vtk_cells().all(|(t, _)| t == 9));
}

#[test]
fn test_reader_updates_only_when_modified() {
    let first = fixture(UNIT_SQUARE);
    let second = fixture(MIXED_3D);
    let mut reader = Su2MeshReader::new();

    reader.set_file_name(first.path());
    assert!(reader.is_modified());
    reader.update().unwrap();
    assert_eq!(reader.load_count(), 1);
    assert!(!reader.is_modified());

    // Same name again: cached output, no reparse.
    assert!(!reader.set_file_name(first.path()));
    reader.update().unwrap();
    assert_eq!(reader.load_count(), 1);

    // New name: fresh parse.
    assert!(reader.set_file_name(second.path()));
    let output = reader.update().unwrap();
    assert_eq!(output.volume().dimension(), Dimension::Three);
    assert_eq!(reader.load_count(), 2);
}

const TRIANGLE: &str = "\
NDIME= 2
NPOIN= 3
0 0
1 0
0 1
NELEM= 1
5 0 1 2
NMARK= 0
";

#[test]
fn test_reader_rereads_file_changed_on_disk() {
    let file = fixture(TRIANGLE);
    let mut reader = Su2MeshReader::new();
    reader.set_file_name(file.path());
    assert_eq!(reader.update().unwrap().volume().num_points(), 3);
    assert!(!reader.is_modified());

    let square = TRIANGLE
        .replace("NPOIN= 3", "NPOIN= 4")
        .replace("0 1\n", "0 1\n1 1\n");
    std::fs::write(file.path(), square).unwrap();

    assert!(reader.is_modified());
    let output = reader.update().unwrap();
    assert_eq!(output.volume().num_points(), 4);
    assert_eq!(reader.load_count(), 2);

    let (volume, _) = load(file.path()).unwrap();
    assert_eq!(reader.output().unwrap().volume().as_ref(), &volume);
}

#[test]
fn test_reader_reload_forces_fresh_parse() {
    let file = fixture(TRIANGLE);
    let mut reader = Su2MeshReader::new();
    reader.set_file_name(file.path());
    let first = reader.update().unwrap().volume();

    reader.update().unwrap();
    assert_eq!(reader.load_count(), 1);

    reader.reload();
    assert!(reader.is_modified());
    let second = reader.update().unwrap().volume();
    assert_eq!(reader.load_count(), 2);
    assert_eq!(first, second);
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_failed_update_keeps_previous_output() {
    let good = fixture(UNIT_SQUARE);
    let bad = fixture(&UNIT_SQUARE.replace("NMARK= 1", "NMARK= 2"));
    let mut reader = Su2MeshReader::new();

    reader.set_file_name(good.path());
    let before = reader.update().unwrap().volume();

    reader.set_file_name(bad.path());
    let err = reader.update().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedFile);

    let kept = reader.output().expect("previous output dropped").volume();
    assert!(Arc::ptr_eq(&before, &kept));
    assert!(reader.is_modified());
}

#[test]
fn test_reader_without_compaction() {
    let file = fixture(UNIT_SQUARE);
    let mut reader =
        Su2MeshReader::with_options(ReaderOptions::default().with_compact_boundaries(false));
    reader.set_file_name(file.path());
    reader.update().unwrap();

    match reader.port(OutputPort::BoundaryMeshes) {
        Some(PortData::Markers(markers)) => assert_eq!(markers.len(), 1),
        other => panic!("unexpected port data: {other:?}"),
    }
    assert!(reader.output().unwrap().blocks().is_none());
}
