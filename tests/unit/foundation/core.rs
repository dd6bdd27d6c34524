use super::*;

#[test]
fn root_id_is_zero() {
    assert_eq!(NodeId::ROOT, NodeId(0));
    assert!(NodeId(0).is_root());
    assert!(!NodeId(7).is_root());
    assert_eq!(NodeId(7).to_string(), "#7");
}

#[test]
fn node_id_serializes_as_plain_integer() {
    assert_eq!(serde_json::to_string(&NodeId(42)).unwrap(), "42");
    let id: NodeId = serde_json::from_str("3").unwrap();
    assert_eq!(id, NodeId(3));
}

#[test]
fn matrix_maps_to_affine_in_canvas_order() {
    assert_eq!(Matrix::IDENTITY.to_affine(), Affine::IDENTITY);

    let m = Matrix {
        a: 2.0,
        b: 0.0,
        c: 0.0,
        d: 3.0,
        tx: 10.0,
        ty: -4.0,
    };
    let p = m.to_affine() * Point::new(1.0, 1.0);
    assert_eq!(p, Point::new(12.0, -1.0));
    assert_eq!(
        Matrix::translate(5.0, 6.0).to_affine(),
        Affine::translate(Vec2::new(5.0, 6.0))
    );
}

#[test]
fn matrix_rejects_unknown_fields() {
    let ok: Result<Matrix, _> =
        serde_json::from_str(r#"{"a":1,"b":0,"c":0,"d":1,"tx":0,"ty":0}"#);
    assert!(ok.is_ok());
    let bad: Result<Matrix, _> =
        serde_json::from_str(r#"{"a":1,"b":0,"c":0,"d":1,"tx":0,"ty":0,"z":1}"#);
    assert!(bad.is_err());
}
