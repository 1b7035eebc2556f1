use nalgebra::Vector3;
use strokemesh::{
    mesh::{NUMBER_OF_SIDES, TubeSettings, build_tube_mesh},
    simplify::{LineSimplifier, perpendicular_distance},
    stroke::Stroke,
};

#[test]
fn test_collinear_stroke() {
    let mut line = LineSimplifier::new();
    for z in [0.0, 1.0, 2.0] {
        line.append(Vector3::new(0.0, 0.0, z));
    }
    line.finish();
    assert_eq!(line.points().len(), 2);

    let mesh = build_tube_mesh(0.005, line.points(), ()).unwrap();
    let stride = NUMBER_OF_SIDES + 1;
    assert_eq!(mesh.vertices.len(), 2 * stride + 2 * (stride + 1));
    assert_eq!(
        mesh.triangles.len(),
        NUMBER_OF_SIDES * 2 + 2 * NUMBER_OF_SIDES
    );

    // The far ring is parameterized by the full length of the stroke
    for v in &mesh.vertices[stride..2 * stride] {
        assert!((v.uv.y - 2.0).abs() < 1e-6, "bad uv {:?}", v.uv);
    }
}

#[test]
fn test_streamed_stroke() {
    // A wobbly stroke, drawn as a dense stream of samples
    let mut stroke = Stroke::new(TubeSettings::default(), "pen");
    let samples: Vec<_> = (0..500)
        .map(|i| {
            let t = i as f32 * 0.002;
            Vector3::new(t, 0.05 * (t * 20.0).sin(), 0.02 * t)
        })
        .collect();
    let mut meshes = 0;
    for s in &samples {
        stroke.append(*s);
        if let Some(mesh) = stroke.mesh() {
            assert_eq!(mesh.material, "pen");
            meshes += 1;
        }
    }
    stroke.finish();
    assert!(meshes > 0);
    assert!(stroke.points().len() < samples.len());

    let pts = stroke.points();
    for w in pts.windows(2) {
        assert!((w[1] - w[0]).norm() >= 0.001);
    }

    let mesh = stroke.mesh().unwrap();
    assert_eq!(mesh, stroke.mesh().unwrap());

    // Rings advance monotonically along the stroke
    let stride = NUMBER_OF_SIDES + 1;
    let vs: Vec<f32> = (0..pts.len())
        .map(|i| mesh.vertices[i * stride].uv.y)
        .collect();
    assert!(vs.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_straight_stroke_tolerance() {
    let mut line = LineSimplifier::new();
    for i in 0..100 {
        line.append(Vector3::new(0.0, i as f32 * 0.003, i as f32 * 0.004));
    }
    let pts = line.points();
    let (first, last) = (pts[0], pts[pts.len() - 1]);
    for p in pts {
        let d = perpendicular_distance(&first, &last, p);
        assert!(d <= 0.005, "{p:?} is {d} from the line");
    }
}
