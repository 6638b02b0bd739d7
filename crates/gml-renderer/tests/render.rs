//! End-to-end rendering: GML source → evaluator → tracer → PPM on disk.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use gml_lang::{ErrorClass, compile};
use gml_renderer::{Raytracer, TracerConfig};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path = std::env::temp_dir().join(format!("gml_render_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn render(src: &str, dir: &TestDir) -> Result<(), gml_lang::Error> {
    let program = compile(src).unwrap_or_else(|e| panic!("compile failed: {e}"));
    let backend = Raytracer::new(TracerConfig::default()).with_output_dir(&dir.path);
    program.evaluate_with(&backend).map(drop)
}

/// Pixel (x, y) of a P6 image with the given header length.
fn pixel(bytes: &[u8], header: usize, width: usize, x: usize, y: usize) -> [u8; 3] {
    let i = header + 3 * (y * width + x);
    [bytes[i], bytes[i + 1], bytes[i + 2]]
}

const RED_BALL: &str = "
    { /v /u /face 1.0 0.0 0.0 point 1.0 0.0 1.0 } sphere /ball
    0.2 0.2 0.2 point
    [ 0.0 0.0 1.0 point 1.0 1.0 1.0 point light ]
    ball 0.0 0.0 4.0 translate
    1 90.0 9 7 \"ball.ppm\" render
";

#[test]
fn sphere_renders_to_ppm() {
    let dir = TestDir::new("sphere");
    render(RED_BALL, &dir).unwrap_or_else(|e| panic!("render failed: {e}"));

    let bytes = fs::read(dir.path.join("ball.ppm")).expect("read ppm");
    let header = b"P6 9 7 255\n";
    assert_eq!(&bytes[..header.len()], header);
    assert_eq!(bytes.len(), header.len() + 9 * 7 * 3);

    // light comes from behind the eye, so the facing point is ambient + full diffuse
    let [r, g, b] = pixel(&bytes, header.len(), 9, 4, 3);
    assert!(r > 200, "center red channel {r}");
    assert_eq!((g, b), (0, 0));
    assert_eq!(pixel(&bytes, header.len(), 9, 0, 0), [0, 0, 0]);
}

#[test]
fn unlit_scene_shows_only_ambient() {
    let dir = TestDir::new("ambient");
    let src = "
        { /v /u /face 1.0 1.0 1.0 point 1.0 0.0 1.0 } cube
        -0.5 -0.5 2.0 translate /box
        0.5 0.5 0.5 point [ ] box 0 60.0 1 1 \"amb.ppm\" render
    ";
    render(src, &dir).unwrap_or_else(|e| panic!("render failed: {e}"));
    let bytes = fs::read(dir.path.join("amb.ppm")).expect("read ppm");
    assert_eq!(&bytes[bytes.len() - 3..], &[127, 127, 127]);
}

#[test]
fn surface_errors_keep_their_class() {
    let dir = TestDir::new("surface_err");
    let src = "
        { /v /u /face 1 } sphere 0.0 0.0 3.0 translate /s
        0.0 0.0 0.0 point [ ] s 0 90.0 3 3 \"bad.ppm\" render
    ";
    let err = render(src, &dir).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Runtime);
    assert!(!dir.path.join("bad.ppm").exists());
}

#[test]
fn unwritable_output_is_a_render_error() {
    let dir = TestDir::new("unwritable");
    let src = RED_BALL.replace("ball.ppm", "missing/ball.ppm");
    let err = render(&src, &dir).unwrap_err();
    assert!(matches!(err, gml_lang::Error::Render(_)), "{err:?}");
}
