//! Synthetic area log builder shared by integration tests.

#![allow(dead_code)]

pub const BOUNDARY: &str = "Entries to program clipmodel";

/// One object to render into a synthetic log.
#[derive(Debug, Clone)]
pub enum TestObject {
    Closed { name: String, areas: Vec<f64> },
    Scattered { name: String, points: Vec<u64> },
    Open { name: String },
}

pub fn closed(name: &str, areas: &[f64]) -> TestObject {
    TestObject::Closed {
        name: name.to_string(),
        areas: areas.to_vec(),
    }
}

pub fn scattered(name: &str, points: &[u64]) -> TestObject {
    TestObject::Scattered {
        name: name.to_string(),
        points: points.to_vec(),
    }
}

pub fn open(name: &str) -> TestObject {
    TestObject::Open {
        name: name.to_string(),
    }
}

/// Render images into `imodinfo`-style text, one boundary per image.
pub fn build_log(images: &[Vec<TestObject>]) -> String {
    let mut log = String::from("areas.com: synthetic model\n\n");
    for (i, objects) in images.iter().enumerate() {
        log.push_str(&format!(" {BOUNDARY}\n  Image {}\n\n", i + 1));
        for (n, obj) in objects.iter().enumerate() {
            let n = n + 1;
            match obj {
                TestObject::Closed { name, areas } => {
                    log.push_str(&format!(
                        "OBJECT #{n}\n        NAME:  {name}\n        object uses closed contours.\n\n"
                    ));
                    for (c, area) in areas.iter().enumerate() {
                        log.push_str(&format!(
                            "        CONTOUR #{},{n},0  12 points, length = 40.5, area = {area}\n",
                            c + 1
                        ));
                    }
                    log.push_str("        Total cylinder surface area = 0\n\n");
                }
                TestObject::Scattered { name, points } => {
                    log.push_str(&format!(
                        "OBJECT #{n}\n        NAME:  {name}\n        object uses scattered points.\n\n"
                    ));
                    for (c, p) in points.iter().enumerate() {
                        log.push_str(&format!("        CONTOUR #{},{n},0  {p} points\n", c + 1));
                    }
                    log.push('\n');
                }
                TestObject::Open { name } => {
                    log.push_str(&format!(
                        "OBJECT #{n}\n        NAME:  {name}\n        object uses open contours.\n\n"
                    ));
                }
            }
        }
    }
    log
}

pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("fixture missing")
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
