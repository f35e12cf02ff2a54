use serde_json::{json, Value};

/// The primary accent color used by the default layout.
pub const PRIMARY: [f32; 3] = [0.227, 0.42, 0.663];

pub fn text(content: &str, x: f32, y: f32, size: f32) -> Value {
    json!({ "text": content, "x": x, "y": y, "size": size, "font": "TrebuchetMS", "color": 0 })
}

pub fn bold_text(content: &str, x: f32, y: f32, size: f32) -> Value {
    json!({ "text": content, "x": x, "y": y, "size": size, "font": "TrebuchetMS", "color": 0x3A6BA9, "bold": true })
}

pub fn rect(x: f32, y: f32, width: f32, height: f32, fill: [f32; 3]) -> Value {
    json!({ "type": "rect", "x": x, "y": y, "width": width, "height": height, "fill_color": fill })
}

/// A small but representative CV page.
pub fn sample_text() -> Value {
    Value::Array(vec![
        bold_text("JANE DOE", 40.0, 60.0, 22.0),
        text("someone@example.com", 40.0, 100.0, 9.0),
        text("@jdoe", 40.0, 115.0, 9.0),
        text("jdoe-dev", 40.0, 130.0, 9.0),
        bold_text("EXPERIENCE", 230.0, 200.0, 12.0),
        bold_text("Senior Engineer", 230.0, 220.0, 10.0),
        text("Oslo, Norway", 300.0, 220.0, 9.0),
        text("Built a distributed cache", 230.0, 240.0, 9.0),
        text("2019 - 2023", 420.0, 240.0, 9.0),
        text("Profile: jdoe-dev", 230.0, 700.0, 9.0),
        text("IEEE Access, DOI: 10.1109/ACCESS", 230.0, 720.0, 8.0),
    ])
}

pub fn sample_shapes() -> Value {
    Value::Array(vec![
        rect(0.0, 0.0, 200.0, 806.0, PRIMARY),
        rect(230.0, 600.0, 350.0, 1.0, PRIMARY),
        rect(10.0, 10.0, 5.0, 5.0, [0.9, 0.9, 0.9]),
    ])
}
