use lopdf::content::Operation;
use lopdf::{Dictionary, Document as LopdfDocument, Object};
use vitae_render_lopdf::encoding;

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("expected a number, got {:?}", other),
    }
}

fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).expect("dangling reference"),
        other => other,
    }
}

fn dict<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> &'a Dictionary {
    resolve(doc, obj).as_dict().expect("expected a dictionary")
}

fn first_page(doc: &LopdfDocument) -> &Dictionary {
    let page_id = *doc.get_pages().get(&1).expect("page 1 should exist");
    doc.get_object(page_id).and_then(Object::as_dict).expect("page should be a dictionary")
}

/// Decoded content stream operations of the first page.
pub fn operations(doc: &LopdfDocument) -> Vec<Operation> {
    let page_id = *doc.get_pages().get(&1).expect("page 1 should exist");
    doc.get_and_decode_page_content(page_id)
        .expect("page content should decode")
        .operations
}

pub fn count_operator(doc: &LopdfDocument, operator: &str) -> usize {
    operations(doc).iter().filter(|op| op.operator == operator).count()
}

/// Every string shown with `Tj`, decoded from WinAnsi, in draw order.
pub fn shown_text(doc: &LopdfDocument) -> Vec<String> {
    operations(doc)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => {
                Some(bytes.iter().filter_map(|b| encoding::decode_byte(*b)).collect())
            }
            _ => None,
        })
        .collect()
}

/// Position set by the `Td` immediately preceding each `Tj`, paired with its text.
pub fn text_positions(doc: &LopdfDocument) -> Vec<(String, f32, f32)> {
    let mut last = (0.0, 0.0);
    let mut out = Vec::new();
    for op in operations(doc) {
        match op.operator.as_str() {
            "Td" => last = (number(&op.operands[0]), number(&op.operands[1])),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    let text: String = bytes.iter().filter_map(|b| encoding::decode_byte(*b)).collect();
                    out.push((text, last.0, last.1));
                }
            }
            _ => {}
        }
    }
    out
}

/// `[x, y, width, height]` of every `re` path on page 1.
pub fn rectangles(doc: &LopdfDocument) -> Vec<[f32; 4]> {
    operations(doc)
        .iter()
        .filter(|op| op.operator == "re")
        .map(|op| {
            let n: Vec<f32> = op.operands.iter().map(number).collect();
            [n[0], n[1], n[2], n[3]]
        })
        .collect()
}

/// `(uri, [left, bottom, right, top])` for every link annotation on page 1.
pub fn link_annotations(doc: &LopdfDocument) -> Vec<(String, [f32; 4])> {
    let Ok(annots) = first_page(doc).get(b"Annots") else {
        return Vec::new();
    };
    resolve(doc, annots)
        .as_array()
        .expect("Annots should be an array")
        .iter()
        .map(|annot| {
            let annot = dict(doc, annot);
            assert_eq!(annot.get(b"Subtype").and_then(Object::as_name).ok(), Some(&b"Link"[..]));
            let rect = resolve(doc, annot.get(b"Rect").expect("link needs a Rect"))
                .as_array()
                .expect("Rect should be an array");
            let action = dict(doc, annot.get(b"A").expect("link needs an action"));
            let uri = match action.get(b"URI") {
                Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
                other => panic!("expected URI string, got {:?}", other),
            };
            (uri, [number(&rect[0]), number(&rect[1]), number(&rect[2]), number(&rect[3])])
        })
        .collect()
}

/// BaseFont names referenced from the page resources.
pub fn font_names(doc: &LopdfDocument) -> Vec<String> {
    let resources = dict(doc, first_page(doc).get(b"Resources").expect("page needs Resources"));
    let Ok(fonts) = resources.get(b"Font") else {
        return Vec::new();
    };
    let mut names: Vec<String> = dict(doc, fonts)
        .iter()
        .filter_map(|(_, font)| {
            let font = dict(doc, font);
            font.get(b"BaseFont")
                .and_then(Object::as_name)
                .ok()
                .map(|n| String::from_utf8_lossy(n).into_owned())
        })
        .collect();
    names.sort();
    names
}

pub fn media_box(doc: &LopdfDocument) -> [f32; 4] {
    let mb = first_page(doc).get(b"MediaBox").and_then(Object::as_array).expect("MediaBox");
    [number(&mb[0]), number(&mb[1]), number(&mb[2]), number(&mb[3])]
}
