//! Plain-text dump of a document.

use sketchsnap_core::Document;

/// One line per shape: index, kind, bounding box and label.
pub fn describe(document: &Document) -> Vec<String> {
    document
        .shapes()
        .enumerate()
        .map(|(index, shape)| {
            let b = shape.bounds();
            let mut line = format!(
                "{:>3}  {:<9} ({:.1}, {:.1}) - ({:.1}, {:.1})",
                index,
                shape.kind(),
                b.x0,
                b.y0,
                b.x1,
                b.y1
            );
            if let Some(label) = document.label(index) {
                line.push_str(&format!("  \"{}\"", label));
            }
            if document.selected_index() == Some(index) {
                line.push_str("  [selected]");
            }
            line
        })
        .collect()
}
