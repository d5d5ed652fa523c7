//! Human-readable names for colours

use crate::color::Color;

const NAMES: &[(&str, [u8; 3])] = &[
    ("Black", [0, 0, 0]),
    ("White", [255, 255, 255]),
    ("Gray", [128, 128, 128]),
    ("Silver", [192, 192, 192]),
    ("Red", [255, 0, 0]),
    ("Maroon", [128, 0, 0]),
    ("Crimson", [220, 20, 60]),
    ("Orange", [255, 165, 0]),
    ("Dark Orange", [255, 140, 0]),
    ("Gold", [255, 215, 0]),
    ("Yellow", [255, 255, 0]),
    ("Olive", [128, 128, 0]),
    ("Chartreuse", [127, 255, 0]),
    ("Lime", [0, 255, 0]),
    ("Green", [0, 128, 0]),
    ("Forest Green", [34, 139, 34]),
    ("Sea Green", [46, 139, 87]),
    ("Teal", [0, 128, 128]),
    ("Turquoise", [64, 224, 208]),
    ("Cyan", [0, 255, 255]),
    ("Sky Blue", [135, 206, 235]),
    ("Steel Blue", [70, 130, 180]),
    ("Royal Blue", [65, 105, 225]),
    ("Blue", [0, 0, 255]),
    ("Navy", [0, 0, 128]),
    ("Indigo", [75, 0, 130]),
    ("Blue Violet", [138, 43, 226]),
    ("Purple", [128, 0, 128]),
    ("Violet", [238, 130, 238]),
    ("Magenta", [255, 0, 255]),
    ("Deep Pink", [255, 20, 147]),
    ("Pink", [255, 192, 203]),
    ("Salmon", [250, 128, 114]),
    ("Coral", [255, 127, 80]),
    ("Chocolate", [210, 105, 30]),
    ("Brown", [165, 42, 42]),
    ("Tan", [210, 180, 140]),
    ("Beige", [245, 245, 220]),
];

/// Name of the table entry closest to `color` in RGB space
pub fn nearest_name(color: Color) -> &'static str {
    let [r, g, b] = color.to_rgb8();
    NAMES
        .iter()
        .min_by_key(|(_, [nr, ng, nb])| {
            let dr = i32::from(r) - i32::from(*nr);
            let dg = i32::from(g) - i32::from(*ng);
            let db = i32::from(b) - i32::from(*nb);
            dr * dr + dg * dg + db * db
        })
        .map(|(name, _)| *name)
        .unwrap_or("Unnamed")
}
