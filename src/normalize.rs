//! Query normalization: text folding, singularization and bilingual
//! keyword expansion.
//!
//! A free-text keyword like "noodles" has to find venues whose names and
//! categories are written in Vietnamese ("phở", "bún bò"). Expansion is a
//! pure lookup against a static dish dictionary; it never fails, an unknown
//! term just comes back alone.

use unicode_normalization::UnicodeNormalization;

/// English dish/category term (canonical singular, folded) mapped to local
/// equivalents. Matched exactly first, then by substring containment for
/// compound phrases ("beef noodle soup").
const DISH_SYNONYMS: &[(&str, &[&str])] = &[
    ("noodle", &["phở", "bún", "mì", "hủ tiếu", "miến", "bánh canh"]),
    ("pho", &["phở"]),
    ("rice", &["cơm", "cơm tấm", "xôi"]),
    ("hotpot", &["lẩu"]),
    ("hot pot", &["lẩu"]),
    ("grill", &["nướng", "đồ nướng"]),
    ("bbq", &["nướng", "đồ nướng"]),
    ("barbecue", &["nướng"]),
    ("spring roll", &["gỏi cuốn", "chả giò", "nem rán"]),
    ("pancake", &["bánh xèo", "bánh khọt"]),
    ("soup", &["canh", "súp", "cháo"]),
    ("porridge", &["cháo"]),
    ("coffee", &["cà phê"]),
    ("dessert", &["chè", "bánh ngọt", "kem"]),
    ("ice cream", &["kem"]),
    ("smoothie", &["sinh tố"]),
    ("juice", &["nước ép"]),
    ("beer", &["bia"]),
    ("bread", &["bánh mì"]),
    ("sandwich", &["bánh mì"]),
    ("sticky rice", &["xôi"]),
    ("chicken", &["gà", "cơm gà", "gà rán"]),
    ("seafood", &["hải sản", "ốc"]),
    ("snail", &["ốc"]),
    ("salad", &["gỏi", "rau trộn"]),
    ("tea", &["trà", "trà sữa"]),
    ("milk tea", &["trà sữa"]),
];

/// Lowercases and strips diacritics ("Phở Bò" -> "pho bo").
///
/// Vietnamese text differs from queries mostly in diacritics; all textual
/// matching in this crate compares folded forms.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            other => other,
        })
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}')
}

/// Case-insensitive, diacritic-insensitive containment test.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

/// Reduces an English loan word to singular form.
///
/// Ordered suffix rules: "berries" -> "berry", "dishes" -> "dish",
/// "mangoes" -> "mango", "noodles" -> "noodle". Words like "glass" keep
/// their trailing "s".
pub fn singularize(term: &str) -> String {
    let t = term.trim();
    if let Some(stem) = t.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = t.strip_suffix("es") {
        let sibilant = stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh");
        if sibilant {
            return stem.to_string();
        }
        if stem.ends_with('o') {
            return stem.to_string();
        }
    }
    if let Some(stem) = t.strip_suffix('s') {
        if !stem.ends_with('s') && !stem.is_empty() {
            return stem.to_string();
        }
    }
    t.to_string()
}

/// Expands a keyword into equivalent search terms.
///
/// Always includes the original keyword first. Order is deterministic
/// (dictionary order), duplicates removed.
pub fn expand(keyword: &str) -> Vec<String> {
    let original = keyword.trim();
    let mut terms = vec![original.to_string()];
    if original.is_empty() {
        return terms;
    }

    let canonical = singularize(&fold(original));

    let mut push = |term: &str| {
        if !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    };

    let exact = DISH_SYNONYMS.iter().find(|(key, _)| *key == canonical);
    if let Some((key, equivalents)) = exact {
        push(key);
        for term in *equivalents {
            push(term);
        }
        return terms;
    }

    // Compound phrases: "beef noodle soup" should still hit "noodle".
    for (key, equivalents) in DISH_SYNONYMS {
        if key.len() > 2 && canonical.contains(key) {
            push(key);
            for term in *equivalents {
                push(term);
            }
        }
    }

    terms
}
