//! The template catalog shown on the template picker.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub available: bool,
    /// Form templates that implement this entry.
    pub forms: &'static [&'static str],
}

pub static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "ct-mri-liver",
        name: "CT / MRI Liver",
        category: "Abdominal",
        available: true,
        forms: &["ct_mr_liver_ai", "ct_mr_liver_manual"],
    },
    CatalogEntry {
        id: "breast-mammography",
        name: "Breast Mammography",
        category: "Breast",
        available: false,
        forms: &[],
    },
];

pub const ALL_CATEGORIES: &str = "all";

/// Case-insensitive substring search over name and category, optionally
/// restricted to one category (`all` matches every category).
pub fn search(query: &str, category: Option<&str>) -> Vec<&'static CatalogEntry> {
    let needle = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|entry| match category {
            None | Some(ALL_CATEGORIES) => true,
            Some(c) => entry.category.eq_ignore_ascii_case(c),
        })
        .filter(|entry| {
            needle.is_empty()
                || entry.name.to_lowercase().contains(&needle)
                || entry.category.to_lowercase().contains(&needle)
        })
        .collect()
}
