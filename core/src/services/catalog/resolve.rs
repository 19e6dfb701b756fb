//! Category lookup over the nested category list.

use crate::domain::entities::{Category, Course, Subcategory};

/// A main category and, when one was identified, its subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCategory<'a> {
    pub main: &'a Category,
    pub sub: Option<&'a Subcategory>,
}

impl ResolvedCategory<'_> {
    /// "Main / Sub" or just "Main"
    pub fn label(&self) -> String {
        match self.sub {
            Some(sub) => format!("{} / {}", self.main.name, sub.name),
            None => self.main.name.clone(),
        }
    }
}

fn hint(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn find_main<'a>(categories: &'a [Category], hint: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|c| c.id == hint)
        .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(hint)))
}

fn find_sub<'a>(category: &'a Category, hint: &str) -> Option<&'a Subcategory> {
    category
        .subcategories
        .iter()
        .find(|s| s.id == hint)
        .or_else(|| {
            category
                .subcategories
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(hint))
        })
}

/// Resolve a main category and optional subcategory from id-or-name hints.
///
/// The main hint is matched by exact id, then by case-insensitive name.
/// When it is missing or matches nothing, the parent is inferred from the
/// first category owning a subcategory that matches the sub hint (again id
/// first, then name).
pub fn resolve_category<'a>(
    categories: &'a [Category],
    main_hint: Option<&str>,
    sub_hint: Option<&str>,
) -> Option<ResolvedCategory<'a>> {
    let main_hint = hint(main_hint);
    let sub_hint = hint(sub_hint);

    if let Some(main) = main_hint.and_then(|h| find_main(categories, h)) {
        let sub = sub_hint.and_then(|h| find_sub(main, h));
        return Some(ResolvedCategory { main, sub });
    }

    let sub_hint = sub_hint?;
    let by_id = categories.iter().find_map(|main| {
        main.subcategories
            .iter()
            .find(|s| s.id == sub_hint)
            .map(|sub| ResolvedCategory { main, sub: Some(sub) })
    });
    by_id.or_else(|| {
        categories.iter().find_map(|main| {
            main.subcategories
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(sub_hint))
                .map(|sub| ResolvedCategory { main, sub: Some(sub) })
        })
    })
}

/// Category of a course, using its stored category and subcategory references
pub fn course_category<'a>(categories: &'a [Category], course: &Course) -> Option<ResolvedCategory<'a>> {
    resolve_category(
        categories,
        course.category_id.as_deref(),
        course.subcategory_id.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: &str, name: &str) -> Subcategory {
        Subcategory {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "cat-2026".to_string(),
                name: "2026 A/L".to_string(),
                subcategories: vec![sub("sub-phy", "Physics"), sub("sub-chem", "Chemistry")],
            },
            Category {
                id: "cat-2027".to_string(),
                name: "2027 A/L".to_string(),
                subcategories: vec![sub("sub-phy-27", "Physics"), sub("sub-bio", "Biology")],
            },
        ]
    }

    #[test]
    fn test_exact_id_wins() {
        let categories = categories();
        let resolved = resolve_category(&categories, Some("cat-2027"), Some("sub-bio")).unwrap();
        assert_eq!(resolved.main.id, "cat-2027");
        assert_eq!(resolved.sub.unwrap().id, "sub-bio");
        assert_eq!(resolved.label(), "2027 A/L / Biology");
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let categories = categories();
        let resolved = resolve_category(&categories, Some("2026 a/l"), Some("CHEMISTRY")).unwrap();
        assert_eq!(resolved.main.id, "cat-2026");
        assert_eq!(resolved.sub.unwrap().id, "sub-chem");
    }

    #[test]
    fn test_parent_inferred_from_subcategory() {
        let categories = categories();

        let resolved = resolve_category(&categories, None, Some("sub-phy-27")).unwrap();
        assert_eq!(resolved.main.id, "cat-2027");

        // Unknown main hint falls through to inference
        let resolved = resolve_category(&categories, Some("missing"), Some("biology")).unwrap();
        assert_eq!(resolved.main.id, "cat-2027");
    }

    #[test]
    fn test_subcategory_id_beats_earlier_name_match() {
        let categories = vec![
            Category {
                id: "a".to_string(),
                name: "A".to_string(),
                subcategories: vec![sub("x", "sub-target")],
            },
            Category {
                id: "b".to_string(),
                name: "B".to_string(),
                subcategories: vec![sub("sub-target", "Other")],
            },
        ];
        let resolved = resolve_category(&categories, None, Some("sub-target")).unwrap();
        assert_eq!(resolved.main.id, "b");
    }

    #[test]
    fn test_main_without_matching_sub() {
        let categories = categories();
        let resolved = resolve_category(&categories, Some("cat-2026"), Some("Biology")).unwrap();
        assert_eq!(resolved.main.id, "cat-2026");
        assert!(resolved.sub.is_none());
        assert_eq!(resolved.label(), "2026 A/L");
    }

    #[test]
    fn test_nothing_matches() {
        let categories = categories();
        assert!(resolve_category(&categories, None, None).is_none());
        assert!(resolve_category(&categories, Some("  "), Some("Art")).is_none());
    }
}
