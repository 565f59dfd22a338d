//! Field checks applied before items reach a store.
//!
//! The stores treat fields as opaque; the editors behind the HTTP API do
//! not, so titles, categories and icons are checked here.

use serde_json::Value;

use bms_types::catalog::SECTION_ICONS;
use bms_types::{CollectionKind, Fields, ItemPatch, NewItem};

use crate::error::{ServerError, ServerResult};

/// Validate a new item and fill in its default category.
pub fn prepare_new(kind: CollectionKind, item: &mut NewItem) -> ServerResult<()> {
    match item.fields.get("title") {
        Some(title) => check_title(title)?,
        None => return Err(ServerError::Validation("title is required".into())),
    }
    item.fields
        .entry("category".to_string())
        .or_insert_with(|| Value::from(kind.default_category()));
    check_options(kind, &item.fields)
}

/// Validate the fields a patch sets. Clearing the title is rejected.
pub fn check_patch(kind: CollectionKind, patch: &ItemPatch) -> ServerResult<()> {
    if let Some(title) = patch.fields.get("title") {
        check_title(title)?;
    }
    check_options(kind, &patch.fields)
}

fn check_title(title: &Value) -> ServerResult<()> {
    match title.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ServerError::Validation("title must be a non-empty string".into())),
    }
}

fn check_options(kind: CollectionKind, fields: &Fields) -> ServerResult<()> {
    if let Some(category) = fields.get("category").filter(|v| !v.is_null()) {
        let valid = category
            .as_str()
            .is_some_and(|c| kind.categories().contains(&c));
        if !valid {
            return Err(ServerError::Validation(format!(
                "unknown {kind} category: {category}"
            )));
        }
    }
    if kind == CollectionKind::Sections {
        if let Some(icon) = fields.get("icon").filter(|v| !v.is_null()) {
            let valid = icon
                .as_str()
                .is_some_and(|i| i.is_empty() || SECTION_ICONS.contains(&i));
            if !valid {
                return Err(ServerError::Validation(format!("unknown icon: {icon}")));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_post_gets_default_category() {
        let mut item = NewItem::default().with_field("title", "Hello");
        prepare_new(CollectionKind::Posts, &mut item).unwrap();
        assert_eq!(item.fields["category"], json!("Uncategorized"));
    }

    #[test]
    fn new_section_gets_default_category() {
        let mut item = NewItem::default().with_field("title", "Intro");
        prepare_new(CollectionKind::Sections, &mut item).unwrap();
        assert_eq!(item.fields["category"], json!("Getting Started"));
    }

    #[test]
    fn title_is_required() {
        let mut item = NewItem::default();
        assert!(prepare_new(CollectionKind::Posts, &mut item).is_err());

        let mut blank = NewItem::default().with_field("title", "  ");
        assert!(prepare_new(CollectionKind::Posts, &mut blank).is_err());
    }

    #[test]
    fn unknown_category_rejected() {
        let mut item = NewItem::default()
            .with_field("title", "x")
            .with_field("category", "Gardening");
        assert!(matches!(
            prepare_new(CollectionKind::Posts, &mut item),
            Err(ServerError::Validation(_))
        ));
    }

    #[test]
    fn section_icons_checked() {
        let mut ok = NewItem::default().with_field("title", "x").with_field("icon", "");
        prepare_new(CollectionKind::Sections, &mut ok).unwrap();

        let mut bad = NewItem::default().with_field("title", "x").with_field("icon", "rocket");
        assert!(prepare_new(CollectionKind::Sections, &mut bad).is_err());

        // Posts carry no icon list.
        let mut post = NewItem::default().with_field("title", "x").with_field("icon", "rocket");
        prepare_new(CollectionKind::Posts, &mut post).unwrap();
    }

    #[test]
    fn patch_checks() {
        assert!(check_patch(CollectionKind::Sections, &ItemPatch::new().active(false)).is_ok());
        assert!(check_patch(CollectionKind::Sections, &ItemPatch::new().unset("title")).is_err());
        assert!(check_patch(CollectionKind::Sections, &ItemPatch::new().unset("category")).is_ok());
        assert!(
            check_patch(CollectionKind::Sections, &ItemPatch::new().set("category", "Learning"))
                .is_ok()
        );
        assert!(
            check_patch(CollectionKind::Posts, &ItemPatch::new().set("category", "Learning"))
                .is_err()
        );
    }
}
