//! Collections managed by the back-office and their demo content.
//!
//! The option lists mirror what the admin editors offer in their pickers;
//! the demo items are what a fresh install shows before anyone edits.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::item::NewItem;

pub const SECTION_CATEGORIES: &[&str] = &[
    "Getting Started",
    "Profile Setup",
    "Account Configuration",
    "Learning",
    "Onboarding",
];

pub const SECTION_ICONS: &[&str] = &["welcome", "profile", "settings", "learn", "start", "complete"];

pub const POST_CATEGORIES: &[&str] = &[
    "Technology",
    "Lifestyle",
    "Business",
    "Personal Development",
    "Uncategorized",
];

pub const DEFAULT_SECTION_CATEGORY: &str = "Getting Started";
pub const DEFAULT_POST_CATEGORY: &str = "Uncategorized";

/// Which ordered collection an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Onboarding sections shown on the public page.
    Sections,
    /// Blog posts.
    Posts,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Sections, CollectionKind::Posts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sections => "sections",
            Self::Posts => "posts",
        }
    }

    /// Allowed values of the `category` field.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Sections => SECTION_CATEGORIES,
            Self::Posts => POST_CATEGORIES,
        }
    }

    pub fn default_category(&self) -> &'static str {
        match self {
            Self::Sections => DEFAULT_SECTION_CATEGORY,
            Self::Posts => DEFAULT_POST_CATEGORY,
        }
    }

    /// Items a fresh install starts with.
    pub fn demo_items(&self) -> Vec<NewItem> {
        match self {
            Self::Sections => demo_sections(),
            Self::Posts => demo_posts(),
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn demo_sections() -> Vec<NewItem> {
    vec![
        NewItem::default()
            .with_field("title", "Welcome")
            .with_field("description", "Initial onboarding welcome section")
            .with_field("icon", "welcome")
            .with_field("category", "Getting Started")
            .with_field("requiredFields", json!(["name", "email"]))
            .with_field("estimatedCompletionTime", 5),
        NewItem::default()
            .with_field("title", "Profile Setup")
            .with_field("description", "Create and customize your profile")
            .with_field("icon", "profile")
            .with_field("category", "Profile Setup")
            .with_field("requiredFields", json!(["avatar", "bio"]))
            .with_field("estimatedCompletionTime", 10),
    ]
}

pub fn demo_posts() -> Vec<NewItem> {
    vec![
        NewItem::default()
            .with_field("title", "Introduction to React")
            .with_field("content", "A beginner's guide to React development...")
            .with_field("author", "John Doe")
            .with_field("category", "Technology")
            .with_field("imageUrl", "https://example.com/react-intro.jpg"),
        NewItem::default()
            .with_field("title", "Productivity Tips")
            .with_field(
                "content",
                "Boost your productivity with these simple strategies...",
            )
            .with_field("author", "Jane Smith")
            .with_field("category", "Personal Development"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_kind_names() {
        assert_eq!(CollectionKind::Sections.to_string(), "sections");
        assert_eq!(CollectionKind::Posts.as_str(), "posts");
        assert_eq!(
            serde_json::to_value(CollectionKind::ALL).unwrap(),
            json!(["sections", "posts"])
        );
    }

    #[test]
    fn demo_items_use_known_options() {
        for kind in CollectionKind::ALL {
            for item in kind.demo_items() {
                let category = item.fields["category"].as_str().unwrap();
                assert!(kind.categories().contains(&category), "{category}");
                assert!(item.active);
            }
        }
        for section in demo_sections() {
            let icon = section.fields["icon"].as_str().unwrap();
            assert!(SECTION_ICONS.contains(&icon));
        }
    }

    #[test]
    fn default_categories_are_listed() {
        for kind in CollectionKind::ALL {
            assert!(kind.categories().contains(&kind.default_category()));
        }
    }
}
