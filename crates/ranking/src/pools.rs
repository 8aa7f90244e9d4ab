//! The symbol pool table.
//!
//! Pools are ordered from most to least canonical for their category. The
//! table is a `static` so it can only change with a new build; bump
//! [`POOL_TABLE_VERSION`] when editing it.
//!
//! `Disgusted` and `Fearful` pools are registered even though the classifier
//! never emits those categories.

use facemoji_expression_model::Category;

pub const POOL_TABLE_VERSION: u32 = 1;

/// Read-only mapping from category to candidate symbols.
#[derive(Debug)]
pub struct PoolTable {
    pools: &'static [(Category, &'static [&'static str])],
    high_intensity: &'static [&'static str],
}

impl PoolTable {
    pub const fn new(
        pools: &'static [(Category, &'static [&'static str])],
        high_intensity: &'static [&'static str],
    ) -> Self {
        Self {
            pools,
            high_intensity,
        }
    }

    /// The pool registered for a category, if any.
    pub fn pool(&self, category: Category) -> Option<&'static [&'static str]> {
        self.pools
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, symbols)| *symbols)
    }

    /// Extra symbols mixed into the Happy pool at high confidence.
    pub fn high_intensity(&self) -> &'static [&'static str] {
        self.high_intensity
    }

    /// Registered categories in table order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.pools.iter().map(|(c, _)| *c)
    }
}

/// The production pool table.
pub static POOL_TABLE: PoolTable = PoolTable::new(
    &[
        (
            Category::Happy,
            &["😊", "😄", "😁", "🙂", "😃", "😆", "🥰", "😍"],
        ),
        (Category::Sad, &["😢", "😞", "😔", "😭", "☹️", "🥺"]),
        (Category::Surprised, &["😮", "😲", "😯", "🤯", "😳"]),
        (Category::Angry, &["😠", "😡", "🤬", "😤", "👿"]),
        (Category::Neutral, &["😐", "😶", "😑", "🤔", "😏"]),
        (Category::Disgusted, &["🤢", "🤮", "😖", "😒"]),
        (Category::Fearful, &["😨", "😰", "😱", "😧"]),
    ],
    &["🤩", "😂", "🥳", "🤣"],
);
