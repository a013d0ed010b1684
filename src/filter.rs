// src/filter.rs
use std::fmt;

use crate::card::Card;
use crate::config::consts::LABEL_ALL;

/// Category selection. `All` is a variant, not a label, so relabelling
/// the "all" control never changes what it selects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Blank → `All`; anything else is an exact category, including one
    /// literally named "all".
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s!(t))
        }
    }

    #[inline]
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => card.category == *c,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => LABEL_ALL,
            CategoryFilter::Only(c) => c,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distinct non-empty categories, first-seen order.
pub fn discover_categories(cards: &[Card]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for c in cards {
        if !c.category.is_empty() && !out.contains(&c.category) {
            out.push(c.category.clone());
        }
    }
    out
}

/// Positions of cards the filter keeps, in dataset order.
pub fn visible_indices(cards: &[Card], filter: &CategoryFilter) -> Vec<usize> {
    cards
        .iter()
        .enumerate()
        .filter(|(_, c)| filter.matches(c))
        .map(|(i, _)| i)
        .collect()
}
