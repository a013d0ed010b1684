// src/config/state.rs
use super::consts::{MSG_ERROR_PREFIX, MSG_LOADING, MSG_NO_PROMOS};
use super::options::AppOptions;
use crate::card::{self, Card};
use crate::filter::{self, CategoryFilter};
use crate::sheet::RowRecord;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self { window_w: 480, window_h: 820 }
    }
}

/// Everything the render and filter routines read. One writer: the
/// boot pipeline installs a dataset, the filter bar changes `filter`.
#[derive(Clone, Debug)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,

    /// Rows as decoded, kept for re-normalization.
    pub rows: Vec<RowRecord>,
    /// Normalized cards, same order as `rows`.
    pub cards: Vec<Card>,
    /// Distinct categories in first-seen order.
    pub categories: Vec<String>,
    pub filter: CategoryFilter,

    pub message: String,
    pub loaded: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppOptions::default())
    }
}

impl AppState {
    pub fn new(options: AppOptions) -> Self {
        Self {
            options,
            gui: GuiState::default(),
            rows: Vec::new(),
            cards: Vec::new(),
            categories: Vec::new(),
            filter: CategoryFilter::All,
            message: s!(MSG_LOADING),
            loaded: false,
        }
    }

    /// Replace the whole dataset. Filter selection survives only if its
    /// category still exists.
    pub fn install_rows(&mut self, rows: Vec<RowRecord>) {
        self.cards = card::normalize_rows(&rows, &self.options.columns);
        self.categories = filter::discover_categories(&self.cards);
        self.rows = rows;
        self.loaded = true;

        if let CategoryFilter::Only(c) = &self.filter {
            if !self.categories.contains(c) {
                self.filter = CategoryFilter::All;
            }
        }

        self.message = if self.cards.is_empty() { s!(MSG_NO_PROMOS) } else { s!() };
    }

    /// Leave the state inert: no cards, error text in the message area.
    pub fn install_error(&mut self, err: &dyn std::error::Error) {
        self.rows.clear();
        self.cards.clear();
        self.categories.clear();
        self.filter = CategoryFilter::All;
        self.loaded = false;
        self.message = join!(MSG_ERROR_PREFIX, &err.to_string());
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        filter::visible_indices(&self.cards, &self.filter)
    }

    pub fn visible_cards(&self) -> Vec<&Card> {
        self.visible_indices().into_iter().map(|i| &self.cards[i]).collect()
    }
}
