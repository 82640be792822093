//! Catalog model and the filtering + pagination state of the listing page

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::pagination::{self, PageRange};

/// A product category and the number of products it should list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub expected_count: u32,
}

impl Category {
    pub fn new(label: impl Into<String>, expected_count: u32) -> Self {
        Self {
            label: label.into(),
            expected_count,
        }
    }
}

/// Static description of a paginated product catalog.
///
/// Category counts are not required to add up to `total_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    total_items: u32,
    items_per_page: u32,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(total_items: u32, items_per_page: u32) -> Result<Self> {
        if items_per_page == 0 {
            return Err(Error::invalid("items per page must be positive"));
        }
        Ok(Self {
            total_items,
            items_per_page,
            categories: Vec::new(),
        })
    }

    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = Category>,
    ) -> Result<Self> {
        let mut seen: HashSet<String> = self.categories.iter().map(|c| c.label.clone()).collect();
        for category in categories {
            if !seen.insert(category.label.clone()) {
                return Err(Error::DuplicateCategory(category.label));
            }
            self.categories.push(category);
        }
        Ok(self)
    }

    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.label.as_str())
    }

    pub fn total_pages(&self) -> u32 {
        // items_per_page is validated on construction
        self.total_items.div_ceil(self.items_per_page)
    }

    pub fn items_on_page(&self, page_number: i64) -> u32 {
        pagination::items_on_page(page_number, self.total_items, self.items_per_page).unwrap_or(0)
    }

    pub fn page_range(&self, page_number: i64) -> Result<PageRange> {
        pagination::page_range(page_number, self.total_items, self.items_per_page)
    }

    /// Start browsing this catalog on page 1 with no filter
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView {
            catalog: self,
            category: None,
            page: 1,
        }
    }
}

/// What the listing page should show for a given filter and page.
///
/// Selecting or clearing a category always returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView<'a> {
    catalog: &'a Catalog,
    category: Option<&'a Category>,
    page: u32,
}

impl<'a> CatalogView<'a> {
    pub fn select_category(&mut self, label: &str) -> Result<()> {
        let category = self
            .catalog
            .category(label)
            .ok_or_else(|| Error::UnknownCategory(label.to_string()))?;
        debug!(category = %category.label, count = category.expected_count, "category selected");
        self.category = Some(category);
        self.page = 1;
        Ok(())
    }

    pub fn clear_category(&mut self) {
        self.category = None;
        self.page = 1;
    }

    pub fn category(&self) -> Option<&'a Category> {
        self.category
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of products matching the current filter
    pub fn visible_total(&self) -> u32 {
        self.category
            .map(|c| c.expected_count)
            .unwrap_or(self.catalog.total_items)
    }

    pub fn total_pages(&self) -> u32 {
        self.visible_total().div_ceil(self.catalog.items_per_page)
    }

    pub fn go_to_page(&mut self, page: u32) -> Result<()> {
        let pages = self.total_pages();
        if page == 0 || page > pages {
            return Err(Error::invalid(format!("page {page} is outside 1..={pages}")));
        }
        trace!(from = self.page, to = page, "page changed");
        self.page = page;
        Ok(())
    }

    /// Advance one page; `false` when already on the last page
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page; `false` when already on the first page
    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Pagination controls are only rendered when there is more than one page
    pub fn pagination_visible(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn expected_card_count(&self) -> u32 {
        pagination::items_on_page(
            i64::from(self.page),
            self.visible_total(),
            self.catalog.items_per_page,
        )
        .unwrap_or(0)
    }

    pub fn range(&self) -> Result<PageRange> {
        pagination::page_range(
            i64::from(self.page),
            self.visible_total(),
            self.catalog.items_per_page,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(50, 16)
            .unwrap()
            .with_categories([
                Category::new("Photography", 4),
                Category::new("Studio Recording", 20),
            ])
            .unwrap()
    }

    #[test]
    fn test_catalog_rejects_zero_page_size() {
        assert!(matches!(Catalog::new(50, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let result = Catalog::new(10, 5)
            .unwrap()
            .with_categories([Category::new("Audio", 2), Category::new("Audio", 3)]);
        assert_eq!(result, Err(Error::DuplicateCategory("Audio".to_string())));
    }

    #[test]
    fn test_unfiltered_view() {
        let catalog = catalog();
        let mut view = catalog.view();
        assert_eq!(view.total_pages(), 4);
        assert_eq!(view.expected_card_count(), 16);
        assert!(!view.has_previous());
        assert!(view.has_next());

        view.go_to_page(4).unwrap();
        assert_eq!(view.expected_card_count(), 2);
        assert!(!view.has_next());
        assert!(!view.next_page());
        assert_eq!(view.range().unwrap(), PageRange { start: 49, end: 50, total: 50 });
    }

    #[test]
    fn test_category_filter_spans_two_pages() {
        let catalog = catalog();
        let mut view = catalog.view();
        view.go_to_page(3).unwrap();

        view.select_category("Studio Recording").unwrap();
        assert_eq!(view.page(), 1);
        assert_eq!(view.expected_card_count(), 16);
        assert!(view.pagination_visible());

        assert!(view.next_page());
        assert_eq!(view.expected_card_count(), 4);
        assert!(view.previous_page());
        assert!(!view.previous_page());
    }

    #[test]
    fn test_small_category_hides_pagination() {
        let catalog = catalog();
        let mut view = catalog.view();
        view.select_category("Photography").unwrap();
        assert_eq!(view.expected_card_count(), 4);
        assert!(!view.pagination_visible());
        assert!(view.go_to_page(2).is_err());
    }

    #[test]
    fn test_unknown_category() {
        let catalog = catalog();
        let mut view = catalog.view();
        assert_eq!(
            view.select_category("Vinyl"),
            Err(Error::UnknownCategory("Vinyl".to_string()))
        );
        assert!(view.category().is_none());
    }

    #[test]
    fn test_clear_category_returns_to_full_listing() {
        let catalog = catalog();
        let mut view = catalog.view();
        view.select_category("Photography").unwrap();
        view.clear_category();
        assert_eq!(view.visible_total(), 50);
        assert_eq!(view.page(), 1);
    }
}
