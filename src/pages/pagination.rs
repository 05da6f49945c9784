// src/pages/pagination.rs

//! Page/size counter shared by the list views.

use async_trait::async_trait;

use crate::error::Result;

/// Position within a paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    size: u32,
    total_pages: u32,
}

impl Pager {
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            total_pages: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Record the page count reported by the last fetch.
    ///
    /// A page requested before the count was known is pulled back to the
    /// last page.
    pub fn update_total(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        if total_pages > 0 {
            self.page = self.page.min(self.last_index());
        }
    }

    fn last_index(&self) -> u32 {
        self.total_pages.saturating_sub(1)
    }

    pub fn first(&mut self) {
        self.page = 0;
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next(&mut self) {
        if !self.is_last_page() {
            self.page += 1;
        }
    }

    pub fn last(&mut self) {
        self.page = self.last_index();
    }

    /// Jump to a page; clamped to the last page once the count is known.
    pub fn go_to(&mut self, page: u32) {
        self.page = if self.total_pages == 0 {
            page
        } else {
            page.min(self.last_index())
        };
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.last_index()
    }

    /// Page indexes to offer as links.
    pub fn pages(&self) -> std::ops::Range<u32> {
        0..self.total_pages
    }

    /// "Page 2 of 5" style label.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}

/// A view showing one page of a list at a time.
///
/// Navigation moves the pager and re-fetches, the same way on every list.
#[async_trait]
pub trait PagedView: Send {
    fn pager(&self) -> &Pager;

    fn pager_mut(&mut self) -> &mut Pager;

    /// Load the current page.
    async fn fetch(&mut self) -> Result<()>;

    async fn go_to_first_page(&mut self) -> Result<()> {
        self.pager_mut().first();
        self.fetch().await
    }

    async fn go_to_previous_page(&mut self) -> Result<()> {
        self.pager_mut().previous();
        self.fetch().await
    }

    async fn go_to_page(&mut self, page: u32) -> Result<()> {
        self.pager_mut().go_to(page);
        self.fetch().await
    }

    async fn go_to_next_page(&mut self) -> Result<()> {
        self.pager_mut().next();
        self.fetch().await
    }

    async fn go_to_last_page(&mut self) -> Result<()> {
        self.pager_mut().last();
        self.fetch().await
    }

    /// Open the list at `page`, before the page count is known.
    ///
    /// Loads the last page instead when `page` turns out to be past the end.
    async fn open_at(&mut self, page: u32) -> Result<()> {
        self.pager_mut().go_to(page);
        self.fetch().await?;
        if self.pager().page() != page {
            self.fetch().await?;
        }
        Ok(())
    }

    fn is_last_page(&self) -> bool {
        self.pager().is_last_page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager_with_total(total: u32) -> Pager {
        let mut pager = Pager::new(5);
        pager.update_total(total);
        pager
    }

    #[test]
    fn test_next_stops_at_last_page() {
        let mut pager = pager_with_total(3);
        pager.next();
        pager.next();
        assert!(pager.is_last_page());
        pager.next();
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_previous_stops_at_zero() {
        let mut pager = pager_with_total(3);
        pager.previous();
        assert_eq!(pager.page(), 0);
        assert!(pager.is_first_page());
    }

    #[test]
    fn test_last_and_first() {
        let mut pager = pager_with_total(4);
        pager.last();
        assert_eq!(pager.page(), 3);
        pager.first();
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_go_to_is_clamped_once_total_known() {
        let mut pager = Pager::new(5);
        pager.go_to(7);
        assert_eq!(pager.page(), 7);

        pager.update_total(3);
        pager.go_to(7);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_early_go_to_is_clamped_when_total_arrives() {
        let mut pager = Pager::new(5);
        pager.go_to(8);
        pager.update_total(3);
        assert_eq!(pager.page(), 2);
        assert!(pager.is_last_page());
        assert_eq!(pager.label(), "Page 3 of 3");
    }

    #[test]
    fn test_update_total_keeps_page_in_range() {
        let mut pager = pager_with_total(5);
        pager.go_to(1);
        pager.update_total(4);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_empty_list_is_single_last_page() {
        let mut pager = pager_with_total(0);
        assert!(pager.is_last_page());
        pager.last();
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.pages().count(), 0);
        assert_eq!(pager.label(), "Page 1 of 1");
    }

    #[test]
    fn test_zero_size_is_bumped() {
        assert_eq!(Pager::new(0).size(), 1);
    }

    struct Counting {
        pager: Pager,
        fetched: Vec<u32>,
    }

    #[async_trait]
    impl PagedView for Counting {
        fn pager(&self) -> &Pager {
            &self.pager
        }

        fn pager_mut(&mut self) -> &mut Pager {
            &mut self.pager
        }

        async fn fetch(&mut self) -> Result<()> {
            self.fetched.push(self.pager.page());
            self.pager.update_total(4);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_navigation_refetches() {
        let mut view = Counting {
            pager: Pager::new(5),
            fetched: Vec::new(),
        };
        view.fetch().await.unwrap();
        view.go_to_next_page().await.unwrap();
        view.go_to_last_page().await.unwrap();
        view.go_to_previous_page().await.unwrap();
        view.go_to_first_page().await.unwrap();
        view.go_to_page(1).await.unwrap();

        assert_eq!(view.fetched, vec![0, 1, 3, 2, 0, 1]);
        assert!(!view.is_last_page());
    }

    #[tokio::test]
    async fn test_open_at_past_the_end_loads_last_page() {
        let mut view = Counting {
            pager: Pager::new(5),
            fetched: Vec::new(),
        };
        view.open_at(8).await.unwrap();
        assert_eq!(view.fetched, vec![8, 3]);
        assert_eq!(view.pager().page(), 3);

        let mut view = Counting {
            pager: Pager::new(5),
            fetched: Vec::new(),
        };
        view.open_at(2).await.unwrap();
        assert_eq!(view.fetched, vec![2]);
    }
}
