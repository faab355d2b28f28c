use crate::backend::ListingSource;
use crate::config::{check_page_size, ClientConfig, DEFAULT_PAGE_SIZE};
use crate::error::AuctionClientError;
use crate::models::{Listing, PageQuery};

/// Paginated auction feed.
///
/// Listings accumulate in arrival order across pages and are never removed or
/// de-duplicated. The cursor only moves forward, and `load_more` advances it
/// before fetching, so a failed page is skipped rather than retried.
#[derive(Debug, Clone)]
pub struct FeedController {
    listings: Vec<Listing>,
    cursor: u32,
    page_size: u32,
    active_only: bool,
    in_flight: u32,
}

impl Default for FeedController {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            cursor: 0,
            page_size: DEFAULT_PAGE_SIZE,
            active_only: false,
            in_flight: 0,
        }
    }
}

impl FeedController {
    pub fn new(page_size: u32, active_only: bool) -> Result<Self, AuctionClientError> {
        check_page_size(page_size)?;

        Ok(Self {
            listings: Vec::new(),
            cursor: 0,
            page_size,
            active_only,
            in_flight: 0,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, AuctionClientError> {
        Self::new(config.page_size, config.active_only)
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn active_only(&self) -> bool {
        self.active_only
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    // Страницы, запрошенные через *_page_query и ещё не принятые
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Fetch one page. Failures are logged and read as an empty page.
    pub async fn fetch_page<S>(
        source: &S,
        cursor: u32,
        page_size: u32,
        active_only: bool,
    ) -> Vec<Listing>
    where
        S: ListingSource + ?Sized,
    {
        let query = PageQuery::for_page(cursor, page_size, active_only);
        Self::fetch_query(source, &query).await
    }

    pub async fn fetch_query<S>(source: &S, query: &PageQuery) -> Vec<Listing>
    where
        S: ListingSource + ?Sized,
    {
        tracing::debug!(skip = query.skip, limit = query.limit, "Fetching auctions page");

        match source.fetch_page(query).await {
            Ok(listings) => {
                tracing::debug!(count = listings.len(), "Auctions page received");
                listings
            }
            Err(e) => {
                tracing::warn!(skip = query.skip, error = %e, "Error loading auctions");
                Vec::new()
            }
        }
    }

    pub fn current_query(&self) -> PageQuery {
        PageQuery::for_page(self.cursor, self.page_size, self.active_only)
    }

    /// Start loading the page under the cursor. Pair with [`accept_page`](Self::accept_page).
    pub fn first_page_query(&mut self) -> PageQuery {
        self.in_flight += 1;
        self.current_query()
    }

    /// Advance the cursor and start loading the new page.
    ///
    /// At `u32::MAX` the cursor cannot move; the last page is requested again
    /// and a warning is logged.
    pub fn next_page_query(&mut self) -> PageQuery {
        match self.cursor.checked_add(1) {
            Some(next) => self.cursor = next,
            None => tracing::warn!(cursor = self.cursor, "Feed cursor is at its maximum"),
        }
        self.in_flight += 1;
        self.current_query()
    }

    /// Append a fetched page and return exactly the newly added listings.
    pub fn accept_page(&mut self, page: Vec<Listing>) -> &[Listing] {
        self.in_flight = self.in_flight.saturating_sub(1);
        let start = self.listings.len();
        self.listings.extend(page);
        &self.listings[start..]
    }

    // Первая страница: курсор не двигается
    pub async fn load_first_page<S>(&mut self, source: &S) -> &[Listing]
    where
        S: ListingSource + ?Sized,
    {
        let query = self.first_page_query();
        let page = Self::fetch_query(source, &query).await;
        self.accept_page(page)
    }

    pub async fn load_more<S>(&mut self, source: &S) -> &[Listing]
    where
        S: ListingSource + ?Sized,
    {
        let query = self.next_page_query();
        let page = Self::fetch_query(source, &query).await;
        self.accept_page(page)
    }
}
