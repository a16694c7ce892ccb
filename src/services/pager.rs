use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::github::GraphQLExecutor;
use crate::github::graphql::graphql_types::{GraphQLPayload, GraphQLQuery, SearchResponse};
use crate::github::graphql::search::{SearchShape, SearchVariable, search_query};
use crate::types::{SearchCursor, SearchQuery, SearchResultPager};

/// Page size used when walking search results
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// GitHub's search API never returns more than this many results for one query.
pub const RESULT_CAP_WARNING_THRESHOLD: u64 = 1000;

pub const RESULT_CAP_WARNING: &str = "Warning: there are more than 1000 results, try using filters to narrow down your search https://docs.github.com/en/rest/reference/search#about-the-search-api";

/// Every node of a search, in page order.
#[derive(Debug, Clone)]
pub struct SearchPages<N> {
    /// Total match count reported with the first page
    pub match_count: u64,
    pub nodes: Vec<N>,
}

/// One fetched page.
pub struct SearchPage<N> {
    pub match_count: u64,
    pub nodes: Vec<N>,
    pub next_pager: Option<SearchResultPager>,
}

/// Walks a search connection with `endCursor` until `hasNextPage` is false.
pub struct Pager<'a, E> {
    executor: &'a E,
    per_page: u32,
    warning_threshold: u64,
}

impl<'a, E: GraphQLExecutor> Pager<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self {
            executor,
            per_page: SEARCH_PAGE_SIZE,
            warning_threshold: RESULT_CAP_WARNING_THRESHOLD,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Fetches a single page of `S` starting after `cursor`.
    pub async fn fetch_page<S: SearchShape>(
        &self,
        query: &SearchQuery,
        cursor: Option<&SearchCursor>,
    ) -> Result<SearchPage<S::Node>> {
        let variables = SearchVariable {
            query: query.as_str().to_string(),
            per_page: self.per_page,
            cursor: cursor.map(|c| c.0.clone()),
        };

        let payload = GraphQLPayload {
            query: GraphQLQuery(search_query::<S>(cursor.is_some())),
            variables: Some(variables),
        };

        let response = self
            .executor
            .execute_graphql::<_, SearchResponse<S::Node>>(S::QUERY_NAME, payload)
            .await
            .with_context(|| format!("Search request failed for query {:?}", query.as_str()))?;

        let data = response.into_data(S::QUERY_NAME)?;

        let next_pager = data
            .search
            .page_info
            .filter(|page_info| page_info.has_next_page)
            .map(SearchResultPager::from);

        Ok(SearchPage {
            match_count: data.search.match_count,
            nodes: data.search.nodes,
            next_pager,
        })
    }

    /// Iteratively fetch all pages of `S` for `query`.
    ///
    /// The first page is requested without a cursor and fetched once. If its match
    /// count exceeds the result cap an advisory line goes to `diagnostics`. Any
    /// failed request aborts the walk and drops the pages collected so far.
    pub async fn fetch_all<S: SearchShape, W: Write>(
        &self,
        query: &SearchQuery,
        diagnostics: &mut W,
    ) -> Result<SearchPages<S::Node>> {
        let first_page = self.fetch_page::<S>(query, None).await?;
        let match_count = first_page.match_count;

        if match_count > self.warning_threshold {
            debug!(
                "Search {:?} matched {} results, above the cap of {}",
                query.as_str(),
                match_count,
                self.warning_threshold
            );
            writeln!(diagnostics, "{}", RESULT_CAP_WARNING)
                .context("Failed to write result cap warning")?;
        }

        let mut all_nodes = first_page.nodes;
        let mut pager = first_page.next_pager;
        let mut page_count = 1;

        while let Some(next) = pager {
            let Some(cursor) = next.next_page_cursor else {
                warn!(
                    "Search {:?} reported another page without a cursor, stopping",
                    query.as_str()
                );
                break;
            };

            let page = self.fetch_page::<S>(query, Some(&cursor)).await?;
            all_nodes.extend(page.nodes);
            pager = page.next_pager;
            page_count += 1;
        }

        info!(
            "Fetched {} nodes in {} pages for {}",
            all_nodes.len(),
            page_count,
            S::QUERY_NAME
        );

        Ok(SearchPages {
            match_count,
            nodes: all_nodes,
        })
    }
}
