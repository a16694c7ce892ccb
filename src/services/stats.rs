use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::github::GraphQLExecutor;
use crate::github::graphql::graphql_types::{GraphQLPayload, GraphQLQuery, ViewerResponse};
use crate::github::graphql::search::{AuthorShape, CountShape, RepoListShape};
use crate::github::graphql::viewer::{NoVariables, VIEWER_QUERY_NAME, viewer_query};
use crate::types::{IssueKind, SearchQuery, SearchScope, StatsOutput};

use super::aggregate::{rank_authors, repository_listing};
use super::pager::Pager;

/// Counts only need the total, so a single-node page is enough.
pub const COUNT_PAGE_SIZE: u32 = 1;

/// Inputs shared by every stats command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub scope: SearchScope,
    /// Raw GitHub search filter, passed through verbatim
    pub filter: String,
    /// Extra `is:` tags appended after the command's own kind tag
    pub is_tags: Vec<String>,
}

impl StatsRequest {
    pub fn new<T: Into<String>>(scope: SearchScope, filter: T) -> Self {
        Self {
            scope,
            filter: filter.into(),
            is_tags: Vec::new(),
        }
    }

    pub fn with_is_tags(mut self, is_tags: Vec<String>) -> Self {
        self.is_tags = is_tags;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsCommand {
    CountPullRequests(StatsRequest),
    CountIssues(StatsRequest),
    /// Same flow and output as `CountIssues`
    DescribeIssues(StatsRequest),
    DescribeAuthors(StatsRequest),
    ListRepositories(StatsRequest),
}

/// Service computing issue, pull request and repository statistics.
///
/// Every command runs its GraphQL calls one after another: an optional viewer
/// lookup, then either one count request or a full cursor walk.
pub struct StatsService<E> {
    executor: E,
}

impl<E: GraphQLExecutor> StatsService<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub async fn run<W: Write>(
        &self,
        command: StatsCommand,
        diagnostics: &mut W,
    ) -> Result<StatsOutput> {
        match command {
            StatsCommand::CountPullRequests(request) => self.count_pull_requests(request).await,
            StatsCommand::CountIssues(request) => self.count_issues(request).await,
            StatsCommand::DescribeIssues(request) => self.describe_issues(request).await,
            StatsCommand::DescribeAuthors(request) => {
                self.describe_authors(request, diagnostics).await
            }
            StatsCommand::ListRepositories(request) => {
                self.list_repositories(request, diagnostics).await
            }
        }
    }

    /// Looks up the login of the authenticated user.
    pub async fn fetch_viewer_login(&self) -> Result<String> {
        let payload: GraphQLPayload<NoVariables> = GraphQLPayload {
            query: GraphQLQuery(viewer_query()),
            variables: None,
        };

        let response = self
            .executor
            .execute_graphql::<_, ViewerResponse>(VIEWER_QUERY_NAME, payload)
            .await
            .context("Failed to resolve the authenticated user")?;

        let data = response.into_data(VIEWER_QUERY_NAME)?;
        info!("Resolved authenticated user {}", data.viewer.login);

        Ok(data.viewer.login)
    }

    /// Replaces `SearchScope::Viewer` with the authenticated user's login.
    ///
    /// Explicit scopes are returned untouched without any request.
    pub async fn resolve_scope(&self, scope: SearchScope) -> Result<SearchScope> {
        match scope {
            SearchScope::Viewer => Ok(SearchScope::User(self.fetch_viewer_login().await?)),
            scope => Ok(scope),
        }
    }

    /// Builds `[filter, is:<kind>, is:<tags>..., scope]` after resolving the scope.
    pub async fn build_query(
        &self,
        request: StatsRequest,
        kind: Option<IssueKind>,
    ) -> Result<SearchQuery> {
        let scope = self.resolve_scope(request.scope).await?;

        let query = SearchQuery::builder(request.filter)
            .kinds(kind)
            .kinds(request.is_tags)
            .scope(&scope)
            .build();

        info!("Search query: {}", query);
        Ok(query)
    }

    /// Total number of matches of one object kind, read from the first page.
    pub async fn count(&self, kind: IssueKind, request: StatsRequest) -> Result<StatsOutput> {
        let query = self.build_query(request, Some(kind)).await?;

        let page = Pager::new(&self.executor)
            .with_per_page(COUNT_PAGE_SIZE)
            .fetch_page::<CountShape>(&query, None)
            .await?;

        Ok(StatsOutput::Count(page.match_count))
    }

    pub async fn count_pull_requests(&self, request: StatsRequest) -> Result<StatsOutput> {
        self.count(IssueKind::PullRequest, request).await
    }

    pub async fn count_issues(&self, request: StatsRequest) -> Result<StatsOutput> {
        self.count(IssueKind::Issue, request).await
    }

    pub async fn describe_issues(&self, request: StatsRequest) -> Result<StatsOutput> {
        self.count_issues(request).await
    }

    /// Ranks the authors of every matched issue and pull request.
    pub async fn describe_authors<W: Write>(
        &self,
        request: StatsRequest,
        diagnostics: &mut W,
    ) -> Result<StatsOutput> {
        let query = self.build_query(request, None).await?;

        let pages = Pager::new(&self.executor)
            .fetch_all::<AuthorShape, _>(&query, diagnostics)
            .await?;

        Ok(StatsOutput::Authors(rank_authors(pages.nodes)))
    }

    /// Lists every matched repository in API order.
    pub async fn list_repositories<W: Write>(
        &self,
        request: StatsRequest,
        diagnostics: &mut W,
    ) -> Result<StatsOutput> {
        let query = self.build_query(request, None).await?;

        let pages = Pager::new(&self.executor)
            .fetch_all::<RepoListShape, _>(&query, diagnostics)
            .await?;

        Ok(StatsOutput::Repositories(repository_listing(pages.nodes)?))
    }
}
