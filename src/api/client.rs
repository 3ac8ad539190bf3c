use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, AppError, AppResult};

use super::filter::FilterSpec;
use super::retry::{RetryPolicy, with_retry};
use super::types::{NetworkConfig, PagedResponse, TableBounds};

pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Upper bound on cursor follows per query. A server that keeps echoing a
/// token must not be able to loop the client forever.
const MAX_PAGES: u64 = 10_000;

/// Client for a Xatu-style telemetry REST backend.
#[derive(Clone, Debug)]
pub struct XatuClient {
    http: reqwest::Client,
    base: Url,
    retry: RetryPolicy,
}

impl XatuClient {
    /// # Errors
    ///
    /// Returns an error when the endpoint is not a valid URL or the HTTP
    /// client cannot be constructed.
    pub fn new(endpoint: &str, retry: RetryPolicy) -> AppResult<Self> {
        let normalized = if endpoint.ends_with('/') {
            endpoint.to_owned()
        } else {
            format!("{}/", endpoint)
        };
        let base = Url::parse(&normalized).map_err(|err| {
            AppError::api(ApiError::InvalidEndpoint {
                url: endpoint.to_owned(),
                source: err,
            })
        })?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("slotscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| AppError::api(ApiError::BuildClientFailed { source: err }))?;
        Ok(Self { http, base, retry })
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetches one page of a list endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-success statuses (after
    /// the retry policy is exhausted) and undecodable payloads.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &FilterSpec,
    ) -> AppResult<PagedResponse<T>> {
        let url = self.endpoint_url(&format!("api/v1/{}", table), Some(filter))?;
        self.get_json(table, &url).await
    }

    /// Follows `next_page_token` until the final page and concatenates rows.
    ///
    /// # Errors
    ///
    /// Returns an error for failed page fetches and for pagination that does
    /// not terminate within the page guard.
    pub async fn fetch_all_rows<T>(&self, table: &str, filter: &FilterSpec) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        follow_pages(
            table,
            &TablePages {
                client: self,
                table,
                filter,
            },
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error when the config endpoint is unreachable or returns
    /// an undecodable payload.
    pub async fn network_config(&self) -> AppResult<NetworkConfig> {
        let url = self.endpoint_url("config", None)?;
        self.get_json("config", &url).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::BoundsUnavailable` when the backend has no bounds
    /// for the table, and the usual request errors otherwise.
    pub async fn table_bounds(&self, table: &str) -> AppResult<TableBounds> {
        let url = self.endpoint_url(&format!("bounds/{}", table), None)?;
        match self.get_json::<TableBounds>(table, &url).await {
            Err(AppError::Api(ApiError::UnexpectedStatus { status: 404, .. })) => {
                Err(AppError::api(ApiError::BoundsUnavailable {
                    table: table.to_owned(),
                }))
            }
            other => other,
        }
    }

    fn endpoint_url(&self, path: &str, filter: Option<&FilterSpec>) -> AppResult<Url> {
        let mut url = self.base.join(path).map_err(|err| {
            AppError::api(ApiError::JoinPath {
                path: path.to_owned(),
                source: err,
            })
        })?;
        if let Some(filter) = filter {
            let query = filter.to_query();
            if !query.is_empty() {
                url.set_query(Some(&query));
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, label: &str, url: &Url) -> AppResult<T> {
        with_retry(self.retry, label, || {
            let request = self.http.get(url.clone());
            let label = label.to_owned();
            async move {
                debug!(%url, "GET");
                let response = request.send().await.map_err(|err| {
                    AppError::api(ApiError::RequestFailed {
                        table: label.clone(),
                        source: err,
                    })
                })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::api(ApiError::UnexpectedStatus {
                        table: label,
                        status: status.as_u16(),
                    }));
                }
                response.json::<T>().await.map_err(|err| {
                    AppError::api(ApiError::DecodeFailed {
                        table: label,
                        source: err,
                    })
                })
            }
        })
        .await
    }
}

/// Seam between cursor-follow logic and the transport, so pagination
/// behavior is testable without a network.
#[async_trait]
pub trait PageFetcher<T> {
    async fn fetch(&self, page_token: Option<&str>) -> AppResult<PagedResponse<T>>;
}

struct TablePages<'req> {
    client: &'req XatuClient,
    table: &'req str,
    filter: &'req FilterSpec,
}

#[async_trait]
impl<T> PageFetcher<T> for TablePages<'_>
where
    T: DeserializeOwned + Send,
{
    async fn fetch(&self, page_token: Option<&str>) -> AppResult<PagedResponse<T>> {
        let filter = match page_token {
            Some(token) => self.filter.clone().page_token(token),
            None => self.filter.clone(),
        };
        self.client.fetch_page(self.table, &filter).await
    }
}

/// # Errors
///
/// Propagates fetch errors and fails with `PaginationRunaway` past the page
/// guard.
pub async fn follow_pages<T, F>(table: &str, fetcher: &F) -> AppResult<Vec<T>>
where
    T: Send,
    F: PageFetcher<T> + Sync,
{
    let mut rows = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0u64;
    loop {
        pages = pages.saturating_add(1);
        if pages > MAX_PAGES {
            return Err(AppError::api(ApiError::PaginationRunaway {
                table: table.to_owned(),
                pages: MAX_PAGES,
            }));
        }
        let page = fetcher.fetch(token.as_deref()).await?;
        rows.extend(page.rows);
        match page.next_page_token {
            Some(next) if !next.is_empty() => token = Some(next),
            Some(_) | None => break,
        }
    }
    debug!(table, pages, rows = rows.len(), "pagination complete");
    Ok(rows)
}
