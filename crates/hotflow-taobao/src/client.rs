// SPDX-FileCopyrightText: 2026 HotFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed search client with pagination.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use hotflow_config::TaobaoSettings;
use hotflow_core::{HotflowError, HttpTransport, Item};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::envelope::SearchEnvelope;
use crate::normalize::parse_item;
use crate::sign::{sign, SIGN_PARAM};
use crate::transport::ReqwestTransport;

/// API method used for every request.
pub const METHOD: &str = "taobao.tbk.dg.material.optional";
/// Default result ordering.
pub const DEFAULT_SORT: &str = "total_sales_des";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Per-search request options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// `None` leaves ordering to the upstream default.
    pub sort: Option<String>,
    /// Restrict results to items that carry a coupon.
    pub has_coupon: bool,
    /// Additional request parameters; `None` values are dropped.
    pub extra: BTreeMap<String, Option<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sort: Some(DEFAULT_SORT.to_string()),
            has_coupon: true,
            extra: BTreeMap::new(),
        }
    }
}

/// Options for [`TaobaoClient::fetch_many`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub pages: u32,
    pub page_size: u32,
    /// Pause between page requests.
    pub delay: Duration,
    pub search: SearchOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            pages: 1,
            page_size: 50,
            delay: Duration::from_secs(1),
            search: SearchOptions::default(),
        }
    }
}

/// One decoded result page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub items: Vec<Item>,
    pub total_results: Option<i64>,
    pub page_no: u32,
    pub page_size: u32,
    /// Number of entries the upstream returned, including skipped ones.
    pub returned: usize,
}

/// Client for `taobao.tbk.dg.material.optional`.
pub struct TaobaoClient {
    transport: Arc<dyn HttpTransport>,
    app_key: String,
    app_secret: SecretString,
    adzone_id: String,
    endpoint: String,
}

impl TaobaoClient {
    /// Creates a client that sends requests through `transport`.
    pub fn new(settings: &TaobaoSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            app_key: settings.app_key.clone(),
            app_secret: SecretString::from(settings.app_secret.expose_secret().to_string()),
            adzone_id: settings.adzone_id.clone(),
            endpoint: settings.endpoint.clone(),
        }
    }

    /// Creates a client backed by [`ReqwestTransport`].
    pub fn from_settings(settings: &TaobaoSettings) -> Result<Self, HotflowError> {
        Ok(Self::new(settings, Arc::new(ReqwestTransport::new()?)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the full signed parameter list for a request made now.
    pub fn build_params(&self, search: &BTreeMap<String, Option<String>>) -> Vec<(String, String)> {
        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        self.build_params_at(search, &timestamp)
    }

    /// Same as [`build_params`](Self::build_params) with a fixed timestamp.
    pub fn build_params_at(
        &self,
        search: &BTreeMap<String, Option<String>>,
        timestamp: &str,
    ) -> Vec<(String, String)> {
        let mut params: BTreeMap<String, String> = [
            ("method", METHOD),
            ("app_key", self.app_key.as_str()),
            ("sign_method", "md5"),
            ("timestamp", timestamp),
            ("format", "json"),
            ("v", "2.0"),
            ("adzone_id", self.adzone_id.as_str()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        for (name, value) in search {
            if let Some(value) = value {
                params.insert(name.clone(), value.clone());
            }
        }
        params.remove(SIGN_PARAM);

        let signature = sign(
            params.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))),
            self.app_secret.expose_secret(),
        );
        let mut params: Vec<(String, String)> = params.into_iter().collect();
        params.push((SIGN_PARAM.to_string(), signature));
        params
    }

    /// Runs one search request and normalizes its entries.
    pub async fn search(
        &self,
        keyword: &str,
        page_no: u32,
        page_size: u32,
        options: &SearchOptions,
    ) -> Result<SearchResult, HotflowError> {
        let mut search: BTreeMap<String, Option<String>> = BTreeMap::new();
        search.insert("q".into(), Some(keyword.to_string()));
        search.insert("page_no".into(), Some(page_no.to_string()));
        search.insert("page_size".into(), Some(page_size.to_string()));
        search.insert("sort".into(), options.sort.clone());
        if options.has_coupon {
            search.insert("has_coupon".into(), Some("true".into()));
        }
        for (name, value) in &options.extra {
            search.insert(name.clone(), value.clone());
        }

        let params = self.build_params(&search);
        debug!(keyword, page_no, page_size, "searching affiliate materials");
        let payload = self.transport.get_json(&self.endpoint, &params).await?;
        let page = SearchEnvelope::decode(&payload).into_page()?;

        let returned = page.entries.len();
        let items = page
            .entries
            .iter()
            .filter_map(|entry| entry_to_item(entry, keyword))
            .collect();

        Ok(SearchResult {
            items,
            total_results: page.total_results,
            page_no,
            page_size,
            returned,
        })
    }

    /// Fetches up to `options.pages` pages for `keyword`, in page order.
    ///
    /// Stops after an empty page or a page shorter than `page_size`; the
    /// short page's items are kept.
    pub async fn fetch_many(
        &self,
        keyword: &str,
        options: &FetchOptions,
    ) -> Result<Vec<Item>, HotflowError> {
        let mut collected = Vec::new();
        for page_no in 1..=options.pages {
            let result = self
                .search(keyword, page_no, options.page_size, &options.search)
                .await?;
            if result.items.is_empty() {
                debug!(keyword, page_no, "empty page, stopping");
                break;
            }
            let exhausted = result.returned < options.page_size as usize;
            collected.extend(result.items);
            if exhausted {
                debug!(keyword, page_no, returned = result.returned, "short page, stopping");
                break;
            }
            if page_no < options.pages && !options.delay.is_zero() {
                tokio::time::sleep(options.delay).await;
            }
        }
        info!(keyword, count = collected.len(), "fetched affiliate items");
        Ok(collected)
    }
}

fn entry_to_item(entry: &Value, keyword: &str) -> Option<Item> {
    match entry {
        Value::Null => None,
        Value::Object(raw) => {
            let item = parse_item(raw, keyword);
            if item.is_none() {
                warn!(keyword, item_id = ?raw.get("item_id"), "skipping entry without a valid item_id");
            }
            item
        }
        other => {
            warn!(keyword, entry = %other, "skipping non-object search entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotflow_test_utils::fixtures::{error_page, numbered_page, search_page};
    use hotflow_test_utils::MockTransport;
    use serde_json::json;

    fn settings() -> TaobaoSettings {
        TaobaoSettings {
            app_key: "123456".into(),
            app_secret: SecretString::from("abcdefg".to_string()),
            adzone_id: "987654".into(),
            endpoint: "http://router.test/rest".into(),
        }
    }

    fn client_with(transport: Arc<MockTransport>) -> TaobaoClient {
        TaobaoClient::new(&settings(), transport)
    }

    fn fast(pages: u32, page_size: u32) -> FetchOptions {
        FetchOptions {
            pages,
            page_size,
            delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn build_params_includes_fixed_fields_and_valid_signature() {
        let client = client_with(Arc::new(MockTransport::new()));
        let mut search = BTreeMap::new();
        search.insert("q".to_string(), Some("猫粮".to_string()));
        search.insert("cat".to_string(), None);

        let params = client.build_params_at(&search, "2024-01-01 00:00:00");
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("method"), Some(METHOD));
        assert_eq!(get("app_key"), Some("123456"));
        assert_eq!(get("sign_method"), Some("md5"));
        assert_eq!(get("timestamp"), Some("2024-01-01 00:00:00"));
        assert_eq!(get("format"), Some("json"));
        assert_eq!(get("v"), Some("2.0"));
        assert_eq!(get("adzone_id"), Some("987654"));
        assert_eq!(get("q"), Some("猫粮"));
        assert_eq!(get("cat"), None);

        let unsigned: Vec<(&str, Option<&str>)> = params
            .iter()
            .filter(|(k, _)| k != SIGN_PARAM)
            .map(|(k, v)| (k.as_str(), Some(v.as_str())))
            .collect();
        assert_eq!(get(SIGN_PARAM), Some(sign(unsigned, "abcdefg").as_str()));
    }

    #[test]
    fn build_params_timestamp_is_utc_formatted() {
        let client = client_with(Arc::new(MockTransport::new()));
        let params = client.build_params(&BTreeMap::new());
        let (_, ts) = params.iter().find(|(k, _)| k == "timestamp").unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_ok(), "{ts}");
    }

    #[tokio::test]
    async fn search_sends_search_parameters() {
        let transport = Arc::new(MockTransport::with_responses(vec![numbered_page(1, 2)]));
        let client = client_with(transport.clone());
        let mut options = SearchOptions::default();
        options.extra.insert("material_id".into(), Some("13366".into()));
        options.extra.insert("ip".into(), None);

        let result = client.search("猫粮", 3, 20, &options).await.unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.page_no, 3);
        assert_eq!(result.total_results, Some(2));

        let requests = transport.requests().await;
        let request = &requests[0];
        assert_eq!(request.url, "http://router.test/rest");
        assert_eq!(request.param("q"), Some("猫粮"));
        assert_eq!(request.param("page_no"), Some("3"));
        assert_eq!(request.param("page_size"), Some("20"));
        assert_eq!(request.param("sort"), Some("total_sales_des"));
        assert_eq!(request.param("has_coupon"), Some("true"));
        assert_eq!(request.param("material_id"), Some("13366"));
        assert_eq!(request.param("ip"), None);
        assert!(request.param("sign").is_some());
    }

    #[tokio::test]
    async fn search_without_coupon_filter_or_sort() {
        let transport = Arc::new(MockTransport::with_responses(vec![search_page(vec![])]));
        let client = client_with(transport.clone());
        let options = SearchOptions {
            sort: None,
            has_coupon: false,
            extra: BTreeMap::new(),
        };
        client.search("猫砂", 1, 50, &options).await.unwrap();

        let request = &transport.requests().await[0];
        assert_eq!(request.param("has_coupon"), None);
        assert_eq!(request.param("sort"), None);
    }

    #[tokio::test]
    async fn search_skips_invalid_entries() {
        let page = search_page(vec![
            json!({"item_id": 1, "title": "a"}),
            Value::Null,
            json!({"title": "no id"}),
            json!("garbage"),
            json!({"item_id": "2", "title": "b"}),
        ]);
        let client = client_with(Arc::new(MockTransport::with_responses(vec![page])));
        let result = client
            .search("k", 1, 50, &SearchOptions::default())
            .await
            .unwrap();
        let ids: Vec<i64> = result.items.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(result.returned, 5);
    }

    #[tokio::test]
    async fn search_propagates_api_error() {
        let transport = Arc::new(MockTransport::with_responses(vec![error_page(
            15,
            "Remote service error",
            "invalid adzone",
        )]));
        let client = client_with(transport);
        let err = client
            .search("k", 1, 50, &SearchOptions::default())
            .await
            .unwrap_err();
        match err {
            HotflowError::Api {
                code, sub_message, ..
            } => {
                assert_eq!(code, "15");
                assert_eq!(sub_message.as_deref(), Some("invalid adzone"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_many_stops_at_short_page() {
        let transport = Arc::new(MockTransport::with_responses(vec![
            numbered_page(1, 50),
            numbered_page(51, 30),
            numbered_page(81, 50),
        ]));
        let client = client_with(transport.clone());

        let items = client.fetch_many("猫粮", &fast(5, 50)).await.unwrap();
        assert_eq!(items.len(), 80);
        let ids: Vec<i64> = items.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, (1..=80).collect::<Vec<i64>>());

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2, "no request after the short page");
        assert_eq!(requests[1].param("page_no"), Some("2"));
    }

    #[tokio::test]
    async fn fetch_many_stops_at_empty_page() {
        let transport = Arc::new(MockTransport::with_responses(vec![
            numbered_page(1, 10),
            search_page(vec![]),
        ]));
        let client = client_with(transport.clone());

        let items = client.fetch_many("k", &fast(3, 10)).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(transport.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn fetch_many_respects_page_limit() {
        let transport = Arc::new(MockTransport::with_responses(vec![
            numbered_page(1, 5),
            numbered_page(6, 5),
            numbered_page(11, 5),
        ]));
        let client = client_with(transport.clone());

        let items = client.fetch_many("k", &fast(2, 5)).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(transport.requests().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_many_sleeps_only_between_requests() {
        let transport = Arc::new(MockTransport::with_responses(vec![
            numbered_page(1, 5),
            numbered_page(6, 5),
        ]));
        let client = client_with(transport);
        let options = FetchOptions {
            pages: 2,
            page_size: 5,
            delay: Duration::from_secs(3),
            ..Default::default()
        };

        let started = tokio::time::Instant::now();
        client.fetch_many("k", &options).await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn fetch_many_propagates_api_error() {
        let transport = Arc::new(MockTransport::with_responses(vec![
            numbered_page(1, 5),
            error_page(7, "App Call Limited", "limit"),
        ]));
        let client = client_with(transport);
        let err = client.fetch_many("k", &fast(3, 5)).await.unwrap_err();
        assert!(matches!(err, HotflowError::Api { .. }));
    }
}
