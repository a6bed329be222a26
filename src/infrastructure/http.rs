//! HTTP 传输 - 基础设施层
//!
//! 持有唯一的 reqwest Client，只暴露"发一次 JSON 请求"的能力

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, ApiResult, AppError, AppResult, ErrorBody};
use crate::session::Session;

/// HTTP 传输
///
/// 职责：
/// - 拼接 URL、附带 `Authorization: Bearer <token>`
/// - 非 2xx 时把状态码和响应体原样带出
/// - 每个请求只发一次，不做任何重试
/// - 不认识 Question / Response
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(AppError::ClientBuild)?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 固定路径后追加一个动态片段（如题目 id），片段按路径规则转义
    fn segment_url(&self, path: &str, segment: &str) -> ApiResult<Url> {
        let invalid = |reason: String| ApiError::InvalidUrl {
            endpoint: path.to_string(),
            reason,
        };
        let mut url = Url::parse(&self.url(path)).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        debug!("{} {}", method, path);
        authorize(self.client.request(method, self.url(path)), session)
    }

    /// GET 并解析 JSON
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> ApiResult<T> {
        let body = self.execute(path, self.request(Method::GET, path, session)).await?;
        decode(path, &body)
    }

    /// POST JSON 并解析 JSON 响应
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
        payload: &B,
    ) -> ApiResult<T> {
        let body = self
            .execute(path, self.request(Method::POST, path, session).json(payload))
            .await?;
        decode(path, &body)
    }

    /// POST JSON，只关心是否成功
    pub async fn post_ack<B: Serialize + ?Sized>(
        &self,
        path: &str,
        session: Option<&Session>,
        payload: &B,
    ) -> ApiResult<()> {
        self.execute(path, self.request(Method::POST, path, session).json(payload))
            .await
            .map(|_| ())
    }

    /// DELETE `path/{id}`，只关心是否成功
    pub async fn delete_item(
        &self,
        path: &str,
        id: &str,
        session: Option<&Session>,
    ) -> ApiResult<()> {
        let url = self.segment_url(path, id)?;
        let endpoint = url.path().to_string();
        debug!("DELETE {}", endpoint);
        let builder = authorize(self.client.request(Method::DELETE, url), session);
        self.execute(&endpoint, builder).await.map(|_| ())
    }

    /// 发出请求，返回成功响应的原始文本
    async fn execute(&self, endpoint: &str, builder: RequestBuilder) -> ApiResult<String> {
        let transport_err = |source: reqwest::Error| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let resp = builder.send().await.map_err(transport_err)?;
        let status = resp.status();
        let text = resp.text().await.map_err(transport_err)?;

        if status.is_success() {
            Ok(text)
        } else {
            warn!("⚠️ {} 返回 {}", endpoint, status.as_u16());
            Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: ErrorBody::parse(&text),
            })
        }
    }
}

fn authorize(builder: RequestBuilder, session: Option<&Session>) -> RequestBuilder {
    match session.and_then(Session::token) {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// 空响应体按 JSON null 处理，便于 `Option<T>` 解码
fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
