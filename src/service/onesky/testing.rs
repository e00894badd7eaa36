//! 测试用的 OneSky 假服务
#![cfg(test)]

use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) struct FakeOneSky {
    pub(crate) base_url: String,
    requests: Arc<Mutex<Vec<Uri>>>,
    handle: JoinHandle<()>,
}

impl FakeOneSky {
    /// 对任意请求都返回同一个响应
    pub(crate) async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let body: String = body.into();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        let app = Router::new().fallback(move |uri: Uri| {
            let body = body.clone();
            let seen = Arc::clone(&seen);
            async move {
                seen.lock().expect("request log").push(uri);
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            base_url: format!("http://{}/1", addr),
            requests,
            handle,
        }
    }

    pub(crate) fn requests(&self) -> Vec<Uri> {
        self.requests.lock().expect("request log").clone()
    }
}

impl Drop for FakeOneSky {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 不走系统代理的 HTTP 客户端
pub(crate) fn local_http() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("http client")
}
