//! Test double for [`ApiClient`](crate::client::api_client::ApiClient).

pub use implementation::FakeApiClient;

mod implementation {
    use std::collections::VecDeque;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use anyhow::{Result, anyhow};
    use http_body_util::{BodyExt as _, Full};
    use hyper::{HeaderMap, Method, Request, Response, Uri, body::Bytes};

    use crate::client::api_client::ApiClient;

    /// Representation of a request captured by the [`FakeApiClient`].
    #[derive(Clone, Debug)]
    pub struct RecordedRequest {
        pub method: Method,
        pub uri: Uri,
        pub headers: HeaderMap,
        pub body: Vec<u8>,
    }

    /// Test-only client that returns predefined responses and records requests.
    #[derive(Debug, Default)]
    pub struct FakeApiClient {
        responses: Mutex<VecDeque<Result<Response<Bytes>>>>,
        recorded_requests: Mutex<Vec<RecordedRequest>>,
    }

    impl FakeApiClient {
        pub fn new() -> Self {
            Self::default()
        }

        fn get_responses_lock(&self) -> MutexGuard<'_, VecDeque<Result<Response<Bytes>>>> {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
        }

        fn get_recorded_requests_lock(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
            self.recorded_requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
        }

        pub fn enqueue_response(&self, response: Response<Bytes>) {
            self.get_responses_lock().push_back(Ok(response));
        }

        pub fn enqueue_json(&self, body: &str) {
            let response = Response::builder()
                .header("content-type", "application/json")
                .body(Bytes::copy_from_slice(body.as_bytes()))
                .expect("failed to build stub response");
            self.enqueue_response(response);
        }

        pub fn enqueue_error(&self, error: anyhow::Error) {
            self.get_responses_lock().push_back(Err(error));
        }

        pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
            self.get_recorded_requests_lock().clone()
        }
    }

    #[async_trait::async_trait]
    impl ApiClient for FakeApiClient {
        async fn send(&self, request: Request<Full<Bytes>>) -> Result<Response<Bytes>> {
            let (parts, body) = request.into_parts();
            let body_bytes = body.collect().await?.to_bytes();

            self.get_recorded_requests_lock().push(RecordedRequest {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body: body_bytes.to_vec(),
            });

            self.get_responses_lock()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("No stubbed response configured")))
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::Full;
    use hyper::{Method, Request, Response, StatusCode, body::Bytes};

    use super::FakeApiClient;
    use crate::client::api_client::ApiClient as _;

    fn build_request(method: Method, uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[test]
    fn new_creates_empty_fake_client() {
        let client = FakeApiClient::new();
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn send_records_method_and_uri() {
        let client = FakeApiClient::new();
        client.enqueue_json("{}");

        let _unused = client
            .send(build_request(Method::POST, "http://backend.test/api/backup"))
            .await;
        let recorded = &client.recorded_requests()[0];

        assert_eq!(recorded.method, Method::POST);
        assert_eq!(recorded.uri, "http://backend.test/api/backup");
    }

    #[tokio::test]
    async fn send_records_body() {
        let client = FakeApiClient::new();
        client.enqueue_json("{}");

        let request = Request::builder()
            .method(Method::POST)
            .uri("http://backend.test/api/scan-media")
            .body(Full::new(Bytes::from_static(b"{\"path\":\"/sdcard/\"}")))
            .unwrap();

        let _unused = client.send(request).await;

        assert_eq!(
            client.recorded_requests()[0].body,
            b"{\"path\":\"/sdcard/\"}"
        );
    }

    #[tokio::test]
    async fn send_returns_enqueued_responses_in_order() {
        let client = FakeApiClient::new();
        client.enqueue_response(
            Response::builder()
                .status(StatusCode::OK)
                .body(Bytes::new())
                .unwrap(),
        );
        client.enqueue_response(
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Bytes::new())
                .unwrap(),
        );

        let first = client
            .send(build_request(Method::GET, "http://backend.test/1"))
            .await
            .unwrap();
        let second = client
            .send(build_request(Method::GET, "http://backend.test/2"))
            .await
            .unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
        assert_eq!(client.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn send_returns_enqueued_error() {
        let client = FakeApiClient::new();
        client.enqueue_error(anyhow::anyhow!("connection refused"));

        let result = client
            .send(build_request(Method::GET, "http://backend.test"))
            .await;

        assert_eq!(result.unwrap_err().to_string(), "connection refused");
    }

    #[tokio::test]
    async fn send_without_queued_response_fails() {
        let client = FakeApiClient::new();

        let result = client
            .send(build_request(Method::GET, "http://backend.test"))
            .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "No stubbed response configured"
        );
    }
}
