//! Client abstraction for sending requests to the backup backend.

pub use implementation::{ApiClient, https_client};

mod implementation {
    use anyhow::Result;
    use http_body_util::{BodyExt as _, Full};
    use hyper::{Request, Response, body::Bytes};
    use hyper_util::{
        client::legacy::{Client, connect::HttpConnector},
        rt::TokioExecutor,
    };

    /// HTTPS connector using rustls. Plain `http` is allowed as well since the
    /// backend usually runs on localhost.
    pub type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector>;

    /// Trait representing a client capable of sending requests to the backend.
    #[async_trait::async_trait]
    pub trait ApiClient: Send + Sync {
        /// Sends `request` and returns the response with its body collected.
        async fn send(&self, request: Request<Full<Bytes>>) -> Result<Response<Bytes>>;
    }

    #[async_trait::async_trait]
    impl ApiClient for Client<HttpsConnector, Full<Bytes>> {
        async fn send(&self, request: Request<Full<Bytes>>) -> Result<Response<Bytes>> {
            let response = self.request(request).await?;
            let (parts, body) = response.into_parts();
            let bytes = body.collect().await?.to_bytes();
            Ok(Response::from_parts(parts, bytes))
        }
    }

    /// Builds the default hyper client used by [`BackupApi`](crate::BackupApi).
    #[must_use]
    pub fn https_client() -> Client<HttpsConnector, Full<Bytes>> {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        Client::builder(TokioExecutor::new()).build(connector)
    }
}
