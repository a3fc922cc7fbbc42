use std::future::Future;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub trait HttpClient: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}

/// `reqwest`-backed [`HttpClient`] rooted at a base URL.
///
/// Paths passed to the trait methods are joined onto the base, so client
/// crates can stay transport-agnostic and talk in service-relative paths.
pub struct ReqwestClient {
    base: url::Url,
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(base: url::Url) -> Self {
        Self {
            base,
            inner: reqwest::Client::new(),
        }
    }

    pub fn with_client(base: url::Url, inner: reqwest::Client) -> Self {
        Self { base, inner }
    }

    fn join(&self, path: &str) -> Result<url::Url, Error> {
        Ok(self.base.join(path)?)
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>, Error> {
        let url = self.join(path)?;
        let response = self.inner.get(url).send().await?;
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn post(&self, path: &str, body: Vec<u8>, content_type: &str) -> Result<Vec<u8>, Error> {
        let url = self.join(path)?;
        let response = self
            .inner
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type.to_string())
            .body(body)
            .send()
            .await?;
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
