use reqwest::{
    cookie::{CookieStore, Jar},
    header::{
        HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, HOST, PRAGMA,
        REFERER, USER_AGENT,
    },
    Client, Url,
};
use std::sync::Arc;

use crate::error::{Result, StrengthError};
use crate::utils::Logger;

pub const DEFAULT_BASE_URL: &str = "https://www.nseindia.com";

/// Cookie that marks an established provider session
pub const SESSION_COOKIE: &str = "nseappid";

const LANDING_PAGE: &str = "/get-quotes/equity";
const REFERER_PAGE: &str = "/get-quotes/equity?symbol=TATASTEEL";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.132 Safari/537.36";

/// Cookie-bearing HTTP session against the market-data provider
///
/// Created once per run and passed by reference to every stage that talks
/// to the provider. The landing page is only loaded while the session
/// cookie is missing from the jar.
pub struct NseSession {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
    logger: Logger,
}

impl NseSession {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StrengthError::InvalidInput(format!("base url '{}': {}", base_url, e)))?;
        let jar = Arc::new(Jar::default());

        let client = Client::builder()
            .cookie_provider(jar.clone())
            .default_headers(Self::browser_headers(&base_url)?)
            .build()?;

        Ok(Self {
            client,
            jar,
            base_url,
            logger: Logger::new("NSE_SESSION"),
        })
    }

    /// Header set of a desktop browser issuing an XHR from the quote page.
    /// `Accept-Encoding` is left to the client so responses are decompressed.
    fn browser_headers(base_url: &Url) -> Result<HeaderMap> {
        let host = match (base_url.host_str(), base_url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            _ => return Err(StrengthError::InvalidInput(format!("base url '{}' has no host", base_url))),
        };
        let referer = format!("{}{}", base_url.as_str().trim_end_matches('/'), REFERER_PAGE);

        let header = |value: &str| {
            HeaderValue::from_str(value)
                .map_err(|e| StrengthError::InvalidInput(format!("header value '{}': {}", value, e)))
        };

        let mut headers = HeaderMap::new();
        headers.insert(HOST, header(&host)?);
        headers.insert(REFERER, header(&referer)?);
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en-US;q=0.9,en;q=0.8"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        Ok(headers)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a provider path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StrengthError::InvalidInput(format!("endpoint '{}': {}", path, e)))
    }

    /// Whether the jar holds the provider's session cookie
    pub fn has_session(&self) -> bool {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().map(str::to_owned).ok())
            .map(|cookies| {
                cookies
                    .split(';')
                    .any(|pair| pair.trim().split('=').next() == Some(SESSION_COOKIE))
            })
            .unwrap_or(false)
    }

    /// Load the landing page when no session cookie is present.
    /// Transport errors propagate; the landing response status is not checked.
    pub async fn ensure_session(&self) -> Result<()> {
        if self.has_session() {
            return Ok(());
        }

        let url = self.endpoint(LANDING_PAGE)?;
        self.logger.debug(&format!("Bootstrapping session via {}", url));
        let response = self.client.get(url).send().await?;
        self.logger.info(&format!(
            "Session bootstrap responded {} (cookie present: {})",
            response.status(),
            self.has_session()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = NseSession::new().unwrap();
        assert!(!session.has_session());
        assert_eq!(
            session.endpoint("/api/historical/cm/equity").unwrap().as_str(),
            "https://www.nseindia.com/api/historical/cm/equity"
        );
    }

    #[test]
    fn test_browser_headers() {
        let url = Url::parse("http://127.0.0.1:8080").unwrap();
        let headers = NseSession::browser_headers(&url).unwrap();
        assert_eq!(headers["host"], "127.0.0.1:8080");
        assert_eq!(
            headers["referer"],
            "http://127.0.0.1:8080/get-quotes/equity?symbol=TATASTEEL"
        );
        assert_eq!(headers["x-requested-with"], "XMLHttpRequest");
        assert!(headers.get("accept-encoding").is_none());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            NseSession::with_base_url("not a url"),
            Err(StrengthError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_has_session_reads_jar() {
        let session = NseSession::new().unwrap();
        session.jar.add_cookie_str(
            "nseappid=abc123; Path=/",
            &Url::parse(DEFAULT_BASE_URL).unwrap(),
        );
        assert!(session.has_session());
    }
}
