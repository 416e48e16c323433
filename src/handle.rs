//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
use std::result::Result;
use std::sync::Arc;
use std::time::Duration;

use diqwest::WithDigestAuth;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{iv_err, svc_err, user_agent, MgmtError};
use crate::handle_builder::HandleBuilder;

/// **The main server handle**.
///
/// This should be created once and used throughout the application
/// lifetime, across all threads.
///
/// Note: there is no need to enclose this struct in an `Rc` or [`Arc`], as
/// it uses an [`Arc`] internally, so calling `.clone()` on this struct will
/// always return the same underlying handle.
#[derive(Clone, Debug)]
pub struct Handle {
    // Use an inner Arc so cloning keeps the same contents
    pub(crate) inner: Arc<HandleRef>,
}

#[derive(Debug)]
pub(crate) struct HandleRef {
    pub(crate) client: reqwest::Client,
    // "http[s]://{host}:{management_port}"
    pub(crate) manage_base: String,
    // "http[s]://{host}:{port}"
    pub(crate) docs_base: String,
    pub(crate) builder: HandleBuilder,
    pub(crate) timeout: Duration,
}

impl Handle {
    /// Create a new [`HandleBuilder`].
    pub fn builder() -> HandleBuilder {
        HandleBuilder::new()
    }

    // Create the new Handle based on builder configuration
    pub(crate) fn new(b: &HandleBuilder) -> Result<Handle, MgmtError> {
        if b.username.is_empty() {
            if b.from_environment {
                return iv_err!(
                    "cannot build handle: no credentials. set MARKLOGIC_USER and MARKLOGIC_PASSWORD."
                );
            }
            return iv_err!("cannot build handle: call HandleBuilder::digest_auth()");
        }

        let timeout = b.timeout.unwrap_or(Duration::new(30, 0));
        let client = {
            if let Some(c) = &b.client {
                c.clone()
            } else {
                let mut cb = reqwest::Client::builder()
                    .timeout(timeout)
                    .connect_timeout(timeout);
                if let Some(cert) = &b.add_cert {
                    cb = cb.add_root_certificate(cert.clone());
                }
                if b.accept_invalid_certs {
                    cb = cb.danger_accept_invalid_certs(true);
                }
                cb.build()?
            }
        };

        let scheme = if b.use_https { "https" } else { "http" };
        let manage_base = format!("{}://{}:{}", scheme, b.host, b.management_port);
        let docs_base = format!("{}://{}:{}", scheme, b.host, b.port);
        debug!(
            "Creating new Handle: manage={}, docs={}, user={}",
            manage_base, docs_base, b.username
        );
        Ok(Handle {
            inner: Arc::new(HandleRef {
                client,
                manage_base,
                docs_base,
                builder: b.clone(),
                timeout,
            }),
        })
    }

    /// The configured server host.
    pub fn host(&self) -> &str {
        &self.inner.builder.host
    }
    /// The REST API (content) port.
    pub fn port(&self) -> u16 {
        self.inner.builder.port
    }
    /// The Management API port.
    pub fn management_port(&self) -> u16 {
        self.inner.builder.management_port
    }
    /// The digest auth user name.
    pub fn username(&self) -> &str {
        &self.inner.builder.username
    }
    pub(crate) fn password(&self) -> &str {
        &self.inner.builder.password
    }
    #[allow(dead_code)]
    pub(crate) fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    // "{manage_base}/manage/v2/{path}", path given without a leading slash
    pub(crate) fn manage_url(&self, path: &str) -> String {
        format!("{}/manage/v2/{}", self.inner.manage_base, path)
    }

    // Resolve a server-reported absolute path (a "uriref" from a listing
    // response) against the management base.
    pub(crate) fn manage_uriref(&self, uriref: &str) -> String {
        format!("{}{}", self.inner.manage_base, uriref)
    }

    // Content endpoint URL for a single document, with the collection
    // query parameters the loaders use.
    pub(crate) fn document_url(
        &self,
        uri: &str,
        database: &str,
        collections: &[String],
    ) -> Result<String, MgmtError> {
        let mut u = Url::parse(&format!("{}/v1/documents", self.inner.docs_base))?;
        {
            let mut q = u.query_pairs_mut();
            q.append_pair("uri", uri);
            q.append_pair("database", database);
            for collection in collections {
                q.append_pair("collection", collection);
            }
        }
        Ok(u.to_string())
    }

    /// GET a JSON resource. A 404 yields `None`; any other non-2xx status
    /// is a `ServiceError` carrying the response body text.
    pub(crate) async fn get_json(&self, url: &str) -> Result<Option<Value>, MgmtError> {
        trace!("GET {}", url);
        let resp = self
            .inner
            .client
            .get(url)
            .header("accept", "application/json")
            .header("User-Agent", user_agent())
            .send_with_digest_auth(self.username(), self.password())
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let content = resp.text().await?;
            return svc_err!(
                "got unexpected http status: {}, response text: {}",
                status,
                content
            );
        }
        Ok(Some(resp.json::<Value>().await?))
    }

    /// POST a JSON body to a collection endpoint. Any 2xx status within
    /// `accepted` (or any 2xx if `accepted` is empty) is success.
    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        accepted: &[u16],
    ) -> Result<(), MgmtError> {
        trace!("POST {}", url);
        let resp = self
            .inner
            .client
            .post(url)
            .header("User-Agent", user_agent())
            .json(body)
            .send_with_digest_auth(self.username(), self.password())
            .await?;
        Self::check_status(resp, accepted).await
    }

    /// PUT a JSON body to a per-resource properties endpoint.
    pub(crate) async fn put_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        accepted: &[u16],
    ) -> Result<(), MgmtError> {
        trace!("PUT {}", url);
        let resp = self
            .inner
            .client
            .put(url)
            .header("User-Agent", user_agent())
            .json(body)
            .send_with_digest_auth(self.username(), self.password())
            .await?;
        Self::check_status(resp, accepted).await
    }

    /// DELETE a resource. A 404 is a benign outcome, not an error.
    pub(crate) async fn delete(&self, url: &str) -> Result<(), MgmtError> {
        trace!("DELETE {}", url);
        let resp = self
            .inner
            .client
            .delete(url)
            .header("User-Agent", user_agent())
            .send_with_digest_auth(self.username(), self.password())
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check_status(resp, &[]).await
    }

    /// PUT raw document bytes to the content endpoint.
    pub(crate) async fn put_bytes(
        &self,
        url: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), MgmtError> {
        trace!("PUT {} ({} bytes)", url, body.len());
        let resp = self
            .inner
            .client
            .put(url)
            .header("content-type", content_type)
            .header("User-Agent", user_agent())
            .body(body)
            .send_with_digest_auth(self.username(), self.password())
            .await?;
        Self::check_status(resp, &[]).await
    }

    async fn check_status(resp: reqwest::Response, accepted: &[u16]) -> Result<(), MgmtError> {
        let status = resp.status();
        let ok = if accepted.is_empty() {
            status.is_success()
        } else {
            accepted.contains(&status.as_u16())
        };
        if ok {
            return Ok(());
        }
        let content = resp.text().await.unwrap_or_default();
        svc_err!(
            "got unexpected http status: {}, response text: {}",
            status,
            content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_handle() -> Handle {
        Handle::builder()
            .host("ml.example.com")
            .unwrap()
            .digest_auth("admin", "admin")
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn url_construction() {
        let h = test_handle();
        assert_eq!(
            h.manage_url("databases"),
            "http://ml.example.com:8002/manage/v2/databases"
        );
        assert_eq!(
            h.manage_uriref("/manage/v2/roles/admin"),
            "http://ml.example.com:8002/manage/v2/roles/admin"
        );
    }

    #[test]
    fn document_url_encodes_collections() {
        let h = test_handle();
        let url = h
            .document_url(
                "/docs/a b.json",
                "mydb",
                &["one".to_string(), "two".to_string()],
            )
            .unwrap();
        assert!(url.starts_with("http://ml.example.com:8000/v1/documents?"));
        assert!(url.contains("uri=%2Fdocs%2Fa+b.json"));
        assert!(url.contains("database=mydb"));
        assert!(url.contains("collection=one"));
        assert!(url.contains("collection=two"));
    }

    #[test]
    fn https_base_urls() {
        let h = Handle::builder()
            .host("https://secure.example.com")
            .unwrap()
            .management_port(9002)
            .unwrap()
            .digest_auth("admin", "admin")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            h.manage_url("forests"),
            "https://secure.example.com:9002/manage/v2/forests"
        );
    }
}
