//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! Builder for creating a [`Handle`](crate::Handle).

use std::env;
use std::result::Result;
use std::time::Duration;

use crate::error::{iv_err, MgmtError};
use crate::handle::Handle;
use reqwest::{Certificate, Client};

/// Builder used to set all the parameters to create a [`Handle`].
///
/// The management API is reached on the server's management port (8002 by
/// default); document ingestion goes to the REST API port (8000 by
/// default). Both ports share the same host and HTTP Digest credentials.
///
/// ```no_run
/// # use marklogic_mgmt_rust_sdk::Handle;
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let handle = Handle::builder()
///     .host("localhost")?
///     .digest_auth("admin", "admin")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HandleBuilder {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) management_port: u16,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) use_https: bool,
    pub(crate) timeout: Option<Duration>,
    pub(crate) add_cert: Option<Certificate>,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) client: Option<Client>,
    // For error messaging
    pub(crate) from_environment: bool,
}

impl Default for HandleBuilder {
    fn default() -> Self {
        HandleBuilder {
            host: "localhost".to_string(),
            port: 8000,
            management_port: 8002,
            username: String::new(),
            password: String::new(),
            use_https: false,
            timeout: None,
            add_cert: None,
            accept_invalid_certs: false,
            client: None,
            from_environment: false,
        }
    }
}

impl HandleBuilder {
    /// Create a new HandleBuilder struct.
    ///
    /// The default builder has no credentials set. Consider calling
    /// [`from_environment()`](HandleBuilder::from_environment()) to collect
    /// all parameters from the local environment.
    pub fn new() -> Self {
        HandleBuilder {
            ..Default::default()
        }
    }

    /// Build a new [`Handle`].
    ///
    /// Note: Internally, if the builder contains a reference to an existing
    /// [`reqwest::Client`], it will clone and use that. Otherwise, it will
    /// create a new [`reqwest::Client`] for its own internal use. See
    /// [`reqwest_client()`](HandleBuilder::reqwest_client()).
    pub fn build(self) -> Result<Handle, MgmtError> {
        Handle::new(&self)
    }

    /// Gather configuration settings from the current environment.
    ///
    /// Values already set on the builder are overridden by any that appear
    /// in the environment; call this first to use the environment as a set
    /// of defaults instead.
    ///
    /// | variable | description |
    /// | -------- | ----------- |
    /// | `MARKLOGIC_HOST` | Server host name. See [`HandleBuilder::host()`]. |
    /// | `MARKLOGIC_PORT` | REST API (content) port. |
    /// | `MARKLOGIC_MANAGEMENT_PORT` | Management API port. |
    /// | `MARKLOGIC_USER` | Digest auth user name. |
    /// | `MARKLOGIC_PASSWORD` | Digest auth password. |
    /// | `MARKLOGIC_CA_CERT` | Path to a CA certificate in `pem` format. |
    /// | `MARKLOGIC_ACCEPT_INVALID_CERTS` | If `1` or `true`, do not verify certificates. |
    pub fn from_environment(mut self) -> Result<Self, MgmtError> {
        self.from_environment = true;
        if let Ok(val) = env::var("MARKLOGIC_HOST") {
            self = self.host(&val)?;
        }
        if let Ok(val) = env::var("MARKLOGIC_PORT") {
            match val.parse::<u16>() {
                Ok(p) => self = self.port(p)?,
                Err(_) => return iv_err!("invalid value '{}' for MARKLOGIC_PORT", val),
            }
        }
        if let Ok(val) = env::var("MARKLOGIC_MANAGEMENT_PORT") {
            match val.parse::<u16>() {
                Ok(p) => self = self.management_port(p)?,
                Err(_) => {
                    return iv_err!("invalid value '{}' for MARKLOGIC_MANAGEMENT_PORT", val)
                }
            }
        }
        let user = env::var("MARKLOGIC_USER").ok();
        let pass = env::var("MARKLOGIC_PASSWORD").ok();
        if let (Some(u), Some(p)) = (&user, &pass) {
            self = self.digest_auth(u, p)?;
        } else if user.is_some() || pass.is_some() {
            return iv_err!("MARKLOGIC_USER and MARKLOGIC_PASSWORD must both be set");
        }
        if let Ok(val) = env::var("MARKLOGIC_CA_CERT") {
            self = self.add_cert_from_pemfile(&val)?;
        }
        if let Ok(val) = env::var("MARKLOGIC_ACCEPT_INVALID_CERTS") {
            let lv = val.to_lowercase();
            if lv == "true" || lv == "1" {
                self = self.danger_accept_invalid_certs(true)?;
            }
        }
        Ok(self)
    }

    /// Set the server host.
    ///
    /// Accepts a bare host name (`my.server.com`) or a scheme-prefixed form
    /// (`https://my.server.com`); an `https` prefix also enables TLS as if
    /// [`use_https()`](HandleBuilder::use_https()) had been called.
    pub fn host(mut self, host: &str) -> Result<Self, MgmtError> {
        // normalize to just the host name
        let h = if let Some(rest) = host.strip_prefix("https://") {
            self.use_https = true;
            rest
        } else if let Some(rest) = host.strip_prefix("http://") {
            self.use_https = false;
            rest
        } else {
            host
        };
        let h = h.trim_end_matches('/');
        if h.is_empty() || h.contains('/') {
            return iv_err!("invalid host '{}'", host);
        }
        self.host = h.to_string();
        Ok(self)
    }

    /// Set the REST API (content) port. Defaults to 8000.
    pub fn port(mut self, port: u16) -> Result<Self, MgmtError> {
        if port == 0 {
            return iv_err!("port must be nonzero");
        }
        self.port = port;
        Ok(self)
    }

    /// Set the Management API port. Defaults to 8002.
    pub fn management_port(mut self, port: u16) -> Result<Self, MgmtError> {
        if port == 0 {
            return iv_err!("management port must be nonzero");
        }
        self.management_port = port;
        Ok(self)
    }

    /// Set the HTTP Digest credentials used for every request.
    pub fn digest_auth(mut self, username: &str, password: &str) -> Result<Self, MgmtError> {
        if username.is_empty() {
            return iv_err!("digest auth username must not be empty");
        }
        self.username = username.to_string();
        self.password = password.to_string();
        Ok(self)
    }

    /// Connect over https instead of http.
    pub fn use_https(mut self, https: bool) -> Result<Self, MgmtError> {
        self.use_https = https;
        Ok(self)
    }

    /// Specify the timeout for requests.
    ///
    /// This is optional. If set, it must be at least 1 millisecond.
    /// The default timeout is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Result<Self, MgmtError> {
        if timeout < Duration::from_millis(1) {
            return iv_err!("timeout must be at least 1 millisecond");
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Add a root certificate from a PEM file for verifying the server's
    /// TLS certificate.
    pub fn add_cert_from_pemfile(mut self, path: &str) -> Result<Self, MgmtError> {
        let pem = std::fs::read(path)?;
        let cert = Certificate::from_pem(&pem)?;
        self.add_cert = Some(cert);
        Ok(self)
    }

    /// Instruct the client to skip verifying the server's TLS certificate.
    ///
    /// Only use this for testing against servers with self-signed
    /// certificates.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Result<Self, MgmtError> {
        self.accept_invalid_certs = accept;
        Ok(self)
    }

    /// Supply a pre-configured [`reqwest::Client`] for the handle to use
    /// instead of building its own.
    pub fn reqwest_client(mut self, client: &Client) -> Result<Self, MgmtError> {
        self.client = Some(client.clone());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_normalization() {
        let b = HandleBuilder::new().host("https://ml.example.com/").unwrap();
        assert_eq!(b.host, "ml.example.com");
        assert!(b.use_https);

        let b = HandleBuilder::new().host("http://ml.example.com").unwrap();
        assert_eq!(b.host, "ml.example.com");
        assert!(!b.use_https);

        assert!(HandleBuilder::new().host("").is_err());
        assert!(HandleBuilder::new().host("http://a/b").is_err());
    }

    #[test]
    fn ports_must_be_nonzero() {
        assert!(HandleBuilder::new().port(0).is_err());
        assert!(HandleBuilder::new().management_port(0).is_err());
        let b = HandleBuilder::new().management_port(9002).unwrap();
        assert_eq!(b.management_port, 9002);
    }

    #[test]
    fn build_requires_credentials() {
        let err = HandleBuilder::new().build().unwrap_err();
        assert!(err.message.contains("digest_auth"));
    }
}
