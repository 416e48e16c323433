//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! HTTP and XDBC application server entities.

use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MgmtError;
use crate::handle::Handle;
use crate::types::Authentication;

/// An HTTP application server.
///
/// New servers bind to the `Default` group with root `/`, enabled, with a
/// modules database named `{name}-modules` and a content database named
/// after the server unless one is supplied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpServer {
    server_name: String,
    server_type: String,
    group_name: String,
    root: String,
    enabled: bool,
    port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    modules_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url_rewriter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rewrite_resolves_globally: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authentication: Option<Authentication>,
}

impl HttpServer {
    /// Create a new local HTTP server configuration on `port`, serving
    /// `content_database` if given, otherwise a content database named
    /// after the server.
    pub fn new(name: &str, port: u16, content_database: Option<&str>) -> HttpServer {
        HttpServer {
            server_name: name.to_string(),
            server_type: "http".to_string(),
            group_name: "Default".to_string(),
            root: "/".to_string(),
            enabled: true,
            port,
            modules_database: Some(format!("{}-modules", name)),
            content_database: Some(content_database.unwrap_or(name).to_string()),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.server_name
    }

    pub fn set_group_name(mut self, group: &str) -> Self {
        self.group_name = group.to_string();
        self
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn set_root(mut self, root: &str) -> Self {
        self.root = root.to_string();
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_modules_database(mut self, db: &str) -> Self {
        self.modules_database = Some(db.to_string());
        self
    }

    pub fn modules_database(&self) -> Option<&str> {
        self.modules_database.as_deref()
    }

    pub fn set_content_database(mut self, db: &str) -> Self {
        self.content_database = Some(db.to_string());
        self
    }

    pub fn content_database(&self) -> Option<&str> {
        self.content_database.as_deref()
    }

    /// User assumed for requests that present no credentials.
    pub fn set_default_user(mut self, user: &str) -> Self {
        self.default_user = Some(user.to_string());
        self
    }

    pub fn default_user(&self) -> Option<&str> {
        self.default_user.as_deref()
    }

    /// Module invoked to rewrite incoming request URLs, for example
    /// `/rewriter.sjs`.
    pub fn set_url_rewriter(mut self, which: &str) -> Self {
        self.url_rewriter = Some(which.to_string());
        self
    }

    pub fn url_rewriter(&self) -> Option<&str> {
        self.url_rewriter.as_deref()
    }

    pub fn set_rewrite_resolves_globally(mut self, enabled: bool) -> Self {
        self.rewrite_resolves_globally = Some(enabled);
        self
    }

    pub fn rewrite_resolves_globally(&self) -> Option<bool> {
        self.rewrite_resolves_globally
    }

    pub fn set_authentication(mut self, which: Authentication) -> Self {
        self.authentication = Some(which);
        self
    }

    pub fn authentication(&self) -> Option<Authentication> {
        self.authentication
    }

    /// Create this app server on the remote server.
    pub async fn create(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("creating http server {}", self.server_name);
        h.post_json(&h.manage_url("servers"), self, &[]).await?;
        Ok(self)
    }

    /// Write the local configuration to the server. The app server must
    /// already exist remotely.
    pub async fn save(&self, h: &Handle) -> Result<&Self, MgmtError> {
        let url = h.manage_url(&format!("servers/{}/properties", self.server_name));
        h.put_json(&url, self, &[]).await?;
        Ok(self)
    }

    /// Delete this app server from its group. An app server that does not
    /// exist remotely is not an error.
    pub async fn remove(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("removing http server {}", self.server_name);
        let url = h.manage_url(&format!(
            "servers/{}?group-id={}",
            self.server_name, self.group_name
        ));
        h.delete(&url).await?;
        Ok(self)
    }

    /// Fetch an app server's configuration from a group, or `None` if no
    /// server with that name exists there.
    pub async fn lookup(
        name: &str,
        group: &str,
        h: &Handle,
    ) -> Result<Option<HttpServer>, MgmtError> {
        let url = h.manage_url(&format!("servers/{}/properties?group-id={}", name, group));
        match h.get_json(&url).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }
}

/// An XDBC application server, used by XCC clients and the content pump.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct XdbcServer {
    server_name: String,
    server_type: String,
    group_name: String,
    root: String,
    enabled: bool,
    port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    modules_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    authentication: Option<Authentication>,
}

impl XdbcServer {
    pub fn new(name: &str, port: u16) -> XdbcServer {
        XdbcServer {
            server_name: name.to_string(),
            server_type: "xdbc".to_string(),
            group_name: "Default".to_string(),
            root: "/".to_string(),
            enabled: true,
            port,
            modules_database: Some(format!("{}-modules", name)),
            content_database: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.server_name
    }

    pub fn set_group_name(mut self, group: &str) -> Self {
        self.group_name = group.to_string();
        self
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn set_root(mut self, root: &str) -> Self {
        self.root = root.to_string();
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_modules_database(mut self, db: &str) -> Self {
        self.modules_database = Some(db.to_string());
        self
    }

    pub fn modules_database(&self) -> Option<&str> {
        self.modules_database.as_deref()
    }

    pub fn set_content_database(mut self, db: &str) -> Self {
        self.content_database = Some(db.to_string());
        self
    }

    pub fn content_database(&self) -> Option<&str> {
        self.content_database.as_deref()
    }

    pub fn set_authentication(mut self, which: Authentication) -> Self {
        self.authentication = Some(which);
        self
    }

    pub fn authentication(&self) -> Option<Authentication> {
        self.authentication
    }

    pub async fn create(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("creating xdbc server {}", self.server_name);
        h.post_json(&h.manage_url("servers"), self, &[]).await?;
        Ok(self)
    }

    pub async fn save(&self, h: &Handle) -> Result<&Self, MgmtError> {
        let url = h.manage_url(&format!("servers/{}/properties", self.server_name));
        h.put_json(&url, self, &[]).await?;
        Ok(self)
    }

    pub async fn remove(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("removing xdbc server {}", self.server_name);
        let url = h.manage_url(&format!("servers/{}", self.server_name));
        h.delete(&url).await?;
        Ok(self)
    }

    pub async fn lookup(name: &str, h: &Handle) -> Result<Option<XdbcServer>, MgmtError> {
        let url = h.manage_url(&format!("servers/{}/properties", name));
        match h.get_json(&url).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_server_defaults() {
        let s = HttpServer::new("myapp", 8010, None);
        assert_eq!(s.name(), "myapp");
        assert_eq!(s.group_name(), "Default");
        assert_eq!(s.root(), "/");
        assert!(s.enabled());
        assert_eq!(s.port(), 8010);
        assert_eq!(s.modules_database(), Some("myapp-modules"));
        assert_eq!(s.content_database(), Some("myapp"));
    }

    #[test]
    fn http_server_content_database_override() {
        let s = HttpServer::new("myapp", 8010, Some("content-db"));
        assert_eq!(s.content_database(), Some("content-db"));
    }

    #[test]
    fn http_server_wire_format() {
        let s = HttpServer::new("myapp", 8010, None)
            .set_url_rewriter("/rewriter.sjs")
            .set_authentication(Authentication::ApplicationLevel);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["server-name"], "myapp");
        assert_eq!(v["server-type"], "http");
        assert_eq!(v["group-name"], "Default");
        assert_eq!(v["url-rewriter"], "/rewriter.sjs");
        assert_eq!(v["authentication"], "application-level");
        assert!(v.get("default-user").is_none());
    }

    #[test]
    fn xdbc_server_wire_format() {
        let s = XdbcServer::new("xcc", 9000);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["server-type"], "xdbc");
        assert_eq!(v["port"], 9000);
        assert_eq!(v["modules-database"], "xcc-modules");
        assert_eq!(v["content-database"], "xcc");
    }
}
