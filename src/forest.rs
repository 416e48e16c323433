//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MgmtError;
use crate::handle::Handle;
use crate::types::Availability;

/// A physical storage unit assigned to a database.
///
/// A `Forest` is constructed locally with defaults, configured through the
/// chained setters (no remote effect), and only reaches the server on
/// [`create()`](Forest::create()), [`save()`](Forest::save()) or
/// [`remove()`](Forest::remove()).
///
/// ```no_run
/// use marklogic_mgmt_rust_sdk::{Forest, Handle};
/// # async fn run(handle: &Handle) -> Result<(), Box<dyn std::error::Error>> {
/// Forest::new("documents-f1")
///     .set_host("ml1.example.com")
///     .set_data_directory("/var/opt/MarkLogic/Data")
///     .create(handle)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Forest {
    forest_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    large_data_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_data_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    availability: Option<Availability>,
}

impl Forest {
    /// Create a new local forest configuration.
    ///
    /// The host defaults to the local machine's hostname, lowercased, the
    /// same default the server applies for single-host installations.
    pub fn new(name: &str) -> Forest {
        let host = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .map(|h| h.to_lowercase());
        Forest {
            forest_name: name.to_string(),
            host,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.forest_name
    }

    pub fn set_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn set_database(mut self, db: &str) -> Self {
        self.database = Some(db.to_string());
        self
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn set_data_directory(mut self, dir: &str) -> Self {
        self.data_directory = Some(dir.to_string());
        self
    }

    pub fn data_directory(&self) -> Option<&str> {
        self.data_directory.as_deref()
    }

    pub fn set_large_data_directory(mut self, dir: &str) -> Self {
        self.large_data_directory = Some(dir.to_string());
        self
    }

    pub fn large_data_directory(&self) -> Option<&str> {
        self.large_data_directory.as_deref()
    }

    pub fn set_fast_data_directory(mut self, dir: &str) -> Self {
        self.fast_data_directory = Some(dir.to_string());
        self
    }

    pub fn fast_data_directory(&self) -> Option<&str> {
        self.fast_data_directory.as_deref()
    }

    pub fn set_availability(mut self, availability: Availability) -> Self {
        self.availability = Some(availability);
        self
    }

    pub fn availability(&self) -> Option<Availability> {
        self.availability
    }

    /// Create this forest on the server.
    pub async fn create(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("creating forest {}", self.forest_name);
        h.post_json(&h.manage_url("forests"), self, &[]).await?;
        Ok(self)
    }

    /// Write the local configuration to the server. The forest must
    /// already exist remotely.
    pub async fn save(&self, h: &Handle) -> Result<&Self, MgmtError> {
        let url = h.manage_url(&format!("forests/{}/properties", self.forest_name));
        h.put_json(&url, self, &[]).await?;
        Ok(self)
    }

    /// Delete this forest and its data. A forest that does not exist
    /// remotely is not an error.
    pub async fn remove(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("removing forest {}", self.forest_name);
        let url = h.manage_url(&format!("forests/{}?level=full", self.forest_name));
        h.delete(&url).await?;
        Ok(self)
    }

    /// Fetch a forest's configuration from the server, or `None` if no
    /// forest with that name exists.
    pub async fn lookup(name: &str, h: &Handle) -> Result<Option<Forest>, MgmtError> {
        let url = h.manage_url(&format!("forests/{}/properties", name));
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
    fn new_forest_defaults_to_local_host() {
        let f = Forest::new("test-forest");
        assert_eq!(f.name(), "test-forest");
        if let Some(host) = f.host() {
            assert_eq!(host, host.to_lowercase());
        }
    }

    #[test]
    fn serialization_omits_unset_fields() {
        let f = Forest::new("f1").set_host("ml1");
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["forest-name"], "f1");
        assert_eq!(v["host"], "ml1");
        assert!(v.get("database").is_none());
        assert!(v.get("data-directory").is_none());
    }

    #[test]
    fn availability_serializes_as_token() {
        let f = Forest::new("f1").set_availability(Availability::Offline);
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["availability"], "offline");
    }

    #[test]
    fn lookup_json_round_trip() {
        let v = serde_json::json!({
            "forest-name": "remote-forest",
            "host": "ml2.example.com",
            "availability": "online",
            "some-unknown-server-field": 42
        });
        let f: Forest = serde_json::from_value(v).unwrap();
        assert_eq!(f.name(), "remote-forest");
        assert_eq!(f.availability(), Some(Availability::Online));
    }
}
