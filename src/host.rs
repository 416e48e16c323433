//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! Read-only view of the cluster's member hosts.

use serde_derive::{Deserialize, Serialize};

use crate::error::{svc_err, MgmtError};
use crate::handle::Handle;
use crate::role::listing_refs;

/// A member host of the cluster, as reported by the server.
///
/// Hosts are managed by the cluster itself; this type has no setters and
/// no create/save/remove operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Host {
    host_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bind_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    foreign_bind_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bootstrap_host: Option<bool>,
}

impl Host {
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn bind_port(&self) -> Option<u16> {
        self.bind_port
    }

    pub fn foreign_bind_port(&self) -> Option<u16> {
        self.foreign_bind_port
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn bootstrap_host(&self) -> Option<bool> {
        self.bootstrap_host
    }

    /// Fetch a host's properties, or `None` if the cluster has no member
    /// with that name.
    pub async fn lookup(name: &str, h: &Handle) -> Result<Option<Host>, MgmtError> {
        let url = h.manage_url(&format!("hosts/{}/properties", name));
        match h.get_json(&url).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    /// List every member host of the cluster, with full properties.
    ///
    /// The host listing carries name references rather than URIs, so each
    /// host is re-fetched through [`lookup()`](Host::lookup()).
    pub async fn list(h: &Handle) -> Result<Vec<Host>, MgmtError> {
        let listing = match h.get_json(&h.manage_url("hosts")).await? {
            Some(v) => v,
            None => return svc_err!("host listing endpoint not found"),
        };
        let mut results = Vec::new();
        for nameref in listing_refs(&listing, "host-default-list", "nameref")? {
            match Host::lookup(&nameref, h).await? {
                Some(host) => results.push(host),
                None => return svc_err!("host {} vanished during listing", nameref),
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_from_server_json() {
        let v = serde_json::json!({
            "host-name": "ml1.example.com",
            "group": "Default",
            "bind-port": 7999,
            "foreign-bind-port": 7998,
            "zone": "us-east-1a",
            "bootstrap-host": true,
            "some-unknown-field": []
        });
        let host: Host = serde_json::from_value(v).unwrap();
        assert_eq!(host.host_name(), "ml1.example.com");
        assert_eq!(host.group(), Some("Default"));
        assert_eq!(host.bind_port(), Some(7999));
        assert_eq!(host.bootstrap_host(), Some(true));
    }

    #[test]
    fn sparse_host_json() {
        let v = serde_json::json!({"host-name": "ml2"});
        let host: Host = serde_json::from_value(v).unwrap();
        assert_eq!(host.host_name(), "ml2");
        assert!(host.zone().is_none());
        assert!(host.foreign_bind_port().is_none());
    }
}
