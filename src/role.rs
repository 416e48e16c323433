//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! The [`Role`] security entity.

use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{svc_err, MgmtError};
use crate::handle::Handle;

/// An execute or URI privilege granted to a role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Privilege {
    pub privilege_name: String,
    pub action: String,
    pub kind: String,
}

/// A security role.
///
/// Roles created here live in the server's security database. The server
/// answers role creation with 200, 201 or 204 depending on version, all of
/// which are success.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Role {
    role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "role", skip_serializing_if = "Option::is_none")]
    parent_roles: Option<Vec<String>>,
    #[serde(rename = "privilege", skip_serializing_if = "Option::is_none")]
    privileges: Option<Vec<Privilege>>,
}

impl Role {
    pub fn new(name: &str) -> Role {
        Role {
            role_name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.role_name
    }

    pub fn set_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Add a role this role inherits from.
    pub fn add_parent_role(mut self, role_name: &str) -> Self {
        self.parent_roles
            .get_or_insert_with(Vec::new)
            .push(role_name.to_string());
        self
    }

    pub fn parent_roles(&self) -> &[String] {
        self.parent_roles.as_deref().unwrap_or(&[])
    }

    /// Grant a privilege to this role. `kind` is `execute` or `uri`.
    pub fn add_privilege(mut self, name: &str, action: &str, kind: &str) -> Self {
        self.privileges.get_or_insert_with(Vec::new).push(Privilege {
            privilege_name: name.to_string(),
            action: action.to_string(),
            kind: kind.to_string(),
        });
        self
    }

    pub fn privileges(&self) -> &[Privilege] {
        self.privileges.as_deref().unwrap_or(&[])
    }

    /// Create this role on the server.
    pub async fn create(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("creating role {}", self.role_name);
        h.post_json(&h.manage_url("roles"), self, &[200, 201, 204])
            .await?;
        Ok(self)
    }

    /// Write the local configuration to the server. The role must already
    /// exist remotely.
    pub async fn save(&self, h: &Handle) -> Result<&Self, MgmtError> {
        let url = h.manage_url(&format!("roles/{}/properties", self.role_name));
        h.put_json(&url, self, &[200, 204]).await?;
        Ok(self)
    }

    /// Delete this role. A role that does not exist remotely is not an
    /// error.
    pub async fn remove(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("removing role {}", self.role_name);
        let url = h.manage_url(&format!("roles/{}", self.role_name));
        h.delete(&url).await?;
        Ok(self)
    }

    /// Fetch a role's configuration from the security database, or `None`
    /// if no role with that name exists.
    pub async fn lookup(name: &str, h: &Handle) -> Result<Option<Role>, MgmtError> {
        let url = h.manage_url(&format!("roles/{}/properties", name));
        match h.get_json(&url).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    /// List every role in the security database, with full properties.
    ///
    /// The collection listing only carries references, so each role costs
    /// one further round trip.
    pub async fn list(h: &Handle) -> Result<Vec<Role>, MgmtError> {
        let listing = match h.get_json(&h.manage_url("roles")).await? {
            Some(v) => v,
            None => return svc_err!("role listing endpoint not found"),
        };
        let mut results = Vec::new();
        for uriref in listing_urirefs(&listing, "role-default-list")? {
            let url = h.manage_uriref(&format!("{}/properties", uriref));
            match h.get_json(&url).await? {
                Some(v) => results.push(serde_json::from_value(v)?),
                None => return svc_err!("role at {} vanished during listing", uriref),
            }
        }
        Ok(results)
    }
}

// Pull the "uriref" of every list item out of a collection listing:
// {"<kind>": {"list-items": {"list-item": [{"uriref": "/manage/v2/..."}]}}}
// An empty collection may omit "list-item" entirely.
pub(crate) fn listing_urirefs(listing: &Value, kind: &str) -> Result<Vec<String>, MgmtError> {
    listing_refs(listing, kind, "uriref")
}

pub(crate) fn listing_refs(
    listing: &Value,
    kind: &str,
    ref_key: &str,
) -> Result<Vec<String>, MgmtError> {
    let items = &listing[kind]["list-items"]["list-item"];
    if items.is_null() {
        return Ok(Vec::new());
    }
    let items = match items.as_array() {
        Some(a) => a,
        None => {
            return Err(MgmtError::illegal_state(&format!(
                "malformed {} listing: list-item is not an array",
                kind
            )))
        }
    };
    let mut refs = Vec::with_capacity(items.len());
    for item in items {
        match item[ref_key].as_str() {
            Some(r) => refs.push(r.to_string()),
            None => {
                return Err(MgmtError::illegal_state(&format!(
                    "malformed {} listing: list-item without {}",
                    kind, ref_key
                )))
            }
        }
    }
    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MgmtErrorCode;

    #[test]
    fn role_wire_format() {
        let r = Role::new("app-writer")
            .set_description("Can write app documents")
            .add_parent_role("rest-writer")
            .add_privilege("any-uri", "http://marklogic.com/xdmp/privileges/any-uri", "execute");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["role-name"], "app-writer");
        assert_eq!(v["role"][0], "rest-writer");
        assert_eq!(v["privilege"][0]["privilege-name"], "any-uri");
        assert_eq!(v["privilege"][0]["kind"], "execute");
    }

    #[test]
    fn empty_lists_are_omitted() {
        let v = serde_json::to_value(Role::new("plain")).unwrap();
        assert!(v.get("role").is_none());
        assert!(v.get("privilege").is_none());
        assert!(v.get("description").is_none());
    }

    #[test]
    fn urirefs_from_listing() {
        let listing = serde_json::json!({
            "role-default-list": {
                "list-items": {
                    "list-count": {"value": 2},
                    "list-item": [
                        {"nameref": "admin", "uriref": "/manage/v2/roles/admin"},
                        {"nameref": "app-user", "uriref": "/manage/v2/roles/app-user"}
                    ]
                }
            }
        });
        let refs = listing_urirefs(&listing, "role-default-list").unwrap();
        assert_eq!(refs, ["/manage/v2/roles/admin", "/manage/v2/roles/app-user"]);
    }

    #[test]
    fn empty_listing_yields_no_refs() {
        let listing = serde_json::json!({
            "role-default-list": {"list-items": {"list-count": {"value": 0}}}
        });
        assert!(listing_urirefs(&listing, "role-default-list")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_listing_is_illegal_state() {
        let listing = serde_json::json!({
            "role-default-list": {"list-items": {"list-item": [{"no-ref-here": 1}]}}
        });
        let err = listing_urirefs(&listing, "role-default-list").unwrap_err();
        assert_eq!(err.code, MgmtErrorCode::IllegalState);
    }
}
