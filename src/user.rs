//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! The [`User`] security entity.

use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{svc_err, MgmtError};
use crate::handle::Handle;
use crate::role::listing_urirefs;

/// A user account in the security database.
///
/// The role list behaves as an insertion-ordered set: adding a name a
/// second time is a no-op, and removal preserves the order of the
/// remaining names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct User {
    user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "role", skip_serializing_if = "Option::is_none")]
    roles: Option<Vec<String>>,
}

impl User {
    pub fn new(name: &str) -> User {
        User {
            user_name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.user_name
    }

    /// Set the user name this configuration targets. Renaming locally
    /// never renames an already-created remote user.
    pub fn set_name(mut self, name: &str) -> Self {
        self.user_name = name.to_string();
        self
    }

    pub fn set_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn set_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Grant a role to this user. Names already present are not
    /// duplicated.
    pub fn add_role_name(mut self, role: &str) -> Self {
        let roles = self.roles.get_or_insert_with(Vec::new);
        if !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
        self
    }

    /// Revoke a role from this user. Absent names are ignored.
    pub fn remove_role_name(mut self, role: &str) -> Self {
        if let Some(roles) = &mut self.roles {
            roles.retain(|r| r != role);
        }
        self
    }

    /// Replace the role list wholesale.
    pub fn set_role_names(mut self, roles: Vec<String>) -> Self {
        self.roles = Some(roles);
        self
    }

    pub fn role_names(&self) -> &[String] {
        self.roles.as_deref().unwrap_or(&[])
    }

    /// Create this user on the server.
    pub async fn create(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("creating user {}", self.user_name);
        h.post_json(&h.manage_url("users"), self, &[200, 201, 204])
            .await?;
        Ok(self)
    }

    /// Write the local configuration to the server. The user must already
    /// exist remotely.
    pub async fn save(&self, h: &Handle) -> Result<&Self, MgmtError> {
        let url = h.manage_url(&format!("users/{}/properties", self.user_name));
        h.put_json(&url, self, &[200, 204]).await?;
        Ok(self)
    }

    /// Delete this user. A user that does not exist remotely is not an
    /// error.
    pub async fn remove(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("removing user {}", self.user_name);
        let url = h.manage_url(&format!("users/{}", self.user_name));
        h.delete(&url).await?;
        Ok(self)
    }

    /// Fetch a user's configuration from the security database, or `None`
    /// if no user with that name exists. The server never reports the
    /// password back.
    pub async fn lookup(name: &str, h: &Handle) -> Result<Option<User>, MgmtError> {
        let url = h.manage_url(&format!("users/{}/properties", name));
        match h.get_json(&url).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    /// List every user in the security database, with full properties.
    pub async fn list(h: &Handle) -> Result<Vec<User>, MgmtError> {
        let listing = match h.get_json(&h.manage_url("users")).await? {
            Some(v) => v,
            None => return svc_err!("user listing endpoint not found"),
        };
        let mut results = Vec::new();
        for uriref in listing_urirefs(&listing, "user-default-list")? {
            let url = h.manage_uriref(&format!("{}/properties", uriref));
            match h.get_json(&url).await? {
                Some(v) => results.push(serde_json::from_value(v)?),
                None => return svc_err!("user at {} vanished during listing", uriref),
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_deduplicate_in_insertion_order() {
        let u = User::new("jdoe")
            .add_role_name("rest-reader")
            .add_role_name("rest-writer")
            .add_role_name("rest-reader");
        assert_eq!(u.role_names(), ["rest-reader", "rest-writer"]);
    }

    #[test]
    fn remove_role_name_preserves_order() {
        let u = User::new("jdoe")
            .add_role_name("a")
            .add_role_name("b")
            .add_role_name("c")
            .remove_role_name("b")
            .remove_role_name("not-present");
        assert_eq!(u.role_names(), ["a", "c"]);
    }

    #[test]
    fn set_role_names_replaces_wholesale() {
        let u = User::new("jdoe")
            .add_role_name("old")
            .set_role_names(vec!["fresh".to_string()]);
        assert_eq!(u.role_names(), ["fresh"]);
    }

    #[test]
    fn user_wire_format() {
        let u = User::new("jdoe")
            .set_password("hunter2")
            .set_description("Test account")
            .add_role_name("rest-reader");
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["user-name"], "jdoe");
        assert_eq!(v["password"], "hunter2");
        assert_eq!(v["role"][0], "rest-reader");
    }

    #[test]
    fn lookup_json_has_no_password() {
        let v = serde_json::json!({
            "user-name": "jdoe",
            "description": "Test account",
            "role": ["rest-reader"]
        });
        let u: User = serde_json::from_value(v).unwrap();
        assert_eq!(u.name(), "jdoe");
        assert_eq!(u.role_names(), ["rest-reader"]);
        let round = serde_json::to_value(&u).unwrap();
        assert!(round.get("password").is_none());
    }
}
