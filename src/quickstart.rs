//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! A recipe that stands up a database, a modules database and an HTTP
//! server in one call.

use tracing::debug;

use crate::database::Database;
use crate::error::MgmtError;
use crate::handle::Handle;
use crate::server::HttpServer;

/// The three entities a [`SimpleDatabase`] recipe creates.
#[derive(Debug, Clone)]
pub struct SimpleDatabaseParts {
    pub content: Database,
    pub modules: Database,
    pub server: HttpServer,
}

/// Derives a complete minimal application from a base name: a content
/// database `{app}_db` with its forests, a modules database
/// `{app}_modules_db`, and an HTTP server `{app}_http_{port}` bound to
/// both.
///
/// ```no_run
/// use marklogic_mgmt_rust_sdk::{Handle, SimpleDatabase};
/// # async fn run(handle: &Handle) -> Result<(), Box<dyn std::error::Error>> {
/// let parts = SimpleDatabase::new("invoices", 8100)
///     .forests(2)
///     .create(handle, "ml1.example.com")
///     .await?;
/// assert_eq!(parts.content.database_name(), "invoices_db");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SimpleDatabase {
    db_name: String,
    modules_db_name: String,
    server_name: String,
    port: u16,
    forest_count: usize,
}

impl SimpleDatabase {
    pub fn new(app_name: &str, port: u16) -> SimpleDatabase {
        SimpleDatabase {
            db_name: format!("{}_db", app_name),
            modules_db_name: format!("{}_modules_db", app_name),
            server_name: format!("{}_http_{}", app_name, port),
            port,
            forest_count: 3,
        }
    }

    /// Set the number of content forests. Defaults to 3.
    pub fn forests(mut self, count: usize) -> Self {
        self.forest_count = count;
        self
    }

    pub fn database_name(&self) -> &str {
        &self.db_name
    }

    pub fn modules_database_name(&self) -> &str {
        &self.modules_db_name
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Content forest names, `{app}_db_forest_{i}` counting from 1.
    pub fn forest_names(&self) -> Vec<String> {
        (1..=self.forest_count)
            .map(|i| format!("{}_forest_{}", self.db_name, i))
            .collect()
    }

    /// Create the content database, the modules database and the HTTP
    /// server, in that order, with every forest on `hostname`. Aborts on
    /// the first failing step; already-created entities are not rolled
    /// back.
    pub async fn create(
        &self,
        h: &Handle,
        hostname: &str,
    ) -> Result<SimpleDatabaseParts, MgmtError> {
        debug!("quickstart create: {}", self.db_name);
        let content = Database::new(&self.db_name)
            .set_forest_host(hostname)
            .set_forests(self.forest_names());
        let modules = Database::new(&self.modules_db_name).set_forest_host(hostname);
        let server = HttpServer::new(&self.server_name, self.port, Some(&self.db_name))
            .set_modules_database(&self.modules_db_name);

        content.create(h).await?;
        modules.create(h).await?;
        server.create(h).await?;

        Ok(SimpleDatabaseParts {
            content,
            modules,
            server,
        })
    }

    /// Remove everything [`create()`](SimpleDatabase::create()) made, in
    /// reverse order. Entities that no longer exist are not errors.
    pub async fn destroy(&self, h: &Handle) -> Result<(), MgmtError> {
        debug!("quickstart destroy: {}", self.db_name);
        HttpServer::new(&self.server_name, self.port, Some(&self.db_name))
            .remove(h)
            .await?;
        Database::new(&self.modules_db_name).remove(h).await?;
        Database::new(&self.db_name)
            .set_forests(self.forest_names())
            .remove(h)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names() {
        let q = SimpleDatabase::new("invoices", 8100);
        assert_eq!(q.database_name(), "invoices_db");
        assert_eq!(q.modules_database_name(), "invoices_modules_db");
        assert_eq!(q.server_name(), "invoices_http_8100");
        assert_eq!(
            q.forest_names(),
            [
                "invoices_db_forest_1",
                "invoices_db_forest_2",
                "invoices_db_forest_3"
            ]
        );
    }

    #[test]
    fn forest_count_is_configurable() {
        let q = SimpleDatabase::new("tiny", 8200).forests(1);
        assert_eq!(q.forest_names(), ["tiny_db_forest_1"]);
    }
}
