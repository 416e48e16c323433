//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! The [`Database`] entity and its document loaders.

use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::MgmtError;
use crate::files::walk_directory;
use crate::forest::Forest;
use crate::handle::Handle;
use crate::index::{
    ElementAttributeRangeIndex, ElementRangeIndex, Field, FieldRangeIndex, RangeIndex,
};
use crate::types::{
    validate_range, AssignmentPolicy, DirectoryCreation, ExpungeLocks, FormatCompatibility,
    IndexDetection, Locking, MergePriority, RangeIndexOptimize, StemmedSearches, TfNormalization,
};

/// A namespace prefix binding usable in field paths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PathNamespace {
    pub prefix: String,
    pub namespace_uri: String,
}

// The server wraps the assignment policy name in its own object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct AssignmentPolicyConfig {
    assignment_policy_name: AssignmentPolicy,
}

/// A database configuration.
///
/// Constructing a `Database` populates the defaults the server quickstart
/// uses: one forest named `{name}-Forest-001`, the `Security` and
/// `Schemas` auxiliary databases, enabled, language `en`. Every setter
/// mutates local state only; nothing reaches the server until
/// [`create()`](Database::create()), [`save()`](Database::save()) or
/// [`remove()`](Database::remove()) is called.
///
/// ```no_run
/// use marklogic_mgmt_rust_sdk::{Database, FieldRangeIndex, Handle};
/// use marklogic_mgmt_rust_sdk::types::ScalarType;
/// # async fn run(handle: &Handle) -> Result<(), Box<dyn std::error::Error>> {
/// Database::new("orders")
///     .add_forest("orders-Forest-002")
///     .add_index(FieldRangeIndex::new("invoice-id", ScalarType::Int))
///     .create(handle)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Database {
    database_name: String,
    // host new forests are created on; never part of the database payload
    #[serde(skip)]
    forest_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forest: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    triggers_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stemmed_searches: Option<StemmedSearches>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_phrase_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_reverse_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    triple_index: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    triple_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_case_sensitive_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_diacritic_sensitive_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_element_word_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    element_word_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_element_phrase_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    element_value_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute_value_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_value_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_value_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    three_character_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    three_character_word_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_element_character_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trailing_wildcard_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trailing_wildcard_word_positions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_element_trailing_wildcard_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    two_character_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    one_character_searches: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri_lexicon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection_lexicon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reindexer_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reindexer_throttle: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reindexer_timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directory_creation: Option<DirectoryCreation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maintain_last_modified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maintain_directory_last_modified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inherit_permissions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inherit_collections: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inherit_quality: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_memory_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_memory_list_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_memory_tree_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_memory_range_index_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_memory_reverse_index_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_memory_triple_index_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    large_size_threshold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locking: Option<Locking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    journaling: Option<Locking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    journal_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    journal_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preallocate_journals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preload_mapped_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preload_replica_mapped_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range_index_optimize: Option<RangeIndexOptimize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    positions_list_max_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format_compatibility: Option<FormatCompatibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_detection: Option<IndexDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expunge_locks: Option<ExpungeLocks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tf_normalization: Option<TfNormalization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_priority: Option<MergePriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_max_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_min_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_min_ratio: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retain_until_backup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rebalancer_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rebalancer_throttle: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignment_policy: Option<AssignmentPolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_namespaces: Option<Vec<PathNamespace>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range_element_index: Option<Vec<ElementRangeIndex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range_element_attribute_index: Option<Vec<ElementAttributeRangeIndex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    range_field_index: Option<Vec<FieldRangeIndex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<Vec<Field>>,
}

impl Database {
    /// Create a new local database configuration with quickstart defaults.
    pub fn new(name: &str) -> Database {
        Database {
            database_name: name.to_string(),
            forest: Some(vec![format!("{}-Forest-001", name)]),
            security_database: Some("Security".to_string()),
            schema_database: Some("Schemas".to_string()),
            enabled: Some(true),
            language: Some("en".to_string()),
            ..Default::default()
        }
    }

    /// Set the database name.
    ///
    /// Note this only changes what later `save`/`remove` calls target; it
    /// does not rename an already-created remote database.
    pub fn set_database_name(mut self, name: &str) -> Self {
        self.database_name = name.to_string();
        self
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Set the host that forests listed in this configuration are created
    /// on during [`create()`](Database::create()).
    pub fn set_forest_host(mut self, host: &str) -> Self {
        self.forest_host = Some(host.to_string());
        self
    }

    pub fn forest_host(&self) -> Option<&str> {
        self.forest_host.as_deref()
    }

    /// Add a forest name to the database. The forest with that name is
    /// created when the database is created.
    pub fn add_forest(mut self, forest: &str) -> Self {
        self.forest
            .get_or_insert_with(Vec::new)
            .push(forest.to_string());
        self
    }

    /// Replace the full list of forest names.
    pub fn set_forests(mut self, forests: Vec<String>) -> Self {
        self.forest = Some(forests);
        self
    }

    pub fn forests(&self) -> &[String] {
        self.forest.as_deref().unwrap_or(&[])
    }

    pub fn set_security_database(mut self, db: &str) -> Self {
        self.security_database = Some(db.to_string());
        self
    }

    pub fn security_database(&self) -> Option<&str> {
        self.security_database.as_deref()
    }

    pub fn set_schema_database(mut self, db: &str) -> Self {
        self.schema_database = Some(db.to_string());
        self
    }

    pub fn schema_database(&self) -> Option<&str> {
        self.schema_database.as_deref()
    }

    pub fn set_triggers_database(mut self, db: &str) -> Self {
        self.triggers_database = Some(db.to_string());
        self
    }

    pub fn triggers_database(&self) -> Option<&str> {
        self.triggers_database.as_deref()
    }

    pub fn set_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// Set the default language. New databases default to `en`.
    pub fn set_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_stemmed_searches(mut self, which: StemmedSearches) -> Self {
        self.stemmed_searches = Some(which);
        self
    }

    pub fn stemmed_searches(&self) -> Option<StemmedSearches> {
        self.stemmed_searches
    }

    pub fn set_word_searches(mut self, enabled: bool) -> Self {
        self.word_searches = Some(enabled);
        self
    }

    pub fn word_searches(&self) -> Option<bool> {
        self.word_searches
    }

    /// Index word positions for faster phrase and near searches.
    pub fn set_word_positions(mut self, enabled: bool) -> Self {
        self.word_positions = Some(enabled);
        self
    }

    pub fn word_positions(&self) -> Option<bool> {
        self.word_positions
    }

    pub fn set_fast_phrase_searches(mut self, enabled: bool) -> Self {
        self.fast_phrase_searches = Some(enabled);
        self
    }

    pub fn fast_phrase_searches(&self) -> Option<bool> {
        self.fast_phrase_searches
    }

    pub fn set_fast_reverse_searches(mut self, enabled: bool) -> Self {
        self.fast_reverse_searches = Some(enabled);
        self
    }

    pub fn fast_reverse_searches(&self) -> Option<bool> {
        self.fast_reverse_searches
    }

    /// Enable the triple index for semantic queries.
    pub fn set_triple_index(mut self, enabled: bool) -> Self {
        self.triple_index = Some(enabled);
        self
    }

    pub fn triple_index(&self) -> Option<bool> {
        self.triple_index
    }

    pub fn set_triple_positions(mut self, enabled: bool) -> Self {
        self.triple_positions = Some(enabled);
        self
    }

    pub fn triple_positions(&self) -> Option<bool> {
        self.triple_positions
    }

    pub fn set_fast_case_sensitive_searches(mut self, enabled: bool) -> Self {
        self.fast_case_sensitive_searches = Some(enabled);
        self
    }

    pub fn fast_case_sensitive_searches(&self) -> Option<bool> {
        self.fast_case_sensitive_searches
    }

    pub fn set_fast_diacritic_sensitive_searches(mut self, enabled: bool) -> Self {
        self.fast_diacritic_sensitive_searches = Some(enabled);
        self
    }

    pub fn fast_diacritic_sensitive_searches(&self) -> Option<bool> {
        self.fast_diacritic_sensitive_searches
    }

    pub fn set_fast_element_word_searches(mut self, enabled: bool) -> Self {
        self.fast_element_word_searches = Some(enabled);
        self
    }

    pub fn fast_element_word_searches(&self) -> Option<bool> {
        self.fast_element_word_searches
    }

    pub fn set_element_word_positions(mut self, enabled: bool) -> Self {
        self.element_word_positions = Some(enabled);
        self
    }

    pub fn element_word_positions(&self) -> Option<bool> {
        self.element_word_positions
    }

    pub fn set_fast_element_phrase_searches(mut self, enabled: bool) -> Self {
        self.fast_element_phrase_searches = Some(enabled);
        self
    }

    pub fn fast_element_phrase_searches(&self) -> Option<bool> {
        self.fast_element_phrase_searches
    }

    pub fn set_element_value_positions(mut self, enabled: bool) -> Self {
        self.element_value_positions = Some(enabled);
        self
    }

    pub fn element_value_positions(&self) -> Option<bool> {
        self.element_value_positions
    }

    pub fn set_attribute_value_positions(mut self, enabled: bool) -> Self {
        self.attribute_value_positions = Some(enabled);
        self
    }

    pub fn attribute_value_positions(&self) -> Option<bool> {
        self.attribute_value_positions
    }

    pub fn set_field_value_searches(mut self, enabled: bool) -> Self {
        self.field_value_searches = Some(enabled);
        self
    }

    pub fn field_value_searches(&self) -> Option<bool> {
        self.field_value_searches
    }

    pub fn set_field_value_positions(mut self, enabled: bool) -> Self {
        self.field_value_positions = Some(enabled);
        self
    }

    pub fn field_value_positions(&self) -> Option<bool> {
        self.field_value_positions
    }

    /// Enable wildcard searches using three or more characters.
    pub fn set_three_character_searches(mut self, enabled: bool) -> Self {
        self.three_character_searches = Some(enabled);
        self
    }

    pub fn three_character_searches(&self) -> Option<bool> {
        self.three_character_searches
    }

    pub fn set_three_character_word_positions(mut self, enabled: bool) -> Self {
        self.three_character_word_positions = Some(enabled);
        self
    }

    pub fn three_character_word_positions(&self) -> Option<bool> {
        self.three_character_word_positions
    }

    pub fn set_fast_element_character_searches(mut self, enabled: bool) -> Self {
        self.fast_element_character_searches = Some(enabled);
        self
    }

    pub fn fast_element_character_searches(&self) -> Option<bool> {
        self.fast_element_character_searches
    }

    pub fn set_trailing_wildcard_searches(mut self, enabled: bool) -> Self {
        self.trailing_wildcard_searches = Some(enabled);
        self
    }

    pub fn trailing_wildcard_searches(&self) -> Option<bool> {
        self.trailing_wildcard_searches
    }

    pub fn set_trailing_wildcard_word_positions(mut self, enabled: bool) -> Self {
        self.trailing_wildcard_word_positions = Some(enabled);
        self
    }

    pub fn trailing_wildcard_word_positions(&self) -> Option<bool> {
        self.trailing_wildcard_word_positions
    }

    pub fn set_fast_element_trailing_wildcard_searches(mut self, enabled: bool) -> Self {
        self.fast_element_trailing_wildcard_searches = Some(enabled);
        self
    }

    pub fn fast_element_trailing_wildcard_searches(&self) -> Option<bool> {
        self.fast_element_trailing_wildcard_searches
    }

    pub fn set_two_character_searches(mut self, enabled: bool) -> Self {
        self.two_character_searches = Some(enabled);
        self
    }

    pub fn two_character_searches(&self) -> Option<bool> {
        self.two_character_searches
    }

    pub fn set_one_character_searches(mut self, enabled: bool) -> Self {
        self.one_character_searches = Some(enabled);
        self
    }

    pub fn one_character_searches(&self) -> Option<bool> {
        self.one_character_searches
    }

    /// Maintain a lexicon of document URIs.
    pub fn set_uri_lexicon(mut self, enabled: bool) -> Self {
        self.uri_lexicon = Some(enabled);
        self
    }

    pub fn uri_lexicon(&self) -> Option<bool> {
        self.uri_lexicon
    }

    /// Maintain a lexicon of collection URIs.
    pub fn set_collection_lexicon(mut self, enabled: bool) -> Self {
        self.collection_lexicon = Some(enabled);
        self
    }

    pub fn collection_lexicon(&self) -> Option<bool> {
        self.collection_lexicon
    }

    pub fn set_reindexer_enable(mut self, enabled: bool) -> Self {
        self.reindexer_enable = Some(enabled);
        self
    }

    pub fn reindexer_enable(&self) -> Option<bool> {
        self.reindexer_enable
    }

    /// Set the level of system resources allocated to reindexing, from 1
    /// to 5. An out-of-range value is rejected and the configuration is
    /// left unchanged.
    pub fn set_reindexer_throttle(&mut self, limit: u32) -> Result<&mut Self, MgmtError> {
        validate_range(limit, 1, 5, "reindexer throttle")?;
        self.reindexer_throttle = Some(limit);
        Ok(self)
    }

    pub fn reindexer_throttle(&self) -> Option<u32> {
        self.reindexer_throttle
    }

    /// Timestamp above which document fragments are re-indexed, in
    /// milliseconds.
    pub fn set_reindexer_timestamp(mut self, timestamp: u64) -> Self {
        self.reindexer_timestamp = Some(timestamp);
        self
    }

    pub fn reindexer_timestamp(&self) -> Option<u64> {
        self.reindexer_timestamp
    }

    pub fn set_directory_creation(mut self, which: DirectoryCreation) -> Self {
        self.directory_creation = Some(which);
        self
    }

    pub fn directory_creation(&self) -> Option<DirectoryCreation> {
        self.directory_creation
    }

    pub fn set_maintain_last_modified(mut self, enabled: bool) -> Self {
        self.maintain_last_modified = Some(enabled);
        self
    }

    pub fn maintain_last_modified(&self) -> Option<bool> {
        self.maintain_last_modified
    }

    pub fn set_maintain_directory_last_modified(mut self, enabled: bool) -> Self {
        self.maintain_directory_last_modified = Some(enabled);
        self
    }

    pub fn maintain_directory_last_modified(&self) -> Option<bool> {
        self.maintain_directory_last_modified
    }

    pub fn set_inherit_permissions(mut self, enabled: bool) -> Self {
        self.inherit_permissions = Some(enabled);
        self
    }

    pub fn inherit_permissions(&self) -> Option<bool> {
        self.inherit_permissions
    }

    pub fn set_inherit_collections(mut self, enabled: bool) -> Self {
        self.inherit_collections = Some(enabled);
        self
    }

    pub fn inherit_collections(&self) -> Option<bool> {
        self.inherit_collections
    }

    pub fn set_inherit_quality(mut self, enabled: bool) -> Self {
        self.inherit_quality = Some(enabled);
        self
    }

    pub fn inherit_quality(&self) -> Option<bool> {
        self.inherit_quality
    }

    /// Maximum number of fragments in an in-memory stand.
    pub fn set_in_memory_limit(mut self, limit: u64) -> Self {
        self.in_memory_limit = Some(limit);
        self
    }

    pub fn in_memory_limit(&self) -> Option<u64> {
        self.in_memory_limit
    }

    /// Size of the in-memory list storage, in megabytes.
    pub fn set_in_memory_list_size(mut self, size: u64) -> Self {
        self.in_memory_list_size = Some(size);
        self
    }

    pub fn in_memory_list_size(&self) -> Option<u64> {
        self.in_memory_list_size
    }

    /// Size of the in-memory tree storage, in megabytes.
    pub fn set_in_memory_tree_size(mut self, size: u64) -> Self {
        self.in_memory_tree_size = Some(size);
        self
    }

    pub fn in_memory_tree_size(&self) -> Option<u64> {
        self.in_memory_tree_size
    }

    /// Size of the in-memory range index storage, in megabytes.
    pub fn set_in_memory_range_index_size(mut self, size: u64) -> Self {
        self.in_memory_range_index_size = Some(size);
        self
    }

    pub fn in_memory_range_index_size(&self) -> Option<u64> {
        self.in_memory_range_index_size
    }

    /// Size of the in-memory reverse index storage, in megabytes.
    pub fn set_in_memory_reverse_index_size(mut self, size: u64) -> Self {
        self.in_memory_reverse_index_size = Some(size);
        self
    }

    pub fn in_memory_reverse_index_size(&self) -> Option<u64> {
        self.in_memory_reverse_index_size
    }

    /// Size of the in-memory triple index storage, in megabytes.
    pub fn set_in_memory_triple_index_size(mut self, size: u64) -> Self {
        self.in_memory_triple_index_size = Some(size);
        self
    }

    pub fn in_memory_triple_index_size(&self) -> Option<u64> {
        self.in_memory_triple_index_size
    }

    /// Size threshold for large objects, in kilobytes.
    pub fn set_large_size_threshold(mut self, threshold: u64) -> Self {
        self.large_size_threshold = Some(threshold);
        self
    }

    pub fn large_size_threshold(&self) -> Option<u64> {
        self.large_size_threshold
    }

    /// How robust transaction locking should be.
    pub fn set_locking(mut self, which: Locking) -> Self {
        self.locking = Some(which);
        self
    }

    pub fn locking(&self) -> Option<Locking> {
        self.locking
    }

    /// How robust transaction journaling should be. Shares the
    /// [`Locking`] option set.
    pub fn set_journaling(mut self, which: Locking) -> Self {
        self.journaling = Some(which);
        self
    }

    pub fn journaling(&self) -> Option<Locking> {
        self.journaling
    }

    /// Size of each journal file, in megabytes.
    pub fn set_journal_size(mut self, size: u64) -> Self {
        self.journal_size = Some(size);
        self
    }

    pub fn journal_size(&self) -> Option<u64> {
        self.journal_size
    }

    pub fn set_journal_count(mut self, count: u32) -> Self {
        self.journal_count = Some(count);
        self
    }

    pub fn journal_count(&self) -> Option<u32> {
        self.journal_count
    }

    pub fn set_preallocate_journals(mut self, enabled: bool) -> Self {
        self.preallocate_journals = Some(enabled);
        self
    }

    pub fn preallocate_journals(&self) -> Option<bool> {
        self.preallocate_journals
    }

    pub fn set_preload_mapped_data(mut self, enabled: bool) -> Self {
        self.preload_mapped_data = Some(enabled);
        self
    }

    pub fn preload_mapped_data(&self) -> Option<bool> {
        self.preload_mapped_data
    }

    pub fn set_preload_replica_mapped_data(mut self, enabled: bool) -> Self {
        self.preload_replica_mapped_data = Some(enabled);
        self
    }

    pub fn preload_replica_mapped_data(&self) -> Option<bool> {
        self.preload_replica_mapped_data
    }

    pub fn set_range_index_optimize(mut self, which: RangeIndexOptimize) -> Self {
        self.range_index_optimize = Some(which);
        self
    }

    pub fn range_index_optimize(&self) -> Option<RangeIndexOptimize> {
        self.range_index_optimize
    }

    /// Maximum size of a positions-containing list, in megabytes. Longer
    /// lists have positions discarded.
    pub fn set_positions_list_max_size(mut self, size: u64) -> Self {
        self.positions_list_max_size = Some(size);
        self
    }

    pub fn positions_list_max_size(&self) -> Option<u64> {
        self.positions_list_max_size
    }

    pub fn set_format_compatibility(mut self, which: FormatCompatibility) -> Self {
        self.format_compatibility = Some(which);
        self
    }

    pub fn format_compatibility(&self) -> Option<FormatCompatibility> {
        self.format_compatibility
    }

    pub fn set_index_detection(mut self, which: IndexDetection) -> Self {
        self.index_detection = Some(which);
        self
    }

    pub fn index_detection(&self) -> Option<IndexDetection> {
        self.index_detection
    }

    pub fn set_expunge_locks(mut self, which: ExpungeLocks) -> Self {
        self.expunge_locks = Some(which);
        self
    }

    pub fn expunge_locks(&self) -> Option<ExpungeLocks> {
        self.expunge_locks
    }

    pub fn set_tf_normalization(mut self, which: TfNormalization) -> Self {
        self.tf_normalization = Some(which);
        self
    }

    pub fn tf_normalization(&self) -> Option<TfNormalization> {
        self.tf_normalization
    }

    pub fn set_merge_priority(mut self, which: MergePriority) -> Self {
        self.merge_priority = Some(which);
        self
    }

    pub fn merge_priority(&self) -> Option<MergePriority> {
        self.merge_priority
    }

    /// Maximum allowable size for merges in megabytes, or 0 for no limit.
    pub fn set_merge_max_size(mut self, size: u64) -> Self {
        self.merge_max_size = Some(size);
        self
    }

    pub fn merge_max_size(&self) -> Option<u64> {
        self.merge_max_size
    }

    /// Stands with fewer than this number of fragments are merged
    /// together.
    pub fn set_merge_min_size(mut self, size: u64) -> Self {
        self.merge_min_size = Some(size);
        self
    }

    pub fn merge_min_size(&self) -> Option<u64> {
        self.merge_min_size
    }

    /// Larger ratios trigger more merges.
    pub fn set_merge_min_ratio(mut self, ratio: u64) -> Self {
        self.merge_min_ratio = Some(ratio);
        self
    }

    pub fn merge_min_ratio(&self) -> Option<u64> {
        self.merge_min_ratio
    }

    /// Minimum timestamp for merging.
    pub fn set_merge_timestamp(mut self, timestamp: i64) -> Self {
        self.merge_timestamp = Some(timestamp);
        self
    }

    pub fn merge_timestamp(&self) -> Option<i64> {
        self.merge_timestamp
    }

    pub fn set_retain_until_backup(mut self, enabled: bool) -> Self {
        self.retain_until_backup = Some(enabled);
        self
    }

    pub fn retain_until_backup(&self) -> Option<bool> {
        self.retain_until_backup
    }

    pub fn set_rebalancer_enable(mut self, enabled: bool) -> Self {
        self.rebalancer_enable = Some(enabled);
        self
    }

    pub fn rebalancer_enable(&self) -> Option<bool> {
        self.rebalancer_enable
    }

    /// Set the level of system resources allocated to rebalancing, from 1
    /// to 5. An out-of-range value is rejected and the configuration is
    /// left unchanged.
    pub fn set_rebalancer_throttle(&mut self, limit: u32) -> Result<&mut Self, MgmtError> {
        validate_range(limit, 1, 5, "rebalancer throttle")?;
        self.rebalancer_throttle = Some(limit);
        Ok(self)
    }

    pub fn rebalancer_throttle(&self) -> Option<u32> {
        self.rebalancer_throttle
    }

    /// Policy to use for forest assignment and rebalancing.
    pub fn set_assignment_policy(mut self, which: AssignmentPolicy) -> Self {
        self.assignment_policy = Some(AssignmentPolicyConfig {
            assignment_policy_name: which,
        });
        self
    }

    pub fn assignment_policy(&self) -> Option<AssignmentPolicy> {
        self.assignment_policy
            .as_ref()
            .map(|p| p.assignment_policy_name)
    }

    /// Add a path namespace for use by field paths.
    pub fn add_path_namespace(mut self, prefix: &str, namespace_uri: &str) -> Self {
        self.path_namespaces
            .get_or_insert_with(Vec::new)
            .push(PathNamespace {
                prefix: prefix.to_string(),
                namespace_uri: namespace_uri.to_string(),
            });
        self
    }

    pub fn path_namespaces(&self) -> &[PathNamespace] {
        self.path_namespaces.as_deref().unwrap_or(&[])
    }

    /// Add an index definition to the database configuration. The index
    /// isn't actually created on the server until the configuration is
    /// created or saved.
    ///
    /// Each index kind lands in its own configuration list.
    pub fn add_index(mut self, index: impl Into<RangeIndex>) -> Self {
        match index.into() {
            RangeIndex::Element(idx) => {
                self.range_element_index.get_or_insert_with(Vec::new).push(idx);
            }
            RangeIndex::ElementAttribute(idx) => {
                self.range_element_attribute_index
                    .get_or_insert_with(Vec::new)
                    .push(idx);
            }
            RangeIndex::Field(idx) => {
                self.range_field_index.get_or_insert_with(Vec::new).push(idx);
            }
        }
        self
    }

    pub fn element_range_indexes(&self) -> &[ElementRangeIndex] {
        self.range_element_index.as_deref().unwrap_or(&[])
    }

    pub fn element_attribute_range_indexes(&self) -> &[ElementAttributeRangeIndex] {
        self.range_element_attribute_index.as_deref().unwrap_or(&[])
    }

    pub fn field_range_indexes(&self) -> &[FieldRangeIndex] {
        self.range_field_index.as_deref().unwrap_or(&[])
    }

    pub fn field_range_index(&self, index: usize) -> Option<&FieldRangeIndex> {
        self.field_range_indexes().get(index)
    }

    /// Add a field definition to the database configuration.
    pub fn add_field(mut self, field: Field) -> Self {
        self.field.get_or_insert_with(Vec::new).push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        self.field.as_deref().unwrap_or(&[])
    }

    pub fn get_field(&self, index: usize) -> Option<&Field> {
        self.fields().get(index)
    }

    /// Create this database on the server.
    ///
    /// Each forest listed in the configuration is created first, bound to
    /// the configured forest host if one was set. Creation aborts on the
    /// first failing step; forests already created are not rolled back.
    pub async fn create(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("creating database {}", self.database_name);
        for forest_name in self.forests() {
            let mut forest = Forest::new(forest_name);
            if let Some(host) = &self.forest_host {
                forest = forest.set_host(host);
            }
            forest.create(h).await?;
        }
        h.post_json(&h.manage_url("databases"), self, &[]).await?;
        Ok(self)
    }

    /// Write the local configuration to the server. The database must
    /// already exist remotely.
    pub async fn save(&self, h: &Handle) -> Result<&Self, MgmtError> {
        let url = h.manage_url(&format!("databases/{}/properties", self.database_name));
        h.put_json(&url, self, &[]).await?;
        Ok(self)
    }

    /// Delete this database and every forest listed in its configuration.
    /// Resources that no longer exist remotely are not errors.
    pub async fn remove(&self, h: &Handle) -> Result<&Self, MgmtError> {
        debug!("removing database {}", self.database_name);
        let url = h.manage_url(&format!("databases/{}", self.database_name));
        h.delete(&url).await?;
        for forest_name in self.forests() {
            let forest_url = h.manage_url(&format!("forests/{}?level=full", forest_name));
            h.delete(&forest_url).await?;
        }
        Ok(self)
    }

    /// Fetch a database's configuration from the server, or `None` if no
    /// database with that name exists. The returned configuration reflects
    /// remote truth, not any local state.
    pub async fn lookup(name: &str, h: &Handle) -> Result<Option<Database>, MgmtError> {
        let url = h.manage_url(&format!("databases/{}/properties", name));
        match h.get_json(&url).await? {
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
            None => Ok(None),
        }
    }

    /// Load a single file into this database as `uri`, optionally tagging
    /// it with collections.
    pub async fn load_file(
        &self,
        h: &Handle,
        path: impl AsRef<Path>,
        uri: &str,
        collections: &[String],
        content_type: &str,
    ) -> Result<&Self, MgmtError> {
        let data = tokio::fs::read(path.as_ref()).await?;
        let url = h.document_url(uri, &self.database_name, collections)?;
        h.put_bytes(&url, data, content_type).await?;
        Ok(self)
    }

    /// Load every file under `path` into this database. The document URI
    /// for each file is the prefix followed by the bare file name.
    pub async fn load_directory_files(
        &self,
        h: &Handle,
        path: impl AsRef<Path>,
        prefix: &str,
        collections: &[String],
        content_type: &str,
    ) -> Result<&Self, MgmtError> {
        for entry in walk_directory(path.as_ref())? {
            let uri = format!("{}{}", prefix, entry.name);
            self.load_file(h, &entry.path, &uri, collections, content_type)
                .await?;
        }
        Ok(self)
    }

    /// Load every file under `path` into this database, preserving the
    /// partial path between the directory root and the file. A file at
    /// `data/files/myfile.xml` loaded with root `data` and the default
    /// prefix `/` becomes `/files/myfile.xml`.
    pub async fn load_directory(
        &self,
        h: &Handle,
        path: impl AsRef<Path>,
        prefix: &str,
        collections: &[String],
        content_type: &str,
    ) -> Result<&Self, MgmtError> {
        for entry in walk_directory(path.as_ref())? {
            let uri = format!("{}{}", prefix, entry.relative);
            self.load_file(h, &entry.path, &uri, collections, content_type)
                .await?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FieldReference;
    use crate::types::ScalarType;
    use crate::MgmtErrorCode;

    #[test]
    fn new_database_defaults() {
        let db = Database::new("testdb");
        assert_eq!(db.database_name(), "testdb");
        assert_eq!(db.forests(), ["testdb-Forest-001"]);
        assert_eq!(db.security_database(), Some("Security"));
        assert_eq!(db.schema_database(), Some("Schemas"));
        assert_eq!(db.enabled(), Some(true));
        assert_eq!(db.language(), Some("en"));
        assert!(db.triggers_database().is_none());
    }

    #[test]
    fn serialized_defaults_use_wire_keys() {
        let db = Database::new("testdb");
        let v = serde_json::to_value(&db).unwrap();
        assert_eq!(v["database-name"], "testdb");
        assert_eq!(v["forest"][0], "testdb-Forest-001");
        assert_eq!(v["security-database"], "Security");
        assert_eq!(v["schema-database"], "Schemas");
        assert_eq!(v["enabled"], true);
        // unset options are omitted entirely
        assert!(v.get("word-searches").is_none());
        assert!(v.get("locking").is_none());
    }

    #[test]
    fn add_forest_appends() {
        let db = Database::new("testdb").add_forest("testdb-Forest-002");
        assert_eq!(db.forests().len(), 2);
        assert_eq!(db.forests()[1], "testdb-Forest-002");
    }

    #[test]
    fn throttle_out_of_range_leaves_state_unchanged() {
        let mut db = Database::new("testdb");
        db.set_reindexer_throttle(4).unwrap();
        let err = db.set_reindexer_throttle(9).unwrap_err();
        assert_eq!(err.code, MgmtErrorCode::InvalidValue);
        assert_eq!(db.reindexer_throttle(), Some(4));

        let err = db.set_rebalancer_throttle(0).unwrap_err();
        assert_eq!(err.code, MgmtErrorCode::InvalidValue);
        assert_eq!(db.rebalancer_throttle(), None);
    }

    #[test]
    fn add_index_dispatches_by_kind() {
        let db = Database::new("foo")
            .add_index(ElementRangeIndex::new("order-id", ScalarType::Int))
            .add_index(ElementAttributeRangeIndex::new(
                "customer",
                "id",
                ScalarType::Int,
            ))
            .add_index(FieldRangeIndex::new("invoice-id", ScalarType::Int));

        assert_eq!(db.element_range_indexes().len(), 1);
        assert_eq!(db.element_attribute_range_indexes().len(), 1);
        assert_eq!(db.field_range_indexes().len(), 1);

        let v = serde_json::to_value(&db).unwrap();
        assert_eq!(v["range-element-index"][0]["localname"], "order-id");
        assert_eq!(v["range-element-attribute-index"][0]["parent-localname"], "customer");
        assert_eq!(v["range-field-index"][0]["field-name"], "invoice-id");
    }

    #[test]
    fn field_range_index_accessor_round_trip() {
        let db = Database::new("foo")
            .add_field(Field::new("invoice-id"))
            .add_index(FieldRangeIndex::new("invoice-id", ScalarType::Int));

        let index = db.field_range_index(0).unwrap();
        assert_eq!(index.name(), "invoice-id");
        assert_eq!(index.scalar_type(), ScalarType::Int);
        assert_eq!(db.field_range_indexes().len(), 1);
        assert!(db.field_range_index(1).is_none());
    }

    #[test]
    fn fields_with_references() {
        let db = Database::new("testdb").add_field(
            Field::new("invoice-id")
                .add_path("bill:invoice-id", 1.0)
                .include(FieldReference::new("http://foo.bar.com/invoice", "id")),
        );
        let field = db.get_field(0).unwrap();
        assert_eq!(field.name(), "invoice-id");
        assert_eq!(field.paths()[0].path, "bill:invoice-id");
        assert_eq!(field.includes().len(), 1);
    }

    #[test]
    fn path_namespaces_append() {
        let db = Database::new("testdb").add_path_namespace("inv", "http://foo.bar.com/invoice");
        assert_eq!(db.path_namespaces().len(), 1);
        assert_eq!(db.path_namespaces()[0].prefix, "inv");
        assert_eq!(db.path_namespaces()[0].namespace_uri, "http://foo.bar.com/invoice");
    }

    #[test]
    fn assignment_policy_is_wrapped() {
        let db = Database::new("testdb").set_assignment_policy(AssignmentPolicy::Statistical);
        assert_eq!(db.assignment_policy(), Some(AssignmentPolicy::Statistical));
        let v = serde_json::to_value(&db).unwrap();
        assert_eq!(
            v["assignment-policy"]["assignment-policy-name"],
            "statistical"
        );
    }

    #[test]
    fn lookup_json_replaces_state_wholesale() {
        let v = serde_json::json!({
            "database-name": "remote-db",
            "forest": ["remote-db-Forest-001"],
            "enabled": false,
            "locking": "strict",
            "stemmed-searches": "decompounding",
            "range-field-index": [
                {"scalar-type": "int", "field-name": "invoice-id",
                 "collation": "", "range-value-positions": false,
                 "invalid-values": "reject"}
            ],
            "unknown-server-field": {"nested": true}
        });
        let db: Database = serde_json::from_value(v).unwrap();
        assert_eq!(db.database_name(), "remote-db");
        assert_eq!(db.enabled(), Some(false));
        assert_eq!(db.locking(), Some(Locking::Strict));
        assert_eq!(db.stemmed_searches(), Some(StemmedSearches::Decompounding));
        assert_eq!(db.field_range_index(0).unwrap().name(), "invoice-id");
    }
}
