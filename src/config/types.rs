//! Configuration types for comparisons.

use super::defaults::{DEFAULT_MAX_DIFFERENCES, DEFAULT_MAX_STRUCT_DEPTH};
use crate::compare::Difference;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Difference callback
// ============================================================================

/// Sink invoked synchronously once per discovered difference.
#[derive(Clone)]
pub struct DifferenceCallback(Arc<dyn Fn(&Difference) + Send + Sync>);

impl DifferenceCallback {
    pub fn new(callback: impl Fn(&Difference) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn call(&self, difference: &Difference) {
        (self.0)(difference);
    }
}

impl fmt::Debug for DifferenceCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DifferenceCallback(..)")
    }
}

// ============================================================================
// Comparison configuration
// ============================================================================

/// Settings for one comparison.
///
/// A [`CompareLogic`](crate::CompareLogic) borrows its config for the whole
/// traversal, so it cannot change while a comparison runs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Stop after this many differences (at least 1)
    pub max_differences: usize,
    /// Match collection elements regardless of position
    pub ignore_collection_order: bool,
    /// Recurse into nested composites and collections
    pub compare_children: bool,
    /// Maximum nesting of tuples/records that is still compared
    pub max_struct_depth: usize,
    /// Only compare these members (`Name`, `Type.Name` or a dotted path)
    pub members_to_include: IndexSet<String>,
    /// Never compare (or read) these members
    pub members_to_exclude: IndexSet<String>,
    /// Skip members carrying any of these markers
    pub attributes_to_ignore: IndexSet<String>,
    /// When non-empty, only compare members carrying one of these markers
    pub required_attributes_to_compare: IndexSet<String>,
    pub compare_private_fields: bool,
    pub compare_private_properties: bool,
    /// Compare differently typed composites by shape
    pub ignore_object_types: bool,
    /// Element type label to the members that identify an element when
    /// collection order is ignored
    pub collection_matching_spec: IndexMap<String, Vec<String>>,
    /// Compare date-time offsets as instants instead of wall-clock times
    pub compare_date_time_offset_with_offsets: bool,
    /// Silently skip members whose getter fails
    pub skip_invalid_indexers: bool,
    /// Emit a debug event for every visited path
    pub show_breadcrumb: bool,
    pub case_sensitive: bool,
    pub ignore_string_leading_trailing_whitespace: bool,
    /// A missing value and an empty string are equal
    pub treat_string_empty_and_null_as_equal: bool,
    /// Absolute tolerance for float comparisons
    pub double_precision: f64,
    /// Absolute tolerance for decimal comparisons
    #[schemars(with = "String")]
    pub decimal_precision: Decimal,
    /// Tolerance for date and time comparisons, in milliseconds
    pub max_milliseconds_date_difference: i64,
    #[serde(skip)]
    pub difference_callback: Option<DifferenceCallback>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            max_differences: DEFAULT_MAX_DIFFERENCES,
            ignore_collection_order: false,
            compare_children: true,
            max_struct_depth: DEFAULT_MAX_STRUCT_DEPTH,
            members_to_include: IndexSet::new(),
            members_to_exclude: IndexSet::new(),
            attributes_to_ignore: IndexSet::new(),
            required_attributes_to_compare: IndexSet::new(),
            compare_private_fields: false,
            compare_private_properties: false,
            ignore_object_types: false,
            collection_matching_spec: IndexMap::new(),
            compare_date_time_offset_with_offsets: false,
            skip_invalid_indexers: false,
            show_breadcrumb: false,
            case_sensitive: true,
            ignore_string_leading_trailing_whitespace: false,
            treat_string_empty_and_null_as_equal: false,
            double_precision: 0.0,
            decimal_precision: Decimal::ZERO,
            max_milliseconds_date_difference: 0,
            difference_callback: None,
        }
    }
}

impl ComparisonConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ComparisonConfigBuilder {
        ComparisonConfigBuilder::default()
    }

    /// Restore every setting to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Matching members configured for an element type label.
    #[must_use]
    pub fn matching_members(&self, type_name: &str) -> Option<&[String]> {
        self.collection_matching_spec
            .get(type_name)
            .map(Vec::as_slice)
    }
}

// ============================================================================
// Builder for ComparisonConfig
// ============================================================================

/// Builder for constructing `ComparisonConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct ComparisonConfigBuilder {
    config: ComparisonConfig,
}

impl ComparisonConfigBuilder {
    /// Set the difference cap.
    pub const fn max_differences(mut self, max: usize) -> Self {
        self.config.max_differences = max;
        self
    }

    /// Collect every difference.
    pub const fn unlimited(mut self) -> Self {
        self.config.max_differences = usize::MAX;
        self
    }

    pub const fn ignore_collection_order(mut self, ignore: bool) -> Self {
        self.config.ignore_collection_order = ignore;
        self
    }

    pub const fn compare_children(mut self, compare: bool) -> Self {
        self.config.compare_children = compare;
        self
    }

    pub const fn max_struct_depth(mut self, depth: usize) -> Self {
        self.config.max_struct_depth = depth;
        self
    }

    /// Add a member to the include list.
    pub fn include(mut self, member: impl Into<String>) -> Self {
        self.config.members_to_include.insert(member.into());
        self
    }

    /// Add a member to the exclude list.
    pub fn exclude(mut self, member: impl Into<String>) -> Self {
        self.config.members_to_exclude.insert(member.into());
        self
    }

    pub fn ignore_attribute(mut self, marker: impl Into<String>) -> Self {
        self.config.attributes_to_ignore.insert(marker.into());
        self
    }

    pub fn require_attribute(mut self, marker: impl Into<String>) -> Self {
        self.config.required_attributes_to_compare.insert(marker.into());
        self
    }

    pub const fn compare_private_fields(mut self, compare: bool) -> Self {
        self.config.compare_private_fields = compare;
        self
    }

    pub const fn compare_private_properties(mut self, compare: bool) -> Self {
        self.config.compare_private_properties = compare;
        self
    }

    pub const fn ignore_object_types(mut self, ignore: bool) -> Self {
        self.config.ignore_object_types = ignore;
        self
    }

    /// Identify elements of `type_name` by the given members when order is
    /// ignored.
    pub fn match_collection_by<I, S>(mut self, type_name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.collection_matching_spec.insert(
            type_name.into(),
            members.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub const fn compare_date_time_offset_with_offsets(mut self, compare: bool) -> Self {
        self.config.compare_date_time_offset_with_offsets = compare;
        self
    }

    pub const fn skip_invalid_indexers(mut self, skip: bool) -> Self {
        self.config.skip_invalid_indexers = skip;
        self
    }

    pub const fn show_breadcrumb(mut self, show: bool) -> Self {
        self.config.show_breadcrumb = show;
        self
    }

    pub const fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.config.case_sensitive = sensitive;
        self
    }

    pub const fn ignore_string_leading_trailing_whitespace(mut self, ignore: bool) -> Self {
        self.config.ignore_string_leading_trailing_whitespace = ignore;
        self
    }

    pub const fn treat_string_empty_and_null_as_equal(mut self, treat: bool) -> Self {
        self.config.treat_string_empty_and_null_as_equal = treat;
        self
    }

    pub const fn double_precision(mut self, precision: f64) -> Self {
        self.config.double_precision = precision;
        self
    }

    pub const fn decimal_precision(mut self, precision: Decimal) -> Self {
        self.config.decimal_precision = precision;
        self
    }

    pub const fn max_milliseconds_date_difference(mut self, millis: i64) -> Self {
        self.config.max_milliseconds_date_difference = millis;
        self
    }

    /// Invoke `callback` for every difference as it is discovered.
    pub fn on_difference(mut self, callback: impl Fn(&Difference) + Send + Sync + 'static) -> Self {
        self.config.difference_callback = Some(DifferenceCallback::new(callback));
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ComparisonConfig {
        self.config
    }
}
