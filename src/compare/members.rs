//! Member selection for composite values.

use super::Breadcrumb;
use crate::config::ComparisonConfig;
use crate::inspect::{MemberInfo, MemberKind};
use indexmap::IndexSet;

/// Decides which members of a composite take part in a comparison.
///
/// Filters apply in order: visibility, required markers, ignored markers,
/// the include list, then the exclude list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MemberSelector<'c> {
    config: &'c ComparisonConfig,
}

impl<'c> MemberSelector<'c> {
    pub const fn new(config: &'c ComparisonConfig) -> Self {
        Self { config }
    }

    /// Whether `member` of a composite labelled `type_name` is compared.
    ///
    /// `path` is the breadcrumb of the member itself. `within_include` is set
    /// when an ancestor member was explicitly included, which includes
    /// everything beneath it.
    pub fn is_selected(
        &self,
        type_name: &str,
        member: &MemberInfo,
        path: &Breadcrumb,
        within_include: bool,
    ) -> bool {
        if member.is_private() {
            let allowed = match member.kind {
                MemberKind::Field => self.config.compare_private_fields,
                MemberKind::Property => self.config.compare_private_properties,
            };
            if !allowed {
                return false;
            }
        }

        let required = &self.config.required_attributes_to_compare;
        if !required.is_empty() && !required.iter().any(|m| member.has_marker(m)) {
            return false;
        }

        if self
            .config
            .attributes_to_ignore
            .iter()
            .any(|m| member.has_marker(m))
        {
            return false;
        }

        if !within_include
            && !self.config.members_to_include.is_empty()
            && !self.is_included(type_name, &member.name, path)
        {
            return false;
        }

        !matches_any(
            &self.config.members_to_exclude,
            type_name,
            &member.name,
            path,
        )
    }

    /// Whether the member matches an include entry explicitly.
    pub fn is_included(&self, type_name: &str, name: &str, path: &Breadcrumb) -> bool {
        matches_any(&self.config.members_to_include, type_name, name, path)
    }
}

fn matches_any(entries: &IndexSet<String>, type_name: &str, name: &str, path: &Breadcrumb) -> bool {
    if entries.is_empty() {
        return false;
    }
    let stripped = path.without_indices();
    entries
        .iter()
        .any(|entry| matches_entry(entry, type_name, name, path.as_str(), &stripped))
}

/// An entry matches a member by bare name, as `Type.Member`, as the full
/// breadcrumb, or as a dotted suffix of the breadcrumb with indices removed.
pub(crate) fn matches_entry(
    entry: &str,
    type_name: &str,
    name: &str,
    path: &str,
    stripped: &str,
) -> bool {
    if entry == name || entry == path || entry == stripped {
        return true;
    }
    if let Some(member) = entry
        .strip_prefix(type_name)
        .and_then(|rest| rest.strip_prefix('.'))
    {
        if member == name {
            return true;
        }
    }
    stripped
        .strip_suffix(entry)
        .is_some_and(|head| head.ends_with('.'))
}
