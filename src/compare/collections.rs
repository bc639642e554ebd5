//! Reconciliation of sequences and dictionaries.
//!
//! Ordered sequences are compared position by position. When collection
//! order is ignored, elements whose type has a matching spec are paired by
//! their key, and everything else is paired greedily with the first
//! unmatched element on the other side that probes equal. Dictionaries pair
//! entries by key: scalar keys through their canonical form, anything else by
//! probing.

use super::breadcrumb::Breadcrumb;
use super::render::render;
use super::walker::{Location, Walker};
use crate::comparers::key_form;
use crate::error::{CompareError, ComparisonErrorKind, Result};
use crate::inspect::{AccessError, Handle, Inspect, View};
use indexmap::IndexMap;
use std::collections::HashMap;

type Entry<'a> = (Handle<'a>, Handle<'a>);

/// Key of a collection element: `label` addresses it in breadcrumbs,
/// `form` decides which elements share a key.
struct MatchingKey {
    label: String,
    form: String,
}

/// Elements of both sides sharing one matching key.
struct KeyGroup<'k> {
    label: &'k str,
    left: Vec<usize>,
    right: Vec<usize>,
}

impl<'k> KeyGroup<'k> {
    fn new(label: &'k str) -> Self {
        Self {
            label,
            left: Vec::new(),
            right: Vec::new(),
        }
    }
}

/// Right-hand map keys: scalars by canonical form, everything else probed.
#[derive(Default)]
struct KeyIndex {
    by_form: HashMap<String, Vec<usize>>,
    opaque: Vec<usize>,
}

impl Walker<'_> {
    pub(super) fn compare_sequences(
        &mut self,
        left: &[Handle<'_>],
        right: &[Handle<'_>],
        at: Location<'_>,
    ) -> Result<()> {
        if self.config.ignore_collection_order {
            self.compare_unordered(left, right, at)
        } else {
            self.compare_ordered(left, right, at)
        }
    }

    fn compare_ordered(
        &mut self,
        left: &[Handle<'_>],
        right: &[Handle<'_>],
        at: Location<'_>,
    ) -> Result<()> {
        for i in 0..left.len().max(right.len()) {
            if self.sink.is_full() {
                break;
            }
            let crumb = at.crumb.index(i);
            let here = Location::at(&crumb);
            match (left.get(i), right.get(i)) {
                (Some(l), Some(r)) => self.compare_nodes(&**l, &**r, here)?,
                (l, r) => self.report_missing(l.map(|h| &**h), r.map(|h| &**h), here),
            }
        }
        Ok(())
    }

    fn compare_unordered(
        &mut self,
        left: &[Handle<'_>],
        right: &[Handle<'_>],
        at: Location<'_>,
    ) -> Result<()> {
        let left_keys = self.matching_keys(left, at.crumb)?;
        let right_keys = self.matching_keys(right, at.crumb)?;

        let mut groups: IndexMap<&str, KeyGroup<'_>> = IndexMap::new();
        for (i, key) in left_keys.iter().enumerate() {
            if let Some(key) = key {
                groups
                    .entry(key.form.as_str())
                    .or_insert_with(|| KeyGroup::new(&key.label))
                    .left
                    .push(i);
            }
        }
        for (j, key) in right_keys.iter().enumerate() {
            if let Some(key) = key {
                groups
                    .entry(key.form.as_str())
                    .or_insert_with(|| KeyGroup::new(&key.label))
                    .right
                    .push(j);
            }
        }

        for group in groups.values() {
            if self.sink.is_full() {
                return Ok(());
            }
            let crumb = at.crumb.key(group.label);
            if let ([i], [j]) = (group.left.as_slice(), group.right.as_slice()) {
                self.compare_nodes(&*left[*i], &*right[*j], Location::at(&crumb))?;
            } else {
                self.reconcile(left, right, &group.left, &group.right, at.crumb, Some(&crumb))?;
            }
        }

        let lrest: Vec<usize> = (0..left.len()).filter(|&i| left_keys[i].is_none()).collect();
        let rrest: Vec<usize> = (0..right.len()).filter(|&j| right_keys[j].is_none()).collect();
        self.reconcile(left, right, &lrest, &rrest, at.crumb, None)
    }

    /// Pair each left element with the first unmatched right element that
    /// probes equal, then report the leftovers.
    ///
    /// Leftovers are addressed by `group` when given, otherwise by their own
    /// index.
    fn reconcile(
        &mut self,
        left: &[Handle<'_>],
        right: &[Handle<'_>],
        lidx: &[usize],
        ridx: &[usize],
        parent: &Breadcrumb,
        group: Option<&Breadcrumb>,
    ) -> Result<()> {
        let mut right_taken = vec![false; ridx.len()];
        let mut left_unmatched = Vec::new();

        for &i in lidx {
            if self.sink.is_full() {
                return Ok(());
            }
            let crumb = parent.index(i);
            let mut matched = false;
            for (slot, &j) in ridx.iter().enumerate() {
                if right_taken[slot] {
                    continue;
                }
                if self.probe(&*left[i], &*right[j], &crumb)? {
                    right_taken[slot] = true;
                    matched = true;
                    break;
                }
            }
            if !matched {
                left_unmatched.push(i);
            }
        }

        for i in left_unmatched {
            let crumb = group.cloned().unwrap_or_else(|| parent.index(i));
            self.report_missing(Some(&*left[i]), None, Location::at(&crumb));
        }
        for (slot, &j) in ridx.iter().enumerate() {
            if right_taken[slot] {
                continue;
            }
            let crumb = group.cloned().unwrap_or_else(|| parent.index(j));
            self.report_missing(None, Some(&*right[j]), Location::at(&crumb));
        }
        Ok(())
    }

    fn matching_keys(
        &self,
        items: &[Handle<'_>],
        at: &Breadcrumb,
    ) -> Result<Vec<Option<MatchingKey>>> {
        if self.config.collection_matching_spec.is_empty() {
            return Ok(items.iter().map(|_| None).collect());
        }
        items.iter().map(|item| self.matching_key(&**item, at)).collect()
    }

    /// Key of an element whose type has a matching spec.
    ///
    /// A dynamic record lacking one of the key members has no key and is
    /// paired by content instead.
    fn matching_key(&self, node: &dyn Inspect, at: &Breadcrumb) -> Result<Option<MatchingKey>> {
        let composite = match node.view() {
            View::Proxy(inner) => return self.matching_key(&*inner, at),
            View::Null => return Ok(None),
            View::Object(composite) => Some(composite),
            _ => None,
        };

        let type_name = node.type_name();
        let Some(members) = self.config.matching_members(type_name) else {
            return Ok(None);
        };
        let Some(first) = members.first() else {
            return Err(CompareError::comparison(
                format!("at '{at}'"),
                ComparisonErrorKind::EmptyMatchingSpec {
                    type_name: type_name.to_string(),
                },
            ));
        };
        let Some(composite) = composite else {
            return Err(CompareError::unknown_matching_member(
                at.as_str(),
                type_name,
                first.as_str(),
            ));
        };

        let fixed = composite.fixed_shape();
        let available = composite.members();
        let mut labels = Vec::with_capacity(members.len());
        let mut forms = Vec::with_capacity(members.len());
        for member in members {
            if !available.iter().any(|info| info.name == member.as_str()) {
                if !fixed {
                    return Ok(None);
                }
                return Err(CompareError::unknown_matching_member(
                    at.as_str(),
                    type_name,
                    member.as_str(),
                ));
            }
            let value = match composite.member(member) {
                Ok(value) => value,
                Err(AccessError::NotFound) if !fixed => return Ok(None),
                Err(err) => {
                    return Err(CompareError::comparison(
                        format!("at '{at}'"),
                        ComparisonErrorKind::MatchingKeyUnavailable {
                            type_name: type_name.to_string(),
                            member: member.clone(),
                            reason: err.to_string(),
                        },
                    ));
                }
            };
            let label = render(&*value);
            let form = self.key_form(&*value).unwrap_or_else(|| label.clone());
            labels.push(format!("{member}:{label}"));
            forms.push(form);
        }
        Ok(Some(MatchingKey {
            label: labels.join(","),
            form: forms.join("\u{1f}"),
        }))
    }

    /// Canonical form of a scalar key, looking through proxies.
    fn key_form(&self, node: &dyn Inspect) -> Option<String> {
        match node.view() {
            View::Proxy(inner) => self.key_form(&*inner),
            view => key_form(&view, self.config),
        }
    }

    pub(super) fn compare_maps(
        &mut self,
        left: &[Entry<'_>],
        right: &[Entry<'_>],
        at: Location<'_>,
    ) -> Result<()> {
        let mut index = KeyIndex::default();
        for (j, (key, _)) in right.iter().enumerate() {
            match self.key_form(&**key) {
                Some(form) => index.by_form.entry(form).or_default().push(j),
                None => index.opaque.push(j),
            }
        }

        let mut right_taken = vec![false; right.len()];
        let mut left_unmatched = Vec::new();

        for (i, (lkey, lvalue)) in left.iter().enumerate() {
            if self.sink.is_full() {
                return Ok(());
            }
            let crumb = at.crumb.key(&render(&**lkey));
            let candidates = match self.key_form(&**lkey) {
                Some(form) => index.by_form.get(&form).map_or(&[][..], Vec::as_slice),
                None => index.opaque.as_slice(),
            };
            match self.find_key(&**lkey, candidates, right, &right_taken, &crumb)? {
                Some(j) => {
                    right_taken[j] = true;
                    self.compare_nodes(&**lvalue, &*right[j].1, Location::at(&crumb))?;
                }
                None => left_unmatched.push(i),
            }
        }

        for i in left_unmatched {
            let crumb = at.crumb.key(&render(&*left[i].0));
            self.report_missing(Some(&*left[i].1), None, Location::at(&crumb));
        }
        for (j, (rkey, rvalue)) in right.iter().enumerate() {
            if right_taken[j] {
                continue;
            }
            let crumb = at.crumb.key(&render(&**rkey));
            self.report_missing(None, Some(&**rvalue), Location::at(&crumb));
        }
        Ok(())
    }

    /// The first unmatched candidate whose key probes equal to `key`.
    fn find_key(
        &mut self,
        key: &dyn Inspect,
        candidates: &[usize],
        right: &[Entry<'_>],
        right_taken: &[bool],
        crumb: &Breadcrumb,
    ) -> Result<Option<usize>> {
        for &j in candidates {
            if !right_taken[j] && self.probe(key, &*right[j].0, crumb)? {
                return Ok(Some(j));
            }
        }
        Ok(None)
    }
}
