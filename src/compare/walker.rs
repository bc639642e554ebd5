//! Recursive traversal of two object graphs in lockstep.

use super::breadcrumb::Breadcrumb;
use super::classify::Category;
use super::guard::{CycleGuard, NodeKey};
use super::members::MemberSelector;
use super::render::{render_selected, render_view_selected, Selection, MISSING};
use super::result::Difference;
use crate::comparers::{ComparerRegistry, Discrepancy, Operand};
use crate::config::{ComparisonConfig, DifferenceCallback};
use crate::error::Result;
use crate::inspect::{AccessError, Composite, Handle, Inspect, MemberInfo, View};
use std::collections::HashSet;
use tracing::debug;

// ============================================================================
// Difference sink
// ============================================================================

/// Collects differences, enforces the cap and feeds the callback.
///
/// While a probe is running nothing is recorded: the first mismatch only
/// marks the probe as failed, which also stops the probe's traversal.
pub(crate) struct DifferenceSink<'c> {
    differences: Vec<Difference>,
    limit: usize,
    callback: Option<&'c DifferenceCallback>,
    probe_depth: usize,
    probe_hit: bool,
}

impl<'c> DifferenceSink<'c> {
    pub fn new(limit: usize, callback: Option<&'c DifferenceCallback>) -> Self {
        Self {
            differences: Vec::new(),
            limit,
            callback,
            probe_depth: 0,
            probe_hit: false,
        }
    }

    pub const fn probing(&self) -> bool {
        self.probe_depth > 0
    }

    /// Whether traversal at the current level should stop.
    pub fn is_full(&self) -> bool {
        if self.probing() {
            self.probe_hit
        } else {
            self.cap_reached()
        }
    }

    pub fn cap_reached(&self) -> bool {
        self.differences.len() >= self.limit
    }

    /// Record a difference. `build` runs only when the difference is kept.
    pub fn record(&mut self, build: impl FnOnce() -> Difference) {
        if self.probing() {
            self.probe_hit = true;
            return;
        }
        if self.cap_reached() {
            return;
        }
        let difference = build();
        if let Some(callback) = self.callback {
            callback.call(&difference);
        }
        self.differences.push(difference);
        if self.cap_reached() {
            debug!(limit = self.limit, "difference cap reached");
        }
    }

    fn begin_probe(&mut self) -> bool {
        let saved = self.probe_hit;
        self.probe_hit = false;
        self.probe_depth += 1;
        saved
    }

    fn end_probe(&mut self, saved: bool) -> bool {
        let hit = self.probe_hit;
        self.probe_hit = saved;
        self.probe_depth -= 1;
        hit
    }

    pub fn into_differences(self) -> Vec<Difference> {
        self.differences
    }
}

// ============================================================================
// Location of a compared pair
// ============================================================================

/// The composites or tuples holding a compared pair.
#[derive(Clone, Copy)]
pub(crate) struct Parents<'p> {
    pub left: &'p dyn Inspect,
    pub right: &'p dyn Inspect,
    /// Path of the parents themselves
    pub crumb: &'p Breadcrumb,
    /// An ancestor of the parents was explicitly included
    pub within_include: bool,
}

/// Where a pair sits in the graph.
#[derive(Clone, Copy)]
pub(crate) struct Location<'p> {
    pub crumb: &'p Breadcrumb,
    /// Member name when the pair is a member of a composite or tuple
    pub member: Option<&'p str>,
    pub parents: Option<Parents<'p>>,
}

impl<'p> Location<'p> {
    pub fn at(crumb: &'p Breadcrumb) -> Self {
        Self {
            crumb,
            member: None,
            parents: None,
        }
    }

    pub fn member(crumb: &'p Breadcrumb, name: &'p str, parents: Parents<'p>) -> Self {
        Self {
            crumb,
            member: Some(name),
            parents: Some(parents),
        }
    }
}

/// Rendered value and type label of one side of a difference.
type Side = (String, Option<String>);

fn side_of(node: Option<&dyn Inspect>, selection: Selection<'_>) -> Side {
    node.map_or_else(
        || (MISSING.to_string(), None),
        |node| {
            (
                render_selected(node, selection),
                Some(node.type_name().to_string()),
            )
        },
    )
}

fn side_of_operand(operand: &Operand<'_>, selection: Selection<'_>) -> Side {
    (
        render_view_selected(operand.view(), operand.type_name(), selection),
        Some(operand.type_name().to_string()),
    )
}

fn side_of_read(
    read: &std::result::Result<Handle<'_>, AccessError>,
    selection: Selection<'_>,
) -> Side {
    match read {
        Ok(value) => side_of(Some(&**value), selection),
        Err(AccessError::NotFound) => side_of(None, selection),
        Err(AccessError::Failed(reason)) => (format!("(unreadable: {reason})"), None),
    }
}

/// Parents render through `selector`, so skipped members are never read.
fn build(
    at: Location<'_>,
    left: Side,
    right: Side,
    message: Option<String>,
    selector: MemberSelector<'_>,
) -> Difference {
    let (parent_object1, parent_object2) = at
        .parents
        .map(|parents| {
            let selection = Selection::new(selector, parents.crumb, parents.within_include);
            (
                render_selected(parents.left, selection),
                render_selected(parents.right, selection),
            )
        })
        .unzip();
    Difference {
        property_name: at.crumb.to_string(),
        child_property_name: at.member.map(str::to_string),
        object1_value: left.0,
        object2_value: right.0,
        object1_type_name: left.1,
        object2_type_name: right.1,
        parent_object1,
        parent_object2,
        message,
    }
}

fn is_container(node: &dyn Inspect) -> bool {
    Category::of(&node.view()).is_container()
}

// ============================================================================
// Walker
// ============================================================================

/// State of one comparison.
pub(crate) struct Walker<'c> {
    pub(super) config: &'c ComparisonConfig,
    registry: &'c ComparerRegistry,
    selector: MemberSelector<'c>,
    guard: CycleGuard,
    pub(super) sink: DifferenceSink<'c>,
    struct_depth: usize,
    within_include: usize,
}

impl<'c> Walker<'c> {
    pub fn new(config: &'c ComparisonConfig, registry: &'c ComparerRegistry) -> Self {
        Self {
            config,
            registry,
            selector: MemberSelector::new(config),
            guard: CycleGuard::default(),
            sink: DifferenceSink::new(config.max_differences, config.difference_callback.as_ref()),
            struct_depth: 0,
            within_include: 0,
        }
    }

    /// Compare two roots and hand back the collected differences.
    pub fn run(mut self, left: &dyn Inspect, right: &dyn Inspect) -> Result<DifferenceSink<'c>> {
        let root = Breadcrumb::root();
        self.compare_nodes(left, right, Location::at(&root))?;
        debug_assert_eq!(self.guard.depth(), 0);
        Ok(self.sink)
    }

    /// Selection for rendering the value at `crumb`.
    fn selection<'a>(&self, crumb: &'a Breadcrumb) -> Selection<'a>
    where
        'c: 'a,
    {
        Selection::new(self.selector, crumb, self.within_include > 0)
    }

    pub(super) fn compare_nodes(
        &mut self,
        left: &dyn Inspect,
        right: &dyn Inspect,
        at: Location<'_>,
    ) -> Result<()> {
        if self.sink.is_full() {
            return Ok(());
        }
        if self.config.show_breadcrumb && !self.sink.probing() {
            debug!(
                path = %at.crumb,
                left = left.type_name(),
                right = right.type_name(),
                "comparing"
            );
        }
        let (lview, rview) = (left.view(), right.view());
        self.resolve(left, lview, right, rview, at)
    }

    /// Equality test that never reaches the result or the callback.
    pub(super) fn probe(
        &mut self,
        left: &dyn Inspect,
        right: &dyn Inspect,
        crumb: &Breadcrumb,
    ) -> Result<bool> {
        let saved = self.sink.begin_probe();
        let outcome = self.compare_nodes(left, right, Location::at(crumb));
        let hit = self.sink.end_probe(saved);
        outcome.map(|()| !hit)
    }

    fn resolve(
        &mut self,
        left: &dyn Inspect,
        lview: View<'_>,
        right: &dyn Inspect,
        rview: View<'_>,
        at: Location<'_>,
    ) -> Result<()> {
        match (lview, rview) {
            (View::Proxy(inner), rview) => {
                let view = inner.view();
                self.resolve(&*inner, view, right, rview, at)
            }
            (lview, View::Proxy(inner)) => {
                let view = inner.view();
                self.resolve(left, lview, &*inner, view, at)
            }
            (lview, rview) => {
                self.dispatch(Operand::new(left, lview), Operand::new(right, rview), at)
            }
        }
    }

    fn dispatch(&mut self, left: Operand<'_>, right: Operand<'_>, at: Location<'_>) -> Result<()> {
        let (lc, rc) = (left.category(), right.category());

        if lc == Category::Null || rc == Category::Null {
            if lc != rc && !self.null_matches_empty_text(&left, &right) {
                self.report(&left, &right, at, None);
            }
            return Ok(());
        }

        if lc == Category::Unreadable || rc == Category::Unreadable {
            self.compare_unreadable(&left, &right, at);
            return Ok(());
        }

        if let Some(found) = self.registry.try_compare(&left, &right, self.config) {
            for discrepancy in found {
                self.record_discrepancy(&left, &right, at, discrepancy);
            }
            return Ok(());
        }

        if lc.is_scalar() || rc.is_scalar() {
            if lc != rc {
                self.report(&left, &right, at, Some(format!("type mismatch: {lc} vs {rc}")));
            } else if left.render() != right.render() {
                self.report(&left, &right, at, None);
            }
            return Ok(());
        }

        match (left.view(), right.view()) {
            (View::Tuple(a), View::Tuple(b)) => self.compare_tuples(&left, a, &right, b, at),
            (View::Object(a), View::Object(b)) => {
                self.guarded(&left, &right, |w| w.compare_objects(&left, *a, &right, *b, at))
            }
            (View::Sequence(a), View::Sequence(b)) => {
                self.guarded(&left, &right, |w| w.compare_sequences(a, b, at))
            }
            (View::Map(a), View::Map(b)) => {
                self.guarded(&left, &right, |w| w.compare_maps(a, b, at))
            }
            _ => {
                self.report(&left, &right, at, Some(format!("type mismatch: {lc} vs {rc}")));
                Ok(())
            }
        }
    }

    /// Run `f` with the pair marked active. A pair that is already active
    /// closes a cycle and compares equal.
    fn guarded(
        &mut self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        f: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        let lkey = NodeKey::new(left.node().identity(), left.type_name());
        let rkey = NodeKey::new(right.node().identity(), right.type_name());
        if !self.guard.enter(lkey, rkey) {
            return Ok(());
        }
        let outcome = f(self);
        self.guard.exit(lkey, rkey);
        outcome
    }

    fn null_matches_empty_text(&self, left: &Operand<'_>, right: &Operand<'_>) -> bool {
        let empty = |operand: &Operand<'_>| matches!(operand.view(), View::Str(s) if s.is_empty());
        self.config.treat_string_empty_and_null_as_equal && (empty(left) || empty(right))
    }

    fn compare_unreadable(&mut self, left: &Operand<'_>, right: &Operand<'_>, at: Location<'_>) {
        match (left.view(), right.view()) {
            (View::Unreadable(a), View::Unreadable(b)) if a == b => {}
            (View::Unreadable(reason), _) | (_, View::Unreadable(reason))
                if self.config.skip_invalid_indexers =>
            {
                debug!(path = %at.crumb, "skipping unreadable value: {reason}");
            }
            _ => self.report(left, right, at, None),
        }
    }

    // ========================================================================
    // Composites
    // ========================================================================

    fn compare_objects(
        &mut self,
        left: &Operand<'_>,
        lobj: &dyn Composite,
        right: &Operand<'_>,
        robj: &dyn Composite,
        at: Location<'_>,
    ) -> Result<()> {
        if !self.config.ignore_object_types && left.type_name() != right.type_name() {
            let message = Some("object types differ".to_string());
            let selector = self.selector;
            self.sink.record(|| {
                build(
                    at,
                    (left.type_name().to_string(), Some(left.type_name().to_string())),
                    (right.type_name().to_string(), Some(right.type_name().to_string())),
                    message,
                    selector,
                )
            });
            return Ok(());
        }

        let lmembers = lobj.members();
        let rmembers = robj.members();
        let lnames: HashSet<&str> = lmembers.iter().map(|m| &*m.name).collect();
        let rnames: HashSet<&str> = rmembers.iter().map(|m| &*m.name).collect();

        let candidates = lmembers
            .iter()
            .map(|m| (m, true, rnames.contains(&*m.name)))
            .chain(
                rmembers
                    .iter()
                    .filter(|m| !lnames.contains(&*m.name))
                    .map(|m| (m, false, true)),
            );

        let parents = Parents {
            left: left.node(),
            right: right.node(),
            crumb: at.crumb,
            within_include: self.within_include > 0,
        };
        for (info, on_left, on_right) in candidates {
            if self.sink.is_full() {
                break;
            }
            let owner = if on_left {
                left.type_name()
            } else {
                right.type_name()
            };
            let crumb = at.crumb.member(&info.name);
            if !self
                .selector
                .is_selected(owner, info, &crumb, self.within_include > 0)
            {
                continue;
            }

            let included =
                self.within_include == 0 && self.selector.is_included(owner, &info.name, &crumb);
            let lread = if on_left {
                lobj.member(&info.name)
            } else {
                Err(AccessError::NotFound)
            };
            let rread = if on_right {
                robj.member(&info.name)
            } else {
                Err(AccessError::NotFound)
            };

            if included {
                self.within_include += 1;
            }
            let outcome = self.compare_member(
                &lread,
                &rread,
                info,
                Location::member(&crumb, &info.name, parents),
            );
            if included {
                self.within_include -= 1;
            }
            outcome?;
        }
        Ok(())
    }

    fn compare_member(
        &mut self,
        lread: &std::result::Result<Handle<'_>, AccessError>,
        rread: &std::result::Result<Handle<'_>, AccessError>,
        info: &MemberInfo,
        at: Location<'_>,
    ) -> Result<()> {
        match (lread, rread) {
            (Ok(l), Ok(r)) => {
                if !self.config.compare_children && (is_container(&**l) || is_container(&**r)) {
                    return Ok(());
                }
                self.compare_nodes(&**l, &**r, at)
            }
            (Err(AccessError::NotFound), Err(AccessError::NotFound)) => Ok(()),
            (Err(AccessError::Failed(a)), Err(AccessError::Failed(b))) if a == b => Ok(()),
            (Err(AccessError::Failed(reason)), _) | (_, Err(AccessError::Failed(reason)))
                if self.config.skip_invalid_indexers =>
            {
                let what = if info.indexer { "indexer" } else { "member" };
                debug!(path = %at.crumb, "skipping unreadable {what}: {reason}");
                Ok(())
            }
            _ => {
                let (selector, selection) = (self.selector, self.selection(at.crumb));
                self.sink.record(|| {
                    build(
                        at,
                        side_of_read(lread, selection),
                        side_of_read(rread, selection),
                        None,
                        selector,
                    )
                });
                Ok(())
            }
        }
    }

    // ========================================================================
    // Tuples
    // ========================================================================

    fn compare_tuples(
        &mut self,
        left: &Operand<'_>,
        litems: &[Handle<'_>],
        right: &Operand<'_>,
        ritems: &[Handle<'_>],
        at: Location<'_>,
    ) -> Result<()> {
        self.struct_depth += 1;
        let outcome = if self.struct_depth > self.config.max_struct_depth {
            debug!(
                path = %at.crumb,
                depth = self.struct_depth,
                "struct depth limit reached, not descending"
            );
            Ok(())
        } else {
            self.compare_tuple_items(left, litems, right, ritems, at)
        };
        self.struct_depth -= 1;
        outcome
    }

    fn compare_tuple_items(
        &mut self,
        left: &Operand<'_>,
        litems: &[Handle<'_>],
        right: &Operand<'_>,
        ritems: &[Handle<'_>],
        at: Location<'_>,
    ) -> Result<()> {
        let parents = Parents {
            left: left.node(),
            right: right.node(),
            crumb: at.crumb,
            within_include: self.within_include > 0,
        };
        for i in 0..litems.len().max(ritems.len()) {
            if self.sink.is_full() {
                break;
            }
            let name = i.to_string();
            let crumb = at.crumb.member(&name);
            let here = Location::member(&crumb, &name, parents);
            match (litems.get(i), ritems.get(i)) {
                (Some(l), Some(r)) => {
                    if !self.config.compare_children && (is_container(&**l) || is_container(&**r))
                    {
                        continue;
                    }
                    self.compare_nodes(&**l, &**r, here)?;
                }
                (l, r) => self.report_missing(l.map(|h| &**h), r.map(|h| &**h), here),
            }
        }
        Ok(())
    }

    // ========================================================================
    // Recording
    // ========================================================================

    pub(super) fn report(
        &mut self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        at: Location<'_>,
        message: Option<String>,
    ) {
        let (selector, selection) = (self.selector, self.selection(at.crumb));
        self.sink.record(|| {
            build(
                at,
                side_of_operand(left, selection),
                side_of_operand(right, selection),
                message,
                selector,
            )
        });
    }

    /// Record a value present on one side only.
    pub(super) fn report_missing(
        &mut self,
        left: Option<&dyn Inspect>,
        right: Option<&dyn Inspect>,
        at: Location<'_>,
    ) {
        let (selector, selection) = (self.selector, self.selection(at.crumb));
        self.sink.record(|| {
            build(
                at,
                side_of(left, selection),
                side_of(right, selection),
                None,
                selector,
            )
        });
    }

    fn record_discrepancy(
        &mut self,
        left: &Operand<'_>,
        right: &Operand<'_>,
        at: Location<'_>,
        discrepancy: Discrepancy,
    ) {
        let selector = self.selector;
        self.sink.record(|| {
            let crumb = discrepancy
                .child_member
                .as_deref()
                .map_or_else(|| at.crumb.clone(), |child| at.crumb.member(child));
            let mut difference = build(
                Location { crumb: &crumb, ..at },
                (discrepancy.left, Some(left.type_name().to_string())),
                (discrepancy.right, Some(right.type_name().to_string())),
                discrepancy.message,
                selector,
            );
            if discrepancy.child_member.is_some() {
                difference.child_property_name = discrepancy.child_member;
            }
            difference
        });
    }
}
