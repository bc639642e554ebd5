//! Plain-text renderings of values for difference records.

use super::breadcrumb::Breadcrumb;
use super::members::MemberSelector;
use crate::inspect::{Composite, Handle, Inspect, Temporal, View};
use chrono::TimeDelta;
use std::fmt::Write as _;

/// Rendering of an absent value.
pub const NULL: &str = "(null)";
/// Rendering of the side that has no counterpart.
pub const MISSING: &str = "(missing)";

/// Containers nested deeper than this render as their type label.
const MAX_DEPTH: usize = 2;
/// Sequences and maps show at most this many entries.
const MAX_ITEMS: usize = 10;

/// Render a value. Signs are preserved, strings are verbatim.
#[must_use]
pub fn render(node: &dyn Inspect) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0, None);
    out
}

/// Render an already resolved view.
#[must_use]
pub fn render_view(view: &View<'_>, type_name: &str) -> String {
    let mut out = String::new();
    write_view(&mut out, view, type_name, 0, None);
    out
}

/// Member selection honoured while rendering: members a comparison skips
/// are neither shown nor read.
#[derive(Clone, Copy)]
pub(crate) struct Selection<'s> {
    selector: MemberSelector<'s>,
    /// Path of the value being rendered
    crumb: &'s Breadcrumb,
    within_include: bool,
}

impl<'s> Selection<'s> {
    pub const fn new(
        selector: MemberSelector<'s>,
        crumb: &'s Breadcrumb,
        within_include: bool,
    ) -> Self {
        Self {
            selector,
            crumb,
            within_include,
        }
    }

    fn at<'b>(self, crumb: &'b Breadcrumb) -> Selection<'b>
    where
        's: 'b,
    {
        Selection::new(self.selector, crumb, self.within_include)
    }
}

/// Render a value showing only the members that `selection` admits.
pub(crate) fn render_selected(node: &dyn Inspect, selection: Selection<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0, Some(selection));
    out
}

/// [`render_selected`] for an already resolved view.
pub(crate) fn render_view_selected(
    view: &View<'_>,
    type_name: &str,
    selection: Selection<'_>,
) -> String {
    let mut out = String::new();
    write_view(&mut out, view, type_name, 0, Some(selection));
    out
}

fn write_node(out: &mut String, node: &dyn Inspect, depth: usize, sel: Option<Selection<'_>>) {
    let view = node.view();
    write_view(out, &view, node.type_name(), depth, sel);
}

fn write_view(
    out: &mut String,
    view: &View<'_>,
    type_name: &str,
    depth: usize,
    sel: Option<Selection<'_>>,
) {
    match view {
        View::Null => out.push_str(NULL),
        View::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        View::Int(i) => {
            let _ = write!(out, "{i}");
        }
        View::Float(f) => {
            let _ = write!(out, "{f}");
        }
        View::Decimal(d) => {
            let _ = write!(out, "{d}");
        }
        View::Char(c) => out.push(*c),
        View::Str(s) | View::Enum(s) => out.push_str(s),
        View::Temporal(t) => out.push_str(&format_temporal(t)),
        View::Unreadable(reason) => {
            let _ = write!(out, "(unreadable: {reason})");
        }
        View::Proxy(inner) => write_node(out, &**inner, depth, sel),
        _ if depth >= MAX_DEPTH => out.push_str(type_name),
        View::Tuple(items) => {
            out.push('(');
            write_items(out, items, depth, sel, |crumb, i| crumb.member(&i.to_string()));
            out.push(')');
        }
        View::Sequence(items) => {
            out.push('[');
            write_items(out, items, depth, sel, Breadcrumb::index);
            out.push(']');
        }
        View::Map(pairs) => {
            out.push('{');
            for (i, (key, value)) in pairs.iter().take(MAX_ITEMS).enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let rendered = render(&**key);
                out.push_str(&rendered);
                out.push_str(": ");
                let crumb;
                let nested = match sel {
                    Some(s) => {
                        crumb = s.crumb.key(&rendered);
                        Some(s.at(&crumb))
                    }
                    None => None,
                };
                write_node(out, &**value, depth + 1, nested);
            }
            if pairs.len() > MAX_ITEMS {
                out.push_str(", ...");
            }
            out.push('}');
        }
        View::Object(composite) => write_composite(out, *composite, type_name, depth, sel),
    }
}

fn write_composite(
    out: &mut String,
    composite: &dyn Composite,
    type_name: &str,
    depth: usize,
    sel: Option<Selection<'_>>,
) {
    let mut first = true;
    for info in &composite.members() {
        let crumb;
        let nested = match sel {
            Some(s) => {
                crumb = s.crumb.member(&info.name);
                if !s
                    .selector
                    .is_selected(type_name, info, &crumb, s.within_include)
                {
                    continue;
                }
                let within = s.within_include
                    || s.selector.is_included(type_name, &info.name, &crumb);
                Some(Selection::new(s.selector, &crumb, within))
            }
            None => None,
        };
        out.push_str(if first { "{ " } else { ", " });
        first = false;
        let _ = write!(out, "{} = ", info.name);
        match composite.member(&info.name) {
            Ok(value) => write_node(out, &*value, depth + 1, nested),
            Err(err) => {
                let _ = write!(out, "(unreadable: {err})");
            }
        }
    }
    if first {
        out.push_str(type_name);
    } else {
        out.push_str(" }");
    }
}

fn write_items(
    out: &mut String,
    items: &[Handle<'_>],
    depth: usize,
    sel: Option<Selection<'_>>,
    segment: impl Fn(&Breadcrumb, usize) -> Breadcrumb,
) {
    for (i, item) in items.iter().take(MAX_ITEMS).enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let crumb;
        let nested = match sel {
            Some(s) => {
                crumb = segment(s.crumb, i);
                Some(s.at(&crumb))
            }
            None => None,
        };
        write_node(out, &**item, depth + 1, nested);
    }
    if items.len() > MAX_ITEMS {
        out.push_str(", ...");
    }
}

fn format_temporal(value: &Temporal) -> String {
    match value {
        Temporal::Date(d) => d.format("%Y-%m-%d").to_string(),
        Temporal::Time(t) => t.format("%H:%M:%S%.f").to_string(),
        Temporal::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        Temporal::DateTimeOffset(dt) => dt.format("%Y-%m-%d %H:%M:%S%.f %:z").to_string(),
        Temporal::TimeSpan(span) => format_time_span(*span),
    }
}

/// `[-][d.]hh:mm:ss[.fffffff]`
fn format_time_span(span: TimeDelta) -> String {
    let negative = span < TimeDelta::zero();
    let magnitude = if negative { -span } else { span };

    let total = magnitude.num_seconds();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    let ticks = magnitude.subsec_nanos() / 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        let _ = write!(out, "{days}.");
    }
    let _ = write!(out, "{hours:02}:{minutes:02}:{seconds:02}");
    if ticks > 0 {
        let _ = write!(out, ".{ticks:07}");
    }
    out
}
