//! Follower counts from page state embedded for client-side hydration.
//!
//! The state blob is located either as a `<script>` element with a known id or
//! as an inline `window['SIGI_STATE'] = {...};` assignment, parsed as JSON and
//! searched depth-first for a follower-like field.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Number, Value};

use super::number::{number_from_f64, to_number};

/// Script ids known to carry hydration state.
const STATE_SCRIPT_IDS: &[&str] = &["SIGI_STATE", "__UNIVERSAL_DATA_FOR_REHYDRATION__"];

/// Numeric strings under unrelated keys must reach this to count.
const MIN_UNKEYED_COUNT: u64 = 10;

static FOLLOWER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(followers?|follower_count|followerCount|follow_count|fan_count|fans|likes|subscribers|subscriber_count)",
    )
    .expect("invalid follower key pattern")
});

static INLINE_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)window\[['"]SIGI_STATE['"]\]\s*=\s*(\{.*?\});"#).expect("invalid inline state pattern")
});

static STATE_SCRIPTS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    STATE_SCRIPT_IDS
        .iter()
        .map(|id| Selector::parse(&format!(r#"script[id="{id}"]"#)).expect("invalid selector"))
        .collect()
});

/// Shape of a node as seen by the follower search.
pub enum NodeView<'a, N> {
    /// Keyed children in document order. Arrays use their indices as keys.
    Container(Vec<(Cow<'a, str>, N)>),
    Text(Cow<'a, str>),
    Number(Number),
    Null,
    Other,
}

/// A node of a possibly cyclic key-value graph.
///
/// `identity` must be equal for two handles to the same node and distinct
/// otherwise; it is what the cycle guard remembers.
pub trait StateNode: Sized {
    fn identity(&self) -> usize;
    fn view(&self) -> NodeView<'_, Self>;
}

impl<'v> StateNode for &'v Value {
    fn identity(&self) -> usize {
        std::ptr::from_ref::<Value>(*self) as usize
    }

    fn view(&self) -> NodeView<'_, Self> {
        match *self {
            Value::Object(map) => {
                NodeView::Container(map.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)).collect())
            }
            Value::Array(items) => NodeView::Container(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Cow::Owned(i.to_string()), v))
                    .collect(),
            ),
            Value::String(s) => NodeView::Text(Cow::Borrowed(s.as_str())),
            Value::Number(n) => NodeView::Number(n.clone()),
            Value::Null => NodeView::Null,
            Value::Bool(_) => NodeView::Other,
        }
    }
}

/// Whether a key names something follower-like.
pub fn is_follower_key(key: &str) -> bool {
    FOLLOWER_KEY.is_match(key)
}

/// Search a state graph for the first qualifying follower count.
///
/// At each container, keys are scanned in order. A follower-like key whose
/// value coerces to a number wins immediately; a nested container is searched
/// before moving to the next key; a numeric string under any other key wins
/// only if it is at least 10. Containers already visited are skipped, so
/// self-referential graphs terminate.
pub fn find_follower_count<N: StateNode>(root: &N) -> Option<u64> {
    let mut seen = HashSet::new();
    search(root, &mut seen)
}

fn search<N: StateNode>(node: &N, seen: &mut HashSet<usize>) -> Option<u64> {
    let NodeView::Container(entries) = node.view() else {
        return None;
    };
    if !seen.insert(node.identity()) {
        return None;
    }

    for (key, child) in &entries {
        let keyed = is_follower_key(key);

        let found = match child.view() {
            NodeView::Null | NodeView::Other => None,
            NodeView::Container(_) => search(child, seen),
            NodeView::Number(n) if keyed => json_number(&n),
            NodeView::Number(_) => None,
            NodeView::Text(text) => to_number(&text).filter(|&n| keyed || n >= MIN_UNKEYED_COUNT),
        };

        if found.is_some() {
            return found;
        }
    }

    None
}

fn json_number(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| n.as_f64().and_then(number_from_f64))
}

/// Candidate state blobs in the order they should be tried.
fn state_blobs<'a>(document: &'a Html, html: &'a str) -> Vec<Cow<'a, str>> {
    let mut blobs = Vec::new();

    for selector in STATE_SCRIPTS.iter() {
        for script in document.select(selector) {
            let text: String = script.text().collect();
            if !text.trim().is_empty() {
                blobs.push(Cow::Owned(text));
            }
        }
    }

    if let Some(inline) = INLINE_STATE.captures(html).and_then(|c| c.get(1)) {
        blobs.push(Cow::Borrowed(inline.as_str()));
    }

    blobs
}

/// Try every embedded state blob; a blob that is not valid JSON is skipped.
pub fn extract(document: &Html, html: &str) -> Option<u64> {
    for blob in state_blobs(document, html) {
        let parsed: Value = match serde_json::from_str(blob.trim()) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("embedded state is not valid JSON: {e}");
                continue;
            }
        };

        if let Some(count) = find_follower_count(&&parsed) {
            return Some(count);
        }
    }

    None
}
