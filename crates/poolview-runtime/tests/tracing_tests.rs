#![forbid(unsafe_code)]

//! Structured log events emitted by the runtime.
//!
//!   cargo test -p poolview-runtime --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use poolview_core::{EntryId, HistoryEntry, ListConfig};
use poolview_runtime::HistoryList;

use tracing_subscriber::layer::SubscriberExt;

const MS: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct CapturedEvent {
    target: String,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            target: event.metadata().target().to_string(),
            message,
            fields,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

fn clips(n: u64) -> Vec<HistoryEntry> {
    (0..n)
        .map(|i| HistoryEntry::new(i, format!("clip {i}")))
        .collect()
}

#[test]
fn scroll_release_is_logged_with_entry() {
    let events = with_captured(|| {
        let base = Instant::now();
        let mut list = HistoryList::new(ListConfig::default()).unwrap();
        list.set_entries(&clips(25), base);
        list.select(EntryId::new(22), base);
        list.tick(base + 250 * MS);
    });

    let release = events
        .iter()
        .find(|e| e.target == "poolview.selection" && e.message == "scroll_release")
        .expect("scroll_release event");
    assert_eq!(release.fields.get("id").map(String::as_str), Some("entry:22"));

    assert!(events.iter().any(|e| e.target == "poolview.selection"
        && e.message == "expanded collapsed group for selection"
        && e.fields.get("group").map(String::as_str) == Some("1")));
}

#[test]
fn resize_apply_reports_coalesced_count() {
    let events = with_captured(|| {
        let base = Instant::now();
        let mut list = HistoryList::new(ListConfig::default()).unwrap();
        list.set_entries(&clips(25), base);
        list.measure_content_height(240.0);
        list.toggle_group(0, base + 50 * MS);
        list.tick(base + 300 * MS);
    });

    let apply = events
        .iter()
        .find(|e| e.target == "poolview.resize" && e.message == "resize_apply")
        .expect("resize_apply event");
    assert_eq!(apply.fields.get("coalesced").map(String::as_str), Some("2"));
    assert_eq!(apply.fields.get("forced").map(String::as_str), Some("false"));
}

#[test]
fn dismiss_logs_what_it_cancelled() {
    let events = with_captured(|| {
        let base = Instant::now();
        let mut list = HistoryList::new(ListConfig::default()).unwrap();
        list.set_entries(&clips(25), base);
        list.select(EntryId::new(22), base);
        list.dismiss();
    });

    let dismissed = events
        .iter()
        .find(|e| e.target == "poolview.list" && e.message == "list dismissed")
        .expect("list dismissed event");
    assert_eq!(
        dismissed.fields.get("scroll_cancelled").map(String::as_str),
        Some("true")
    );
    assert_eq!(
        dismissed.fields.get("resize_cancelled").map(String::as_str),
        Some("true")
    );
}
