//! Helpers shared by the unit tests.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

pub(crate) fn request(method: Method, path: &str) -> Request {
    Request::new(method, path.to_owned(), HeaderMap::new(), Bytes::new())
}

pub(crate) fn get(path: &str) -> Request {
    request(Method::Get, path)
}

impl Request {
    pub(crate) fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
        self
    }
}

/// A handler answering `200 ok` that counts its calls.
pub(crate) fn spy() -> (BoxedHandler, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handler = move |_req: Request| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Response::text("ok")
        }
    };
    (handler.into_boxed_handler(), calls)
}

/// A handler answering `200 ok` that keeps the request it received.
pub(crate) fn recorder(seen: Arc<Mutex<Option<Request>>>) -> BoxedHandler {
    let handler = move |req: Request| {
        let seen = Arc::clone(&seen);
        async move {
            *seen.lock().unwrap() = Some(req);
            Response::text("ok")
        }
    };
    handler.into_boxed_handler()
}

/// One recorded `tracing` event.
#[derive(Clone, Debug)]
pub(crate) struct Captured {
    level: Level,
    fields: BTreeMap<&'static str, String>,
}

impl Captured {
    pub(crate) fn level(&self) -> Level { self.level }

    pub(crate) fn message(&self) -> &str {
        self.field("message").unwrap_or_default()
    }

    pub(crate) fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Events recorded by the subscriber installed with [`capture`].
#[derive(Clone, Default)]
pub(crate) struct Logs(Arc<Mutex<Vec<Captured>>>);

impl Logs {
    pub(crate) fn at(&self, level: Level) -> Vec<Captured> {
        self.0.lock().unwrap().iter().filter(|e| e.level == level).cloned().collect()
    }

    pub(crate) fn with_message(&self, message: &str) -> Vec<Captured> {
        self.0.lock().unwrap().iter().filter(|e| e.message() == message).cloned().collect()
    }
}

impl<S: Subscriber> Layer<S> for Logs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldMap::default();
        event.record(&mut fields);
        self.0.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            fields: fields.0,
        });
    }
}

#[derive(Default)]
struct FieldMap(BTreeMap<&'static str, String>);

impl Visit for FieldMap {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name(), format!("{value:?}"));
    }
}

/// Records every event at `level` or more severe on the current thread until
/// the guard drops.
pub(crate) fn capture(level: Level) -> (Logs, DefaultGuard) {
    let logs = Logs::default();
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(logs.clone());
    (logs, tracing::subscriber::set_default(subscriber))
}
