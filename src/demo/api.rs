//! In-memory stand-in for the HTTP API the demo pages call from commands.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

/// Messages per field name, as returned by a rejected request.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Result of one API call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ApiResult<T> {
    Valid(T),
    /// The request was understood but rejected.
    Invalid(FieldErrors),
    /// Transport or server failure.
    Unhandled(String),
}

impl<T> ApiResult<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, ApiResult::Valid(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ApiResult::Valid(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub active: bool,
}

/// Editable part of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub job_title: String,
}

/// A saved two-field record. `revision` counts calls in the order the
/// server received them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairRecord {
    pub a: i64,
    pub b: i64,
    pub revision: u64,
}

#[derive(Default)]
struct Inner {
    users: HashMap<u64, User>,
    latencies: VecDeque<Duration>,
    revision: u64,
    offline: bool,
}

/// Simulated API with configurable latency.
///
/// Each call sleeps before answering. Latencies queued with
/// [`queue_latencies`](Self::queue_latencies) are consumed one per call, in
/// call order; once the queue is empty the default latency applies.
#[derive(Clone)]
pub struct SimulatedApi {
    inner: Arc<Mutex<Inner>>,
    default_latency: Duration,
}

impl fmt::Debug for SimulatedApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedApi")
            .field("default_latency", &self.default_latency)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SimulatedApi {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SimulatedApi {
    pub fn new(default_latency: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            default_latency,
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.inner.lock().users.insert(user.id, user);
        self
    }

    pub fn queue_latencies<I>(&self, latencies: I)
    where
        I: IntoIterator<Item = Duration>,
    {
        self.inner.lock().latencies.extend(latencies);
    }

    /// Make every following call fail with [`ApiResult::Unhandled`].
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().offline = offline;
    }

    pub fn user(&self, id: u64) -> Option<User> {
        self.inner.lock().users.get(&id).cloned()
    }

    pub async fn read_user(&self, id: u64) -> ApiResult<User> {
        if let Some(failure) = self.round_trip("read_user").await {
            return failure;
        }
        match self.inner.lock().users.get(&id) {
            Some(user) => ApiResult::Valid(user.clone()),
            None => ApiResult::Invalid(field_error("id", format!("User {} does not exist.", id))),
        }
    }

    pub async fn update_user(&self, id: u64, update: UserUpdate) -> ApiResult<User> {
        if let Some(failure) = self.round_trip("update_user").await {
            return failure;
        }

        let mut errors = FieldErrors::new();
        if update.name.trim().is_empty() {
            errors.entry("name".to_string()).or_default().push("Please enter a name.".to_string());
        }
        if !update.email.contains('@') {
            errors
                .entry("email".to_string())
                .or_default()
                .push("Please enter a valid email address.".to_string());
        }
        if !errors.is_empty() {
            return ApiResult::Invalid(errors);
        }

        let mut inner = self.inner.lock();
        let Some(user) = inner.users.get_mut(&id) else {
            return ApiResult::Invalid(field_error("id", format!("User {} does not exist.", id)));
        };
        user.name = update.name;
        user.email = update.email;
        user.job_title = update.job_title;
        ApiResult::Valid(user.clone())
    }

    pub async fn delete_user(&self, id: u64) -> ApiResult<User> {
        if let Some(failure) = self.round_trip("delete_user").await {
            return failure;
        }
        let mut inner = self.inner.lock();
        match inner.users.get_mut(&id) {
            Some(user) if user.active => {
                user.active = false;
                ApiResult::Valid(user.clone())
            }
            Some(_) => ApiResult::Invalid(field_error("id", "Account is already deactivated.")),
            None => ApiResult::Invalid(field_error("id", format!("User {} does not exist.", id))),
        }
    }

    pub async fn save_pair(&self, a: i64, b: i64) -> ApiResult<PairRecord> {
        // Revision is taken before the delay so it reflects arrival order.
        let revision = {
            let mut inner = self.inner.lock();
            inner.revision += 1;
            inner.revision
        };
        if let Some(failure) = self.round_trip("save_pair").await {
            return failure;
        }
        if a < 0 {
            return ApiResult::Invalid(field_error("a", "Must be zero or greater."));
        }
        ApiResult::Valid(PairRecord { a, b, revision })
    }

    async fn round_trip<T>(&self, call: &'static str) -> Option<ApiResult<T>> {
        let latency = self
            .inner
            .lock()
            .latencies
            .pop_front()
            .unwrap_or(self.default_latency);
        tracing::debug!(call, latency_ms = latency.as_millis() as u64, "API call");
        tokio::time::sleep(latency).await;

        if self.inner.lock().offline {
            return Some(ApiResult::Unhandled(format!("{} failed: service unavailable", call)));
        }
        None
    }
}

fn field_error(field: &str, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.into()]);
    errors
}
