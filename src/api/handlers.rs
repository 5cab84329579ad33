//! API Handlers
//!
//! HTTP request handlers binding the object cache engine to the REST API.
//! Each request gets a fresh engine, so the local cache lives exactly as
//! long as the request while the shared store outlives it.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::cache::{resolve_group, ObjectCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    BatchOp, BatchRequest, BatchResponse, CounterRequest, CounterResponse, DeleteResponse,
    FlushResponse, GetResponse, HealthResponse, KeyQuery, OpOutcome, StatsResponse,
    WriteRequest, WriteResponse,
};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide shared store
    pub store: Arc<MemoryStore>,
    /// Key prefix, multisite and group settings applied to every engine
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState over an existing store.
    pub fn new(store: MemoryStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(MemoryStore::new(config.max_entries), config.clone())
    }

    /// Builds a request-scoped engine acting as `site`.
    ///
    /// Additions are suspended while the shared store is at capacity.
    pub fn engine(&self, site: Option<u64>) -> ObjectCache {
        let pressure = self.store.clone();
        let mut cache = ObjectCache::new(
            self.store.clone(),
            self.config.prefix(),
            self.config.multisite,
            site.unwrap_or(self.config.default_site),
        )
        .with_addition_guard(move || pressure.is_full());

        cache.register_global_groups(self.config.global_groups.as_slice());
        cache.register_non_persistent_groups(self.config.non_persistent_groups.as_slice());
        cache
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteMode {
    Add,
    Set,
    Replace,
}

fn write(state: &AppState, req: WriteRequest, mode: WriteMode) -> Result<Json<WriteResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.engine(req.site);
    let stored = match mode {
        WriteMode::Add => cache.add(&req.key, &req.value, &req.group, req.ttl),
        WriteMode::Set => cache.set(&req.key, &req.value, &req.group, req.ttl),
        WriteMode::Replace => cache.replace(&req.key, &req.value, &req.group, req.ttl),
    };
    debug!("{:?} {} in {}: stored={}", mode, req.key, resolve_group(&req.group), stored);

    Ok(Json(WriteResponse {
        group: resolve_group(&req.group).to_string(),
        key: req.key,
        stored,
    }))
}

/// Handler for POST /add
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<WriteResponse>> {
    write(&state, req, WriteMode::Add)
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<WriteResponse>> {
    write(&state, req, WriteMode::Set)
}

/// Handler for POST /replace
pub async fn replace_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<WriteResponse>> {
    write(&state, req, WriteMode::Replace)
}

/// Handler for GET /get/:group/:key
///
/// Responds 404 when the key is not cached.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((group, key)): Path<(String, String)>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.engine(query.site);
    match cache.get(&key, &group, query.force) {
        Some(value) => Ok(Json(GetResponse::new(key, group, Some(value)))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:group/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((group, key)): Path<(String, String)>,
    Query(query): Query<KeyQuery>,
) -> Json<DeleteResponse> {
    let mut cache = state.engine(query.site);
    let deleted = cache.delete(&key, &group);

    Json(DeleteResponse {
        key,
        group,
        deleted,
    })
}

fn count(state: &AppState, req: CounterRequest, up: bool) -> Result<Json<CounterResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.engine(req.site);
    let value = if up {
        cache.increment(&req.key, req.offset, &req.group)
    } else {
        cache.decrement(&req.key, req.offset, &req.group)
    };

    Ok(Json(CounterResponse {
        group: resolve_group(&req.group).to_string(),
        key: req.key,
        value,
    }))
}

/// Handler for POST /incr
pub async fn incr_handler(
    State(state): State<AppState>,
    Json(req): Json<CounterRequest>,
) -> Result<Json<CounterResponse>> {
    count(&state, req, true)
}

/// Handler for POST /decr
pub async fn decr_handler(
    State(state): State<AppState>,
    Json(req): Json<CounterRequest>,
) -> Result<Json<CounterResponse>> {
    count(&state, req, false)
}

/// Handler for POST /flush
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let flushed = state.engine(None).flush();
    Json(FlushResponse { flushed })
}

/// Handler for POST /batch
///
/// Runs every operation through one engine, in order. The whole batch is
/// rejected up front if any key is invalid.
pub async fn batch_handler(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>> {
    if let Some(error_msg) = req.ops.iter().find_map(BatchOp::validate) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.engine(req.site);
    let results = req
        .ops
        .into_iter()
        .map(|op| apply(&mut cache, op))
        .collect();

    Ok(Json(BatchResponse { results }))
}

fn apply(cache: &mut ObjectCache, op: BatchOp) -> OpOutcome {
    match op {
        BatchOp::Add {
            key,
            value,
            group,
            ttl,
        } => OpOutcome::Stored {
            stored: cache.add(&key, &value, &group, ttl),
        },
        BatchOp::Set {
            key,
            value,
            group,
            ttl,
        } => OpOutcome::Stored {
            stored: cache.set(&key, &value, &group, ttl),
        },
        BatchOp::Replace {
            key,
            value,
            group,
            ttl,
        } => OpOutcome::Stored {
            stored: cache.replace(&key, &value, &group, ttl),
        },
        BatchOp::Get { key, group, force } => {
            let value = cache.get(&key, &group, force);
            OpOutcome::Fetched {
                found: value.is_some(),
                value: value.unwrap_or_default(),
            }
        }
        BatchOp::Delete { key, group } => OpOutcome::Deleted {
            deleted: cache.delete(&key, &group),
        },
        BatchOp::Incr { key, offset, group } => OpOutcome::Counter {
            value: cache.increment(&key, offset, &group),
        },
        BatchOp::Decr { key, offset, group } => OpOutcome::Counter {
            value: cache.decrement(&key, offset, &group),
        },
        BatchOp::SwitchSite { site } => {
            cache.switch_tenant(site);
            OpOutcome::Switched { site }
        }
        BatchOp::Flush => OpOutcome::Flushed {
            flushed: cache.flush(),
        },
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
