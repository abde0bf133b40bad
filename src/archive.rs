//! Route archive records and in-process implementations.
//!
//! The archive is a durable, unbounded history of planned routes, not an
//! eviction-managed cache. Records are written once and only superseded by
//! a newer save, renamed, or deleted.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ArchiveError;
use crate::geo::Coord;
use crate::optimizer::StopDescriptor;
use crate::traits::RouteArchive;

/// A stop as it was requested, kept verbatim for cache-key comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedStop {
    pub name: String,
    pub address: Option<String>,
    pub coord: Option<Coord>,
}

impl From<&StopDescriptor> for ArchivedStop {
    fn from(stop: &StopDescriptor) -> Self {
        Self {
            name: stop.name.clone(),
            address: stop.address.clone(),
            coord: stop.coord,
        }
    }
}

/// A persisted route plan plus its originating request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedRoute {
    pub id: i64,
    /// Display name, user-renameable.
    pub name: String,
    pub user: String,
    /// Start point text exactly as requested.
    pub start_point: String,
    pub stops: Vec<ArchivedStop>,
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    pub outbound: String,
    pub return_path: String,
    /// Unix seconds.
    pub created_at: i64,
}

/// A route about to be archived; the archive assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArchivedRoute {
    pub name: String,
    pub user: String,
    pub start_point: String,
    pub stops: Vec<ArchivedStop>,
    pub total_distance_m: f64,
    pub total_duration_s: f64,
    pub outbound: String,
    pub return_path: String,
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ArchiveState {
    next_id: i64,
    routes: Vec<ArchivedRoute>,
}

impl ArchiveState {
    fn insert(&mut self, route: NewArchivedRoute) -> ArchivedRoute {
        self.next_id += 1;
        let record = ArchivedRoute {
            id: self.next_id,
            name: route.name,
            user: route.user,
            start_point: route.start_point,
            stops: route.stops,
            total_distance_m: route.total_distance_m,
            total_duration_s: route.total_duration_s,
            outbound: route.outbound,
            return_path: route.return_path,
            created_at: now_unix(),
        };
        self.routes.push(record.clone());
        record
    }

    fn find_by_start(&self, start: &str) -> Vec<ArchivedRoute> {
        let needle = start.trim().to_lowercase();
        self.routes
            .iter()
            .filter(|r| r.start_point.trim().to_lowercase() == needle)
            .cloned()
            .collect()
    }

    fn list_for_user(&self, user: &str) -> Vec<ArchivedRoute> {
        let mut routes: Vec<ArchivedRoute> = self
            .routes
            .iter()
            .filter(|r| r.user == user)
            .cloned()
            .collect();
        routes.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        routes
    }

    fn rename(&mut self, id: i64, name: &str) -> Result<(), ArchiveError> {
        let route = self
            .routes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ArchiveError::NotFound(id))?;
        route.name = name.to_string();
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<(), ArchiveError> {
        let before = self.routes.len();
        self.routes.retain(|r| r.id != id);
        if self.routes.len() == before {
            return Err(ArchiveError::NotFound(id));
        }
        Ok(())
    }
}

/// In-memory archive for tests and short-lived embeddings.
#[derive(Debug, Default)]
pub struct MemoryRouteArchive {
    state: Mutex<ArchiveState>,
}

impl MemoryRouteArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RouteArchive for MemoryRouteArchive {
    fn find_by_start(&self, start: &str) -> Vec<ArchivedRoute> {
        self.state.lock().expect("archive lock poisoned").find_by_start(start)
    }

    fn save(&self, route: NewArchivedRoute) -> Result<ArchivedRoute, ArchiveError> {
        Ok(self.state.lock().expect("archive lock poisoned").insert(route))
    }

    fn list_for_user(&self, user: &str) -> Vec<ArchivedRoute> {
        self.state.lock().expect("archive lock poisoned").list_for_user(user)
    }

    fn rename(&self, id: i64, name: &str) -> Result<(), ArchiveError> {
        self.state.lock().expect("archive lock poisoned").rename(id, name)
    }

    fn delete(&self, id: i64) -> Result<(), ArchiveError> {
        self.state.lock().expect("archive lock poisoned").delete(id)
    }
}

/// Durable single-file archive, written through on every mutation.
///
/// Concurrent identical saves may race; last write wins, which matches the
/// archive's loose-key semantics.
#[derive(Debug)]
pub struct JsonFileArchive {
    path: PathBuf,
    state: Mutex<ArchiveState>,
}

impl JsonFileArchive {
    /// Opens an archive file, creating an empty one if it doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let path = path.into();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            ArchiveState::default()
        };
        Ok(Self { path, state: Mutex::new(state) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &ArchiveState) -> Result<(), ArchiveError> {
        let raw = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), routes = state.routes.len(), "archive persisted");
        Ok(())
    }
}

impl RouteArchive for JsonFileArchive {
    fn find_by_start(&self, start: &str) -> Vec<ArchivedRoute> {
        self.state.lock().expect("archive lock poisoned").find_by_start(start)
    }

    fn save(&self, route: NewArchivedRoute) -> Result<ArchivedRoute, ArchiveError> {
        let mut state = self.state.lock().expect("archive lock poisoned");
        let record = state.insert(route);
        self.persist(&state)?;
        Ok(record)
    }

    fn list_for_user(&self, user: &str) -> Vec<ArchivedRoute> {
        self.state.lock().expect("archive lock poisoned").list_for_user(user)
    }

    fn rename(&self, id: i64, name: &str) -> Result<(), ArchiveError> {
        let mut state = self.state.lock().expect("archive lock poisoned");
        state.rename(id, name)?;
        self.persist(&state)
    }

    fn delete(&self, id: i64) -> Result<(), ArchiveError> {
        let mut state = self.state.lock().expect("archive lock poisoned");
        state.delete(id)?;
        self.persist(&state)
    }
}
