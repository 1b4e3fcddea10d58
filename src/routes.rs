use std::{fmt::Write, sync::Arc};

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use crate::{
    dataset::{self, Manifest},
    sample::SampleLands,
};

/// The data a server answers from. Built once at startup and never mutated.
#[derive(Debug)]
pub enum Snapshot {
    Sample(SampleLands),
    Generated(Manifest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Lands,
    Preflight,
    Status,
    Regions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    Any,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub path: PathPattern,
    pub endpoint: Endpoint,
}

impl Route {
    const fn new(method: Method, path: PathPattern, endpoint: Endpoint) -> Self {
        Self {
            method,
            path,
            endpoint,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == method
            && match self.path {
                PathPattern::Exact(expected) => expected == path,
                PathPattern::Any => true,
            }
    }
}

const SAMPLE_ROUTES: &[Route] = &[
    Route::new(Method::GET, PathPattern::Exact("/lands"), Endpoint::Lands),
    Route::new(Method::GET, PathPattern::Exact("/lands/claims"), Endpoint::Lands),
    Route::new(Method::OPTIONS, PathPattern::Any, Endpoint::Preflight),
];

const GENERATED_ROUTES: &[Route] = &[
    Route::new(Method::GET, PathPattern::Exact("/status"), Endpoint::Status),
    Route::new(Method::GET, PathPattern::Exact("/regions"), Endpoint::Regions),
];

impl Snapshot {
    pub fn routes(&self) -> &'static [Route] {
        match self {
            Self::Sample(_) => SAMPLE_ROUTES,
            Self::Generated(_) => GENERATED_ROUTES,
        }
    }

    /// First matching route wins. `None` means 404.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<Endpoint> {
        self.routes()
            .iter()
            .find(|route| route.matches(method, path))
            .map(|route| route.endpoint)
    }

    pub fn banner(&self, port: u16) -> String {
        let title = match self {
            Self::Sample(_) => "Lands mock API - fixed sample",
            Self::Generated(_) => "Lands mock API - generated regions",
        };
        let rule = "=".repeat(60);

        let mut out = String::new();
        _ = writeln!(out, "{rule}\n{title}\n{rule}");
        _ = writeln!(out, "Server running on http://localhost:{port}");
        for route in self.routes() {
            if let PathPattern::Exact(path) = route.path {
                _ = writeln!(out, "  {:<7} http://localhost:{port}{path}", route.method.as_str());
            }
        }
        match self {
            Self::Sample(sample) => {
                _ = writeln!(out, "Serving {} lands", sample.lands().len());
                _ = writeln!(out, "\nSet this in your config.yml:");
                _ = writeln!(out, "  api:\n    url: \"http://localhost:{port}/lands\"");
            }
            Self::Generated(manifest) => {
                _ = writeln!(out, "Serving {} regions", manifest.regions.len());
                _ = writeln!(out, "Hash: {}", manifest.hash);
                _ = writeln!(out, "\nSet this in your config.yml:");
                _ = writeln!(out, "  api:\n    url: \"http://localhost:{port}\"");
            }
        }
        _ = writeln!(out, "\nPress Ctrl+C to stop the server\n{rule}");
        out
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub snapshot: Arc<Snapshot>,
}

pub async fn handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();
    let snapshot = &*state.snapshot;

    match (snapshot.lookup(&method, path), snapshot) {
        (Some(Endpoint::Lands), Snapshot::Sample(sample)) => {
            let response = sample.response(dataset::now_ms());
            info!(path, lands = response.data.lands.len(), "served land data");
            (
                [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
                Json(response),
            )
                .into_response()
        }
        (Some(Endpoint::Preflight), _) => {
            debug!(path, "answered preflight");
            (
                StatusCode::OK,
                [
                    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
                    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
                ],
            )
                .into_response()
        }
        (Some(Endpoint::Status), Snapshot::Generated(manifest)) => {
            info!(hash = %manifest.hash, "served status");
            Json(manifest.status()).into_response()
        }
        (Some(Endpoint::Regions), Snapshot::Generated(manifest)) => {
            info!(regions = manifest.regions.len(), "served regions");
            Json(manifest).into_response()
        }
        (_, Snapshot::Sample(_)) => {
            debug!(%method, path, "not found");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
        (_, Snapshot::Generated(_)) => {
            debug!(%method, path, "not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
