//! Client-side page routing.
//!
//! # Design
//! A [`Router`] is an ordered table of path patterns. Each pattern either
//! resolves to a view value supplied by the host or redirects to another
//! path; the first match wins. Views registered with
//! [`Router::lazy_route`] are produced by their loader on the first
//! resolution that lands on them and cached afterwards. The router also owns
//! a [`History`], so `navigate`/`back`/`forward` behave like the browser's
//! native history.

pub mod history;
pub mod pattern;

use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, info};

pub use history::History;
pub use pattern::{Params, PathPattern};

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 8;

pub const HOME: &str = "home";
pub const CREATE: &str = "create";
pub const EDIT: &str = "edit";
pub const ABOUT: &str = "about";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` needs param `{param}`")]
    MissingParam { route: String, param: String },

    #[error("redirect loop while resolving `{0}`")]
    RedirectLoop(String),

    #[error("no route matches `{0}`")]
    NoMatch(String),
}

enum ViewSlot<V> {
    Eager(V),
    Lazy {
        cell: OnceLock<V>,
        loader: Box<dyn Fn() -> V + Send + Sync>,
    },
}

impl<V> ViewSlot<V> {
    fn get(&self, route: &str) -> &V {
        match self {
            ViewSlot::Eager(view) => view,
            ViewSlot::Lazy { cell, loader } => cell.get_or_init(|| {
                info!(route, "loading lazy view");
                loader()
            }),
        }
    }

    fn is_loaded(&self) -> bool {
        match self {
            ViewSlot::Eager(_) => true,
            ViewSlot::Lazy { cell, .. } => cell.get().is_some(),
        }
    }
}

enum Target<V> {
    View(ViewSlot<V>),
    Redirect(String),
}

struct Route<V> {
    name: Option<String>,
    pattern: PathPattern,
    target: Target<V>,
}

/// Where a location ends up, before any view is touched.
struct Located {
    index: usize,
    params: Params,
    path: String,
    redirected_from: Option<String>,
}

/// The outcome of resolving a location.
#[derive(Debug)]
pub struct Resolved<'a, V> {
    pub name: Option<&'a str>,
    pub view: &'a V,
    pub params: Params,
    /// Final path after redirects, without base, query or fragment.
    pub path: String,
    /// The requested path when a redirect was followed.
    pub redirected_from: Option<String>,
}

impl<V> Resolved<'_, V> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

pub struct Router<V> {
    routes: Vec<Route<V>>,
    history: History,
}

impl<V> Router<V> {
    pub fn new() -> Self {
        Self::with_base("/")
    }

    pub fn with_base(base: &str) -> Self {
        Self {
            routes: Vec::new(),
            history: History::new(base),
        }
    }

    pub fn route(mut self, name: &str, pattern: &str, view: V) -> Self {
        self.routes.push(Route {
            name: Some(name.to_string()),
            pattern: PathPattern::parse(pattern),
            target: Target::View(ViewSlot::Eager(view)),
        });
        self
    }

    pub fn lazy_route<F>(mut self, name: &str, pattern: &str, loader: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.routes.push(Route {
            name: Some(name.to_string()),
            pattern: PathPattern::parse(pattern),
            target: Target::View(ViewSlot::Lazy {
                cell: OnceLock::new(),
                loader: Box::new(loader),
            }),
        });
        self
    }

    pub fn redirect(mut self, pattern: &str, to: &str) -> Self {
        self.routes.push(Route {
            name: None,
            pattern: PathPattern::parse(pattern),
            target: Target::Redirect(to.to_string()),
        });
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Resolve a location without recording it in history.
    pub fn resolve(&self, location: &str) -> Result<Resolved<'_, V>, RouterError> {
        let located = self.locate(location)?;
        Ok(self.materialize(located))
    }

    /// Resolve a location and push the final path onto history. A redirected
    /// location only ever leaves its target behind.
    pub fn navigate(&mut self, location: &str) -> Result<Resolved<'_, V>, RouterError> {
        let located = self.locate(location)?;
        if located.path != self.history.current() {
            self.history.push(located.path.clone());
        }
        Ok(self.materialize(located))
    }

    pub fn current(&self) -> Result<Resolved<'_, V>, RouterError> {
        let located = self.locate_path(self.history.current().to_string())?;
        Ok(self.materialize(located))
    }

    pub fn back(&mut self) -> Option<Result<Resolved<'_, V>, RouterError>> {
        self.history.back()?;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<Result<Resolved<'_, V>, RouterError>> {
        self.history.forward()?;
        Some(self.current())
    }

    /// Build the URL (base included) of a named route.
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;
        let params: Params = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let path = route
            .pattern
            .build(&params)
            .map_err(|param| RouterError::MissingParam {
                route: name.to_string(),
                param,
            })?;
        Ok(self.history.href(&path))
    }

    /// Whether the named route's view is available without running a loader.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.routes
            .iter()
            .filter(|r| r.name.as_deref() == Some(name))
            .any(|r| matches!(&r.target, Target::View(slot) if slot.is_loaded()))
    }

    fn locate(&self, location: &str) -> Result<Located, RouterError> {
        self.locate_path(normalize(self.history.strip_base(location)))
    }

    /// `path` is already free of base, query and fragment.
    fn locate_path(&self, mut path: String) -> Result<Located, RouterError> {
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let (index, params) = self
                .routes
                .iter()
                .enumerate()
                .find_map(|(i, r)| r.pattern.matches(&path).map(|p| (i, p)))
                .ok_or_else(|| RouterError::NoMatch(path.clone()))?;

            match &self.routes[index].target {
                Target::View(_) => {
                    debug!(%path, route = ?self.routes[index].name, "resolved route");
                    return Ok(Located {
                        index,
                        params,
                        path,
                        redirected_from,
                    });
                }
                Target::Redirect(to) => {
                    debug!(from = %path, to = %to, "following redirect");
                    redirected_from.get_or_insert_with(|| path.clone());
                    path = normalize(to);
                }
            }
        }

        Err(RouterError::RedirectLoop(redirected_from.unwrap_or(path)))
    }

    fn materialize(&self, located: Located) -> Resolved<'_, V> {
        let route = &self.routes[located.index];
        let name = route.name.as_deref();
        let view = match &route.target {
            Target::View(slot) => slot.get(name.unwrap_or(route.pattern.as_str())),
            Target::Redirect(_) => unreachable!("located routes always carry a view"),
        };
        Resolved {
            name,
            view,
            params: located.params,
            path: located.path,
            redirected_from: located.redirected_from,
        }
    }
}

impl<V> Default for Router<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop query and fragment; an empty path is the root.
fn normalize(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// The views of the items app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppView {
    List,
    Create,
    Edit,
    About,
}

impl AppView {
    pub fn as_str(self) -> &'static str {
        match self {
            AppView::List => "list",
            AppView::Create => "create",
            AppView::Edit => "edit",
            AppView::About => "about",
        }
    }
}

/// The items app route table. `about` is only produced on first use.
pub fn app_router<V, F>(list: V, create: V, edit: V, about: F) -> Router<V>
where
    F: Fn() -> V + Send + Sync + 'static,
{
    Router::new()
        .route(HOME, "/", list)
        .route(CREATE, "/create", create)
        .route(EDIT, "/edit/:id", edit)
        .lazy_route(ABOUT, "/about", about)
        .redirect("/:catchAll(.*)", "/")
}
