//! Registry mapping (verb, path pattern) to handler values.
//!
//! The hosting transport parses HTTP and hands this registry a verb and a
//! path; dispatch picks the longest matching pattern and passes the
//! remainder to the handler as the request resource.

use serde_json::Value;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

/// A parsed control request: just the resource remainder of the path
/// (empty for exact-match routes).
#[derive(Debug, Clone)]
pub struct Request {
    pub resource: String,
}

/// Status code plus a short body (plain text for errors and acks, JSON for
/// documents).
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    /// Plain 200 with no body.
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: String::new(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(value: &Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
        }
    }
}

pub type Handler = Box<dyn Fn(&Request) -> Response + Send + Sync>;

/// One (verb, pattern) → handler binding.
///
/// `trailing` routes match any path under the pattern and receive the rest
/// as the resource; others require an exact match.
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub trailing: bool,
    pub handler: Handler,
}

impl Route {
    pub fn new(method: Method, path: &'static str, trailing: bool, handler: Handler) -> Self {
        Self {
            method,
            path,
            trailing,
            handler,
        }
    }
}

/// A set of routes with longest-prefix dispatch.
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Match `path` against the registered patterns and run the handler.
    ///
    /// Trailing routes match on a path-segment boundary only, so `/play`
    /// never swallows `/playlist/...`. Among candidates the longest pattern
    /// wins. Unmatched requests get a plain 404.
    pub fn dispatch(&self, method: Method, path: &str) -> Response {
        let mut best: Option<(&Route, &str)> = None;

        for route in self.routes.iter().filter(|r| r.method == method) {
            let rest = if route.trailing {
                match path.strip_prefix(route.path) {
                    Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                    _ => continue,
                }
            } else {
                if path != route.path {
                    continue;
                }
                ""
            };

            if best.is_none_or(|(b, _)| route.path.len() > b.path.len()) {
                best = Some((route, rest));
            }
        }

        match best {
            Some((route, rest)) => {
                let request = Request {
                    resource: rest.trim_start_matches('/').to_string(),
                };
                (route.handler)(&request)
            }
            None => Response::text(404, "Not found"),
        }
    }
}
