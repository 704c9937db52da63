//! Client-side cache policy and the service-worker script compiled from it.
//!
//! The policy is a versioned rule object: an ordered static-asset pattern
//! list, an exclusion list that takes precedence, and a fixed precache seed
//! set. [`CachePolicy::classify`] and [`CachePolicy::decide`] make the rules
//! testable without a browser; [`CachePolicy::to_script`] compiles the same
//! rules into the JavaScript served at `/pwa/sw.js`.

use regex::RegexSet;

/// URLs eagerly cached while the worker installs.
const PRECACHE_URLS: &[&str] = &["/admin/", "/admin/index.html"];

/// File-extension patterns identifying cacheable static assets.
///
/// These are fingerprinted by the host's build tooling, so serving them
/// cache-first never yields stale content.
const STATIC_ASSET_PATTERNS: &[&str] = &[
    r"\.css$",
    r"\.js$",
    r"\.woff2?$",
    r"\.ttf$",
    r"\.eot$",
    r"\.svg$",
    r"\.png$",
    r"\.jpg$",
    r"\.jpeg$",
    r"\.gif$",
    r"\.webp$",
    r"\.ico$",
];

/// Requests that must never be served from cache opportunistically, even
/// when they match a static-asset pattern.
const EXCLUDE_PATTERNS: &[&str] = &[
    r"extensions\.js$",
    r"/items/",
    r"/users/",
    r"/activity/",
    r"/server/",
];

/// Request-handling strategy for a classified URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Serve from the static bucket first, hit the network on a miss.
    CacheFirst,
    /// Hit the network first, fall back to the general bucket offline.
    NetworkFirst,
}

/// Outcome of the per-request decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// Request is not intercepted; no cache read or write occurs.
    Passthrough,
    /// Cache-first via the static bucket.
    CacheFirst,
    /// Network-first via the general bucket.
    NetworkFirst,
}

/// Versioned caching rules for the served service worker.
///
/// Bumping the version rotates both bucket names; the activation allow-list
/// in the compiled script then deletes every prior-version bucket.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    version: u32,
    statics: RegexSet,
    excludes: RegexSet,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CachePolicy {
    /// Creates the policy at the given bucket version.
    #[must_use]
    pub fn new(version: u32) -> Self {
        Self {
            version,
            statics: RegexSet::new(STATIC_ASSET_PATTERNS).expect("valid regex"),
            excludes: RegexSet::new(EXCLUDE_PATTERNS).expect("valid regex"),
        }
    }

    /// Name of the general navigation/runtime bucket.
    #[must_use]
    pub fn general_bucket(&self) -> String {
        format!("directus-pwa-v{}", self.version)
    }

    /// Name of the static-asset bucket.
    #[must_use]
    pub fn static_bucket(&self) -> String {
        format!("directus-static-v{}", self.version)
    }

    /// Whether a bucket survives activation; everything else is deleted.
    #[must_use]
    pub fn retains_bucket(&self, name: &str) -> bool {
        name == self.general_bucket() || name == self.static_bucket()
    }

    /// Classifies a URL into a caching strategy.
    ///
    /// Exclusions take precedence over static-asset patterns, so API
    /// endpoints are network-first even when they end in a static suffix.
    #[must_use]
    pub fn classify(&self, url: &str) -> Strategy {
        if self.excludes.is_match(url) {
            return Strategy::NetworkFirst;
        }
        if self.statics.is_match(url) {
            Strategy::CacheFirst
        } else {
            Strategy::NetworkFirst
        }
    }

    /// Full per-request decision as the compiled worker performs it.
    ///
    /// Non-GET methods and non-http(s) schemes pass through untouched.
    #[must_use]
    pub fn decide(&self, method: &str, url: &str) -> FetchDecision {
        if !method.eq_ignore_ascii_case("GET") {
            return FetchDecision::Passthrough;
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return FetchDecision::Passthrough;
        }
        match self.classify(url) {
            Strategy::CacheFirst => FetchDecision::CacheFirst,
            Strategy::NetworkFirst => FetchDecision::NetworkFirst,
        }
    }

    /// Compiles the policy into the service-worker script.
    ///
    /// The output depends only on the policy, so the route layer can render
    /// it once and serve identical bytes on every request.
    #[must_use]
    pub fn to_script(&self) -> String {
        format!(
            r"const CACHE_NAME = '{general}';
const STATIC_CACHE_NAME = '{statics}';
const urlsToCache = [
{precache}
];

// Patterns for static assets that are safe to serve cache-first
const STATIC_ASSET_PATTERNS = [
{static_patterns}
];

// Requests that must never be served from cache, even opportunistically
const EXCLUDE_FROM_CACHE = [
{exclude_patterns}
];

function isStaticAsset(url) {{
	for (const pattern of EXCLUDE_FROM_CACHE) {{
		if (pattern.test(url)) {{
			return false;
		}}
	}}
	for (const pattern of STATIC_ASSET_PATTERNS) {{
		if (pattern.test(url)) {{
			return true;
		}}
	}}
	return false;
}}

// Install - pre-populate the general cache; failure must not block install
self.addEventListener('install', (event) => {{
	event.waitUntil(
		caches.open(CACHE_NAME)
			.then((cache) => {{
				return cache.addAll(urlsToCache);
			}})
			.catch((error) => {{
				console.error('Cache installation failed:', error);
			}})
	);
	self.skipWaiting();
}});

// Activate - delete buckets from prior policy versions
self.addEventListener('activate', (event) => {{
	const currentCaches = [CACHE_NAME, STATIC_CACHE_NAME];
	event.waitUntil(
		caches.keys().then((cacheNames) => {{
			return Promise.all(
				cacheNames.map((cacheName) => {{
					if (!currentCaches.includes(cacheName)) {{
						console.log('Deleting old cache:', cacheName);
						return caches.delete(cacheName);
					}}
				}})
			);
		}})
	);
	self.clients.claim();
}});

// Fetch - strategy per request classification
self.addEventListener('fetch', (event) => {{
	if (event.request.method !== 'GET') {{
		return;
	}}
	if (!event.request.url.startsWith('http')) {{
		return;
	}}

	const url = event.request.url;

	// Static assets: cache first, fall back to network
	if (isStaticAsset(url)) {{
		event.respondWith(
			caches.match(event.request).then((cachedResponse) => {{
				if (cachedResponse) {{
					return cachedResponse;
				}}
				return fetch(event.request).then((response) => {{
					if (!response || response.status !== 200 || response.type === 'error') {{
						return response;
					}}
					const responseToCache = response.clone();
					caches.open(STATIC_CACHE_NAME).then((cache) => {{
						cache.put(event.request, responseToCache);
					}});
					return response;
				}}).catch(() => {{
					return new Response('Offline - Asset unavailable', {{
						status: 503,
						statusText: 'Service Unavailable',
					}});
				}});
			}})
		);
		return;
	}}

	// Everything else: network first, fall back to cache
	event.respondWith(
		fetch(event.request)
			.then((response) => {{
				if (!response || response.status !== 200 || response.type === 'error') {{
					return response;
				}}
				const responseToCache = response.clone();
				caches.open(CACHE_NAME).then((cache) => {{
					cache.put(event.request, responseToCache);
				}});
				return response;
			}})
			.catch(() => {{
				return caches.match(event.request).then((response) => {{
					if (response) {{
						return response;
					}}
					if (event.request.mode === 'navigate') {{
						return caches.match('{root}');
					}}
					return new Response('Offline', {{
						status: 503,
						statusText: 'Service Unavailable',
						headers: new Headers({{
							'Content-Type': 'text/plain',
						}}),
					}});
				}});
			}})
	);
}});
",
            general = self.general_bucket(),
            statics = self.static_bucket(),
            precache = js_string_list(PRECACHE_URLS),
            static_patterns = js_regex_list(STATIC_ASSET_PATTERNS),
            exclude_patterns = js_regex_list(EXCLUDE_PATTERNS),
            root = PRECACHE_URLS[0],
        )
    }
}

/// Renders an indented JS array body of string literals.
fn js_string_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("\t'{v}',"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders an indented JS array body of regex literals.
///
/// The Rust pattern sources are also valid JS regexes once unescaped
/// slashes are escaped for the literal form.
fn js_regex_list(patterns: &[&str]) -> String {
    patterns
        .iter()
        .map(|p| format!("\t/{}/,", p.replace('/', "\\/")))
        .collect::<Vec<_>>()
        .join("\n")
}
