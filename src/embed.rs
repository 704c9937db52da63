//! HTML snippets the host injects into its served admin pages.
//!
//! Both snippets are rendered once at host startup (the host's embed hook
//! is synchronous and cached), so they take their values from configuration
//! rather than live settings.

/// Path where the router serves the manifest.
pub const MANIFEST_PATH: &str = "/pwa/manifest.json";

/// Path where the router serves the service-worker script.
pub const SERVICE_WORKER_PATH: &str = "/pwa/sw.js";

/// Interval between service-worker update checks, in milliseconds.
const UPDATE_INTERVAL_MS: u32 = 60_000;

/// Head tags: manifest link, theme-color meta, and Apple PWA metas.
///
/// The theme color is configurable so deployments can keep it consistent
/// with the color served in the manifest.
#[must_use]
pub fn head_tags(theme_color: &str, app_title: &str) -> String {
    format!(
        r#"<!-- PWA Meta Tags -->
<link rel="manifest" href="{MANIFEST_PATH}">
<meta name="theme-color" content="{theme_color}">
<meta name="apple-mobile-web-app-capable" content="yes">
<meta name="apple-mobile-web-app-status-bar-style" content="default">
<meta name="apple-mobile-web-app-title" content="{app_title}">
"#
    )
}

/// Body script registering the service worker, with periodic update checks
/// while the page stays open.
#[must_use]
pub fn body_script() -> String {
    format!(
        r"<script>
(function() {{
	if ('serviceWorker' in navigator) {{
		window.addEventListener('load', () => {{
			navigator.serviceWorker
				.register('{SERVICE_WORKER_PATH}')
				.then((registration) => {{
					console.log('PWA: ServiceWorker registered:', registration.scope);
					setInterval(() => {{
						registration.update();
					}}, {UPDATE_INTERVAL_MS});
				}})
				.catch((error) => {{
					console.log('PWA: ServiceWorker registration failed:', error);
				}});
		}});
	}}
}})();
</script>
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_links_manifest_and_theme() {
        let head = head_tags("#6644ff", "Directus");
        assert!(head.contains(r#"<link rel="manifest" href="/pwa/manifest.json">"#));
        assert!(head.contains(r##"<meta name="theme-color" content="#6644ff">"##));
        assert!(head.contains(r#"<meta name="apple-mobile-web-app-title" content="Directus">"#));
        assert!(head.contains(r#"<meta name="apple-mobile-web-app-capable" content="yes">"#));
    }

    #[test]
    fn body_registers_worker_with_update_polling() {
        let body = body_script();
        assert!(body.contains(".register('/pwa/sw.js')"));
        assert!(body.contains("}, 60000);"));
        assert!(body.contains("'serviceWorker' in navigator"));
    }
}
