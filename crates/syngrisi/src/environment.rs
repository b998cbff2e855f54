// Environment metadata submitted with every check
//
// The service scopes baselines by viewport, OS, and browser version, so
// these values must be stable across runs of the same test on the same
// machine. Parsing is kept pure so it can be tested without a browser.

use serde::Serialize;

/// Viewport/OS/browser description of the page a capture came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// `"{width}x{height}"`
    pub viewport: String,
    pub os: String,
    /// Major version only, e.g. `"119"`
    pub browser_version: String,
    /// Full version string, e.g. `"119.0.6045.9"`
    pub browser_full_version: String,
}

/// Formats a viewport size the way the service expects it.
pub fn viewport_string(width: u32, height: u32) -> String {
    format!("{width}x{height}")
}

/// Extracts the major component of a dotted version string.
pub fn major_version(full: &str) -> String {
    full.split('.').next().unwrap_or(full).to_string()
}

/// Extracts the full browser version from a user agent string.
///
/// Recognizes the Chrome/Chromium token family; falls back to Firefox and
/// Safari's `Version/` token for completeness.
pub fn full_version_from_user_agent(user_agent: &str) -> Option<String> {
    for token in ["HeadlessChrome/", "Chrome/", "Firefox/", "Version/"] {
        if let Some(rest) = user_agent.split(token).nth(1) {
            let version: String = rest
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if !version.is_empty() {
                return Some(version);
            }
        }
    }
    None
}

/// Maps `navigator.platform` values to the OS names the service uses.
pub fn os_name(platform: &str) -> String {
    if platform.starts_with("Mac") {
        "macOS".to_string()
    } else if platform.starts_with("Win") {
        "Windows".to_string()
    } else if platform.contains("Linux") {
        "Linux".to_string()
    } else if platform.is_empty() {
        "unknown".to_string()
    } else {
        platform.to_string()
    }
}
