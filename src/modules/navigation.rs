// Pure navigation logic - no Tauri imports allowed.
// Address-bar classification and home page helpers that can be unit tested.

use std::io;
use std::path::{Path, PathBuf};
use url::Url;

use super::engine::Target;
use crate::error::{BrowserError, BrowserResult};
use crate::settings::Settings;

/// Address-bar spelling of the local home page. Not a registered protocol.
pub const HOME_SCHEME: &str = "monkey-point://home";

/// Tab label shown while the home page is displayed.
pub const HOME_TITLE: &str = "Home";

const SCHEME_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "file:///"];

/// Where a submitted address should take the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Home,
    Direct(String),
    Search(String),
}

/// Classifies address-bar input.
///
/// PRIVACY NOTICE:
/// This function performs purely local string manipulation and heuristics.
/// It does NOT resolve hosts or contact any server; the only request happens
/// when the resulting URL is loaded into the tab's webview.
///
/// Input with a dot and no whitespace is taken as a host, so dotted phrases
/// such as `e.g.` load as URLs instead of searching.
pub fn resolve_input(input: &str, settings: &Settings) -> Destination {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(HOME_SCHEME) {
        return Destination::Home;
    }

    if has_scheme_prefix(trimmed) {
        return Destination::Direct(trimmed.to_string());
    }

    if trimmed.contains('.') && !trimmed.chars().any(char::is_whitespace) {
        return Destination::Direct(format!("http://{}", trimmed));
    }

    Destination::Search(settings.search_engine.query_url(trimmed))
}

fn has_scheme_prefix(input: &str) -> bool {
    SCHEME_PREFIXES.iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Parses a resolved destination string into something the engine can load.
pub fn parse_destination(raw: &str) -> BrowserResult<Url> {
    Url::parse(raw).map_err(|e| BrowserError::invalid_url(raw, e))
}

/// Initial target for a tab opened with optional user text.
pub fn resolve_target(input: Option<&str>, settings: &Settings) -> BrowserResult<Target> {
    match input.map(|text| resolve_input(text, settings)) {
        None | Some(Destination::Home) => Ok(Target::Home),
        Some(Destination::Direct(raw)) | Some(Destination::Search(raw)) => {
            parse_destination(&raw).map(Target::Url)
        }
    }
}

/// First positional command-line argument, skipping the program name and flags.
pub fn launch_argument(args: &[String]) -> Option<&str> {
    args.iter()
        .skip(1)
        .map(String::as_str)
        .find(|arg| !arg.starts_with('-'))
}

/// The bundled local default page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePage {
    path: PathBuf,
    url: Url,
}

impl HomePage {
    pub fn from_path(path: impl Into<PathBuf>) -> BrowserResult<Self> {
        let path = path.into();
        let url = Url::from_file_path(&path).map_err(|_| {
            BrowserError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("home page path {:?} is not absolute", path),
            ))
        })?;
        Ok(Self { path, url })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// True when `url` points at the home page file.
    pub fn matches(&self, url: &Url) -> bool {
        if url.scheme() != "file" {
            return false;
        }
        *url == self.url || url.to_file_path().is_ok_and(|p| p == self.path)
    }

    /// Address-bar text for a tab whose last-known location is `url`.
    pub fn display(&self, url: Option<&Url>) -> String {
        match url {
            Some(u) if self.matches(u) => HOME_SCHEME.to_string(),
            Some(u) => u.to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SearchEngine;
    use rstest::rstest;

    fn home() -> HomePage {
        HomePage::from_path(std::env::temp_dir().join("welcome.html")).unwrap()
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("monkey-point://home")]
    #[case("MONKEY-POINT://HOME")]
    #[case("  Monkey-Point://Home  ")]
    fn test_home_inputs(#[case] input: &str) {
        assert_eq!(resolve_input(input, &Settings::default()), Destination::Home);
    }

    #[rstest]
    #[case("http://example.com")]
    #[case("https://example.com/path?query=1")]
    #[case("ftp://files.example.org/pub")]
    #[case("file:///tmp/page.html")]
    #[case("https://localhost:8080")]
    fn test_scheme_prefixed_inputs_load_unchanged(#[case] input: &str) {
        assert_eq!(
            resolve_input(input, &Settings::default()),
            Destination::Direct(input.to_string())
        );
    }

    #[rstest]
    #[case("example.com", "http://example.com")]
    #[case("sub.domain.co.uk", "http://sub.domain.co.uk")]
    #[case("docs.rs/url", "http://docs.rs/url")]
    #[case("  example.com  ", "http://example.com")]
    #[case("127.0.0.1:3000", "http://127.0.0.1:3000")]
    fn test_dotted_inputs_get_http(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            resolve_input(input, &Settings::default()),
            Destination::Direct(expected.to_string())
        );
    }

    #[rstest]
    #[case("hello world", "https://duckduckgo.com/?q=hello%20world")]
    #[case("localhost", "https://duckduckgo.com/?q=localhost")]
    #[case("what is rust.lang", "https://duckduckgo.com/?q=what%20is%20rust.lang")]
    #[case("c++", "https://duckduckgo.com/?q=c%2B%2B")]
    #[case("a&b=c", "https://duckduckgo.com/?q=a%26b%3Dc")]
    #[case("café", "https://duckduckgo.com/?q=caf%C3%A9")]
    #[case("tab\tseparated.words", "https://duckduckgo.com/?q=tab%09separated.words")]
    fn test_search_fallback(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            resolve_input(input, &Settings::default()),
            Destination::Search(expected.to_string())
        );
    }

    #[test]
    fn test_dotted_phrase_is_taken_as_url() {
        assert_eq!(
            resolve_input("e.g.", &Settings::default()),
            Destination::Direct("http://e.g.".to_string())
        );
    }

    #[test]
    fn test_uppercase_scheme_is_recognized() {
        assert_eq!(
            resolve_input("HTTPS://Example.com", &Settings::default()),
            Destination::Direct("HTTPS://Example.com".to_string())
        );
    }

    #[test]
    fn test_configured_search_engine() {
        let settings = Settings {
            search_engine: SearchEngine::Google,
            ..Settings::default()
        };
        assert_eq!(
            resolve_input("test query", &settings),
            Destination::Search("https://google.com/search?q=test%20query".to_string())
        );
    }

    #[test]
    fn test_parse_destination_rejects_garbage() {
        assert!(parse_destination("http://[::1").is_err());
        assert!(parse_destination("http://example.com").is_ok());
    }

    #[rstest]
    #[case(None, Target::Home)]
    #[case(Some("monkey-point://home"), Target::Home)]
    #[case(Some("  "), Target::Home)]
    #[case(Some("example.com"), Target::Url(Url::parse("http://example.com/").unwrap()))]
    #[case(Some("rust book"), Target::Url(Url::parse("https://duckduckgo.com/?q=rust%20book").unwrap()))]
    fn test_resolve_target(#[case] input: Option<&str>, #[case] expected: Target) {
        assert_eq!(resolve_target(input, &Settings::default()).unwrap(), expected);
    }

    #[test]
    fn test_launch_argument() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(launch_argument(&args(&["monkey-point"])), None);
        assert_eq!(
            launch_argument(&args(&["monkey-point", "--verbose", "example.com"])),
            Some("example.com")
        );
    }

    #[test]
    fn test_home_page_display() {
        let home = home();
        assert_eq!(home.display(Some(home.url())), HOME_SCHEME);
        assert_eq!(home.display(None), "");

        let other = Url::parse("https://example.com/").unwrap();
        assert!(!home.matches(&other));
        assert_eq!(home.display(Some(&other)), "https://example.com/");
    }

    #[test]
    fn test_relative_home_path_rejected() {
        assert!(HomePage::from_path("assets/welcome.html").is_err());
    }
}
