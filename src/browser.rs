//! Opening cataloged links in a system browser
//!
//! Thin collaborator around the platform opener. URLs are checked for an
//! openable scheme and host before anything is spawned; a failed launch is
//! reported per URL and never takes the process down.

use url::Url;

use crate::core::error::{DokkupError, Result};

use std::process::Command;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BrowserOpener {
    /// Browser binary to use; `None` means the platform default opener
    preferred: Option<String>,
    /// Pause between consecutive opens so the browser keeps up
    open_delay: Duration,
    /// Cap on how many links one `open_many` call may launch
    max_opens: usize,
}

impl BrowserOpener {
    pub fn new(preferred: Option<String>, open_delay_ms: u64, max_opens: usize) -> Self {
        Self {
            preferred,
            open_delay: Duration::from_millis(open_delay_ms),
            max_opens,
        }
    }

    /// Open one URL in the configured browser.
    pub fn open_url(&self, url: &str) -> Result<()> {
        validate_openable(url)?;

        let (program, args) = self.launcher(url);
        Command::new(&program)
            .args(&args)
            .spawn()
            .map(|_| ())
            .map_err(|err| {
                DokkupError::Browser(format!("Could not launch '{program}' for {url}: {err}"))
            })
    }

    /// Open several URLs, pausing between launches. Returns how many opened
    /// successfully; failures are logged and skipped.
    pub fn open_many(&self, urls: &[&str]) -> usize {
        let capped = if urls.len() > self.max_opens {
            log::warn!(
                "Opening only the first {} of {} link(s)",
                self.max_opens,
                urls.len()
            );
            &urls[..self.max_opens]
        } else {
            urls
        };

        let mut opened = 0;
        for (position, url) in capped.iter().enumerate() {
            if position > 0 {
                thread::sleep(self.open_delay);
            }
            match self.open_url(url) {
                Ok(()) => opened += 1,
                Err(err) => log::error!("{err}"),
            }
        }
        opened
    }

    /// The command line used to open `url`, separated from spawning so the
    /// selection logic is testable.
    fn launcher(&self, url: &str) -> (String, Vec<String>) {
        if let Some(browser) = &self.preferred {
            return (browser.clone(), vec![url.to_string()]);
        }

        if cfg!(target_os = "macos") {
            ("open".to_string(), vec![url.to_string()])
        } else if cfg!(target_os = "windows") {
            (
                "cmd".to_string(),
                vec![
                    "/C".to_string(),
                    "start".to_string(),
                    String::new(),
                    url.to_string(),
                ],
            )
        } else {
            ("xdg-open".to_string(), vec![url.to_string()])
        }
    }
}

impl Default for BrowserOpener {
    fn default() -> Self {
        use crate::core::constants::browser;
        Self::new(
            None,
            browser::DEFAULT_OPEN_DELAY_MS,
            browser::DEFAULT_MAX_CONCURRENT_OPENS,
        )
    }
}

/// Only well-formed http(s) URLs with a host ever reach a spawn call.
fn validate_openable(url: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|err| DokkupError::Browser(format!("Refusing to open '{url}': {err}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(DokkupError::Browser(format!(
            "Refusing to open '{url}': scheme '{}' is not http(s)",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(DokkupError::Browser(format!(
            "Refusing to open '{url}': URL has no host"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_validate_openable__accepts_http_and_https() {
        assert!(validate_openable("http://example.com").is_ok());
        assert!(validate_openable("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_validate_openable__rejects_other_schemes() {
        let result = validate_openable("ftp://example.com");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not http(s)"));

        assert!(validate_openable("file:///etc/passwd").is_err());
        assert!(validate_openable("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_validate_openable__rejects_missing_host() {
        assert!(validate_openable("http://").is_err());
        assert!(validate_openable("not a url at all").is_err());
    }

    #[test]
    fn test_launcher__uses_preferred_browser_when_set() {
        let opener = BrowserOpener::new(Some("firefox".to_string()), 0, 10);
        let (program, args) = opener.launcher("https://example.com");

        assert_eq!(program, "firefox");
        assert_eq!(args, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_launcher__platform_default() {
        let opener = BrowserOpener::new(None, 0, 10);
        let (program, args) = opener.launcher("https://example.com");

        if cfg!(target_os = "macos") {
            assert_eq!(program, "open");
        } else if cfg!(target_os = "windows") {
            assert_eq!(program, "cmd");
        } else {
            assert_eq!(program, "xdg-open");
        }
        assert!(args.contains(&"https://example.com".to_string()));
    }

    #[test]
    fn test_open_many__invalid_urls_are_skipped_not_fatal() {
        let opener = BrowserOpener::new(None, 0, 10);
        // None of these pass validation, so nothing is spawned
        let opened = opener.open_many(&["ftp://a.example", "http://", "nonsense"]);
        assert_eq!(opened, 0);
    }

    #[test]
    fn test_open_many__caps_at_max_opens() {
        let opener = BrowserOpener::new(None, 0, 2);
        // Invalid on purpose: the cap is applied before any launch attempt
        let opened = opener.open_many(&["ftp://a", "ftp://b", "ftp://c", "ftp://d"]);
        assert_eq!(opened, 0);
    }
}
