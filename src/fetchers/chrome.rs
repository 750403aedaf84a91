use super::{FetchedPage, Fetcher};
use crate::config::{Headless, RenderConfig};
use crate::error::FetchError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams,
};
use chromiumoxide::cdp::browser_protocol::network::ErrorReason;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use log::{debug, warn};
use std::time::Duration;

const MARKER_POLL_INTERVAL: Duration = Duration::from_millis(100);
const MARKER_TIMEOUT: Duration = Duration::from_secs(30);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const NAVIGATION_STATUS_JS: &str =
    "performance.getEntriesByType('navigation')[0]?.responseStatus ?? 0";

fn browser_error(err: impl std::fmt::Display) -> FetchError {
    FetchError::Browser(err.to_string())
}

/// Renders the page in a headless Chrome before reading it.
///
/// Every call launches its own browser and closes it before returning,
/// whatever the outcome. Only the request for the target URL itself is
/// allowed through; scripts, images and trackers are aborted. Once the
/// `wait_for` element exists its live outer HTML becomes the fetched body.
///
/// The marker is serialized with `outerHTML` and parsed again by the site
/// adapter, so the same adapter reads static and rendered pages.
pub struct ChromeFetcher {
    config: RenderConfig,
    wait_for: String,
}

impl ChromeFetcher {
    pub fn new(config: RenderConfig, wait_for: impl Into<String>) -> Self {
        Self {
            config,
            wait_for: wait_for.into(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, FetchError> {
        let mode = match self.config.headless_mode {
            Headless::New => HeadlessMode::New,
            Headless::Legacy => HeadlessMode::True,
            Headless::Off => HeadlessMode::False,
        };

        let mut builder = BrowserConfig::builder()
            .headless_mode(mode)
            .args(self.config.launch_args.iter());
        if let Some(path) = &self.config.executable_path {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(FetchError::Browser)
    }

    async fn render(&self, browser: &Browser, url: &str) -> Result<FetchedPage, FetchError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(browser_error)?;

        let mut paused = page
            .event_listener::<EventRequestPaused>()
            .await
            .map_err(browser_error)?;
        page.execute(EnableParams::default())
            .await
            .map_err(browser_error)?;

        let interceptor = page.clone();
        let target = url.to_string();
        let intercept_task = tokio::spawn(async move {
            while let Some(event) = paused.next().await {
                let outcome = if event.request.url == target {
                    interceptor
                        .execute(ContinueRequestParams::new(event.request_id.clone()))
                        .await
                        .map(|_| ())
                } else {
                    interceptor
                        .execute(FailRequestParams::new(
                            event.request_id.clone(),
                            ErrorReason::BlockedByClient,
                        ))
                        .await
                        .map(|_| ())
                };
                if let Err(err) = outcome {
                    debug!("Interception of {} failed: {}", event.request.url, err);
                }
            }
        });

        let result = self.read_marker(&page, url).await;

        intercept_task.abort();
        if let Err(err) = page.close().await {
            debug!("Closing page for {} failed: {}", url, err);
        }
        result
    }

    async fn read_marker(&self, page: &Page, url: &str) -> Result<FetchedPage, FetchError> {
        page.goto(url)
            .await
            .map_err(|e| FetchError::Navigation(format!("{url}: {e}")))?;

        if navigation_status(page).await == Some(403) {
            return Err(FetchError::Blocked(url.to_string()));
        }

        let marker = tokio::time::timeout(MARKER_TIMEOUT, wait_for_element(page, &self.wait_for))
            .await
            .map_err(|_| {
                FetchError::Timeout(format!("{} never appeared on {}", self.wait_for, url))
            })?;

        let body = marker
            .outer_html()
            .await
            .map_err(browser_error)?
            .unwrap_or_default();

        Ok(FetchedPage {
            url: url.to_string(),
            body,
        })
    }
}

async fn navigation_status(page: &Page) -> Option<u16> {
    page.evaluate(NAVIGATION_STATUS_JS)
        .await
        .ok()?
        .into_value::<u16>()
        .ok()
}

async fn wait_for_element(page: &Page, selector: &str) -> Element {
    loop {
        if let Ok(element) = page.find_element(selector).await {
            return element;
        }
        tokio::time::sleep(MARKER_POLL_INTERVAL).await;
    }
}

/// Process control needed to tear a browser down.
#[async_trait]
trait BrowserProcess: Send {
    async fn close(&mut self) -> Result<(), String>;
    async fn wait(&mut self) -> Result<(), String>;
    async fn kill(&mut self) -> Result<(), String>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn close(&mut self) -> Result<(), String> {
        Browser::close(self).await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn wait(&mut self) -> Result<(), String> {
        Browser::wait(self).await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn kill(&mut self) -> Result<(), String> {
        match Browser::kill(self).await {
            Some(Err(err)) => Err(err.to_string()),
            _ => Ok(()),
        }
    }
}

/// Ask the browser to close and wait for it to exit, each step bounded by
/// `grace`. The process is killed when either step fails or runs over.
async fn release<B: BrowserProcess>(browser: &mut B, grace: Duration) {
    let closed = match tokio::time::timeout(grace, browser.close()).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            warn!("Failed to close browser: {}", err);
            false
        }
        Err(_) => {
            warn!("Browser did not acknowledge close within {}s", grace.as_secs());
            false
        }
    };

    if closed {
        match tokio::time::timeout(grace, browser.wait()).await {
            Ok(Ok(())) => return,
            Ok(Err(err)) => warn!("Failed to wait for browser exit: {}", err),
            Err(_) => warn!("Browser still running {}s after close", grace.as_secs()),
        }
    }

    debug!("Killing browser process");
    if let Err(err) = browser.kill().await {
        warn!("Failed to kill browser: {}", err);
    }
}

#[async_trait]
impl Fetcher for ChromeFetcher {
    fn name(&self) -> &'static str {
        "chrome"
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(browser_error)?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let result = match self.config.navigation_timeout {
            Some(limit) => tokio::time::timeout(limit, self.render(&browser, url))
                .await
                .unwrap_or_else(|_| {
                    Err(FetchError::Timeout(format!(
                        "rendering {} took longer than {}s",
                        url,
                        limit.as_secs()
                    )))
                }),
            None => self.render(&browser, url).await,
        };

        // Release the browser on every path, including timeouts and errors.
        release(&mut browser, SHUTDOWN_TIMEOUT).await;
        handler_task.abort();

        result
    }
}
