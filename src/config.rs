use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main extraction configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    /// Static fetch timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Fall back to the page HTML when a WordPress API call fails
    #[serde(default = "default_wordpress_fallback")]
    pub wordpress_fallback: bool,
    /// Hosts that should use their browser-rendered variant
    #[serde(default)]
    pub render_hosts: Vec<String>,
    /// Browser launch settings
    #[serde(default)]
    pub render: RenderSettings,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout(),
            wordpress_fallback: default_wordpress_fallback(),
            render_hosts: Vec::new(),
            render: RenderSettings::default(),
        }
    }
}

/// Raw browser settings as read from file/environment
#[derive(Debug, Deserialize, Clone)]
pub struct RenderSettings {
    /// Use the packaged minimal Chromium (serverless deployments) instead of
    /// a locally installed Chrome
    #[serde(default)]
    pub packaged: bool,
    /// Path of the packaged Chromium binary
    #[serde(default = "default_packaged_executable")]
    pub packaged_executable: PathBuf,
    /// Override for the local Chrome binary
    #[serde(default)]
    pub executable: Option<PathBuf>,
    /// Upper bound for navigation plus marker wait; 0 disables it
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,
    /// Show the browser window of a local Chrome, for debugging
    #[serde(default)]
    pub headed: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            packaged: false,
            packaged_executable: default_packaged_executable(),
            executable: None,
            navigation_timeout_secs: default_navigation_timeout(),
            headed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headless {
    /// Chrome's current headless implementation
    New,
    /// The old headless shell, the only mode the packaged build supports
    Legacy,
    /// Visible window, for debugging
    Off,
}

/// Browser launch options, fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub executable_path: Option<PathBuf>,
    pub launch_args: Vec<String>,
    pub headless_mode: Headless,
    pub navigation_timeout: Option<Duration>,
}

const MINIMAL_ARGS: &[&str] = &[
    "--autoplay-policy=user-gesture-required",
    "--disable-background-networking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-client-side-phishing-detection",
    "--disable-component-update",
    "--disable-default-apps",
    "--disable-dev-shm-usage",
    "--disable-domain-reliability",
    "--disable-extensions",
    "--disable-features=AudioServiceOutOfProcess",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-notifications",
    "--disable-offer-store-unmasked-wallet-cards",
    "--disable-popup-blocking",
    "--disable-print-preview",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-setuid-sandbox",
    "--disable-speech-api",
    "--disable-sync",
    "--hide-scrollbars",
    "--ignore-gpu-blacklist",
    "--metrics-recording-only",
    "--mute-audio",
    "--no-default-browser-check",
    "--no-first-run",
    "--no-pings",
    "--no-sandbox",
    "--no-zygote",
    "--password-store=basic",
    "--use-gl=swiftshader",
    "--use-mock-keychain",
];

const PACKAGED_ARGS: &[&str] = &[
    "--allow-pre-commit-input",
    "--disable-background-networking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-client-side-phishing-detection",
    "--disable-component-extensions-with-background-pages",
    "--disable-component-update",
    "--disable-default-apps",
    "--disable-dev-shm-usage",
    "--disable-extensions",
    "--disable-hang-monitor",
    "--disable-ipc-flooding-protection",
    "--disable-popup-blocking",
    "--disable-prompt-on-repost",
    "--disable-renderer-backgrounding",
    "--disable-sync",
    "--disable-setuid-sandbox",
    "--disk-cache-size=33554432",
    "--ignore-certificate-errors",
    "--in-process-gpu",
    "--metrics-recording-only",
    "--mute-audio",
    "--no-first-run",
    "--no-sandbox",
    "--no-zygote",
    "--password-store=basic",
    "--single-process",
    "--use-gl=angle",
    "--use-angle=swiftshader",
    "--use-mock-keychain",
    "--window-size=1920,1080",
];

// Default value functions
fn default_timeout() -> u64 {
    10_000
}

fn default_wordpress_fallback() -> bool {
    true
}

fn default_packaged_executable() -> PathBuf {
    PathBuf::from("/opt/chromium/chromium")
}

fn default_navigation_timeout() -> u64 {
    60
}

fn local_chrome_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome")
    } else {
        PathBuf::from("/usr/bin/google-chrome")
    }
}

impl ExtractConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Replace the static fetch timeout, keeping sub-second precision
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        self
    }

    /// Whether `host` was asked to use its rendered variant
    pub fn renders(&self, host: &str) -> bool {
        self.render_hosts
            .iter()
            .any(|h| h.trim().eq_ignore_ascii_case(host))
    }

    pub fn render_config(&self) -> RenderConfig {
        self.render.to_render_config()
    }
}

impl RenderSettings {
    pub fn to_render_config(&self) -> RenderConfig {
        let navigation_timeout = match self.navigation_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        if self.packaged {
            RenderConfig {
                executable_path: Some(self.packaged_executable.clone()),
                launch_args: PACKAGED_ARGS.iter().map(|a| a.to_string()).collect(),
                headless_mode: Headless::Legacy,
                navigation_timeout,
            }
        } else {
            RenderConfig {
                executable_path: Some(
                    self.executable.clone().unwrap_or_else(local_chrome_path),
                ),
                launch_args: MINIMAL_ARGS.iter().map(|a| a.to_string()).collect(),
                headless_mode: if self.headed {
                    Headless::Off
                } else {
                    Headless::New
                },
                navigation_timeout,
            }
        }
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_INGREDIENTS__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_INGREDIENTS__RENDER__PACKAGED=true
pub fn load_config() -> Result<ExtractConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_INGREDIENTS__RENDER__PACKAGED
        .add_source(
            Environment::with_prefix("RECIPE_INGREDIENTS")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("render_hosts")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
