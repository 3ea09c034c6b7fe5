use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for pet-crossref
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceEntry>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    format!("pet-crossref/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Report output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the report; stdout when absent
    #[serde(default)]
    pub path: Option<String>,

    /// Report format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Markdown,
    Json,
}

/// One rescue site and the pages to crawl on it
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    /// Base address of the site, e.g. "https://www.example.org"
    pub site: String,

    /// Paths to fetch, appended verbatim to `site`
    pub pages: Vec<String>,

    /// Extra request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// How pet ids are pulled out of each page body
    pub extractor: ExtractorConfig,
}

/// Extraction strategy selector
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExtractorConfig {
    /// Regex with a link capture and an id capture
    Pattern { pattern: String },

    /// JSON document addressed by JSON pointers
    Structured {
        #[serde(rename = "animals-pointer", default = "default_animals_pointer")]
        animals_pointer: String,
        #[serde(rename = "id-pointer", default = "default_id_pointer")]
        id_pointer: String,
        #[serde(rename = "link-pointer", default = "default_link_pointer")]
        link_pointer: String,
    },

    /// CSS selector over the parsed HTML document
    Selector {
        selector: String,
        #[serde(rename = "link-attr", default = "default_link_attr")]
        link_attr: String,
        #[serde(rename = "id-pattern")]
        id_pattern: String,
    },
}

fn default_animals_pointer() -> String {
    "/result/animals".to_string()
}

fn default_id_pointer() -> String {
    "/animal/organization_animal_identifier".to_string()
}

fn default_link_pointer() -> String {
    "/animal/social_sharing/email_url".to_string()
}

fn default_link_attr() -> String {
    "href".to_string()
}
