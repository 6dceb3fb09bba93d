//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings and the hard page cap
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Forum endpoints
    #[serde(default)]
    pub forum: ForumConfig,

    /// Listing page structure
    #[serde(default)]
    pub listing: ListingConfig,

    /// Export destinations
    #[serde(default)]
    pub output: OutputConfig,

    /// Progress and result line templates
    #[serde(default)]
    pub messages: Messages,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::validation("crawler.max_pages must be > 0"));
        }
        if self.forum.page_param.trim().is_empty() {
            return Err(AppError::validation("forum.page_param is empty"));
        }
        Url::parse(&self.forum.landing_url)
            .map_err(|e| AppError::validation(format!("forum.landing_url: {e}")))?;
        Url::parse(&self.forum.link_base)
            .map_err(|e| AppError::validation(format!("forum.link_base: {e}")))?;
        if self.output.text_file.trim().is_empty() {
            return Err(AppError::validation("output.text_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Upper bound on pages fetched in one run, whatever the stop policy
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_pages: defaults::max_pages(),
        }
    }
}

/// Where boards are discovered and how listing pages are addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumConfig {
    /// Landing page whose links name every class board
    #[serde(default = "defaults::landing_url")]
    pub landing_url: String,

    /// Origin prepended to relative board links
    #[serde(default = "defaults::link_base")]
    pub link_base: String,

    /// Query parameter carrying the page number
    #[serde(default = "defaults::page_param")]
    pub page_param: String,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            landing_url: defaults::landing_url(),
            link_base: defaults::link_base(),
            page_param: defaults::page_param(),
        }
    }
}

/// How rows are located on a listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    /// Any class-less `tr` is a candidate row
    Lenient,
    /// Rows must live inside the listing container
    #[default]
    Strict,
}

/// CSS selectors describing one listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub mode: ListingMode,

    /// Row selector in lenient mode
    #[serde(default = "defaults::row_selector")]
    pub row_selector: String,

    /// Listing table in strict mode
    #[serde(default = "defaults::container_selector")]
    pub container_selector: String,

    /// Rows inside the container in strict mode
    #[serde(default = "defaults::container_row_selector")]
    pub container_row_selector: String,

    /// Cell holding the post number (and the notice marker)
    #[serde(default = "defaults::number_cell_selector")]
    pub number_cell_selector: String,

    /// Post number inside the number cell
    #[serde(default = "defaults::number_selector")]
    pub number_selector: String,

    /// Element flagging a notice inside the number cell
    #[serde(default = "defaults::notice_marker_selector")]
    pub notice_marker_selector: String,

    /// Number cell texts that flag a notice
    #[serde(default = "defaults::notice_labels")]
    pub notice_labels: Vec<String>,

    /// Exclude notice rows from all counts
    #[serde(default = "defaults::enabled")]
    pub skip_notices: bool,

    /// Subject link
    #[serde(default = "defaults::title_selector")]
    pub title_selector: String,

    /// Decorations removed from the subject before reading its text
    #[serde(default = "defaults::title_strip_selector")]
    pub title_strip_selector: String,

    /// Author cell
    #[serde(default = "defaults::author_cell_selector")]
    pub author_cell_selector: String,

    /// Nickname inside the author cell
    #[serde(default = "defaults::author_name_selector")]
    pub author_name_selector: String,

    /// Posted date or time
    #[serde(default = "defaults::date_selector")]
    pub date_selector: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            mode: ListingMode::default(),
            row_selector: defaults::row_selector(),
            container_selector: defaults::container_selector(),
            container_row_selector: defaults::container_row_selector(),
            number_cell_selector: defaults::number_cell_selector(),
            number_selector: defaults::number_selector(),
            notice_marker_selector: defaults::notice_marker_selector(),
            notice_labels: defaults::notice_labels(),
            skip_notices: defaults::enabled(),
            title_selector: defaults::title_selector(),
            title_strip_selector: defaults::title_strip_selector(),
            author_cell_selector: defaults::author_cell_selector(),
            author_name_selector: defaults::author_name_selector(),
            date_selector: defaults::date_selector(),
        }
    }
}

/// Export destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving exported files
    #[serde(default = "defaults::output_dir")]
    pub dir: PathBuf,

    /// File name of the plain-text log dump
    #[serde(default = "defaults::text_file")]
    pub text_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            text_file: defaults::text_file(),
        }
    }
}

/// Report line templates.
///
/// Placeholders are written as `{name}` and substituted with `str::replace`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "defaults::msg_board_found")]
    pub board_found: String,
    #[serde(default = "defaults::msg_board_not_found")]
    pub board_not_found: String,
    #[serde(default = "defaults::msg_page_started")]
    pub page_started: String,
    #[serde(default = "defaults::msg_marked_post")]
    pub marked_post: String,
    #[serde(default = "defaults::msg_date_reached")]
    pub date_reached: String,
    #[serde(default = "defaults::msg_no_data")]
    pub no_data: String,
    #[serde(default = "defaults::msg_page_cap_reached")]
    pub page_cap_reached: String,
    #[serde(default = "defaults::msg_crawl_complete")]
    pub crawl_complete: String,
    #[serde(default = "defaults::msg_total_titles")]
    pub total_titles: String,
    #[serde(default = "defaults::msg_marked_titles")]
    pub marked_titles: String,
    #[serde(default = "defaults::msg_marked_on_date")]
    pub marked_on_date: String,
    #[serde(default = "defaults::msg_saved")]
    pub saved: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            board_found: defaults::msg_board_found(),
            board_not_found: defaults::msg_board_not_found(),
            page_started: defaults::msg_page_started(),
            marked_post: defaults::msg_marked_post(),
            date_reached: defaults::msg_date_reached(),
            no_data: defaults::msg_no_data(),
            page_cap_reached: defaults::msg_page_cap_reached(),
            crawl_complete: defaults::msg_crawl_complete(),
            total_titles: defaults::msg_total_titles(),
            marked_titles: defaults::msg_marked_titles(),
            marked_on_date: defaults::msg_marked_on_date(),
            saved: defaults::msg_saved(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; class-pulse/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_pages() -> u32 {
        500
    }

    // Forum defaults
    pub fn landing_url() -> String {
        "https://lostark.inven.co.kr/".into()
    }
    pub fn link_base() -> String {
        "https://www.inven.co.kr".into()
    }
    pub fn page_param() -> String {
        "p".into()
    }

    // Listing defaults
    pub fn row_selector() -> String {
        r#"tr:not([class]), tr[class=""]"#.into()
    }
    pub fn container_selector() -> String {
        "div.board-list table".into()
    }
    pub fn container_row_selector() -> String {
        "tbody tr".into()
    }
    pub fn number_cell_selector() -> String {
        "td.num".into()
    }
    pub fn number_selector() -> String {
        "span".into()
    }
    pub fn notice_marker_selector() -> String {
        ".notice".into()
    }
    pub fn notice_labels() -> Vec<String> {
        vec!["공지".into()]
    }
    pub fn enabled() -> bool {
        true
    }
    pub fn title_selector() -> String {
        "a.subject-link".into()
    }
    pub fn title_strip_selector() -> String {
        "span".into()
    }
    pub fn author_cell_selector() -> String {
        "td.user".into()
    }
    pub fn author_name_selector() -> String {
        "span.layerNickName".into()
    }
    pub fn date_selector() -> String {
        "span.date, td.date".into()
    }

    // Output defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from(".")
    }
    pub fn text_file() -> String {
        "crawl_results.txt".into()
    }

    // Message defaults
    pub fn msg_board_found() -> String {
        "게시판 주소: {url}".into()
    }
    pub fn msg_board_not_found() -> String {
        "해당 직업의 게시판을 찾을 수 없습니다.".into()
    }
    pub fn msg_page_started() -> String {
        "-----{page} 페이지 크롤링 중 -----".into()
    }
    pub fn msg_marked_post() -> String {
        "글 번호: {number} | 작성자: {author}\n제목: {title}".into()
    }
    pub fn msg_date_reached() -> String {
        "날짜가 지나면 크롤링을 종료합니다.".into()
    }
    pub fn msg_no_data() -> String {
        "데이터를 찾을 수 없습니다.".into()
    }
    pub fn msg_page_cap_reached() -> String {
        "최대 페이지 수({pages})에 도달하여 크롤링을 종료합니다.".into()
    }
    pub fn msg_crawl_complete() -> String {
        "========== 크롤링 완료 ==========".into()
    }
    pub fn msg_total_titles() -> String {
        "전체 글 제목의 개수: {count}".into()
    }
    pub fn msg_marked_titles() -> String {
        "이모티콘이 포함된 글 제목의 개수: {count}".into()
    }
    pub fn msg_marked_on_date() -> String {
        "{date}: {count}".into()
    }
    pub fn msg_saved() -> String {
        "결과가 {path} 파일에 저장되었습니다.".into()
    }
}
