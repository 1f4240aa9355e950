use crate::ui::carousel::DEFAULT_INTERVAL_MS;
use crate::ui::header::{DEFAULT_HIDE_OFFSET, DEFAULT_SCROLL_THRESHOLD};
use crate::ui::lightbox::{Certificate, JournalEntry};
use crate::ui::nav::{DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declarative description of a page's interactive elements.
///
/// An absent table means the element is missing from the markup, which
/// disables the feature that depends on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub header: Option<HeaderConfig>,
    #[serde(default)]
    pub menu: Option<MenuConfig>,
    #[serde(default)]
    pub nav: NavConfig,
    /// Ids of `main > section[id]` elements, in document order.
    #[serde(default)]
    pub sections: Vec<String>,
    /// Other element ids that deep links may target.
    #[serde(default)]
    pub elements: Vec<String>,
    #[serde(default)]
    pub footer_year: bool,
    #[serde(default)]
    pub carousel: Option<CarouselConfig>,
    #[serde(default)]
    pub lightbox: Option<LightboxConfig>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub gallery: Option<GalleryConfig>,
    #[serde(default)]
    pub observer: ObserverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
    #[serde(default)]
    pub hide_offset: f64,
    /// Scroll position when the page loaded.
    #[serde(default)]
    pub initial_y: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            hide_offset: DEFAULT_HIDE_OFFSET,
            initial_y: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Whether the toggle button exists.
    #[serde(default = "default_true")]
    pub toggle: bool,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub slides: usize,
    #[serde(default = "default_anchor")]
    pub anchor: String,
    #[serde(default = "default_true")]
    pub prev: bool,
    #[serde(default = "default_true")]
    pub next: bool,
    #[serde(default = "default_true")]
    pub dots: bool,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightboxConfig {
    #[serde(default = "default_true")]
    pub close_control: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_gallery_page")]
    pub page: String,
    #[serde(default = "default_gallery_link_ids")]
    pub link_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverConfig {
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_scroll_threshold() -> f64 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_anchor() -> String {
    "Experience".to_string()
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_gallery_page() -> String {
    "gallery.html".to_string()
}

fn default_gallery_link_ids() -> Vec<String> {
    vec!["gallery-link".to_string(), "mobile-gallery-link".to_string()]
}

fn default_root_margin() -> String {
    DEFAULT_ROOT_MARGIN.to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl PageConfig {
    /// 從 TOML 檔案載入頁面描述
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Ids of every element a link or deep link may target.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .chain(self.elements.iter())
            .chain(self.carousel.iter().map(|c| &c.anchor))
            .map(String::as_str)
    }
}

impl Validate for PageConfig {
    fn validate(&self) -> Result<()> {
        validate_range("observer.threshold", self.observer.threshold, 0.0, 1.0)?;

        if let Some(header) = &self.header {
            validate_range("header.scroll_threshold", header.scroll_threshold, 0.0, f64::MAX)?;
        }

        if let Some(carousel) = &self.carousel {
            validate_positive_number("carousel.interval_ms", carousel.interval_ms, 1)?;
            validate_non_empty_string("carousel.anchor", &carousel.anchor)?;
        }

        if let Some(gallery) = &self.gallery {
            validate_non_empty_string("gallery.page", &gallery.page)?;
        }

        Ok(())
    }
}
