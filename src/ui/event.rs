//! Events flowing into the interaction controller and effects flowing out.
//!
//! A surface (browser binding, test recorder, CLI printer) translates DOM
//! events into [`UiEvent`]s and applies the returned [`Effect`]s to the page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Document finished loading, with the location hash at that moment.
    Ready { hash: String },
    Click { target: Target },
    Key { key: Key, focus: FocusContext },
    Scroll { y: f64 },
    Wheel { delta_y: f64 },
    TouchMove { y: f64 },
    AnimationFrame,
    Intersection {
        section: String,
        intersecting: bool,
        ratio: f64,
    },
    HashChange { hash: String },
    PointerEnter { region: Region },
    PointerLeave { region: Region },
    TimerTick { timer: TimerId },
    JumpToSlide { request: SlideRequest },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    MenuToggle,
    Link(LinkTarget),
    CarouselPrev,
    CarouselNext,
    CarouselDot { index: usize },
    CertificateImage { index: usize },
    CertificateCard { index: usize },
    JournalView { index: usize },
    JournalExternal { index: usize },
    LightboxClose,
    /// The dimmed backdrop itself, not the image or caption inside it.
    LightboxOverlay,
}

/// An anchor element that was clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub area: LinkArea,
    pub href: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Value of a `data-slide` attribute, if any.
    #[serde(default)]
    pub slide: Option<String>,
}

impl LinkTarget {
    pub fn new(area: LinkArea, href: impl Into<String>) -> Self {
        Self {
            area,
            href: href.into(),
            id: None,
            slide: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_slide(mut self, slide: impl Into<String>) -> Self {
        self.slide = Some(slide.into());
        self
    }

    pub fn is_in_page(&self) -> bool {
        self.href.starts_with('#') && self.href != "#"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkArea {
    MainNav,
    MobileNav,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

/// What kind of element had focus when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusContext {
    Input,
    TextArea,
    #[default]
    Other,
}

impl FocusContext {
    pub fn is_text_entry(self) -> bool {
        matches!(self, FocusContext::Input | FocusContext::TextArea)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Carousel,
}

/// Generation number of a repeating timer. Ticks from older generations are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// A request to jump to a carousel slide, from a link attribute or another page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideRequest {
    Index(i64),
    Text(String),
}

impl SlideRequest {
    pub fn resolve(&self) -> i64 {
        match self {
            SlideRequest::Index(index) => *index,
            SlideRequest::Text(text) => super::deep_link::parse_slide_index(text),
        }
    }
}

impl From<i64> for SlideRequest {
    fn from(index: i64) -> Self {
        SlideRequest::Index(index)
    }
}

impl From<i32> for SlideRequest {
    fn from(index: i32) -> Self {
        SlideRequest::Index(i64::from(index))
    }
}

impl From<usize> for SlideRequest {
    fn from(index: usize) -> Self {
        SlideRequest::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for SlideRequest {
    fn from(text: &str) -> Self {
        SlideRequest::Text(text.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    FirstMenuLink,
    MenuToggle,
    LightboxClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderState {
    #[default]
    Shown,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", content = "body", rename_all = "snake_case")]
pub enum Caption {
    Text(String),
    /// Markup assembled from already-escaped text.
    Html(String),
}

impl Caption {
    pub fn as_str(&self) -> &str {
        match self {
            Caption::Text(s) | Caption::Html(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightboxContent {
    pub src: String,
    pub alt: String,
    pub caption: Caption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Toggle the menu's `open` class, `aria-hidden` on the menu and
    /// `aria-expanded` on the toggle.
    SetMenu { open: bool },
    Focus { target: FocusTarget },
    SetActiveLink { href: Option<String> },
    SetHeader { state: HeaderState },
    ShowSlide { index: usize },
    SetLightbox { content: Option<LightboxContent> },
    LockScroll { locked: bool },
    ScrollIntoView { element: String, delay_ms: u64 },
    OpenWindow { url: String },
    Navigate { url: String },
    PreventDefault,
    RequestFrame,
    StartTimer { timer: TimerId, period_ms: u64 },
    CancelTimer { timer: TimerId },
    ObserveSections {
        sections: Vec<String>,
        root_margin: String,
        threshold: f64,
    },
    SetFooterYear { year: i32 },
}
