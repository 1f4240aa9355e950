use crate::ui::event::{Caption, Effect, FocusTarget, LightboxContent};
use crate::utils::html::html_escape;
use serde::{Deserialize, Serialize};
use url::Url;

const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Modal image viewer. `content` is `None` exactly when the overlay is closed.
#[derive(Debug, Clone)]
pub struct Lightbox {
    content: Option<LightboxContent>,
    has_close: bool,
}

impl Lightbox {
    pub fn new(has_close: bool) -> Self {
        Self {
            content: None,
            has_close,
        }
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&LightboxContent> {
        self.content.as_ref()
    }

    /// Populate and reveal. Opening while open replaces the content in place.
    pub fn open(&mut self, content: LightboxContent) -> Vec<Effect> {
        let was_open = self.is_open();
        self.content = Some(content.clone());

        let mut effects = vec![Effect::SetLightbox {
            content: Some(content),
        }];
        if !was_open {
            effects.push(Effect::LockScroll { locked: true });
        }
        if self.has_close {
            effects.push(Effect::Focus {
                target: FocusTarget::LightboxClose,
            });
        }
        effects
    }

    pub fn close(&mut self) -> Vec<Effect> {
        if self.content.take().is_none() {
            return Vec::new();
        }
        vec![
            Effect::SetLightbox { content: None },
            Effect::LockScroll { locked: false },
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Certificate {
    pub fn lightbox_content(&self) -> Option<LightboxContent> {
        let src = self.image.clone()?;
        Some(LightboxContent {
            src,
            alt: self.alt.clone().unwrap_or_default(),
            caption: Caption::Text(self.title.clone().unwrap_or_default()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    /// Alternate image shown by the entry's view action.
    #[serde(default)]
    pub view_src: Option<String>,
    /// Explicit external page for the entry.
    #[serde(default)]
    pub external: Option<String>,
    /// First link found inside the entry.
    #[serde(default)]
    pub link: Option<String>,
}

impl JournalEntry {
    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn view_content(&self) -> LightboxContent {
        let title = self.title();
        if let Some(view_src) = self.view_src.as_deref().filter(|s| !s.is_empty()) {
            return LightboxContent {
                src: view_src.to_string(),
                alt: title.to_string(),
                caption: Caption::Text(title.to_string()),
            };
        }

        let body = self.paragraphs.join("\n\n");
        let caption = format!(
            "<div class=\"lightbox-title\">{}</div><div class=\"lightbox-date\">{}</div><div class=\"lightbox-body\">{}</div>",
            html_escape(title),
            html_escape(self.date.as_deref().unwrap_or("")),
            html_escape(&body)
        );

        LightboxContent {
            src: self.image.clone().unwrap_or_default(),
            alt: self.image_alt.clone().unwrap_or_default(),
            caption: Caption::Html(caption),
        }
    }

    /// Page opened by the entry's external action: its own link, else a web
    /// search for the title, else nothing.
    pub fn external_url(&self) -> Option<String> {
        let explicit = self
            .external
            .as_deref()
            .or(self.link.as_deref())
            .filter(|s| !s.is_empty());
        if let Some(url) = explicit {
            return Some(url.to_string());
        }

        let title = self.title();
        if title.is_empty() {
            return None;
        }
        let query = format!("{} company", title);
        Url::parse_with_params(SEARCH_ENDPOINT, &[("q", query.as_str())])
            .ok()
            .map(String::from)
    }
}
