use crate::config::page::{GalleryConfig, PageConfig};
use crate::ui::carousel::{Carousel, SlideLink};
use crate::ui::deep_link::parse_hash;
use crate::ui::event::{
    Effect, FocusContext, HeaderState, Key, LightboxContent, LinkArea, LinkTarget, Region,
    SlideRequest, Target, UiEvent,
};
use crate::ui::header::HeaderVisibility;
use crate::ui::lightbox::{Certificate, JournalEntry, Lightbox};
use crate::ui::nav::{ActiveNav, MobileMenu};
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashSet;
use tokio::sync::mpsc;

/// Delay before scrolling to a deep-link target, giving the header time to settle.
pub const DEEP_LINK_SCROLL_DELAY_MS: u64 = 50;

/// Owns every interactive feature of a page and turns [`UiEvent`]s into
/// [`Effect`]s.
///
/// Each feature is built only if the page has the elements it needs. A
/// missing feature ignores its events; no feature depends on another being
/// present.
pub struct InteractionController {
    menu: Option<MobileMenu>,
    active_nav: Option<ActiveNav>,
    main_links: Vec<String>,
    mobile_links: Vec<String>,
    header: Option<HeaderVisibility>,
    carousel: Option<Carousel>,
    dots: bool,
    lightbox: Option<Lightbox>,
    certificates: Vec<Certificate>,
    journal: Vec<JournalEntry>,
    gallery: Option<GalleryConfig>,
    footer_year: bool,
    elements: HashSet<String>,
    slide_link: SlideLink,
    link_inbox: Option<mpsc::UnboundedReceiver<SlideRequest>>,
}

/// Observable page state, the way the DOM would show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub menu_open: bool,
    pub active_link: Option<String>,
    /// Indices into the main nav links carrying the active marker.
    pub active_main_links: Vec<usize>,
    pub active_mobile_links: Vec<usize>,
    pub header: HeaderState,
    pub slide: Option<usize>,
    pub lightbox: Option<LightboxContent>,
    pub scroll_locked: bool,
}

impl ViewState {
    pub fn toggle_aria_expanded(&self) -> &'static str {
        if self.menu_open {
            "true"
        } else {
            "false"
        }
    }

    pub fn menu_aria_hidden(&self) -> &'static str {
        if self.menu_open {
            "false"
        } else {
            "true"
        }
    }

    pub fn lightbox_src(&self) -> &str {
        self.lightbox.as_ref().map(|c| c.src.as_str()).unwrap_or("")
    }

    pub fn lightbox_alt(&self) -> &str {
        self.lightbox.as_ref().map(|c| c.alt.as_str()).unwrap_or("")
    }

    pub fn lightbox_caption(&self) -> &str {
        self.lightbox
            .as_ref()
            .map(|c| c.caption.as_str())
            .unwrap_or("")
    }
}

impl InteractionController {
    pub fn from_page(page: &PageConfig) -> Self {
        let menu = page
            .menu
            .as_ref()
            .map(|m| MobileMenu::new(m.toggle, !m.links.is_empty()));

        let active_nav = (!page.sections.is_empty()).then(|| {
            ActiveNav::new(
                page.sections.clone(),
                page.observer.root_margin.clone(),
                page.observer.threshold,
            )
        });

        let header = page
            .header
            .as_ref()
            .map(|h| HeaderVisibility::new(h.initial_y, h.scroll_threshold, h.hide_offset));

        let carousel = page.carousel.as_ref().and_then(|c| {
            Carousel::new(c.slides, c.interval_ms, c.anchor.clone())
                .map(|carousel| carousel.with_buttons(c.prev, c.next))
        });

        let (slide_link, link_inbox) = if carousel.is_some() {
            let (link, inbox) = SlideLink::channel();
            (link, Some(inbox))
        } else {
            (SlideLink::disconnected(), None)
        };

        let elements: HashSet<String> = page.element_ids().map(str::to_string).collect();

        let controller = Self {
            menu,
            active_nav,
            main_links: page.nav.links.clone(),
            mobile_links: page
                .menu
                .as_ref()
                .map(|m| m.links.clone())
                .unwrap_or_default(),
            header,
            dots: page.carousel.as_ref().is_some_and(|c| c.dots),
            carousel,
            lightbox: page
                .lightbox
                .as_ref()
                .map(|l| Lightbox::new(l.close_control)),
            certificates: page.certificates.clone(),
            journal: page.journal.clone(),
            gallery: page.gallery.clone(),
            footer_year: page.footer_year,
            elements,
            slide_link,
            link_inbox,
        };

        for (feature, enabled) in controller.features() {
            if !enabled {
                tracing::debug!("Feature '{}' disabled: required elements missing", feature);
            }
        }
        controller
    }

    /// Which features were built for this page.
    pub fn features(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("menu", self.menu.as_ref().is_some_and(|m| m.can_toggle())),
            ("active_nav", self.active_nav.is_some()),
            ("header", self.header.is_some()),
            ("carousel", self.carousel.is_some()),
            ("lightbox", self.lightbox.is_some()),
            ("gallery_links", self.gallery.is_some()),
            ("footer_year", self.footer_year),
        ]
    }

    /// Handle for jumping to a carousel slide from outside the page.
    pub fn slide_link(&self) -> SlideLink {
        self.slide_link.clone()
    }

    /// Hand the slide-link inbox to a driver that wants to await it directly.
    /// Afterwards requests must arrive as [`UiEvent::JumpToSlide`].
    pub fn take_link_inbox(&mut self) -> Option<mpsc::UnboundedReceiver<SlideRequest>> {
        self.link_inbox.take()
    }

    pub fn view(&self) -> ViewState {
        let active_link = self
            .active_nav
            .as_ref()
            .and_then(|n| n.active())
            .map(str::to_string);
        let matching = |links: &[String]| -> Vec<usize> {
            links
                .iter()
                .enumerate()
                .filter(|(_, href)| Some(href.as_str()) == active_link.as_deref())
                .map(|(i, _)| i)
                .collect()
        };

        ViewState {
            menu_open: self.menu_open(),
            active_main_links: matching(&self.main_links),
            active_mobile_links: matching(&self.mobile_links),
            active_link: active_link.clone(),
            header: self
                .header
                .as_ref()
                .map(|h| h.state())
                .unwrap_or_default(),
            slide: self.carousel.as_ref().map(|c| c.current()),
            lightbox: self.lightbox.as_ref().and_then(|l| l.content().cloned()),
            scroll_locked: self.lightbox.as_ref().is_some_and(|l| l.is_open()),
        }
    }

    fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(|m| m.is_open())
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        let mut effects = self.drain_slide_requests();

        match event {
            UiEvent::Ready { hash } => effects.extend(self.on_ready(&hash)),
            UiEvent::Click { target } => effects.extend(self.on_click(target)),
            UiEvent::Key { key, focus } => effects.extend(self.on_key(key, focus)),
            UiEvent::Scroll { y } => {
                let menu_open = self.menu_open();
                if let Some(header) = &mut self.header {
                    effects.extend(header.on_scroll(y, menu_open));
                }
            }
            UiEvent::Wheel { delta_y } => {
                let menu_open = self.menu_open();
                if let Some(header) = &mut self.header {
                    effects.extend(header.on_wheel(delta_y, menu_open));
                }
            }
            UiEvent::TouchMove { y } => {
                let menu_open = self.menu_open();
                if let Some(header) = &mut self.header {
                    effects.extend(header.on_touch_move(y, menu_open));
                }
            }
            UiEvent::AnimationFrame => {
                let menu_open = self.menu_open();
                if let Some(header) = &mut self.header {
                    effects.extend(header.on_frame(menu_open));
                }
            }
            UiEvent::Intersection {
                section,
                intersecting,
                ratio,
            } => {
                if let Some(nav) = &mut self.active_nav {
                    effects.extend(nav.on_intersection(&section, intersecting, ratio));
                }
            }
            UiEvent::HashChange { hash } => effects.extend(self.reveal(&hash)),
            UiEvent::PointerEnter {
                region: Region::Carousel,
            } => {
                if let Some(carousel) = &mut self.carousel {
                    effects.extend(carousel.pointer_enter());
                }
            }
            UiEvent::PointerLeave {
                region: Region::Carousel,
            } => {
                if let Some(carousel) = &mut self.carousel {
                    effects.extend(carousel.pointer_leave());
                }
            }
            UiEvent::TimerTick { timer } => {
                if let Some(carousel) = &mut self.carousel {
                    effects.extend(carousel.on_tick(timer));
                }
            }
            UiEvent::JumpToSlide { request } => effects.extend(self.jump_to_slide(&request)),
        }

        effects
    }

    fn drain_slide_requests(&mut self) -> Vec<Effect> {
        let mut requests = Vec::new();
        if let Some(inbox) = &mut self.link_inbox {
            while let Ok(request) = inbox.try_recv() {
                requests.push(request);
            }
        }
        requests
            .iter()
            .flat_map(|request| self.jump_to_slide(request))
            .collect()
    }

    fn jump_to_slide(&mut self, request: &SlideRequest) -> Vec<Effect> {
        match &mut self.carousel {
            Some(carousel) => carousel.jump(request.resolve()),
            None => Vec::new(),
        }
    }

    fn on_ready(&mut self, hash: &str) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.footer_year {
            effects.push(Effect::SetFooterYear {
                year: chrono::Local::now().year(),
            });
        }
        if let Some(menu) = &mut self.menu {
            effects.extend(menu.reset());
        }
        if let Some(nav) = &self.active_nav {
            effects.push(nav.observe());
        }
        if let Some(carousel) = &mut self.carousel {
            effects.extend(carousel.init());
        }

        effects.extend(self.reveal(hash));
        effects
    }

    /// Scroll a deep-link target into view, opening the carousel when the
    /// hash names its section.
    fn reveal(&mut self, hash: &str) -> Vec<Effect> {
        let Some(id) = parse_hash(hash) else {
            if !hash.is_empty() {
                tracing::debug!("Ignoring deep link with invalid selector: {:?}", hash);
            }
            return Vec::new();
        };

        let mut effects = Vec::new();
        if self.elements.contains(id) {
            if let Some(header) = &mut self.header {
                effects.extend(header.show());
            }
            effects.push(Effect::ScrollIntoView {
                element: id.to_string(),
                delay_ms: DEEP_LINK_SCROLL_DELAY_MS,
            });
        }

        if let Some(carousel) = &mut self.carousel {
            if carousel.anchor() == id {
                effects.extend(carousel.jump(0));
            }
        }
        effects
    }

    fn on_click(&mut self, target: Target) -> Vec<Effect> {
        match target {
            Target::MenuToggle => {
                let Some(menu) = &mut self.menu else {
                    return Vec::new();
                };
                let mut effects = menu.toggle();
                if menu.is_open() {
                    if let Some(header) = &mut self.header {
                        effects.extend(header.show());
                    }
                }
                effects
            }
            Target::Link(link) => self.on_link(link),
            Target::CarouselPrev => self.carousel_button(-1),
            Target::CarouselNext => self.carousel_button(1),
            Target::CarouselDot { index } => match &mut self.carousel {
                Some(carousel) if self.dots && index < carousel.len() => {
                    carousel.go_to(index as i64)
                }
                _ => Vec::new(),
            },
            Target::CertificateImage { index } | Target::CertificateCard { index } => {
                let content = self
                    .certificates
                    .get(index)
                    .and_then(Certificate::lightbox_content);
                self.open_lightbox(content)
            }
            Target::JournalView { index } => {
                let content = self.journal.get(index).map(JournalEntry::view_content);
                self.open_lightbox(content)
            }
            // 日誌的動作按鈕只在有燈箱的頁面上出現
            Target::JournalExternal { index } if self.lightbox.is_some() => self
                .journal
                .get(index)
                .and_then(JournalEntry::external_url)
                .map(|url| vec![Effect::OpenWindow { url }])
                .unwrap_or_default(),
            Target::JournalExternal { .. } => Vec::new(),
            Target::LightboxClose | Target::LightboxOverlay => match &mut self.lightbox {
                Some(lightbox) => lightbox.close(),
                None => Vec::new(),
            },
        }
    }

    fn carousel_button(&mut self, delta: i64) -> Vec<Effect> {
        match &mut self.carousel {
            Some(c) if (delta < 0 && c.has_prev()) || (delta > 0 && c.has_next()) => {
                c.navigate(delta)
            }
            _ => Vec::new(),
        }
    }

    fn open_lightbox(&mut self, content: Option<LightboxContent>) -> Vec<Effect> {
        match (&mut self.lightbox, content) {
            (Some(lightbox), Some(content)) => lightbox.open(content),
            _ => Vec::new(),
        }
    }

    fn on_link(&mut self, link: LinkTarget) -> Vec<Effect> {
        let mut effects = Vec::new();

        if link.area == LinkArea::MobileNav {
            if let Some(menu) = &mut self.menu {
                effects.extend(menu.link_clicked());
            }
        }

        if link.area != LinkArea::Content && link.is_in_page() {
            if let Some(nav) = &mut self.active_nav {
                effects.extend(nav.activate(&link.href));
            }
        }

        if let (Some(gallery), Some(id)) = (&self.gallery, link.id.as_deref()) {
            if gallery.link_ids.iter().any(|g| g == id) {
                effects.push(Effect::PreventDefault);
                effects.push(Effect::Navigate {
                    url: gallery.page.clone(),
                });
                return effects;
            }
        }

        if link.is_in_page() {
            if let Some(id) = parse_hash(&link.href).filter(|id| self.elements.contains(*id)) {
                effects.push(Effect::PreventDefault);
                effects.push(Effect::ScrollIntoView {
                    element: id.to_string(),
                    delay_ms: 0,
                });
            }
        }

        if let (Some(slide), Some(carousel)) = (link.slide.as_deref(), &mut self.carousel) {
            if !effects.contains(&Effect::PreventDefault) {
                effects.push(Effect::PreventDefault);
            }
            let index = SlideRequest::from(slide).resolve();
            effects.extend(carousel.jump(index));
            effects.extend(carousel.reset_timer());
        }

        effects
    }

    fn on_key(&mut self, key: Key, focus: FocusContext) -> Vec<Effect> {
        match key {
            Key::Escape => {
                let mut effects = Vec::new();
                if let Some(menu) = &mut self.menu {
                    effects.extend(menu.escape());
                }
                if let Some(lightbox) = &mut self.lightbox {
                    effects.extend(lightbox.close());
                }
                effects
            }
            Key::ArrowLeft if !focus.is_text_entry() => self.carousel_button(-1),
            Key::ArrowRight if !focus.is_text_entry() => self.carousel_button(1),
            _ => Vec::new(),
        }
    }
}
