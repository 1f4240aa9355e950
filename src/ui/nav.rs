use crate::ui::event::{Effect, FocusTarget};

/// Mobile navigation drawer.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    open: bool,
    has_toggle: bool,
    has_links: bool,
}

impl MobileMenu {
    pub fn new(has_toggle: bool, has_links: bool) -> Self {
        Self {
            open: false,
            has_toggle,
            has_links,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle button and menu both exist, so the menu can be opened.
    pub fn can_toggle(&self) -> bool {
        self.has_toggle
    }

    /// Initial ARIA state.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.open = false;
        vec![Effect::SetMenu { open: false }]
    }

    pub fn toggle(&mut self) -> Vec<Effect> {
        if !self.has_toggle {
            return Vec::new();
        }
        if self.open {
            self.close(false)
        } else {
            self.open()
        }
    }

    fn open(&mut self) -> Vec<Effect> {
        self.open = true;
        let mut effects = vec![Effect::SetMenu { open: true }];
        if self.has_links {
            effects.push(Effect::Focus {
                target: FocusTarget::FirstMenuLink,
            });
        }
        effects
    }

    fn close(&mut self, refocus_toggle: bool) -> Vec<Effect> {
        self.open = false;
        let mut effects = vec![Effect::SetMenu { open: false }];
        if refocus_toggle && self.has_toggle {
            effects.push(Effect::Focus {
                target: FocusTarget::MenuToggle,
            });
        }
        effects
    }

    pub fn escape(&mut self) -> Vec<Effect> {
        if !self.open || !self.has_toggle {
            return Vec::new();
        }
        self.close(true)
    }

    pub fn link_clicked(&mut self) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        self.close(false)
    }
}

pub const DEFAULT_ROOT_MARGIN: &str = "-40% 0px -55% 0px";
pub const DEFAULT_THRESHOLD: f64 = 0.15;

/// Tracks which section's nav link is highlighted. A single href is stored,
/// so at most one link per nav can be active.
#[derive(Debug, Clone)]
pub struct ActiveNav {
    sections: Vec<String>,
    root_margin: String,
    threshold: f64,
    active: Option<String>,
}

impl ActiveNav {
    pub fn new(sections: Vec<String>, root_margin: String, threshold: f64) -> Self {
        Self {
            sections,
            root_margin,
            threshold,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn observe(&self) -> Effect {
        Effect::ObserveSections {
            sections: self.sections.clone(),
            root_margin: self.root_margin.clone(),
            threshold: self.threshold,
        }
    }

    pub fn on_intersection(&mut self, section: &str, intersecting: bool, ratio: f64) -> Option<Effect> {
        if section.is_empty() || !intersecting || ratio < self.threshold {
            return None;
        }
        if !self.sections.iter().any(|s| s == section) {
            return None;
        }
        self.activate(&format!("#{}", section))
    }

    pub fn activate(&mut self, href: &str) -> Option<Effect> {
        if self.active.as_deref() == Some(href) {
            return None;
        }
        self.active = Some(href.to_string());
        Some(Effect::SetActiveLink {
            href: self.active.clone(),
        })
    }
}
