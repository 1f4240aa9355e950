use folio::ui::event::{
    Caption, Effect, FocusContext, FocusTarget, HeaderState, Key, LinkArea, LinkTarget, Region,
    Target, TimerId, UiEvent,
};
use folio::{InteractionController, PageConfig};

const PAGE: &str = r##"
sections = ["About", "Experience", "Projects", "Contact"]
elements = ["top"]
footer_year = true

[header]

[menu]
links = ["#About", "#Experience", "#Projects", "#Contact"]

[nav]
links = ["#About", "#Experience", "#Projects", "#Contact", "gallery.html"]

[carousel]
slides = 3

[lightbox]

[[certificates]]
image = "img/aws.png"
alt = "AWS certificate"
title = "AWS Cloud Practitioner"

[[certificates]]
title = "Missing image"

[[journal]]
title = "Acme"
date = "2023 - 2024"
paragraphs = ["Built the data platform.", "Led the migration."]
image = "img/acme.png"
image_alt = "Acme logo"

[[journal]]
title = "Globex"
view_src = "img/globex-letter.png"
external = "https://globex.example"

[gallery]
"##;

fn controller() -> InteractionController {
    let page = PageConfig::from_toml_str(PAGE).unwrap();
    InteractionController::from_page(&page)
}

fn ready(controller: &mut InteractionController, hash: &str) -> Vec<Effect> {
    controller.dispatch(UiEvent::Ready {
        hash: hash.to_string(),
    })
}

fn click(controller: &mut InteractionController, target: Target) -> Vec<Effect> {
    controller.dispatch(UiEvent::Click { target })
}

fn key(controller: &mut InteractionController, key: Key) -> Vec<Effect> {
    controller.dispatch(UiEvent::Key {
        key,
        focus: FocusContext::Other,
    })
}

#[test]
fn test_ready_initialises_every_feature() {
    let mut c = controller();
    let effects = ready(&mut c, "");

    assert!(matches!(effects[0], Effect::SetFooterYear { year } if year >= 2024));
    assert!(effects.contains(&Effect::SetMenu { open: false }));
    assert!(effects.contains(&Effect::ObserveSections {
        sections: vec![
            "About".to_string(),
            "Experience".to_string(),
            "Projects".to_string(),
            "Contact".to_string()
        ],
        root_margin: "-40% 0px -55% 0px".to_string(),
        threshold: 0.15,
    }));
    assert!(effects.contains(&Effect::ShowSlide { index: 0 }));
    assert!(effects.contains(&Effect::StartTimer {
        timer: TimerId(1),
        period_ms: 5500
    }));

    let view = c.view();
    assert_eq!(view.toggle_aria_expanded(), "false");
    assert_eq!(view.menu_aria_hidden(), "true");
    assert_eq!(view.slide, Some(0));
}

#[test]
fn test_menu_open_and_escape_round_trip() {
    let mut c = controller();
    ready(&mut c, "");

    let effects = click(&mut c, Target::MenuToggle);
    assert_eq!(
        effects,
        vec![
            Effect::SetMenu { open: true },
            Effect::Focus {
                target: FocusTarget::FirstMenuLink
            }
        ]
    );
    let view = c.view();
    assert_eq!(view.toggle_aria_expanded(), "true");
    assert_eq!(view.menu_aria_hidden(), "false");

    let effects = key(&mut c, Key::Escape);
    assert_eq!(
        effects,
        vec![
            Effect::SetMenu { open: false },
            Effect::Focus {
                target: FocusTarget::MenuToggle
            }
        ]
    );
    let view = c.view();
    assert_eq!(view.toggle_aria_expanded(), "false");
    assert_eq!(view.menu_aria_hidden(), "true");

    // 已關閉時 Escape 不動作
    assert!(key(&mut c, Key::Escape).is_empty());
}

#[test]
fn test_mobile_link_closes_menu_and_activates() {
    let mut c = controller();
    ready(&mut c, "");
    click(&mut c, Target::MenuToggle);

    let link = LinkTarget::new(LinkArea::MobileNav, "#Projects");
    let effects = click(&mut c, Target::Link(link));

    assert_eq!(effects[0], Effect::SetMenu { open: false });
    assert!(effects.contains(&Effect::SetActiveLink {
        href: Some("#Projects".to_string())
    }));
    assert!(effects.contains(&Effect::PreventDefault));
    assert!(effects.contains(&Effect::ScrollIntoView {
        element: "Projects".to_string(),
        delay_ms: 0
    }));

    let view = c.view();
    assert!(!view.menu_open);
    assert_eq!(view.active_main_links, vec![2]);
    assert_eq!(view.active_mobile_links, vec![2]);
}

#[test]
fn test_at_most_one_active_link_per_nav() {
    let mut c = controller();
    ready(&mut c, "");
    assert!(c.view().active_link.is_none());

    let sequence = [
        ("About", 0.5),
        ("Projects", 0.2),
        ("Experience", 0.1),
        ("Contact", 0.9),
        ("About", 0.3),
    ];
    for (section, ratio) in sequence {
        c.dispatch(UiEvent::Intersection {
            section: section.to_string(),
            intersecting: true,
            ratio,
        });
        let view = c.view();
        assert!(view.active_main_links.len() <= 1);
        assert!(view.active_mobile_links.len() <= 1);
    }
    assert_eq!(c.view().active_link.as_deref(), Some("#About"));
    assert_eq!(c.view().active_main_links, vec![0]);
}

#[test]
fn test_gallery_link_navigates_away() {
    let mut c = controller();
    let link = LinkTarget::new(LinkArea::MainNav, "#").with_id("gallery-link");
    let effects = click(&mut c, Target::Link(link));
    assert_eq!(
        effects,
        vec![
            Effect::PreventDefault,
            Effect::Navigate {
                url: "gallery.html".to_string()
            }
        ]
    );
}

#[test]
fn test_link_to_missing_element_keeps_default() {
    let mut c = controller();
    let link = LinkTarget::new(LinkArea::Content, "#nowhere");
    assert!(click(&mut c, Target::Link(link)).is_empty());

    let link = LinkTarget::new(LinkArea::Content, "#");
    assert!(click(&mut c, Target::Link(link)).is_empty());
}

#[test]
fn test_carousel_show_wraps_with_single_active_slide() {
    let mut c = controller();
    ready(&mut c, "");

    for i in 0..7usize {
        c.dispatch(UiEvent::Click {
            target: Target::CarouselDot { index: i % 3 },
        });
        assert_eq!(c.view().slide, Some(i % 3));
    }

    // 超出範圍的圓點不存在
    assert!(click(&mut c, Target::CarouselDot { index: 3 }).is_empty());

    click(&mut c, Target::CarouselDot { index: 0 });
    click(&mut c, Target::CarouselPrev);
    assert_eq!(c.view().slide, Some(2));
    click(&mut c, Target::CarouselNext);
    assert_eq!(c.view().slide, Some(0));
}

#[test]
fn test_auto_advance_n_intervals() {
    let mut c = controller();
    let effects = ready(&mut c, "");
    let timer = effects
        .iter()
        .find_map(|e| match e {
            Effect::StartTimer { timer, .. } => Some(*timer),
            _ => None,
        })
        .unwrap();

    let mut shown = Vec::new();
    for _ in 0..7 {
        for effect in c.dispatch(UiEvent::TimerTick { timer }) {
            if let Effect::ShowSlide { index } = effect {
                shown.push(index);
            }
        }
    }
    assert_eq!(shown, vec![1, 2, 0, 1, 2, 0, 1]);
}

#[test]
fn test_stale_timer_ticks_are_ignored() {
    let mut c = controller();
    ready(&mut c, "");
    click(&mut c, Target::CarouselNext);

    assert!(c
        .dispatch(UiEvent::TimerTick { timer: TimerId(1) })
        .is_empty());
    assert_eq!(c.view().slide, Some(1));
}

#[test]
fn test_hover_pauses_auto_advance() {
    let mut c = controller();
    ready(&mut c, "");

    let effects = c.dispatch(UiEvent::PointerEnter {
        region: Region::Carousel,
    });
    assert_eq!(effects, vec![Effect::CancelTimer { timer: TimerId(1) }]);
    assert!(c
        .dispatch(UiEvent::TimerTick { timer: TimerId(1) })
        .is_empty());

    let effects = c.dispatch(UiEvent::PointerLeave {
        region: Region::Carousel,
    });
    assert_eq!(
        effects,
        vec![Effect::StartTimer {
            timer: TimerId(2),
            period_ms: 5500
        }]
    );
}

#[test]
fn test_arrow_keys_ignored_in_text_fields() {
    let mut c = controller();
    ready(&mut c, "");

    let effects = c.dispatch(UiEvent::Key {
        key: Key::ArrowRight,
        focus: FocusContext::TextArea,
    });
    assert!(effects.is_empty());

    key(&mut c, Key::ArrowRight);
    assert_eq!(c.view().slide, Some(1));
    key(&mut c, Key::ArrowLeft);
    key(&mut c, Key::ArrowLeft);
    assert_eq!(c.view().slide, Some(2));
}

#[test]
fn test_data_slide_link_jumps_and_resets_timer() {
    let mut c = controller();
    ready(&mut c, "");

    let link = LinkTarget::new(LinkArea::Content, "#Experience").with_slide("2");
    let effects = click(&mut c, Target::Link(link));

    assert_eq!(
        effects
            .iter()
            .filter(|e| **e == Effect::PreventDefault)
            .count(),
        1
    );
    assert!(effects.contains(&Effect::ShowSlide { index: 2 }));
    assert!(effects.contains(&Effect::CancelTimer { timer: TimerId(1) }));
    assert!(effects.contains(&Effect::StartTimer {
        timer: TimerId(2),
        period_ms: 5500
    }));
}

#[test]
fn test_slide_link_accepts_numeric_strings() {
    let mut c = controller();
    ready(&mut c, "");
    let link = c.slide_link();

    assert!(link.jump("2"));
    c.dispatch(UiEvent::AnimationFrame);
    assert_eq!(c.view().slide, Some(2));

    assert!(link.jump("not a number"));
    c.dispatch(UiEvent::AnimationFrame);
    assert_eq!(c.view().slide, Some(0));

    assert!(link.jump(-1));
    c.dispatch(UiEvent::AnimationFrame);
    assert_eq!(c.view().slide, Some(2));
}

#[test]
fn test_lightbox_open_reflects_payload_and_close_clears() {
    let mut c = controller();
    ready(&mut c, "");

    let effects = click(&mut c, Target::CertificateImage { index: 0 });
    assert!(effects.contains(&Effect::LockScroll { locked: true }));
    assert!(effects.contains(&Effect::Focus {
        target: FocusTarget::LightboxClose
    }));

    let view = c.view();
    assert_eq!(view.lightbox_src(), "img/aws.png");
    assert_eq!(view.lightbox_alt(), "AWS certificate");
    assert_eq!(view.lightbox_caption(), "AWS Cloud Practitioner");
    assert!(view.scroll_locked);

    let effects = click(&mut c, Target::LightboxOverlay);
    assert_eq!(
        effects,
        vec![
            Effect::SetLightbox { content: None },
            Effect::LockScroll { locked: false }
        ]
    );
    let view = c.view();
    assert_eq!(view.lightbox_src(), "");
    assert_eq!(view.lightbox_alt(), "");
    assert_eq!(view.lightbox_caption(), "");
    assert!(!view.scroll_locked);
}

#[test]
fn test_lightbox_closes_on_every_trigger() {
    let mut c = controller();
    ready(&mut c, "");

    click(&mut c, Target::CertificateCard { index: 0 });
    click(&mut c, Target::LightboxClose);
    assert!(c.view().lightbox.is_none());

    click(&mut c, Target::CertificateCard { index: 0 });
    key(&mut c, Key::Escape);
    assert!(c.view().lightbox.is_none());
    assert!(key(&mut c, Key::Escape).is_empty());
}

#[test]
fn test_certificate_without_image_does_not_open() {
    let mut c = controller();
    assert!(click(&mut c, Target::CertificateCard { index: 1 }).is_empty());
    assert!(click(&mut c, Target::CertificateImage { index: 9 }).is_empty());
    assert!(c.view().lightbox.is_none());
}

#[test]
fn test_journal_actions() {
    let mut c = controller();
    ready(&mut c, "");

    click(&mut c, Target::JournalView { index: 0 });
    let view = c.view();
    let content = view.lightbox.as_ref().unwrap();
    assert_eq!(content.src, "img/acme.png");
    assert_eq!(content.alt, "Acme logo");
    assert!(matches!(&content.caption, Caption::Html(html) if html.contains("Led the migration.")));

    // 開啟中再開啟另一筆，內容直接替換
    let effects = click(&mut c, Target::JournalView { index: 1 });
    assert!(!effects.contains(&Effect::SetLightbox { content: None }));
    assert_eq!(c.view().lightbox_src(), "img/globex-letter.png");

    assert_eq!(
        click(&mut c, Target::JournalExternal { index: 1 }),
        vec![Effect::OpenWindow {
            url: "https://globex.example".to_string()
        }]
    );
    assert_eq!(
        click(&mut c, Target::JournalExternal { index: 0 }),
        vec![Effect::OpenWindow {
            url: "https://www.google.com/search?q=Acme+company".to_string()
        }]
    );
}

#[test]
fn test_header_hides_on_scroll_down_once_per_frame() {
    let mut c = controller();
    ready(&mut c, "");

    assert_eq!(
        c.dispatch(UiEvent::Scroll { y: 120.0 }),
        vec![Effect::RequestFrame]
    );
    assert!(c.dispatch(UiEvent::Scroll { y: 180.0 }).is_empty());
    assert_eq!(
        c.dispatch(UiEvent::AnimationFrame),
        vec![Effect::SetHeader {
            state: HeaderState::Hidden
        }]
    );

    c.dispatch(UiEvent::Scroll { y: 60.0 });
    assert_eq!(
        c.dispatch(UiEvent::AnimationFrame),
        vec![Effect::SetHeader {
            state: HeaderState::Shown
        }]
    );
}

#[test]
fn test_header_stays_visible_while_menu_open() {
    let mut c = controller();
    ready(&mut c, "");
    c.dispatch(UiEvent::Wheel { delta_y: 10.0 });
    assert_eq!(c.view().header, HeaderState::Hidden);

    let effects = click(&mut c, Target::MenuToggle);
    assert!(effects.contains(&Effect::SetHeader {
        state: HeaderState::Shown
    }));

    assert!(c.dispatch(UiEvent::Scroll { y: 500.0 }).is_empty());
    assert!(c.dispatch(UiEvent::Wheel { delta_y: 10.0 }).is_empty());
    assert!(c.dispatch(UiEvent::TouchMove { y: 900.0 }).is_empty());
    assert_eq!(c.view().header, HeaderState::Shown);
}

#[test]
fn test_deep_link_reveals_section() {
    let mut c = controller();
    ready(&mut c, "");
    c.dispatch(UiEvent::Wheel { delta_y: 3.0 });

    let effects = c.dispatch(UiEvent::HashChange {
        hash: "#Contact".to_string(),
    });
    assert_eq!(
        effects,
        vec![
            Effect::SetHeader {
                state: HeaderState::Shown
            },
            Effect::ScrollIntoView {
                element: "Contact".to_string(),
                delay_ms: 50
            }
        ]
    );
}

#[test]
fn test_carousel_anchor_hash_opens_first_slide() {
    let mut c = controller();
    ready(&mut c, "");
    click(&mut c, Target::CarouselNext);

    let effects = c.dispatch(UiEvent::HashChange {
        hash: "#Experience".to_string(),
    });
    assert!(effects.contains(&Effect::ShowSlide { index: 0 }));
    assert_eq!(c.view().slide, Some(0));
}

#[test]
fn test_initial_hash_is_revealed_on_ready() {
    let mut c = controller();
    let effects = ready(&mut c, "#top");
    assert!(effects.contains(&Effect::ScrollIntoView {
        element: "top".to_string(),
        delay_ms: 50
    }));
}

#[test]
fn test_invalid_or_unknown_hash_does_nothing() {
    let mut c = controller();
    ready(&mut c, "");
    for hash in ["#1bad", "#a b", "#", "", "#Unknown"] {
        assert!(c
            .dispatch(UiEvent::HashChange {
                hash: hash.to_string()
            })
            .is_empty());
    }
}

#[test]
fn test_pending_scroll_frame_does_not_hide_header_once_menu_opens() {
    let mut c = controller();
    ready(&mut c, "");

    assert_eq!(
        c.dispatch(UiEvent::Scroll { y: 400.0 }),
        vec![Effect::RequestFrame]
    );
    click(&mut c, Target::MenuToggle);

    let effects = c.dispatch(UiEvent::AnimationFrame);
    assert!(!effects.contains(&Effect::SetHeader {
        state: HeaderState::Hidden
    }));
    let view = c.view();
    assert!(view.menu_open);
    assert_eq!(view.header, HeaderState::Shown);
}

#[test]
fn test_journal_actions_need_a_lightbox() {
    let page = PageConfig::from_toml_str(
        r##"
[[journal]]
title = "Acme"
external = "https://acme.example"
"##,
    )
    .unwrap();
    let mut c = InteractionController::from_page(&page);
    ready(&mut c, "");

    assert!(click(&mut c, Target::JournalExternal { index: 0 }).is_empty());
    assert!(click(&mut c, Target::JournalView { index: 0 }).is_empty());
}

#[test]
fn test_deep_link_to_non_ascii_id() {
    let page = PageConfig::from_toml_str("sections = [\"Über\"]\n").unwrap();
    let mut c = InteractionController::from_page(&page);
    let effects = ready(&mut c, "#Über");
    assert_eq!(
        effects.last(),
        Some(&Effect::ScrollIntoView {
            element: "Über".to_string(),
            delay_ms: 50
        })
    );
}

#[test]
fn test_features_degrade_independently() {
    let page = PageConfig::from_toml_str(
        r##"
sections = ["About"]

[lightbox]
close_control = false

[[certificates]]
image = "img/a.png"
"##,
    )
    .unwrap();
    let mut c = InteractionController::from_page(&page);
    c.dispatch(UiEvent::Ready {
        hash: String::new(),
    });

    // 沒有選單、輪播、頁首，燈箱仍可用
    assert!(click(&mut c, Target::MenuToggle).is_empty());
    assert!(click(&mut c, Target::CarouselNext).is_empty());
    assert!(c.dispatch(UiEvent::Scroll { y: 10.0 }).is_empty());
    assert!(!c.slide_link().jump(1));

    let effects = click(&mut c, Target::CertificateImage { index: 0 });
    assert_eq!(
        effects.len(),
        2,
        "no focus effect without a close control: {:?}",
        effects
    );
    assert_eq!(c.view().lightbox_src(), "img/a.png");
}

#[test]
fn test_events_round_trip_through_json() {
    let events: Vec<UiEvent> = serde_json::from_str(
        r##"[
            {"type": "ready", "hash": "#About"},
            {"type": "click", "target": {"kind": "menu_toggle"}},
            {"type": "key", "key": "escape", "focus": "other"},
            {"type": "click", "target": {"kind": "carousel_dot", "index": 2}},
            {"type": "jump_to_slide", "request": "1"},
            {"type": "animation_frame"}
        ]"##,
    )
    .unwrap();
    assert_eq!(events.len(), 6);

    let mut c = controller();
    for event in events {
        c.dispatch(event);
    }
    assert_eq!(c.view().slide, Some(1));
    assert!(!c.view().menu_open);
}

#[test]
fn test_demo_page_replays_cleanly() {
    use folio::utils::validation::Validate;

    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let page = PageConfig::from_file(dir.join("page.toml")).unwrap();
    page.validate().unwrap();

    let events: Vec<UiEvent> =
        serde_json::from_str(&std::fs::read_to_string(dir.join("events.json")).unwrap()).unwrap();

    let mut c = InteractionController::from_page(&page);
    assert!(c.features().iter().all(|(_, enabled)| *enabled));
    ready(&mut c, "");

    let mut opened = Vec::new();
    for event in events {
        for effect in c.dispatch(event) {
            if let Effect::OpenWindow { url } | Effect::Navigate { url } = effect {
                opened.push(url);
            }
        }
    }

    assert_eq!(
        opened,
        vec![
            "https://www.google.com/search?q=Northwind+Traders+company".to_string(),
            "gallery.html".to_string()
        ]
    );
    let view = c.view();
    assert_eq!(view.slide, Some(0));
    assert!(view.lightbox.is_none());
    assert_eq!(view.active_link.as_deref(), Some("#Experience"));
}
