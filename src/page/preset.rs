//! The built-in AR suite page: a hero, then three tiers that each pair a viewfinder with a
//! short feature list.

use crate::{
    animation::state::StatePreset,
    foundation::core::{Anchor, Edges, Point, Size},
    overlay::{
        hotspot::{Hotspot, ProgressIndicator, PulseKind, Tooltip},
        viewfinder::{LaunchKind, LaunchSlot, MediaRef},
    },
    page::model::{Bounds, ElementSpec, ObserverKind, PageSpec, RevealOptions, ViewfinderSpec},
    reveal::phase::Trigger,
};

const VIEWPORT: Size = Size::new(1280.0, 800.0);
const PANEL_WIDTH: f64 = 544.0;
const TEXT_COLUMN_X: f64 = 680.0;
const TEXT_COLUMN_WIDTH: f64 = 576.0;
const ITEM_HEIGHT: f64 = 40.0;
const ITEM_PITCH: f64 = 64.0;

/// The three-tier AR showcase with its default 1280x800 viewport.
pub fn ar_suite() -> PageSpec {
    let mut elements = hero();
    elements.extend(feature_list(
        "configurators",
        950.0,
        [
            "Real-time Color & Spec Swaps",
            "Interactive Feature Discovery",
            "True-to-Scale Visualization",
        ],
    ));
    elements.extend(feature_list(
        "guides",
        1780.0,
        [
            "3D Quick Start Visuals",
            "Interactive Part Highlights",
            "Step-by-Step Spatial Tours",
        ],
    ));
    elements.extend(feature_list(
        "media",
        2610.0,
        [
            "Interactive Billboards & Signage",
            "Gamified Print Campaigns",
            "Viral Wow Moments",
        ],
    ));

    PageSpec {
        title: "Namespace Systems AR Suite".to_string(),
        viewport: VIEWPORT,
        observer: ObserverKind::Geometry,
        elements,
        viewfinders: vec![configurator(), guide(), gateway()],
    }
}

fn hero() -> Vec<ElementSpec> {
    let on_mount = |hidden: StatePreset, delay_ms: f64| {
        RevealOptions::default()
            .hidden(hidden)
            .trigger(Trigger::Mount)
            .delay_ms(delay_ms)
    };
    vec![
        ElementSpec {
            id: "hero/badge".to_string(),
            bounds: Bounds::new(540.0, 200.0, 200.0, 30.0),
            reveal: on_mount(StatePreset::FadeUp, 0.0),
        },
        ElementSpec {
            id: "hero/title".to_string(),
            bounds: Bounds::new(240.0, 270.0, 800.0, 180.0),
            reveal: on_mount(StatePreset::ZoomIn, 100.0),
        },
        ElementSpec {
            id: "hero/subtitle".to_string(),
            bounds: Bounds::new(340.0, 490.0, 600.0, 60.0),
            reveal: on_mount(StatePreset::Fade, 200.0),
        },
    ]
}

fn feature_list<const N: usize>(section: &str, top: f64, items: [&str; N]) -> Vec<ElementSpec> {
    items
        .iter()
        .enumerate()
        .map(|(i, label)| ElementSpec {
            id: format!("{section}/{label}"),
            bounds: Bounds::new(
                TEXT_COLUMN_X,
                top + ITEM_PITCH * i as f64,
                TEXT_COLUMN_WIDTH,
                ITEM_HEIGHT,
            ),
            reveal: RevealOptions::default().hidden(StatePreset::SlideItem),
        })
        .collect()
}

fn panel(id: &str, origin: Point, hidden: StatePreset) -> ViewfinderSpec {
    ViewfinderSpec {
        id: id.to_string(),
        origin,
        width: PANEL_WIDTH,
        aspect: 1.0,
        media: None,
        corner_inset: 32.0,
        reveal: Some(RevealOptions::default().hidden(hidden)),
        hotspots: Vec::new(),
        launch: None,
    }
}

fn configurator() -> ViewfinderSpec {
    // The product render bobs in the middle of the frame.
    let product = Hotspot::new("product", Anchor::new(0.5, 0.5), Tooltip::new("3D Component"))
        .pulse(PulseKind::Float);

    ViewfinderSpec {
        media: Some(MediaRef("https://picsum.photos/seed/config/800/800".to_string())),
        hotspots: vec![product],
        launch: Some(LaunchSlot::new(
            "Launch AR Configurator",
            LaunchKind::Configurator,
        )),
        ..panel("configurator", Point::new(40.0, 744.0), StatePreset::SlideLeft)
    }
}

fn guide() -> ViewfinderSpec {
    let fuel = Hotspot::new(
        "fuel-line",
        Anchor::from_edges(Edges {
            top: Some(1.0 / 3.0),
            left: Some(0.25),
            ..Edges::default()
        }),
        Tooltip::new("Check Fuel Line")
            .badge("01")
            .body("Ensure the high-pressure connector is seated properly."),
    );
    let heat = Hotspot::new(
        "heat-sync",
        Anchor::from_edges(Edges {
            bottom: Some(0.25),
            right: Some(1.0 / 3.0),
            ..Edges::default()
        }),
        Tooltip::new("Heat Sync Status").offset(32.0, -32.0).size(192.0, 56.0),
    )
    .pulse(PulseKind::None)
    .progress(ProgressIndicator::new(0.8));

    ViewfinderSpec {
        media: Some(MediaRef("https://picsum.photos/seed/guide/800/800".to_string())),
        hotspots: vec![fuel, heat],
        launch: Some(LaunchSlot::new("Scan Machine to Start Guide", LaunchKind::WebAr)),
        ..panel("guide", Point::new(696.0, 1576.0), StatePreset::SlideRight)
    }
}

fn gateway() -> ViewfinderSpec {
    let portal = Hotspot::new(
        "portal",
        Anchor::new(0.5, 0.5),
        Tooltip::new("MARS BASE 01").body("Now Boarding"),
    )
    .pulse(PulseKind::Glow);

    ViewfinderSpec {
        hotspots: vec![portal],
        launch: Some(LaunchSlot::new("Launch AR Gateway", LaunchKind::WebAr)),
        ..panel("gateway", Point::new(40.0, 2408.0), StatePreset::SlideLeft)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/preset.rs"]
mod tests;
