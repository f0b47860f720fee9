use dioxus::prelude::*;

use citymap_shared::models::PointOfInterest;

/// External driving-directions URL for a destination.
pub fn directions_url(lat: f64, lon: f64) -> String {
    format!("https://www.google.com/maps/dir/?api=1&destination={lat},{lon}")
}

/// Open driving directions to the given coordinates in a new browsing context.
pub fn open_directions(lat: f64, lon: f64) {
    let url = directions_url(lat, lon);
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(&url, "_blank");
    }
}

#[component]
pub fn PoiPopup(poi: PointOfInterest, on_close: EventHandler<()>) -> Element {
    let (lat, lon) = (poi.lat, poi.lon);

    rsx! {
        div { class: "popup-card",
            button {
                class: "popup-close",
                "aria-label": "Close popup",
                onclick: move |evt: Event<MouseData>| {
                    evt.stop_propagation();
                    on_close.call(());
                },
                "\u{00d7}"
            }
            img { class: "popup-image", src: "{poi.image}", alt: "{poi.name}" }
            h3 { class: "popup-address", "{poi.address}" }
            p { class: "popup-text", "{poi.text}" }
            button {
                class: "popup-directions",
                onclick: move |evt: Event<MouseData>| {
                    evt.stop_propagation();
                    open_directions(lat, lon);
                },
                "Directions"
            }
        }
    }
}
