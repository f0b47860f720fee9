use dioxus::prelude::*;

use citymap_shared::models::PointOfInterest;

#[component]
pub fn SidePanel(
    catalog: Vec<PointOfInterest>,
    selected: Option<usize>,
    on_select: EventHandler<usize>,
) -> Element {
    rsx! {
        aside { class: "side-panel",
            h2 { "Points of interest" }
            ul { class: "poi-list",
                for (i, poi) in catalog.iter().enumerate() {
                    li {
                        key: "{poi.slug()}",
                        class: if selected == Some(i) { "poi-row active" } else { "poi-row" },
                        onclick: move |_| on_select.call(i),
                        span { class: "poi-row-icon", "{poi.icon}" }
                        div { class: "poi-row-text",
                            span { class: "poi-row-name", "{poi.name}" }
                            span { class: "poi-row-address", "{poi.address}" }
                        }
                    }
                }
            }
        }
    }
}
