mod catalog;
mod components;
mod pages;
mod view_state;

use dioxus::logger::tracing::info;
use dioxus::prelude::*;

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        pages::guide::Guide {}
    }
}

fn main() {
    dioxus::logger::initialize_default();
    info!(locations = catalog::catalog().len(), "starting city map");
    launch(App);
}
