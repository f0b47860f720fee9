use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::catalog;
use crate::components::map_view::MapView;
use crate::components::side_panel::SidePanel;
use crate::view_state::{
    ease_in_out_cubic, frame_count, lerp_camera, CameraCommand, DeviceClass, ViewController,
    Viewport, FRAME_MS,
};

/// Whether the host exposes a touch input modality.
fn has_touch() -> bool {
    web_sys::window()
        .map(|w| w.navigator().max_touch_points() > 0)
        .unwrap_or(false)
}

/// Execute a camera command from a controller transition.
///
/// Jumps apply immediately. Flys run as an eased animation task stepping
/// fixed frames; the generation counter lets a newer command supersede a
/// running fly, whose task then stops without completing. The popup-open
/// continuation lives in `ViewController::fly_completed`, reached only when
/// the animation actually finishes.
fn execute(mut controller: Signal<ViewController>, mut anim_gen: Signal<u64>, cmd: CameraCommand) {
    let gen = *anim_gen.peek() + 1;
    anim_gen.set(gen);
    match cmd {
        CameraCommand::Jump(to) => controller.write().set_camera(to),
        CameraCommand::Fly { to, duration_ms } => {
            spawn(async move {
                let from = controller.peek().camera();
                let frames = frame_count(duration_ms);
                for frame in 1..=frames {
                    TimeoutFuture::new(FRAME_MS).await;
                    if *anim_gen.peek() != gen {
                        return;
                    }
                    let t = ease_in_out_cubic(frame as f64 / frames as f64);
                    controller.write().set_camera(lerp_camera(from, to, t));
                }
                controller.write().fly_completed();
            });
        }
    }
}

#[component]
pub fn Guide() -> Element {
    let entries = use_hook(catalog::catalog);

    let init_entries = entries.clone();
    let mut controller = use_signal(move || {
        ViewController::new(
            catalog::positions(&init_entries),
            Viewport::default(),
            DeviceClass::Desktop,
        )
    });
    let anim_gen = use_signal(|| 0_u64);

    let selected = controller.read().selected();

    rsx! {
        div { class: "app",
            header { class: "titlebar",
                h1 { "Aarhus City Guide" }
            }
            div { class: "content",
                SidePanel {
                    catalog: entries.clone(),
                    selected,
                    on_select: move |i: usize| {
                        debug!(index = i, "panel row selected");
                        let cmd = controller.write().select_from_panel(i);
                        if let Some(cmd) = cmd {
                            execute(controller, anim_gen, cmd);
                        }
                    },
                }
                MapView {
                    catalog: entries.clone(),
                    controller,
                    anim_gen,
                    on_marker_tap: move |i: usize| {
                        debug!(index = i, "marker tapped");
                        let cmd = controller.write().marker_tapped(i);
                        if let Some(cmd) = cmd {
                            execute(controller, anim_gen, cmd);
                        }
                    },
                    on_overview: move |_| {
                        debug!("returning to overview");
                        let cmd = controller.write().return_to_overview();
                        execute(controller, anim_gen, cmd);
                    },
                    // Closing a popup never moves the camera.
                    on_popup_close: move |_| controller.write().popup_closed(),
                    on_viewport: move |viewport: Viewport| {
                        let device = DeviceClass::classify(viewport.width, has_touch());
                        let cmd = controller.write().resized(viewport, device);
                        if let Some(cmd) = cmd {
                            execute(controller, anim_gen, cmd);
                        }
                    },
                }
            }
        }
    }
}
