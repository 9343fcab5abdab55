use drawer_protocol::ActivationState;
use drawer_runtime::{drawer_error, drawer_info, drawer_warn};
use drawer_session::{ActivationGate, DrawerConfig};
use leptos::*;
use std::rc::Rc;
use transport_webserial::WebSerialHost;
use wasm_bindgen_futures::spawn_local;

/// Element holding the deployment's JSON settings, if the page has one
const CONFIG_ELEMENT_ID: &str = "drawer-config";

fn load_config() -> DrawerConfig {
    let Some(json) = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return DrawerConfig::default();
    };

    match DrawerConfig::from_json(&json) {
        Ok(config) => {
            drawer_info!("Loaded drawer settings from #{}", CONFIG_ELEMENT_ID);
            config
        }
        Err(e) => {
            drawer_warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            DrawerConfig::default()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (state, set_state) = create_signal(ActivationState::Idle);
    let config = load_config();

    let host = match WebSerialHost::from_window() {
        Ok(host) => host,
        Err(e) => {
            drawer_error!("Cash drawer unavailable: {}", e);
            return view! {
                <p style="font-family: sans-serif; color: rgb(163, 70, 83);">
                    "Web Serial is not supported in this browser."
                </p>
            }
            .into_view();
        }
    };

    let gate = Rc::new(ActivationGate::from_host(
        host,
        move |next: ActivationState| set_state.set(next),
        &config,
    ));

    let on_click = {
        let gate = gate.clone();
        move |_: ev::MouseEvent| {
            let gate = gate.clone();
            spawn_local(async move {
                gate.activate().await;
            });
        }
    };

    // Queued behind mounting, so the button is wired before this runs
    spawn_local(async move {
        gate.auto_activate().await;
    });

    view! {
        <button
            id="openDrawer"
            style="font-family: sans-serif; font-size: 1.25rem; padding: 1rem 2rem; border-radius: 4px;"
            prop:disabled=move || state.get().is_busy()
            on:click=on_click
        >
            {move || state.get().button_label()}
        </button>
    }
    .into_view()
}
