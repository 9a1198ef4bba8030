#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use loanpay_business::{BusinessConfig, Session};
use loanpay_ui::state::State;

#[cfg(not(target_arch = "wasm32"))]
mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn load_config() -> BusinessConfig {
    BusinessConfig::from_env().unwrap_or_else(|err| {
        log::error!("Invalid configuration, using defaults: {err:#}");
        BusinessConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn native_session() -> Session {
    use std::sync::Arc;

    use loanpay_business::FileSessionStore;

    match FileSessionStore::default_path() {
        Ok(path) => {
            log::info!("Session file: {}", path.display());
            Session::new(Arc::new(FileSessionStore::new(path)))
        }
        Err(err) => {
            log::warn!("{err}; keeping the session in memory");
            Session::in_memory()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    // Requests spawned by widgets run here; the frame loop stays on the main thread.
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("Failed to start async runtime: {err}");
            return Err(eframe::Error::AppCreation(Box::new(err)));
        }
    };
    let _runtime_guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 360.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    let state = State::new(load_config(), native_session());

    eframe::run_native(
        "LoanPay",
        native_options,
        Box::new(move |_cc| Ok(Box::new(loanpay_ui::LoanPayApp::new(state)))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use std::sync::Arc;

    use eframe::wasm_bindgen::JsCast as _;
    use loanpay_ui::utils::local_storage::LocalStorageSessionStore;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to mount into");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("egui_canvas")
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Failed to find egui_canvas");
            return;
        };

        let session = Session::new(Arc::new(LocalStorageSessionStore));
        let state = State::new(load_config(), session);

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::new(loanpay_ui::LoanPayApp::new(state)))),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
