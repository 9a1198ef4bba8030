//! Spawning for widget-initiated requests.
//!
//! Native builds run on the ambient Tokio runtime (entered in `main`, or the
//! test runtime); web builds run on the JS event loop. Either way the frame
//! loop never blocks: results come back over `flume` channels and are polled
//! once per frame.

use std::future::Future;

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    drop(tokio::spawn(future));
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
