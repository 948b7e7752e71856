mod app_core;
mod images;
mod input;
mod persisted_store;
mod renderer;
mod yew_app;

use route_recall_core::PracticeSession;

use crate::app_core::AppCore;

fn main() {
    console_error_panic_hook::set_once();
    let session = PracticeSession::from_persisted(persisted_store::load_state());
    let core = AppCore::new(session);
    yew_app::run_app(core.clone());
    images::load_bundled(core);
}
