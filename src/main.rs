mod app;
mod core;
mod pages;

use leptos::*;
use app::App;

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("Starting pledge app");

    mount_to_body(|| view! { <App /> })
}
