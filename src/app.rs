use leptos::*;
use crate::core::router::PageParams;
use crate::pages::CreatePledgePage;

// main app component
#[component]
pub fn App() -> impl IntoView {
    // entry parameters are read once, when the page is opened
    let params = PageParams::from_location();
    log::info!("Opening pledge page (name: {:?}, slug: {:?})", params.name, params.slug);

    view! {
        <main class="container">
            <CreatePledgePage params=params />
        </main>
    }
}
