use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::dashboards::pipeline::view::DashboardPage;
use crate::layout::Header;
use crate::usecases::my_prospection::view::ProspectionPage;
use crate::usecases::search_businesses::view::SearchPage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Header />
            <main class="app-main">
                <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                    <Route path=path!("/") view=SearchPage />
                    <Route path=path!("/prospection") view=ProspectionPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                </Routes>
            </main>
        </Router>
    }
}
