use leptos::prelude::*;

use crate::domain::prospection::ProspectionRepo;
use crate::layout::global_context::use_prospection;
use crate::shared::date_utils::today;

/// Top navigation with the daily visit counter.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_prospection();

    let daily_progress = Memo::new(move |_| {
        ctx.track();
        let repo = ProspectionRepo::local();
        (repo.visited_today_count(today()), repo.daily_goal())
    });

    view! {
        <header class="app-header">
            <span class="app-title">"Local Prospector"</span>
            <nav class="app-nav">
                <a href="/">"Search"</a>
                <a href="/prospection">"My prospection"</a>
                <a href="/dashboard">"Dashboard"</a>
            </nav>
            <span class="daily-progress">
                {move || {
                    let (visited, goal) = daily_progress.get();
                    format!("Visited today: {}/{}", visited, goal)
                }}
            </span>
        </header>
    }
}
