use contracts::domain::Business;
use leptos::prelude::*;

use crate::domain::prospection::ProspectionRepo;
use crate::layout::global_context::use_prospection;
use crate::shared::components::BusinessCard;

/// Every business that ever entered the prospection set, independent of
/// the live search results.
#[component]
pub fn ProspectionPage() -> impl IntoView {
    let ctx = use_prospection();

    let businesses = Memo::new(move |_| {
        ctx.track();
        let mut list = ProspectionRepo::local().businesses();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    });

    view! {
        <section class="prospection-page">
            <h2>"My prospection"</h2>
            <p>{move || format!("{} businesses being worked", businesses.get().len())}</p>

            <Show
                when=move || !businesses.get().is_empty()
                fallback=|| {
                    view! {
                        <p class="empty-hint">
                            "Nothing here yet. Rate, annotate or contact a business on the search page."
                        </p>
                    }
                }
            >
                <div class="card-grid">
                    <For
                        each=move || businesses.get()
                        key=|b| b.id.clone()
                        children=move |b: Business| view! { <BusinessCard business=b /> }
                    />
                </div>
            </Show>
        </section>
    }
}
