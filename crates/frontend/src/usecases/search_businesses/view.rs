use std::collections::BTreeSet;

use contracts::aggregation;
use contracts::domain::Business;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::clipboard::copy_to_clipboard;
use crate::shared::components::BusinessCard;
use crate::usecases::search_businesses::{api, email_list};

/// Search page: category + location query against the places proxy, with
/// client-side phone/email filters and market density hints over the
/// current result list.
#[component]
pub fn SearchPage() -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (city, set_city) = signal(String::new());
    let (state, set_state) = signal(String::new());
    let (businesses, set_businesses) = signal(Vec::<Business>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (has_searched, set_has_searched) = signal(false);
    let (filter_phone, set_filter_phone) = signal(false);
    let (filter_email, set_filter_email) = signal(false);
    let selected_emails = RwSignal::new(BTreeSet::<String>::new());

    let run_search = move || {
        let query = query.get_untracked();
        let city = city.get_untracked();
        let state = state.get_untracked();
        if query.trim().is_empty() {
            set_error.set(Some("Type a business category to search.".to_string()));
            return;
        }
        if city.trim().is_empty() || state.trim().is_empty() {
            set_error.set(Some("Select the state and city first.".to_string()));
            return;
        }

        set_loading.set(true);
        set_error.set(None);
        set_has_searched.set(true);

        spawn_local(async move {
            match api::search_businesses(&query, &city, &state).await {
                Ok(found) => {
                    set_businesses.set(found);
                    set_loading.set(false);
                }
                Err(err) => {
                    log::error!("Business search failed: {}", err);
                    set_error.set(Some(err));
                    set_loading.set(false);
                }
            }
        });
    };

    let filtered = Memo::new(move |_| {
        businesses
            .get()
            .into_iter()
            .filter(|b| !filter_phone.get() || b.phone.is_some())
            .filter(|b| !filter_email.get() || b.email.is_some())
            .collect::<Vec<_>>()
    });

    let density = Memo::new(move |_| aggregation::market_density(filtered.get().len()));
    let saturated = Memo::new(move |_| aggregation::is_saturated(&filtered.get()));

    view! {
        <section class="search-page">
            <div class="search-form">
                <input
                    type="text"
                    placeholder="State"
                    prop:value=move || state.get()
                    on:input=move |ev| set_state.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="City"
                    prop:value=move || city.get()
                    on:input=move |ev| set_city.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Category, e.g. bakery, pharmacy..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            run_search();
                        }
                    }
                />
                <button on:click=move |_| run_search() disabled=move || loading.get()>
                    {move || if loading.get() { "Searching..." } else { "Search" }}
                </button>
            </div>

            <div class="search-filters">
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || filter_phone.get()
                        on:change=move |ev| set_filter_phone.set(event_target_checked(&ev))
                    />
                    "With phone only"
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || filter_email.get()
                        on:change=move |ev| set_filter_email.set(event_target_checked(&ev))
                    />
                    "With e-mail only"
                </label>
            </div>

            {move || {
                error
                    .get()
                    .map(|err| view! { <p class="search-error">{err}</p> })
            }}

            <Show when=move || has_searched.get() && !loading.get()>
                <div class="search-summary">
                    <p>{move || format!("{} businesses found", filtered.get().len())}</p>
                    {move || {
                        density
                            .get()
                            .map(|d| view! { <p class="density-hint">{d.message()}</p> })
                    }}
                    {move || {
                        saturated
                            .get()
                            .then(|| {
                                view! {
                                    <p class="saturation-hint">
                                        "Several competitors share the same street: this area looks saturated."
                                    </p>
                                }
                            })
                    }}
                </div>

                <Show when=move || selected_emails.with(|s| !s.is_empty())>
                    <div class="email-list-panel">
                        <span>
                            {move || {
                                format!("{} e-mails selected", selected_emails.with(|s| s.len()))
                            }}
                        </span>
                        <button on:click=move |_| {
                            copy_to_clipboard(&selected_emails.with_untracked(email_list::formatted));
                        }>"Copy e-mail list"</button>
                        <button on:click=move |_| selected_emails.set(BTreeSet::new())>
                            "Clear selection"
                        </button>
                    </div>
                </Show>

                <div class="card-grid">
                    <For
                        each=move || filtered.get()
                        key=|b| b.id.clone()
                        children=move |b: Business| {
                            view! { <BusinessCard business=b email_selection=selected_emails /> }
                        }
                    />
                </div>
            </Show>
        </section>
    }
}
