use std::collections::BTreeSet;

use contracts::domain::{
    Business, NextAction, NextActionRecord, PipelineStage, PotentialLevel, VisitStatus,
};
use contracts::scoring;
use leptos::prelude::*;

use crate::domain::prospection::{workflow, ProspectionRepo};
use crate::layout::global_context::use_prospection;
use crate::shared::date_utils::{format_date, parse_input_date, today};
use crate::usecases::search_businesses::{email_list, links};

fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

/// One business with its full prospection state: contact links, visit
/// status, potential, pipeline stage, notes, next action and the derived
/// score/probability badges. All mutations go through the workflow layer.
#[component]
pub fn BusinessCard(
    business: Business,
    /// Page-level e-mail selection; when present and the business has an
    /// e-mail address, the card offers a checkbox to add it to the bulk list.
    #[prop(optional)]
    email_selection: Option<RwSignal<BTreeSet<String>>>,
) -> impl IntoView {
    let ctx = use_prospection();
    let repo = ProspectionRepo::local();
    let id = business.id.clone();

    let (visit, set_visit) = signal(repo.visit_status_for(&id).map(|r| r.status));
    let (potential, set_potential) = signal(repo.potential_for(&id));
    let (stage, set_stage) = signal(repo.stage_for(&id));
    let (notes, set_notes) = signal(repo.notes_for(&id));
    let (next_action, set_next_action) = signal(repo.next_action_for(&id));
    let (contract_value, set_contract_value) = signal(repo.contract_value_for(&id));
    let (last_contact, set_last_contact) = signal(repo.last_contact_for(&id));
    let (planned_action, set_planned_action) = signal(
        repo.next_action_for(&id)
            .map(|r| r.action)
            .unwrap_or(NextAction::Call),
    );
    let is_contacted = repo.contacted_ids().contains(&id);

    let b = StoredValue::new(business);

    let score = Memo::new(move |_| {
        let b = b.get_value();
        scoring::opportunity_score(b.phone.as_deref(), b.email.as_deref(), b.rating, potential.get())
    });
    let probability = Memo::new(move |_| {
        let b = b.get_value();
        scoring::probability_of_closing(potential.get(), stage.get(), visit.get(), b.rating, score.get())
    });
    let days_since = Memo::new(move |_| scoring::days_since_last_contact(last_contact.get(), today()));
    let overdue = Memo::new(move |_| {
        next_action
            .get()
            .is_some_and(|r| scoring::next_action_overdue(r.due, today()))
    });

    let on_visit = move |ev| {
        let Some(status) = VisitStatus::from_code(&event_target_value(&ev)) else {
            return;
        };
        let repo = ProspectionRepo::local();
        let b = b.get_value();
        workflow::apply_visit_outcome(&repo, &b, status, today());
        set_visit.set(Some(status));
        set_stage.set(repo.stage_for(&b.id));
        ctx.notify();
    };

    let on_potential = move |ev| {
        let repo = ProspectionRepo::local();
        let b = b.get_value();
        match PotentialLevel::from_code(&event_target_value(&ev)) {
            Some(level) => {
                workflow::rate_potential(&repo, &b, level);
                set_potential.set(Some(level));
            }
            None => {
                workflow::clear_potential(&repo, &b);
                set_potential.set(None);
            }
        }
        ctx.notify();
    };

    let on_stage = move |ev| {
        let Some(new_stage) = PipelineStage::from_code(&event_target_value(&ev)) else {
            return;
        };
        workflow::move_to_stage(&ProspectionRepo::local(), &b.get_value(), new_stage, today());
        set_stage.set(new_stage);
        ctx.notify();
    };

    let on_notes = move |ev| {
        let text = event_target_value(&ev);
        workflow::write_notes(&ProspectionRepo::local(), &b.get_value(), &text);
        set_notes.set(text);
        ctx.notify();
    };

    let on_planned_action = move |ev| {
        let Some(action) = NextAction::from_code(&event_target_value(&ev)) else {
            return;
        };
        set_planned_action.set(action);
        // an already scheduled follow-up keeps its due date
        if let Some(record) = next_action.get_untracked() {
            let record = NextActionRecord { action, ..record };
            workflow::schedule_next_action(&ProspectionRepo::local(), &b.get_value(), record.clone());
            set_next_action.set(Some(record));
            ctx.notify();
        }
    };

    let on_due = move |ev| {
        let Some(due) = parse_input_date(&event_target_value(&ev)) else {
            return;
        };
        let record = NextActionRecord {
            action: planned_action.get_untracked(),
            due,
        };
        workflow::schedule_next_action(&ProspectionRepo::local(), &b.get_value(), record.clone());
        set_next_action.set(Some(record));
        ctx.notify();
    };

    let on_contract_value = move |ev| {
        let Ok(value) = event_target_value(&ev).parse::<u64>() else {
            return;
        };
        workflow::set_contract_value(&ProspectionRepo::local(), &b.get_value(), value);
        set_contract_value.set(Some(value));
        ctx.notify();
    };

    let on_whatsapp = move |_| {
        let b = b.get_value();
        let Some(phone) = b.phone.clone() else { return };
        workflow::record_contact(&ProspectionRepo::local(), &b, today());
        set_last_contact.set(Some(today()));
        ctx.notify();
        open_in_new_tab(&links::whatsapp_link(&phone));
    };

    let on_email = move |_| {
        let b = b.get_value();
        let Some(email) = b.email.clone() else { return };
        workflow::record_contact(&ProspectionRepo::local(), &b, today());
        set_last_contact.set(Some(today()));
        ctx.notify();
        open_in_new_tab(&links::mailto_link(&email));
    };

    let on_map = move |_| {
        open_in_new_tab(&links::maps_link(&b.get_value().address));
    };

    let email_checkbox = email_selection.and_then(|selection| {
        b.get_value().email.clone().map(|email| {
            let toggled = email.clone();
            view! {
                <label class="email-select">
                    <input
                        type="checkbox"
                        prop:checked=move || selection.with(|s| s.contains(&email))
                        on:change=move |_| selection.update(|s| email_list::toggle(s, &toggled))
                    />
                    "Add to e-mail list"
                </label>
            }
        })
    });

    let header = {
        let b = b.get_value();
        view! {
            <div class="card-header">
                <h3>{b.name.clone()}</h3>
                {b.rating.map(|r| {
                    view! {
                        <span class="badge badge-rating">
                            {format!("⭐ {:.1}", r)}
                            {b.rating_count.map(|n| format!(" ({n})"))}
                        </span>
                    }
                })}
                {is_contacted.then(|| view! { <span class="badge badge-contacted">"✓ contacted"</span> })}
            </div>
            <p class="card-address">{b.address.clone()}</p>
            {b.phone.clone().map(|p| view! { <p class="card-line">{p}</p> })}
            {b.email.clone().map(|e| view! { <p class="card-line">{e}</p> })}
        }
    };

    view! {
        <div class="business-card">
            {header}

            <div class="card-badges">
                <span class="badge badge-score">
                    {move || {
                        let s = score.get();
                        format!("Score {}/{}", s.score, s.max)
                    }}
                </span>
                <span class="badge badge-probability">
                    {move || format!("{}% to close", probability.get())}
                </span>
                {move || {
                    last_contact
                        .get()
                        .zip(days_since.get())
                        .map(|(date, d)| {
                            view! {
                                <span class="badge">
                                    {format!("Last contact {} ({d} d ago)", format_date(date))}
                                </span>
                            }
                        })
                }}
                {move || {
                    overdue
                        .get()
                        .then(|| view! { <span class="badge badge-overdue">"Action overdue"</span> })
                }}
            </div>

            <div class="card-controls">
                <label>
                    "Visit"
                    <select
                        on:change=on_visit
                        prop:value=move || visit.get().map(|v| v.code().to_string()).unwrap_or_default()
                    >
                        <option value="">"—"</option>
                        {VisitStatus::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <label>
                    "Potential"
                    <select
                        on:change=on_potential
                        prop:value=move || {
                            potential.get().map(|p| p.code().to_string()).unwrap_or_default()
                        }
                    >
                        <option value="">"Not rated"</option>
                        {PotentialLevel::all()
                            .into_iter()
                            .map(|p| view! { <option value=p.code()>{p.display_name()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <label>
                    "Stage"
                    <select on:change=on_stage prop:value=move || stage.get().code().to_string()>
                        {PipelineStage::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <Show when=move || stage.get() == PipelineStage::ClosedWon>
                    <label>
                        "Contract value"
                        <input
                            type="number"
                            min="0"
                            on:change=on_contract_value
                            prop:value=move || {
                                contract_value.get().map(|v| v.to_string()).unwrap_or_default()
                            }
                        />
                    </label>
                </Show>

                <label>
                    "Next action"
                    <select
                        on:change=on_planned_action
                        prop:value=move || planned_action.get().code().to_string()
                    >
                        {NextAction::all()
                            .into_iter()
                            .map(|a| view! { <option value=a.code()>{a.display_name()}</option> })
                            .collect_view()}
                    </select>
                    <input
                        type="date"
                        on:change=on_due
                        prop:value=move || {
                            next_action
                                .get()
                                .map(|r| r.due.format("%Y-%m-%d").to_string())
                                .unwrap_or_default()
                        }
                    />
                </label>

                <label class="card-notes">
                    "Notes"
                    <textarea on:change=on_notes prop:value=move || notes.get()></textarea>
                </label>
            </div>

            <div class="card-actions">
                <button on:click=on_map>"View on map"</button>
                <button on:click=on_whatsapp disabled=b.get_value().phone.is_none()>
                    "WhatsApp"
                </button>
                <button on:click=on_email disabled=b.get_value().email.is_none()>
                    "E-mail"
                </button>
                {email_checkbox}
            </div>
        </div>
    }
}
