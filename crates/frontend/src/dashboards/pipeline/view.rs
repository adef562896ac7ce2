use contracts::aggregation::{self, PipelineSummary};
use contracts::domain::{Business, GamificationLevel};
use leptos::prelude::*;

use crate::domain::prospection::ProspectionRepo;
use crate::layout::global_context::use_prospection;
use crate::shared::date_utils::today;

/// Everything the dashboard shows, recomputed from the store on every
/// repository change.
#[derive(Clone, PartialEq)]
struct DashboardData {
    summary: PipelineSummary,
    level: GamificationLevel,
    visited_today: usize,
    visited_week: usize,
    daily_goal: u32,
    monthly_goal: u32,
    revenue: u64,
    top: Vec<Business>,
    forgotten: Vec<Business>,
    top_cities: Vec<(String, usize)>,
    contacted: Vec<Business>,
}

fn load() -> DashboardData {
    let repo = ProspectionRepo::local();
    let businesses = repo.businesses();
    let potentials = repo.potential_all();
    let visits = repo.visit_status_all();
    let stages = repo.pipeline_all();

    let summary = aggregation::summarize(&businesses, &potentials, &visits, &stages);
    let level = GamificationLevel::for_closed_won(summary.closed_won);
    let top = aggregation::top_opportunities(&businesses, &potentials, &visits, 5)
        .into_iter()
        .cloned()
        .collect();
    let forgotten = aggregation::forgotten_opportunities(
        &businesses,
        &stages,
        &repo.negotiation_start_all(),
        today(),
    )
    .into_iter()
    .cloned()
    .collect();
    let revenue = aggregation::pipeline_revenue(&businesses, &stages, &repo.contract_value_all());
    let top_cities = aggregation::top_cities(&businesses, 5);

    DashboardData {
        summary,
        level,
        visited_today: repo.visited_today_count(today()),
        visited_week: repo.visited_this_week_count(today()),
        daily_goal: repo.daily_goal(),
        monthly_goal: repo.monthly_goal(),
        revenue,
        top,
        forgotten,
        top_cities,
        contacted: repo.contacted_businesses(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_prospection();
    let data = Memo::new(move |_| {
        ctx.track();
        load()
    });

    let on_daily_goal = move |ev| {
        if let Ok(goal) = event_target_value(&ev).parse::<i64>() {
            ProspectionRepo::local().set_daily_goal(goal);
            ctx.notify();
        }
    };
    let on_monthly_goal = move |ev| {
        if let Ok(goal) = event_target_value(&ev).parse::<i64>() {
            ProspectionRepo::local().set_monthly_goal(goal);
            ctx.notify();
        }
    };
    let on_clear_contacted = move |_| {
        ProspectionRepo::local().clear_contacted();
        ctx.notify();
    };

    view! {
        <section class="dashboard-page">
            <h2>"Pipeline dashboard"</h2>

            <div class="summary-grid">
                <div class="summary-card">
                    <span class="summary-value">{move || data.get().summary.total}</span>
                    <span class="summary-label">"In prospection"</span>
                </div>
                <div class="summary-card">
                    <span class="summary-value">{move || data.get().summary.high_potential}</span>
                    <span class="summary-label">"High potential"</span>
                </div>
                <div class="summary-card">
                    <span class="summary-value">{move || data.get().summary.visited}</span>
                    <span class="summary-label">"Visited"</span>
                </div>
                <div class="summary-card">
                    <span class="summary-value">{move || data.get().summary.negotiating}</span>
                    <span class="summary-label">"Negotiating"</span>
                </div>
                <div class="summary-card">
                    <span class="summary-value">{move || data.get().summary.closed_won}</span>
                    <span class="summary-label">"Closed won"</span>
                </div>
                <div class="summary-card">
                    <span class="summary-value">
                        {move || format!("{}%", data.get().summary.conversion_pct)}
                    </span>
                    <span class="summary-label">"Conversion"</span>
                </div>
                <div class="summary-card">
                    <span class="summary-value">{move || data.get().summary.pending}</span>
                    <span class="summary-label">"Pending"</span>
                </div>
                <div class="summary-card">
                    <span class="summary-value">{move || format!("R$ {}", data.get().revenue)}</span>
                    <span class="summary-label">"Pipeline revenue"</span>
                </div>
            </div>

            <div class="goals-panel">
                <span class="level-badge">
                    {move || {
                        let level = data.get().level;
                        format!("{} {}", level.emoji(), level.label())
                    }}
                </span>
                <p>
                    {move || {
                        let d = data.get();
                        format!(
                            "Visited today: {}/{} (this week: {})",
                            d.visited_today, d.daily_goal, d.visited_week,
                        )
                    }}
                </p>
                <label>
                    "Daily goal"
                    <input
                        type="number"
                        min="0"
                        prop:value=move || data.get().daily_goal.to_string()
                        on:change=on_daily_goal
                    />
                </label>
                <label>
                    "Monthly goal"
                    <input
                        type="number"
                        min="0"
                        prop:value=move || data.get().monthly_goal.to_string()
                        on:change=on_monthly_goal
                    />
                </label>
            </div>

            <div class="dashboard-lists">
                <div class="dashboard-list">
                    <h3>"Top 5 opportunities"</h3>
                    <ul>
                        <For
                            each=move || data.get().top
                            key=|b| b.id.clone()
                            children=move |b: Business| view! { <li>{b.name.clone()}</li> }
                        />
                    </ul>
                </div>

                <div class="dashboard-list">
                    <h3>"Forgotten opportunities"</h3>
                    <Show
                        when=move || !data.get().forgotten.is_empty()
                        fallback=|| view! { <p class="empty-hint">"No stale negotiations."</p> }
                    >
                        <ul>
                            <For
                                each=move || data.get().forgotten
                                key=|b| b.id.clone()
                                children=move |b: Business| {
                                    view! { <li class="forgotten">{b.name.clone()}</li> }
                                }
                            />
                        </ul>
                    </Show>
                </div>

                <div class="dashboard-list">
                    <h3>"Top cities worked"</h3>
                    <ul>
                        <For
                            each=move || data.get().top_cities
                            key=|(city, _)| city.clone()
                            children=move |(city, count): (String, usize)| {
                                view! { <li>{format!("{city}: {count}")}</li> }
                            }
                        />
                    </ul>
                </div>

                <div class="dashboard-list">
                    <h3>"Contacted businesses"</h3>
                    <button on:click=on_clear_contacted disabled=move || data.get().contacted.is_empty()>
                        "Clear all"
                    </button>
                    <ul>
                        <For
                            each=move || data.get().contacted
                            key=|b| b.id.clone()
                            children=move |b: Business| view! { <li>{b.name.clone()}</li> }
                        />
                    </ul>
                </div>
            </div>
        </section>
    }
}
