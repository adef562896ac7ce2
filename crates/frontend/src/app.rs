use crate::layout::global_context::ProspectionContext;
use crate::routes::routes::AppRoutes;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the repository change signal to the whole app via context.
    provide_context(ProspectionContext::new());

    view! {
        <AppRoutes />
    }
}
