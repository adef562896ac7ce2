use leptos::prelude::*;

/// App-wide change signal for the prospection store.
///
/// The repository is plain localStorage, invisible to the reactive graph.
/// Mutating call sites bump this signal through [`ProspectionContext::notify`]
/// so that lists and dashboards re-read the store.
#[derive(Clone, Copy)]
pub struct ProspectionContext {
    refresh: RwSignal<usize>,
}

impl ProspectionContext {
    pub fn new() -> Self {
        Self {
            refresh: RwSignal::new(0),
        }
    }

    /// Subscribe the current reactive scope to repository changes.
    pub fn track(&self) {
        self.refresh.get();
    }

    pub fn notify(&self) {
        self.refresh.update(|n| *n += 1);
    }
}

impl Default for ProspectionContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_prospection() -> ProspectionContext {
    use_context::<ProspectionContext>().expect("ProspectionContext not provided")
}
