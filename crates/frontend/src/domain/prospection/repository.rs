//! Typed accessors over the prospection maps in localStorage.
//!
//! Every per-business map is stored as one JSON blob keyed by business id
//! and mutated with a whole-map read-modify-write cycle. That is fine for
//! the single-threaded browser event loop; concurrent tabs race and the
//! last write wins. Maps are sparse: an absent key means "no data", except
//! the pipeline stage which reads as [`PipelineStage::New`].
//!
//! Cross-map side effects (auto stage transition on a visit, negotiation
//! start stamping, snapshot upserts) live in [`super::workflow`], not here.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Weekday};
use serde::de::DeserializeOwned;
use serde::Serialize;

use contracts::domain::{
    Business, NextActionRecord, PipelineStage, PotentialLevel, VisitRecord, VisitStatus,
};

use crate::shared::storage::{get_json, set_json, LocalStore, StringStore};

/// Storage keys, versioned so a future schema change can migrate or discard
/// old blobs instead of misparsing them.
mod keys {
    pub const VISIT_STATUS: &str = "prospection_visit_status_v1";
    pub const POTENTIAL: &str = "prospection_potential_v1";
    pub const NOTES: &str = "prospection_notes_v1";
    pub const PIPELINE: &str = "prospection_pipeline_v1";
    pub const NEXT_ACTION: &str = "prospection_next_action_v1";
    pub const LAST_CONTACT: &str = "prospection_last_contact_v1";
    pub const CONTRACT_VALUE: &str = "prospection_contract_value_v1";
    pub const NEGOTIATION_START: &str = "prospection_negotiation_start_v1";
    pub const BUSINESSES: &str = "prospection_businesses_v1";
    pub const DAILY_GOAL: &str = "prospection_daily_goal_v1";
    pub const MONTHLY_GOAL: &str = "prospection_monthly_goal_v1";
    pub const CONTACTED_IDS: &str = "contacted_businesses_v1";
    pub const CONTACTED_DATA: &str = "contacted_businesses_data_v1";
}

pub const DEFAULT_DAILY_GOAL: u32 = 20;
pub const DEFAULT_MONTHLY_GOAL: u32 = 200;

pub struct ProspectionRepo<S: StringStore> {
    store: S,
}

impl ProspectionRepo<LocalStore> {
    /// Repository over browser localStorage.
    pub fn local() -> Self {
        Self::new(LocalStore)
    }
}

impl<S: StringStore> ProspectionRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn map<V: DeserializeOwned>(&self, key: &str) -> HashMap<String, V> {
        get_json(&self.store, key, HashMap::new())
    }

    fn put<V: Serialize + DeserializeOwned>(&self, key: &str, id: &str, value: V) {
        let mut map: HashMap<String, V> = self.map(key);
        map.insert(id.to_string(), value);
        set_json(&self.store, key, &map);
    }

    fn entry<V: DeserializeOwned>(&self, key: &str, id: &str) -> Option<V> {
        let mut map: HashMap<String, V> = self.map(key);
        map.remove(id)
    }

    // --- visit status -----------------------------------------------------

    pub fn visit_status_all(&self) -> HashMap<String, VisitRecord> {
        self.map(keys::VISIT_STATUS)
    }

    pub fn set_visit_status(&self, id: &str, record: VisitRecord) {
        self.put(keys::VISIT_STATUS, id, record);
    }

    pub fn visit_status_for(&self, id: &str) -> Option<VisitRecord> {
        self.entry(keys::VISIT_STATUS, id)
    }

    // --- potential --------------------------------------------------------

    pub fn potential_all(&self) -> HashMap<String, PotentialLevel> {
        self.map(keys::POTENTIAL)
    }

    pub fn set_potential(&self, id: &str, level: PotentialLevel) {
        self.put(keys::POTENTIAL, id, level);
    }

    /// Remove the rating entirely. "Unset" is distinct from `Low`.
    pub fn clear_potential(&self, id: &str) {
        let mut map = self.potential_all();
        map.remove(id);
        set_json(&self.store, keys::POTENTIAL, &map);
    }

    pub fn potential_for(&self, id: &str) -> Option<PotentialLevel> {
        self.entry(keys::POTENTIAL, id)
    }

    // --- notes ------------------------------------------------------------

    pub fn notes_all(&self) -> HashMap<String, String> {
        self.map(keys::NOTES)
    }

    pub fn set_notes(&self, id: &str, text: &str) {
        self.put(keys::NOTES, id, text.to_string());
    }

    pub fn notes_for(&self, id: &str) -> String {
        self.entry(keys::NOTES, id).unwrap_or_default()
    }

    // --- pipeline ---------------------------------------------------------

    pub fn pipeline_all(&self) -> HashMap<String, PipelineStage> {
        self.map(keys::PIPELINE)
    }

    /// Writes the stage only. Entering `Negotiating` is expected to go
    /// through [`super::workflow::move_to_stage`], which also stamps the
    /// negotiation start date.
    pub fn set_stage(&self, id: &str, stage: PipelineStage) {
        self.put(keys::PIPELINE, id, stage);
    }

    /// Businesses never explicitly placed read as `New`.
    pub fn stage_for(&self, id: &str) -> PipelineStage {
        self.entry(keys::PIPELINE, id).unwrap_or_default()
    }

    // --- next action ------------------------------------------------------

    pub fn next_action_all(&self) -> HashMap<String, NextActionRecord> {
        self.map(keys::NEXT_ACTION)
    }

    pub fn set_next_action(&self, id: &str, record: NextActionRecord) {
        self.put(keys::NEXT_ACTION, id, record);
    }

    pub fn next_action_for(&self, id: &str) -> Option<NextActionRecord> {
        self.entry(keys::NEXT_ACTION, id)
    }

    // --- last contact -----------------------------------------------------

    pub fn last_contact_all(&self) -> HashMap<String, NaiveDate> {
        self.map(keys::LAST_CONTACT)
    }

    pub fn set_last_contact(&self, id: &str, date: NaiveDate) {
        self.put(keys::LAST_CONTACT, id, date);
    }

    pub fn last_contact_for(&self, id: &str) -> Option<NaiveDate> {
        self.entry(keys::LAST_CONTACT, id)
    }

    // --- contract value ---------------------------------------------------

    pub fn contract_value_all(&self) -> HashMap<String, u64> {
        self.map(keys::CONTRACT_VALUE)
    }

    pub fn set_contract_value(&self, id: &str, value: u64) {
        self.put(keys::CONTRACT_VALUE, id, value);
    }

    pub fn contract_value_for(&self, id: &str) -> Option<u64> {
        self.entry(keys::CONTRACT_VALUE, id)
    }

    // --- negotiation start ------------------------------------------------

    pub fn negotiation_start_all(&self) -> HashMap<String, NaiveDate> {
        self.map(keys::NEGOTIATION_START)
    }

    pub fn set_negotiation_start(&self, id: &str, date: NaiveDate) {
        self.put(keys::NEGOTIATION_START, id, date);
    }

    pub fn negotiation_start_for(&self, id: &str) -> Option<NaiveDate> {
        self.entry(keys::NEGOTIATION_START, id)
    }

    // --- business snapshots -----------------------------------------------

    /// Upsert by id, full overwrite of the snapshot fields.
    pub fn upsert_business(&self, business: &Business) {
        self.put(keys::BUSINESSES, &business.id, business.clone());
    }

    /// All snapshots, for the prospection list view.
    pub fn businesses(&self) -> Vec<Business> {
        let map: HashMap<String, Business> = self.map(keys::BUSINESSES);
        map.into_values().collect()
    }

    // --- goals ------------------------------------------------------------

    pub fn daily_goal(&self) -> u32 {
        read_goal(&self.store, keys::DAILY_GOAL, DEFAULT_DAILY_GOAL)
    }

    pub fn set_daily_goal(&self, goal: i64) {
        set_json(&self.store, keys::DAILY_GOAL, &clamp_goal(goal));
    }

    pub fn monthly_goal(&self) -> u32 {
        read_goal(&self.store, keys::MONTHLY_GOAL, DEFAULT_MONTHLY_GOAL)
    }

    pub fn set_monthly_goal(&self, goal: i64) {
        set_json(&self.store, keys::MONTHLY_GOAL, &clamp_goal(goal));
    }

    // --- derived counts ---------------------------------------------------

    /// Businesses visited today. Only `AlreadyVisited` records count; a
    /// stray date on another status is ignored.
    pub fn visited_today_count(&self, today: NaiveDate) -> usize {
        self.visit_status_all()
            .values()
            .filter(|r| r.status == VisitStatus::AlreadyVisited && r.date == Some(today))
            .count()
    }

    /// Businesses visited in the current Monday-start week.
    pub fn visited_this_week_count(&self, today: NaiveDate) -> usize {
        let week = today.week(Weekday::Mon);
        let (first, last) = (week.first_day(), week.last_day());
        self.visit_status_all()
            .values()
            .filter(|r| r.status == VisitStatus::AlreadyVisited)
            .filter(|r| r.date.is_some_and(|d| d >= first && d <= last))
            .count()
    }

    // --- contacted list ---------------------------------------------------

    pub fn contacted_ids(&self) -> HashSet<String> {
        let ids: Vec<String> = get_json(&self.store, keys::CONTACTED_IDS, Vec::new());
        ids.into_iter().collect()
    }

    pub fn mark_contacted(&self, business: &Business) {
        let mut ids = self.contacted_ids();
        if ids.insert(business.id.clone()) {
            let ids: Vec<&String> = ids.iter().collect();
            set_json(&self.store, keys::CONTACTED_IDS, &ids);
        }

        let mut data: Vec<Business> = get_json(&self.store, keys::CONTACTED_DATA, Vec::new());
        if !data.iter().any(|b| b.id == business.id) {
            data.push(business.clone());
            set_json(&self.store, keys::CONTACTED_DATA, &data);
        }
    }

    pub fn contacted_businesses(&self) -> Vec<Business> {
        get_json(&self.store, keys::CONTACTED_DATA, Vec::new())
    }

    /// Bulk clear of the contacted list. The prospection maps are untouched.
    pub fn clear_contacted(&self) {
        self.store.remove(keys::CONTACTED_IDS);
        self.store.remove(keys::CONTACTED_DATA);
    }
}

fn clamp_goal(goal: i64) -> u32 {
    goal.clamp(0, u32::MAX as i64) as u32
}

fn read_goal<S: StringStore>(store: &S, key: &str, default: u32) -> u32 {
    let value: i64 = get_json(store, key, i64::from(default));
    if value < 0 {
        default
    } else {
        clamp_goal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;

    fn repo() -> ProspectionRepo<MemoryStore> {
        ProspectionRepo::new(MemoryStore::new())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn visit_status_round_trip() {
        let repo = repo();
        let record = VisitRecord {
            status: VisitStatus::AlreadyVisited,
            date: Some(date(2025, 6, 20)),
        };
        repo.set_visit_status("b1", record.clone());
        assert_eq!(repo.visit_status_for("b1"), Some(record));
        assert_eq!(repo.visit_status_for("b2"), None);
    }

    #[test]
    fn potential_round_trip_and_clear() {
        let repo = repo();
        repo.set_potential("b1", PotentialLevel::Low);
        assert_eq!(repo.potential_for("b1"), Some(PotentialLevel::Low));

        repo.clear_potential("b1");
        // unset, not "low"
        assert_eq!(repo.potential_for("b1"), None);
    }

    #[test]
    fn notes_default_to_empty() {
        let repo = repo();
        assert_eq!(repo.notes_for("b1"), "");
        repo.set_notes("b1", "spoke to the owner");
        assert_eq!(repo.notes_for("b1"), "spoke to the owner");
    }

    #[test]
    fn stage_defaults_to_new() {
        let repo = repo();
        assert_eq!(repo.stage_for("b1"), PipelineStage::New);
        repo.set_stage("b1", PipelineStage::Negotiating);
        assert_eq!(repo.stage_for("b1"), PipelineStage::Negotiating);
    }

    #[test]
    fn next_action_round_trip() {
        let repo = repo();
        let record = NextActionRecord {
            action: contracts::domain::NextAction::SendProposal,
            due: date(2025, 7, 1),
        };
        repo.set_next_action("b1", record.clone());
        assert_eq!(repo.next_action_for("b1"), Some(record));
    }

    #[test]
    fn last_contact_round_trip() {
        let repo = repo();
        repo.set_last_contact("b1", date(2025, 6, 18));
        assert_eq!(repo.last_contact_for("b1"), Some(date(2025, 6, 18)));
    }

    #[test]
    fn contract_value_round_trip() {
        let repo = repo();
        repo.set_contract_value("b1", 1500);
        assert_eq!(repo.contract_value_for("b1"), Some(1500));
    }

    #[test]
    fn negotiation_start_round_trip() {
        let repo = repo();
        repo.set_negotiation_start("b1", date(2025, 6, 1));
        assert_eq!(repo.negotiation_start_for("b1"), Some(date(2025, 6, 1)));
    }

    #[test]
    fn business_snapshot_upsert_overwrites() {
        let repo = repo();
        let mut b = Business::new("b1", "Bakery", "Main St, 1");
        repo.upsert_business(&b);

        b.phone = Some("+5511999999999".to_string());
        repo.upsert_business(&b);

        let all = repo.businesses();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].phone.as_deref(), Some("+5511999999999"));
    }

    #[test]
    fn goals_default_and_clamp() {
        let repo = repo();
        assert_eq!(repo.daily_goal(), DEFAULT_DAILY_GOAL);
        assert_eq!(repo.monthly_goal(), DEFAULT_MONTHLY_GOAL);

        repo.set_daily_goal(-5);
        assert_eq!(repo.daily_goal(), 0);
        repo.set_monthly_goal(300);
        assert_eq!(repo.monthly_goal(), 300);
    }

    #[test]
    fn corrupt_goal_resets_to_default() {
        let store = MemoryStore::new();
        store.set("prospection_daily_goal_v1", "\"not a number\"");
        let repo = ProspectionRepo::new(store);
        assert_eq!(repo.daily_goal(), DEFAULT_DAILY_GOAL);
    }

    #[test]
    fn visited_counts_ignore_other_statuses() {
        let repo = repo();
        let today = date(2025, 6, 20); // a Friday
        repo.set_visit_status(
            "visited_today",
            VisitRecord {
                status: VisitStatus::AlreadyVisited,
                date: Some(today),
            },
        );
        repo.set_visit_status(
            "visited_monday",
            VisitRecord {
                status: VisitStatus::AlreadyVisited,
                date: Some(date(2025, 6, 16)),
            },
        );
        repo.set_visit_status(
            "visited_last_week",
            VisitRecord {
                status: VisitStatus::AlreadyVisited,
                date: Some(date(2025, 6, 13)),
            },
        );
        // stray date on a non-visited status must not count
        repo.set_visit_status(
            "later",
            VisitRecord {
                status: VisitStatus::VisitLater,
                date: Some(today),
            },
        );

        assert_eq!(repo.visited_today_count(today), 1);
        assert_eq!(repo.visited_this_week_count(today), 2);
    }

    #[test]
    fn contacted_list_marks_and_clears() {
        let repo = repo();
        let b = Business::new("b1", "Bakery", "Main St, 1");
        repo.mark_contacted(&b);
        repo.mark_contacted(&b); // idempotent

        assert!(repo.contacted_ids().contains("b1"));
        assert_eq!(repo.contacted_businesses().len(), 1);

        repo.clear_contacted();
        assert!(repo.contacted_ids().is_empty());
        assert!(repo.contacted_businesses().is_empty());
    }
}
