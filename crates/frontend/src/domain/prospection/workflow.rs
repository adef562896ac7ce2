//! Orchestration above the repository.
//!
//! The repository maps are independent stores, but several user actions
//! touch more than one of them: recording a visit also promotes the
//! pipeline stage, entering negotiation stamps the start date, and any
//! mutation must upsert the business snapshot so the prospection list
//! keeps working after the search results are gone. Call sites go through
//! these functions instead of issuing the writes themselves.
//!
//! Writes are sequential with no transaction; an interrupted sequence
//! (page navigation mid-handler) can leave partial state.

use chrono::NaiveDate;

use contracts::domain::{
    Business, NextActionRecord, PipelineStage, PotentialLevel, VisitRecord, VisitStatus,
};

use crate::shared::storage::StringStore;

use super::repository::ProspectionRepo;

/// Record a visit outcome. Marking a business as already visited stamps
/// today's date on the record and promotes a `New` pipeline stage to
/// `Visited`; a stage further down the funnel is left alone.
pub fn apply_visit_outcome<S: StringStore>(
    repo: &ProspectionRepo<S>,
    business: &Business,
    status: VisitStatus,
    today: NaiveDate,
) {
    let date = (status == VisitStatus::AlreadyVisited).then_some(today);
    repo.set_visit_status(&business.id, VisitRecord { status, date });

    if status == VisitStatus::AlreadyVisited && repo.stage_for(&business.id) == PipelineStage::New {
        repo.set_stage(&business.id, PipelineStage::Visited);
    }
    repo.upsert_business(business);
}

/// Move a business to a pipeline stage. Entering `Negotiating` stamps the
/// negotiation start date once; re-entering keeps the original date.
/// Contract value and negotiation start are deliberately not cleared when
/// the stage moves away.
pub fn move_to_stage<S: StringStore>(
    repo: &ProspectionRepo<S>,
    business: &Business,
    stage: PipelineStage,
    today: NaiveDate,
) {
    repo.set_stage(&business.id, stage);
    if stage == PipelineStage::Negotiating && repo.negotiation_start_for(&business.id).is_none() {
        repo.set_negotiation_start(&business.id, today);
    }
    repo.upsert_business(business);
}

/// Stamp an outreach contact (click-to-WhatsApp or click-to-email).
pub fn record_contact<S: StringStore>(
    repo: &ProspectionRepo<S>,
    business: &Business,
    today: NaiveDate,
) {
    repo.set_last_contact(&business.id, today);
    repo.mark_contacted(business);
    repo.upsert_business(business);
}

pub fn rate_potential<S: StringStore>(
    repo: &ProspectionRepo<S>,
    business: &Business,
    level: PotentialLevel,
) {
    repo.set_potential(&business.id, level);
    repo.upsert_business(business);
}

pub fn clear_potential<S: StringStore>(repo: &ProspectionRepo<S>, business: &Business) {
    repo.clear_potential(&business.id);
    repo.upsert_business(business);
}

pub fn write_notes<S: StringStore>(repo: &ProspectionRepo<S>, business: &Business, text: &str) {
    repo.set_notes(&business.id, text);
    repo.upsert_business(business);
}

pub fn schedule_next_action<S: StringStore>(
    repo: &ProspectionRepo<S>,
    business: &Business,
    record: NextActionRecord,
) {
    repo.set_next_action(&business.id, record);
    repo.upsert_business(business);
}

pub fn set_contract_value<S: StringStore>(
    repo: &ProspectionRepo<S>,
    business: &Business,
    value: u64,
) {
    repo.set_contract_value(&business.id, value);
    repo.upsert_business(business);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;
    use contracts::domain::NextAction;

    fn repo() -> ProspectionRepo<MemoryStore> {
        ProspectionRepo::new(MemoryStore::new())
    }

    fn biz(id: &str) -> Business {
        Business::new(id, "Bakery", "Main St, 1")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn visit_promotes_new_stage_and_stamps_date() {
        let repo = repo();
        let b = biz("b1");
        let today = date(2025, 6, 20);

        apply_visit_outcome(&repo, &b, VisitStatus::AlreadyVisited, today);

        let record = repo.visit_status_for("b1").unwrap();
        assert_eq!(record.status, VisitStatus::AlreadyVisited);
        assert_eq!(record.date, Some(today));
        assert_eq!(repo.stage_for("b1"), PipelineStage::Visited);
        // snapshot was created lazily
        assert_eq!(repo.businesses().len(), 1);
    }

    #[test]
    fn visit_does_not_demote_later_stages() {
        let repo = repo();
        let b = biz("b1");
        let today = date(2025, 6, 20);

        move_to_stage(&repo, &b, PipelineStage::Negotiating, today);
        apply_visit_outcome(&repo, &b, VisitStatus::AlreadyVisited, today);

        assert_eq!(repo.stage_for("b1"), PipelineStage::Negotiating);
    }

    #[test]
    fn non_visit_statuses_carry_no_date_and_no_transition() {
        let repo = repo();
        let b = biz("b1");

        apply_visit_outcome(&repo, &b, VisitStatus::VisitLater, date(2025, 6, 20));

        let record = repo.visit_status_for("b1").unwrap();
        assert_eq!(record.date, None);
        assert_eq!(repo.stage_for("b1"), PipelineStage::New);
    }

    #[test]
    fn negotiation_start_is_stamped_once() {
        let repo = repo();
        let b = biz("b1");

        move_to_stage(&repo, &b, PipelineStage::Negotiating, date(2025, 6, 1));
        move_to_stage(&repo, &b, PipelineStage::Visited, date(2025, 6, 5));
        move_to_stage(&repo, &b, PipelineStage::Negotiating, date(2025, 6, 10));

        // the original date survives a round trip out of negotiation
        assert_eq!(repo.negotiation_start_for("b1"), Some(date(2025, 6, 1)));
    }

    #[test]
    fn stale_contract_value_survives_stage_change() {
        let repo = repo();
        let b = biz("b1");

        move_to_stage(&repo, &b, PipelineStage::ClosedWon, date(2025, 6, 1));
        set_contract_value(&repo, &b, 900);
        move_to_stage(&repo, &b, PipelineStage::Negotiating, date(2025, 6, 2));

        assert_eq!(repo.contract_value_for("b1"), Some(900));
    }

    #[test]
    fn record_contact_stamps_date_and_marks_contacted() {
        let repo = repo();
        let b = biz("b1");
        let today = date(2025, 6, 20);

        record_contact(&repo, &b, today);

        assert_eq!(repo.last_contact_for("b1"), Some(today));
        assert!(repo.contacted_ids().contains("b1"));
        assert_eq!(repo.businesses().len(), 1);
    }

    #[test]
    fn every_mutation_upserts_the_snapshot() {
        let repo = repo();
        let b = biz("b1");

        rate_potential(&repo, &b, PotentialLevel::High);
        assert_eq!(repo.businesses().len(), 1);

        write_notes(&repo, &biz("b2"), "call back tuesday");
        schedule_next_action(
            &repo,
            &biz("b3"),
            NextActionRecord {
                action: NextAction::Call,
                due: date(2025, 7, 1),
            },
        );
        assert_eq!(repo.businesses().len(), 3);
    }

    #[test]
    fn clear_potential_removes_rating_but_keeps_snapshot() {
        let repo = repo();
        let b = biz("b1");

        rate_potential(&repo, &b, PotentialLevel::Medium);
        clear_potential(&repo, &b);

        assert_eq!(repo.potential_for("b1"), None);
        assert_eq!(repo.businesses().len(), 1);
    }
}
