//! Pure derivation functions behind the badges and percentages on the
//! business cards. None of these touch storage; callers pass the current
//! data and, where dates matter, the current local calendar date.

use chrono::NaiveDate;

use crate::domain::{PipelineStage, PotentialLevel, VisitStatus};

/// Ratings above this are treated as a strong public reputation signal.
pub const GOOD_RATING_THRESHOLD: f64 = 4.3;

/// Opportunity score out of a fixed maximum of 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpportunityScore {
    pub score: u8,
    pub max: u8,
}

impl OpportunityScore {
    pub const MAX: u8 = 10;
}

/// Score 0-10: +2 phone (WhatsApp-reachable), +1 email, +1 rating > 4.3,
/// +2 high potential, +1 medium.
pub fn opportunity_score(
    phone: Option<&str>,
    email: Option<&str>,
    rating: Option<f64>,
    potential: Option<PotentialLevel>,
) -> OpportunityScore {
    let mut score: u8 = 0;
    if phone.is_some_and(|p| !p.is_empty()) {
        score += 2;
    }
    if email.is_some_and(|e| !e.is_empty()) {
        score += 1;
    }
    if rating.is_some_and(|r| r > GOOD_RATING_THRESHOLD) {
        score += 1;
    }
    match potential {
        Some(PotentialLevel::High) => score += 2,
        Some(PotentialLevel::Medium) => score += 1,
        Some(PotentialLevel::Low) | None => {}
    }
    OpportunityScore {
        score: score.min(OpportunityScore::MAX),
        max: OpportunityScore::MAX,
    }
}

/// Heuristic probability of closing, 0-100.
///
/// A closed-won business is always 100; everything else starts from a base
/// of 10 and accumulates weighted signals, clamped to 100.
pub fn probability_of_closing(
    potential: Option<PotentialLevel>,
    stage: PipelineStage,
    visit_status: Option<VisitStatus>,
    rating: Option<f64>,
    score: OpportunityScore,
) -> u8 {
    if stage == PipelineStage::ClosedWon {
        return 100;
    }

    let mut probability: i32 = 10;
    probability += match potential {
        Some(PotentialLevel::High) => 25,
        Some(PotentialLevel::Medium) => 15,
        Some(PotentialLevel::Low) => 5,
        None => 0,
    };
    if stage == PipelineStage::Negotiating {
        probability += 20;
    }
    if visit_status == Some(VisitStatus::AlreadyVisited) {
        probability += 15;
    }
    if rating.is_some_and(|r| r > GOOD_RATING_THRESHOLD) {
        probability += 10;
    }
    // Scale the 0-10 opportunity score into a 0-15 contribution.
    probability += (f64::from(score.score) / f64::from(score.max) * 15.0).round() as i32;

    probability.clamp(0, 100) as u8
}

/// Whole days elapsed since the last recorded contact. `None` when no
/// contact was recorded or the stored date lies in the future (a negative
/// day count has no sales meaning).
pub fn days_since_last_contact(last_contact: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    let date = last_contact?;
    let days = (today - date).num_days();
    if days < 0 {
        None
    } else {
        Some(days)
    }
}

/// A next action is overdue only when its due date is strictly in the past.
/// A same-day due action is never overdue.
pub fn next_action_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    due < today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn score_counts_each_signal() {
        let s = opportunity_score(
            Some("+5511999999999"),
            Some("contact@shop.example"),
            Some(4.8),
            Some(PotentialLevel::High),
        );
        assert_eq!(s.score, 6);
        assert_eq!(s.max, 10);
    }

    #[test]
    fn score_is_zero_without_signals() {
        let s = opportunity_score(None, None, None, None);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn low_potential_scores_like_absent() {
        let with_low = opportunity_score(Some("x"), None, None, Some(PotentialLevel::Low));
        let without = opportunity_score(Some("x"), None, None, None);
        assert_eq!(with_low.score, without.score);
    }

    #[test]
    fn rating_at_threshold_does_not_count() {
        let s = opportunity_score(None, None, Some(4.3), None);
        assert_eq!(s.score, 0);
        let s = opportunity_score(None, None, Some(4.31), None);
        assert_eq!(s.score, 1);
    }

    #[test]
    fn score_is_monotone_in_each_signal() {
        let base = opportunity_score(None, Some("a@b"), Some(4.5), Some(PotentialLevel::Medium));
        let with_phone =
            opportunity_score(Some("p"), Some("a@b"), Some(4.5), Some(PotentialLevel::Medium));
        assert!(with_phone.score >= base.score);

        let medium = opportunity_score(Some("p"), None, None, Some(PotentialLevel::Medium));
        let high = opportunity_score(Some("p"), None, None, Some(PotentialLevel::High));
        assert!(high.score >= medium.score);
    }

    #[test]
    fn closed_won_short_circuits_to_100() {
        let prob = probability_of_closing(
            None,
            PipelineStage::ClosedWon,
            None,
            None,
            OpportunityScore { score: 0, max: 10 },
        );
        assert_eq!(prob, 100);
    }

    #[test]
    fn probability_is_clamped_at_100() {
        let score = opportunity_score(Some("p"), Some("e"), Some(5.0), Some(PotentialLevel::High));
        assert_eq!(score.score, 6);
        let prob = probability_of_closing(
            Some(PotentialLevel::High),
            PipelineStage::Negotiating,
            Some(VisitStatus::AlreadyVisited),
            Some(5.0),
            OpportunityScore { score: 10, max: 10 },
        );
        // 10 + 25 + 20 + 15 + 10 + 15 = 95, under the clamp
        assert_eq!(prob, 95);
        assert!(prob <= 100);
    }

    #[test]
    fn minimal_probability_is_base_only() {
        let prob = probability_of_closing(
            None,
            PipelineStage::New,
            None,
            None,
            OpportunityScore { score: 0, max: 10 },
        );
        assert_eq!(prob, 10);
    }

    #[test]
    fn end_to_end_scenario_from_field_data() {
        // phone + rating 4.8 + high potential
        let score = opportunity_score(Some("+551199999999"), None, Some(4.8), Some(PotentialLevel::High));
        assert_eq!(score.score, 5);

        let prob = probability_of_closing(
            Some(PotentialLevel::High),
            PipelineStage::Negotiating,
            Some(VisitStatus::AlreadyVisited),
            Some(4.8),
            score,
        );
        // 10 + 25 + 20 + 15 + 10 + round(5/10*15 = 8) = 88
        assert_eq!(prob, 88);
    }

    #[test]
    fn days_since_last_contact_handles_edges() {
        let today = date(2025, 6, 20);
        assert_eq!(days_since_last_contact(None, today), None);
        assert_eq!(days_since_last_contact(Some(today), today), Some(0));
        assert_eq!(
            days_since_last_contact(Some(date(2025, 6, 15)), today),
            Some(5)
        );
        // future dates have no sales meaning
        assert_eq!(days_since_last_contact(Some(date(2025, 6, 21)), today), None);
    }

    #[test]
    fn same_day_due_action_is_not_overdue() {
        let today = date(2025, 6, 20);
        assert!(!next_action_overdue(today, today));
        assert!(next_action_overdue(date(2025, 6, 19), today));
        assert!(!next_action_overdue(date(2025, 6, 21), today));
    }
}
