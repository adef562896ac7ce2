use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of an outreach visit, set by the rep on a business card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    AlreadyVisited,
    VisitLater,
    NotInterested,
}

impl VisitStatus {
    /// Stable code, matching the serialized form.
    pub fn code(&self) -> &'static str {
        match self {
            VisitStatus::AlreadyVisited => "already_visited",
            VisitStatus::VisitLater => "visit_later",
            VisitStatus::NotInterested => "not_interested",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "already_visited" => Some(VisitStatus::AlreadyVisited),
            "visit_later" => Some(VisitStatus::VisitLater),
            "not_interested" => Some(VisitStatus::NotInterested),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VisitStatus::AlreadyVisited => "Already visited",
            VisitStatus::VisitLater => "Visit later",
            VisitStatus::NotInterested => "Not interested",
        }
    }

    pub fn all() -> [VisitStatus; 3] {
        [
            VisitStatus::AlreadyVisited,
            VisitStatus::VisitLater,
            VisitStatus::NotInterested,
        ]
    }
}

/// Per-business visit record. `date` is present iff the status is
/// `AlreadyVisited` (the local calendar date of that visit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub status: VisitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Rep-assigned rating of a business. Absence of a rating is a distinct
/// state, not `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotentialLevel {
    High,
    Medium,
    Low,
}

impl PotentialLevel {
    /// Ordinal used for ranking: high > medium > low. An absent rating ranks
    /// with `Low` (1).
    pub fn ordinal(&self) -> u8 {
        match self {
            PotentialLevel::High => 3,
            PotentialLevel::Medium => 2,
            PotentialLevel::Low => 1,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PotentialLevel::High => "high",
            PotentialLevel::Medium => "medium",
            PotentialLevel::Low => "low",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "high" => Some(PotentialLevel::High),
            "medium" => Some(PotentialLevel::Medium),
            "low" => Some(PotentialLevel::Low),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PotentialLevel::High => "High",
            PotentialLevel::Medium => "Medium",
            PotentialLevel::Low => "Low",
        }
    }

    pub fn all() -> [PotentialLevel; 3] {
        [
            PotentialLevel::High,
            PotentialLevel::Medium,
            PotentialLevel::Low,
        ]
    }
}

/// Sales funnel stage. Businesses with no explicit stage read as `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    #[default]
    New,
    Visited,
    Negotiating,
    ClosedWon,
}

impl PipelineStage {
    pub fn code(&self) -> &'static str {
        match self {
            PipelineStage::New => "new",
            PipelineStage::Visited => "visited",
            PipelineStage::Negotiating => "negotiating",
            PipelineStage::ClosedWon => "closed_won",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "new" => Some(PipelineStage::New),
            "visited" => Some(PipelineStage::Visited),
            "negotiating" => Some(PipelineStage::Negotiating),
            "closed_won" => Some(PipelineStage::ClosedWon),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PipelineStage::New => "New",
            PipelineStage::Visited => "Visited",
            PipelineStage::Negotiating => "Negotiating",
            PipelineStage::ClosedWon => "Closed won",
        }
    }

    pub fn all() -> [PipelineStage; 4] {
        [
            PipelineStage::New,
            PipelineStage::Visited,
            PipelineStage::Negotiating,
            PipelineStage::ClosedWon,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Call,
    Visit,
    SendProposal,
    AwaitResponse,
}

impl NextAction {
    pub fn code(&self) -> &'static str {
        match self {
            NextAction::Call => "call",
            NextAction::Visit => "visit",
            NextAction::SendProposal => "send_proposal",
            NextAction::AwaitResponse => "await_response",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "call" => Some(NextAction::Call),
            "visit" => Some(NextAction::Visit),
            "send_proposal" => Some(NextAction::SendProposal),
            "await_response" => Some(NextAction::AwaitResponse),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NextAction::Call => "Call",
            NextAction::Visit => "Visit",
            NextAction::SendProposal => "Send proposal",
            NextAction::AwaitResponse => "Await response",
        }
    }

    pub fn all() -> [NextAction; 4] {
        [
            NextAction::Call,
            NextAction::Visit,
            NextAction::SendProposal,
            NextAction::AwaitResponse,
        ]
    }
}

/// Planned follow-up for a business, independent of pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextActionRecord {
    pub action: NextAction,
    pub due: NaiveDate,
}

/// Rep level derived from the count of closed-won businesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamificationLevel {
    Beginner,
    Bronze,
    Silver,
    Gold,
}

impl GamificationLevel {
    /// Thresholds are inclusive lower bounds, highest first.
    pub fn for_closed_won(count: usize) -> Self {
        if count >= 10 {
            GamificationLevel::Gold
        } else if count >= 5 {
            GamificationLevel::Silver
        } else if count >= 1 {
            GamificationLevel::Bronze
        } else {
            GamificationLevel::Beginner
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GamificationLevel::Beginner => "Beginner",
            GamificationLevel::Bronze => "Bronze",
            GamificationLevel::Silver => "Silver",
            GamificationLevel::Gold => "Gold",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            GamificationLevel::Beginner => "🌱",
            GamificationLevel::Bronze => "🥉",
            GamificationLevel::Silver => "🥈",
            GamificationLevel::Gold => "🥇",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&VisitStatus::AlreadyVisited).unwrap(),
            "\"already_visited\""
        );
        let back: VisitStatus = serde_json::from_str("\"visit_later\"").unwrap();
        assert_eq!(back, VisitStatus::VisitLater);
    }

    #[test]
    fn pipeline_stage_defaults_to_new() {
        assert_eq!(PipelineStage::default(), PipelineStage::New);
    }

    #[test]
    fn gamification_thresholds() {
        assert_eq!(
            GamificationLevel::for_closed_won(0),
            GamificationLevel::Beginner
        );
        assert_eq!(
            GamificationLevel::for_closed_won(1),
            GamificationLevel::Bronze
        );
        assert_eq!(
            GamificationLevel::for_closed_won(4),
            GamificationLevel::Bronze
        );
        assert_eq!(
            GamificationLevel::for_closed_won(5),
            GamificationLevel::Silver
        );
        assert_eq!(
            GamificationLevel::for_closed_won(9),
            GamificationLevel::Silver
        );
        assert_eq!(
            GamificationLevel::for_closed_won(10),
            GamificationLevel::Gold
        );
    }

    #[test]
    fn visit_record_omits_absent_date() {
        let rec = VisitRecord {
            status: VisitStatus::VisitLater,
            date: None,
        };
        assert_eq!(
            serde_json::to_string(&rec).unwrap(),
            "{\"status\":\"visit_later\"}"
        );
    }
}
