pub mod business;
pub mod prospection;

pub use business::Business;
pub use prospection::{
    GamificationLevel, NextAction, NextActionRecord, PipelineStage, PotentialLevel, VisitRecord,
    VisitStatus,
};
