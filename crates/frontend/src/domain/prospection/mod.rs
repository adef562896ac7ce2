pub mod repository;
pub mod workflow;

pub use repository::ProspectionRepo;
