mod dashboard;
mod generator;

pub use dashboard::{DashboardView, DisciplineGroup, SubjectAreaSection};
pub use generator::ManhajGenerator;
