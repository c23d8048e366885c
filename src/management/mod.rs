mod auth;
mod report;

pub use auth::TokenManager;
pub use report::ReportWriter;
