//! CLI command implementations

pub mod history;
pub mod serve;
pub mod show;

pub use history::HistoryArgs;
pub use serve::ServeArgs;
pub use show::ShowArgs;
