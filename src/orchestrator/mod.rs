pub mod pull_check;

pub use pull_check::PullCheckOrchestrator;
