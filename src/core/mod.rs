pub mod export;
pub mod hours;
pub mod log;
pub mod progress;
pub mod report;
