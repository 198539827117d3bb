pub mod entry;
pub mod language;
pub mod profile;
pub mod report;
pub mod user;

pub use entry::Entry;
pub use language::Language;
pub use profile::Profile;
pub use report::Report;
pub use user::User;
