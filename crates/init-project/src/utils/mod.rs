pub mod child;
pub mod files;
pub mod git;
pub mod log;
pub mod substitute;
pub mod wizard;
