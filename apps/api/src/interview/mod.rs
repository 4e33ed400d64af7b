pub mod cache;
pub mod coach;
pub mod fallback;
pub mod feedback;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod records;
pub mod report;
pub mod resume;
pub mod roles;
pub mod session;
