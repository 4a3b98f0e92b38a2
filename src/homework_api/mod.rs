mod client;
mod status;
mod validate;
mod verdict;

pub use client::HomeworkApi;
pub use status::parse_status;
pub use validate::check_response;
pub use verdict::Verdict;
