pub mod answers;
pub mod notify;
pub mod priority;
pub mod raffle;
pub mod report;
pub mod response;
pub mod store;
