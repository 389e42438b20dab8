pub mod favorites;
pub mod metrics;
pub mod users;
