pub mod prelude;

pub mod favorites;
pub mod movie_metrics;
pub mod tv_metrics;
pub mod users;
