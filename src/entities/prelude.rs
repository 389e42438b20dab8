pub use super::favorites::Entity as Favorites;
pub use super::movie_metrics::Entity as MovieMetrics;
pub use super::tv_metrics::Entity as TvMetrics;
pub use super::users::Entity as Users;
