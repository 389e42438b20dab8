pub mod carousel;
pub use carousel::CarouselRotator;

pub mod favorites;
pub use favorites::{FavoritesError, FavoritesFeed, FavoritesService};

pub mod overview;
pub use overview::{Overview, OverviewError, OverviewService};

pub mod search;
pub use search::{SearchError, SearchService};

pub mod session;
pub use session::{SessionContext, SessionError, SessionService, SignIn};

pub mod trending;
pub use trending::{TrendingError, TrendingService, aggregate};
