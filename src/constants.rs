pub mod limits {

    /// Entries surfaced in the carousel and the search-screen preview.
    pub const CAROUSEL_TRENDING: usize = 6;

    /// Entries surfaced in full list views.
    pub const LIST_TRENDING: usize = 30;
}

pub mod intervals {
    use std::time::Duration;

    /// Carousel auto-advance period.
    pub const CAROUSEL_ADVANCE: Duration = Duration::from_secs(4);
}

pub mod media {

    pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

    /// Substituted at the presentation boundary for records without a poster.
    pub const PLACEHOLDER_POSTER: &str = "https://placehold.co/600x400/1a1a1a/FFFFFF.png";

    /// Substituted at the presentation boundary for records without a title.
    pub const PLACEHOLDER_TITLE: &str = "Untitled";
}
