pub const NORMALIZE_TITLE_JOB: &str = "normalize-title";

pub mod discovery {

    pub const PAGE_SIZE: u64 = 500;
}

pub mod ratings {

    pub const SOURCE_IMDB: &str = "IMDB";
}

pub mod documents {

    pub const TITLES_COLLECTION: &str = "titles";
}
