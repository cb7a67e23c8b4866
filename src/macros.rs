// Both macros expand to a `&'static` built on first use; a bad literal panics naming itself.

macro_rules! selector {
    ($e: expr) => {{
        static SELECTOR: ::once_cell::sync::Lazy<::scraper::Selector> =
            ::once_cell::sync::Lazy::new(|| {
                ::scraper::Selector::parse($e)
                    .unwrap_or_else(|e| panic!("Invalid selector {:?}: {e:?}", $e))
            });
        &*SELECTOR
    }};
}

macro_rules! regex {
    ($e: expr) => {{
        static PATTERN: ::once_cell::sync::Lazy<::regex::Regex> =
            ::once_cell::sync::Lazy::new(|| {
                ::regex::Regex::new($e).unwrap_or_else(|e| panic!("Invalid regex {:?}: {e}", $e))
            });
        &*PATTERN
    }};
}
