pub mod cached_open;

pub use cached_open::CachedOpenInterceptor;
