pub mod logging;
pub mod markdown;
