pub mod logging;
pub mod text;

pub use logging::init_tracing;
pub use text::truncate_text;
