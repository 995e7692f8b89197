pub mod logging;

pub use logging::Logger;
