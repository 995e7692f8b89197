use gloo::console;

/// Console logger with a component tag so chart components can be told apart
/// in the browser log.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        console::debug!(Self::tagged(component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::log!(Self::tagged(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(Self::tagged(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(Self::tagged(component, message));
    }

    fn tagged(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }
}
