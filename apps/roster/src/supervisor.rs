//! Fault boundary around rendering.

use std::panic::{self, AssertUnwindSafe};

use tracing::error;

pub const FALLBACK: &str = "Something went wrong.";

/// Runs `render`, substituting a fallback screen if it panics.
pub fn render_guarded(render: impl FnOnce() -> String) -> String {
    match panic::catch_unwind(AssertUnwindSafe(render)) {
        Ok(screen) => screen,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown fault".to_string());
            error!(%reason, "render fault caught by supervisor");
            format!(
                "{FALLBACK}\nWe encountered an error while loading this section of the application.\nError: {reason}\n"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_a_healthy_render() {
        assert_eq!(render_guarded(|| "table".to_string()), "table");
    }

    #[test]
    fn substitutes_fallback_for_a_panicking_render() {
        let screen = render_guarded(|| panic!("row renderer exploded"));
        assert!(screen.starts_with(FALLBACK));
        assert!(screen.contains("row renderer exploded"));
    }
}
