//! Terminal rendering for dayname types using owo_colors.

use dayname_core::ValidatedEvent;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ValidatedEvent {
    fn render(&self) -> String {
        format!(
            "{} {}",
            self.temporal.to_string().dimmed(),
            self.display_name.green()
        )
    }
}

/// Render a list of events, one per line
pub fn render_events(events: &[ValidatedEvent]) -> String {
    events
        .iter()
        .map(|event| format!("   {}", event.render()))
        .collect::<Vec<_>>()
        .join("\n")
}
