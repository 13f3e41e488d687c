//! Spinner widget shown while the agent works on a question.

use std::time::Instant;

/// Dot animation frames.
const DOT_FRAMES: &[&str] = &["", ".", "..", "..."];

/// Animation speed in milliseconds per frame.
const FRAME_DURATION_MS: u128 = 250;

/// Spinner state for the in-flight indicator.
#[derive(Debug, Clone)]
pub struct Spinner {
    start_time: Instant,
    label: String,
}

impl Spinner {
    /// Creates a new spinner with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            label: label.into(),
        }
    }

    /// Creates the thinking spinner shown while the agent runs.
    pub fn thinking() -> Self {
        Self::new("Thinking")
    }

    /// Returns the display string for the spinner.
    pub fn display(&self) -> String {
        let elapsed_ms = self.start_time.elapsed().as_millis();
        let frame_index = (elapsed_ms / FRAME_DURATION_MS) as usize;
        format!("{}{}", self.label, DOT_FRAMES[frame_index % DOT_FRAMES.len()])
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_display() {
        let spinner = Spinner::thinking();
        assert_eq!(spinner.label(), "Thinking");
        assert!(spinner.display().starts_with("Thinking"));
    }
}
