//! # Header Component
//!
//! Top status line showing the app name, the chef's mood caption, and the
//! busy hint for whichever pantry-side operation is in flight.
//!
//! Stateless: all three props come from core state, the header just renders
//! what it's given.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

pub struct Header {
    /// Mood caption from core state (e.g. "The chef is pleased.")
    pub caption: String,
    /// True while an image detection request is outstanding.
    pub detecting: bool,
    /// True while a recipe request is outstanding.
    pub loading: bool,
}

impl Header {
    pub fn new(caption: String, detecting: bool, loading: bool) -> Self {
        Self {
            caption,
            detecting,
            loading,
        }
    }

    fn busy_hint(&self) -> Option<&'static str> {
        // Detection and recipe requests can be in flight at once; the
        // recipe request is the one the user is waiting on.
        if self.loading {
            Some("The chef is thinking...")
        } else if self.detecting {
            Some("The chef is inspecting...")
        } else {
            None
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = match self.busy_hint() {
            Some(hint) => format!("Sous — pantry chef | {} | {}", self.caption, hint),
            None => format!("Sous — pantry chef | {}", self.caption),
        };
        frame.render_widget(Span::raw(text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(header: &mut Header) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_idle() {
        let mut header = Header::new("The chef is listening.".to_string(), false, false);
        let text = rendered_text(&mut header);
        assert!(text.contains("Sous"));
        assert!(text.contains("The chef is listening."));
        assert!(!text.contains("thinking"));
        assert!(!text.contains("inspecting"));
    }

    #[test]
    fn test_header_shows_detecting_hint() {
        let mut header = Header::new("The chef is listening.".to_string(), true, false);
        let text = rendered_text(&mut header);
        assert!(text.contains("The chef is inspecting..."));
    }

    #[test]
    fn test_header_loading_wins_over_detecting() {
        let mut header = Header::new("The chef is pleased.".to_string(), true, true);
        let text = rendered_text(&mut header);
        assert!(text.contains("The chef is thinking..."));
        assert!(!text.contains("inspecting"));
    }
}
