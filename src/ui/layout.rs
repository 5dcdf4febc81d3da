use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub header: Rect,
    pub input: Rect,
    pub results: Rect,
    pub history: Rect,
    pub status_bar: Rect,
}

pub struct DashboardLayout {
    results_width_ratio: u16,
}

impl DashboardLayout {
    pub fn new() -> Self {
        Self {
            // Chart takes two of three columns
            results_width_ratio: 66,
        }
    }

    pub fn calculate_layout(&self, area: Rect) -> DashboardAreas {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Query input
                Constraint::Min(8),    // Results and history
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(self.results_width_ratio),
                Constraint::Min(20),
            ])
            .split(vertical_chunks[2]);

        DashboardAreas {
            header: vertical_chunks[0],
            input: vertical_chunks[1],
            results: body_chunks[0],
            history: body_chunks[1],
            status_bar: vertical_chunks[3],
        }
    }

    /// Area directly below the input for the suggestion dropdown
    pub fn suggestions_area(input: Rect, bounds: Rect, count: usize) -> Rect {
        let height = (count as u16 + 2).min(bounds.bottom().saturating_sub(input.bottom()));
        Rect::new(input.x, input.bottom(), input.width, height)
    }

    /// Centered rectangle for overlays
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self::new()
    }
}
