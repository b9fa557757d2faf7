//! Tab group state
//!
//! A scope of `.tab-btn` buttons paired by position with `.tab-panel`
//! panels. Exactly one button, and the panel at the same index, is active.

/// Active-tab state for one tab container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    buttons: usize,
    panels: usize,
    active: Option<usize>,
}

impl TabGroup {
    /// Initial state: the first tab is active when there is at least one
    /// button and one panel
    pub fn new(buttons: usize, panels: usize) -> Self {
        let active = (buttons > 0 && panels > 0).then_some(0);
        Self {
            buttons,
            panels,
            active,
        }
    }

    /// Handle a click on button `index`
    ///
    /// Returns whether the active tab changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.buttons || self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_button_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn is_panel_active(&self, index: usize) -> bool {
        index < self.panels && self.active == Some(index)
    }

    pub fn len(&self) -> usize {
        self.buttons
    }

    pub fn is_empty(&self) -> bool {
        self.buttons == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_counts(tabs: &TabGroup) -> (usize, usize) {
        let buttons = (0..tabs.len()).filter(|&i| tabs.is_button_active(i)).count();
        let panels = (0..tabs.len()).filter(|&i| tabs.is_panel_active(i)).count();
        (buttons, panels)
    }

    #[test]
    fn test_first_tab_active_initially() {
        let tabs = TabGroup::new(3, 3);
        assert_eq!(tabs.active(), Some(0));
        assert_eq!(active_counts(&tabs), (1, 1));
    }

    #[test]
    fn test_no_tabs_no_active() {
        assert_eq!(TabGroup::new(0, 0).active(), None);
        assert_eq!(TabGroup::new(2, 0).active(), None);
    }

    #[test]
    fn test_exactly_one_active_after_every_click() {
        let mut tabs = TabGroup::new(4, 4);
        for &click in &[2, 2, 0, 3, 1, 9, 1] {
            tabs.select(click);
            assert_eq!(active_counts(&tabs), (1, 1));
            let active = tabs.active().unwrap();
            assert!(tabs.is_button_active(active) && tabs.is_panel_active(active));
        }
        assert_eq!(tabs.active(), Some(1));
    }

    #[test]
    fn test_select_reports_change() {
        let mut tabs = TabGroup::new(2, 2);
        assert!(!tabs.select(0));
        assert!(tabs.select(1));
        assert!(!tabs.select(5));
    }
}
