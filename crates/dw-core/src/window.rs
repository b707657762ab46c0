//! Fixed-capacity observation window with reference/active segmentation.
//!
//! The window holds at most `active_size * (n_seasons + 1)` observations in
//! arrival order. The newest `active_size` form the active segment; the
//! rest form the reference segment. Both segments may run short (or empty)
//! while the window warms up, which callers treat as a defined state rather
//! than an error.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Window {
    buf: VecDeque<f64>,
    active_size: usize,
    capacity: usize,
}

impl Window {
    /// Empty window sized for `active_size * (n_seasons + 1)` observations.
    pub fn new(active_size: usize, n_seasons: usize) -> Self {
        let capacity = active_size * (n_seasons + 1);
        Self {
            buf: VecDeque::with_capacity(capacity),
            active_size,
            capacity,
        }
    }

    /// Window pre-filled from history, oldest first. Only the newest
    /// `capacity` values survive.
    pub fn with_history(active_size: usize, n_seasons: usize, history: &[f64]) -> Self {
        let mut window = Self::new(active_size, n_seasons);
        for &value in history {
            window.push(value);
        }
        window
    }

    /// Append the newest observation, evicting the oldest at capacity.
    pub fn push(&mut self, value: f64) {
        if self.buf.len() == self.capacity {
            self.buf.pop_front();
        }
        self.buf.push_back(value);
    }

    /// Current fill.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True once the window holds `capacity` observations.
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Maximum number of observations held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every observation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// The newest `active_size` observations (fewer while filling), in
    /// arrival order.
    pub fn active(&self) -> Vec<f64> {
        let start = self.buf.len().saturating_sub(self.active_size);
        self.buf.iter().skip(start).copied().collect()
    }

    /// The observations preceding the active segment, in arrival order.
    pub fn reference(&self) -> Vec<f64> {
        let end = self.buf.len().saturating_sub(self.active_size);
        self.buf.iter().take(end).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_then_evicts_fifo() {
        // active_size 2, n_seasons 1 -> capacity 4.
        let mut window = Window::new(2, 1);
        for value in [1.0, 2.0, 3.0, 4.0] {
            window.push(value);
        }
        assert!(window.is_full());
        assert_eq!(window.reference(), vec![1.0, 2.0]);
        assert_eq!(window.active(), vec![3.0, 4.0]);

        window.push(5.0);
        assert_eq!(window.len(), 4);
        assert_eq!(window.reference(), vec![2.0, 3.0]);
        assert_eq!(window.active(), vec![4.0, 5.0]);
    }

    #[test]
    fn partial_fill_shortens_segments() {
        let mut window = Window::new(3, 2);
        assert!(window.active().is_empty());
        assert!(window.reference().is_empty());

        window.push(1.0);
        window.push(2.0);
        // Fewer observations than active_size: everything is active.
        assert_eq!(window.active(), vec![1.0, 2.0]);
        assert!(window.reference().is_empty());

        window.push(3.0);
        window.push(4.0);
        assert_eq!(window.active(), vec![2.0, 3.0, 4.0]);
        assert_eq!(window.reference(), vec![1.0]);
    }

    #[test]
    fn history_beyond_capacity_keeps_newest() {
        let history: Vec<f64> = (0..10).map(f64::from).collect();
        let window = Window::with_history(1, 4, &history);
        assert_eq!(window.len(), 5);
        assert_eq!(window.reference(), vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(window.active(), vec![9.0]);
    }

    #[test]
    fn clear_returns_to_cold_state() {
        let mut window = Window::with_history(2, 1, &[1.0, 2.0, 3.0]);
        window.clear();
        assert!(window.is_empty());
        assert!(!window.is_full());
        assert_eq!(window.capacity(), 4);
    }
}
