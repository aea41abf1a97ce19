/// Panels of a platform tab that can hold keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusArea {
    #[default]
    Form,
    Actions,
    Output,
}

impl FocusArea {
    pub const RING: &'static [FocusArea] = &[
        FocusArea::Form,
        FocusArea::Actions,
        FocusArea::Output,
    ];

    pub fn next(&self) -> FocusArea {
        let idx = Self::RING.iter().position(|f| f == self).unwrap_or(0);
        Self::RING[(idx + 1) % Self::RING.len()]
    }

    pub fn prev(&self) -> FocusArea {
        let idx = Self::RING.iter().position(|f| f == self).unwrap_or(0);
        if idx == 0 {
            Self::RING[Self::RING.len() - 1]
        } else {
            Self::RING[idx - 1]
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct FocusManager {
    current: FocusArea,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> FocusArea {
        self.current
    }

    pub fn next(&mut self) {
        self.current = self.current.next();
    }

    pub fn prev(&mut self) {
        self.current = self.current.prev();
    }

    pub fn is_focused(&self, area: FocusArea) -> bool {
        self.current == area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_ring_wraps() {
        let mut focus = FocusManager::new();
        assert!(focus.is_focused(FocusArea::Form));

        focus.prev();
        assert_eq!(focus.current(), FocusArea::Output);

        focus.next();
        focus.next();
        assert_eq!(focus.current(), FocusArea::Actions);
    }
}
