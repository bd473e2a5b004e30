//! The paginated view over an ordered list of entries: a fixed-size prefix is
//! shown until the view is expanded, at which point every entry is shown.
//! The view never reorders or filters; that's the parser's job.

use crate::entry::Entry;

/// The number of entries shown before the view is expanded.
pub const DEFAULT_FOLD_LIMIT: usize = 6;

/// Whether the view is showing the prefix or everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    Collapsed,
    Expanded,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Collapsed
    }
}

impl ViewState {
    pub fn toggled(self) -> ViewState {
        match self {
            ViewState::Collapsed => ViewState::Expanded,
            ViewState::Expanded => ViewState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == ViewState::Expanded
    }
}

/// Borrows the entry list for a render and tracks which prefix of it is
/// visible.
#[derive(Clone, Debug)]
pub struct ShelfView<'a> {
    entries: &'a [Entry],
    fold_limit: usize,
    state: ViewState,
}

impl<'a> ShelfView<'a> {
    /// Creates a collapsed view.
    pub fn new(entries: &'a [Entry], fold_limit: usize) -> ShelfView<'a> {
        ShelfView {
            entries,
            fold_limit,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn fold_limit(&self) -> usize {
        self.fold_limit
    }

    /// Every entry, visible or not.
    pub fn entries(&self) -> &'a [Entry] {
        self.entries
    }

    /// The visible entries: the first `min(fold_limit, len)` when collapsed,
    /// all of them when expanded.
    pub fn visible(&self) -> &'a [Entry] {
        match self.state {
            ViewState::Collapsed => {
                &self.entries[..self.fold_limit.min(self.entries.len())]
            }
            ViewState::Expanded => self.entries,
        }
    }

    /// Flips between collapsed and expanded.
    pub fn toggle(&mut self) {
        self.state = self.state.toggled();
    }

    /// The label for the toggle control in the current state.
    pub fn toggle_label(&self) -> &'static str {
        match self.state {
            ViewState::Collapsed => "Show More",
            ViewState::Expanded => "Show Less",
        }
    }

    /// Timing for the card at `index`. See [`CardTiming::for_index`].
    pub fn card_timing(&self, index: usize) -> CardTiming {
        CardTiming::for_index(index, self.fold_limit)
    }
}

/// Entrance-transition timing for a single card, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardTiming {
    /// How long the enter transition runs.
    pub timeout_ms: u64,

    /// How long before the enter transition starts.
    pub transition_delay_ms: u64,

    /// The reveal delay used when the card is registered at mount.
    pub reveal_delay_ms: u64,
}

impl CardTiming {
    /// Cards inside the fold enter together; cards past the fold cascade in
    /// 100ms apart, with longer timeouts the further they are from the fold.
    pub fn for_index(index: usize, fold_limit: usize) -> CardTiming {
        let (timeout_ms, transition_delay_ms) = match index.checked_sub(fold_limit) {
            Some(past_fold) => (past_fold as u64 * 300, past_fold as u64 * 100),
            None => (300, 0),
        };
        CardTiming {
            timeout_ms,
            transition_delay_ms,
            reveal_delay_ms: index as u64 * 100,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entry::fixture;

    fn entries(titles: &[&str]) -> Vec<Entry> {
        titles.iter().map(|t| fixture(t)).collect()
    }

    fn titles<'a>(view: &ShelfView<'a>) -> Vec<&'a str> {
        view.visible().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_collapse_expand_round_trip() {
        let entries = entries(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let mut view = ShelfView::new(&entries, DEFAULT_FOLD_LIMIT);
        assert_eq!(vec!["A", "B", "C", "D", "E", "F"], titles(&view));
        assert_eq!("Show More", view.toggle_label());

        view.toggle();
        assert_eq!(ViewState::Expanded, view.state());
        assert_eq!(
            vec!["A", "B", "C", "D", "E", "F", "G", "H"],
            titles(&view)
        );
        assert_eq!("Show Less", view.toggle_label());

        view.toggle();
        assert_eq!(ViewState::Collapsed, view.state());
        assert_eq!(vec!["A", "B", "C", "D", "E", "F"], titles(&view));
    }

    #[test]
    fn test_visible_is_prefix_for_every_length() {
        let all = entries(&["A", "B", "C", "D", "E", "F", "G", "H", "I"]);
        for len in 0..=all.len() {
            let mut view = ShelfView::new(&all[..len], DEFAULT_FOLD_LIMIT);
            assert_eq!(&all[..len.min(6)], view.visible(), "len={}", len);
            view.toggle();
            assert_eq!(&all[..len], view.visible(), "len={}", len);
        }
    }

    #[test]
    fn test_empty_view() {
        let mut view = ShelfView::new(&[], DEFAULT_FOLD_LIMIT);
        assert!(view.visible().is_empty());
        view.toggle();
        assert!(view.visible().is_empty());
        assert_eq!("Show Less", view.toggle_label());
    }

    #[test]
    fn test_card_timing() {
        let inside = CardTiming::for_index(2, 6);
        assert_eq!(
            CardTiming {
                timeout_ms: 300,
                transition_delay_ms: 0,
                reveal_delay_ms: 200,
            },
            inside
        );

        assert_eq!(0, CardTiming::for_index(6, 6).transition_delay_ms);
        assert_eq!(0, CardTiming::for_index(6, 6).timeout_ms);

        let past = CardTiming::for_index(8, 6);
        assert_eq!(600, past.timeout_ms);
        assert_eq!(200, past.transition_delay_ms);
        assert_eq!(800, past.reveal_delay_ms);
    }
}
