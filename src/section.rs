//! A mounted books section: the [`ShelfView`] plus the reveal subscriptions
//! for everything it currently shows.

use crate::entry::Entry;
use crate::reveal::{RevealConfig, RevealRegistry, Subscription, Target};
use crate::view::{CardTiming, ShelfView, ViewState};

pub struct Section<'a> {
    view: ShelfView<'a>,
    registry: RevealRegistry,
    reveal: RevealConfig,
    title: Subscription,
    archive_link: Subscription,
    /// One subscription per visible card, indexed by card position.
    cards: Vec<Subscription>,
}

impl<'a> Section<'a> {
    /// Mounts the section: registers the title and archive link with the
    /// base reveal config and each visible card with a delay of
    /// `index * 100` ms.
    pub fn mount(
        view: ShelfView<'a>,
        registry: &RevealRegistry,
        reveal: &RevealConfig,
    ) -> Section<'a> {
        let title = registry.observe(Target::Title, reveal.clone());
        let archive_link = registry.observe(Target::ArchiveLink, reveal.clone());
        let cards = (0..view.visible().len())
            .map(|i| {
                let delay = view.card_timing(i).reveal_delay_ms;
                registry.observe(Target::Card(i), reveal.with_delay(delay))
            })
            .collect();

        Section {
            view,
            registry: registry.clone(),
            reveal: reveal.clone(),
            title,
            archive_link,
            cards,
        }
    }

    pub fn view(&self) -> &ShelfView<'a> {
        &self.view
    }

    pub fn visible(&self) -> &'a [Entry] {
        self.view.visible()
    }

    pub fn state(&self) -> ViewState {
        self.view.state()
    }

    pub fn toggle_label(&self) -> &'static str {
        self.view.toggle_label()
    }

    /// Toggles the view. Cards that become visible are registered with their
    /// cascading transition delay; cards that are hidden are unmounted and
    /// their pending reveals released. Cards that stay visible keep their
    /// subscriptions, so an already-revealed card is never replayed.
    pub fn toggle(&mut self) {
        self.view.toggle();
        let visible = self.view.visible().len();
        if visible < self.cards.len() {
            self.cards.truncate(visible);
            return;
        }

        let fold_limit = self.view.fold_limit();
        for i in self.cards.len()..visible {
            let delay = CardTiming::for_index(i, fold_limit).transition_delay_ms;
            let sub = self
                .registry
                .observe(Target::Card(i), self.reveal.with_delay(delay));
            self.cards.push(sub);
        }
    }

    /// Every target this section currently holds a subscription for, in
    /// document order.
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        std::iter::once(self.title.target())
            .chain(std::iter::once(self.archive_link.target()))
            .chain(self.cards.iter().map(Subscription::target))
    }

    /// The reveal config still pending for `target`, if the section holds it
    /// and it hasn't fired.
    pub fn pending_reveal(&self, target: Target) -> Option<RevealConfig> {
        self.registry.pending(target)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entry::fixture;
    use crate::view::DEFAULT_FOLD_LIMIT;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n).map(|i| fixture(&format!("Entry {}", i))).collect()
    }

    #[test]
    fn test_mount_registers_title_link_and_visible_cards() {
        let entries = entries(8);
        let registry = RevealRegistry::new();
        let section = Section::mount(
            ShelfView::new(&entries, DEFAULT_FOLD_LIMIT),
            &registry,
            &RevealConfig::default(),
        );

        assert_eq!(8, registry.pending_count());
        assert_eq!(
            Some(200),
            section.pending_reveal(Target::Title).map(|c| c.delay)
        );
        assert_eq!(
            Some(500),
            section.pending_reveal(Target::Card(5)).map(|c| c.delay)
        );
        assert!(!registry.is_pending(Target::Card(6)));
    }

    #[test]
    fn test_toggle_registers_only_newly_revealed_cards() {
        let entries = entries(9);
        let registry = RevealRegistry::new();
        let mut section = Section::mount(
            ShelfView::new(&entries, DEFAULT_FOLD_LIMIT),
            &registry,
            &RevealConfig::default(),
        );

        // the first card is seen before expanding
        assert!(registry.notify_visible(Target::Card(0)).is_some());

        section.toggle();
        assert_eq!(ViewState::Expanded, section.state());
        assert_eq!(9, section.visible().len());
        assert!(!registry.is_pending(Target::Card(0)));
        assert_eq!(
            vec![Some(0), Some(100), Some(200)],
            (6..9)
                .map(|i| registry.pending(Target::Card(i)).map(|c| c.delay))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_collapse_releases_hidden_cards() {
        let entries = entries(8);
        let registry = RevealRegistry::new();
        let mut section = Section::mount(
            ShelfView::new(&entries, DEFAULT_FOLD_LIMIT),
            &registry,
            &RevealConfig::default(),
        );
        section.toggle();
        assert!(registry.notify_visible(Target::Card(7)).is_some());
        assert!(registry.is_pending(Target::Card(6)));

        section.toggle();
        assert_eq!(6, section.visible().len());
        assert!(!registry.is_pending(Target::Card(6)));
        assert_eq!(8, section.targets().count());

        // re-expanding mounts the hidden cards again
        section.toggle();
        assert!(registry.is_pending(Target::Card(6)));
        assert!(registry.is_pending(Target::Card(7)));
    }

    #[test]
    fn test_unmount_releases_everything() {
        let entries = entries(3);
        let registry = RevealRegistry::new();
        let section = Section::mount(
            ShelfView::new(&entries, DEFAULT_FOLD_LIMIT),
            &registry,
            &RevealConfig::default(),
        );
        assert_eq!(5, registry.pending_count());
        drop(section);
        assert_eq!(0, registry.pending_count());
    }

    #[test]
    fn test_empty_section() {
        let registry = RevealRegistry::new();
        let mut section = Section::mount(
            ShelfView::new(&[], DEFAULT_FOLD_LIMIT),
            &registry,
            &RevealConfig::default(),
        );
        section.toggle();
        assert!(section.visible().is_empty());
        assert_eq!(
            vec![Target::Title, Target::ArchiveLink],
            section.targets().collect::<Vec<_>>()
        );
    }
}
