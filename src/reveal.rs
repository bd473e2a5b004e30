//! One-shot entrance animations. A target is registered with
//! [`RevealRegistry::observe`], which hands back a [`Subscription`]. The
//! first time the target becomes visible the observer fires and is released;
//! dropping the [`Subscription`] releases it if it hasn't fired yet.

use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Parameters passed to the client-side animation for a single target.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub origin: String,
    pub distance: String,
    pub duration: u64,
    pub delay: u64,
    pub opacity: f64,
    pub scale: f64,
    pub easing: String,
    pub mobile: bool,
    pub reset: bool,
    pub view_factor: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            origin: String::from("bottom"),
            distance: String::from("20px"),
            duration: 500,
            delay: 200,
            opacity: 0.0,
            scale: 1.0,
            easing: String::from("cubic-bezier(0.645, 0.045, 0.355, 1)"),
            mobile: true,
            reset: false,
            view_factor: 0.25,
        }
    }
}

impl RevealConfig {
    /// Returns a copy of the config with a different delay.
    pub fn with_delay(&self, delay: u64) -> RevealConfig {
        RevealConfig {
            delay,
            ..self.clone()
        }
    }
}

/// An element in the section that can be revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Title,
    ArchiveLink,
    Card(usize),
}

struct Observer {
    id: u64,
    config: RevealConfig,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    observers: HashMap<Target, Observer>,
}

/// Tracks pending reveals. Cloning a registry yields another handle to the
/// same set of observers.
#[derive(Clone, Default)]
pub struct RevealRegistry {
    inner: Rc<RefCell<Inner>>,
}

impl RevealRegistry {
    pub fn new() -> RevealRegistry {
        RevealRegistry::default()
    }

    /// Registers `target` to be revealed with `config`. Registering a target
    /// that already has an observer replaces it; the older [`Subscription`]
    /// then no longer affects the target.
    pub fn observe(&self, target: Target, config: RevealConfig) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.insert(target, Observer { id, config });
        Subscription {
            registry: Rc::downgrade(&self.inner),
            target,
            id,
        }
    }

    /// Called when `target` enters the viewport. Fires (returns the config
    /// to animate with) at most once per subscription.
    pub fn notify_visible(&self, target: Target) -> Option<RevealConfig> {
        self.inner
            .borrow_mut()
            .observers
            .remove(&target)
            .map(|observer| observer.config)
    }

    /// Whether `target` has an observer that hasn't fired yet.
    pub fn is_pending(&self, target: Target) -> bool {
        self.inner.borrow().observers.contains_key(&target)
    }

    /// The pending config for `target`, if any.
    pub fn pending(&self, target: Target) -> Option<RevealConfig> {
        self.inner
            .borrow()
            .observers
            .get(&target)
            .map(|observer| observer.config.clone())
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

/// Keeps an observer registered. Dropping it releases the observer unless it
/// already fired or was replaced.
#[must_use]
pub struct Subscription {
    registry: Weak<RefCell<Inner>>,
    target: Target,
    id: u64,
}

impl Subscription {
    pub fn target(&self) -> Target {
        self.target
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            let mut inner = inner.borrow_mut();
            if inner.observers.get(&self.target).map(|o| o.id) == Some(self.id) {
                inner.observers.remove(&self.target);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fires_at_most_once() {
        let registry = RevealRegistry::new();
        let _sub = registry.observe(Target::Title, RevealConfig::default());
        assert_eq!(
            Some(RevealConfig::default()),
            registry.notify_visible(Target::Title)
        );
        assert_eq!(None, registry.notify_visible(Target::Title));
    }

    #[test]
    fn test_drop_releases_unfired() {
        let registry = RevealRegistry::new();
        let sub = registry.observe(Target::Card(3), RevealConfig::default());
        assert!(registry.is_pending(Target::Card(3)));
        drop(sub);
        assert!(!registry.is_pending(Target::Card(3)));
        assert_eq!(None, registry.notify_visible(Target::Card(3)));
    }

    #[test]
    fn test_stale_subscription_keeps_newer_observer() {
        let registry = RevealRegistry::new();
        let old = registry.observe(Target::Card(0), RevealConfig::default());
        let _new = registry
            .observe(Target::Card(0), RevealConfig::default().with_delay(900));
        drop(old);
        assert_eq!(
            Some(900),
            registry.notify_visible(Target::Card(0)).map(|c| c.delay)
        );
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let sub = {
            let registry = RevealRegistry::new();
            registry.observe(Target::ArchiveLink, RevealConfig::default())
        };
        assert_eq!(Target::ArchiveLink, sub.target());
        drop(sub);
    }

    #[test]
    fn test_config_overrides() -> Result<(), serde_yaml::Error> {
        let config: RevealConfig =
            serde_yaml::from_str("duration: 800\nviewFactor: 0.5\n")?;
        assert_eq!(800, config.duration);
        assert_eq!(0.5, config.view_factor);
        assert_eq!("bottom", config.origin);
        Ok(())
    }
}
