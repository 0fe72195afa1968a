//! The column menu trigger.

use std::sync::{Arc, Weak};

use lattice_grid_core::logging::targets;
use lattice_grid_core::{Subscription, Teardown};

use super::template::{part_ids, HeaderParts};
use super::HeaderCell;
use crate::element::{Element, ElementRef};

/// Style transition of the menu trigger.
const MENU_TRANSITION: &str = "opacity 0.2s, border 0.2s";

/// Reveals an element while the pointer is over a host element.
///
/// The target is held weakly; toggling a dropped target does nothing.
#[derive(Debug, Clone)]
pub struct HoverReveal {
    target: Weak<Element>,
}

impl HoverReveal {
    /// Opacity while hidden.
    pub const HIDDEN: f32 = 0.0;

    /// Opacity while shown.
    pub const SHOWN: f32 = 1.0;

    /// Creates a toggle for `target`. The target starts hidden.
    pub fn new(target: &ElementRef) -> Self {
        target.set_opacity(Self::HIDDEN);
        Self {
            target: Arc::downgrade(target),
        }
    }

    /// Makes the target visible.
    pub fn show(&self) {
        self.set_opacity(Self::SHOWN);
    }

    /// Makes the target transparent.
    pub fn hide(&self) {
        self.set_opacity(Self::HIDDEN);
    }

    fn set_opacity(&self, opacity: f32) {
        if let Some(target) = self.target.upgrade() {
            target.set_opacity(opacity);
        }
    }

    /// Shows the target on pointer-enter and hides it on pointer-leave of
    /// `host`.
    pub fn bind(self, host: &Element) -> [Subscription; 2] {
        let on_enter = self.clone();
        [
            host.pointer_entered.subscribe(move |_| on_enter.show()),
            host.pointer_left.subscribe(move |_| self.hide()),
        ]
    }
}

impl HeaderCell {
    pub(super) fn attach_menu(self: &Arc<Self>, parts: &mut HeaderParts, teardown: &mut Teardown) {
        let Some(trigger) = parts.find(part_ids::MENU) else {
            return;
        };

        let options = &self.context.options;
        let wanted = options.menu_enabled_for(self.column.col_def()) && self.context.menus.is_some();
        if !wanted {
            tracing::debug!(target: targets::MENU, col_id = self.column.col_id(), "menu trigger removed");
            trigger.remove_from_parent();
            return;
        }

        let cell = Arc::downgrade(self);
        let anchor = Arc::downgrade(&trigger);
        teardown.push_subscription(trigger.clicked.subscribe(move |_| {
            if let (Some(cell), Some(anchor)) = (cell.upgrade(), anchor.upgrade()) {
                cell.show_menu(&anchor);
            }
        }));

        if !options.suppress_menu_hide {
            for subscription in HoverReveal::new(&trigger).bind(&parts.cell) {
                teardown.push_subscription(subscription);
            }
        }
        trigger.set_transition(MENU_TRANSITION);

        parts.menu = Some(trigger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_reveal_toggles_opacity() {
        let host = Element::new("div");
        let trigger = Element::new("span");
        host.append_child(trigger.clone());

        let subscriptions = HoverReveal::new(&trigger).bind(&host);
        assert_eq!(trigger.opacity(), HoverReveal::HIDDEN);

        host.dispatch_pointer_enter();
        assert_eq!(trigger.opacity(), HoverReveal::SHOWN);
        host.dispatch_pointer_leave();
        assert_eq!(trigger.opacity(), HoverReveal::HIDDEN);

        drop(subscriptions);
        host.dispatch_pointer_enter();
        assert_eq!(trigger.opacity(), HoverReveal::HIDDEN);
    }
}
