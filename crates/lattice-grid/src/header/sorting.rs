//! Click-to-sort and the sort indicators.

use std::sync::Arc;

use chrono::Utc;
use lattice_grid_core::logging::targets;
use lattice_grid_core::Teardown;

use super::template::{classes, part_ids, HeaderParts};
use super::HeaderCell;
use crate::element::KeyboardModifiers;
use crate::sort::{next_sort_direction, SortDirection, SortingOrder};

impl HeaderCell {
    pub(super) fn attach_sort(self: &Arc<Self>, parts: &mut HeaderParts, teardown: &mut Teardown) {
        let options = &self.context.options;
        let def = self.column.col_def();

        if !options.sorting_enabled_for(def) {
            for id in [part_ids::SORT_ASC, part_ids::SORT_DESC, part_ids::SORT_NONE] {
                if let Some(indicator) = parts.find(id) {
                    indicator.remove_from_parent();
                }
            }
            return;
        }

        parts.sort_asc = parts.find(part_ids::SORT_ASC);
        parts.sort_desc = parts.find(part_ids::SORT_DESC);
        parts.sort_none = parts.find(part_ids::SORT_NONE);
        for indicator in [&parts.sort_asc, &parts.sort_desc].into_iter().flatten() {
            indicator.set_visible(false);
        }
        if !options.unsort_icon_for(def)
            && let Some(none) = parts.sort_none.take()
        {
            none.remove_from_parent();
        }

        let Some(label) = &parts.label else {
            return;
        };
        let cell = Arc::downgrade(self);
        teardown.push_subscription(label.clicked.subscribe(move |event| {
            if let Some(cell) = cell.upgrade() {
                cell.advance_sort(event.modifiers);
            }
        }));
    }

    fn advance_sort(&self, modifiers: KeyboardModifiers) {
        let options = &self.context.options;
        let order = SortingOrder::resolve(self.column.col_def(), options);

        let next = match next_sort_direction(self.column.sort(), order) {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(
                    target: targets::SORT,
                    col_id = self.column.col_id(),
                    %error,
                    "sort not changed"
                );
                return;
            }
        };

        let additive = options.is_additive_sort(modifiers.shift);
        if !additive {
            self.context.columns.clear_sort_except(&self.column);
        }

        self.column.set_sort(next);
        self.column.set_sorted_at(next.is_sorted().then(Utc::now));
        tracing::debug!(
            target: targets::SORT,
            col_id = self.column.col_id(),
            sort = %next,
            additive,
            "sort changed"
        );

        self.context.sort_listener.on_sorting_changed();
        self.refresh_sort_indicators();
    }

    /// Shows the indicator matching the column's sort state and sets the
    /// matching state class on the header cell.
    pub fn refresh_sort_indicators(&self) {
        if !self.is_active() {
            return;
        }
        let Some(parts) = self.parts() else {
            return;
        };

        let sort = self.column.sort();
        let states = [
            (&parts.sort_asc, classes::SORTED_ASC, SortDirection::Ascending),
            (&parts.sort_desc, classes::SORTED_DESC, SortDirection::Descending),
            (&parts.sort_none, classes::SORTED_NONE, SortDirection::Unsorted),
        ];
        for (indicator, class, direction) in states {
            let active = sort == direction;
            if let Some(indicator) = indicator {
                indicator.set_visible(active);
            }
            parts.cell.set_class_enabled(class, active);
        }
    }
}
