use std::collections::{BTreeMap, BTreeSet};

use keytoken::Combo;

use crate::{Action, BindingTable};

/// Combos bound to more than one action, with the actions sharing each.
///
/// Unbound actions never take part in a conflict. Actions within a group are
/// listed in priority order, so the first one is the action that will fire.
pub fn conflict_groups(table: &BindingTable) -> BTreeMap<Combo, Vec<Action>> {
    let mut groups: BTreeMap<Combo, Vec<Action>> = BTreeMap::new();
    for (action, combo) in table.all() {
        if combo.is_empty() {
            continue;
        }
        groups.entry(combo.clone()).or_default().push(action);
    }
    groups.retain(|_, actions| actions.len() > 1);
    groups
}

/// Every action whose combo collides with another action's.
pub fn find_conflicts(table: &BindingTable) -> BTreeSet<Action> {
    conflict_groups(table).into_values().flatten().collect()
}
