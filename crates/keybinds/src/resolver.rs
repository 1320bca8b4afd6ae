use keytoken::Combo;

use crate::{Action, BindingTable};

/// Pick the action bound to `combo`.
///
/// Actions are tried in priority order (`Action::ALL`); the first whose
/// bound combo equals `combo` wins. The empty combo resolves to nothing.
pub fn resolve(table: &BindingTable, combo: &Combo) -> Option<Action> {
    if combo.is_empty() {
        return None;
    }
    Action::ALL
        .iter()
        .copied()
        .find(|a| table.get(*a) == combo)
}
