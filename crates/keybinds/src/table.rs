use std::collections::BTreeMap;

use keytoken::Combo;
use tracing::debug;

use crate::{Action, defaults::DEFAULT_BINDINGS};

/// Action → combo mapping.
///
/// Every action always has an entry; an unbound action holds the empty
/// combo. Stored combos are normalized. Binding a combo that another action
/// already uses is allowed; see `find_conflicts`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingTable {
    /// One entry per action.
    bindings: BTreeMap<Action, Combo>,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BindingTable {
    /// A table holding the built-in defaults.
    pub fn with_defaults() -> Self {
        let bindings = DEFAULT_BINDINGS
            .iter()
            .map(|(a, c)| (*a, Combo::parse(c)))
            .collect();
        Self { bindings }
    }

    /// A table with every action unbound.
    pub fn unbound() -> Self {
        let bindings = Action::ALL.iter().map(|a| (*a, Combo::unbound())).collect();
        Self { bindings }
    }

    /// Current combo for `action`. Unbound actions return the empty combo.
    pub fn get(&self, action: Action) -> &Combo {
        static UNBOUND: Combo = Combo::EMPTY;
        self.bindings.get(&action).unwrap_or(&UNBOUND)
    }

    /// Bind `action` to the normalized form of `raw` and return it.
    ///
    /// An empty or unrecognized string unbinds the action.
    pub fn set(&mut self, action: Action, raw: &str) -> Combo {
        let combo = Combo::parse(raw);
        self.set_combo(action, combo.clone());
        combo
    }

    /// Bind `action` to an already-built combo.
    pub fn set_combo(&mut self, action: Action, combo: Combo) {
        debug!(action = %action, combo = %combo, "binding set");
        self.bindings.insert(action, combo);
    }

    /// Remove the binding for `action`.
    pub fn unbind(&mut self, action: Action) {
        self.set_combo(action, Combo::unbound());
    }

    /// All bindings, in action priority order.
    pub fn all(&self) -> impl Iterator<Item = (Action, &Combo)> + '_ {
        self.bindings.iter().map(|(a, c)| (*a, c))
    }

    /// Name → canonical combo string for every action.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.all()
            .map(|(a, c)| (a.name().to_string(), c.to_string()))
            .collect()
    }

    /// Restore the built-in defaults.
    pub fn reset(&mut self) {
        debug!("bindings reset to defaults");
        *self = Self::with_defaults();
    }
}
