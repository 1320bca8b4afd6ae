use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! actions {
    ( $( $(#[$doc:meta])* $variant:ident => $name:literal, )* ) => {
        /// A tree command that can be bound to a combo.
        ///
        /// Declaration order is the resolution priority: when several actions
        /// share a combo, the earliest one wins.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum Action {
            $( $(#[$doc])* $variant, )*
        }

        impl Action {
            /// Every action, in priority order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            /// The camelCase action name used in configuration.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }

            /// Look up an action by its exact camelCase name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

actions! {
    /// Restore the previous tree snapshot.
    Undo => "undo",
    /// Re-apply an undone snapshot.
    Redo => "redo",
    /// Make the row a child of its previous sibling.
    Indent => "indent",
    /// Move the row up one nesting level.
    Outdent => "outdent",
    /// Focus the parent row.
    NavLeft => "navLeft",
    /// Focus the first child row.
    NavRight => "navRight",
    /// Focus the previous visible row.
    NavUp => "navUp",
    /// Focus the next visible row.
    NavDown => "navDown",
    /// Swap the row with its previous sibling.
    MoveUp => "moveUp",
    /// Swap the row with its next sibling.
    MoveDown => "moveDown",
    /// Open the rename editor.
    Rename => "rename",
    /// Remove the row and its subtree.
    Delete => "delete",
    /// Insert a new child row.
    AddChild => "addChild",
    /// Insert a new sibling below the row.
    AddSibling => "addSibling",
    /// Extend the selection upward.
    RangeUp => "rangeUp",
    /// Extend the selection downward.
    RangeDown => "rangeDown",
    /// Extend the subtree selection upward.
    DeepUp => "deepUp",
    /// Extend the subtree selection downward.
    DeepDown => "deepDown",
    /// Select a range up to the clicked row.
    RangeClick => "rangeClick",
    /// Select the clicked row's subtree.
    DeepClick => "deepClick",
}

impl Action {
    /// Actions bound to pointer clicks rather than keys.
    pub const fn is_click(self) -> bool {
        matches!(self, Self::RangeClick | Self::DeepClick)
    }

    /// Actions that repeat while their key is held.
    pub const fn is_hold_repeatable(self) -> bool {
        matches!(
            self,
            Self::NavUp
                | Self::NavDown
                | Self::NavLeft
                | Self::NavRight
                | Self::MoveUp
                | Self::MoveDown
                | Self::Indent
                | Self::Outdent
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| Error::UnknownAction {
            path: None,
            name: s.to_string(),
        })
    }
}
