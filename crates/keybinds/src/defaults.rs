use crate::Action;

/// Built-in combo for every action.
pub const DEFAULT_BINDINGS: &[(Action, &str)] = &[
    (Action::AddSibling, "Enter"),
    (Action::AddChild, "Shift+Enter"),
    (Action::NavUp, "ArrowUp"),
    (Action::NavDown, "ArrowDown"),
    (Action::NavLeft, "ArrowLeft"),
    (Action::NavRight, "ArrowRight"),
    (Action::MoveUp, "Shift+ArrowUp"),
    (Action::MoveDown, "Shift+ArrowDown"),
    (Action::Indent, "Shift+ArrowRight"),
    (Action::Outdent, "Shift+ArrowLeft"),
    (Action::RangeUp, "Mod+Alt+Shift+ArrowUp"),
    (Action::RangeDown, "Mod+Alt+Shift+ArrowDown"),
    (Action::RangeClick, "Mod+Alt+Shift+Click"),
    (Action::DeepUp, "Mod+Shift+ArrowUp"),
    (Action::DeepDown, "Mod+Shift+ArrowDown"),
    (Action::DeepClick, "Mod+Shift+Click"),
    // The key left of 1: `ё` on Russian layouts.
    (Action::Rename, "Backquote"),
    (Action::Delete, "Backspace"),
    (Action::Undo, "Mod+Z"),
    (Action::Redo, "Mod+Shift+Z"),
];

/// The default combo string for `action`.
pub fn default_combo(action: Action) -> &'static str {
    DEFAULT_BINDINGS
        .iter()
        .find(|(a, _)| *a == action)
        .map_or("", |(_, c)| c)
}
