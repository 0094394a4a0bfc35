//! Notifications emitted by the picker and pointer input it accepts

/// Something a listener may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The displayed result list was recomputed
    ResultsChanged,
    /// The highlighted item changed (or was cleared)
    HighlightChanged(Option<String>),
    /// The list scrolled to keep the highlighted row visible
    ScrolledIntoView {
        /// New scroll offset
        offset: usize,
    },
    /// The query input should take focus
    FocusInput,
    /// An item was chosen
    Chosen(String),
    /// The picker was dismissed
    Dismissed,
}

/// Pointer interaction with a row, identified by item id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    /// Single click: highlight the row
    Click(String),
    /// Double click: choose the row directly
    DoubleClick(String),
    /// Wheel up: highlight the previous row
    ScrollUp,
    /// Wheel down: highlight the next row
    ScrollDown,
}
