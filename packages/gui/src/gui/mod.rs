//! The widget tree.

pub mod context;
pub mod event;
pub mod focus;
pub mod narration;
pub mod widget;
pub mod container;
pub mod screen;
pub mod selection_list;
pub mod layout;
pub mod sprites;
pub mod task_screen;
pub mod widgets;

#[cfg(test)]
mod testing;


pub use self::{
    context::{
        GuiGlobalContext,
        GuiEffect,
        GuiEffectQueue,
        GuiHostState,
    },
    event::{
        MouseButton,
        KeyCode,
        ModifiersState,
        KeyEvent,
        ScrolledAmount,
    },
    focus::{
        FocusPath,
        FocusNavigation,
        ScreenDirection,
        apply_focus,
        clear_focus,
        change_focus,
    },
    narration::{
        NarratedElementType,
        NarrationPriority,
        NarrationOutput,
    },
    widget::{
        Widget,
        WidgetBase,
    },
    container::ContainerWidget,
    screen::Screen,
    task_screen::TaskScreen,
    selection_list::{
        SelectionList,
        ListEntry,
    },
};
