//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag, and reports
//! hovering while the drag is in progress so lists can reorder live.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget<Z> {
    /// Hovering another draggable item
    Item(u32),
    /// Hovering a zone, e.g. the boundary of a list
    Zone(Z),
}

/// Which half of the hovered element the pointer is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalHalf {
    Upper,
    Lower,
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<Z: Send + Sync + 'static> {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<Z>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<Z>>>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals<Z>() -> DndSignals<Z>
where
    Z: Clone + Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<Z>>);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// True when the movement from the start point is a drag rather than a click
pub fn beyond_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Hover rule for reordering inside one list: only move once the pointer
/// crossed the middle of the hovered element in the direction of the drag.
pub fn crosses_midpoint(drag_position: u32, hover_position: u32, half: VerticalHalf) -> bool {
    if drag_position < hover_position {
        // Dragging downwards
        half == VerticalHalf::Lower
    } else if drag_position > hover_position {
        // Dragging upwards
        half == VerticalHalf::Upper
    } else {
        false
    }
}

/// Half of the listening element the pointer is in
pub fn pointer_half(ev: &web_sys::MouseEvent) -> Option<VerticalHalf> {
    let element = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = element.get_bounding_client_rect();
    let middle = (rect.bottom() - rect.top()) / 2.0;
    let offset = ev.client_y() as f64 - rect.top();
    if offset < middle {
        Some(VerticalHalf::Upper)
    } else {
        Some(VerticalHalf::Lower)
    }
}

/// End drag operation
pub fn end_drag<Z: Send + Sync + 'static>(dnd: &DndSignals<Z>) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<Z>(dnd: DndSignals<Z>, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    Z: Copy + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Form controls keep their own mouse behaviour
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            ev.prevent_default();
            dnd.pending_id_write.set(Some(item_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create hover handler for items. Bind it to both mouseenter and
/// mousemove; `on_hover(dragged_id, hovered_id, half)` runs for every
/// pointer update over an item other than the dragged one.
pub fn make_on_item_hover<Z, F>(dnd: DndSignals<Z>, item_id: u32, on_hover: F) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    Z: Copy + PartialEq + Send + Sync + 'static,
    F: Fn(u32, u32, VerticalHalf) + Clone + 'static,
{
    move |ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id_read.get_untracked() else { return; };
        if dragging == item_id {
            return;
        }
        if dnd.drop_target_read.get_untracked() != Some(DropTarget::Item(item_id)) {
            dnd.drop_target_write.set(Some(DropTarget::Item(item_id)));
        }
        if let Some(half) = pointer_half(&ev) {
            on_hover(dragging, item_id, half);
        }
    }
}

/// Create mouseenter handler for zones
pub fn make_on_zone_mouseenter<Z, F>(dnd: DndSignals<Z>, zone: Z, on_enter: F) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    Z: Copy + Send + Sync + 'static,
    F: Fn(u32, Z) + Clone + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            dnd.drop_target_write.set(Some(DropTarget::Zone(zone)));
            on_enter(dragging, zone);
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<Z>(dnd: DndSignals<Z>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    Z: Copy + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind window mousemove/mouseup handlers for the lifetime of the calling
/// component.
///
/// `on_start(id)` runs once the pending item moved past the threshold,
/// `on_end(id, target)` when the button is released after a real drag.
/// Plain clicks never reach either callback.
pub fn bind_global_handlers<Z, S, E>(dnd: DndSignals<Z>, on_start: S, on_end: E)
where
    Z: Copy + Send + Sync + 'static,
    S: Fn(u32) + 'static,
    E: Fn(u32, Option<DropTarget<Z>>) + 'static,
{
    let on_mousemove = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if let Some(id) = pending {
            if dnd.dragging_id_read.get_untracked().is_none() {
                let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
                if beyond_threshold(start, (ev.client_x(), ev.client_y())) {
                    dnd.dragging_id_write.set(Some(id));
                    on_start(id);
                }
            }
        }
    });

    let on_mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();
        end_drag(&dnd);
        if let Some(dragged) = dragging_id {
            on_end(dragged, drop_target);
        }
    });

    on_cleanup(move || {
        on_mousemove.remove();
        on_mouseup.remove();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!beyond_threshold((10, 10), (15, 14)));
        assert!(beyond_threshold((10, 10), (16, 10)));
        assert!(beyond_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn test_downward_drag_needs_lower_half() {
        assert!(!crosses_midpoint(1, 3, VerticalHalf::Upper));
        assert!(crosses_midpoint(1, 3, VerticalHalf::Lower));
    }

    #[test]
    fn test_upward_drag_needs_upper_half() {
        assert!(crosses_midpoint(4, 2, VerticalHalf::Upper));
        assert!(!crosses_midpoint(4, 2, VerticalHalf::Lower));
    }

    #[test]
    fn test_same_position_never_moves() {
        assert!(!crosses_midpoint(2, 2, VerticalHalf::Upper));
        assert!(!crosses_midpoint(2, 2, VerticalHalf::Lower));
    }
}
