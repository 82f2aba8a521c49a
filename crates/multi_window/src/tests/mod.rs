//! Scenario tests driving the window manager end to end on headless surfaces

mod lifecycle_integration;

use std::cell::RefCell;
use std::rc::Rc;

use crate::backends::headless::{HeadlessSurface, HeadlessSurfaceFactory};
use crate::events::{ManagerEvent, ManagerEventType};
use crate::manager::WindowManager;
use crate::window::{NativeEvent, WindowId};

/// Manager on an unlimited headless factory
fn headless_manager() -> WindowManager {
    WindowManager::new(Box::new(HeadlessSurfaceFactory::new()))
}

/// Queue a callback on a window's headless surface, as the toolkit would
fn inject(manager: &mut WindowManager, id: WindowId, event: NativeEvent) {
    manager
        .window_mut(id)
        .unwrap()
        .native_surface_mut()
        .unwrap()
        .as_any_mut()
        .downcast_mut::<HeadlessSurface>()
        .unwrap()
        .push_event(event);
}

/// Record every manager event of the given types, in order
fn record(manager: &mut WindowManager, types: &[ManagerEventType]) -> Rc<RefCell<Vec<ManagerEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for event_type in types {
        let sink = Rc::clone(&log);
        manager.subscribe(*event_type, move |event: &ManagerEvent| {
            sink.borrow_mut().push(*event);
            false
        });
    }
    log
}
