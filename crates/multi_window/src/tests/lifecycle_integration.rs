//! Window lifecycle scenarios: creation, close requests, destruction

use super::*;
use crate::window::{HostedContent, Lifecycle, WindowArgs, WindowError, WindowStateEvent};

#[test]
fn test_main_window_resize_reported_once() {
    let mut manager = headless_manager();
    let log = record(&mut manager, &[ManagerEventType::WindowStateChanged]);
    let id = manager.create_window(WindowArgs::sized(800, 600, "Main")).unwrap();
    assert_eq!(id, WindowId(1));

    manager.window_mut(id).unwrap().set_size(1024, 768).unwrap();
    manager.pump_events();
    manager.pump_events();

    let events = log.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].window_id, id);
    assert_eq!(events[0].state, Some(WindowStateEvent::Resized { width: 1024, height: 768 }));
    assert_eq!(manager.window(id).unwrap().size().unwrap(), (1024, 768));
}

#[test]
fn test_vetoed_close_keeps_window_live() {
    let mut manager = headless_manager();
    let id = manager.create_window(WindowArgs::sized(800, 600, "Main")).unwrap();
    let destroyed = record(&mut manager, &[ManagerEventType::WindowDestroyed]);
    manager.subscribe(ManagerEventType::CloseRequested, |_: &ManagerEvent| true);

    inject(&mut manager, id, NativeEvent::CloseRequested);
    manager.pump_events();

    assert!(manager.contains(id));
    assert!(destroyed.borrow().is_empty());
    let window = manager.window_mut(id).unwrap();
    assert_eq!(window.lifecycle(), Lifecycle::Live);
    window.set_title("Unsaved changes").unwrap();
}

#[test]
fn test_unvetoed_close_destroys_window() {
    let mut manager = headless_manager();
    let id = manager.create_window(WindowArgs::default()).unwrap();
    let log = record(
        &mut manager,
        &[ManagerEventType::CloseRequested, ManagerEventType::WindowDestroyed],
    );

    inject(&mut manager, id, NativeEvent::CloseRequested);
    manager.pump_events();

    let types: Vec<ManagerEventType> = log.borrow().iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![ManagerEventType::CloseRequested, ManagerEventType::WindowDestroyed]
    );
    assert!(!manager.contains(id));
    assert_eq!(manager.window(id).unwrap_err(), WindowError::NotFound(id));
    assert!(manager.is_empty());
}

#[test]
fn test_prevent_close_blocks_user_close_only() {
    let mut manager = headless_manager();
    let id = manager.create_window(WindowArgs::default()).unwrap();
    manager.window_mut(id).unwrap().set_prevent_close(true).unwrap();

    inject(&mut manager, id, NativeEvent::CloseRequested);
    manager.pump_events();
    assert!(manager.contains(id));

    manager.close_window(id).unwrap();
    assert!(!manager.contains(id));
}

#[test]
fn test_native_destroy_unregisters_window() {
    let mut manager = headless_manager();
    let id = manager.create_window(WindowArgs::default()).unwrap();
    let log = record(&mut manager, &[ManagerEventType::WindowDestroyed]);

    inject(&mut manager, id, NativeEvent::Destroyed);
    manager.pump_events();

    assert!(!manager.contains(id));
    assert_eq!(log.borrow().len(), 1);
    assert!(!manager.dispatch_native(id, NativeEvent::FocusIn));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_destroying_one_window_leaves_others_alone() {
    let mut manager = headless_manager();
    let a = manager.create_window(WindowArgs::sized(400, 300, "A")).unwrap();
    let b = manager.create_window(WindowArgs::sized(400, 300, "B")).unwrap();
    manager.post_message(a, b, "first", serde_json::json!(1)).unwrap();
    manager.post_message(WindowId::HOST, b, "second", serde_json::json!(2)).unwrap();

    manager.close_window(a).unwrap();

    assert_eq!(manager.window_ids(), vec![b]);
    let queued: Vec<String> = manager
        .window_mut(b)
        .unwrap()
        .channel_mut()
        .drain_outbound()
        .into_iter()
        .map(|message| message.method)
        .collect();
    assert_eq!(queued, vec!["first", "second"]);
    let window = manager.window_mut(b).unwrap();
    assert_eq!(window.title().unwrap(), "B");
    window.show().unwrap();
    assert!(window.is_visible().unwrap());
    assert!(!window.channel().is_closed());
}

#[test]
fn test_close_all_then_fresh_ids() {
    let mut manager = headless_manager();
    for _ in 0..3 {
        manager.create_window(WindowArgs::default()).unwrap();
    }
    let log = record(&mut manager, &[ManagerEventType::WindowDestroyed]);

    manager.close_all();

    assert!(manager.is_empty());
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(manager.create_window(WindowArgs::default()).unwrap(), WindowId(4));
}

#[test]
fn test_created_event_published() {
    let mut manager = headless_manager();
    let log = record(&mut manager, &[ManagerEventType::WindowCreated]);

    let id = manager.create_window(WindowArgs::default()).unwrap();

    assert_eq!(*log.borrow(), vec![ManagerEvent::new(ManagerEventType::WindowCreated, id)]);
}

#[test]
fn test_content_factory_sees_raw_arguments() {
    struct NullContent;
    impl HostedContent for NullContent {
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn set_visible(&mut self, _visible: bool) {}
    }

    let mut manager = headless_manager();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    manager.set_content_factory(Box::new(move |id: WindowId, raw: &str| {
        sink.borrow_mut().push((id, raw.to_string()));
        Some(Box::new(NullContent) as Box<dyn HostedContent>)
    }));

    let raw = r#"{"title": "Docs", "route": "/help"}"#;
    let id = manager.create_window_from_json(raw).unwrap();

    assert_eq!(*seen.borrow(), vec![(id, raw.to_string())]);
    assert!(manager.window(id).unwrap().has_content());
}
