//! Multi-window demo application
//!
//! Opens a main window and a tool palette, exchanges a few channel messages
//! between them and runs the event loop until every window is closed. The
//! main window asks for confirmation: its first close request is vetoed, and
//! it reopens wherever it was left last time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use multi_window::backends::GlfwSurfaceFactory;
use multi_window::core::{Config, ManagerConfig};
use multi_window::events::{ManagerEvent, ManagerEventType};
use multi_window::foundation::logging;
use multi_window::window::WindowArgs;
use multi_window::{WindowId, WindowManager, WindowResult};
use serde_json::json;

const CONFIG_PATH: &str = "window_demo.toml";
const FRAMES_PATH: &str = "window_demo_frames.toml";
const FRAME_TIME: Duration = Duration::from_millis(16);

struct DemoApp {
    manager: WindowManager,
    main_window: WindowId,
    palette: WindowId,
}

impl DemoApp {
    fn new(config: ManagerConfig) -> WindowResult<Self> {
        let factory = GlfwSurfaceFactory::new()?;
        let mut manager = WindowManager::with_config(Box::new(factory), config);

        let main_window = manager.create_window(WindowArgs::sized(800, 600, "Main").with_visible(true))?;
        manager.set_frame_autosave_name(main_window, "main")?;
        let palette = manager.create_window_from_json(
            r#"{"width": 240, "height": 480, "x": 40, "y": 40, "title": "Palette", "visible": true, "alwaysOnTop": true}"#,
        )?;

        let confirmed = Rc::new(Cell::new(false));
        manager.subscribe(ManagerEventType::CloseRequested, move |event: &ManagerEvent| {
            if event.window_id != main_window || confirmed.get() {
                return false;
            }
            log::info!("Close the main window again to confirm");
            confirmed.set(true);
            true
        });
        manager.subscribe(ManagerEventType::WindowDestroyed, |event: &ManagerEvent| {
            log::info!("Window {} closed", event.window_id);
            false
        });

        Ok(Self {
            manager,
            main_window,
            palette,
        })
    }

    fn run(&mut self) -> WindowResult<()> {
        self.manager
            .post_message(self.main_window, self.palette, "selectTool", json!({"tool": "brush"}))?;
        self.manager
            .post_message(WindowId::HOST, self.main_window, "setTheme", json!("dark"))?;

        while !self.manager.is_empty() {
            self.manager.pump_events();
            self.drain_channels();
            std::thread::sleep(FRAME_TIME);
        }
        Ok(())
    }

    /// Stand-in for the hosted content: log whatever was queued for it
    fn drain_channels(&mut self) {
        for id in self.manager.window_ids() {
            let Ok(window) = self.manager.window_mut(id) else {
                continue;
            };
            for message in window.channel_mut().drain_outbound() {
                log::info!(
                    "Window {} received '{}' from {}: {}",
                    id,
                    message.method,
                    message.from_window_id,
                    message.arguments
                );
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ManagerConfig::load_or_default(CONFIG_PATH)?;
    config.validate()?;
    if config.frame_autosave_path.is_none() {
        config = config.with_frame_autosave(FRAMES_PATH);
    }
    logging::init_with_filter(&config.log_level)?;

    log::info!("Starting multi-window demo");
    let mut app = DemoApp::new(config)?;
    app.run()?;
    log::info!("All windows closed, exiting");
    Ok(())
}
