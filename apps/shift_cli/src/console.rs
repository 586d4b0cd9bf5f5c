//! Terminal stand-in for the editor UI.

use std::sync::Mutex;

use shared::domain::{NotifyLevel, UiRegion};
use shift_core::{ParameterStore, UiContext, UiHost};
use tracing::debug;

pub struct ConsoleHost {
    current_frame: i32,
    parameters: ParameterStore,
    notifications: Mutex<Vec<(NotifyLevel, String)>>,
}

impl ConsoleHost {
    pub fn new(current_frame: i32, parameters: ParameterStore) -> Self {
        Self {
            current_frame,
            parameters,
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn notification_count(&self) -> usize {
        self.notifications
            .lock()
            .map(|notifications| notifications.len())
            .unwrap_or_default()
    }
}

impl UiHost for ConsoleHost {
    fn context(&self) -> Option<UiContext> {
        Some(UiContext {
            current_frame: self.current_frame,
            parameters: self.parameters.clone(),
        })
    }

    fn redraw(&self, regions: &[UiRegion]) {
        debug!(?regions, "redraw requested");
    }

    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => println!("[INFO] {message}"),
            NotifyLevel::Error => eprintln!("[ERROR] {message}"),
        }
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push((level, message.to_string()));
        }
    }
}
