//! Dashboard widget layout persistence.
//!
//! Loading merges into an existing layout: widgets are matched by id, fields
//! missing from the file keep their current value, unknown ids are ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TuneError};

pub const LAYOUT_VERSION: &str = "1.0";

const ARRANGE_PADDING: f32 = 10.0;
const ARRANGE_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum WidgetType {
    CpuMonitor,
    GpuMonitor,
    RamMonitor,
    DiskMonitor,
    NetworkMonitor,
    ProcessMonitor,
    QuickActions,
    Custom,
}

impl From<WidgetType> for u32 {
    fn from(t: WidgetType) -> u32 {
        match t {
            WidgetType::CpuMonitor => 0,
            WidgetType::GpuMonitor => 1,
            WidgetType::RamMonitor => 2,
            WidgetType::DiskMonitor => 3,
            WidgetType::NetworkMonitor => 4,
            WidgetType::ProcessMonitor => 5,
            WidgetType::QuickActions => 6,
            WidgetType::Custom => 7,
        }
    }
}

impl TryFrom<u32> for WidgetType {
    type Error = String;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => WidgetType::CpuMonitor,
            1 => WidgetType::GpuMonitor,
            2 => WidgetType::RamMonitor,
            3 => WidgetType::DiskMonitor,
            4 => WidgetType::NetworkMonitor,
            5 => WidgetType::ProcessMonitor,
            6 => WidgetType::QuickActions,
            7 => WidgetType::Custom,
            other => return Err(format!("unknown widget type {}", other)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub title: String,
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub visible: bool,
    pub resizable: bool,
    pub draggable: bool,
}

impl WidgetDescriptor {
    pub fn new(
        id: &str,
        title: &str,
        widget_type: WidgetType,
        position: [f32; 2],
        size: [f32; 2],
    ) -> Self {
        Self {
            id: id.to_string(),
            widget_type,
            title: title.to_string(),
            position,
            size,
            visible: true,
            resizable: true,
            draggable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub version: String,
    pub widgets: Vec<WidgetDescriptor>,
}

// Everything but the id may be absent on disk.
#[derive(Debug, Deserialize)]
struct StoredLayout {
    widgets: Vec<StoredWidget>,
}

#[derive(Debug, Deserialize)]
struct StoredWidget {
    id: String,
    position: Option<[f32; 2]>,
    size: Option<[f32; 2]>,
    visible: Option<bool>,
    resizable: Option<bool>,
    draggable: Option<bool>,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            version: LAYOUT_VERSION.to_string(),
            widgets: vec![
                WidgetDescriptor::new(
                    "cpu_monitor",
                    "CPU Monitor",
                    WidgetType::CpuMonitor,
                    [20.0, 20.0],
                    [600.0, 400.0],
                ),
                WidgetDescriptor::new(
                    "gpu_monitor",
                    "GPU Monitor",
                    WidgetType::GpuMonitor,
                    [640.0, 20.0],
                    [600.0, 400.0],
                ),
                WidgetDescriptor::new(
                    "ram_monitor",
                    "RAM Monitor",
                    WidgetType::RamMonitor,
                    [20.0, 440.0],
                    [400.0, 250.0],
                ),
                WidgetDescriptor::new(
                    "quick_actions",
                    "Quick Actions",
                    WidgetType::Custom,
                    [20.0, 710.0],
                    [1240.0, 180.0],
                ),
            ],
        }
    }
}

impl DashboardLayout {
    pub fn widget(&self, id: &str) -> Option<&WidgetDescriptor> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Merge the layout stored at `path` into `self`. Returns how many widgets matched.
    pub fn merge_from(&mut self, path: &Path) -> Result<usize> {
        let data = fs::read_to_string(path)?;
        self.merge_json(&data)
    }

    pub fn merge_json(&mut self, data: &str) -> Result<usize> {
        let stored: StoredLayout = serde_json::from_str(data)
            .map_err(|e| TuneError::persistence(format!("invalid layout: {}", e)))?;

        let mut matched = 0;
        for entry in stored.widgets {
            let Some(widget) = self.widgets.iter_mut().find(|w| w.id == entry.id) else {
                log::debug!("Ignoring layout entry for unknown widget '{}'", entry.id);
                continue;
            };

            if let Some(position) = entry.position {
                widget.position = position;
            }
            if let Some(size) = entry.size {
                widget.size = size;
            }
            if let Some(visible) = entry.visible {
                widget.visible = visible;
            }
            if let Some(resizable) = entry.resizable {
                widget.resizable = resizable;
            }
            if let Some(draggable) = entry.draggable {
                widget.draggable = draggable;
            }
            matched += 1;
        }
        Ok(matched)
    }

    /// Default layout with the file at `path` merged in. A missing or unreadable
    /// file leaves the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        let mut layout = Self::default();
        if path.exists() {
            if let Err(e) = layout.merge_from(path) {
                log::warn!("Could not load layout {:?}: {}", path, e);
            }
        }
        layout
    }

    /// Flow visible widgets into rows of three, left to right.
    pub fn auto_arrange(&mut self) {
        let mut x = ARRANGE_PADDING;
        let mut y = ARRANGE_PADDING;
        let mut column = 0;
        let mut row_height: f32 = 0.0;

        for widget in self.widgets.iter_mut().filter(|w| w.visible) {
            widget.position = [x, y];
            row_height = row_height.max(widget.size[1]);
            x += widget.size[0] + ARRANGE_PADDING;
            column += 1;

            if column >= ARRANGE_COLUMNS {
                x = ARRANGE_PADDING;
                y += row_height + ARRANGE_PADDING;
                row_height = 0.0;
                column = 0;
            }
        }
    }
}
