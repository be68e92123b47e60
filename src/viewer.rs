use arboard::Clipboard;
use macroquad::prelude::*;
use mapfgrid::config::ViewerConfig;
use mapfgrid::map_format::format_map;
use mapfgrid::Instance;

const INFO_HEIGHT: f32 = 110.0;

/// Visualization state
struct ViewerState {
    instance: Instance,
    config: ViewerConfig,
    status: String,
}

impl ViewerState {
    fn new(instance: Instance, config: ViewerConfig) -> Self {
        ViewerState {
            instance,
            config,
            status: String::from("Left click: add obstacle"),
        }
    }

    fn holds_agent(&self, idx: usize) -> bool {
        let agents = &self.instance.agents;
        agents.starts.contains(&idx) || agents.goals.contains(&idx)
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let grid = &self.instance.grid;
        let col = (mouse_x / self.config.cell_size) as usize;
        let row = (mouse_y / self.config.cell_size) as usize;
        if mouse_x < 0.0 || mouse_y < 0.0 || row >= grid.rows() || col >= grid.cols() {
            return;
        }
        let idx = grid.linearize(row, col);

        if self.holds_agent(idx) {
            self.status = format!("({}, {}) holds an agent", row, col);
            return;
        }
        if self.instance.grid.try_add_obstacle(idx) {
            log::info!("Obstacle added at ({}, {})", row, col);
            self.status = format!("Obstacle added at ({}, {})", row, col);
        } else {
            log::info!("Obstacle at ({}, {}) rejected", row, col);
            self.status = format!("Obstacle at ({}, {}) rejected", row, col);
        }
    }

    fn save_map(&mut self) {
        match self.instance.save_map() {
            Ok(()) => self.status = format!("Saved {}", self.instance.map_path.display()),
            Err(e) => {
                log::error!("{}", e);
                self.status = format!("Save failed: {}", e);
            }
        }
    }

    fn copy_to_clipboard(&mut self) {
        let map_string = format_map(&self.instance.grid);
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(map_string) {
                    log::warn!("Failed to copy to clipboard: {}", e);
                    self.status = String::from("Clipboard copy failed");
                } else {
                    self.status = String::from("Map copied to clipboard");
                    // the X11 selection is dropped with the clipboard handle
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                log::warn!("Failed to access clipboard: {}", e);
                self.status = String::from("Clipboard unavailable");
            }
        }
    }

    fn draw(&self) {
        let bg = &self.config;
        clear_background(Color::from_rgba(bg.background_r, bg.background_g, bg.background_b, 255));

        let grid = &self.instance.grid;
        let cell = self.config.cell_size;
        for idx in 0..grid.size() {
            let (row, col) = grid.coords(idx);
            let px = col as f32 * cell;
            let py = row as f32 * cell;

            let color = if self.instance.agents.starts.contains(&idx) {
                BLUE // Start
            } else if self.instance.agents.goals.contains(&idx) {
                GREEN // Goal
            } else if grid.is_obstacle(idx) {
                Color::from_rgba(140, 60, 60, 255) // Obstacle
            } else {
                Color::from_rgba(70, 70, 70, 255) // Free
            };
            draw_rectangle(px, py, cell - 1.0, cell - 1.0, color);
        }

        let info = format!(
            "{}x{}  free: {}  agents: {}  revision: {}",
            grid.rows(),
            grid.cols(),
            grid.free_count(),
            self.instance.agents.len(),
            grid.get_revision()
        );
        let top = grid.rows() as f32 * cell;
        draw_text(&info, 10.0, top + 24.0, 20.0, WHITE);
        draw_text(&self.status, 10.0, top + 48.0, 20.0, YELLOW);
        draw_text("S: save map   C: copy map   Esc: close", 10.0, top + 72.0, 20.0, WHITE);
    }
}

async fn run(mut state: ViewerState) {
    loop {
        if is_mouse_button_pressed(MouseButton::Left) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::S) {
            state.save_map();
        }

        // Copy map to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}

/// Open the viewer window; returns when it is closed
pub fn open(instance: Instance, config: ViewerConfig) {
    let grid = &instance.grid;
    let width = (grid.cols() as f32 * config.cell_size).max(420.0);
    let height = grid.rows() as f32 * config.cell_size + INFO_HEIGHT;
    let conf = Conf {
        window_title: config.window_title.clone(),
        window_width: width as i32,
        window_height: height as i32,
        ..Default::default()
    };
    macroquad::Window::from_config(conf, run(ViewerState::new(instance, config)));
}
