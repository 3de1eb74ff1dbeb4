use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Texture {
    CheckpointFlag,
    SpeedoDial,
    SpeedoNeedle,
}

/// Immediate-mode GUI layer. Everything is redrawn every GUI pass and
/// `button` reports whether it was clicked during this same pass.
pub trait ImmediateUi {
    fn screen_size(&self) -> Vec2;
    fn draw_texture(&mut self, rect: Rect, texture: Texture);
    fn draw_texture_rotated(
        &mut self,
        rect: Rect,
        texture: Texture,
        angle_degrees: f32,
        pivot: Vec2,
    );
    fn draw_box(&mut self, rect: Rect, text: &str);
    fn label(&mut self, rect: Rect, text: &str);
    fn button(&mut self, rect: Rect, text: &str) -> bool;
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiCall {
    Texture(Rect, Texture),
    RotatedTexture(Rect, Texture, f32, Vec2),
    Box(Rect, String),
    Label(Rect, String),
    Button(Rect, String),
}

/// Records draw calls and clicks the button with a queued label, if any.
/// Used by the headless demo in place of a real GUI.
#[derive(Debug)]
pub struct RecordingUi {
    screen: Vec2,
    pub calls: Vec<UiCall>,
    click: Option<String>,
}

impl RecordingUi {
    pub fn new(screen: Vec2) -> Self {
        RecordingUi {
            screen,
            calls: Vec::new(),
            click: None,
        }
    }

    // the next button drawn with this label reports a click
    pub fn click(&mut self, label: impl Into<String>) {
        self.click = Some(label.into());
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn boxes(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            UiCall::Box(_, text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn buttons(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            UiCall::Button(_, text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            UiCall::Label(_, text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl ImmediateUi for RecordingUi {
    fn screen_size(&self) -> Vec2 {
        self.screen
    }

    fn draw_texture(&mut self, rect: Rect, texture: Texture) {
        self.calls.push(UiCall::Texture(rect, texture));
    }

    fn draw_texture_rotated(
        &mut self,
        rect: Rect,
        texture: Texture,
        angle_degrees: f32,
        pivot: Vec2,
    ) {
        self.calls
            .push(UiCall::RotatedTexture(rect, texture, angle_degrees, pivot));
    }

    fn draw_box(&mut self, rect: Rect, text: &str) {
        self.calls.push(UiCall::Box(rect, text.to_string()));
    }

    fn label(&mut self, rect: Rect, text: &str) {
        self.calls.push(UiCall::Label(rect, text.to_string()));
    }

    fn button(&mut self, rect: Rect, text: &str) -> bool {
        self.calls.push(UiCall::Button(rect, text.to_string()));
        if self.click.as_deref() == Some(text) {
            self.click = None;
            true
        } else {
            false
        }
    }
}
