mod utils;

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod particle;
pub mod renderer;
pub mod surface;

use crate::config::FieldConfig;
use crate::error::SetupError;
use crate::field::{ParticleField, Viewport};
use crate::renderer::CanvasSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    // Already installed when the page calls us twice
    let _ = tracing_wasm::try_set_as_global_default();
}

#[cfg(feature = "timing")]
pub struct Timer<'a> {
    name: &'a str,
}

#[cfg(feature = "timing")]
impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        web_sys::console::time_with_label(name);
        Timer { name }
    }
}

#[cfg(feature = "timing")]
impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        web_sys::console::time_end_with_label(self.name);
    }
}

fn window() -> Result<web_sys::Window, SetupError> {
    web_sys::window().ok_or(SetupError::MissingWindow)
}

// innerWidth/innerHeight come back as JS numbers
fn dimension(value: JsValue) -> u32 {
    value.as_f64().map(|n| n.max(0.0) as u32).unwrap_or(0)
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
}

// JS either drives this through on_resize/on_frame itself or hands it to
// start_particle_background
#[wasm_bindgen]
pub struct ParticleBackground {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    field: ParticleField<StdRng>,
}

impl ParticleBackground {
    pub fn with_config(canvas_id: &str, config: FieldConfig) -> Result<ParticleBackground, SetupError> {
        config.validate()?;
        let document = window()?.document().ok_or(SetupError::MissingDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SetupError::MissingElement(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SetupError::NotACanvas(canvas_id.to_owned()))?;
        let surface = CanvasSurface::new(&canvas, canvas_id)?;

        let viewport = Viewport::new(canvas.width(), canvas.height());
        let field = ParticleField::new(config, viewport, StdRng::from_entropy())?;
        info!(
            canvas_id,
            width = viewport.width,
            height = viewport.height,
            particles = field.particles().len(),
            "particle background attached"
        );

        Ok(ParticleBackground {
            canvas,
            surface,
            field,
        })
    }

    pub fn field(&self) -> &ParticleField<StdRng> {
        &self.field
    }
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
        Ok(ParticleBackground::with_config(canvas_id, FieldConfig::default())?)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.on_resize(width, height);
    }

    // Size the canvas to the browser window, as the resize listener does
    pub fn fit_to_window(&mut self) -> Result<(), JsValue> {
        let window = window()?;
        let width = dimension(window.inner_width()?);
        let height = dimension(window.inner_height()?);
        self.on_resize(width, height);
        Ok(())
    }

    pub fn on_frame(&mut self) {
        #[cfg(feature = "timing")]
        let _timer = Timer::new("ParticleBackground::on_frame");
        self.field.on_frame(&mut self.surface);
    }

    pub fn particle_count(&self) -> usize {
        self.field.particles().len()
    }

    pub fn width(&self) -> u32 {
        self.field.viewport().width
    }

    pub fn height(&self) -> u32 {
        self.field.viewport().height
    }
}

// Runs until the page goes away
#[wasm_bindgen]
pub fn start_particle_background(canvas_id: &str) -> Result<(), JsValue> {
    let mut background = ParticleBackground::new(canvas_id)?;
    background.fit_to_window()?;
    let background = Rc::new(RefCell::new(background));

    let resized = Rc::clone(&background);
    let on_resize = Closure::wrap(Box::new(move || {
        if let Err(e) = resized.borrow_mut().fit_to_window() {
            warn!(?e, "could not read window size on resize");
        }
    }) as Box<dyn FnMut()>);
    window()?.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    // The frame callback reschedules itself, so it needs a handle to itself
    let next_frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let first_frame = Rc::clone(&next_frame);
    *first_frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        background.borrow_mut().on_frame();
        if let Some(callback) = next_frame.borrow().as_ref() {
            if let Err(e) = request_animation_frame(callback) {
                warn!(?e, "animation stopped, could not schedule next frame");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = first_frame.borrow().as_ref() {
        request_animation_frame(callback)?;
    }
    Ok(())
}
