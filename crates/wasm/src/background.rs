//! The `WavesBackground` class exported to JavaScript.

use crate::host::{AnimationFrameHost, FrameCallback};
use crate::surface::CanvasSurface;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wave_field_core::{Driver, Viewport, WaveConfig, WaveError, WaveField};
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, Window};

type BrowserDriver = Driver<AnimationFrameHost, CanvasSurface>;

fn to_js(e: WaveError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Viewport matching the container's bounding box.
fn measure(container: &HtmlElement) -> Result<Viewport, WaveError> {
    let rect = container.get_bounding_client_rect();
    Viewport::with_offset(rect.width(), rect.height(), rect.left(), rect.top())
}

/// Options object to [`WaveConfig`], missing or odd keys taking defaults.
fn parse_options(options: &JsValue) -> Result<WaveConfig, WaveError> {
    if options.is_undefined() || options.is_null() {
        return Ok(WaveConfig::default());
    }
    let text: String = js_sys::JSON::stringify(options)
        .map_err(|e| WaveError::Host(format!("options are not serialisable: {e:?}")))?
        .into();
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| WaveError::config("options", e.to_string()))?;
    Ok(WaveConfig::from_json(&value))
}

/// A DOM listener that can be detached again.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        match passive {
            Some(passive) => {
                let opts = AddEventListenerOptions::new();
                opts.set_passive(passive);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &opts,
                )?;
            }
            None => {
                target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            }
        }
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn detach(&self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("removing {} listener failed: {e:?}", self.kind);
        }
    }
}

/// Runs `f` on the driver if it is still alive and not already borrowed.
fn with_driver(driver: &Weak<RefCell<BrowserDriver>>, f: impl FnOnce(&mut BrowserDriver)) {
    if let Some(driver) = driver.upgrade() {
        if let Ok(mut driver) = driver.try_borrow_mut() {
            f(&mut *driver);
        }
    }
}

/// Wires window resize, mouse and touch events to the driver.
fn bind_events(
    window: &Window,
    container: &HtmlElement,
    driver: &Rc<RefCell<BrowserDriver>>,
) -> Result<Vec<Listener>, JsValue> {
    let target: &EventTarget = window.as_ref();

    let on_resize = {
        let weak = Rc::downgrade(driver);
        let container = container.clone();
        move |_: Event| {
            with_driver(&weak, |d| {
                let result = measure(&container).and_then(|vp| d.resize(vp));
                if let Err(e) = result {
                    log::warn!("resize ignored: {e}");
                }
            });
        }
    };

    let on_mouse_move = {
        let weak = Rc::downgrade(driver);
        let window = window.clone();
        move |e: Event| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            with_driver(&weak, |d| {
                d.pointer_moved(f64::from(e.page_x()), f64::from(e.page_y()), scroll_y);
            });
        }
    };

    let on_touch_move = {
        let weak = Rc::downgrade(driver);
        let window = window.clone();
        move |e: Event| {
            e.prevent_default();
            let Some(touch) = e
                .dyn_ref::<TouchEvent>()
                .and_then(|e| e.touches().get(0))
            else {
                return;
            };
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            with_driver(&weak, |d| {
                d.pointer_moved(
                    f64::from(touch.client_x()),
                    f64::from(touch.client_y()),
                    scroll_y,
                );
            });
        }
    };

    Ok(vec![
        Listener::attach(target, "resize", None, on_resize)?,
        Listener::attach(target, "mousemove", None, on_mouse_move)?,
        Listener::attach(target, "touchmove", Some(false), on_touch_move)?,
    ])
}

/// Animated wave-field background attached to a container element.
///
/// Construction starts the animation. Call `destroy()` to stop it, detach
/// every listener and empty the container.
#[wasm_bindgen]
pub struct WavesBackground {
    driver: Rc<RefCell<BrowserDriver>>,
    frame_callback: FrameCallback,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WavesBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options: JsValue) -> Result<WavesBackground, JsValue> {
        // A second instance finds the logger already installed.
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = parse_options(&options).map_err(to_js)?;
        let viewport = measure(&container).map_err(to_js)?;
        let field = WaveField::new(config, js_sys::Math::random(), viewport).map_err(to_js)?;
        let surface =
            CanvasSurface::attach(&document, container.clone(), field.config().background_color)
                .map_err(to_js)?;

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let host = AnimationFrameHost::new(window.clone(), frame_callback.clone());
        let driver = Rc::new(RefCell::new(Driver::new(field, host, surface)));

        let weak = Rc::downgrade(&driver);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |time_ms: f64| {
            with_driver(&weak, |d| {
                if let Err(e) = d.on_frame(time_ms) {
                    log::warn!("frame skipped: {e}");
                }
            });
        }) as Box<dyn FnMut(f64)>));

        let listeners = bind_events(&window, &container, &driver)?;
        driver.borrow_mut().start().map_err(to_js)?;

        Ok(WavesBackground {
            driver,
            frame_callback,
            listeners,
        })
    }

    /// Stops the animation, detaches listeners and empties the container.
    ///
    /// Calling it more than once is harmless.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.driver.borrow_mut().teardown();
        self.frame_callback.borrow_mut().take();
    }

    /// Number of frames drawn so far.
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.driver.borrow().field().ticks() as f64
    }

    /// Current options as a plain object.
    #[wasm_bindgen(getter)]
    pub fn options(&self) -> Result<JsValue, JsValue> {
        let json = self.driver.borrow().field().config().params().to_string();
        js_sys::JSON::parse(&json)
    }
}

impl Drop for WavesBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}
