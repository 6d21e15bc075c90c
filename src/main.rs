//! Drift Menu entry point
//!
//! Handles platform-specific initialization and runs the page loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{DeviceOrientationEvent, HtmlCanvasElement, MouseEvent, TouchEvent};

    use drift_menu::MenuConfig;
    use drift_menu::consts::*;
    use drift_menu::platform::{self, ActivationStrategy, PermissionOutcome};
    use drift_menu::renderer::{CanvasRenderer, LabelSprite};
    use drift_menu::sim::{Bounds, ItemSpec, PointerDrag, TiltGravity, World, scatter_positions};

    /// Page instance holding all state
    struct App {
        world: World,
        renderer: CanvasRenderer,
        sprites: Vec<LabelSprite>,
        tilt: TiltGravity,
        drag: PointerDrag,
        strategy: ActivationStrategy,
        /// Permission prompt currently outstanding
        permission_pending: bool,
        /// Permission was denied; the session stays inactive for good
        permission_refused: bool,
        accumulator: f32,
        last_time: f64,
    }

    impl App {
        /// Run the physics at a fixed rate regardless of display rate
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.world.set_gravity(self.tilt.gravity());
                self.world.step(&self.drag);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Err(err) = self.renderer.draw(&self.world, &self.sprites) {
                log::warn!("render error: {err:?}");
            }
        }
    }

    fn viewport_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (w as f32, h as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Drift Menu starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("world")
            .expect("no #world canvas")
            .dyn_into()?;

        let config = MenuConfig::load();
        let (width, height) = viewport_size(&window);
        let dpr = window.device_pixel_ratio();

        let mut renderer = CanvasRenderer::new(canvas.clone())?;
        renderer.resize(width, height, dpr);

        let mut world = World::new(Bounds { width, height }, config.physics.clone());

        // One seed per session drives both scatter and wood grain
        let seed = js_sys::Date::now() as u64;
        let mut rng = Pcg32::seed_from_u64(seed);
        let positions = scatter_positions(&mut rng, width, height, config.items.len());

        let mut sprites = Vec::new();
        for (i, (label, pos)) in config.items.iter().zip(positions).enumerate() {
            let spec = ItemSpec::new(label.clone(), &config.physics);
            let (w, h) = (
                spec.half_extents.x as f64 * 2.0,
                spec.half_extents.y as f64 * 2.0,
            );
            if world.spawn_item(spec, pos).is_some() {
                sprites.push(LabelSprite::rasterize(
                    &document,
                    label,
                    w,
                    h,
                    seed.wrapping_add(i as u64),
                )?);
            }
        }
        log::info!("Spawned {} menu items (seed {seed})", world.items().len());

        let strategy = platform::detect_activation_strategy();
        log::info!("Orientation activation strategy: {strategy:?}");

        let app = Rc::new(RefCell::new(App {
            world,
            renderer,
            sprites,
            tilt: TiltGravity::new(),
            drag: PointerDrag::new(),
            strategy,
            permission_pending: false,
            permission_refused: false,
            accumulator: 0.0,
            last_time: 0.0,
        }));

        setup_resize_handler(app.clone());
        setup_pointer_handlers(&canvas, app.clone());
        setup_start_button(app.clone());

        request_animation_frame(app);
        log::info!("Drift Menu running");
        Ok(())
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let (width, height) = viewport_size(&window);
            let dpr = window.device_pixel_ratio();

            let mut a = app.borrow_mut();
            a.renderer.resize(width, height, dpr);
            a.world.resize(width, height);
            log::debug!("viewport resized to {width}x{height}");
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down - try to grab the item under the cursor
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let mut g = app.borrow_mut();
                let a = &mut *g;
                a.drag.press(&a.world, point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - retarget the drag every frame
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                app.borrow_mut().drag.move_to(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up anywhere releases the grab
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().drag.release();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let point = touch_point(&canvas_clone, &touch);
                    let mut g = app.borrow_mut();
                    let a = &mut *g;
                    a.drag.press(&a.world, point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let point = touch_point(&canvas_clone, &touch);
                    app.borrow_mut().drag.move_to(point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().drag.release();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn touch_point(canvas: &HtmlCanvasElement, touch: &web_sys::Touch) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        )
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                handle_start_click(app.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("no #start-btn, tilt gravity stays inactive");
        }
    }

    fn handle_start_click(app: Rc<RefCell<App>>) {
        let strategy = {
            let a = app.borrow();
            // At most one activation per session: ignore repeat clicks while
            // active, while a prompt is outstanding, and after a denial
            if a.tilt.is_active() || a.permission_pending || a.permission_refused {
                return;
            }
            a.strategy
        };

        match strategy {
            ActivationStrategy::Ungated => activate_tilt(&app),
            ActivationStrategy::Gated => {
                app.borrow_mut().permission_pending = true;
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = platform::request_orientation_permission().await;
                    app.borrow_mut().permission_pending = false;
                    match outcome {
                        Ok(PermissionOutcome::Granted) => activate_tilt(&app),
                        Ok(PermissionOutcome::Denied) => {
                            app.borrow_mut().permission_refused = true;
                            show_permission_notice();
                            log::info!("orientation permission denied, staying at zero gravity");
                        }
                        Err(err) => {
                            // Platform-level failure, not a denial: log only,
                            // the page keeps working with zero gravity
                            log::error!("orientation permission request failed: {err:?}");
                        }
                    }
                });
            }
        }
    }

    fn activate_tilt(app: &Rc<RefCell<App>>) {
        if !app.borrow_mut().tilt.activate() {
            return;
        }
        attach_orientation_listener(app.clone());
        hide_overlay();
        log::info!("Tilt gravity active");
    }

    fn attach_orientation_listener(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
            // beta: front-back tilt, gamma: left-right tilt, both in degrees
            let front_back = event.beta().unwrap_or(0.0) as f32;
            let left_right = event.gamma().unwrap_or(0.0) as f32;
            app.borrow_mut().tilt.sample(front_back, left_right);
        });
        let _ = window
            .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn hide_overlay() {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("overlay") {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn show_permission_notice() {
        // Blocking notice; the overlay stays up and the page keeps working
        // with zero gravity
        let window = web_sys::window().unwrap();
        let _ = window.alert_with_message("ジャイロ機能の許可が必要です。");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            page_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn page_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_page::run() {
        log::error!("startup failed: {err:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Drift Menu (native) starting...");
    log::info!("The page needs a browser - run with `trunk serve` for the web version");

    println!("\nRunning headless drift check...");
    drift_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn drift_check() {
    use drift_menu::MenuConfig;
    use drift_menu::sim::{Bounds, ItemSpec, PointerDrag, TiltGravity, World, scatter_positions};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let config = MenuConfig::default();
    let bounds = Bounds {
        width: 1280.0,
        height: 720.0,
    };
    let mut world = World::new(bounds, config.physics.clone());

    let mut rng = Pcg32::seed_from_u64(2);
    let positions = scatter_positions(&mut rng, bounds.width, bounds.height, config.items.len());
    for (label, pos) in config.items.iter().zip(positions) {
        let _ = world.spawn_item(ItemSpec::new(label.clone(), &config.physics), pos);
    }

    let mut tilt = TiltGravity::new();
    tilt.activate();
    tilt.sample(30.0, -10.0);
    world.set_gravity(tilt.gravity());

    let drag = PointerDrag::new();
    for _ in 0..600 {
        world.step(&drag);
    }

    let margin = config.physics.wall_thickness;
    for item in world.items() {
        let (pos, _) = world.item_pose(item);
        assert!(pos.x > -margin && pos.x < bounds.width + margin);
        assert!(pos.y > -margin && pos.y < bounds.height + margin);
    }
    println!(
        "✓ {} items still inside the frame after 10s of tilt",
        world.items().len()
    );
}
