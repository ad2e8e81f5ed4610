//! Giao diện widget đếm ngược cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::styles;
    use cooldown_core::{
        CooldownConfig, StoreError, SystemClock, Theme, TimerDraft, TimerId, TimerStore, TimerView,
    };
    use cooldown_wasm::browser::{prefers_dark_scheme, register_service_worker, LocalStorage};
    use cooldown_wasm::parse_config;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, HtmlInputElement, Window};
    use yew::prelude::*;

    const SERVICE_WORKER_URL: &str = "/sw.js";

    type Store = TimerStore<LocalStorage, SystemClock>;

    /// Tay cầm dùng chung tới store; hai tay cầm bằng nhau khi trỏ cùng một store.
    #[derive(Clone)]
    pub struct StoreHandle(Rc<RefCell<Store>>);

    impl PartialEq for StoreHandle {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct CooldownViewProps {
        pub store: StoreHandle,
    }

    #[function_component(CooldownView)]
    fn cooldown_view(props: &CooldownViewProps) -> Html {
        let store = props.store.0.clone();
        let refresh = use_force_update();
        let notice = use_state(|| None::<String>);
        let name_ref = use_node_ref();
        let duration_ref = use_node_ref();

        use_effect_with((), |_| {
            if let Some(document) = document() {
                if let Err(err) = styles::ensure_styles(&document) {
                    console::error_1(&err);
                }
            }
            register_service_worker(SERVICE_WORKER_URL);
            || ()
        });

        let tick_interval = store.borrow().config().tick_interval_ms;
        {
            let store = store.clone();
            let refresh = refresh.clone();
            use_effect_with(tick_interval, move |interval_ms| {
                let tick = Closure::<dyn FnMut()>::new(move || {
                    if let Err(err) = store.borrow_mut().tick() {
                        console::error_1(&JsValue::from_str(&err.to_string()));
                    }
                    refresh.force_update();
                });
                let window = web_sys::window();
                let handle = window.as_ref().and_then(|window| {
                    window
                        .set_interval_with_callback_and_timeout_and_arguments_0(
                            tick.as_ref().unchecked_ref(),
                            i32::try_from(*interval_ms).unwrap_or(i32::MAX),
                        )
                        .ok()
                });
                move || {
                    if let (Some(window), Some(handle)) = (window, handle) {
                        window.clear_interval_with_handle(handle);
                    }
                    drop(tick);
                }
            });
        }

        let theme = store.borrow().theme();
        use_effect_with(theme, |theme| {
            apply_theme(*theme);
            || ()
        });

        let on_add = {
            let store = store.clone();
            let refresh = refresh.clone();
            let notice = notice.clone();
            let name_ref = name_ref.clone();
            let duration_ref = duration_ref.clone();
            Callback::from(move |event: SubmitEvent| {
                event.prevent_default();
                let (Some(name_input), Some(duration_input)) = (
                    name_ref.cast::<HtmlInputElement>(),
                    duration_ref.cast::<HtmlInputElement>(),
                ) else {
                    return;
                };

                let created = TimerDraft::parse(&name_input.value(), &duration_input.value())
                    .map_err(StoreError::from)
                    .and_then(|draft| store.borrow_mut().create(&draft));
                match created {
                    Ok(_) => {
                        name_input.set_value("");
                        duration_input.set_value("");
                        notice.set(None);
                        refresh.force_update();
                    }
                    Err(err) => notice.set(Some(err.to_string())),
                }
            })
        };

        let on_theme = {
            let store = store.clone();
            let refresh = refresh.clone();
            Callback::from(move |_| {
                if let Err(err) = store.borrow_mut().toggle_theme() {
                    console::error_1(&JsValue::from_str(&err.to_string()));
                }
                refresh.force_update();
            })
        };

        let views = store.borrow().render();

        html! {
            <div class="cooldown-root">
                <header class="cooldown-toolbar">
                    <form class="cooldown-form" onsubmit={on_add}>
                        <input ref={name_ref} type="text" placeholder="Timer name" aria-label="Timer name" />
                        <input ref={duration_ref} type="number" min="1" placeholder="Seconds" aria-label="Duration in seconds" />
                        <button type="submit" class="btn" id="add-timer-btn">{"Add timer"}</button>
                    </form>
                    <button type="button" class="btn" id="theme-toggle-btn" onclick={on_theme}>
                        { if theme.is_dark() { "Light mode" } else { "Dark mode" } }
                    </button>
                </header>
                {
                    (*notice).clone()
                        .map(|text| html! { <p class="cooldown-notice" role="alert">{ text }</p> })
                        .unwrap_or_default()
                }
                <div id="timers-container">
                    { for views.into_iter().map(|view| render_timer(view, &store, &refresh)) }
                </div>
            </div>
        }
    }

    fn render_timer(
        view: TimerView,
        store: &Rc<RefCell<Store>>,
        refresh: &UseForceUpdateHandle,
    ) -> Html {
        let on_toggle = timer_action(view.id, store, refresh, |store, id| {
            store.toggle(id).map(|_| ())
        });
        let on_reset = timer_action(view.id, store, refresh, |store, id| store.reset(id));

        let style = (!view.is_ready).then(|| {
            format!(
                "background: linear-gradient(to right, var(--progress-bar-color) {p}%, var(--timer-background) {p}%)",
                p = view.progress
            )
        });
        let reset_display = if view.show_reset { "inline-block" } else { "none" };

        html! {
            <div
                class={classes!("timer", view.is_ready.then_some("timer-ready"))}
                data-id={view.id.to_string()}
                style={style}
            >
                <div class="timer-info">
                    <div class="timer-name">{ view.name }</div>
                    <div class="timer-time">{ view.label }</div>
                </div>
                <div class="timer-buttons">
                    <button class="btn start-btn" onclick={on_toggle}>{ view.action.label() }</button>
                    <button class="btn reset-btn" style={format!("display: {reset_display}")} onclick={on_reset}>
                        {"Reset"}
                    </button>
                </div>
            </div>
        }
    }

    fn timer_action<F>(
        id: TimerId,
        store: &Rc<RefCell<Store>>,
        refresh: &UseForceUpdateHandle,
        action: F,
    ) -> Callback<MouseEvent>
    where
        F: Fn(&mut Store, TimerId) -> cooldown_core::StoreResult<()> + 'static,
    {
        let store = store.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            if let Err(err) = action(&mut store.borrow_mut(), id) {
                console::error_1(&JsValue::from_str(&err.to_string()));
            }
            refresh.force_update();
        })
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|window| window.document())
    }

    fn apply_theme(theme: Theme) {
        let Some(body) = document().and_then(|document| document.body()) else {
            return;
        };
        if let Err(err) = body.class_list().toggle_with_force("dark-mode", theme.is_dark()) {
            console::error_1(&err);
        }
    }

    #[wasm_bindgen]
    pub fn mount_cooldown_app(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let cfg = parse_config(config)?;
        let storage =
            LocalStorage::from_window().map_err(|err| JsValue::from_str(&err.to_string()))?;
        let mut store = TimerStore::load(storage, SystemClock, CooldownConfig::from(&cfg));
        store.set_preferred_theme(prefers_dark_scheme());

        let store = StoreHandle(Rc::new(RefCell::new(store)));
        yew::Renderer::<CooldownView>::with_root_and_props(target, CooldownViewProps { store })
            .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_cooldown_app;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_cooldown_app(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "cooldown-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
