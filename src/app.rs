use leptos::*;
use std::cell::Cell;
use wasm_bindgen::JsCast;

use crate::{
    application::{ChartConfig, ChartController, FrameStatus, GestureEvent},
    domain::{
        chart::{ChartData, DataPoint, ExportTable, ScreenPoint, Series, Theme, ValueFormatter},
        logging::LogComponent,
    },
    event_utils::{EventListenerHandle, EventOptions, event_listener_with_options, window_event_listener_with_options},
    infrastructure::{
        browser::{
            AnimationHandle, ResizeHandle, host_point, host_width, hover_capable, now_ms, observe_width,
            start_frame_loop, touch_points,
        },
        rendering::SvgWriter,
    },
    log_error, log_warn,
};

thread_local! {
    static NEXT_CHART_ID: Cell<usize> = const { Cell::new(0) };
}

pub(crate) fn next_chart_id() -> String {
    NEXT_CHART_ID.with(|id| {
        let next = id.get();
        id.set(next + 1);
        format!("space-chart-{}", next)
    })
}

const CHART_STYLES: &str = r#"
.space-chart { position: relative; width: 100%; touch-action: pan-y; user-select: none; }
.space-chart-svg { width: 100%; line-height: 0; }
.space-chart-title { font-size: 14px; font-weight: 600; margin: 0 0 6px; }
.space-chart-tooltip {
    position: absolute;
    transform: translate(-50%, calc(-100% - 10px));
    padding: 6px 10px;
    border-radius: 6px;
    font-size: 12px;
    pointer-events: none;
    white-space: nowrap;
    z-index: 10;
}
.space-chart-tooltip-title { font-weight: 600; margin-bottom: 2px; }
.space-chart-swatch { display: inline-block; width: 8px; height: 8px; border-radius: 2px; margin-right: 6px; }
.space-chart-actions { position: absolute; top: 4px; right: 4px; display: flex; gap: 4px; }
.space-chart-actions button {
    background: #1e293b;
    color: #e2e8f0;
    border: 1px solid #475569;
    border-radius: 4px;
    font-size: 11px;
    padding: 2px 8px;
    cursor: pointer;
}
.space-chart .sr-only {
    position: absolute;
    width: 1px;
    height: 1px;
    padding: 0;
    margin: -1px;
    overflow: hidden;
    clip: rect(0, 0, 0, 0);
    border: 0;
}
"#;

/// Shared host for every chart kind: measurement, input wiring, frame loop
/// and the accessible text list.
#[component]
pub fn ChartView(
    #[prop(into)] data: MaybeSignal<ChartData>,
    #[prop(optional)] config: ChartConfig,
    #[prop(default = None)] theme: Option<Theme>,
    #[prop(default = None)] formatter: Option<ValueFormatter>,
    #[prop(default = None)] on_export: Option<Callback<ExportTable>>,
) -> impl IntoView {
    let chart_id = next_chart_id();
    let height = config.height;
    let title = config.title.clone();

    let mut initial = ChartController::new(data.get_untracked(), config, theme.unwrap_or_default());
    if let Some(formatter) = formatter {
        initial.set_formatter(formatter);
    }
    let controller = store_value(initial);
    let frames = store_value(None::<AnimationHandle>);
    let listeners = store_value(Vec::<EventListenerHandle>::new());
    let resize_observer = store_value(None::<ResizeHandle>);
    let revision = create_rw_signal(0u64);
    let host_ref = create_node_ref::<html::Div>();

    let redraw = move || revision.update(|r| *r = r.wrapping_add(1));

    let ensure_frames = move || {
        let animating = controller.try_with_value(|c| c.is_animating()).unwrap_or(false);
        let running = frames.with_value(|h| h.as_ref().is_some_and(|h| h.is_active()));
        if !animating || running {
            return;
        }
        let started = start_frame_loop(move |timestamp| {
            let status = controller.try_update_value(|c| c.tick(timestamp)).unwrap_or(FrameStatus::Finished);
            redraw();
            status
        });
        match started {
            Ok(handle) => frames.set_value(Some(handle)),
            Err(e) => log_error!(LogComponent::Presentation("ChartView"), "Frame loop failed to start: {}", e),
        }
    };

    let after_change = move |changed: bool| {
        if changed {
            redraw();
            ensure_frames();
        }
    };

    let resize_to = move |width: f64| {
        let changed = controller.try_update_value(|c| c.resize(width, hover_capable(), now_ms()));
        after_change(changed.unwrap_or(false));
    };

    let measure = move || {
        if let Some(host) = host_ref.get_untracked() {
            resize_to(host_width(&host));
        }
    };

    let dispatch = move |event: GestureEvent| {
        let changed = controller.try_update_value(|c| c.handle_gesture(event, now_ms()));
        after_change(changed.unwrap_or(false));
    };

    let mouse_point = move |ev: &web_sys::MouseEvent| {
        host_ref
            .get_untracked()
            .map(|host| host_point(&host, ev.client_x() as f64, ev.client_y() as f64))
    };

    host_ref.on_load(move |host| {
        request_animation_frame(measure);

        // Container size, not window size: hosts can grow from zero width
        // without any window resize.
        match observe_width(host.unchecked_ref(), resize_to) {
            Ok(handle) => resize_observer.set_value(Some(handle)),
            Err(e) => {
                log_warn!(LogComponent::Presentation("ChartView"), "Falling back to window resize: {}", e);
                if let Some(handle) =
                    window_event_listener_with_options(ev::resize, &EventOptions::default(), move |_| measure())
                {
                    listeners.update_value(|ls| ls.push(handle));
                }
            }
        }

        let target: &web_sys::EventTarget = host.unchecked_ref();
        let mut handles = Vec::new();
        handles.push(event_listener_with_options(target, ev::wheel, &EventOptions::active(), move |ev| {
            let Some(host) = host_ref.get_untracked() else {
                return;
            };
            let position = host_point(&host, ev.client_x() as f64, ev.client_y() as f64);
            let changed = controller
                .try_update_value(|c| c.handle_gesture(GestureEvent::Wheel { delta_y: ev.delta_y(), position }, now_ms()))
                .unwrap_or(false);
            if changed {
                ev.prevent_default();
            }
            after_change(changed);
        }));
        handles.push(event_listener_with_options(target, ev::touchstart, &EventOptions::active(), move |ev| {
            if let Some(host) = host_ref.get_untracked() {
                dispatch(GestureEvent::Down { points: touch_points(&host, &ev.touches()), time_ms: now_ms() });
            }
        }));
        handles.push(event_listener_with_options(target, ev::touchmove, &EventOptions::active(), move |ev| {
            let Some(host) = host_ref.get_untracked() else {
                return;
            };
            let points = touch_points(&host, &ev.touches());
            let zoomed = controller.try_with_value(|c| c.is_zoomed()).unwrap_or(false);
            if zoomed || points.len() > 1 {
                ev.prevent_default();
            }
            dispatch(GestureEvent::Move { points });
        }));
        let touch_up = move |ev: web_sys::TouchEvent| {
            let Some(host) = host_ref.get_untracked() else {
                return;
            };
            // Suppress the emulated mouse events that would toggle twice
            ev.prevent_default();
            let position = ev
                .changed_touches()
                .get(0)
                .map(|t| host_point(&host, t.client_x() as f64, t.client_y() as f64))
                .unwrap_or(ScreenPoint::ORIGIN);
            dispatch(GestureEvent::Up { remaining: touch_points(&host, &ev.touches()), position, time_ms: now_ms() });
        };
        handles.push(event_listener_with_options(target, ev::touchend, &EventOptions::active(), touch_up));
        handles.push(event_listener_with_options(target, ev::touchcancel, &EventOptions::active(), touch_up));
        listeners.update_value(|ls| ls.extend(handles));
    });

    create_effect(move |previous: Option<()>| {
        let next = data.get();
        if previous.is_none() {
            return;
        }
        frames.update_value(|h| {
            if let Some(handle) = h.take() {
                handle.cancel();
            }
        });
        let started = controller.try_update_value(|c| c.set_data(next, now_ms())).unwrap_or(false);
        redraw();
        if started {
            ensure_frames();
        }
    });

    on_cleanup(move || {
        controller.try_update_value(|c| c.teardown());
        frames.try_update_value(|h| {
            if let Some(handle) = h.take() {
                handle.cancel();
            }
        });
        listeners.try_update_value(|ls| ls.drain(..).for_each(EventListenerHandle::remove));
        resize_observer.try_update_value(|observer| {
            if let Some(observer) = observer.take() {
                observer.disconnect();
            }
        });
    });

    let scene = create_memo(move |_| {
        revision.track();
        controller.with_value(|c| c.scene())
    });
    let writer = SvgWriter::new(chart_id.clone());
    let svg_markup = move || scene.with(|s| writer.write(s));
    let lines = move || {
        revision.track();
        controller.with_value(|c| c.accessibility_lines())
    };

    let reset_zoom = move |_| {
        let changed = controller.try_update_value(|c| c.reset_zoom(now_ms())).unwrap_or(false);
        after_change(changed);
    };

    view! {
        <style>{CHART_STYLES}</style>
        <figure class="space-chart" id=chart_id>
            {title.map(|t| view! { <figcaption class="space-chart-title">{t}</figcaption> })}
            <div
                class="space-chart-host"
                node_ref=host_ref
                style:height=format!("{}px", height)
                style:position="relative"
                on:mousedown=move |ev| {
                    if let Some(p) = mouse_point(&ev) {
                        dispatch(GestureEvent::Down { points: vec![p], time_ms: now_ms() });
                    }
                }
                on:mousemove=move |ev| {
                    if let Some(p) = mouse_point(&ev) {
                        dispatch(GestureEvent::Move { points: vec![p] });
                    }
                }
                on:mouseup=move |ev| {
                    if let Some(p) = mouse_point(&ev) {
                        dispatch(GestureEvent::Up { remaining: vec![], position: p, time_ms: now_ms() });
                    }
                }
                on:mouseleave=move |_| {
                    let changed = controller.try_update_value(|c| c.pointer_leave()).unwrap_or(false);
                    after_change(changed);
                }
                on:dblclick=move |_| dispatch(GestureEvent::DoubleTap)
            >
                <div class="space-chart-svg" aria-hidden="true" inner_html=svg_markup></div>
                {move || scene.with(|s| s.tooltip.clone()).map(|tip| view! {
                    <div
                        class="space-chart-tooltip"
                        role="status"
                        aria-live="polite"
                        aria-label=tip.summary()
                        style:left=format!("{:.0}px", tip.position.x)
                        style:top=format!("{:.0}px", tip.position.y)
                        style:background=tip.background.to_css()
                        style:color=tip.text_color.to_css()
                    >
                        <div class="space-chart-tooltip-title">{tip.title.clone()}</div>
                        {tip.lines.iter().map(|line| view! {
                            <div>
                                <span class="space-chart-swatch" style:background=line.color.to_css()></span>
                                {line.label.as_ref().map(|l| format!("{}: ", l))}
                                {line.value.clone()}
                            </div>
                        }).collect_view()}
                    </div>
                })}
                <div class="space-chart-actions">
                    <Show when=move || scene.with(|s| s.show_reset_zoom)>
                        <button type="button" on:click=reset_zoom>"Reset zoom"</button>
                    </Show>
                    {on_export.map(|callback| view! {
                        <button
                            type="button"
                            on:click=move |_| {
                                if let Some(table) = controller.try_with_value(|c| c.export_table()) {
                                    callback.call(table);
                                }
                            }
                        >
                            "Export"
                        </button>
                    })}
                </div>
            </div>
            <ul class="sr-only">
                {move || lines().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
            </ul>
        </figure>
    }
}

#[component]
pub fn BarChart(
    #[prop(into)] data: MaybeSignal<Vec<DataPoint>>,
    #[prop(optional)] config: ChartConfig,
    #[prop(optional)] theme: Option<Theme>,
    #[prop(optional)] formatter: Option<ValueFormatter>,
    #[prop(optional)] on_export: Option<Callback<ExportTable>>,
) -> impl IntoView {
    let data = Signal::derive(move || ChartData::Bar(data.get()));
    view! { <ChartView data=data config=config theme=theme formatter=formatter on_export=on_export /> }
}

#[component]
pub fn LineChart(
    #[prop(into)] series: MaybeSignal<Vec<Series>>,
    #[prop(into, optional)] labels: MaybeSignal<Vec<String>>,
    #[prop(optional)] config: ChartConfig,
    #[prop(optional)] theme: Option<Theme>,
    #[prop(optional)] formatter: Option<ValueFormatter>,
    #[prop(optional)] on_export: Option<Callback<ExportTable>>,
) -> impl IntoView {
    let data = Signal::derive(move || ChartData::Line { series: series.get(), labels: labels.get() });
    view! { <ChartView data=data config=config theme=theme formatter=formatter on_export=on_export /> }
}

#[component]
pub fn DonutChart(
    #[prop(into)] data: MaybeSignal<Vec<DataPoint>>,
    #[prop(optional)] config: ChartConfig,
    #[prop(optional)] theme: Option<Theme>,
    #[prop(optional)] formatter: Option<ValueFormatter>,
    #[prop(optional)] on_export: Option<Callback<ExportTable>>,
) -> impl IntoView {
    let data = Signal::derive(move || ChartData::Donut(data.get()));
    view! { <ChartView data=data config=config theme=theme formatter=formatter on_export=on_export /> }
}
