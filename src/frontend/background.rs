//! Decorative page background: the neon grid and the floating blobs.

use super::dom::{self, Listener};
use crate::{
    driver::Driver,
    error::SetupError,
    motion::{floating_blobs, plan_glow_cells, GridConfig},
    pool::{dom_pool, flash, SharedPool, TimerScheduler},
};
use gloo_timers::callback::Interval;
use std::{cell::RefCell, rc::Rc};
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NeonGridProps {
    #[prop_or_default]
    pub config: GridConfig,
}

#[function_component(NeonGrid)]
pub fn neon_grid(props: &NeonGridProps) -> Html {
    let grid_ref = use_node_ref();

    {
        let grid_ref = grid_ref.clone();
        use_effect_with(props.config, move |config| {
            let wiring = dom::report("neon grid", start_grid(&grid_ref, *config));
            move || drop(wiring)
        });
    }

    html! { <div class="neon-grid" ref={grid_ref} aria-hidden="true"></div> }
}

/// Starts the glow driver and keeps it paused while the tab is hidden.
/// Dropping the returned listener tears everything down.
fn start_grid(grid_ref: &NodeRef, config: GridConfig) -> Result<Listener, SetupError> {
    let grid = grid_ref
        .cast::<Element>()
        .ok_or(SetupError::MissingElement(".neon-grid"))?;
    let pool: SharedPool<HtmlElement> =
        Rc::new(RefCell::new(dom_pool(&grid, config.pool_capacity, "grid-glow")?));

    let spawn = move || {
        let pool = Rc::clone(&pool);
        Interval::new(config.interval_ms, move || glow_tick(&pool, &config))
    };

    let document = dom::document()?;
    let mut driver = Driver::new();
    let state = driver.on_visibility_change(document.hidden(), &spawn);
    tracing::debug!(?state, "neon grid mounted");

    let visibility_source = document.clone();
    dom::listen(&document, "visibilitychange", move |_| {
        let state = driver.on_visibility_change(visibility_source.hidden(), &spawn);
        tracing::debug!(?state, "neon grid visibility changed");
    })
}

fn glow_tick(pool: &SharedPool<HtmlElement>, config: &GridConfig) {
    let (width, height) = dom::viewport_size();
    let mut random = dom::random;

    for cell in plan_glow_cells(config, width, height, &mut random) {
        let left = format!("{}px", cell.left_px);
        let top = format!("{}px", cell.top_px);
        let size = format!("{}px", cell.size_px);

        flash(pool, &TimerScheduler, config.glow_ms, |element| {
            dom::set_styles(
                element,
                &[
                    ("left", left.as_str()),
                    ("top", top.as_str()),
                    ("width", size.as_str()),
                    ("height", size.as_str()),
                    ("background-color", cell.color),
                ],
            );
        });
    }
}

#[function_component(FloatingBackground)]
pub fn floating_background() -> Html {
    let blobs = use_state(|| {
        let mut random = dom::random;
        floating_blobs(&mut random)
    });

    html! {
        <div id="floating-background" class="floating-background" aria-hidden="true">
            { for blobs.iter().map(|blob| html! {
                <div class="floating-element" style={blob.style()}></div>
            }) }
        </div>
    }
}
