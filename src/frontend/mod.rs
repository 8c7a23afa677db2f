mod background;
mod contact_form;
mod dom;
mod header;
mod observe;
mod projects;
mod skills;

use crate::{
    error::SetupError,
    motion::{reveal_delay_ms, typewriter_duration_secs, wants_ripple, RIPPLE_MS},
    scroll::{active_link, ScrollTracker, ScrollView},
    theme::{apply_theme, persist_theme, resolve_theme, watch_system_theme},
};
use background::{FloatingBackground, NeonGrid};
use contact_form::ContactForm;
use gloo_timers::callback::Timeout;
use header::Header;
use projects::Projects;
use skills::Skills;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};
use yew::prelude::*;

const HEADLINE: &str = "Hi, I'm Mohammad Kaleem Basha";
const ABOUT_INTRO: &str =
    "I build computer vision and machine learning systems that turn raw images into decisions.";
const LOADER_FADE_AFTER_MS: u32 = 500;
const LOADER_REMOVE_AFTER_MS: u32 = 300;
const REVEAL_SELECTOR: &str = "h2, p, .about-item, .project-card";

#[derive(Clone, Copy, PartialEq, Eq)]
enum LoaderPhase {
    Visible,
    Fading,
    Gone,
}

fn scroll_metrics(window: &Window) -> (f64, f64, f64) {
    let scroll_top = window.scroll_y().unwrap_or(0.0);
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let scrollable_height = window
        .document()
        .and_then(|document| document.document_element())
        .map(|root| f64::from(root.scroll_height() - root.client_height()))
        .unwrap_or(0.0);

    (scroll_top, viewport_width, scrollable_height)
}

fn scroll_to_top() {
    let Ok(window) = dom::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Fades a section's content in one element after another.
fn reveal_section(section: &Element) {
    let _ = section.class_list().add_1("visible");

    for (index, element) in observe::select_all(section, REVEAL_SELECTOR).into_iter().enumerate() {
        let Ok(element) = element.dyn_into::<HtmlElement>() else {
            continue;
        };
        let delay = reveal_delay_ms(index);
        dom::set_styles(
            &element,
            &[
                ("opacity", "0"),
                ("transform", "translateY(20px)"),
                ("transition", "opacity 0.5s, transform 0.5s"),
                ("transition-delay", format!("{:.1}s", f64::from(delay) / 1_000.0).as_str()),
            ],
        );
        Timeout::new(delay, move || {
            dom::set_styles(&element, &[("opacity", "1"), ("transform", "translateY(0)")]);
        })
        .forget();
    }
}

fn ripple_on_click() -> Result<dom::Listener, SetupError> {
    let document = dom::document()?;
    dom::listen(&document, "click", |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if !wants_ripple(&target.class_name(), &target.tag_name()) {
            return;
        }

        let _ = target.class_list().add_1("ripple-effect");
        Timeout::new(RIPPLE_MS, move || {
            let _ = target.class_list().remove_1("ripple-effect");
        })
        .forget();
    })
}

#[function_component(App)]
fn app() -> Html {
    let theme = use_state(resolve_theme);
    let scroll_view = use_state_eq(ScrollView::default);
    let active = use_state_eq(|| Some(AttrValue::from("#home")));
    let loader = use_state_eq(|| LoaderPhase::Visible);
    let main_ref = use_node_ref();

    {
        let current = *theme;
        let theme = theme.setter();
        use_effect_with((), move |_| {
            apply_theme(current);
            dom::report(
                "system theme tracking",
                watch_system_theme(move |next| {
                    apply_theme(next);
                    theme.set(next);
                }),
            );
            || ()
        });
    }

    {
        let loader = loader.setter();
        use_effect_with((), move |_| {
            let fade = {
                let loader = loader.clone();
                Timeout::new(LOADER_FADE_AFTER_MS, move || loader.set(LoaderPhase::Fading))
            };
            let remove = Timeout::new(LOADER_FADE_AFTER_MS + LOADER_REMOVE_AFTER_MS, move || {
                loader.set(LoaderPhase::Gone)
            });
            move || drop((fade, remove))
        });
    }

    {
        let scroll_view = scroll_view.setter();
        use_effect_with((), move |_| {
            let listener = dom::window().and_then(|window| {
                let source = window.clone();
                let mut tracker = ScrollTracker::default();
                dom::listen(&window, "scroll", move |_| {
                    let (scroll_top, width, scrollable) = scroll_metrics(&source);
                    scroll_view.set(tracker.observe(scroll_top, width, scrollable));
                })
            });
            let listener = dom::report("scroll tracking", listener);
            let ripple = dom::report("button ripple", ripple_on_click());
            move || drop((listener, ripple))
        });
    }

    {
        let active = active.setter();
        let main_ref = main_ref.clone();
        use_effect_with((), move |_| {
            let sections = main_ref
                .cast::<Element>()
                .map(|main| observe::select_all(&main, "section"))
                .unwrap_or_default();

            let nav = if sections.is_empty() {
                Err(SetupError::MissingElement("section"))
            } else {
                observe::on_visible(&sections, 0.3, "-100px 0px -100px 0px", move |target, _| {
                    if let Some(href) = target.get_attribute("id").and_then(|id| active_link(&id)) {
                        active.set(Some(AttrValue::from(href)));
                    }
                })
            };
            let reveal = observe::on_visible(&sections, 0.15, "-50px 0px", |target, observer| {
                reveal_section(target);
                observer.unobserve(target);
            });

            let observers = (
                dom::report("navigation highlight", nav),
                dom::report("section reveal", reveal),
            );
            move || drop(observers)
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = (*theme).toggled();
            persist_theme(next);
            apply_theme(next);
            theme.set(next);
        })
    };

    let on_scroll_top = Callback::from(|_: MouseEvent| scroll_to_top());

    let loader_style = (*loader == LoaderPhase::Gone).then_some("display: none");
    let about_style = format!(
        "animation-duration: {:.2}s, 0.75s",
        typewriter_duration_secs(ABOUT_INTRO.len())
    );

    html! {
        <>
            <div
                id="pageLoader"
                class={classes!("page-loader", (*loader != LoaderPhase::Visible).then_some("fade-out"))}
                style={loader_style}
            >
                <div class="loader-ring"></div>
            </div>
            <div
                id="scrollIndicator"
                class="scroll-indicator"
                style={format!("width: {:.2}%", scroll_view.progress_percent)}
            ></div>
            <NeonGrid />
            <FloatingBackground />
            <div class={classes!("page-shell", (*loader == LoaderPhase::Gone).then_some("loaded"))}>
                <Header
                    theme={*theme}
                    on_toggle_theme={on_toggle_theme}
                    active_link={(*active).clone()}
                    scrolled={scroll_view.scrolled}
                    hidden={scroll_view.header_hidden}
                />
                <main ref={main_ref}>
                    <section id="home" class="section home">
                        <div class="home-content">
                            <h1><span class="typewriter">{HEADLINE}</span></h1>
                            <p>{"Machine learning engineer and computer vision enthusiast."}</p>
                            <a class="btn" href="#contact">{"Get in touch"}</a>
                        </div>
                    </section>

                    <section id="about" class="section about">
                        <h2>{"About"}</h2>
                        <div class="about-content">
                            <p class="typewriter" style={about_style}>{ABOUT_INTRO}</p>
                            <div class="about-item">
                                <h3>{"Education"}</h3>
                                <p>{"B.Tech in Computer Science, specialising in AI and ML."}</p>
                            </div>
                            <div class="about-item">
                                <h3>{"Focus"}</h3>
                                <p>{"Object detection, medical imaging and practical deployment."}</p>
                            </div>
                            <div class="about-item">
                                <h3>{"Outside work"}</h3>
                                <p>{"Hackathons, open source and far too many side projects."}</p>
                            </div>
                        </div>
                    </section>

                    <Skills />
                    <Projects />
                    <ContactForm />
                </main>
                <footer class="site-footer">
                    <p>{"Built with Rust and WebAssembly."}</p>
                </footer>
            </div>
            <button
                id="scrollTop"
                type="button"
                class={classes!("scroll-top", scroll_view.show_scroll_top.then_some("visible"))}
                aria-label="Back to top"
                onclick={on_scroll_top}
            >
                <i class="fas fa-arrow-up" aria-hidden="true"></i>
            </button>
        </>
    }
}

pub fn run() {
    let root = dom::document().and_then(|document| {
        document
            .get_element_by_id("app")
            .ok_or(SetupError::MissingElement("#app"))
    });

    match root {
        Ok(root) => {
            tracing::info!("mounting portfolio");
            yew::Renderer::<App>::with_root(root).render();
        }
        Err(error) => tracing::error!(%error, "cannot mount portfolio"),
    }
}
