use super::dom;
use crate::{
    contact::{
        keeps_focus_style, ContactDraft, Field, GlintConfig, SubmitFlow, SubmitPhase, RESET_AFTER_MS,
        SIMULATED_SEND_MS,
    },
    error::SetupError,
    pool::{dom_pool, flash, SharedPool, TimerScheduler},
    throttle::Throttle,
};
use gloo_timers::future::TimeoutFuture;
use std::{cell::RefCell, collections::HashSet, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    #[prop_or_default]
    pub glints: GlintConfig,
}

#[function_component(ContactForm)]
pub fn contact_form(props: &ContactFormProps) -> Html {
    let draft = use_state(ContactDraft::default);
    let phase = use_state_eq(|| SubmitPhase::Idle);
    let flow = use_mut_ref(SubmitFlow::default);
    let focused = use_state(HashSet::<Field>::new);
    let form_ref = use_node_ref();
    let glint_pool = use_mut_ref(|| None::<SharedPool<HtmlElement>>);
    let throttle = use_mut_ref(|| Throttle::new(f64::from(props.glints.min_interval_ms)));

    {
        let form_ref = form_ref.clone();
        let glint_pool = glint_pool.clone();
        use_effect_with(props.glints.pool_capacity, move |capacity| {
            let created = form_ref
                .cast::<Element>()
                .ok_or(SetupError::MissingElement("#contactForm"))
                .and_then(|form| dom_pool(&form, *capacity, "input-glint"));
            *glint_pool.borrow_mut() = dom::report("input glints", created).map(|p| Rc::new(RefCell::new(p)));
            move || {
                glint_pool.borrow_mut().take();
            }
        });
    }

    let on_input = |field: Field| {
        let draft = draft.clone();
        let glint_pool = glint_pool.clone();
        let throttle = throttle.clone();
        let glint_ms = props.glints.glint_ms;
        Callback::from(move |event: InputEvent| {
            let Some(target) = event.target_dyn_into::<HtmlElement>() else {
                return;
            };
            let value = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
                input.value()
            } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
                area.value()
            } else {
                return;
            };

            let mut next = (*draft).clone();
            *next.field_mut(field) = value;
            draft.set(next);

            if !throttle.borrow_mut().admit(dom::now_ms()) {
                return;
            }
            let Some(pool) = glint_pool.borrow().clone() else {
                return;
            };
            let left = f64::from(target.offset_left()) + dom::random() * f64::from(target.offset_width());
            let top = f64::from(target.offset_top()) + f64::from(target.offset_height()) / 2.0;
            flash(&pool, &TimerScheduler, glint_ms, |glint| {
                dom::set_styles(
                    glint,
                    &[
                        ("left", format!("{left:.0}px").as_str()),
                        ("top", format!("{top:.0}px").as_str()),
                    ],
                );
            });
        })
    };

    let on_focus = |field: Field| {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| {
            let mut next = (*focused).clone();
            next.insert(field);
            focused.set(next);
        })
    };

    let on_blur = |field: Field| {
        let focused = focused.clone();
        let draft = draft.clone();
        Callback::from(move |_: FocusEvent| {
            if keeps_focus_style(draft.field(field)) {
                return;
            }
            let mut next = (*focused).clone();
            next.remove(&field);
            focused.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let phase = phase.setter();
        let focused = focused.setter();
        let flow = flow.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(submission) = flow.borrow_mut().begin() else {
                return;
            };

            phase.set(SubmitPhase::Sending);
            let snapshot = (*draft).clone();
            let draft = draft.setter();
            let phase = phase.clone();
            let focused = focused.clone();
            let flow = flow.clone();

            spawn_local(async move {
                TimeoutFuture::new(SIMULATED_SEND_MS).await;

                let outcome = SubmitPhase::after_send(&snapshot);
                if !flow.borrow_mut().settle(submission, outcome) {
                    return;
                }
                match snapshot.validate() {
                    Ok(()) => tracing::info!("contact message accepted"),
                    Err(error) => tracing::warn!(%error, "contact message rejected"),
                }
                phase.set(outcome);

                TimeoutFuture::new(RESET_AFTER_MS).await;
                if !flow.borrow_mut().reset(submission) {
                    tracing::debug!(?submission, "superseded submission, skipping reset");
                    return;
                }
                if outcome == SubmitPhase::Sent {
                    draft.set(ContactDraft::default());
                    focused.set(HashSet::new());
                }
                phase.set(SubmitPhase::Idle);
            });
        })
    };

    let field_group = |field: Field, label: &'static str, control: Html| {
        html! {
            <div class={classes!("form-group", focused.contains(&field).then_some("input-focused"))}>
                <label for={field.name()}>{label}</label>
                {control}
            </div>
        }
    };

    html! {
        <section id="contact" class="section contact">
            <h2>{"Contact"}</h2>
            <form
                id="contactForm"
                class={classes!("contact-form", (*phase == SubmitPhase::Sent).then_some("success"))}
                ref={form_ref}
                onsubmit={on_submit}
            >
                { field_group(Field::Name, "Name", html! {
                    <input id="name" name="name" type="text" value={draft.name.clone()}
                        oninput={on_input(Field::Name)} onfocus={on_focus(Field::Name)} onblur={on_blur(Field::Name)} />
                }) }
                { field_group(Field::Email, "Email", html! {
                    <input id="email" name="email" type="email" value={draft.email.clone()}
                        oninput={on_input(Field::Email)} onfocus={on_focus(Field::Email)} onblur={on_blur(Field::Email)} />
                }) }
                { field_group(Field::Message, "Message", html! {
                    <textarea id="message" name="message" rows="5" value={draft.message.clone()}
                        oninput={on_input(Field::Message)} onfocus={on_focus(Field::Message)} onblur={on_blur(Field::Message)} />
                }) }
                <button type="submit" class="btn" disabled={phase.button_disabled()}>
                    if *phase == SubmitPhase::Sending {
                        <span class="loading-spinner"></span>{" "}
                    }
                    {phase.button_label()}
                </button>
            </form>
        </section>
    }
}
